//! DNS response codes and TSIG error codes.
//!
//! The original DNS specification in [RFC 1035] specified four bits of the
//! message header as response code. The type [`Rcode`] defined herein
//! represents these codes. The TSIG record defined by [RFC 8945] uses a
//! 16 bit error code represented by [`TsigRcode`]. Both share the same
//! definition space.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035
//! [RFC 8945]: https://tools.ietf.org/html/rfc8945
#![allow(clippy::upper_case_acronyms)]

use core::fmt;

//------------ Rcode --------------------------------------------------------

int_enum! {
    /// DNS Response Codes.
    ///
    /// The response code of a response indicates what happend on the server
    /// when trying to answer the query. The code is a 4 bit value and part
    /// of the header of a DNS message. Only the lower four bits of the
    /// wrapped value are ever used.
    =>
    Rcode, u8;

    /// No error condition.
    (NOERROR => 0, "NOERROR")

    /// Format error.
    (FORMERR => 1, "FORMERR")

    /// Server failure.
    (SERVFAIL => 2, "SERVFAIL")

    /// Name error.
    (NXDOMAIN => 3, "NXDOMAIN")

    /// Not implemented.
    (NOTIMP => 4, "NOTIMP")

    /// Query refused.
    (REFUSED => 5, "REFUSED")

    /// Name exists when it should not.
    (YXDOMAIN => 6, "YXDOMAIN")

    /// RR set exists when it should not.
    (YXRRSET => 7, "YXRRSET")

    /// RR set that should exist does not.
    (NXRRSET => 8, "NXRRSET")

    /// Server not authoritative for zone or client not authorized.
    (NOTAUTH => 9, "NOTAUTH")

    /// Name not contained in zone.
    (NOTZONE => 10, "NOTZONE")
}

impl Rcode {
    /// Creates a response code from the flags word of a message header.
    #[must_use]
    pub const fn from_flags(flags: u16) -> Self {
        Rcode((flags & 0x000F) as u8)
    }
}

impl fmt::Display for Rcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_mnemonic_str() {
            Some(m) => f.write_str(m),
            None => write!(f, "RCODE{}", self.0),
        }
    }
}

//------------ TsigRcode ----------------------------------------------------

int_enum! {
    /// Response codes for transaction authentication (TSIG).
    ///
    /// TSIG and TKEY resource records contain a 16 bit wide error field
    /// whose values are an extension of the standard DNS [`Rcode`].
    ///
    /// See [RFC 8945] for the TSIG specific values.
    ///
    /// [RFC 8945]: https://tools.ietf.org/html/rfc8945
    =>
    TsigRcode, u16;

    /// No error condition.
    (NOERROR => 0, "NOERROR")

    /// Format error.
    (FORMERR => 1, "FORMERR")

    /// Server failure.
    (SERVFAIL => 2, "SERVFAIL")

    /// Name error.
    (NXDOMAIN => 3, "NXDOMAIN")

    /// Not implemented.
    (NOTIMP => 4, "NOTIMP")

    /// Query refused.
    (REFUSED => 5, "REFUSED")

    /// Server not authoritative for zone or client not authorized.
    (NOTAUTH => 9, "NOTAUTH")

    /// TSIG signature failure.
    (BADSIG => 16, "BADSIG")

    /// Key not recognized.
    (BADKEY => 17, "BADKEY")

    /// Signature out of time window.
    (BADTIME => 18, "BADTIME")

    /// Bad TKEY mode.
    (BADMODE => 19, "BADMODE")

    /// Duplicate key name.
    (BADNAME => 20, "BADNAME")

    /// Algorithm not supported.
    (BADALG => 21, "BADALG")

    /// Bad truncation.
    (BADTRUNC => 22, "BADTRUNC")

    /// Bad or missing server cookie.
    (BADCOOKIE => 23, "BADCOOKIE")
}

int_enum_str_with_decimal!(TsigRcode, u16, "unknown TSIG error");

//============ Tests =========================================================
