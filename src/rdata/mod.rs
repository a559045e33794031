//! Record data.
//!
//! This module contains the record data types this crate knows how to
//! compose into and parse from wire format. Each type implements the
//! [`ComposeRecordData`] and [`ParseRecordData`] traits. All of them are
//! collected into the closed [`RecordData`] enum which also has a variant
//! for the OPT pseudo-record and a catch-all for any other record type.
//!
//! The types are organized into submodules by the RFC that defined them:
//!
//! * [rfc1035]: A, CNAME, HINFO, MX, NS, PTR, SOA, and TXT,
//! * [aaaa]: AAAA,
//! * [rfc1183]: X25,
//! * [rfc6742]: NID, L32, L64, and LP, and
//! * [tsig]: TSIG.

#[macro_use]
mod macros;

use crate::base::iana::Rtype;
use crate::base::name::{CompressionTable, Name};
use crate::base::wire::{ComposeError, ParseError, Parser};
use bytes::{BufMut, Bytes, BytesMut};
use core::fmt;

//============ Record Data Types =============================================

rdata_types! {
    rfc1035::{A, Cname, Hinfo, Mx, Ns, Ptr, Soa, Txt}
    aaaa::{Aaaa}
    rfc1183::{X25}
    rfc6742::{Nid, L32, L64, Lp}
    tsig::{Tsig}
}

pub use self::tsig::Time48;

pub mod aaaa;
pub mod rfc1035;
pub mod rfc1183;
pub mod rfc6742;
pub mod tsig;

//------------ ComposeRecordData ---------------------------------------------

/// A type of record data that can be composed into wire format.
pub trait ComposeRecordData {
    /// Returns the record type of the data.
    fn rtype(&self) -> Rtype;

    /// Appends the wire format of the record data to the target.
    ///
    /// Only the record data itself is written, not its length. Embedded
    /// domain names of types that allow it are compressed if `compress` is
    /// given. Relative names are made absolute with `origin`. If
    /// `canonical` is `true`, the canonical form of RFC 4034 is produced,
    /// meaning names are lowercased where the record type calls for it.
    ///
    /// On error, the target may contain partial data. Callers are
    /// expected to truncate it.
    fn compose_rdata(
        &self,
        target: &mut BytesMut,
        compress: Option<&mut CompressionTable>,
        origin: Option<&Name>,
        canonical: bool,
    ) -> Result<(), ComposeError>;

    /// Returns the record data in uncompressed canonical wire format.
    fn to_canonical_wire(
        &self,
        origin: Option<&Name>,
    ) -> Result<Bytes, ComposeError> {
        let mut target = BytesMut::new();
        self.compose_rdata(&mut target, None, origin, true)?;
        Ok(target.freeze())
    }
}

//------------ ParseRecordData -----------------------------------------------

/// A type of record data that can be parsed from wire format.
pub trait ParseRecordData: Sized {
    /// Parses the record data.
    ///
    /// The parser is positioned at the start of the record data and the
    /// record data is `rdlen` octets long. Types with a fixed layout can
    /// ignore `rdlen` since the length is checked afterwards.
    fn parse_rdata(
        parser: &mut Parser<'_>,
        rdlen: usize,
    ) -> Result<Self, ParseError>;
}

//------------ UnknownRecordData ---------------------------------------------

/// Record data of a type without a dedicated type.
///
/// The data is kept as raw octets and composed as is.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct UnknownRecordData {
    rtype: Rtype,
    data: Bytes,
}

impl UnknownRecordData {
    /// Creates unknown record data from its type and octets.
    ///
    /// Returns an error if the data is longer than 65535 octets.
    pub fn new(rtype: Rtype, data: Bytes) -> Result<Self, ComposeError> {
        if data.len() > 0xFFFF {
            return Err(ComposeError::LongData);
        }
        Ok(UnknownRecordData { rtype, data })
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Takes the remaining `rdlen` octets as the record data.
    pub fn parse(
        rtype: Rtype,
        parser: &mut Parser<'_>,
        rdlen: usize,
    ) -> Result<Self, ParseError> {
        let data = Bytes::copy_from_slice(parser.parse_octets(rdlen)?);
        Ok(UnknownRecordData { rtype, data })
    }
}

impl ComposeRecordData for UnknownRecordData {
    fn rtype(&self) -> Rtype {
        self.rtype
    }

    fn compose_rdata(
        &self,
        target: &mut BytesMut,
        _compress: Option<&mut CompressionTable>,
        _origin: Option<&Name>,
        _canonical: bool,
    ) -> Result<(), ComposeError> {
        target.put_slice(&self.data);
        Ok(())
    }
}

/// Uses the generic format of RFC 3597.
impl fmt::Display for UnknownRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\# {}", self.data.len())?;
        if !self.data.is_empty() {
            f.write_str(" ")?;
            for ch in self.data.iter() {
                write!(f, "{:02x}", ch)?;
            }
        }
        Ok(())
    }
}

//------------ Helpers -------------------------------------------------------

/// Checks that the data fits into a character string.
fn check_char_str(data: &[u8]) -> Result<(), RdataError> {
    if data.len() > 255 {
        Err(RdataError::LongCharStr)
    } else {
        Ok(())
    }
}

/// Writes a character string in presentation format.
fn fmt_char_str(data: &[u8], f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("\"")?;
    for &ch in data {
        if ch == b'"' || ch == b'\\' {
            write!(f, "\\{}", ch as char)?;
        } else if (0x20..0x7F).contains(&ch) {
            write!(f, "{}", ch as char)?;
        } else {
            write!(f, "\\{:03}", ch)?;
        }
    }
    f.write_str("\"")
}

//------------ RdataError ----------------------------------------------------

/// Record data could not be created from its components.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RdataError {
    /// A character string was longer than 255 octets.
    LongCharStr,

    /// A record type requiring at least one character string got none.
    Empty,
}

impl fmt::Display for RdataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RdataError::LongCharStr => {
                f.write_str("character string too long")
            }
            RdataError::Empty => f.write_str("no character strings"),
        }
    }
}

impl std::error::Error for RdataError {}

//============ Testing =======================================================
