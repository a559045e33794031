//! Resource Record (RR) TYPEs

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource Record Types.
    ///
    /// Each resource records has a 16 bit type value indicating what kind of
    /// information is represented by the record. Normal query includes the
    /// type of record information sought in the question part, resulting in
    /// all the records of that type for the requested domain name being
    /// returned.
    ///
    /// Only the types this crate has record data for plus the meta types
    /// used in questions have constants. All other values are still
    /// available through `from_int` and appear as `TYPEn` in text.
    ///
    /// See the [Resource Record (RR) TYPEs IANA registry] for an overview
    /// of assigned values.
    ///
    /// [Resource Record (RR) TYPEs IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
    =>
    Rtype, u16;

    /// A host address.
    (A => 1, "A")

    /// An authoritative name server.
    (NS => 2, "NS")

    /// The canonical name for an alias.
    (CNAME => 5, "CNAME")

    /// Marks the start of a zone of authority.
    (SOA => 6, "SOA")

    /// A domain name pointer.
    (PTR => 12, "PTR")

    /// Host information.
    (HINFO => 13, "HINFO")

    /// Mail exchange.
    (MX => 15, "MX")

    /// Text strings.
    (TXT => 16, "TXT")

    /// X.25 PSDN address.
    (X25 => 19, "X25")

    /// IPv6 address.
    (AAAA => 28, "AAAA")

    /// The EDNS pseudo-record.
    (OPT => 41, "OPT")

    /// ILNP node identifier.
    (NID => 104, "NID")

    /// ILNP 32-bit locator.
    (L32 => 105, "L32")

    /// ILNP 64-bit locator.
    (L64 => 106, "L64")

    /// ILNP locator pointer.
    (LP => 107, "LP")

    /// Transaction signature.
    (TSIG => 250, "TSIG")

    /// Incremental transfer.
    (IXFR => 251, "IXFR")

    /// Transfer of an entire zone.
    (AXFR => 252, "AXFR")

    /// A request for all records the server/cache has available.
    (ANY => 255, "ANY")
}

int_enum_str_with_prefix!(Rtype, "TYPE", u16, "unknown record type");

impl Rtype {
    /// Returns true if this record type is a meta or pseudo type.
    ///
    /// Records of these types only ever appear in the additional section
    /// or in questions.
    #[must_use]
    pub fn is_pseudo(self) -> bool {
        matches!(self.0, 41 | 128..=255)
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::Rtype;
    use core::str::FromStr;

    #[cfg(feature = "serde")]
    #[test]
    fn ser_de() {
        use serde_test::{assert_tokens, Configure, Token};

        assert_tokens(&Rtype::A.readable(), &[Token::Str("A")]);
        assert_tokens(&Rtype(5000).readable(), &[Token::Str("TYPE5000")]);
        assert_tokens(&Rtype::A.compact(), &[Token::U16(1)]);
        assert_tokens(&Rtype(5000).compact(), &[Token::U16(5000)]);
    }

    #[test]
    fn mnemonics() {
        assert_eq!(Rtype::from_str("aaaa").unwrap(), Rtype::AAAA);
        assert_eq!(Rtype::from_str("TYPE250").unwrap(), Rtype::TSIG);
        assert_eq!(Rtype::from_int(65534).to_string(), "TYPE65534");
        assert!(Rtype::from_str("TYPE65536").is_err());
    }

    #[test]
    fn pseudo() {
        assert!(Rtype::OPT.is_pseudo());
        assert!(Rtype::TSIG.is_pseudo());
        assert!(!Rtype::SOA.is_pseudo());
    }

    #[test]
    fn wire() {
        let mut buf = bytes::BytesMut::new();
        Rtype::SOA.compose(&mut buf);
        assert_eq!(buf.as_ref(), b"\x00\x06");
        let mut parser = octseq::parse::Parser::from_ref(buf.as_ref());
        assert_eq!(Rtype::parse(&mut parser).unwrap(), Rtype::SOA);
    }
}
