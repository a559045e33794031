//! DNS OpCodes.

//------------ Opcode --------------------------------------------------------

int_enum! {
    /// DNS OpCodes.
    ///
    /// The opcode specifies the kind of query to be performed. It lives in
    /// four bits of the header’s flag word.
    ///
    /// See the [IANA registry] for all assigned values.
    ///
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-5
    =>
    Opcode, u8;

    /// A standard query.
    (QUERY => 0, "QUERY")

    /// An inverse query (obsolete).
    (IQUERY => 1, "IQUERY")

    /// A server status request.
    (STATUS => 2, "STATUS")

    /// A NOTIFY query.
    (NOTIFY => 4, "NOTIFY")

    /// An UPDATE query.
    (UPDATE => 5, "UPDATE")
}

int_enum_str_with_decimal!(Opcode, u8, "unknown opcode");

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mnemonics() {
        assert_eq!("NOTIFY".parse::<Opcode>().unwrap(), Opcode::NOTIFY);
        assert_eq!("5".parse::<Opcode>().unwrap(), Opcode::UPDATE);
        assert_eq!(Opcode::from_int(9).to_string(), "9");
    }
}
