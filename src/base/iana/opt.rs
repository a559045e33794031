//! DNS EDNS0 Option Codes (OPT)

//------------ OptionCode ----------------------------------------------------

int_enum! {
    /// DNS EDNS0 Option Codes (OPT).
    ///
    /// The record data of OPT records is a sequence of options. The type of
    /// each of these options is given through a 16 bit value called the
    /// option code.
    ///
    /// See the [EDNS0 Option Codes IANA registry] for all assigned values.
    ///
    /// [EDNS0 Option Codes IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-11
    =>
    OptionCode, u16;

    (NSID => 3, "NSID")
    (CLIENT_SUBNET => 8, "edns-client-subnet")
    (COOKIE => 10, "COOKIE")
    (TCP_KEEPALIVE => 11, "edns-tcp-keepalive")
    (PADDING => 12, "Padding")
}

int_enum_str_with_prefix!(OptionCode, "OPT", u16, "unknown option code");

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::OptionCode;

    #[test]
    fn padding_code() {
        assert_eq!(OptionCode::PADDING.to_int(), 12);
        assert_eq!("padding".parse::<OptionCode>().unwrap(), OptionCode::PADDING);
        assert_eq!(OptionCode::from_int(65001).to_string(), "OPT65001");
    }
}
