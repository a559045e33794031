//! Record data from [RFC 1183]: X25 records.
//!
//! [RFC 1183]: https://tools.ietf.org/html/rfc1183

use super::{
    check_char_str, fmt_char_str, ComposeRecordData, ParseRecordData,
    RdataError,
};
use crate::base::iana::Rtype;
use crate::base::name::{CompressionTable, Name};
use crate::base::wire::{
    compose_char_str, parse_char_str, ComposeError, ParseError, Parser,
};
use bytes::{Bytes, BytesMut};
use core::fmt;

//------------ X25 -----------------------------------------------------------

/// X25 record data.
///
/// The record holds the X.121 PSDN address of a host as a single character
/// string.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct X25 {
    address: Bytes,
}

impl X25 {
    pub const RTYPE: Rtype = Rtype::X25;

    /// Creates new X25 record data.
    ///
    /// The address must not be longer than 255 octets.
    pub fn new(address: Bytes) -> Result<Self, RdataError> {
        check_char_str(&address)?;
        Ok(X25 { address })
    }

    pub fn address(&self) -> &Bytes {
        &self.address
    }
}

impl ParseRecordData for X25 {
    fn parse_rdata(
        parser: &mut Parser<'_>,
        _rdlen: usize,
    ) -> Result<Self, ParseError> {
        Ok(X25 {
            address: Bytes::copy_from_slice(parse_char_str(parser)?),
        })
    }
}

impl ComposeRecordData for X25 {
    fn rtype(&self) -> Rtype {
        Self::RTYPE
    }

    fn compose_rdata(
        &self,
        target: &mut BytesMut,
        _compress: Option<&mut CompressionTable>,
        _origin: Option<&Name>,
        _canonical: bool,
    ) -> Result<(), ComposeError> {
        compose_char_str(target, &self.address)
    }
}

impl fmt::Display for X25 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_char_str(&self.address, f)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn x25() {
        let x25 = X25::new(Bytes::from_static(b"311061700956")).unwrap();
        let mut buf = BytesMut::new();
        x25.compose_rdata(&mut buf, None, None, false).unwrap();
        assert_eq!(buf.as_ref(), b"\x0c311061700956");
        let mut parser = Parser::from_ref(buf.as_ref());
        assert_eq!(X25::parse_rdata(&mut parser, buf.len()).unwrap(), x25);
        assert_eq!(x25.to_string(), "\"311061700956\"");
        assert_eq!(
            X25::new(Bytes::from(vec![b'1'; 256])),
            Err(RdataError::LongCharStr)
        );
    }
}
