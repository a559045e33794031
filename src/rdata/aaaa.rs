//! Record data from [RFC 3596]: AAAA records.
//!
//! [RFC 3596]: https://tools.ietf.org/html/rfc3596

use super::{ComposeRecordData, ParseRecordData};
use crate::base::iana::Rtype;
use crate::base::name::{CompressionTable, Name};
use crate::base::wire::{ComposeError, ParseError, Parser};
use bytes::{BufMut, BytesMut};
use core::fmt;
use std::net::Ipv6Addr;

//------------ Aaaa ---------------------------------------------------------

/// AAAA record data.
///
/// AAAA records convey the IPv6 address of a host.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Aaaa {
    addr: Ipv6Addr,
}

impl Aaaa {
    pub const RTYPE: Rtype = Rtype::AAAA;

    pub fn new(addr: Ipv6Addr) -> Aaaa {
        Aaaa { addr }
    }

    pub fn addr(&self) -> Ipv6Addr {
        self.addr
    }
}

//--- From

impl From<Ipv6Addr> for Aaaa {
    fn from(addr: Ipv6Addr) -> Self {
        Self::new(addr)
    }
}

//--- ParseRecordData and ComposeRecordData

impl ParseRecordData for Aaaa {
    fn parse_rdata(
        parser: &mut Parser<'_>,
        _rdlen: usize,
    ) -> Result<Self, ParseError> {
        let mut buf = [0u8; 16];
        parser.parse_buf(&mut buf)?;
        Ok(Aaaa::new(buf.into()))
    }
}

impl ComposeRecordData for Aaaa {
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
        target.put_slice(&self.addr.octets());
        Ok(())
    }
}

//--- Display

impl fmt::Display for Aaaa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::rdata::RecordData;

    #[test]
    fn compose_parse() {
        let aaaa = Aaaa::new("2001:db8::1".parse().unwrap());
        let mut buf = BytesMut::new();
        aaaa.compose_rdata(&mut buf, None, None, false).unwrap();
        assert_eq!(buf.len(), 16);
        assert_eq!(&buf[..4], b"\x20\x01\x0d\xb8");
        let mut parser = Parser::from_ref(buf.as_ref());
        assert_eq!(
            RecordData::parse(Rtype::AAAA, &mut parser, 16).unwrap(),
            RecordData::Aaaa(aaaa)
        );
        assert_eq!(aaaa.to_string(), "2001:db8::1");
    }
}
