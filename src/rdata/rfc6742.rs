//! Record data from [RFC 6742]: ILNP records.
//!
//! The Identifier-Locator Network Protocol uses the NID, L32, L64, and LP
//! record types to publish node identifiers and locators.
//!
//! [RFC 6742]: https://tools.ietf.org/html/rfc6742

use super::{ComposeRecordData, ParseRecordData};
use crate::base::iana::Rtype;
use crate::base::name::{CompressionTable, Name};
use crate::base::wire::{ComposeError, ParseError, Parser};
use bytes::{BufMut, BytesMut};
use core::fmt;
use std::net::Ipv4Addr;

//------------ Nid -----------------------------------------------------------

/// NID record data.
///
/// Holds a 64 bit node identifier.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Nid {
    preference: u16,
    node_id: u64,
}

impl Nid {
    pub const RTYPE: Rtype = Rtype::NID;

    pub fn new(preference: u16, node_id: u64) -> Self {
        Nid {
            preference,
            node_id,
        }
    }

    pub fn preference(&self) -> u16 {
        self.preference
    }

    pub fn node_id(&self) -> u64 {
        self.node_id
    }
}

impl ParseRecordData for Nid {
    fn parse_rdata(
        parser: &mut Parser<'_>,
        rdlen: usize,
    ) -> Result<Self, ParseError> {
        if rdlen != 10 {
            return Err(ParseError::form_error("invalid NID node identifier"));
        }
        Ok(Self::new(parser.parse_u16_be()?, parse_u64(parser)?))
    }
}

impl ComposeRecordData for Nid {
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
        target.put_u16(self.preference);
        target.put_u64(self.node_id);
        Ok(())
    }
}

impl fmt::Display for Nid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ", self.preference)?;
        fmt_hex64(self.node_id, f)
    }
}

//------------ L32 -----------------------------------------------------------

/// L32 record data.
///
/// Holds a 32 bit locator written like an IPv4 address.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct L32 {
    preference: u16,
    locator32: Ipv4Addr,
}

impl L32 {
    pub const RTYPE: Rtype = Rtype::L32;

    pub fn new(preference: u16, locator32: Ipv4Addr) -> Self {
        L32 {
            preference,
            locator32,
        }
    }

    pub fn preference(&self) -> u16 {
        self.preference
    }

    pub fn locator32(&self) -> Ipv4Addr {
        self.locator32
    }
}

impl ParseRecordData for L32 {
    fn parse_rdata(
        parser: &mut Parser<'_>,
        _rdlen: usize,
    ) -> Result<Self, ParseError> {
        let preference = parser.parse_u16_be()?;
        let mut buf = [0u8; 4];
        parser.parse_buf(&mut buf)?;
        Ok(Self::new(preference, buf.into()))
    }
}

impl ComposeRecordData for L32 {
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
        target.put_u16(self.preference);
        target.put_slice(&self.locator32.octets());
        Ok(())
    }
}

impl fmt::Display for L32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.locator32)
    }
}

//------------ L64 -----------------------------------------------------------

/// L64 record data.
///
/// Holds a 64 bit locator written in the same format as a node identifier.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct L64 {
    preference: u16,
    locator64: u64,
}

impl L64 {
    pub const RTYPE: Rtype = Rtype::L64;

    pub fn new(preference: u16, locator64: u64) -> Self {
        L64 {
            preference,
            locator64,
        }
    }

    pub fn preference(&self) -> u16 {
        self.preference
    }

    pub fn locator64(&self) -> u64 {
        self.locator64
    }
}

impl ParseRecordData for L64 {
    fn parse_rdata(
        parser: &mut Parser<'_>,
        _rdlen: usize,
    ) -> Result<Self, ParseError> {
        Ok(Self::new(parser.parse_u16_be()?, parse_u64(parser)?))
    }
}

impl ComposeRecordData for L64 {
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
        target.put_u16(self.preference);
        target.put_u64(self.locator64);
        Ok(())
    }
}

impl fmt::Display for L64 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ", self.preference)?;
        fmt_hex64(self.locator64, f)
    }
}

//------------ Lp ------------------------------------------------------------

/// LP record data.
///
/// Points to the name of a subnetwork for which L32 or L64 records exist.
/// The name is never compressed.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Lp {
    preference: u16,
    fqdn: Name,
}

impl Lp {
    pub const RTYPE: Rtype = Rtype::LP;

    pub fn new(preference: u16, fqdn: Name) -> Self {
        Lp { preference, fqdn }
    }

    pub fn preference(&self) -> u16 {
        self.preference
    }

    pub fn fqdn(&self) -> &Name {
        &self.fqdn
    }
}

impl ParseRecordData for Lp {
    fn parse_rdata(
        parser: &mut Parser<'_>,
        _rdlen: usize,
    ) -> Result<Self, ParseError> {
        Ok(Self::new(parser.parse_u16_be()?, Name::parse(parser)?))
    }
}

impl ComposeRecordData for Lp {
    fn rtype(&self) -> Rtype {
        Self::RTYPE
    }

    fn compose_rdata(
        &self,
        target: &mut BytesMut,
        _compress: Option<&mut CompressionTable>,
        origin: Option<&Name>,
        canonical: bool,
    ) -> Result<(), ComposeError> {
        target.put_u16(self.preference);
        self.fqdn.compose(target, None, origin, canonical)
    }
}

impl fmt::Display for Lp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.fqdn)
    }
}

//------------ Helpers -------------------------------------------------------

fn parse_u64(parser: &mut Parser<'_>) -> Result<u64, ParseError> {
    let mut buf = [0u8; 8];
    parser.parse_buf(&mut buf)?;
    Ok(u64::from_be_bytes(buf))
}

/// Writes 64 bits as four colon-separated groups of four hex digits.
fn fmt_hex64(value: u64, f: &mut fmt::Formatter) -> fmt::Result {
    write!(
        f,
        "{:04x}:{:04x}:{:04x}:{:04x}",
        value >> 48,
        (value >> 32) & 0xFFFF,
        (value >> 16) & 0xFFFF,
        value & 0xFFFF
    )
}

//============ Testing =======================================================
