//! Record data from [RFC 1035]: initial record types.
//!
//! This RFC defines the initial set of record types. Only those that are
//! still in use are provided here.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::{
    check_char_str, fmt_char_str, ComposeRecordData, ParseRecordData,
    RdataError,
};
use crate::base::iana::Rtype;
use crate::base::name::{CompressionTable, Name};
use crate::base::serial::Serial;
use crate::base::wire::{
    compose_char_str, parse_char_str, ComposeError, ParseError, Parser,
};
use bytes::{BufMut, Bytes, BytesMut};
use core::fmt;
use std::net::Ipv4Addr;

//------------ A -------------------------------------------------------------

/// A record data.
///
/// A records convey the IPv4 address of a host.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct A {
    addr: Ipv4Addr,
}

impl A {
    pub const RTYPE: Rtype = Rtype::A;

    /// Creates a new A record data from an IPv4 address.
    pub fn new(addr: Ipv4Addr) -> A {
        A { addr }
    }

    /// Creates a new A record from the IPv4 address components.
    pub fn from_octets(a: u8, b: u8, c: u8, d: u8) -> A {
        A::new(Ipv4Addr::new(a, b, c, d))
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }
}

impl From<Ipv4Addr> for A {
    fn from(addr: Ipv4Addr) -> Self {
        Self::new(addr)
    }
}

impl ParseRecordData for A {
    fn parse_rdata(
        parser: &mut Parser<'_>,
        _rdlen: usize,
    ) -> Result<Self, ParseError> {
        let mut buf = [0u8; 4];
        parser.parse_buf(&mut buf)?;
        Ok(A::new(buf.into()))
    }
}

impl ComposeRecordData for A {
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

impl fmt::Display for A {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}

//------------ Cname, Ns, Ptr ------------------------------------------------

name_type! {
    /// CNAME record data.
    ///
    /// The CNAME record specifies the canonical or primary name for domain
    /// name alias.
    (Cname, CNAME, cname, into_cname)
}

name_type! {
    /// NS record data.
    ///
    /// NS records specify hosts that are authoritative for a class and
    /// domain.
    (Ns, NS, nsdname, into_nsdname)
}

name_type! {
    /// PTR record data.
    ///
    /// PRT records are used in special domains to point to some other
    /// location in the domain space.
    (Ptr, PTR, ptrdname, into_ptrdname)
}

//------------ Hinfo ---------------------------------------------------------

/// HINFO record data.
///
/// HINFO records are used to acquire general information about a host,
/// specifically the CPU type and operating system type.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Hinfo {
    cpu: Bytes,
    os: Bytes,
}

impl Hinfo {
    pub const RTYPE: Rtype = Rtype::HINFO;

    /// Creates a new HINFO record data from the components.
    ///
    /// Both components have to be at most 255 octets long.
    pub fn new(cpu: Bytes, os: Bytes) -> Result<Self, RdataError> {
        check_char_str(&cpu)?;
        check_char_str(&os)?;
        Ok(Hinfo { cpu, os })
    }

    /// The CPU type of the host.
    pub fn cpu(&self) -> &Bytes {
        &self.cpu
    }

    /// The operating system type of the host.
    pub fn os(&self) -> &Bytes {
        &self.os
    }
}

impl ParseRecordData for Hinfo {
    fn parse_rdata(
        parser: &mut Parser<'_>,
        _rdlen: usize,
    ) -> Result<Self, ParseError> {
        let cpu = Bytes::copy_from_slice(parse_char_str(parser)?);
        let os = Bytes::copy_from_slice(parse_char_str(parser)?);
        Ok(Hinfo { cpu, os })
    }
}

impl ComposeRecordData for Hinfo {
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
        compose_char_str(target, &self.cpu)?;
        compose_char_str(target, &self.os)
    }
}

impl fmt::Display for Hinfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_char_str(&self.cpu, f)?;
        f.write_str(" ")?;
        fmt_char_str(&self.os, f)
    }
}

//------------ Mx ------------------------------------------------------------

/// MX record data.
///
/// The MX record specifies a host willing to serve as a mail exchange for
/// the owner name.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Mx {
    preference: u16,
    exchange: Name,
}

impl Mx {
    pub const RTYPE: Rtype = Rtype::MX;

    /// Creates a new MX record data from the components.
    pub fn new(preference: u16, exchange: Name) -> Self {
        Mx {
            preference,
            exchange,
        }
    }

    /// The preference for this record.
    ///
    /// Defines an order if there are several MX records for the same owner.
    /// Lower values are preferred.
    pub fn preference(&self) -> u16 {
        self.preference
    }

    /// The name of the host that is the exchange.
    pub fn exchange(&self) -> &Name {
        &self.exchange
    }
}

impl ParseRecordData for Mx {
    fn parse_rdata(
        parser: &mut Parser<'_>,
        _rdlen: usize,
    ) -> Result<Self, ParseError> {
        Ok(Self::new(parser.parse_u16_be()?, Name::parse(parser)?))
    }
}

impl ComposeRecordData for Mx {
    fn rtype(&self) -> Rtype {
        Self::RTYPE
    }

    fn compose_rdata(
        &self,
        target: &mut BytesMut,
        compress: Option<&mut CompressionTable>,
        origin: Option<&Name>,
        canonical: bool,
    ) -> Result<(), ComposeError> {
        target.put_u16(self.preference);
        self.exchange.compose(target, compress, origin, canonical)
    }
}

impl fmt::Display for Mx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}

//------------ Soa -----------------------------------------------------------

/// SOA record data.
///
/// SOA records mark the top of a zone and contain information pertinent to
/// name server maintenance operations.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Soa {
    mname: Name,
    rname: Name,
    serial: Serial,
    refresh: u32,
    retry: u32,
    expire: u32,
    minimum: u32,
}

impl Soa {
    pub const RTYPE: Rtype = Rtype::SOA;

    /// Creates new SOA record data from content.
    pub fn new(
        mname: Name,
        rname: Name,
        serial: Serial,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    ) -> Self {
        Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        }
    }

    /// The primary name server for the zone.
    pub fn mname(&self) -> &Name {
        &self.mname
    }

    /// The mailbox for the person responsible for this zone.
    pub fn rname(&self) -> &Name {
        &self.rname
    }

    /// The serial number of the original copy of the zone.
    pub fn serial(&self) -> Serial {
        self.serial
    }

    /// The time interval in seconds before the zone should be refreshed.
    pub fn refresh(&self) -> u32 {
        self.refresh
    }

    /// The time in seconds before a failed refresh is retried.
    pub fn retry(&self) -> u32 {
        self.retry
    }

    /// The upper limit of time in seconds the zone is authoritative.
    pub fn expire(&self) -> u32 {
        self.expire
    }

    /// The minimum TTL to be exported with any RR from this zone.
    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    /// Returns a copy of the record data with a different serial number.
    #[must_use]
    pub fn with_serial(&self, serial: Serial) -> Self {
        Soa {
            serial,
            ..self.clone()
        }
    }
}

impl ParseRecordData for Soa {
    fn parse_rdata(
        parser: &mut Parser<'_>,
        _rdlen: usize,
    ) -> Result<Self, ParseError> {
        Ok(Self::new(
            Name::parse(parser)?,
            Name::parse(parser)?,
            Serial::parse(parser)?,
            parser.parse_u32_be()?,
            parser.parse_u32_be()?,
            parser.parse_u32_be()?,
            parser.parse_u32_be()?,
        ))
    }
}

impl ComposeRecordData for Soa {
    fn rtype(&self) -> Rtype {
        Self::RTYPE
    }

    fn compose_rdata(
        &self,
        target: &mut BytesMut,
        mut compress: Option<&mut CompressionTable>,
        origin: Option<&Name>,
        canonical: bool,
    ) -> Result<(), ComposeError> {
        self.mname.compose(
            target,
            compress.as_deref_mut(),
            origin,
            canonical,
        )?;
        self.rname.compose(target, compress, origin, canonical)?;
        self.serial.compose(target)?;
        target.put_u32(self.refresh);
        target.put_u32(self.retry);
        target.put_u32(self.expire);
        target.put_u32(self.minimum);
        Ok(())
    }
}

impl fmt::Display for Soa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.mname,
            self.rname,
            self.serial,
            self.refresh,
            self.retry,
            self.expire,
            self.minimum
        )
    }
}

//------------ Txt -----------------------------------------------------------

/// TXT record data.
///
/// TXT records hold descriptive text as a sequence of one or more
/// character strings.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Txt {
    strings: Vec<Bytes>,
}

impl Txt {
    pub const RTYPE: Rtype = Rtype::TXT;

    /// Creates new TXT record data from a sequence of strings.
    ///
    /// There has to be at least one string and no string may be longer
    /// than 255 octets.
    pub fn new<I>(strings: I) -> Result<Self, RdataError>
    where
        I: IntoIterator,
        I::Item: Into<Bytes>,
    {
        let strings = strings
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Bytes>>();
        if strings.is_empty() {
            return Err(RdataError::Empty);
        }
        for item in &strings {
            check_char_str(item)?;
        }
        Ok(Txt { strings })
    }

    /// Returns an iterator over the character strings.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.strings.iter().map(AsRef::as_ref)
    }

    /// Returns the concatenation of all character strings.
    pub fn text(&self) -> Vec<u8> {
        self.strings.concat()
    }
}

impl ParseRecordData for Txt {
    fn parse_rdata(
        parser: &mut Parser<'_>,
        rdlen: usize,
    ) -> Result<Self, ParseError> {
        let end = parser.pos() + rdlen;
        let mut strings = Vec::new();
        while parser.pos() < end {
            strings.push(Bytes::copy_from_slice(parse_char_str(parser)?));
        }
        if strings.is_empty() {
            return Err(ParseError::form_error("empty TXT record"));
        }
        Ok(Txt { strings })
    }
}

impl ComposeRecordData for Txt {
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
        for item in &self.strings {
            compose_char_str(target, item)?;
        }
        Ok(())
    }
}

impl fmt::Display for Txt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, item) in self.strings.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            fmt_char_str(item, f)?;
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::rdata::RecordData;

    fn compose(data: &impl ComposeRecordData) -> BytesMut {
        let mut buf = BytesMut::new();
        data.compose_rdata(&mut buf, None, None, false).unwrap();
        buf
    }

    fn parse_back(rtype: Rtype, buf: &[u8]) -> RecordData {
        let mut parser = Parser::from_ref(buf);
        RecordData::parse(rtype, &mut parser, buf.len()).unwrap()
    }

    #[test]
    fn a() {
        let a = A::from_octets(192, 0, 2, 1);
        assert_eq!(compose(&a).as_ref(), b"\xc0\x00\x02\x01");
        assert_eq!(a.to_string(), "192.0.2.1");
    }

    #[test]
    fn mx_compresses_exchange() {
        let mut table = CompressionTable::new();
        let mut buf = BytesMut::new();
        let exchange: Name = "mail.example.com.".parse().unwrap();
        Mx::new(10, exchange.clone())
            .compose_rdata(&mut buf, Some(&mut table), None, false)
            .unwrap();
        assert_eq!(table.get(&exchange), Some(2));
        Mx::new(20, exchange.clone())
            .compose_rdata(&mut buf, Some(&mut table), None, false)
            .unwrap();
        assert_eq!(&buf[buf.len() - 4..], b"\x00\x14\xc0\x02");
    }

    #[test]
    fn soa() {
        let soa = Soa::new(
            "ns.example.".parse().unwrap(),
            "hostmaster.example.".parse().unwrap(),
            Serial::from(2020_01_01u32),
            3600,
            600,
            86400,
            300,
        );
        let buf = compose(&soa);
        assert_eq!(parse_back(Rtype::SOA, &buf), RecordData::Soa(soa.clone()));
        let newer = soa.with_serial(soa.serial().add(1).unwrap());
        assert_eq!(newer.serial(), Serial::from(2020_01_02u32));
        assert_eq!(soa.serial(), Serial::from(2020_01_01u32));
        assert_eq!(
            soa.to_string(),
            "ns.example. hostmaster.example. 20200101 3600 600 86400 300"
        );

        let wide = soa.with_serial(Serial::new(2020_01_01, 64).unwrap());
        assert_eq!(
            wide.compose_rdata(&mut BytesMut::new(), None, None, false),
            Err(ComposeError::SerialWidth)
        );
    }

    #[test]
    fn ns_canonical() {
        let ns = Ns::new("NS1.Example.".parse().unwrap());
        let mut buf = BytesMut::new();
        ns.compose_rdata(&mut buf, None, None, true).unwrap();
        assert_eq!(buf.as_ref(), b"\x03ns1\x07example\x00");
        assert_eq!(ns.nsdname().to_string(), "NS1.Example.");
    }

    #[test]
    fn relative_names_need_origin() {
        let cname = Cname::new("www".parse().unwrap());
        let mut buf = BytesMut::new();
        assert_eq!(
            cname.compose_rdata(&mut buf, None, None, false),
            Err(ComposeError::NeedAbsoluteName)
        );
        let origin: Name = "example.".parse().unwrap();
        buf.clear();
        cname
            .compose_rdata(&mut buf, None, Some(&origin), false)
            .unwrap();
        assert_eq!(buf.as_ref(), b"\x03www\x07example\x00");
    }

    #[test]
    fn txt() {
        assert_eq!(Txt::new(Vec::<Bytes>::new()), Err(RdataError::Empty));
        assert_eq!(
            Txt::new([vec![b'x'; 256]]),
            Err(RdataError::LongCharStr)
        );
        let txt = Txt::new([&b"hello"[..], &b"world"[..]]).unwrap();
        let buf = compose(&txt);
        assert_eq!(buf.as_ref(), b"\x05hello\x05world");
        assert_eq!(parse_back(Rtype::TXT, &buf), RecordData::Txt(txt.clone()));
        assert_eq!(txt.text(), b"helloworld");
        assert_eq!(txt.to_string(), "\"hello\" \"world\"");
    }

    #[test]
    fn hinfo() {
        let hinfo = Hinfo::new(
            Bytes::from_static(b"PDP-11"),
            Bytes::from_static(b"UNIX"),
        )
        .unwrap();
        let buf = compose(&hinfo);
        assert_eq!(buf.as_ref(), b"\x06PDP-11\x04UNIX");
        assert_eq!(parse_back(Rtype::HINFO, &buf), RecordData::Hinfo(hinfo));
    }
}
