//! Record data from [RFC 8945]: TSIG records.
//!
//! This RFC defines the TSIG record type used for signing DNS messages.
//!
//! [RFC 8945]: https://tools.ietf.org/html/rfc8945

use super::{ComposeRecordData, ParseRecordData};
use crate::base::iana::{Rtype, TsigRcode};
use crate::base::name::{CompressionTable, Name};
use crate::base::wire::{ComposeError, ParseError, Parser};
use bytes::{BufMut, Bytes, BytesMut};
use core::fmt;

//------------ Tsig ----------------------------------------------------------

/// TSIG record data.
///
/// The TSIG record is a pseudo-record that carries a transaction signature
/// for the message it is the last record of. Its owner name is the name of
/// the key used.
///
/// A value is created complete by [`new`][Self::new] or
/// [`parse`][Self::parse]. The signing process derives new values with a
/// different time or MAC through [`with_time_signed`][Self::with_time_signed]
/// and [`with_mac`][Self::with_mac].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Tsig {
    /// The signature algorithm as a domain name.
    algorithm: Name,

    /// The Unix epoch time at which the signature was created.
    time_signed: Time48,

    /// Seconds of error permitted in time signed.
    fudge: u16,

    /// MAC.
    mac: Bytes,

    /// Original message ID.
    original_id: u16,

    /// TSIG response code.
    error: TsigRcode,

    /// Other.
    other: Bytes,
}

impl Tsig {
    pub const RTYPE: Rtype = Rtype::TSIG;

    /// Creates new TSIG record data from its components.
    ///
    /// The MAC and other data must not be longer than 65535 octets each.
    pub fn new(
        algorithm: Name,
        time_signed: Time48,
        fudge: u16,
        mac: Bytes,
        original_id: u16,
        error: TsigRcode,
        other: Bytes,
    ) -> Result<Self, ComposeError> {
        if mac.len() > 0xFFFF || other.len() > 0xFFFF {
            return Err(ComposeError::LongData);
        }
        Ok(Tsig {
            algorithm,
            time_signed,
            fudge,
            mac,
            original_id,
            error,
            other,
        })
    }

    /// Returns a reference to the algorithm name.
    pub fn algorithm(&self) -> &Name {
        &self.algorithm
    }

    /// Returns the Unix time when the signature was created.
    pub fn time_signed(&self) -> Time48 {
        self.time_signed
    }

    /// Return the number of seconds of offset from signing time permitted.
    pub fn fudge(&self) -> u16 {
        self.fudge
    }

    /// Returns a reference to the bytes value containing the MAC.
    pub fn mac(&self) -> &Bytes {
        &self.mac
    }

    /// Returns the original message ID.
    ///
    /// Since the message ID is part of the signature generation but may be
    /// changed for a forwarded message, it is included in the TSIG record.
    pub fn original_id(&self) -> u16 {
        self.original_id
    }

    /// Returns the TSIG error.
    pub fn error(&self) -> TsigRcode {
        self.error
    }

    /// Returns a reference to the other bytes.
    ///
    /// This field is only used for BADTIME errors to return the server
    /// time. Otherwise it is empty.
    pub fn other(&self) -> &Bytes {
        &self.other
    }

    /// Returns whether the record is within the permitted time window.
    pub fn is_valid_at(&self, now: Time48) -> bool {
        now.eq_fudged(self.time_signed, self.fudge.into())
    }

    /// Returns a copy with a different signing time.
    #[must_use]
    pub fn with_time_signed(&self, time_signed: Time48) -> Self {
        Tsig {
            time_signed,
            ..self.clone()
        }
    }

    /// Returns a copy with a different MAC.
    pub fn with_mac(&self, mac: Bytes) -> Result<Self, ComposeError> {
        if mac.len() > 0xFFFF {
            return Err(ComposeError::LongData);
        }
        Ok(Tsig { mac, ..self.clone() })
    }

    /// Parses the record data.
    ///
    /// The algorithm name may be compressed.
    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        let algorithm = Name::parse(parser)?;
        let time_signed = Time48::parse(parser)?;
        let fudge = parser.parse_u16_be()?;
        let mac_size = parser.parse_u16_be()?;
        let mac = Bytes::copy_from_slice(
            parser.parse_octets(usize::from(mac_size))?,
        );
        let original_id = parser.parse_u16_be()?;
        let error = TsigRcode::parse(parser)?;
        let other_len = parser.parse_u16_be()?;
        let other = Bytes::copy_from_slice(
            parser.parse_octets(usize::from(other_len))?,
        );
        Ok(Tsig {
            algorithm,
            time_signed,
            fudge,
            mac,
            original_id,
            error,
            other,
        })
    }
}

impl ParseRecordData for Tsig {
    fn parse_rdata(
        parser: &mut Parser<'_>,
        _rdlen: usize,
    ) -> Result<Self, ParseError> {
        Self::parse(parser)
    }
}

impl ComposeRecordData for Tsig {
    fn rtype(&self) -> Rtype {
        Self::RTYPE
    }

    /// Composes the record data.
    ///
    /// The algorithm name is never compressed or canonicalized.
    fn compose_rdata(
        &self,
        target: &mut BytesMut,
        _compress: Option<&mut CompressionTable>,
        origin: Option<&Name>,
        _canonical: bool,
    ) -> Result<(), ComposeError> {
        self.algorithm.compose(target, None, origin, false)?;
        self.time_signed.compose(target);
        target.put_u16(self.fudge);
        target.put_u16(self.mac.len() as u16);
        target.put_slice(&self.mac);
        target.put_u16(self.original_id);
        self.error.compose(target);
        target.put_u16(self.other.len() as u16);
        target.put_slice(&self.other);
        Ok(())
    }
}

//--- Display

impl fmt::Display for Tsig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;

        write!(
            f,
            "{} {} {} {} {} {} {} {}",
            self.algorithm,
            self.time_signed,
            self.fudge,
            self.mac.len(),
            STANDARD.encode(&self.mac),
            self.original_id,
            self.error,
            self.other.len(),
        )?;
        if !self.other.is_empty() {
            write!(f, " {}", STANDARD.encode(&self.other))?;
        }
        Ok(())
    }
}

//------------ Time48 --------------------------------------------------------

/// A 48-bit Unix timestamp.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time48(u64);

impl Time48 {
    /// The largest value this type can hold.
    pub const MAX: u64 = 0xFFFF_FFFF_FFFF;

    /// Returns the timestamp of the current moment.
    ///
    /// A clock set to before the Unix epoch results in a value of 0.
    pub fn now() -> Time48 {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        Self::from_u64(u64::try_from(now).unwrap_or(0))
    }

    /// Creates a value from a 64 bit integer.
    ///
    /// Only the lower 48 bits of the argument are used.
    pub fn from_u64(value: u64) -> Self {
        Time48(value & Self::MAX)
    }

    /// Converts a value into its wire format.
    ///
    /// Returns the octets of the encoded value in network byte order.
    pub fn into_octets(self) -> [u8; 6] {
        let mut res = [0u8; 6];
        res.copy_from_slice(&self.0.to_be_bytes()[2..]);
        res
    }

    /// Returns whether the time is within a given period.
    ///
    /// Returns `true` iff `other` is at most `fudge` seconds before or after
    /// this value’s time.
    pub fn eq_fudged(self, other: Self, fudge: u64) -> bool {
        self.0.saturating_sub(fudge) <= other.0
            && self.0.saturating_add(fudge) >= other.0
    }

    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        let mut buf = [0u8; 8];
        parser.parse_buf(&mut buf[2..])?;
        Ok(Time48(u64::from_be_bytes(buf)))
    }

    pub fn compose(&self, target: &mut BytesMut) {
        target.put_slice(&self.into_octets())
    }
}

//--- From

impl From<Time48> for u64 {
    fn from(value: Time48) -> u64 {
        value.0
    }
}

//--- Display

impl fmt::Display for Time48 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    fn tsig() -> Tsig {
        Tsig::new(
            "hmac-sha256.".parse().unwrap(),
            Time48::from_u64(0x0102_0304_0506),
            300,
            Bytes::from_static(b"mac!"),
            0x1234,
            TsigRcode::NOERROR,
            Bytes::new(),
        )
        .unwrap()
    }

    #[test]
    fn time48() {
        assert_eq!(
            Time48::from_u64(0x0102_0304_0506).into_octets(),
            [1, 2, 3, 4, 5, 6]
        );
        assert_eq!(u64::from(Time48::from_u64(0xFF00_0000_0000_0001)), 1);
        let t = Time48::from_u64(1000);
        assert!(t.eq_fudged(Time48::from_u64(1300), 300));
        assert!(t.eq_fudged(Time48::from_u64(700), 300));
        assert!(!t.eq_fudged(Time48::from_u64(1301), 300));
        assert!(Time48::from_u64(10).eq_fudged(Time48::from_u64(0), 300));
        assert!(Time48::now() > Time48::from_u64(1_600_000_000));
    }

    #[test]
    fn compose_parse() {
        let tsig = tsig();
        let mut buf = BytesMut::new();
        let mut table = CompressionTable::new();
        tsig.compose_rdata(&mut buf, Some(&mut table), None, false)
            .unwrap();
        assert!(table.is_empty());
        assert_eq!(
            buf.as_ref(),
            b"\x0bhmac-sha256\x00\x01\x02\x03\x04\x05\x06\x01\x2c\
              \x00\x04mac!\x12\x34\x00\x00\x00\x00"
        );
        let mut parser = Parser::from_ref(buf.as_ref());
        assert_eq!(Tsig::parse(&mut parser).unwrap(), tsig);
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn derived_values() {
        let tsig = tsig();
        let later = tsig.with_time_signed(Time48::from_u64(5));
        assert_eq!(later.time_signed(), Time48::from_u64(5));
        assert_eq!(tsig.time_signed(), Time48::from_u64(0x0102_0304_0506));
        let signed = tsig.with_mac(Bytes::from_static(b"other")).unwrap();
        assert_eq!(signed.mac().as_ref(), b"other");
        assert_eq!(tsig.mac().as_ref(), b"mac!");
        assert!(tsig.is_valid_at(Time48::from_u64(0x0102_0304_0506 + 300)));
        assert!(!tsig.is_valid_at(Time48::from_u64(0x0102_0304_0506 + 301)));
    }

    #[test]
    fn display() {
        assert_eq!(
            tsig().to_string(),
            "hmac-sha256. 1108152157446 300 4 bWFjIQ== 4660 NOERROR(0) 0"
        );
    }
}
