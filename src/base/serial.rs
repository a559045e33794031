//! Serial numbers.
//!
//! DNS uses serial numbers in various places that are conceptionally viewed
//! as the modulus of a larger number space. Because of that, special rules
//! apply when processing these values. This module provides the type
//! [`Serial`] that implements these rules for any width between 1 and 64
//! bits.

use super::wire::{ComposeError, ParseError, Parser};
use bytes::{BufMut, BytesMut};
use core::cmp::Ordering;
use core::{cmp, fmt, str};

//------------ Serial --------------------------------------------------------

/// A serial number.
///
/// Serial numbers are used in DNS to track changes to resources. For
/// instance, the [`Soa`][crate::rdata::rfc1035::Soa] record type provides
/// a serial number that expresses the version of the zone. Since these
/// numbers are of limited width, they can wrap. [RFC 1982] defined the
/// semantics for doing arithmetics in the face of these wrap-arounds.
///
/// The RFC defines two operations: addition and comparison.
///
/// For addition, the amount added can only be up to `2^(bits - 1) - 1` in
/// either direction. Because of this, we decided to not implement the
/// `Add` trait but rather have dedicated methods [`add`][Self::add] and
/// [`sub`][Self::sub] that return an error instead of causing surprise
/// panics.
///
/// Serial numbers only implement a partial ordering. That is, there are
/// pairs of values that are not equal but there still isn’t one value
/// larger than the other. Since this is neatly implemented by the
/// `PartialOrd` trait, the type implements that. Note that the ordering
/// isn’t transitive either: three values spaced a third of the number space
/// apart are each less than the next one.
///
/// Serial numbers of different widths are never comparable and never equal.
///
/// Only 32 bit serial numbers, as used in the SOA record, have a wire
/// format. Composing a serial number of any other width fails rather than
/// writing some of its bits.
///
/// [RFC 1982]: https://tools.ietf.org/html/rfc1982
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SerialRepr", into = "SerialRepr")
)]
pub struct Serial {
    value: u64,
    bits: u8,
}

impl Serial {
    /// The width of serial numbers used in SOA records.
    pub const DEFAULT_BITS: u8 = 32;

    /// Creates a serial number of the given width.
    ///
    /// The value is reduced modulo `2^bits`.
    pub fn new(value: u64, bits: u8) -> Result<Self, SerialError> {
        if bits == 0 || bits > 64 {
            return Err(SerialError::BadWidth(bits));
        }
        Ok(Serial {
            value: value & Self::mask(bits),
            bits,
        })
    }

    /// Returns a 32 bit serial number for the current Unix time.
    pub fn now() -> Self {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        // Truncation is the wrap-around the serial space expects.
        Serial::from(now as u32)
    }

    /// Returns a serial number of the same width with a different value.
    #[must_use]
    pub fn with_value(self, value: u64) -> Self {
        Serial {
            value: value & Self::mask(self.bits),
            bits: self.bits,
        }
    }

    /// Returns the serial number as a raw integer.
    pub fn into_int(self) -> u64 {
        self.value
    }

    /// Returns the width of the serial number in bits.
    pub fn bits(self) -> u8 {
        self.bits
    }

    fn mask(bits: u8) -> u64 {
        u64::MAX >> (64 - u32::from(bits))
    }

    fn modulus(self) -> i128 {
        1i128 << self.bits
    }

    /// The largest delta allowed for addition and subtraction.
    fn max_delta(self) -> i128 {
        (self.modulus() >> 1) - 1
    }

    /// Compares two serial numbers.
    ///
    /// Returns an error if the two numbers have different widths. Otherwise
    /// returns `None` if the two numbers are exactly half the number space
    /// apart and therefore neither is larger than the other.
    pub fn try_cmp(
        self,
        other: Serial,
    ) -> Result<Option<Ordering>, SerialError> {
        if self.bits != other.bits {
            return Err(SerialError::NotComparable);
        }
        if self.value == other.value {
            return Ok(Some(Ordering::Equal));
        }
        let modulus = self.modulus();
        let half = modulus >> 1;
        let forward = (i128::from(other.value) - i128::from(self.value))
            .rem_euclid(modulus);
        Ok(match forward.cmp(&half) {
            Ordering::Less => Some(Ordering::Less),
            Ordering::Greater => Some(Ordering::Greater),
            Ordering::Equal => None,
        })
    }

    /// Adds `delta` to `self`.
    ///
    /// Only values of up to `2^(bits - 1) - 1` can be added. Larger values
    /// result in an error rather than a wrap-around. Negative values are
    /// subtracted.
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, delta: i64) -> Result<Self, SerialError> {
        let delta = i128::from(delta);
        if delta.abs() > self.max_delta() {
            return Err(SerialError::DeltaOutOfRange);
        }
        let value =
            (i128::from(self.value) + delta).rem_euclid(self.modulus());
        Ok(self.with_value(value as u64))
    }

    /// Subtracts `delta` from `self`.
    ///
    /// The same limits as for [`add`][Self::add] apply.
    #[allow(clippy::should_implement_trait)]
    pub fn sub(self, delta: i64) -> Result<Self, SerialError> {
        let delta = i128::from(delta);
        if delta.abs() > self.max_delta() {
            return Err(SerialError::DeltaOutOfRange);
        }
        let value =
            (i128::from(self.value) - delta).rem_euclid(self.modulus());
        Ok(self.with_value(value as u64))
    }

    pub const COMPOSE_LEN: usize = 4;

    /// Parses a 32 bit serial number.
    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        Ok(parser.parse_u32_be()?.into())
    }

    /// Appends a 32 bit serial number.
    pub fn compose(&self, target: &mut BytesMut) -> Result<(), ComposeError> {
        if self.bits != Self::DEFAULT_BITS {
            return Err(ComposeError::SerialWidth);
        }
        target.put_u32(self.value as u32);
        Ok(())
    }
}

//--- From and FromStr

impl From<u32> for Serial {
    fn from(value: u32) -> Serial {
        Serial {
            value: value.into(),
            bits: Self::DEFAULT_BITS,
        }
    }
}

impl str::FromStr for Serial {
    type Err = core::num::ParseIntError;

    /// Parses a 32 bit serial number from its decimal value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u32::from_str(s).map(Into::into)
    }
}

//--- Display

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

//--- PartialOrd

impl cmp::PartialOrd for Serial {
    fn partial_cmp(&self, other: &Serial) -> Option<cmp::Ordering> {
        self.try_cmp(*other).ok().flatten()
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
#[derive(Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename = "Serial")]
struct SerialRepr {
    value: u64,
    bits: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<SerialRepr> for Serial {
    type Error = SerialError;

    fn try_from(repr: SerialRepr) -> Result<Self, Self::Error> {
        Serial::new(repr.value, repr.bits)
    }
}

#[cfg(feature = "serde")]
impl From<Serial> for SerialRepr {
    fn from(serial: Serial) -> Self {
        SerialRepr {
            value: serial.value,
            bits: serial.bits,
        }
    }
}

//------------ SerialError ---------------------------------------------------

/// An operation on serial numbers failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SerialError {
    /// Serial numbers of different widths were compared.
    NotComparable,

    /// The amount to add or subtract was too large.
    DeltaOutOfRange,

    /// The width was not between 1 and 64 bits.
    BadWidth(u8),
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SerialError::NotComparable => {
                f.write_str("serial numbers of different widths")
            }
            SerialError::DeltaOutOfRange => {
                f.write_str("serial number delta out of range")
            }
            SerialError::BadWidth(bits) => {
                write!(f, "invalid serial number width {}", bits)
            }
        }
    }
}

impl std::error::Error for SerialError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::cmp::Ordering::*;
    use rstest::rstest;

    fn s(value: u64, bits: u8) -> Serial {
        Serial::new(value, bits).unwrap()
    }

    #[test]
    fn construction() {
        assert_eq!(s(0x1_0000_0005, 32), Serial::from(5));
        assert_eq!(s(300, 8).into_int(), 44);
        assert_eq!(s(u64::MAX, 64).into_int(), u64::MAX);
        assert_eq!(Serial::new(1, 0), Err(SerialError::BadWidth(0)));
        assert_eq!(Serial::new(1, 65), Err(SerialError::BadWidth(65)));
        assert_eq!(Serial::from(7).with_value(0x1_0000_0001).into_int(), 1);
    }

    #[rstest]
    #[case(10, 20, Some(Less))]
    #[case(20, 10, Some(Greater))]
    #[case(12, 12, Some(Equal))]
    #[case(0, 0x7FFF_FFFF, Some(Less))]
    #[case(0, 0x8000_0000, None)]
    #[case(0, 0x8000_0001, Some(Greater))]
    #[case(0x8000_0000, 0, None)]
    #[case(0x7FFF_FFFF, 0x8000_0000, Some(Less))]
    #[case(0xFFFF_FFFF, 0, Some(Less))]
    #[case(12, 3_000_000_012, Some(Greater))]
    #[case(3_000_000_012, 12, Some(Less))]
    #[case(1, 0x8000_0001, None)]
    fn compare_32(
        #[case] left: u32,
        #[case] right: u32,
        #[case] expected: Option<Ordering>,
    ) {
        let (left, right) = (Serial::from(left), Serial::from(right));
        assert_eq!(left.partial_cmp(&right), expected);
        assert_eq!(left.try_cmp(right), Ok(expected));
    }

    #[rstest]
    #[case(8)]
    #[case(16)]
    #[case(32)]
    #[case(64)]
    fn half_space_boundaries(#[case] bits: u8) {
        let half = 1u64 << (bits - 1);
        let zero = s(0, bits);
        assert!(zero < s(half - 1, bits));
        assert!(!(zero < s(half, bits)));
        assert!(!(zero > s(half, bits)));
        assert!(zero > s(half + 1, bits));
        assert!(s(half - 1, bits) < s(half, bits));
    }

    #[test]
    fn not_transitive() {
        let third = 0x5555_5555;
        let a = Serial::from(0);
        let b = Serial::from(third);
        let c = Serial::from(2 * third);
        assert!(a < b);
        assert!(b < c);
        assert!(c < a);
    }

    #[test]
    fn different_widths() {
        assert_eq!(
            s(5, 8).try_cmp(Serial::from(5)),
            Err(SerialError::NotComparable)
        );
        assert_eq!(s(5, 8).partial_cmp(&Serial::from(5)), None);
        assert_ne!(s(5, 8), Serial::from(5));
    }

    #[test]
    fn addition() {
        assert_eq!(Serial::from(0).add(4), Ok(Serial::from(4)));
        assert_eq!(
            Serial::from(0xFF00_0000).add(0x0F00_0000),
            Ok(Serial::from(0x0E00_0000))
        );
        assert_eq!(Serial::from(0).add(-1), Ok(Serial::from(0xFFFF_FFFF)));
        assert_eq!(
            Serial::from(0).add(0x7FFF_FFFF),
            Ok(Serial::from(0x7FFF_FFFF))
        );
        assert_eq!(
            Serial::from(0).add(0x8000_0000),
            Err(SerialError::DeltaOutOfRange)
        );
        assert_eq!(
            Serial::from(0).add(-0x8000_0000),
            Err(SerialError::DeltaOutOfRange)
        );
        assert_eq!(s(250, 8).add(10), Ok(s(4, 8)));
        assert_eq!(s(250, 8).add(128), Err(SerialError::DeltaOutOfRange));
        assert_eq!(s(0, 1).add(1), Err(SerialError::DeltaOutOfRange));
        assert_eq!(s(0, 1).add(0), Ok(s(0, 1)));
    }

    #[test]
    fn subtraction() {
        assert_eq!(Serial::from(4).sub(4), Ok(Serial::from(0)));
        assert_eq!(Serial::from(0).sub(1), Ok(Serial::from(0xFFFF_FFFF)));
        assert_eq!(Serial::from(0).sub(-1), Ok(Serial::from(1)));
        assert_eq!(s(0, 64).sub(1), Ok(s(u64::MAX, 64)));
        assert_eq!(
            s(0, 64).sub(i64::MIN),
            Err(SerialError::DeltaOutOfRange)
        );
        assert_eq!(s(0, 64).sub(i64::MAX), Ok(s(1u64 << 63 | 1, 64)));
    }

    #[test]
    fn wire_and_text() {
        let mut buf = BytesMut::new();
        Serial::from(0x0102_0304).compose(&mut buf).unwrap();
        assert_eq!(buf.as_ref(), b"\x01\x02\x03\x04");
        let mut parser = Parser::from_ref(buf.as_ref());
        assert_eq!(Serial::parse(&mut parser), Ok(Serial::from(0x0102_0304)));
        assert_eq!(
            "2024010101".parse::<Serial>().unwrap().to_string(),
            "2024010101"
        );
        assert!("4294967296".parse::<Serial>().is_err());
    }

    #[test]
    fn only_32_bit_has_wire_format() {
        let mut buf = BytesMut::new();
        assert_eq!(
            s(0x0102, 16).compose(&mut buf),
            Err(ComposeError::SerialWidth)
        );
        assert_eq!(
            s(0x0102_0304, 64).compose(&mut buf),
            Err(ComposeError::SerialWidth)
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn now_is_32_bit() {
        assert_eq!(Serial::now().bits(), 32);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ser_de() {
        use serde_test::{assert_de_tokens_error, assert_tokens, Token};

        assert_tokens(
            &Serial::from(12),
            &[
                Token::Struct { name: "Serial", len: 2 },
                Token::Str("value"),
                Token::U64(12),
                Token::Str("bits"),
                Token::U8(32),
                Token::StructEnd,
            ],
        );
        assert_de_tokens_error::<Serial>(
            &[
                Token::Struct { name: "Serial", len: 2 },
                Token::Str("value"),
                Token::U64(12),
                Token::Str("bits"),
                Token::U8(80),
                Token::StructEnd,
            ],
            "invalid serial number width 80",
        );
    }
}
