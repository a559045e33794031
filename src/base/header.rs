//! The header of a DNS message.
//!
//! Each DNS message starts with a twelve octet long header section
//! containing some general information related to the message as well as
//! the number of records in each of the four sections that follow the header.
//! Its content and format are defined in section 4.1.1 of [RFC 1035].
//!
//! The header is split into two types: [`Header`] contains the message ID
//! and the flag word while [`HeaderSection`] adds the section counts. The
//! counts are owned by whoever builds the message since changing them
//! invalidates the rest of it.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::iana::{Opcode, Rcode};
use super::wire::{ParseError, Parser};
use bytes::{BufMut, BytesMut};
use core::fmt;

//------------ Header --------------------------------------------------------

/// The first part of the header of a DNS message.
///
/// This type represents the information contained in the first four octets
/// of the header: the message ID, opcode, rcode, and the various flags. It
/// keeps those four octets in wire representation, i.e., in network byte
/// order. The data is layed out like this:
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|Z |AD|CD|   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// The basic structure and most of the fields re defined in [RFC 1035],
/// except for the AD and CD flags, which are defined in [RFC 4035].
///
/// [RFC 1035]: https://tools.ietf.org/html/rfc1035
/// [RFC 4035]: https://tools.ietf.org/html/rfc4035
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Header {
    /// The actual header in its wire format representation.
    ///
    /// This means that the ID field is in big endian.
    inner: [u8; 4],
}

/// # Creation and Conversion
///
impl Header {
    /// The bit of the QR flag in the flag word.
    pub const QR: u16 = 0x8000;

    /// The bit of the AA flag in the flag word.
    pub const AA: u16 = 0x0400;

    /// The bit of the TC flag in the flag word.
    pub const TC: u16 = 0x0200;

    /// The bit of the RD flag in the flag word.
    pub const RD: u16 = 0x0100;

    /// The bit of the RA flag in the flag word.
    pub const RA: u16 = 0x0080;

    /// The bit of the AD flag in the flag word.
    pub const AD: u16 = 0x0020;

    /// The bit of the CD flag in the flag word.
    pub const CD: u16 = 0x0010;

    /// Creates a new header.
    ///
    /// The new header has all fields as either zero or false. Thus, the
    /// opcode will be [`Opcode::QUERY`] and the response code will be
    /// [`Rcode::NOERROR`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a header from the message ID and the complete flag word.
    pub fn from_parts(id: u16, flags: u16) -> Self {
        let mut res = Self::default();
        res.set_id(id);
        res.set_flag_word(flags);
        res
    }

    /// Returns a reference to the underlying octets slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }
}

/// # Field Access
///
impl Header {
    /// Returns the value of the ID field.
    ///
    /// The ID field is an identifier chosen by whoever created a query
    /// and is copied into a response by a server. It allows matching
    /// incoming responses to their queries.
    pub fn id(self) -> u16 {
        u16::from_be_bytes([self.inner[0], self.inner[1]])
    }

    /// Sets the value of the ID field.
    pub fn set_id(&mut self, value: u16) {
        self.inner[..2].copy_from_slice(&value.to_be_bytes())
    }

    /// Sets the value of the ID field to a randomly chosen number.
    #[cfg(feature = "rand")]
    pub fn set_random_id(&mut self) {
        self.set_id(::rand::random())
    }

    /// Returns the second 16 bit word of the header.
    ///
    /// This word contains the opcode, the rcode and all the flags.
    pub fn flag_word(self) -> u16 {
        u16::from_be_bytes([self.inner[2], self.inner[3]])
    }

    /// Sets the second 16 bit word of the header.
    pub fn set_flag_word(&mut self, value: u16) {
        self.inner[2..].copy_from_slice(&value.to_be_bytes())
    }

    /// Returns whether the QR bit is set.
    pub fn qr(self) -> bool {
        self.get_bit(2, 7)
    }

    /// Sets the value of the QR bit.
    pub fn set_qr(&mut self, set: bool) {
        self.set_bit(2, 7, set)
    }

    /// Returns the value of the Opcode field.
    pub fn opcode(self) -> Opcode {
        Opcode::from_int((self.inner[2] >> 3) & 0x0F)
    }

    /// Sets the value of the opcode field.
    pub fn set_opcode(&mut self, opcode: Opcode) {
        self.inner[2] = self.inner[2] & 0x87 | ((opcode.to_int() & 0x0F) << 3);
    }

    /// Returns whether the AA bit is set.
    pub fn aa(self) -> bool {
        self.get_bit(2, 2)
    }

    /// Sets the value of the AA bit.
    pub fn set_aa(&mut self, set: bool) {
        self.set_bit(2, 2, set)
    }

    /// Returns whether the TC bit is set.
    pub fn tc(self) -> bool {
        self.get_bit(2, 1)
    }

    /// Sets the value of the TC bit.
    pub fn set_tc(&mut self, set: bool) {
        self.set_bit(2, 1, set)
    }

    /// Returns whether the RD bit is set.
    pub fn rd(self) -> bool {
        self.get_bit(2, 0)
    }

    /// Sets the value of the RD bit.
    pub fn set_rd(&mut self, set: bool) {
        self.set_bit(2, 0, set)
    }

    /// Returns whether the RA bit is set.
    pub fn ra(self) -> bool {
        self.get_bit(3, 7)
    }

    /// Sets the value of the RA bit.
    pub fn set_ra(&mut self, set: bool) {
        self.set_bit(3, 7, set)
    }

    /// Returns whether the AD bit is set.
    pub fn ad(self) -> bool {
        self.get_bit(3, 5)
    }

    /// Sets the value of the AD bit.
    pub fn set_ad(&mut self, set: bool) {
        self.set_bit(3, 5, set)
    }

    /// Returns whether the CD bit is set.
    pub fn cd(self) -> bool {
        self.get_bit(3, 4)
    }

    /// Sets the value of the CD bit.
    pub fn set_cd(&mut self, set: bool) {
        self.set_bit(3, 4, set)
    }

    /// Returns the value of the RCODE field.
    pub fn rcode(self) -> Rcode {
        Rcode::from_int(self.inner[3] & 0x0F)
    }

    /// Sets the value of the RCODE field.
    pub fn set_rcode(&mut self, rcode: Rcode) {
        self.inner[3] = self.inner[3] & 0xF0 | (rcode.to_int() & 0x0F);
    }

    //--- Internal helpers

    /// Returns the value of the bit at the given position.
    ///
    /// The argument `offset` gives the byte offset of the underlying bytes
    /// slice and `bit` gives the number of the bit with the most significant
    /// bit being 7.
    fn get_bit(self, offset: usize, bit: usize) -> bool {
        self.inner[offset] & (1 << bit) != 0
    }

    /// Sets or resets the given bit.
    fn set_bit(&mut self, offset: usize, bit: usize, set: bool) {
        if set {
            self.inner[offset] |= 1 << bit
        } else {
            self.inner[offset] &= !(1 << bit)
        }
    }
}

//--- Display

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id {} opcode {} rcode {} flags",
            self.id(),
            self.opcode(),
            self.rcode()
        )?;
        for (set, name) in [
            (self.qr(), "QR"),
            (self.aa(), "AA"),
            (self.tc(), "TC"),
            (self.rd(), "RD"),
            (self.ra(), "RA"),
            (self.ad(), "AD"),
            (self.cd(), "CD"),
        ] {
            if set {
                write!(f, " {}", name)?;
            }
        }
        Ok(())
    }
}

//------------ HeaderSection -------------------------------------------------

/// The complete header section of a DNS message.
///
/// Consists of a [`Header`] and the four section counts.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct HeaderSection {
    header: Header,
    counts: [u16; 4],
}

impl HeaderSection {
    /// The length of the header section in octets.
    pub const LEN: usize = 12;

    /// The offset of the ARCOUNT field within a message.
    pub const ARCOUNT_OFFSET: usize = 10;

    /// Creates a new header section from a header and the section counts.
    ///
    /// The counts are given in the order question, answer, authority, and
    /// additional.
    pub fn new(header: Header, counts: [u16; 4]) -> Self {
        HeaderSection { header, counts }
    }

    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns the counts in the order of the sections.
    pub fn counts(&self) -> [u16; 4] {
        self.counts
    }

    /// The number of questions.
    pub fn qdcount(&self) -> u16 {
        self.counts[0]
    }

    /// The number of records in the answer section.
    pub fn ancount(&self) -> u16 {
        self.counts[1]
    }

    /// The number of records in the authority section.
    pub fn nscount(&self) -> u16 {
        self.counts[2]
    }

    /// The number of records in the additional section.
    pub fn arcount(&self) -> u16 {
        self.counts[3]
    }

    /// Returns the twelve octets of the header section.
    pub fn to_octets(&self) -> [u8; 12] {
        let mut res = [0u8; 12];
        res[..4].copy_from_slice(self.header.as_slice());
        for (i, count) in self.counts.iter().enumerate() {
            res[4 + 2 * i..6 + 2 * i].copy_from_slice(&count.to_be_bytes());
        }
        res
    }

    /// Appends the header section to the target.
    pub fn compose(&self, target: &mut BytesMut) {
        target.put_slice(&self.to_octets())
    }

    /// Parses a header section from the beginning of a message.
    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        let mut header = Header::new();
        parser.parse_buf(&mut header.inner)?;
        let mut counts = [0u16; 4];
        for count in counts.iter_mut() {
            *count = parser.parse_u16_be()?;
        }
        Ok(HeaderSection { header, counts })
    }
}

//============ Testing =======================================================
