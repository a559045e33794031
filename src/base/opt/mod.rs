//! Record data for OPT records.
//!
//! OPT records are meta records used by EDNS to convey additional data
//! about clients, servers, and the query being performed. Because these
//! records are fundamental for modern DNS operations, they are here instead
//! of in the `rdata` module and the types defined for operating on them
//! differ from how other record types are handled.
//!
//! The OPT record reuses the fields of a regular record for its own
//! purposes: the owner is always the root name, the class field carries the
//! UDP payload size of the sender, and the TTL field holds the extended
//! rcode, the EDNS version, and the EDNS flags. [`OptRecord`] provides
//! access to these while [`Opt`] is the record data proper: a sequence of
//! options.
//!
//! Only the [padding] option has a type of its own. All other options are
//! kept as raw data.
//!
//! The OPT record is defined in [RFC 6891].
//!
//! [RFC 6891]: https://tools.ietf.org/html/rfc6891

pub use self::padding::Padding;

pub mod padding;

use super::iana::{Class, OptionCode, Rtype};
use super::name::{CompressionTable, Name};
use super::record::{Record, Rrset};
use super::wire::{ComposeError, ParseError, Parser};
use crate::rdata::{ComposeRecordData, ParseRecordData, RecordData};
use bytes::{BufMut, Bytes, BytesMut};
use core::fmt;

//------------ Opt -----------------------------------------------------------

/// OPT record data.
///
/// This is the record data type for OPT records and consists of a
/// sequence of options.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Opt {
    options: Vec<EdnsOption>,
}

impl Opt {
    pub const RTYPE: Rtype = Rtype::OPT;

    /// Creates OPT record data from a sequence of options.
    pub fn new(options: Vec<EdnsOption>) -> Self {
        Opt { options }
    }

    /// Returns an iterator over the options.
    pub fn iter(&self) -> core::slice::Iter<'_, EdnsOption> {
        self.options.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Returns the length of the record data in octets.
    pub fn compose_len(&self) -> usize {
        self.options.iter().map(EdnsOption::compose_len).sum()
    }

    /// Returns a copy of the data with `option` appended.
    #[must_use]
    pub fn with_option(&self, option: EdnsOption) -> Self {
        let mut options = self.options.clone();
        options.push(option);
        Opt { options }
    }
}

impl ParseRecordData for Opt {
    fn parse_rdata(
        parser: &mut Parser<'_>,
        rdlen: usize,
    ) -> Result<Self, ParseError> {
        let end = parser.pos() + rdlen;
        let mut options = Vec::new();
        while parser.pos() < end {
            options.push(EdnsOption::parse(parser)?);
        }
        Ok(Opt { options })
    }
}

impl ComposeRecordData for Opt {
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
        for option in &self.options {
            option.compose(target)?;
        }
        Ok(())
    }
}

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, option) in self.options.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", option)?;
        }
        Ok(())
    }
}

//------------ EdnsOption ----------------------------------------------------

/// A single option of an OPT record.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum EdnsOption {
    Padding(Padding),
    Unknown(UnknownOptData),
}

impl EdnsOption {
    /// Returns the option code.
    pub fn code(&self) -> OptionCode {
        match *self {
            EdnsOption::Padding(_) => Padding::CODE,
            EdnsOption::Unknown(ref data) => data.code(),
        }
    }

    /// Returns the length of the option data.
    pub fn data_len(&self) -> usize {
        match *self {
            EdnsOption::Padding(padding) => usize::from(padding.len()),
            EdnsOption::Unknown(ref data) => data.data().len(),
        }
    }

    /// Returns the length of the option including its header.
    pub fn compose_len(&self) -> usize {
        4 + self.data_len()
    }

    /// Parses an option including its code and length.
    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        let code = OptionCode::parse(parser)?;
        let len = parser.parse_u16_be()?;
        if code == Padding::CODE {
            Padding::parse(parser, len).map(EdnsOption::Padding)
        } else {
            let data = parser.parse_octets(usize::from(len))?;
            Ok(EdnsOption::Unknown(UnknownOptData {
                code,
                data: Bytes::copy_from_slice(data),
            }))
        }
    }

    /// Appends the option including its code and length.
    pub fn compose(&self, target: &mut BytesMut) -> Result<(), ComposeError> {
        let len = u16::try_from(self.data_len())
            .map_err(|_| ComposeError::LongData)?;
        self.code().compose(target);
        target.put_u16(len);
        match *self {
            EdnsOption::Padding(padding) => padding.compose_data(target),
            EdnsOption::Unknown(ref data) => target.put_slice(data.data()),
        }
        Ok(())
    }
}

impl From<Padding> for EdnsOption {
    fn from(padding: Padding) -> Self {
        EdnsOption::Padding(padding)
    }
}

impl From<UnknownOptData> for EdnsOption {
    fn from(data: UnknownOptData) -> Self {
        EdnsOption::Unknown(data)
    }
}

impl fmt::Display for EdnsOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            EdnsOption::Padding(ref padding) => {
                fmt::Display::fmt(padding, f)
            }
            EdnsOption::Unknown(ref data) => fmt::Display::fmt(data, f),
        }
    }
}

//------------ UnknownOptData ------------------------------------------------

/// Data for an option without a dedicated type.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct UnknownOptData {
    code: OptionCode,
    data: Bytes,
}

impl UnknownOptData {
    /// Creates option data from the code and raw data.
    ///
    /// Returns an error if the data is longer than 65535 octets.
    pub fn new(code: OptionCode, data: Bytes) -> Result<Self, ComposeError> {
        if data.len() > 0xFFFF {
            return Err(ComposeError::LongData);
        }
        Ok(UnknownOptData { code, data })
    }

    pub fn code(&self) -> OptionCode {
        self.code
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

impl fmt::Display for UnknownOptData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ", self.code)?;
        for ch in self.data.iter() {
            write!(f, "{:02x}", ch)?;
        }
        Ok(())
    }
}

//------------ OptRecord -----------------------------------------------------

/// An entire OPT record.
///
/// Because the OPT record uses the class and TTL fields of a record for
/// its own purposes, this type keeps them under their real meaning.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct OptRecord {
    /// The UDP payload size, transported in the class field.
    udp_payload_size: u16,

    /// Extended rcode, version, and flags, transported in the TTL field.
    flags: u32,

    /// The record data.
    opt: Opt,
}

impl OptRecord {
    /// The length of an OPT record without any options.
    ///
    /// This is a root owner name, type, class, TTL, and record data length.
    pub const BASE_LEN: usize = 11;

    /// The length of the header of a padding option.
    pub const PADDING_HEADER_LEN: usize = 4;

    /// The bit of the DO flag in the flags word.
    pub const DNSSEC_OK: u32 = 0x8000;

    /// Creates a new OPT record.
    pub fn new(udp_payload_size: u16, flags: u32, opt: Opt) -> Self {
        OptRecord {
            udp_payload_size,
            flags,
            opt,
        }
    }

    /// Creates an OPT record for the given EDNS version.
    ///
    /// Whatever version is present in `flags` is replaced by `version`.
    pub fn for_version(
        version: u8,
        flags: u32,
        udp_payload_size: u16,
        options: Vec<EdnsOption>,
    ) -> Self {
        let flags = (flags & 0xFF00_FFFF) | (u32::from(version) << 16);
        Self::new(udp_payload_size, flags, Opt::new(options))
    }

    /// Creates the OPT record from a regular record.
    ///
    /// Returns `None` if the record isn’t an OPT record.
    pub fn from_record(record: &Record) -> Option<Self> {
        match *record.data() {
            RecordData::Opt(ref opt) => Some(OptRecord {
                udp_payload_size: record.class().to_int(),
                flags: record.ttl(),
                opt: opt.clone(),
            }),
            _ => None,
        }
    }

    /// Returns the UDP payload size.
    ///
    /// This value refers to the abilities of the sender’s DNS implementation,
    /// such as buffer sizes.
    pub fn udp_payload_size(&self) -> u16 {
        self.udp_payload_size
    }

    /// Returns the complete flags word, i.e., the TTL field.
    pub fn flags(&self) -> u32 {
        self.flags
    }

    /// Returns the upper eight bits of the extended rcode.
    pub fn extended_rcode(&self) -> u8 {
        (self.flags >> 24) as u8
    }

    /// Returns the EDNS version of the OPT header.
    ///
    /// Only EDNS version 0 is currently defined.
    pub fn version(&self) -> u8 {
        (self.flags >> 16) as u8
    }

    /// Returns the value of the DNSSEC OK (DO) bit.
    pub fn dnssec_ok(&self) -> bool {
        self.flags & Self::DNSSEC_OK != 0
    }

    pub fn opt(&self) -> &Opt {
        &self.opt
    }

    /// Returns the length of the composed record.
    pub fn compose_len(&self) -> usize {
        Self::BASE_LEN + self.opt.compose_len()
    }

    /// Returns the length the record will have once padding is added.
    ///
    /// This includes the header of the padding option but not the padding
    /// itself. It is the value to use as the OPT size when padding.
    pub fn padded_compose_len(&self) -> usize {
        self.compose_len() + Self::PADDING_HEADER_LEN
    }

    /// Returns a copy of the record with `option` added.
    #[must_use]
    pub fn with_option(&self, option: EdnsOption) -> Self {
        OptRecord {
            opt: self.opt.with_option(option),
            ..self.clone()
        }
    }

    /// Converts the record into a record set ready to be composed.
    pub fn to_rrset(&self) -> Rrset {
        Rrset::from_rdata(
            Name::root(),
            Class::from_int(self.udp_payload_size),
            self.flags,
            self.opt.clone().into(),
        )
    }
}

impl fmt::Display for OptRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "EDNS version {} payload {} flags {:#x}",
            self.version(),
            self.udp_payload_size,
            self.flags & 0xFFFF
        )?;
        if !self.opt.is_empty() {
            write!(f, " {}", self.opt)?;
        }
        Ok(())
    }
}

//============ Testing =======================================================
