//! Accessing existing DNS messages.
//!
//! This module defines the [`Message`] type, a read-only view of a
//! complete wire-format message. It is mostly useful for looking at the
//! result of rendering and for checking transaction signatures of received
//! messages.

use super::header::{Header, HeaderSection};
use super::name::Name;
use super::opt::OptRecord;
use super::question::Question;
use super::record::Record;
use super::renderer::Section;
use super::wire::{ParseError, Parser};
use crate::rdata::{RecordData, Tsig};
use bytes::Bytes;

//------------ Message -------------------------------------------------------

/// A DNS message.
///
/// The message is parsed completely when created. The wire data is kept so
/// the message can be looked at as a whole again, e.g., for validating a
/// TSIG signature.
#[derive(Clone, Debug)]
pub struct Message {
    /// The wire data of the message.
    octets: Bytes,

    /// The header section.
    header: HeaderSection,

    /// The question section.
    question: Vec<Question>,

    /// The answer, authority, and additional sections.
    records: [Vec<Record>; 3],

    /// Where the TSIG record starts if the message has one.
    tsig_start: Option<usize>,
}

impl Message {
    /// Parses a message from its wire data.
    ///
    /// A TSIG record anywhere but at the end of the additional section and
    /// data following the last record are rejected.
    pub fn from_octets(octets: Bytes) -> Result<Self, ParseError> {
        let mut parser = Parser::from_ref(octets.as_ref());
        let header = HeaderSection::parse(&mut parser)?;
        let counts = header.counts();
        let mut question = Vec::new();
        for _ in 0..counts[0] {
            question.push(Question::parse(&mut parser)?);
        }
        let mut records: [Vec<Record>; 3] = Default::default();
        let mut tsig_start = None;
        for (i, section) in records.iter_mut().enumerate() {
            for _ in 0..counts[i + 1] {
                if tsig_start.is_some() {
                    return Err(ParseError::form_error("TSIG not last"));
                }
                let start = parser.pos();
                let record = Record::parse(&mut parser)?;
                if let RecordData::Tsig(_) = *record.data() {
                    if i != 2 {
                        return Err(ParseError::form_error(
                            "TSIG outside additional section",
                        ));
                    }
                    tsig_start = Some(start);
                }
                section.push(record);
            }
        }
        if parser.remaining() > 0 {
            return Err(ParseError::form_error("trailing data"));
        }
        Ok(Message {
            header,
            question,
            records,
            tsig_start,
            octets,
        })
    }

    /// Returns the wire data of the message.
    pub fn as_slice(&self) -> &[u8] {
        self.octets.as_ref()
    }

    pub fn into_octets(self) -> Bytes {
        self.octets
    }

    /// Returns the message header.
    pub fn header(&self) -> Header {
        self.header.header()
    }

    /// Returns the complete header section including the counts.
    pub fn header_section(&self) -> HeaderSection {
        self.header
    }

    /// Returns the questions.
    pub fn question(&self) -> &[Question] {
        &self.question
    }

    /// Returns the records of the answer section.
    pub fn answer(&self) -> &[Record] {
        &self.records[0]
    }

    /// Returns the records of the authority section.
    pub fn authority(&self) -> &[Record] {
        &self.records[1]
    }

    /// Returns the records of the additional section.
    pub fn additional(&self) -> &[Record] {
        &self.records[2]
    }

    /// Returns the number of entries in the given section.
    pub fn section_len(&self, section: Section) -> usize {
        match section {
            Section::Question => self.question.len(),
            Section::Answer => self.records[0].len(),
            Section::Authority => self.records[1].len(),
            Section::Additional => self.records[2].len(),
        }
    }

    /// Returns the OPT record if there is one.
    pub fn opt(&self) -> Option<OptRecord> {
        self.additional().iter().find_map(OptRecord::from_record)
    }

    /// Returns the TSIG record if there is one.
    ///
    /// Returns the owner name, which is the key name, the record data, and
    /// the position in the message where the record starts.
    pub fn tsig(&self) -> Option<(&Name, &Tsig, usize)> {
        let start = self.tsig_start?;
        let record = self.additional().last()?;
        match *record.data() {
            RecordData::Tsig(ref tsig) => Some((record.owner(), tsig, start)),
            _ => None,
        }
    }
}

//============ Testing =======================================================
