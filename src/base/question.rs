//! A single question in a DNS message.
//!
//! This module defines the type `Question` which represents an entry in
//! the question section of a DNS message.

use super::iana::{Class, Rtype};
use super::name::{CompressionTable, Name};
use super::wire::{ComposeError, ParseError, Parser};
use core::fmt;
use bytes::BytesMut;

//------------ Question ------------------------------------------------------

/// A question in a DNS message.
///
/// In DNS, a question describes what is requested in a query. It consists
/// of three elements: a domain name, a record type, and a class. This type
/// represents such a question.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Question {
    /// The domain name of the question.
    qname: Name,

    /// The record type of the question.
    qtype: Rtype,

    /// The class of the quesiton.
    qclass: Class,
}

/// # Creation and Conversion
///
impl Question {
    /// Creates a new question from its three componets.
    pub fn new(qname: Name, qtype: Rtype, qclass: Class) -> Self {
        Question {
            qname,
            qtype,
            qclass,
        }
    }

    /// Creates a new question from a name and record type, assuming class IN.
    pub fn new_in(qname: Name, qtype: Rtype) -> Self {
        Self::new(qname, qtype, Class::IN)
    }

    /// Converts the question into the qname.
    pub fn into_qname(self) -> Name {
        self.qname
    }
}

/// # Field Access
///
impl Question {
    /// Returns a reference to the domain nmae in the question,
    pub fn qname(&self) -> &Name {
        &self.qname
    }

    /// Returns the record type of the question.
    pub fn qtype(&self) -> Rtype {
        self.qtype
    }

    /// Returns the class of the question.
    pub fn qclass(&self) -> Class {
        self.qclass
    }
}

/// # Parsing and Composing
///
impl Question {
    /// Parses a question from a message.
    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        Ok(Question::new(
            Name::parse(parser)?,
            Rtype::parse(parser)?,
            Class::parse(parser)?,
        ))
    }

    /// Appends the question to a message being built.
    ///
    /// The name is compressed if a table is given.
    pub fn compose(
        &self,
        target: &mut BytesMut,
        compress: Option<&mut CompressionTable>,
        origin: Option<&Name>,
    ) -> Result<(), ComposeError> {
        self.qname.compose(target, compress, origin, false)?;
        self.qtype.compose(target);
        self.qclass.compose(target);
        Ok(())
    }
}

//--- From

impl From<(Name, Rtype, Class)> for Question {
    fn from((name, rtype, class): (Name, Rtype, Class)) -> Self {
        Question::new(name, rtype, class)
    }
}

impl From<(Name, Rtype)> for Question {
    fn from((name, rtype): (Name, Rtype)) -> Self {
        Question::new_in(name, rtype)
    }
}

//--- Display

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.qname, self.qclass, self.qtype)
    }
}

//============ Testing =======================================================
