//! Basics.
//!
//! This module provides types and traits for working with DNS data and for
//! assembling wire-format DNS messages from it.
//!
//! ## Parsing and Composing Messages
//!
//! We use the term *parsing* for extracting data from a wire-format
//! representation and *composing* for producing such a representation.
//! Both happen on buffers holding a complete DNS message since domain
//! names may be compressed by referencing earlier parts of the message.
//!
//! The [`Renderer`] composes a message section by section, keeping track
//! of the record counts, the name compression table, and the maximum
//! message size. [`Message`] is a read-only view of a finished message
//! that allows looking at its parts again.
//!
//! # Types for DNS Data
//!
//! * [header] for the header of DNS messages,
//! * [name] for domain names and the compression table,
//! * [opt] for EDNS and its OPT record,
//! * [question] and [record] for questions, resource records, and
//!   record sets,
//! * [serial] for RFC 1982 serial numbers,
//! * [set] for the insertion-ordered set backing record sets, and
//! * [frozen] for sharing immutable values.

pub use self::frozen::Frozen;
pub use self::header::{Header, HeaderSection};
pub use self::iana::{Class, OptionCode, Rcode, Rtype, TsigRcode};
pub use self::message::Message;
pub use self::name::{CompressionTable, Name};
pub use self::question::Question;
pub use self::record::{ComposeOptions, Rdataset, Record, Rrset};
pub use self::renderer::{RenderError, Renderer, Section};
pub use self::serial::Serial;
pub use self::set::{OrderedSet, SetAlgebra};

pub mod frozen;
pub mod header;
pub mod iana;
pub mod message;
pub mod name;
pub mod opt;
pub mod question;
pub mod record;
pub mod renderer;
pub mod serial;
pub mod set;
pub mod wire;
