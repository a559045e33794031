//! IANA Definitions for DNS.
//!
//! This module contains types for parameters defined in IANA registries
//! that are relevant for building messages.
//!
//! All types defined hereunder follow the same basic structure. They are
//! newtypes around the raw integer with associated constants for all
//! well-defined values. There are two methods `from_int()` and `to_int()`
//! to convert from and to raw integer values as well as implementations of
//! the `From` trait for these. `FromStr` and `Display` are implemented to
//! convert from the string codes to the values and back.
//!
//! Types also implement a `parse()` function for creation from wire format
//! as well as a `compose()` method for composing into wire format data.
//!
//! While each parameter type has a module of its own, they are all
//! re-exported here. This is mostly so we can have associated types like
//! `FromStrError` without having to resort to devilishly long names.

pub use self::class::Class;
pub use self::opcode::Opcode;
pub use self::opt::OptionCode;
pub use self::rcode::{Rcode, TsigRcode};
pub use self::rtype::Rtype;

#[macro_use]
mod macros;

pub mod class;
pub mod opcode;
pub mod opt;
pub mod rcode;
pub mod rtype;
