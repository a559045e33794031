//! EDNS option for padding message sizes.
//!
//! The option in this module, [`Padding`], allows to increase the size of
//! a DNS message to any desired value. This can be helpful with
//! confidentiality.
//!
//! The option is defined in [RFC 7830](https://tools.ietf.org/html/rfc7830).

use crate::base::iana::OptionCode;
use crate::base::wire::{ParseError, Parser};
use bytes::{BufMut, BytesMut};
use core::fmt;

//------------ Padding -------------------------------------------------------

/// Option data for the padding option.
///
/// The padding consists of a number of zero octets. Only that number is
/// kept. Padding received from elsewhere is accepted regardless of its
/// content since it carries no meaning for the receiver.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Padding {
    len: u16,
}

impl Padding {
    pub const CODE: OptionCode = OptionCode::PADDING;

    /// Creates padding of `len` zero octets.
    pub fn new(len: u16) -> Self {
        Padding { len }
    }

    /// Returns the number of padding octets.
    pub fn len(self) -> u16 {
        self.len
    }

    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Parses the option data of `len` octets.
    pub fn parse(parser: &mut Parser<'_>, len: u16) -> Result<Self, ParseError> {
        parser.advance(usize::from(len))?;
        Ok(Padding { len })
    }

    /// Appends the option data, i.e., the zero octets.
    pub fn compose_data(self, target: &mut BytesMut) {
        target.put_bytes(0, usize::from(self.len))
    }
}

//--- Display

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", Self::CODE, self.len)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zeros() {
        let mut buf = BytesMut::new();
        Padding::new(5).compose_data(&mut buf);
        assert_eq!(buf.as_ref(), b"\0\0\0\0\0");
        let mut parser = Parser::from_ref(b"\x01\x02\x03");
        assert_eq!(Padding::parse(&mut parser, 3).unwrap().len(), 3);
        assert_eq!(parser.remaining(), 0);
        assert_eq!(Padding::new(3).to_string(), "Padding 3");
    }
}
