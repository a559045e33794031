//! Creating and consuming data in wire format.

use bytes::{BufMut, BytesMut};
use core::fmt;
use octseq::parse::ShortInput;

/// The parser type used throughout the crate.
///
/// All parsing happens on complete messages held in a byte slice, so that
/// compressed domain names can be followed back into earlier parts of the
/// message.
pub type Parser<'a> = octseq::parse::Parser<'a, [u8]>;

//------------ compose_len_prefixed ------------------------------------------

/// Composes data preceded by its length as a 16 bit value.
///
/// A placeholder length is written first and patched once `op` has
/// succeeded. If `op` fails or the data turns out to be longer than 65535
/// octets, the target is truncated back to where it was before the call.
pub fn compose_len_prefixed<F>(
    target: &mut BytesMut,
    op: F,
) -> Result<(), ComposeError>
where
    F: FnOnce(&mut BytesMut) -> Result<(), ComposeError>,
{
    let start = target.len();
    target.put_u16(0);
    let pos = target.len();
    if let Err(err) = op(target) {
        target.truncate(start);
        return Err(err);
    }
    let len = match u16::try_from(target.len() - pos) {
        Ok(len) => len,
        Err(_) => {
            target.truncate(start);
            return Err(ComposeError::LongData);
        }
    };
    if len > 0 {
        target[start..pos].copy_from_slice(&len.to_be_bytes());
    }
    Ok(())
}

/// Composes a character string.
///
/// This is a single octet with the length followed by the content.
pub fn compose_char_str(
    target: &mut BytesMut,
    data: &[u8],
) -> Result<(), ComposeError> {
    let len = u8::try_from(data.len()).map_err(|_| ComposeError::LongData)?;
    target.put_u8(len);
    target.put_slice(data);
    Ok(())
}

/// Parses a character string.
pub fn parse_char_str<'a>(
    parser: &mut Parser<'a>,
) -> Result<&'a [u8], ParseError> {
    let len = parser.parse_u8()?;
    Ok(parser.parse_octets(usize::from(len))?)
}

//------------ ComposeError --------------------------------------------------

/// An error happened while composing wire format data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComposeError {
    /// A relative name was to be composed without an origin.
    NeedAbsoluteName,

    /// Length-prefixed data exceeded what the prefix can express.
    LongData,

    /// A name grew beyond 255 octets when being made absolute.
    LongName,

    /// Only 32 bit serial numbers have a wire format.
    SerialWidth,
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ComposeError::NeedAbsoluteName => {
                f.write_str("relative name without origin")
            }
            ComposeError::LongData => f.write_str("data too long"),
            ComposeError::LongName => f.write_str("domain name too long"),
            ComposeError::SerialWidth => {
                f.write_str("serial number is not 32 bits wide")
            }
        }
    }
}

impl std::error::Error for ComposeError {}

//------------ ParseError ----------------------------------------------------

/// An error happened while parsing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An attempt was made to go beyond the end of the parser.
    ShortInput,

    /// A formatting error occurred.
    Form(FormError),
}

impl ParseError {
    /// Creates a new parse error as a form error with the given message.
    pub fn form_error(msg: &'static str) -> Self {
        FormError::new(msg).into()
    }
}

//--- From

impl From<ShortInput> for ParseError {
    fn from(_: ShortInput) -> Self {
        ParseError::ShortInput
    }
}

impl From<FormError> for ParseError {
    fn from(err: FormError) -> Self {
        ParseError::Form(err)
    }
}

//--- Display and Error

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::ShortInput => f.write_str("unexpected end of input"),
            ParseError::Form(ref err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for ParseError {}

//------------ FormError -----------------------------------------------------

/// A formatting error occured.
///
/// This is a generic error for all kinds of error cases that result in data
/// not being accepted. For diagnostics, the error is being given a static
/// string describing the error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormError(&'static str);

impl FormError {
    /// Creates a new form error value with the given diagnostics string.
    pub fn new(msg: &'static str) -> Self {
        FormError(msg)
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for FormError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn len_prefixed() {
        let mut buf = BytesMut::new();
        buf.put_u8(7);
        compose_len_prefixed(&mut buf, |buf| {
            buf.put_slice(b"foo");
            Ok(())
        })
        .unwrap();
        assert_eq!(buf.as_ref(), b"\x07\x00\x03foo");
    }

    #[test]
    fn len_prefixed_empty() {
        let mut buf = BytesMut::new();
        compose_len_prefixed(&mut buf, |_| Ok(())).unwrap();
        assert_eq!(buf.as_ref(), b"\x00\x00");
    }

    #[test]
    fn len_prefixed_rolls_back() {
        let mut buf = BytesMut::new();
        buf.put_u8(7);
        let res = compose_len_prefixed(&mut buf, |buf| {
            buf.put_slice(b"foo");
            Err(ComposeError::NeedAbsoluteName)
        });
        assert_eq!(res, Err(ComposeError::NeedAbsoluteName));
        assert_eq!(buf.as_ref(), b"\x07");

        let res = compose_len_prefixed(&mut buf, |buf| {
            buf.put_slice(&[0; 0x10000]);
            Ok(())
        });
        assert_eq!(res, Err(ComposeError::LongData));
        assert_eq!(buf.as_ref(), b"\x07");
    }

    #[test]
    fn char_str() {
        let mut buf = BytesMut::new();
        compose_char_str(&mut buf, b"hello").unwrap();
        assert_eq!(buf.as_ref(), b"\x05hello");
        assert_eq!(
            compose_char_str(&mut buf, &[0; 256]),
            Err(ComposeError::LongData)
        );
        let mut parser = Parser::from_ref(buf.as_ref());
        assert_eq!(parse_char_str(&mut parser).unwrap(), b"hello");
        assert_eq!(
            parse_char_str(&mut parser),
            Err(ParseError::ShortInput)
        );
    }
}
