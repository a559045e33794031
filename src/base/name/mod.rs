//! Domain names.
//!
//! A domain name is a sequence of labels. If the last label is the empty
//! root label, the name is *absolute*, otherwise it is *relative* and needs
//! to be completed by an origin before it can go onto the wire.
//!
//! [`Name`] keeps the name in its uncompressed wire format in a [`Bytes`]
//! value so that clones and suffixes are cheap. Comparison and hashing
//! ignore ASCII case, as required for domain names.
//!
//! The [`CompressionTable`] collects the positions of names already written
//! into a message so later occurrences can be replaced by pointers.

use super::wire::{ComposeError, ParseError, Parser};
use bytes::{BufMut, Bytes, BytesMut};
use core::{fmt, hash, str::FromStr};

pub use self::compress::CompressionTable;

mod compress;

/// The maximum length of a label in octets.
pub const MAX_LABEL_LEN: usize = 63;

/// The maximum length of a name in wire format.
pub const MAX_NAME_LEN: usize = 255;

//------------ Name ----------------------------------------------------------

/// An absolute or relative domain name.
#[derive(Clone)]
pub struct Name {
    /// The uncompressed wire format of the name.
    ///
    /// For absolute names, this ends in the root label.
    octets: Bytes,

    absolute: bool,
}

/// # Creation
///
impl Name {
    /// Returns the root name.
    #[must_use]
    pub fn root() -> Self {
        Name {
            octets: Bytes::from_static(b"\0"),
            absolute: true,
        }
    }

    /// Returns the empty relative name.
    ///
    /// This is the name written as `@` in zone files.
    #[must_use]
    pub fn empty() -> Self {
        Name {
            octets: Bytes::new(),
            absolute: false,
        }
    }

    /// Creates an absolute name from a static wire-format name.
    ///
    /// The octets are not checked and must be a valid uncompressed name
    /// ending in the root label.
    pub(crate) fn from_static(octets: &'static [u8]) -> Self {
        Name {
            octets: Bytes::from_static(octets),
            absolute: true,
        }
    }

    /// Creates a name from a sequence of non-empty labels.
    ///
    /// If `absolute` is true, the root label is appended.
    pub fn from_labels<'a, I>(
        labels: I,
        absolute: bool,
    ) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut octets = BytesMut::new();
        for label in labels {
            if label.is_empty() {
                return Err(NameError::EmptyLabel);
            }
            let len = u8::try_from(label.len())
                .ok()
                .filter(|len| usize::from(*len) <= MAX_LABEL_LEN)
                .ok_or(NameError::LongLabel)?;
            octets.put_u8(len);
            octets.put_slice(label);
        }
        if absolute {
            octets.put_u8(0);
        }
        if octets.len() > MAX_NAME_LEN {
            return Err(NameError::LongName);
        }
        Ok(Name {
            octets: octets.freeze(),
            absolute,
        })
    }
}

/// # Properties
///
impl Name {
    /// Returns whether the name ends in the root label.
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Returns whether this is the root name.
    pub fn is_root(&self) -> bool {
        self.absolute && self.octets.len() == 1
    }

    /// Returns whether this is the empty relative name.
    pub fn is_empty(&self) -> bool {
        self.octets.is_empty()
    }

    /// Returns the length of the uncompressed wire format.
    pub fn wire_len(&self) -> usize {
        self.octets.len()
    }

    /// Returns the uncompressed wire format.
    pub fn as_slice(&self) -> &[u8] {
        self.octets.as_ref()
    }

    /// Returns an iterator over the labels.
    ///
    /// For absolute names, the last label returned is the empty root label.
    pub fn iter(&self) -> LabelIter<'_> {
        LabelIter {
            octets: self.octets.as_ref(),
        }
    }

    /// Returns the number of labels including a root label.
    pub fn label_count(&self) -> usize {
        self.iter().count()
    }

    /// Returns the offset in the wire format after the first `count` labels.
    fn label_offset(&self, count: usize) -> usize {
        let mut pos = 0;
        for label in self.iter().take(count) {
            pos += label.len() + 1;
        }
        pos
    }
}

/// # Deriving Names
///
impl Name {
    /// Returns the name with the first `index` labels removed.
    ///
    /// If `index` covers all non-root labels, the result is the root name
    /// for absolute names and the empty name for relative names.
    pub fn suffix(&self, index: usize) -> Name {
        let mut pos = self.label_offset(index);
        if self.absolute && pos >= self.octets.len() {
            pos = self.octets.len() - 1;
        }
        Name {
            octets: self.octets.slice(pos..),
            absolute: self.absolute,
        }
    }

    /// Appends `origin` to a relative name.
    ///
    /// An absolute name is returned unchanged. The result is absolute if
    /// `origin` is.
    pub fn concat(&self, origin: &Name) -> Result<Name, ComposeError> {
        if self.absolute {
            return Ok(self.clone());
        }
        let mut octets =
            BytesMut::with_capacity(self.octets.len() + origin.octets.len());
        octets.put_slice(&self.octets);
        octets.put_slice(&origin.octets);
        if octets.len() > MAX_NAME_LEN {
            return Err(ComposeError::LongName);
        }
        Ok(Name {
            octets: octets.freeze(),
            absolute: origin.absolute,
        })
    }

    /// Returns whether `self` is equal to or below `other`.
    ///
    /// An absolute and a relative name are never related.
    pub fn is_subdomain(&self, other: &Name) -> bool {
        if self.absolute != other.absolute {
            return false;
        }
        let mine: Vec<_> = self.iter().collect();
        let theirs: Vec<_> = other.iter().collect();
        if theirs.len() > mine.len() {
            return false;
        }
        mine.iter()
            .rev()
            .zip(theirs.iter().rev())
            .all(|(left, right)| left.eq_ignore_ascii_case(right))
    }

    /// Makes the name relative to `origin` if it is below `origin`.
    ///
    /// Otherwise the name is returned unchanged.
    pub fn relativize(&self, origin: &Name) -> Name {
        if !self.is_subdomain(origin) {
            return self.clone();
        }
        let keep = self.label_count() - origin.label_count();
        Name {
            octets: self.octets.slice(..self.label_offset(keep)),
            absolute: false,
        }
    }

    /// Returns the name with all ASCII letters in lower case.
    pub fn to_canonical(&self) -> Name {
        Name {
            octets: self.octets.to_ascii_lowercase().into(),
            absolute: self.absolute,
        }
    }
}

/// # Wire Format
///
impl Name {
    /// Appends the name to the end of a message being built.
    ///
    /// A relative name is completed with `origin` first, which then needs
    /// to be absolute. If a compression table is given, the longest suffix
    /// of the name already present in the message is replaced by a pointer
    /// and all suffixes written anew are added to the table at their
    /// offsets in `target`. With `canonical`, labels are written in lower
    /// case.
    pub fn compose(
        &self,
        target: &mut BytesMut,
        mut compress: Option<&mut CompressionTable>,
        origin: Option<&Name>,
        canonical: bool,
    ) -> Result<(), ComposeError> {
        let name = if self.absolute {
            self.clone()
        } else {
            match origin {
                Some(origin) if origin.is_absolute() => self.concat(origin)?,
                _ => return Err(ComposeError::NeedAbsoluteName),
            }
        };
        let mut pos = 0;
        while pos < name.octets.len() {
            if let Some(table) = compress.as_deref_mut() {
                let suffix = Name {
                    octets: name.octets.slice(pos..),
                    absolute: true,
                };
                if let Some(offset) = table.get(&suffix) {
                    target.put_u16(0xC000 | offset);
                    return Ok(());
                }
                if !suffix.is_root() {
                    table.insert(suffix, target.len());
                }
            }
            let end = pos + usize::from(name.octets[pos]) + 1;
            if canonical {
                target.extend(
                    name.octets[pos..end].iter().map(u8::to_ascii_lowercase),
                );
            } else {
                target.put_slice(&name.octets[pos..end]);
            }
            pos = end;
        }
        Ok(())
    }

    /// Parses a possibly compressed name from a message.
    ///
    /// The parser needs to cover the complete message so that pointers can
    /// be followed. Each pointer must point to a position before the one
    /// the previous jump started from, which rules out loops.
    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        let msg = parser.octets_ref();
        let mut octets = BytesMut::new();
        let mut pos = parser.pos();
        let mut limit = pos;
        let mut jumped = false;
        loop {
            let ltype = *msg.get(pos).ok_or(ParseError::ShortInput)?;
            match ltype & 0xC0 {
                0x00 => {
                    let end = pos + usize::from(ltype) + 1;
                    let label =
                        msg.get(pos..end).ok_or(ParseError::ShortInput)?;
                    octets.put_slice(label);
                    if octets.len() > MAX_NAME_LEN {
                        return Err(ParseError::form_error("long domain name"));
                    }
                    pos = end;
                    if ltype == 0 {
                        break;
                    }
                }
                0xC0 => {
                    let ptr = msg
                        .get(pos..pos + 2)
                        .ok_or(ParseError::ShortInput)?;
                    let ptr = usize::from(
                        u16::from_be_bytes([ptr[0], ptr[1]]) & 0x3FFF,
                    );
                    if ptr >= limit {
                        return Err(ParseError::form_error(
                            "bad compression pointer",
                        ));
                    }
                    if !jumped {
                        parser.seek(pos + 2)?;
                        jumped = true;
                    }
                    limit = ptr;
                    pos = ptr;
                }
                _ => return Err(ParseError::form_error("unknown label type")),
            }
        }
        if !jumped {
            parser.seek(pos)?;
        }
        Ok(Name {
            octets: octets.freeze(),
            absolute: true,
        })
    }
}

//--- Default

impl Default for Name {
    fn default() -> Self {
        Self::root()
    }
}

//--- PartialEq, Eq, and Hash

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.absolute == other.absolute
            && self.octets.eq_ignore_ascii_case(&other.octets)
    }
}

impl Eq for Name {}

impl hash::Hash for Name {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_u8(u8::from(self.absolute));
        for ch in self.octets.iter() {
            state.write_u8(ch.to_ascii_lowercase())
        }
    }
}

//--- FromStr

impl FromStr for Name {
    type Err = NameError;

    /// Parses a name in presentation format.
    ///
    /// A trailing dot makes the name absolute. `\X` escapes the character
    /// `X` and `\DDD` gives an octet value in decimal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "@" => return Ok(Name::empty()),
            "." => return Ok(Name::root()),
            _ => {}
        }
        let mut labels = Vec::new();
        let mut label = Vec::new();
        let mut absolute = false;
        let mut chars = s.bytes().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                b'.' => {
                    if label.is_empty() {
                        return Err(NameError::EmptyLabel);
                    }
                    labels.push(core::mem::take(&mut label));
                    if chars.peek().is_none() {
                        absolute = true;
                    }
                }
                b'\\' => {
                    let ch = chars.next().ok_or(NameError::BadEscape)?;
                    if ch.is_ascii_digit() {
                        let mut value = u32::from(ch - b'0');
                        for _ in 0..2 {
                            match chars.next() {
                                Some(ch) if ch.is_ascii_digit() => {
                                    value = value * 10 + u32::from(ch - b'0')
                                }
                                _ => return Err(NameError::BadEscape),
                            }
                        }
                        let value = u8::try_from(value)
                            .map_err(|_| NameError::BadEscape)?;
                        label.push(value);
                    } else {
                        label.push(ch)
                    }
                }
                _ => label.push(ch),
            }
        }
        if !label.is_empty() {
            labels.push(label);
        }
        Name::from_labels(labels.iter().map(Vec::as_slice), absolute)
    }
}

//--- Display and Debug

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("@");
        }
        if self.is_root() {
            return f.write_str(".");
        }
        for (i, label) in self.iter().filter(|l| !l.is_empty()).enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            for &ch in label {
                match ch {
                    b'.' | b'\\' | b'"' | b'(' | b')' | b';' | b'@' | b'$' => {
                        write!(f, "\\{}", ch as char)?
                    }
                    0x21..=0x7E => write!(f, "{}", ch as char)?,
                    _ => write!(f, "\\{:03}", ch)?,
                }
            }
        }
        if self.absolute {
            f.write_str(".")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name({})", self)
    }
}

//------------ LabelIter -----------------------------------------------------

/// An iterator over the labels of a name.
#[derive(Clone, Debug)]
pub struct LabelIter<'a> {
    octets: &'a [u8],
}

impl<'a> Iterator for LabelIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, rest) = self.octets.split_first()?;
        let (label, rest) = rest.split_at(usize::from(len));
        self.octets = rest;
        Some(label)
    }
}

//------------ NameError -----------------------------------------------------

/// A domain name could not be created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// An empty label was found in the middle of the name.
    EmptyLabel,

    /// A label was longer than 63 octets.
    LongLabel,

    /// The name was longer than 255 octets.
    LongName,

    /// A malformed escape sequence was encountered.
    BadEscape,
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            NameError::EmptyLabel => "empty label in domain name",
            NameError::LongLabel => "domain name label longer than 63 bytes",
            NameError::LongName => "domain name longer than 255 bytes",
            NameError::BadEscape => "invalid escape sequence",
        })
    }
}

impl std::error::Error for NameError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            name("www.example.com.").as_slice(),
            b"\x03www\x07example\x03com\0"
        );
        assert!(name("www.example.com.").is_absolute());
        assert_eq!(name("www").as_slice(), b"\x03www");
        assert!(!name("www").is_absolute());
        assert!(name(".").is_root());
        assert!(name("@").is_empty());
        assert_eq!(name("a\\.b.").as_slice(), b"\x03a.b\0");
        assert_eq!(name("\\065b.").as_slice(), b"\x02Ab\0");
        assert_eq!("a..b".parse::<Name>(), Err(NameError::EmptyLabel));
        assert_eq!("a\\25".parse::<Name>(), Err(NameError::BadEscape));
        assert_eq!("a\\256".parse::<Name>(), Err(NameError::BadEscape));
        assert_eq!(
            "x".repeat(64).parse::<Name>(),
            Err(NameError::LongLabel)
        );
        let long = vec!["x".repeat(63); 4].join(".");
        assert_eq!(long.parse::<Name>(), Err(NameError::LongName));
    }

    #[test]
    fn display() {
        for s in ["www.example.com.", "www", ".", "@", "a\\.b.", "\\000.x"] {
            assert_eq!(name(s).to_string(), s);
        }
        assert_eq!(name("\\065b.").to_string(), "Ab.");
    }

    #[test]
    fn eq_and_hash_ignore_case() {
        use std::collections::HashSet;

        assert_eq!(name("WWW.Example.com."), name("www.example.COM."));
        assert_ne!(name("www.example.com."), name("www.example.com"));
        let set: HashSet<_> =
            [name("Example.com."), name("example.COM.")].into();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn labels_and_suffix() {
        let n = name("www.example.com.");
        assert_eq!(n.label_count(), 4);
        assert_eq!(n.suffix(1), name("example.com."));
        assert_eq!(n.suffix(3), Name::root());
        assert_eq!(n.suffix(10), Name::root());
        assert_eq!(name("a.b").suffix(2), Name::empty());
    }

    #[test]
    fn concat_and_relativize() {
        let origin = name("example.com.");
        assert_eq!(
            name("www").concat(&origin).unwrap(),
            name("www.example.com.")
        );
        assert_eq!(name("x.").concat(&origin).unwrap(), name("x."));
        assert_eq!(name("www.example.com.").relativize(&origin), name("www"));
        assert_eq!(origin.relativize(&origin), Name::empty());
        assert_eq!(
            name("www.example.org.").relativize(&origin),
            name("www.example.org.")
        );
        assert!(name("a.example.com.").is_subdomain(&origin));
        assert!(!name("a.example.com").is_subdomain(&origin));
        assert!(!name("com.").is_subdomain(&origin));
        let long = name(&vec!["x".repeat(63); 3].join("."));
        assert_eq!(
            long.concat(&long.concat(&Name::root()).unwrap()),
            Err(ComposeError::LongName)
        );
    }

    #[test]
    fn canonical() {
        assert_eq!(
            name("WwW.ExAmple.").to_canonical().as_slice(),
            b"\x03www\x07example\0"
        );
    }

    #[test]
    fn compose_compressed() {
        let mut buf = BytesMut::new();
        buf.put_slice(&[0; 12]);
        let mut table = CompressionTable::new();
        name("www.example.com.")
            .compose(&mut buf, Some(&mut table), None, false)
            .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(&name("example.com.")), Some(16));
        name("mail.Example.com.")
            .compose(&mut buf, Some(&mut table), None, false)
            .unwrap();
        assert_eq!(&buf[29..], b"\x04mail\xc0\x10");

        let mut parser = Parser::from_ref(buf.as_ref());
        parser.advance(29).unwrap();
        assert_eq!(
            Name::parse(&mut parser).unwrap(),
            name("mail.example.com.")
        );
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn compose_relative() {
        let mut buf = BytesMut::new();
        assert_eq!(
            name("www").compose(&mut buf, None, None, false),
            Err(ComposeError::NeedAbsoluteName)
        );
        assert_eq!(
            name("www").compose(&mut buf, None, Some(&name("rel")), false),
            Err(ComposeError::NeedAbsoluteName)
        );
        name("WWW")
            .compose(&mut buf, None, Some(&name("Example.")), true)
            .unwrap();
        assert_eq!(buf.as_ref(), b"\x03www\x07example\0");
    }

    #[test]
    fn parse_rejects_loops() {
        let msg = b"\x03www\xc0\x00";
        let mut parser = Parser::from_ref(&msg[..]);
        assert!(Name::parse(&mut parser).is_err());

        let msg = b"\x00\xc0\x01";
        let mut parser = Parser::from_ref(&msg[..]);
        parser.advance(1).unwrap();
        assert!(Name::parse(&mut parser).is_err());

        let msg = b"\x03www\x40";
        let mut parser = Parser::from_ref(&msg[..]);
        assert!(Name::parse(&mut parser).is_err());

        let msg = b"\x03ww";
        let mut parser = Parser::from_ref(&msg[..]);
        assert_eq!(Name::parse(&mut parser), Err(ParseError::ShortInput));
    }
}
