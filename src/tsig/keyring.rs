//! A place to keep TSIG keys.
//!
//! A [`Keyring`] holds keys by name in the order they were added. It can be
//! created from and turned into a simple text format with one key per
//! line:
//!
//! ```text
//! # comments and empty lines are ignored
//! name. base64-secret
//! name. algorithm base64-secret
//! ```
//!
//! Keys without an algorithm use [`DEFAULT_ALGORITHM`].

use super::{AlgorithmError, Key, NewKeyError, DEFAULT_ALGORITHM};
use crate::base::name::{Name, NameError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use core::fmt;

//------------ Keyring -------------------------------------------------------

/// An ordered collection of TSIG keys.
///
/// There is at most one key for each name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Keyring {
    keys: Vec<Key>,
}

impl Keyring {
    /// Creates a new, empty keyring.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Adds a key.
    ///
    /// A key with the same name is replaced in place and returned.
    pub fn insert(&mut self, key: Key) -> Option<Key> {
        match self.keys.iter_mut().find(|item| item.name() == key.name()) {
            Some(item) => Some(core::mem::replace(item, key)),
            None => {
                self.keys.push(key);
                None
            }
        }
    }

    /// Returns the key with the given name.
    pub fn get(&self, name: &Name) -> Option<&Key> {
        self.keys.iter().find(|key| key.name() == name)
    }

    /// Returns the key to use for a message.
    ///
    /// Without a name, this is the first key of the keyring.
    pub fn get_key(&self, name: Option<&Name>) -> Option<&Key> {
        match name {
            Some(name) => self.get(name),
            None => self.keys.first(),
        }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Key> {
        self.keys.iter()
    }

    /// Creates a keyring from its text format.
    pub fn from_text(text: &str) -> Result<Self, KeyringError> {
        let mut res = Keyring::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let err = |kind| KeyringError { line: idx + 1, kind };
            let fields: Vec<_> = line.split_whitespace().collect();
            let (name, algorithm, secret) = match fields.as_slice() {
                [name, secret] => (name, DEFAULT_ALGORITHM, secret),
                [name, algorithm, secret] => (
                    name,
                    algorithm
                        .parse()
                        .map_err(|e| err(KeyringErrorKind::Algorithm(e)))?,
                    secret,
                ),
                _ => return Err(err(KeyringErrorKind::Syntax)),
            };
            let mut name: Name =
                name.parse().map_err(|e| err(KeyringErrorKind::Name(e)))?;
            if !name.is_absolute() {
                name = name.concat(&Name::root()).map_err(|_| {
                    err(KeyringErrorKind::Name(NameError::LongName))
                })?;
            }
            let secret = STANDARD
                .decode(secret)
                .map_err(|_| err(KeyringErrorKind::Base64))?;
            let key = Key::new(name, algorithm, &secret)
                .map_err(|e| err(KeyringErrorKind::Key(e)))?;
            res.insert(key);
        }
        Ok(res)
    }

    /// Converts the keyring into its text format.
    ///
    /// The algorithm is always included.
    pub fn to_text(&self) -> String {
        let mut res = String::new();
        for key in &self.keys {
            res.push_str(&format!(
                "{} {} {}\n",
                key.name(),
                key.algorithm(),
                STANDARD.encode(key.secret())
            ));
        }
        res
    }
}

//--- FromIterator and Extend

impl FromIterator<Key> for Keyring {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut res = Keyring::new();
        res.extend(iter);
        res
    }
}

impl Extend<Key> for Keyring {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

//------------ KeyringError --------------------------------------------------

/// A keyring couldn’t be created from text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyringError {
    /// The line the error happened in, starting at 1.
    line: usize,

    kind: KeyringErrorKind,
}

impl KeyringError {
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn kind(&self) -> KeyringErrorKind {
        self.kind
    }
}

/// What went wrong while reading a keyring.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyringErrorKind {
    /// The line doesn’t have two or three fields.
    Syntax,

    /// The key name is invalid.
    Name(NameError),

    /// The algorithm is unknown.
    Algorithm(AlgorithmError),

    /// The secret is not valid base64.
    Base64,

    /// The key couldn’t be created.
    Key(NewKeyError),
}

//--- Display and Error

impl fmt::Display for KeyringError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match self.kind {
            KeyringErrorKind::Syntax => {
                f.write_str("expected two or three fields")
            }
            KeyringErrorKind::Name(ref err) => fmt::Display::fmt(err, f),
            KeyringErrorKind::Algorithm(ref err) => fmt::Display::fmt(err, f),
            KeyringErrorKind::Base64 => f.write_str("invalid base64 secret"),
            KeyringErrorKind::Key(ref err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for KeyringError {}

//============ Testing =======================================================
