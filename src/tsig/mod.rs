//! Support for TSIG.
//!
//! This module provides signing and validation of DNS messages with TSIG as
//! defined in [RFC 8945].
//!
//! TSIG authenticates messages through a secret key shared between the two
//! parties of an exchange. The sender calculates a MAC over the message and
//! some additional variables and adds it in a record of type [TSIG] as the
//! last record of the additional section. The receiver repeats the
//! calculation with its copy of the key and compares the result. A
//! response includes the MAC of the request in its own calculation, thus
//! binding the two together. For a sequence of messages answering a single
//! request, such as a zone transfer, each message after the first includes
//! the MAC of the previous one.
//!
//! Only the HMAC algorithms based on SHA-1 and SHA-2 are supported, as
//! listed in the [`Algorithm`] enum. Keys are managed via the [`Key`] type
//! which ties together a name, an algorithm, and the secret itself.
//!
//! Signing happens while rendering a message via
//! [`Renderer::add_tsig`][crate::base::Renderer::add_tsig] and
//! [`Renderer::add_multi_tsig`][crate::base::Renderer::add_multi_tsig].
//! The renderer only relies on the [`SigningKey`] trait, so other key
//! types can be used as well. Received messages are checked with
//! [`Key::validate_message`] or, if the TSIG record has been located
//! already, [`Key::validate`].
//!
//! Keys can be kept in a [`Keyring`][keyring::Keyring] which can also be
//! created from a simple text format.
//!
//! [RFC 8945]: https://tools.ietf.org/html/rfc8945
//! [TSIG]: crate::rdata::Tsig

pub mod keyring;

use crate::base::iana::{Class, TsigRcode};
use crate::base::message::Message;
use crate::base::name::Name;
use crate::base::wire::{ComposeError, ParseError};
use crate::rdata::tsig::{Time48, Tsig};
use bytes::{Bytes, BytesMut};
use core::{fmt, str};
use ring::{constant_time, hkdf::KeyType, hmac, rand};
use tracing::debug;

//------------ Constants -----------------------------------------------------

/// The recommended number of seconds a clock may be off.
pub const DEFAULT_FUDGE: u16 = 300;

/// The algorithm used when none is given.
pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::Sha256;

//------------ SigningKey ----------------------------------------------------

/// A type that can sign a message with TSIG.
///
/// The renderer hands the message as it has been built so far and a
/// placeholder TSIG record to the key. The placeholder carries all values
/// of the final record except for the time signed and the MAC. The key
/// returns the complete record.
pub trait SigningKey {
    /// The state carried from one message of a sequence to the next.
    ///
    /// The renderer never looks inside this value.
    type Context;

    /// Returns the name of the key.
    fn name(&self) -> &Name;

    /// Returns the name of the key’s algorithm.
    fn algorithm_name(&self) -> Name;

    /// Signs a single message.
    ///
    /// The `wire` is the complete message without the TSIG record. If the
    /// message is a response, `request_mac` is the MAC of the request.
    fn sign(
        &self,
        wire: &[u8],
        placeholder: &Tsig,
        time: Time48,
        request_mac: Option<&[u8]>,
    ) -> Result<Tsig, ComposeError>;

    /// Signs a message as part of a sequence.
    ///
    /// For the first message, `ctx` is `None`. For every following message
    /// it is the context returned when signing the previous one.
    fn sign_multi(
        &self,
        wire: &[u8],
        placeholder: &Tsig,
        time: Time48,
        request_mac: Option<&[u8]>,
        ctx: Option<Self::Context>,
    ) -> Result<(Tsig, Self::Context), ComposeError>;
}

//------------ Key -----------------------------------------------------------

/// A key for creating and validating TSIG signatures.
///
/// Keys are identified in TSIG through a name that is encoded as a domain
/// name. While TSIG allows a secret to be used with any algorithm, we tie
/// them together, so each `Key` value also knows which algorithm it is for.
#[derive(Clone, Debug)]
pub struct Key {
    /// The name of the key.
    name: Name,

    /// The algorithm.
    algorithm: Algorithm,

    /// The secret as given.
    secret: Bytes,

    /// The ring key derived from the secret.
    key: hmac::Key,
}

/// # Creating Keys
///
impl Key {
    /// Creates a new key from its components.
    ///
    /// The name needs to be absolute.
    pub fn new(
        name: Name,
        algorithm: Algorithm,
        secret: &[u8],
    ) -> Result<Self, NewKeyError> {
        if !name.is_absolute() {
            return Err(NewKeyError::RelativeName);
        }
        Ok(Key {
            key: hmac::Key::new(algorithm.into_hmac_algorithm(), secret),
            name,
            algorithm,
            secret: Bytes::copy_from_slice(secret),
        })
    }

    /// Generates a new key with a random secret.
    ///
    /// The secret has the native length of the algorithm. It is returned
    /// alongside the key for exporting.
    pub fn generate(
        name: Name,
        algorithm: Algorithm,
    ) -> Result<(Self, Bytes), NewKeyError> {
        let rng = rand::SystemRandom::new();
        let mut secret = BytesMut::zeroed(algorithm.native_len());
        rand::SecureRandom::fill(&rng, &mut secret)?;
        let secret = secret.freeze();
        let key = Self::new(name, algorithm, &secret)?;
        Ok((key, secret))
    }
}

/// # Access to Properties
///
impl Key {
    /// Returns a reference to the name of this key.
    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn secret(&self) -> &Bytes {
        &self.secret
    }

    /// Returns the length of the TSIG record produced with this key.
    ///
    /// This assumes that the key name is not compressed and the other
    /// data is empty. The value is intended for
    /// [`Renderer::reserve`][crate::base::Renderer::reserve].
    pub fn compose_reserve_len(&self) -> usize {
        // Type, class, TTL, and rdlen take 10 octets. Time signed, fudge,
        // MAC size, original ID, error, and other length take 16.
        self.name.wire_len()
            + 10
            + self.algorithm.to_name().wire_len()
            + 16
            + self.algorithm.mac_len()
    }

    /// Returns the context for the message following one with `mac`.
    pub fn continuation(&self, mac: &[u8]) -> SigningContext {
        let mut context = self.signing_context();
        context.apply_mac(mac);
        context
    }

    fn signing_context(&self) -> SigningContext {
        SigningContext {
            context: hmac::Context::with_key(&self.key),
        }
    }
}

/// # Signing and Validating
///
impl Key {
    /// Feeds a message and its TSIG variables into a signing context.
    ///
    /// The first message of an exchange includes the request MAC and the
    /// complete set of variables. Later messages of a sequence only add
    /// the timers. In both cases, the message ID is replaced by the
    /// original ID.
    fn digest(
        &self,
        context: &mut SigningContext,
        wire: &[u8],
        tsig: &Tsig,
        request_mac: Option<&[u8]>,
        first: bool,
    ) -> Result<(), ComposeError> {
        let context = &mut context.context;
        if first {
            if let Some(mac) = request_mac {
                context.update(&mac_len(mac)?.to_be_bytes());
                context.update(mac);
            }
        }
        context.update(&tsig.original_id().to_be_bytes());
        context.update(wire.get(2..).unwrap_or_default());
        if first {
            let mut buf = BytesMut::new();
            self.name.compose(&mut buf, None, None, true)?;
            context.update(&buf);
            context.update(&Class::ANY.to_int().to_be_bytes());
            context.update(&0u32.to_be_bytes());
            buf.clear();
            tsig.algorithm().compose(&mut buf, None, None, true)?;
            context.update(&buf);
        }
        context.update(&tsig.time_signed().into_octets());
        context.update(&tsig.fudge().to_be_bytes());
        if first {
            context.update(&tsig.error().to_int().to_be_bytes());
            context.update(&mac_len(tsig.other())?.to_be_bytes());
            context.update(tsig.other());
        }
        Ok(())
    }

    /// Finishes a signing context and returns the possibly truncated MAC.
    fn finish(&self, context: SigningContext) -> Bytes {
        let tag = context.context.sign();
        Bytes::copy_from_slice(&tag.as_ref()[..self.algorithm.mac_len()])
    }

    /// Checks the TSIG record of a received message.
    ///
    /// The `wire` is the complete message including the TSIG record which
    /// starts at `tsig_start` and has the owner name `owner` and the data
    /// `tsig`. For a response, `request_mac` is the MAC of the request. For
    /// a sequence of messages, `multi` is `true` and `ctx` is the context
    /// returned by the validation of the previous message or `None` for
    /// the first.
    ///
    /// If `multi` is `true`, returns the context for validating the next
    /// message.
    #[allow(clippy::too_many_arguments)]
    pub fn validate(
        &self,
        wire: &[u8],
        owner: &Name,
        tsig: &Tsig,
        now: Time48,
        request_mac: Option<&[u8]>,
        tsig_start: usize,
        ctx: Option<SigningContext>,
        multi: bool,
    ) -> Result<Option<SigningContext>, ValidationError> {
        let unsigned = unsigned_message(wire, tsig_start)?;
        match tsig.error() {
            TsigRcode::NOERROR => {}
            TsigRcode::BADSIG => return Err(ValidationError::PeerBadSig),
            TsigRcode::BADKEY => return Err(ValidationError::PeerBadKey),
            TsigRcode::BADTIME => return Err(ValidationError::PeerBadTime),
            TsigRcode::BADTRUNC => return Err(ValidationError::PeerBadTrunc),
            error => return Err(ValidationError::PeerError(error)),
        }
        if !tsig.is_valid_at(now) {
            debug!(
                "TSIG time {} outside {} seconds of {}",
                tsig.time_signed(),
                tsig.fudge(),
                now
            );
            return Err(ValidationError::BadTime);
        }
        if *owner != self.name {
            debug!("TSIG key {} does not match key {}", owner, self.name);
            return Err(ValidationError::BadKey);
        }
        if *tsig.algorithm() != self.algorithm.to_name() {
            debug!(
                "TSIG algorithm {} does not match {}",
                tsig.algorithm(),
                self.algorithm
            );
            return Err(ValidationError::BadAlgorithm);
        }
        let first = !(multi && ctx.is_some());
        let mut context = match ctx {
            Some(ctx) if multi => ctx,
            _ => self.signing_context(),
        };
        self.digest(&mut context, &unsigned, tsig, request_mac, first)
            .map_err(|_| ValidationError::FormErr)?;
        let expected = self.finish(context);
        if constant_time::verify_slices_are_equal(&expected, tsig.mac())
            .is_err()
        {
            debug!("TSIG MAC for key {} does not verify", self.name);
            return Err(ValidationError::BadSig);
        }
        if multi {
            Ok(Some(self.continuation(&expected)))
        } else {
            Ok(None)
        }
    }

    /// Checks the TSIG record of a received message.
    ///
    /// This is like [`validate`][Self::validate] but finds the TSIG record
    /// itself. A message without a TSIG record is rejected.
    pub fn validate_message(
        &self,
        wire: &[u8],
        now: Time48,
        request_mac: Option<&[u8]>,
        ctx: Option<SigningContext>,
        multi: bool,
    ) -> Result<Option<SigningContext>, ValidationError> {
        let message = Message::from_octets(Bytes::copy_from_slice(wire))?;
        let (owner, tsig, start) =
            message.tsig().ok_or(ValidationError::FormErr)?;
        self.validate(
            wire,
            owner,
            tsig,
            now,
            request_mac,
            start,
            ctx,
            multi,
        )
    }
}

//--- PartialEq and Eq

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.algorithm == other.algorithm
            && self.secret == other.secret
    }
}

impl Eq for Key {}

//--- SigningKey

impl SigningKey for Key {
    type Context = SigningContext;

    fn name(&self) -> &Name {
        &self.name
    }

    fn algorithm_name(&self) -> Name {
        self.algorithm.to_name()
    }

    fn sign(
        &self,
        wire: &[u8],
        placeholder: &Tsig,
        time: Time48,
        request_mac: Option<&[u8]>,
    ) -> Result<Tsig, ComposeError> {
        let tsig = placeholder.with_time_signed(time);
        let mut context = self.signing_context();
        self.digest(&mut context, wire, &tsig, request_mac, true)?;
        tsig.with_mac(self.finish(context))
    }

    fn sign_multi(
        &self,
        wire: &[u8],
        placeholder: &Tsig,
        time: Time48,
        request_mac: Option<&[u8]>,
        ctx: Option<SigningContext>,
    ) -> Result<(Tsig, SigningContext), ComposeError> {
        let tsig = placeholder.with_time_signed(time);
        let first = ctx.is_none();
        let mut context = ctx.unwrap_or_else(|| self.signing_context());
        self.digest(&mut context, wire, &tsig, request_mac, first)?;
        let mac = self.finish(context);
        let next = self.continuation(&mac);
        Ok((tsig.with_mac(mac)?, next))
    }
}

//------------ SigningContext ------------------------------------------------

/// The running MAC calculation of a message sequence.
///
/// This is a thin wrapper around a ring signing context that already has
/// the MAC of the previous message applied.
#[derive(Clone, Debug)]
pub struct SigningContext {
    context: hmac::Context,
}

impl SigningContext {
    /// Applies a MAC as a 16 bit length followed by the octets.
    fn apply_mac(&mut self, mac: &[u8]) {
        // A MAC produced by a known algorithm is never longer than 64.
        self.context.update(&(mac.len() as u16).to_be_bytes());
        self.context.update(mac);
    }
}

//------------ Algorithm -----------------------------------------------------

/// The supported TSIG algorithms.
///
/// The variants with a second number produce MACs truncated to that many
/// bits.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha256_128,
    Sha384,
    Sha384_192,
    Sha512,
    Sha512_256,
}

impl Algorithm {
    /// Creates a value from its domain name representation.
    ///
    /// Returns `None` if the name doesn’t represent a known algorithm.
    pub fn from_name(name: &Name) -> Option<Self> {
        [
            Algorithm::Sha1,
            Algorithm::Sha256,
            Algorithm::Sha256_128,
            Algorithm::Sha384,
            Algorithm::Sha384_192,
            Algorithm::Sha512,
            Algorithm::Sha512_256,
        ]
        .into_iter()
        .find(|alg| alg.to_name() == *name)
    }

    /// Returns the domain name for this value.
    pub fn to_name(self) -> Name {
        Name::from_static(self.into_wire_slice())
    }

    /// Returns the native length of a MAC created with this algorithm.
    pub fn native_len(self) -> usize {
        self.into_hmac_algorithm().len()
    }

    /// Returns the length of the MAC placed in the TSIG record.
    pub fn mac_len(self) -> usize {
        match self {
            Algorithm::Sha256_128 => 16,
            Algorithm::Sha384_192 => 24,
            Algorithm::Sha512_256 => 32,
            _ => self.native_len(),
        }
    }

    /// Returns the ring HMAC algorithm for this TSIG algorithm.
    fn into_hmac_algorithm(self) -> hmac::Algorithm {
        match self {
            Algorithm::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            Algorithm::Sha256 | Algorithm::Sha256_128 => hmac::HMAC_SHA256,
            Algorithm::Sha384 | Algorithm::Sha384_192 => hmac::HMAC_SHA384,
            Algorithm::Sha512 | Algorithm::Sha512_256 => hmac::HMAC_SHA512,
        }
    }

    /// Returns a octet slice with the wire-format domain name for this value.
    fn into_wire_slice(self) -> &'static [u8] {
        match self {
            Algorithm::Sha1 => b"\x09hmac-sha1\0",
            Algorithm::Sha256 => b"\x0Bhmac-sha256\0",
            Algorithm::Sha256_128 => b"\x0Fhmac-sha256-128\0",
            Algorithm::Sha384 => b"\x0Bhmac-sha384\0",
            Algorithm::Sha384_192 => b"\x0Fhmac-sha384-192\0",
            Algorithm::Sha512 => b"\x0Bhmac-sha512\0",
            Algorithm::Sha512_256 => b"\x0Fhmac-sha512-256\0",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Algorithm::Sha1 => "hmac-sha1",
            Algorithm::Sha256 => "hmac-sha256",
            Algorithm::Sha256_128 => "hmac-sha256-128",
            Algorithm::Sha384 => "hmac-sha384",
            Algorithm::Sha384_192 => "hmac-sha384-192",
            Algorithm::Sha512 => "hmac-sha512",
            Algorithm::Sha512_256 => "hmac-sha512-256",
        }
    }
}

//--- FromStr

impl str::FromStr for Algorithm {
    type Err = AlgorithmError;

    /// Parses the algorithm name with or without a trailing dot.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_suffix('.').unwrap_or(s);
        [
            Algorithm::Sha1,
            Algorithm::Sha256,
            Algorithm::Sha256_128,
            Algorithm::Sha384,
            Algorithm::Sha384_192,
            Algorithm::Sha512,
            Algorithm::Sha512_256,
        ]
        .into_iter()
        .find(|alg| alg.as_str().eq_ignore_ascii_case(name))
        .ok_or(AlgorithmError)
    }
}

//--- Display

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//------------ Helper Functions ----------------------------------------------

/// Returns the length of length-prefixed TSIG data.
fn mac_len(data: &[u8]) -> Result<u16, ComposeError> {
    u16::try_from(data.len()).map_err(|_| ComposeError::LongData)
}

/// Returns the message without its TSIG record.
///
/// The record starting at `tsig_start` is cut off and ARCOUNT is reduced
/// by one.
fn unsigned_message(
    wire: &[u8],
    tsig_start: usize,
) -> Result<Vec<u8>, ValidationError> {
    if tsig_start < 12 || tsig_start > wire.len() {
        return Err(ValidationError::FormErr);
    }
    let arcount = u16::from_be_bytes([wire[10], wire[11]]);
    let arcount = arcount.checked_sub(1).ok_or(ValidationError::FormErr)?;
    let mut res = wire[..tsig_start].to_vec();
    res[10..12].copy_from_slice(&arcount.to_be_bytes());
    Ok(res)
}

//============ Error Types ===================================================

//------------ NewKeyError ---------------------------------------------------

/// A key couldn’t be created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NewKeyError {
    /// The key name is not absolute.
    RelativeName,

    /// Generating a random secret failed.
    GenerationFailed,
}

//--- From

impl From<ring::error::Unspecified> for NewKeyError {
    fn from(_: ring::error::Unspecified) -> Self {
        NewKeyError::GenerationFailed
    }
}

//--- Display and Error

impl fmt::Display for NewKeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            NewKeyError::RelativeName => {
                f.write_str("key name must be absolute")
            }
            NewKeyError::GenerationFailed => {
                f.write_str("generating key failed")
            }
        }
    }
}

impl std::error::Error for NewKeyError {}

//------------ AlgorithmError ------------------------------------------------

/// An invalid algorithm was provided.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AlgorithmError;

//--- Display and Error

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid algorithm")
    }
}

impl std::error::Error for AlgorithmError {}

//------------ ValidationError -----------------------------------------------

/// An error happened while validating a TSIG-signed message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationError {
    /// The message is malformed with regards to TSIG.
    FormErr,

    /// The peer didn’t know the key.
    PeerBadKey,

    /// The peer failed to verify our MAC.
    PeerBadSig,

    /// The peer considered our time signed out of range.
    PeerBadTime,

    /// The peer rejected our truncated MAC.
    PeerBadTrunc,

    /// The peer reported some other TSIG error.
    PeerError(TsigRcode),

    /// The time signed is outside the permitted window.
    BadTime,

    /// The record was signed with a different key.
    BadKey,

    /// The record uses a different algorithm than the key.
    BadAlgorithm,

    /// The MAC doesn’t verify.
    BadSig,

    /// The message could not be parsed.
    Parse(ParseError),
}

//--- From

impl From<ParseError> for ValidationError {
    fn from(err: ParseError) -> Self {
        ValidationError::Parse(err)
    }
}

//--- Display and Error

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ValidationError::FormErr => f.write_str("format error"),
            ValidationError::PeerBadKey => {
                f.write_str("peer reported unknown key")
            }
            ValidationError::PeerBadSig => {
                f.write_str("peer failed to verify MAC")
            }
            ValidationError::PeerBadTime => {
                f.write_str("peer reported bad time")
            }
            ValidationError::PeerBadTrunc => {
                f.write_str("peer reported bad truncation")
            }
            ValidationError::PeerError(error) => {
                write!(f, "peer reported TSIG error {}", error)
            }
            ValidationError::BadTime => f.write_str("bad time"),
            ValidationError::BadKey => f.write_str("unknown key"),
            ValidationError::BadAlgorithm => {
                f.write_str("algorithm doesn’t match key")
            }
            ValidationError::BadSig => f.write_str("bad signature"),
            ValidationError::Parse(ref err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for ValidationError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn key(alg: Algorithm) -> Key {
        Key::new("key.".parse().unwrap(), alg, b"1234567890").unwrap()
    }

    fn placeholder(alg: Algorithm) -> Tsig {
        Tsig::new(
            alg.to_name(),
            Time48::default(),
            DEFAULT_FUDGE,
            Bytes::new(),
            0x1234,
            TsigRcode::NOERROR,
            Bytes::new(),
        )
        .unwrap()
    }

    #[rstest]
    #[case(Algorithm::Sha1, "hmac-sha1.", 20, 20)]
    #[case(Algorithm::Sha256, "hmac-sha256.", 32, 32)]
    #[case(Algorithm::Sha256_128, "hmac-sha256-128.", 32, 16)]
    #[case(Algorithm::Sha384, "hmac-sha384.", 48, 48)]
    #[case(Algorithm::Sha384_192, "hmac-sha384-192.", 48, 24)]
    #[case(Algorithm::Sha512, "hmac-sha512.", 64, 64)]
    #[case(Algorithm::Sha512_256, "hmac-sha512-256.", 64, 32)]
    fn algorithms(
        #[case] alg: Algorithm,
        #[case] name: &str,
        #[case] native: usize,
        #[case] mac: usize,
    ) {
        let parsed: Name = name.parse().unwrap();
        assert_eq!(alg.to_name(), parsed);
        assert_eq!(Algorithm::from_name(&parsed), Some(alg));
        assert_eq!(name.parse::<Algorithm>(), Ok(alg));
        assert_eq!(format!("{}.", alg), name);
        assert_eq!(alg.native_len(), native);
        assert_eq!(alg.mac_len(), mac);
    }

    #[test]
    fn unknown_algorithm() {
        assert_eq!("hmac-md5".parse::<Algorithm>(), Err(AlgorithmError));
        assert_eq!(
            Algorithm::from_name(&"hmac-sha256.example.".parse().unwrap()),
            None
        );
    }

    #[test]
    fn new_key() {
        assert_eq!(
            Key::new("key".parse().unwrap(), Algorithm::Sha256, b"x")
                .unwrap_err(),
            NewKeyError::RelativeName
        );
        let (generated, secret) =
            Key::generate("key.".parse().unwrap(), Algorithm::Sha384)
                .unwrap();
        assert_eq!(secret.len(), 48);
        assert_eq!(generated.secret(), &secret);
        // name 5, fixed 10, algorithm 13, fixed 16, MAC 32
        assert_eq!(key(Algorithm::Sha256).compose_reserve_len(), 76);
    }

    #[test]
    fn truncated_mac() {
        let key = key(Algorithm::Sha256_128);
        let wire = b"\x12\x34\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";
        let tsig = key
            .sign(
                wire,
                &placeholder(Algorithm::Sha256_128),
                Time48::from_u64(1000),
                None,
            )
            .unwrap();
        assert_eq!(tsig.mac().len(), 16);
        assert_eq!(tsig.time_signed(), Time48::from_u64(1000));
        assert_eq!(tsig.original_id(), 0x1234);
    }

    #[test]
    fn request_mac_changes_signature() {
        let key = key(Algorithm::Sha256);
        let wire = b"\x12\x34\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";
        let time = Time48::from_u64(1000);
        let plain = key
            .sign(wire, &placeholder(Algorithm::Sha256), time, None)
            .unwrap();
        let bound = key
            .sign(wire, &placeholder(Algorithm::Sha256), time, Some(b"mac"))
            .unwrap();
        assert_ne!(plain.mac(), bound.mac());
    }

    #[test]
    fn unsigned_message_drops_record() {
        let wire = b"\x00\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00\x02abcdef";
        assert_eq!(
            unsigned_message(wire, 15).unwrap(),
            b"\x00\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00\x01abc"
        );
        assert_eq!(unsigned_message(wire, 30), Err(ValidationError::FormErr));
        let wire = b"\x00\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";
        assert_eq!(unsigned_message(wire, 12), Err(ValidationError::FormErr));
    }

    #[rstest]
    #[case(TsigRcode::BADSIG, ValidationError::PeerBadSig)]
    #[case(TsigRcode::BADKEY, ValidationError::PeerBadKey)]
    #[case(TsigRcode::BADTIME, ValidationError::PeerBadTime)]
    #[case(TsigRcode::BADTRUNC, ValidationError::PeerBadTrunc)]
    #[case(TsigRcode::BADNAME, ValidationError::PeerError(TsigRcode::BADNAME))]
    fn peer_errors(
        #[case] error: TsigRcode,
        #[case] expected: ValidationError,
    ) {
        let key = key(Algorithm::Sha256);
        let wire = b"\x00\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00\x01";
        let tsig = Tsig::new(
            Algorithm::Sha256.to_name(),
            Time48::from_u64(1000),
            DEFAULT_FUDGE,
            Bytes::new(),
            1,
            error,
            Bytes::new(),
        )
        .unwrap();
        assert_eq!(
            key.validate(
                wire,
                key.name(),
                &tsig,
                Time48::from_u64(1000),
                None,
                12,
                None,
                false
            )
            .unwrap_err(),
            expected
        );
    }
}
