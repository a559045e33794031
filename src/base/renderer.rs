//! Building a DNS message.
//!
//! The [`Renderer`] assembles a wire-format message section by section. It
//! owns the output buffer, the name compression table, and the section
//! counts, and it enforces two rules while doing so.
//!
//! First, the four sections of a message have to be written in order:
//! question, answer, authority, and finally additional. Sections can be
//! skipped, but it is not possible to go back to an earlier section. An
//! attempt to do so fails with [`RenderError::FormError`].
//!
//! Second, the message must never grow beyond its maximum size. Every
//! addition happens as a transaction: if it fails for any reason, including
//! the message becoming too big, the buffer and the compression table are
//! returned to the state they had before the call. The renderer can then
//! still be used, e.g., to finish the message with the truncation flag set.
//!
//! Once all sections are complete, [`write_header`][Renderer::write_header]
//! fills in the header. After that, a TSIG signature may be added via
//! [`add_tsig`][Renderer::add_tsig] or, for a sequence of messages such as a
//! zone transfer, [`add_multi_tsig`][Renderer::add_multi_tsig].
//!
//! ```
//! use dnsrender::base::{Class, Name, Renderer, Rrset, Rtype, Section};
//! use dnsrender::base::question::Question;
//! use dnsrender::rdata::A;
//!
//! let qname: Name = "example.com.".parse().unwrap();
//! let mut renderer = Renderer::new(Some(1), 0x8000, 512, None);
//! let question = Question::new_in(qname.clone(), Rtype::A);
//! renderer.add_question(&question).unwrap();
//! let answer = Rrset::from_rdata(
//!     qname, Class::IN, 3600, A::from_octets(192, 0, 2, 1).into()
//! );
//! renderer.add_rrset(Section::Answer, &answer).unwrap();
//! renderer.write_header();
//! let wire = renderer.get_wire();
//! assert_eq!(wire.len(), 45);
//! ```
//!
//! # Padding
//!
//! An OPT record added via [`add_opt`][Renderer::add_opt] can be padded so
//! the message length becomes a multiple of a block size. The renderer
//! cannot know how large a TSIG record added later will be, so the caller
//! provides that size. For TSIG algorithms whose MAC length is not known in
//! advance, the final length may thus not be an exact multiple.

use super::header::{Header, HeaderSection};
use super::iana::{Class, Rtype, TsigRcode};
use super::name::{CompressionTable, Name};
use super::opt::{EdnsOption, OptRecord, Padding};
use super::question::Question;
use super::record::{ComposeOptions, Rdataset, Rrset};
use super::wire::{compose_len_prefixed, ComposeError};
use crate::rdata::{ComposeRecordData, Time48, Tsig};
use crate::tsig::SigningKey;
use bytes::{BufMut, Bytes, BytesMut};
use core::fmt;
use tracing::{debug, trace};

//------------ Constants -----------------------------------------------------

/// The default maximum size of a message.
pub const DEFAULT_MAX_SIZE: usize = 65535;

/// The default UDP payload size advertised via EDNS.
pub const DEFAULT_EDNS_PAYLOAD: u16 = 1232;

//------------ Section -------------------------------------------------------

/// The sections of a DNS message in the order they appear.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Section {
    Question,
    Answer,
    Authority,
    Additional,
}

impl Section {
    /// Returns the position of the section in the message.
    pub fn index(self) -> usize {
        match self {
            Section::Question => 0,
            Section::Answer => 1,
            Section::Authority => 2,
            Section::Additional => 3,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Section::Question => "question",
            Section::Answer => "answer",
            Section::Authority => "authority",
            Section::Additional => "additional",
        })
    }
}

//------------ Renderer ------------------------------------------------------

/// Builds a wire-format DNS message.
///
/// See the [module documentation][self] for an overview.
#[derive(Clone, Debug)]
pub struct Renderer {
    /// The message ID.
    id: u16,

    /// The flag word of the header.
    flags: u16,

    /// The current maximum size of the message.
    ///
    /// This is reduced by reservations.
    max_size: usize,

    /// The origin for relative names.
    origin: Option<Name>,

    /// The name compression table.
    compress: CompressionTable,

    /// The section currently being written.
    section: Section,

    /// The number of entries in each section.
    counts: [u16; 4],

    /// The message.
    buf: BytesMut,

    /// The MAC of the last TSIG record added.
    mac: Bytes,

    /// The number of octets currently reserved.
    reserved: usize,

    /// Whether an OPT record with padding was added.
    was_padded: bool,

    /// The time to use for signing instead of the current time.
    signing_time: Option<Time48>,
}

/// # Creation and Access
///
impl Renderer {
    /// Creates a new renderer.
    ///
    /// If `id` is `None`, a random ID is chosen if the `rand` feature is
    /// enabled and zero is used otherwise. `flags` is the complete second
    /// word of the header. Relative names are made absolute with `origin`.
    ///
    /// The buffer starts out with a zeroed header which is only filled in
    /// by [`write_header`][Self::write_header].
    pub fn new(
        id: Option<u16>,
        flags: u16,
        max_size: usize,
        origin: Option<Name>,
    ) -> Self {
        let mut buf = BytesMut::with_capacity(512);
        buf.put_bytes(0, HeaderSection::LEN);
        Renderer {
            id: id.unwrap_or_else(Self::default_id),
            flags,
            max_size,
            origin,
            compress: CompressionTable::new(),
            section: Section::Question,
            counts: [0; 4],
            buf,
            mac: Bytes::new(),
            reserved: 0,
            was_padded: false,
            signing_time: None,
        }
    }

    #[cfg(feature = "rand")]
    fn default_id() -> u16 {
        ::rand::random()
    }

    #[cfg(not(feature = "rand"))]
    fn default_id() -> u16 {
        0
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    /// Replaces the flag word, e.g., to set the TC bit.
    ///
    /// The header only changes with the next call to
    /// [`write_header`][Self::write_header].
    pub fn set_flags(&mut self, flags: u16) {
        self.flags = flags
    }

    /// Returns the current maximum size, i.e., minus any reservation.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn origin(&self) -> Option<&Name> {
        self.origin.as_ref()
    }

    /// Returns the section currently being written.
    pub fn section(&self) -> Section {
        self.section
    }

    /// Returns the number of entries written to each section.
    pub fn counts(&self) -> [u16; 4] {
        self.counts
    }

    /// Returns the number of entries written to the given section.
    pub fn count(&self, section: Section) -> u16 {
        self.counts[section.index()]
    }

    /// Returns the name compression table.
    pub fn compression(&self) -> &CompressionTable {
        &self.compress
    }

    /// Returns the current length of the message.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns whether nothing beyond the header has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.len() == HeaderSection::LEN
    }

    /// Returns the number of octets currently reserved.
    pub fn reserved(&self) -> usize {
        self.reserved
    }

    /// Returns whether a padded OPT record was added.
    pub fn was_padded(&self) -> bool {
        self.was_padded
    }

    /// Returns the MAC of the last TSIG record added.
    ///
    /// This is empty if no TSIG record was added. A server uses the MAC of
    /// a request as the request MAC when signing the response.
    pub fn mac(&self) -> &Bytes {
        &self.mac
    }

    /// Fixes the time used when signing.
    ///
    /// With `None`, the current time is used which is also the default.
    pub fn set_signing_time(&mut self, time: Option<Time48>) {
        self.signing_time = time
    }
}

/// # Adding Content
///
impl Renderer {
    /// Moves on to the given section.
    ///
    /// This does nothing if `section` is the current section and fails if
    /// it is an earlier one.
    pub fn set_section(&mut self, section: Section) -> Result<(), RenderError> {
        if section < self.section {
            debug!(
                "cannot go back from the {} section to the {} section",
                self.section, section
            );
            return Err(RenderError::FormError);
        }
        self.section = section;
        Ok(())
    }

    /// Adds a question.
    pub fn add_question(
        &mut self,
        question: &Question,
    ) -> Result<(), RenderError> {
        self.set_section(Section::Question)?;
        self.transaction(Section::Question, |target, compress, origin| {
            question.compose(target, Some(compress), origin)?;
            Ok(1)
        })
    }

    /// Adds all records of a record set to the given section.
    pub fn add_rrset(
        &mut self,
        section: Section,
        rrset: &Rrset,
    ) -> Result<(), RenderError> {
        self.add_rrset_with(section, rrset, &ComposeOptions::default())
    }

    /// Adds all records of a record set using the given options.
    pub fn add_rrset_with(
        &mut self,
        section: Section,
        rrset: &Rrset,
        options: &ComposeOptions,
    ) -> Result<(), RenderError> {
        self.add_rdataset_with(section, rrset.name(), rrset.rdataset(), options)
    }

    /// Adds a record data set with the given owner to the given section.
    pub fn add_rdataset(
        &mut self,
        section: Section,
        owner: &Name,
        rdataset: &Rdataset,
    ) -> Result<(), RenderError> {
        self.add_rdataset_with(
            section,
            owner,
            rdataset,
            &ComposeOptions::default(),
        )
    }

    /// Adds a record data set using the given options.
    pub fn add_rdataset_with(
        &mut self,
        section: Section,
        owner: &Name,
        rdataset: &Rdataset,
        options: &ComposeOptions,
    ) -> Result<(), RenderError> {
        self.set_section(section)?;
        self.transaction(section, |target, compress, origin| {
            rdataset.compose(owner, target, Some(compress), origin, options)
        })
    }

    /// Adds an OPT record to the additional section.
    ///
    /// If `pad` is not zero, a padding option is added so that the length
    /// of the message becomes a multiple of `pad`. For this calculation,
    /// `opt_size` is the length of the OPT record including the header of
    /// the padding option, i.e., what [`OptRecord::padded_compose_len`]
    /// returns, and `tsig_size` is the length of a TSIG record that will be
    /// added later or zero if there is none.
    ///
    /// The OPT record should be the last record before a TSIG record.
    pub fn add_opt(
        &mut self,
        opt: &OptRecord,
        pad: usize,
        opt_size: usize,
        tsig_size: usize,
    ) -> Result<(), RenderError> {
        if pad == 0 {
            return self.add_rrset(Section::Additional, &opt.to_rrset());
        }
        if opt_size < OptRecord::BASE_LEN {
            return Err(RenderError::BadOptSize);
        }
        let remainder = (self.buf.len() + opt_size + tsig_size) % pad;
        let padding = if remainder == 0 { 0 } else { pad - remainder };
        let padding = u16::try_from(padding)
            .map_err(|_| RenderError::Compose(ComposeError::LongData))?;
        let opt = opt.with_option(EdnsOption::Padding(Padding::new(padding)));
        self.add_rrset(Section::Additional, &opt.to_rrset())?;
        self.was_padded = true;
        Ok(())
    }

    /// Adds an EDNS OPT record without padding.
    ///
    /// The version in bits 16 to 23 of `flags` is replaced with `version`.
    pub fn add_edns(
        &mut self,
        version: u8,
        flags: u32,
        payload: u16,
        options: Vec<EdnsOption>,
    ) -> Result<(), RenderError> {
        let opt = OptRecord::for_version(version, flags, payload, options);
        self.add_opt(&opt, 0, 0, 0)
    }

    /// Performs an addition to a section as a transaction.
    ///
    /// The closure returns the number of entries it has written. If it
    /// fails, the message grows too big, or the section count would
    /// overflow, the buffer and the compression table are rolled back.
    fn transaction<F>(
        &mut self,
        section: Section,
        op: F,
    ) -> Result<(), RenderError>
    where
        F: FnOnce(
            &mut BytesMut,
            &mut CompressionTable,
            Option<&Name>,
        ) -> Result<usize, ComposeError>,
    {
        let start = self.buf.len();
        let written =
            match op(&mut self.buf, &mut self.compress, self.origin.as_ref()) {
                Ok(written) => written,
                Err(err) => {
                    self.rollback(start);
                    debug!("adding to the {} section failed: {}", section, err);
                    return Err(err.into());
                }
            };
        if self.buf.len() > self.max_size {
            debug!(
                "adding to the {} section exceeds the maximum size of {} \
                 with {} octets, rolled back",
                section,
                self.max_size,
                self.buf.len()
            );
            self.rollback(start);
            return Err(RenderError::TooBig);
        }
        let count = u16::try_from(written)
            .ok()
            .and_then(|written| {
                self.counts[section.index()].checked_add(written)
            });
        match count {
            Some(count) => self.counts[section.index()] = count,
            None => {
                self.rollback(start);
                return Err(RenderError::CountOverflow);
            }
        }
        trace!(
            "added {} entries to the {} section, message now {} octets",
            written,
            section,
            self.buf.len()
        );
        Ok(())
    }

    /// Truncates the message and the compression table to `len` octets.
    fn rollback(&mut self, len: usize) {
        self.buf.truncate(len);
        self.compress.truncate(len);
    }
}

/// # Signing
///
impl Renderer {
    /// Adds a TSIG record signing the message.
    ///
    /// The header should have been written before. `keyname` becomes the
    /// owner of the record, `id` its original ID, and `algorithm` its
    /// algorithm name. `request_mac` is the MAC of the request when
    /// signing a response.
    #[allow(clippy::too_many_arguments)]
    pub fn add_tsig<K: SigningKey>(
        &mut self,
        keyname: &Name,
        key: &K,
        fudge: u16,
        id: u16,
        error: TsigRcode,
        other: Bytes,
        request_mac: Option<&[u8]>,
        algorithm: &Name,
    ) -> Result<(), RenderError> {
        let placeholder = Tsig::new(
            algorithm.clone(),
            Time48::default(),
            fudge,
            Bytes::new(),
            id,
            error,
            other,
        )?;
        let tsig = key.sign(
            &self.buf,
            &placeholder,
            self.signing_time(),
            request_mac,
        )?;
        self.write_tsig(keyname, &tsig)
    }

    /// Adds a TSIG record signing one message of a sequence.
    ///
    /// This works like [`add_tsig`][Self::add_tsig] except that the
    /// algorithm is the key’s and the signature covers all messages of the
    /// sequence up to this one. Pass `None` for `ctx` for the first
    /// message and the returned context for each following one.
    #[allow(clippy::too_many_arguments)]
    pub fn add_multi_tsig<K: SigningKey>(
        &mut self,
        ctx: Option<K::Context>,
        keyname: &Name,
        key: &K,
        fudge: u16,
        id: u16,
        error: TsigRcode,
        other: Bytes,
        request_mac: Option<&[u8]>,
    ) -> Result<K::Context, RenderError> {
        let placeholder = Tsig::new(
            key.algorithm_name(),
            Time48::default(),
            fudge,
            Bytes::new(),
            id,
            error,
            other,
        )?;
        let (tsig, ctx) = key.sign_multi(
            &self.buf,
            &placeholder,
            self.signing_time(),
            request_mac,
            ctx,
        )?;
        self.write_tsig(keyname, &tsig)?;
        Ok(ctx)
    }

    fn signing_time(&self) -> Time48 {
        self.signing_time.unwrap_or_else(Time48::now)
    }

    /// Writes the TSIG record and updates the ARCOUNT in the header.
    ///
    /// The key name is not compressed if the message was padded.
    fn write_tsig(
        &mut self,
        keyname: &Name,
        tsig: &Tsig,
    ) -> Result<(), RenderError> {
        self.set_section(Section::Additional)?;
        let compress_name = !self.was_padded;
        self.transaction(Section::Additional, |target, compress, origin| {
            let compress = if compress_name { Some(compress) } else { None };
            keyname.compose(target, compress, origin, false)?;
            Rtype::TSIG.compose(target);
            Class::ANY.compose(target);
            target.put_u32(0);
            compose_len_prefixed(target, |target| {
                tsig.compose_rdata(target, None, None, false)
            })?;
            Ok(1)
        })?;
        let arcount = self.counts[Section::Additional.index()];
        self.buf[HeaderSection::ARCOUNT_OFFSET..HeaderSection::LEN]
            .copy_from_slice(&arcount.to_be_bytes());
        self.mac = tsig.mac().clone();
        Ok(())
    }
}

/// # Finishing
///
impl Renderer {
    /// Writes the header section to the beginning of the message.
    ///
    /// This can be called at any time. Since a signature covers the
    /// header, it should be called before adding one.
    pub fn write_header(&mut self) {
        let header = HeaderSection::new(
            Header::from_parts(self.id, self.flags),
            self.counts,
        );
        self.buf[..HeaderSection::LEN].copy_from_slice(&header.to_octets());
    }

    /// Returns a copy of the message.
    pub fn get_wire(&self) -> Bytes {
        Bytes::copy_from_slice(&self.buf)
    }

    /// Returns a reference to the message.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Converts the renderer into the message.
    pub fn into_wire(self) -> Bytes {
        self.buf.freeze()
    }

    /// Reserves `size` octets at the end of the message.
    ///
    /// The maximum size is reduced by `size` until
    /// [`release_reserved`][Self::release_reserved] is called. This is
    /// used to keep room for a TSIG record while adding content.
    pub fn reserve(&mut self, size: usize) -> Result<(), RenderError> {
        if size > self.max_size {
            return Err(RenderError::BadReservation);
        }
        self.reserved += size;
        self.max_size -= size;
        Ok(())
    }

    /// Releases all reserved octets.
    pub fn release_reserved(&mut self) {
        self.max_size += self.reserved;
        self.reserved = 0;
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(None, 0, DEFAULT_MAX_SIZE, None)
    }
}

//------------ RenderError ---------------------------------------------------

/// An error happened while rendering a message.
///
/// Except for [`FormError`][Self::FormError], the renderer is unchanged
/// after an error and can still be used.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RenderError {
    /// An attempt was made to go back to an earlier section.
    FormError,

    /// The message would exceed its maximum size.
    TooBig,

    /// A section would contain more than 65535 entries.
    CountOverflow,

    /// More octets were to be reserved than are available.
    BadReservation,

    /// The OPT size given for padding is smaller than any OPT record.
    BadOptSize,

    /// Composing the data failed.
    Compose(ComposeError),
}

impl From<ComposeError> for RenderError {
    fn from(err: ComposeError) -> Self {
        RenderError::Compose(err)
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RenderError::FormError => f.write_str("section out of order"),
            RenderError::TooBig => f.write_str("message too big"),
            RenderError::CountOverflow => {
                f.write_str("too many entries in section")
            }
            RenderError::BadReservation => {
                f.write_str("cannot reserve more than the maximum size")
            }
            RenderError::BadOptSize => f.write_str("OPT size too small"),
            RenderError::Compose(ref err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for RenderError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::rdata::{Ns, A};

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    fn question(s: &str) -> Question {
        Question::new_in(name(s), Rtype::A)
    }

    #[test]
    fn sections_in_order() {
        let mut renderer = Renderer::new(Some(7), 0, 512, None);
        renderer.set_section(Section::Authority).unwrap();
        renderer.set_section(Section::Authority).unwrap();
        assert_eq!(
            renderer.add_question(&question("example.")),
            Err(RenderError::FormError)
        );
        assert_eq!(renderer.len(), 12);
        renderer.set_section(Section::Additional).unwrap();
        assert_eq!(renderer.section(), Section::Additional);
    }

    #[test]
    fn counts_and_header() {
        let mut renderer = Renderer::new(Some(0xBEEF), 0x8180, 512, None);
        renderer.add_question(&question("example.")).unwrap();
        let mut rrset =
            Rrset::new(name("example."), Class::IN, Rtype::A);
        rrset.add(A::from_octets(192, 0, 2, 1), Some(60)).unwrap();
        rrset.add(A::from_octets(192, 0, 2, 2), Some(60)).unwrap();
        renderer.add_rrset(Section::Answer, &rrset).unwrap();
        let empty = Rrset::new(name("example."), Class::IN, Rtype::NS);
        renderer.add_rrset(Section::Authority, &empty).unwrap();
        assert_eq!(renderer.counts(), [1, 2, 0, 0]);
        assert_eq!(&renderer.as_slice()[..12], &[0; 12]);
        renderer.write_header();
        assert_eq!(
            &renderer.as_slice()[..12],
            b"\xbe\xef\x81\x80\x00\x01\x00\x02\x00\x00\x00\x00"
        );
    }

    #[test]
    fn too_big_rolls_back() {
        let mut renderer = Renderer::new(Some(1), 0, 60, None);
        renderer.add_question(&question("example.")).unwrap();
        let len = renderer.len();
        let entries = renderer.compression().len();
        let mut rrset = Rrset::new(name("www.example."), Class::IN, Rtype::NS);
        for host in ["ns1.other.", "ns2.other.", "ns3.other."] {
            rrset.add(Ns::new(name(host)), Some(60)).unwrap();
        }
        assert_eq!(
            renderer.add_rrset(Section::Answer, &rrset),
            Err(RenderError::TooBig)
        );
        assert_eq!(renderer.len(), len);
        assert_eq!(renderer.compression().len(), entries);
        assert_eq!(renderer.count(Section::Answer), 0);
    }

    #[test]
    fn compose_error_rolls_back() {
        let mut renderer = Renderer::new(Some(1), 0, 512, None);
        let rrset = Rrset::from_rdata(
            name("www"),
            Class::IN,
            0,
            A::from_octets(192, 0, 2, 1).into(),
        );
        assert_eq!(
            renderer.add_rrset(Section::Answer, &rrset),
            Err(RenderError::Compose(ComposeError::NeedAbsoluteName))
        );
        assert_eq!(renderer.len(), 12);

        let mut renderer =
            Renderer::new(Some(1), 0, 512, Some(name("example.")));
        renderer.add_rrset(Section::Answer, &rrset).unwrap();
        assert_eq!(renderer.count(Section::Answer), 1);
    }

    #[test]
    fn reservation() {
        let mut renderer = Renderer::new(Some(1), 0, 512, None);
        assert_eq!(renderer.reserve(513), Err(RenderError::BadReservation));
        assert_eq!(renderer.max_size(), 512);
        renderer.reserve(100).unwrap();
        renderer.reserve(12).unwrap();
        assert_eq!(renderer.max_size(), 400);
        assert_eq!(renderer.reserved(), 112);
        renderer.release_reserved();
        assert_eq!(renderer.max_size(), 512);
        assert_eq!(renderer.reserved(), 0);
    }

    #[test]
    fn edns_and_padding() {
        let mut renderer = Renderer::new(Some(1), 0, 512, None);
        renderer.add_question(&question("a.")).unwrap();
        let opt = OptRecord::for_version(0, 0, DEFAULT_EDNS_PAYLOAD, vec![]);
        assert_eq!(
            renderer.add_opt(&opt, 128, 4, 0),
            Err(RenderError::BadOptSize)
        );
        renderer
            .add_opt(&opt, 128, opt.padded_compose_len(), 0)
            .unwrap();
        assert!(renderer.was_padded());
        assert_eq!(renderer.len(), 128);
        assert_eq!(renderer.count(Section::Additional), 1);

        let mut renderer = Renderer::new(Some(1), 0, 512, None);
        renderer.add_edns(0, 0x0005_8000, 4096, vec![]).unwrap();
        assert!(!renderer.was_padded());
        assert_eq!(
            &renderer.as_slice()[12..],
            b"\x00\x00\x29\x10\x00\x00\x00\x80\x00\x00\x00"
        );
    }
}
