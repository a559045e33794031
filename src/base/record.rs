//! Resource records and record sets.
//!
//! This module defines types and traits related to DNS resource records.
//! [`Record`] is a single resource record as found in a message.
//! [`Rdataset`] is a set of record data of the same type and class sharing
//! a TTL and [`Rrset`] adds the owner name to it.
//!
//! Record sets are built atop [`OrderedSet`] and implement [`SetAlgebra`],
//! so they preserve the order in which record data was first added and
//! support the usual set operations. The record data itself is kept as
//! [`Frozen`] values so it can be shared between sets without copying.

use super::frozen::Frozen;
use super::iana::{Class, Rtype};
use super::name::{CompressionTable, Name};
use super::set::{OrderedSet, SetAlgebra};
use super::wire::{compose_len_prefixed, ComposeError, ParseError, Parser};
use crate::rdata::{ComposeRecordData, RecordData};
use bytes::{BufMut, BytesMut};
use core::fmt;

//------------ ComposeOptions ------------------------------------------------

/// Options for composing records.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ComposeOptions {
    /// Produce the canonical form of RFC 4034.
    ///
    /// Owner names and the names embedded in record data of types that
    /// call for it are written in lower case. No name is compressed and
    /// none is entered into the compression table.
    pub canonical: bool,

    /// Use this class instead of the record set’s class.
    pub override_class: Option<Class>,
}

impl ComposeOptions {
    /// Returns options for the canonical form.
    pub fn canonical() -> Self {
        ComposeOptions {
            canonical: true,
            override_class: None,
        }
    }

    /// Returns a copy of the options with the class overridden.
    #[must_use]
    pub fn with_class(self, class: Class) -> Self {
        ComposeOptions {
            override_class: Some(class),
            ..self
        }
    }
}

//------------ Record --------------------------------------------------------

/// A DNS resource record.
///
/// All information available through the DNS is stored in resource records.
/// They have a three part key of a domain name, resource record type, and
/// class. Data is arranged in a tree which is navigated using the domain
/// name. Each node in the tree carries a label, starting with the root
/// label as the top-most node. The tree is traversed by stepping through the
/// name from right to left, finding a child node carring the label of each
/// step.
///
/// A record also carries a time-to-live, the number of seconds the record
/// may be cached, and its data.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Record {
    owner: Name,
    class: Class,
    ttl: u32,
    data: Frozen<RecordData>,
}

impl Record {
    /// Creates a new record from its parts.
    pub fn new(
        owner: Name,
        class: Class,
        ttl: u32,
        data: impl Into<Frozen<RecordData>>,
    ) -> Self {
        Record {
            owner,
            class,
            ttl,
            data: data.into(),
        }
    }

    /// Returns a reference to the owner domain name.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype {
        self.data.rtype()
    }

    /// Returns the record class.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the record’s time-to-live.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Return a reference to the record data.
    pub fn data(&self) -> &RecordData {
        &self.data
    }

    /// Returns the shared record data.
    pub fn frozen_data(&self) -> &Frozen<RecordData> {
        &self.data
    }

    /// Parses a record from a message.
    pub fn parse(parser: &mut Parser<'_>) -> Result<Self, ParseError> {
        let owner = Name::parse(parser)?;
        let rtype = Rtype::parse(parser)?;
        let class = Class::parse(parser)?;
        let ttl = parser.parse_u32_be()?;
        let rdlen = parser.parse_u16_be()?;
        let data = RecordData::parse(rtype, parser, usize::from(rdlen))?;
        Ok(Record::new(owner, class, ttl, data))
    }

    /// Appends the record to a message being built.
    pub fn compose(
        &self,
        target: &mut BytesMut,
        mut compress: Option<&mut CompressionTable>,
        origin: Option<&Name>,
        options: &ComposeOptions,
    ) -> Result<(), ComposeError> {
        compose_record(
            &self.owner,
            options.override_class.unwrap_or(self.class),
            self.ttl,
            &self.data,
            target,
            &mut compress,
            origin,
            options.canonical,
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.owner,
            self.ttl,
            self.class,
            self.rtype(),
            self.data
        )
    }
}

/// Composes a single record.
///
/// The canonical form is always written without compression.
///
/// On error, the target may contain a partial record.
#[allow(clippy::too_many_arguments)]
fn compose_record(
    owner: &Name,
    class: Class,
    ttl: u32,
    data: &RecordData,
    target: &mut BytesMut,
    compress: &mut Option<&mut CompressionTable>,
    origin: Option<&Name>,
    canonical: bool,
) -> Result<(), ComposeError> {
    if canonical {
        *compress = None;
    }
    owner.compose(target, compress.as_deref_mut(), origin, canonical)?;
    data.rtype().compose(target);
    class.compose(target);
    target.put_u32(ttl);
    compose_len_prefixed(target, |target| {
        data.compose_rdata(target, compress.as_deref_mut(), origin, canonical)
    })
}

//------------ Rdataset ------------------------------------------------------

/// A set of record data of the same type and class.
///
/// All members share a single TTL. Adding record data with a TTL lowers the
/// set’s TTL if the new one is smaller. Record data of a different type
/// can’t become a member.
///
/// Two record data sets are equal if their type, class, and members are
/// equal. The TTL and the order of the members are ignored.
#[derive(Clone, Debug)]
pub struct Rdataset {
    rtype: Rtype,
    class: Class,
    ttl: u32,
    rdatas: OrderedSet<Frozen<RecordData>>,
}

impl Rdataset {
    /// Creates a new, empty record data set.
    pub fn new(class: Class, rtype: Rtype) -> Self {
        Rdataset {
            rtype,
            class,
            ttl: 0,
            rdatas: OrderedSet::new(),
        }
    }

    /// Creates a record data set with a single member.
    pub fn from_rdata(class: Class, ttl: u32, data: RecordData) -> Self {
        let mut res = Self::new(class, data.rtype());
        res.ttl = ttl;
        res.rdatas.add(data.into());
        res
    }

    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.rdatas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rdatas.is_empty()
    }

    /// Returns an iterator over the members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Frozen<RecordData>> + '_ {
        self.rdatas.iter()
    }

    /// Returns the member at the given position.
    pub fn get(&self, index: usize) -> Option<&Frozen<RecordData>> {
        self.rdatas.get(index)
    }

    /// Updates the TTL.
    ///
    /// An empty set takes the TTL as is, otherwise it is only ever
    /// lowered.
    pub fn update_ttl(&mut self, ttl: u32) {
        if self.rdatas.is_empty() || ttl < self.ttl {
            self.ttl = ttl
        }
    }

    /// Adds record data to the set.
    ///
    /// If `ttl` is given, the set’s TTL is updated via
    /// [`update_ttl`][Self::update_ttl]. Returns whether the data was new.
    pub fn add(
        &mut self,
        data: impl Into<RecordData>,
        ttl: Option<u32>,
    ) -> Result<bool, RecordError> {
        self.add_frozen(Frozen::new(data.into()), ttl)
    }

    /// Adds already frozen record data to the set.
    pub fn add_frozen(
        &mut self,
        data: Frozen<RecordData>,
        ttl: Option<u32>,
    ) -> Result<bool, RecordError> {
        self.check(&data)?;
        if let Some(ttl) = ttl {
            self.update_ttl(ttl);
        }
        Ok(self.rdatas.add(data))
    }

    /// Returns whether the two sets have the same type and class.
    pub fn matches(&self, other: &Rdataset) -> bool {
        self.rtype == other.rtype && self.class == other.class
    }

    /// Appends one record per member to a message being built.
    ///
    /// Each record consists of the owner name, type, class, TTL and the
    /// length-prefixed record data. Returns the number of records written.
    /// An empty set writes nothing.
    ///
    /// On error, the target may contain partial data. Callers are
    /// expected to truncate it.
    pub fn compose(
        &self,
        owner: &Name,
        target: &mut BytesMut,
        mut compress: Option<&mut CompressionTable>,
        origin: Option<&Name>,
        options: &ComposeOptions,
    ) -> Result<usize, ComposeError> {
        let class = options.override_class.unwrap_or(self.class);
        for data in self.rdatas.iter() {
            compose_record(
                owner,
                class,
                self.ttl,
                data,
                target,
                &mut compress,
                origin,
                options.canonical,
            )?;
        }
        Ok(self.rdatas.len())
    }

    /// Writes the members in presentation format with the given owner.
    pub fn fmt_with_owner(
        &self,
        owner: &Name,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        for (i, data) in self.rdatas.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(
                f,
                "{}\t{}\t{}\t{}\t{}",
                owner, self.ttl, self.class, self.rtype, data
            )?;
        }
        Ok(())
    }
}

//--- SetAlgebra

impl SetAlgebra for Rdataset {
    type Item = Frozen<RecordData>;
    type Error = RecordError;

    fn as_set(&self) -> &OrderedSet<Self::Item> {
        &self.rdatas
    }

    fn as_set_mut(&mut self) -> &mut OrderedSet<Self::Item> {
        &mut self.rdatas
    }

    fn check(&self, item: &Self::Item) -> Result<(), RecordError> {
        if item.rtype() == self.rtype {
            Ok(())
        } else {
            Err(RecordError::IncompatibleTypes)
        }
    }
}

//--- PartialEq and Eq

impl PartialEq for Rdataset {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other) && self.rdatas == other.rdatas
    }
}

impl Eq for Rdataset {}

//--- Display

impl fmt::Display for Rdataset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_with_owner(&Name::empty(), f)
    }
}

//------------ Rrset ---------------------------------------------------------

/// A record set: record data of the same type and class under one owner.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rrset {
    name: Name,
    rdataset: Rdataset,
}

impl Rrset {
    /// Creates a new, empty record set.
    pub fn new(name: Name, class: Class, rtype: Rtype) -> Self {
        Rrset {
            name,
            rdataset: Rdataset::new(class, rtype),
        }
    }

    /// Creates a record set with a single member.
    pub fn from_rdata(
        name: Name,
        class: Class,
        ttl: u32,
        data: RecordData,
    ) -> Self {
        Rrset {
            name,
            rdataset: Rdataset::from_rdata(class, ttl, data),
        }
    }

    /// Creates a record set from a name and a record data set.
    pub fn from_rdataset(name: Name, rdataset: Rdataset) -> Self {
        Rrset { name, rdataset }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn rdataset(&self) -> &Rdataset {
        &self.rdataset
    }

    pub fn into_rdataset(self) -> Rdataset {
        self.rdataset
    }

    pub fn rtype(&self) -> Rtype {
        self.rdataset.rtype()
    }

    pub fn class(&self) -> Class {
        self.rdataset.class()
    }

    pub fn ttl(&self) -> u32 {
        self.rdataset.ttl()
    }

    pub fn len(&self) -> usize {
        self.rdataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rdataset.is_empty()
    }

    /// Adds record data to the set.
    ///
    /// See [`Rdataset::add`] for details.
    pub fn add(
        &mut self,
        data: impl Into<RecordData>,
        ttl: Option<u32>,
    ) -> Result<bool, RecordError> {
        self.rdataset.add(data, ttl)
    }

    /// Returns an iterator over the members as individual records.
    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        self.rdataset.iter().map(move |data| Record {
            owner: self.name.clone(),
            class: self.rdataset.class,
            ttl: self.rdataset.ttl,
            data: data.clone(),
        })
    }

    /// Appends one record per member to a message being built.
    ///
    /// See [`Rdataset::compose`] for details.
    pub fn compose(
        &self,
        target: &mut BytesMut,
        compress: Option<&mut CompressionTable>,
        origin: Option<&Name>,
        options: &ComposeOptions,
    ) -> Result<usize, ComposeError> {
        self.rdataset
            .compose(&self.name, target, compress, origin, options)
    }
}

//--- SetAlgebra

impl SetAlgebra for Rrset {
    type Item = Frozen<RecordData>;
    type Error = RecordError;

    fn as_set(&self) -> &OrderedSet<Self::Item> {
        self.rdataset.as_set()
    }

    fn as_set_mut(&mut self) -> &mut OrderedSet<Self::Item> {
        self.rdataset.as_set_mut()
    }

    fn check(&self, item: &Self::Item) -> Result<(), RecordError> {
        self.rdataset.check(item)
    }
}

//--- Display

impl fmt::Display for Rrset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.rdataset.fmt_with_owner(&self.name, f)
    }
}

//------------ RecordError ---------------------------------------------------

/// Record data could not be added to a set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecordError {
    /// The record data is of a different type than the set.
    IncompatibleTypes,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RecordError::IncompatibleTypes => {
                f.write_str("record data of incompatible type")
            }
        }
    }
}

impl std::error::Error for RecordError {}

//============ Testing =======================================================
