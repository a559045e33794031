//! Building DNS wire-format messages.
//!
//! This crate provides the pieces needed to assemble a binary DNS message
//! step by step under a hard size limit. The centre piece is the
//! [`Renderer`][base::renderer::Renderer], a builder that writes the
//! question, answer, authority, and additional sections strictly in order,
//! compresses domain names, rolls back any write that would exceed the
//! maximum message size, pads messages via EDNS, and signs them with TSIG –
//! either individually or as a chained sequence such as a zone transfer.
//!
//! # Modules
//!
//! * [base] contains the fundamental types: domain names, IANA values,
//!   questions and records, the renderer, the ordered set used for record
//!   sets, frozen values, and RFC 1982 serial numbers,
//! * [rdata] contains the closed set of record data types the renderer
//!   knows how to compose and parse, and
//! * [tsig] contains keys, signing, and validation of transaction
//!   signatures.
//!
//! # Reference of Feature Flags
//!
//! * `rand`: Messages created without an explicit ID get a random one.
//!   This feature is enabled by default.
//! * `serde`: Enables serialization of serial numbers, TSIG time stamps,
//!   and the IANA types via [serde](https://serde.rs/).
//! * `logging`: Adds the `logging` module with a helper that installs a
//!   [tracing](https://github.com/tokio-rs/tracing) subscriber.
#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;
pub mod rdata;
pub mod tsig;
