//! Macros for use in rdata definitions.
//!
//! These macros are not public but are used by the super module only. This
//! is why `#[macro_use]` is in `super::mod`.

//------------ rdata_types! --------------------------------------------------

/// Creates the [`RecordData`] enum over all known record data types.
///
/// The types are given grouped by the module they are defined in. Each of
/// them needs to have an associated constant `RTYPE` and implement
/// [`ParseRecordData`] and [`ComposeRecordData`] as well as `Display`.
///
/// Besides those, the enum has variants for the OPT pseudo-record and for
/// all record types without a dedicated type.
macro_rules! rdata_types {
    ( $(
        $module:ident::{ $( $mtype:ident ),* $(,)? }
    )* ) => {
        $(
            pub use self::$module::{ $( $mtype ),* };
        )*

        //------------- RecordData -------------------------------------------

        /// Record data of any type.
        ///
        /// This is a closed set of the record data types this crate knows
        /// how to compose and parse. Record data of all other types is kept
        /// as raw octets in the `Unknown` variant.
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        pub enum RecordData {
            $( $(
                $mtype($mtype),
            )* )*
            Opt($crate::base::opt::Opt),
            Unknown(UnknownRecordData),
        }

        impl RecordData {
            /// Parses record data of the given type.
            ///
            /// The parser has to be positioned at the start of the record
            /// data and cover the whole message so that compressed names
            /// can be followed. Exactly `rdlen` octets have to be consumed
            /// by the record data.
            pub fn parse(
                rtype: $crate::base::iana::Rtype,
                parser: &mut $crate::base::wire::Parser<'_>,
                rdlen: usize,
            ) -> Result<Self, $crate::base::wire::ParseError> {
                if parser.remaining() < rdlen {
                    return Err($crate::base::wire::ParseError::ShortInput)
                }
                let end = parser.pos() + rdlen;
                let res = match rtype {
                    $( $(
                        $mtype::RTYPE => {
                            RecordData::$mtype(
                                $mtype::parse_rdata(parser, rdlen)?
                            )
                        }
                    )* )*
                    $crate::base::iana::Rtype::OPT => {
                        RecordData::Opt(
                            $crate::base::opt::Opt::parse_rdata(
                                parser, rdlen
                            )?
                        )
                    }
                    _ => {
                        RecordData::Unknown(
                            UnknownRecordData::parse(rtype, parser, rdlen)?
                        )
                    }
                };
                if parser.pos() != end {
                    return Err($crate::base::wire::ParseError::form_error(
                        "record data length mismatch"
                    ))
                }
                Ok(res)
            }
        }

        //--- ComposeRecordData

        impl ComposeRecordData for RecordData {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                match *self {
                    $( $(
                        RecordData::$mtype(ref inner) => inner.rtype(),
                    )* )*
                    RecordData::Opt(ref inner) => inner.rtype(),
                    RecordData::Unknown(ref inner) => inner.rtype(),
                }
            }

            fn compose_rdata(
                &self,
                target: &mut bytes::BytesMut,
                compress: Option<&mut $crate::base::name::CompressionTable>,
                origin: Option<&$crate::base::name::Name>,
                canonical: bool,
            ) -> Result<(), $crate::base::wire::ComposeError> {
                match *self {
                    $( $(
                        RecordData::$mtype(ref inner) => {
                            inner.compose_rdata(
                                target, compress, origin, canonical
                            )
                        }
                    )* )*
                    RecordData::Opt(ref inner) => {
                        inner.compose_rdata(
                            target, compress, origin, canonical
                        )
                    }
                    RecordData::Unknown(ref inner) => {
                        inner.compose_rdata(
                            target, compress, origin, canonical
                        )
                    }
                }
            }
        }

        //--- From

        $( $(
            impl From<$mtype> for RecordData {
                fn from(value: $mtype) -> Self {
                    RecordData::$mtype(value)
                }
            }
        )* )*

        impl From<$crate::base::opt::Opt> for RecordData {
            fn from(value: $crate::base::opt::Opt) -> Self {
                RecordData::Opt(value)
            }
        }

        impl From<UnknownRecordData> for RecordData {
            fn from(value: UnknownRecordData) -> Self {
                RecordData::Unknown(value)
            }
        }

        //--- Display

        impl core::fmt::Display for RecordData {
            fn fmt(
                &self, f: &mut core::fmt::Formatter
            ) -> core::fmt::Result {
                match *self {
                    $( $(
                        RecordData::$mtype(ref inner) => {
                            core::fmt::Display::fmt(inner, f)
                        }
                    )* )*
                    RecordData::Opt(ref inner) => {
                        core::fmt::Display::fmt(inner, f)
                    }
                    RecordData::Unknown(ref inner) => {
                        core::fmt::Display::fmt(inner, f)
                    }
                }
            }
        }
    }
}

//------------ name_type! ----------------------------------------------------

/// A macro for implementing a record data type with a single domain name.
///
/// Implements some basic methods plus the `ParseRecordData`,
/// `ComposeRecordData`, and `Display` traits. The name is compressed when
/// composing.
macro_rules! name_type {
    ( $(#[$attr:meta])* (
        $target:ident, $rtype:ident, $field:ident, $into_field:ident
    ) ) => {
        $(#[$attr])*
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        pub struct $target {
            $field: $crate::base::name::Name,
        }

        impl $target {
            pub const RTYPE: $crate::base::iana::Rtype =
                $crate::base::iana::Rtype::$rtype;

            pub fn new($field: $crate::base::name::Name) -> Self {
                $target { $field }
            }

            pub fn $field(&self) -> &$crate::base::name::Name {
                &self.$field
            }

            pub fn $into_field(self) -> $crate::base::name::Name {
                self.$field
            }
        }

        //--- ParseRecordData and ComposeRecordData

        impl $crate::rdata::ParseRecordData for $target {
            fn parse_rdata(
                parser: &mut $crate::base::wire::Parser<'_>,
                _rdlen: usize,
            ) -> Result<Self, $crate::base::wire::ParseError> {
                $crate::base::name::Name::parse(parser).map(Self::new)
            }
        }

        impl $crate::rdata::ComposeRecordData for $target {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                Self::RTYPE
            }

            fn compose_rdata(
                &self,
                target: &mut bytes::BytesMut,
                compress: Option<&mut $crate::base::name::CompressionTable>,
                origin: Option<&$crate::base::name::Name>,
                canonical: bool,
            ) -> Result<(), $crate::base::wire::ComposeError> {
                self.$field.compose(target, compress, origin, canonical)
            }
        }

        //--- Display

        impl core::fmt::Display for $target {
            fn fmt(
                &self, f: &mut core::fmt::Formatter
            ) -> core::fmt::Result {
                write!(f, "{}", self.$field)
            }
        }
    }
}
