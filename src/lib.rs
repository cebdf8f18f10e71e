//! Handling of data in Distinguished Encoding Rules.
//!
//! This crate encodes and decodes a subset of ASN.1 in DER: BOOLEAN,
//! INTEGER, ENUMERATED, NULL, REAL, UTF8String, IA5String, and SEQUENCE
//! values built from them. Only single-octet identifiers and definite
//! lengths are supported.
//!
//! Large INTEGER values are represented by [`Natural`], an
//! arbitrary-precision natural number with the arithmetic and bitwise
//! operations needed for handling key material.
//!
//! Encoding happens through value encoders implementing
//! [`encode::Values`]. Types encoded as a single primitive value implement
//! [`encode::PrimitiveContent`] and gain an `encode` method:
//!
//! ```
//! use natder::encode::{PrimitiveContent, Values};
//!
//! assert_eq!(true.encode().to_vec(), b"\x01\x01\xFF");
//! assert_eq!(
//!     natder::encode::sequence((5i64.encode(), ().encode())).to_vec(),
//!     b"\x30\x05\x02\x01\x05\x05\x00"
//! );
//! ```
//!
//! Decoding starts with a [`decode::SliceSource`]:
//!
//! ```
//! use natder::decode::SliceSource;
//!
//! let mut source = SliceSource::new(b"\x02\x02\x00\x80\x09\x00");
//! assert_eq!(source.take_i64().unwrap(), 128);
//! assert_eq!(source.take_real().unwrap(), 0.);
//! assert!(source.is_exhausted());
//! ```
//!
//! Types encoded as a SEQUENCE with a fixed set of fields implement the
//! [`Sequence`] trait.

pub use self::ident::{Class, Ident, PrimitiveKind, Tag, UnsupportedTagForm};
pub use self::int::Enumerated;
pub use self::length::Length;
pub use self::natural::Natural;
pub use self::real::{Base, Real};
pub use self::sequence::Sequence;
pub use self::string::{Ia5String, Utf8String};

#[macro_use] pub mod debug;

pub mod decode;
pub mod encode;

pub mod int;
pub mod natural;
pub mod real;
pub mod sequence;
pub mod string;

mod ident;
mod length;
