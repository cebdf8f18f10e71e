//! User-defined SEQUENCE types.
//!
//! A type that is encoded as a SEQUENCE of a fixed number of fields
//! implements the [`Sequence`] trait by describing how each of its fields
//! is measured, written, and read. The trait then provides the encoding
//! and decoding of the complete SEQUENCE value.
//!
//! ```
//! use natder::{Natural, Sequence};
//! use natder::decode::{DecodeError, SliceSource};
//! use natder::encode::{PrimitiveContent, Target, Values};
//!
//! #[derive(Default)]
//! struct Key {
//!     version: i64,
//!     modulus: Natural,
//! }
//!
//! impl Sequence for Key {
//!     const FIELD_COUNT: usize = 2;
//!
//!     fn field_len(&self, index: usize) -> usize {
//!         match index {
//!             0 => self.version.encode().encoded_len(),
//!             _ => self.modulus.encode().encoded_len(),
//!         }
//!     }
//!
//!     fn write_field<T: Target>(
//!         &self, index: usize, target: &mut T
//!     ) -> Result<(), T::Error> {
//!         match index {
//!             0 => self.version.encode().write_encoded(target),
//!             _ => self.modulus.encode().write_encoded(target),
//!         }
//!     }
//!
//!     fn take_field(
//!         &mut self, index: usize, source: &mut SliceSource
//!     ) -> Result<(), DecodeError> {
//!         match index {
//!             0 => self.version = source.take_i64()?,
//!             _ => self.modulus = source.take_natural()?,
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let key = Key { version: 1, modulus: Natural::from(0xC0FFEEu64) };
//! let octets = key.to_octets();
//! assert_eq!(octets.len(), key.span());
//!
//! let decoded = Key::from_octets(&mut SliceSource::new(&octets)).unwrap();
//! assert_eq!(decoded.modulus, key.modulus);
//! ```

use crate::decode::{DecodeError, SliceSource};
use crate::encode::{ShortBuf, Target, Values, total_len, write_header};
use crate::ident::Tag;


//------------ Sequence ------------------------------------------------------

/// A type encoded as a SEQUENCE with a fixed number of fields.
///
/// Fields are identified by their index from zero up to, but excluding,
/// [`FIELD_COUNT`][Self::FIELD_COUNT]. They are encoded and decoded in
/// index order.
pub trait Sequence {
    /// The number of fields in the sequence.
    const FIELD_COUNT: usize;

    /// Returns the encoded length of the field with the given index.
    ///
    /// This is the complete length of the encoded field including its
    /// identifier and length octets.
    fn field_len(&self, index: usize) -> usize;

    /// Writes the encoded field with the given index to a target.
    fn write_field<T: Target>(
        &self, index: usize, target: &mut T
    ) -> Result<(), T::Error>;

    /// Takes the field with the given index from a source.
    ///
    /// The source covers the content of the SEQUENCE value and is
    /// positioned at the start of the field.
    fn take_field(
        &mut self, index: usize, source: &mut SliceSource
    ) -> Result<(), DecodeError>;


    //--- Provided methods

    /// Returns the length of the content of the SEQUENCE value.
    fn content_len(&self) -> usize {
        (0..Self::FIELD_COUNT).map(|index| self.field_len(index)).sum()
    }

    /// Returns the length of the complete encoded SEQUENCE value.
    fn span(&self) -> usize {
        total_len(Tag::SEQUENCE, self.content_len())
    }

    /// Returns a value encoder for the sequence.
    fn encode(&self) -> SequenceEncoder<'_, Self> {
        SequenceEncoder { seq: self }
    }

    /// Returns the encoded sequence in a newly allocated vec.
    fn to_octets(&self) -> Vec<u8> {
        self.encode().to_vec()
    }

    /// Writes the encoded sequence into a buffer starting at `offset`.
    ///
    /// Returns the offset just past the sequence.
    fn into_buffer(
        &self, buf: &mut [u8], offset: usize
    ) -> Result<usize, ShortBuf> {
        self.encode().write_into(buf, offset)
    }

    /// Takes the fields of a SEQUENCE value from a source.
    ///
    /// The source must be positioned at the identifier octet of the
    /// SEQUENCE. If decoding fails, the source is left unchanged but the
    /// fields decoded so far have been replaced.
    fn take_fields_from(
        &mut self, source: &mut SliceSource
    ) -> Result<(), DecodeError> {
        source.take_constructed_if(Tag::SEQUENCE, |cons| {
            (0..Self::FIELD_COUNT).try_for_each(|index| {
                self.take_field(index, cons)
            })
        })
    }

    /// Creates a value from an encoded SEQUENCE at the start of a source.
    fn from_octets(source: &mut SliceSource) -> Result<Self, DecodeError>
    where Self: Default {
        let mut res = Self::default();
        res.take_fields_from(source)?;
        Ok(res)
    }
}


//------------ SequenceEncoder -----------------------------------------------

/// A value encoder for a [`Sequence`].
pub struct SequenceEncoder<'a, S: ?Sized> {
    seq: &'a S,
}

impl<S: Sequence + ?Sized> Values for SequenceEncoder<'_, S> {
    fn encoded_len(&self) -> usize {
        self.seq.span()
    }

    fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        write_header(target, Tag::SEQUENCE, true, self.seq.content_len())?;
        (0..S::FIELD_COUNT).try_for_each(|index| {
            self.seq.write_field(index, target)
        })
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::decode::ErrorKind;
    use crate::encode::PrimitiveContent;
    use crate::length::Length;
    use crate::natural::Natural;
    use crate::real::Real;
    use crate::string::Ia5String;
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Record {
        id: i64,
        name: Ia5String,
        active: bool,
        key: Natural,
        weight: f64,
    }

    impl Sequence for Record {
        const FIELD_COUNT: usize = 5;

        fn field_len(&self, index: usize) -> usize {
            match index {
                0 => self.id.encode().encoded_len(),
                1 => self.name.encode().encoded_len(),
                2 => self.active.encode().encoded_len(),
                3 => self.key.encode().encoded_len(),
                _ => Real::new(self.weight).encode().encoded_len(),
            }
        }

        fn write_field<T: Target>(
            &self, index: usize, target: &mut T
        ) -> Result<(), T::Error> {
            match index {
                0 => self.id.encode().write_encoded(target),
                1 => self.name.encode().write_encoded(target),
                2 => self.active.encode().write_encoded(target),
                3 => self.key.encode().write_encoded(target),
                _ => Real::new(self.weight).encode().write_encoded(target),
            }
        }

        fn take_field(
            &mut self, index: usize, source: &mut SliceSource
        ) -> Result<(), DecodeError> {
            match index {
                0 => self.id = source.take_i64()?,
                1 => self.name = source.take_ia5_string()?,
                2 => self.active = source.take_bool()?,
                3 => self.key = source.take_natural()?,
                _ => self.weight = source.take_real()?,
            }
            Ok(())
        }
    }

    fn record() -> Record {
        Record {
            id: -42,
            name: "device".parse().unwrap(),
            active: true,
            key: Natural::from_str_radix(
                "C0FFEE0123456789ABCDEF0123456789", 16
            ).unwrap(),
            weight: 100.25,
        }
    }

    #[test]
    fn span() {
        let rec = record();
        let content = rec.content_len();
        assert_eq!(
            rec.span(),
            1 + Length::new(content).encoded_len() + content
        );
        assert_eq!(rec.to_octets().len(), rec.span());
    }

    #[test]
    fn round_trip() {
        let rec = record();
        let octets = rec.to_octets();
        assert_eq!(&octets[..2], &[0x30, rec.content_len() as u8]);
        let mut source = SliceSource::new(&octets);
        let decoded = Record::from_octets(&mut source).unwrap();
        assert!(source.is_exhausted());
        assert_eq!(decoded, rec);
    }

    #[test]
    fn write_into_buffer() {
        let rec = record();
        let mut buf = vec![0u8; rec.span() + 3];
        assert_eq!(rec.into_buffer(&mut buf, 3).unwrap(), buf.len());
        assert_eq!(&buf[3..], rec.to_octets().as_slice());
        assert!(rec.into_buffer(&mut buf, 4).is_err());
    }

    #[test]
    fn long_sequence() {
        let mut rec = record();
        rec.name = "n".repeat(200).parse().unwrap();
        let octets = rec.to_octets();
        assert_eq!(octets[1], 0x81);
        assert_eq!(octets.len(), rec.span());
        let decoded = Record::from_octets(
            &mut SliceSource::new(&octets)
        ).unwrap();
        assert_eq!(decoded.name, rec.name);
    }

    #[test]
    fn decode_errors() {
        let octets = record().to_octets();

        // Missing the last field.
        let mut short = octets.clone();
        short.truncate(octets.len() - 6);
        short[1] -= 6;
        let err = Record::from_octets(
            &mut SliceSource::new(&short)
        ).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEnd);

        // Extra content at the end.
        let mut long = octets.clone();
        long.extend_from_slice(b"\x05\x00");
        long[1] += 2;
        let err = Record::from_octets(
            &mut SliceSource::new(&long)
        ).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TrailingData);

        // Not a sequence.
        let err = Record::from_octets(
            &mut SliceSource::new(b"\x31\x00")
        ).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::UnexpectedTag { expected: 0x30, found: 0x31 }
        );
    }
}
