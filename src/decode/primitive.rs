//! Decoding primitive values.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use crate::ident::Tag;
use crate::natural::Natural;
use crate::string::{Ia5String, Utf8String};
use crate::{int, real};
use super::error::{DecodeError, ErrorKind};
use super::source::Pos;


//------------ Primitive -----------------------------------------------------

/// The content of a primitive value for decoding.
///
/// This type provides access to the contents octets. When processing the
/// value, you need to read all contents octets. If you don’t, the method
/// processing the value will produce a “trailing data” error.
#[derive(Clone, Debug)]
pub struct Primitive<'a> {
    /// The content octets not yet consumed.
    content: &'a [u8],

    /// The tag of the value.
    tag: Tag,

    /// The position of the first content octet not yet consumed.
    offset: usize,
}

impl<'a> Primitive<'a> {
    /// Creates a new primitive from its content starting at `offset`.
    pub(super) fn new(content: &'a [u8], tag: Tag, offset: usize) -> Self {
        Primitive { content, tag, offset }
    }

    /// Returns the tag of the value.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Returns the current position.
    pub fn pos(&self) -> Pos {
        self.offset.into()
    }

    /// Returns the content octets not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        self.content
    }

    /// Produces an error of the given kind at the current position.
    pub fn content_err(&self, kind: ErrorKind) -> DecodeError {
        DecodeError::new(kind, self.pos())
    }

    /// Checks that all content octets have been consumed.
    ///
    /// Returns a “trailing data” error if there are remaining octets.
    pub fn check_exhausted(&self) -> Result<(), DecodeError> {
        if !self.content.is_empty() {
            xerr!(Err(self.content_err(ErrorKind::TrailingData)))
        }
        else {
            Ok(())
        }
    }

    /// Takes a single octet from the content.
    pub fn take_u8(&mut self) -> Result<u8, DecodeError> {
        match self.content.split_first() {
            Some((&res, tail)) => {
                self.content = tail;
                self.offset += 1;
                Ok(res)
            }
            None => xerr!(Err(self.content_err(ErrorKind::UnexpectedEnd)))
        }
    }

    /// Takes all remaining content octets.
    pub fn take_all(&mut self) -> &'a [u8] {
        let res = self.content;
        self.offset += res.len();
        self.content = &[];
        res
    }
}

/// # High-level Decoding
///
/// All of these methods consume the complete content.
impl Primitive<'_> {
    /// Interprets the content as a BOOLEAN.
    ///
    /// The content must be exactly one octet. Any non-zero value is
    /// considered `true`.
    pub fn to_bool(&mut self) -> Result<bool, DecodeError> {
        let res = self.take_u8()?;
        if !self.content.is_empty() {
            xerr!(Err(self.content_err(ErrorKind::Malformed(
                "invalid boolean"
            ))))
        }
        else {
            Ok(res != 0)
        }
    }

    /// Interprets the content as NULL, i.e., checks that it is empty.
    pub fn to_null(&mut self) -> Result<(), DecodeError> {
        if !self.content.is_empty() {
            xerr!(Err(self.content_err(ErrorKind::Malformed("invalid null"))))
        }
        else {
            Ok(())
        }
    }

    /// Interprets the content as a signed integer.
    pub fn to_i64(&mut self) -> Result<i64, DecodeError> {
        let pos = self.pos();
        int::i64_from_octets(self.take_all()).map_err(|msg| {
            DecodeError::content(msg, pos)
        })
    }

    /// Interprets the content as an unsigned integer.
    pub fn to_u64(&mut self) -> Result<u64, DecodeError> {
        let pos = self.pos();
        int::u64_from_octets(self.take_all()).map_err(|msg| {
            DecodeError::content(msg, pos)
        })
    }

    /// Interprets the content as a natural number.
    ///
    /// The content is taken as the big-endian representation of the
    /// number. No check for a negative sign is done.
    pub fn to_natural(&mut self) -> Natural {
        Natural::from_be_bytes(self.take_all())
    }

    /// Interprets the content as a REAL.
    pub fn to_f64(&mut self) -> Result<f64, DecodeError> {
        let pos = self.pos();
        real::f64_from_octets(self.take_all()).map_err(|msg| {
            DecodeError::content(msg, pos)
        })
    }

    /// Interprets the content as an IA5String.
    pub fn to_ia5_string(&mut self) -> Result<Ia5String, DecodeError> {
        let pos = self.pos();
        Ia5String::from_slice(self.take_all()).map_err(|_| {
            DecodeError::content("invalid IA5String", pos)
        })
    }

    /// Interprets the content as a UTF8String.
    pub fn to_utf8_string(&mut self) -> Result<Utf8String, DecodeError> {
        let pos = self.pos();
        Utf8String::from_slice(self.take_all()).map_err(|_| {
            DecodeError::content("invalid UTF8String", pos)
        })
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::decode::SliceSource;
    use super::*;

    #[test]
    fn decode_bool() {
        assert!(SliceSource::new(b"\x01\x01\xFF").take_bool().unwrap());
        assert!(!SliceSource::new(b"\x01\x01\x00").take_bool().unwrap());
        assert!(SliceSource::new(b"\x01\x01\x01").take_bool().unwrap());
        assert_eq!(
            SliceSource::new(b"\x01\x00").take_bool().unwrap_err().kind(),
            ErrorKind::UnexpectedEnd
        );
        assert_eq!(
            SliceSource::new(b"\x01\x02\xFF\x00").take_bool()
                .unwrap_err().kind(),
            ErrorKind::Malformed("invalid boolean")
        );
    }

    #[test]
    fn decode_null() {
        let mut source = SliceSource::new(b"\x05\x00");
        source.take_null().unwrap();
        assert!(source.is_exhausted());
        assert!(SliceSource::new(b"\x05\x01\x00").take_null().is_err());
    }

    #[test]
    fn trailing_content() {
        let mut source = SliceSource::new(b"\x02\x02\x01\x02");
        let err = source.take_primitive_if(Tag::INTEGER, |prim| {
            prim.take_u8()
        }).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TrailingData);
        assert_eq!(err.pos().to_usize(), 3);
    }

    #[test]
    fn content_positions() {
        let mut source = SliceSource::at(b"\x00\x00\x02\x01\x80", 2);
        source.take_primitive_if(Tag::INTEGER, |prim| {
            assert_eq!(prim.tag(), Tag::INTEGER);
            assert_eq!(prim.pos().to_usize(), 4);
            assert_eq!(prim.remaining(), b"\x80");
            prim.take_all();
            assert_eq!(prim.pos().to_usize(), 5);
            Ok(())
        }).unwrap();
    }
}
