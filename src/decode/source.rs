//! The source for decoding data.
//!
//! This is an internal module. Its public types are re-exported by the
//! parent.

use std::fmt;
use crate::ident::{Ident, Tag};
use crate::length::Length;
use super::error::{DecodeError, ErrorKind};
use super::primitive::Primitive;


//------------ SliceSource ---------------------------------------------------

/// A source of encoded data backed by a byte slice.
///
/// The source keeps a cursor into the slice. All decoding methods advance
/// the cursor past what they consumed. Positions reported in errors are
/// always offsets into the slice the source was originally created from,
/// even for the sources handed out for the content of constructed values.
#[derive(Clone, Copy, Debug)]
pub struct SliceSource<'a> {
    /// The underlying data.
    ///
    /// For nested sources, this is cut off at the end of the content.
    data: &'a [u8],

    /// The current cursor position.
    offset: usize,
}

impl<'a> SliceSource<'a> {
    /// Creates a source positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::at(data, 0)
    }

    /// Creates a source positioned at `offset` in `data`.
    ///
    /// If the offset is beyond the end of the data, the source is empty.
    pub fn at(data: &'a [u8], offset: usize) -> Self {
        SliceSource { data, offset }
    }

    /// Returns the current cursor position as an offset into the data.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the current position for use in errors.
    pub fn pos(&self) -> Pos {
        self.offset.into()
    }

    /// Returns the data that hasn’t been consumed yet.
    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.offset..).unwrap_or_default()
    }

    /// Returns whether all data has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining().is_empty()
    }

    /// Returns the next octet without consuming it.
    pub fn peek_u8(&self) -> Option<u8> {
        self.remaining().first().copied()
    }

    /// Takes a single octet from the source.
    pub fn take_u8(&mut self) -> Result<u8, DecodeError> {
        match self.peek_u8() {
            Some(octet) => {
                self.offset += 1;
                Ok(octet)
            }
            None => xerr!(Err(self.content_err(ErrorKind::UnexpectedEnd)))
        }
    }

    /// Takes `len` octets from the source.
    pub fn take_slice(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        match self.remaining().get(..len) {
            Some(res) => {
                self.offset += len;
                Ok(res)
            }
            None => xerr!(Err(self.content_err(ErrorKind::UnexpectedEnd)))
        }
    }

    /// Produces an error of the given kind at the current position.
    pub fn content_err(&self, kind: ErrorKind) -> DecodeError {
        DecodeError::new(kind, self.pos())
    }

    /// Takes the identifier and length octets of the next value.
    ///
    /// On success, the cursor is placed at the start of the content octets
    /// and the length is guaranteed to fit into the remaining data.
    pub fn take_header(&mut self) -> Result<(Ident, Length), DecodeError> {
        let ident = Ident::take_from(self)?;
        let len = Length::take_from(self)?;
        Ok((ident, len))
    }

    /// Checks that the next value has the given identifier.
    ///
    /// Nothing is consumed.
    fn check_ident(&self, expected: Ident) -> Result<(), DecodeError> {
        match self.peek_u8() {
            Some(octet) if octet == expected.to_octet() => Ok(()),
            Some(found) => {
                if Ident::from_octet(found).is_err() {
                    xerr!(Err(self.content_err(ErrorKind::UnsupportedTagForm)))
                }
                else {
                    xerr!(Err(self.content_err(ErrorKind::UnexpectedTag {
                        expected: expected.to_octet(), found
                    })))
                }
            }
            None => xerr!(Err(self.content_err(ErrorKind::UnexpectedEnd)))
        }
    }

    /// Processes a primitive value with the given tag.
    ///
    /// If the next value is a primitive value with the given tag, the
    /// closure is called with its content. The closure must consume all
    /// content octets or a [`ErrorKind::TrailingData`] error results.
    ///
    /// If decoding fails, the cursor of the source is left unchanged.
    pub fn take_primitive_if<F, T>(
        &mut self, expected: Tag, op: F
    ) -> Result<T, DecodeError>
    where F: FnOnce(&mut Primitive<'a>) -> Result<T, DecodeError> {
        self.check_ident(Ident::new(expected, false))?;
        let mut source = *self;
        let (_, len) = source.take_header()?;
        let start = source.offset;
        let content = source.take_slice(len.value())?;
        let mut prim = Primitive::new(content, expected, start);
        let res = op(&mut prim)?;
        prim.check_exhausted()?;
        *self = source;
        Ok(res)
    }

    /// Processes a constructed value with the given tag.
    ///
    /// If the next value is a constructed value with the given tag, the
    /// closure is called with a source covering exactly its content. The
    /// closure must consume all of the content or a
    /// [`ErrorKind::TrailingData`] error results.
    ///
    /// If decoding fails, the cursor of the source is left unchanged.
    pub fn take_constructed_if<F, T>(
        &mut self, expected: Tag, op: F
    ) -> Result<T, DecodeError>
    where F: FnOnce(&mut SliceSource<'a>) -> Result<T, DecodeError> {
        self.check_ident(Ident::new(expected, true))?;
        let mut source = *self;
        let (_, len) = source.take_header()?;
        let end = source.offset + len.value();
        let mut content = SliceSource {
            data: source.data.get(..end).unwrap_or(source.data),
            offset: source.offset,
        };
        let res = op(&mut content)?;
        if !content.is_exhausted() {
            xerr!(return Err(content.content_err(ErrorKind::TrailingData)))
        }
        source.offset = end;
        *self = source;
        Ok(res)
    }

    /// Takes the complete next value and returns its content.
    ///
    /// Returns the identifier and the content octets of the value without
    /// interpreting them.
    pub fn take_value(&mut self) -> Result<(Ident, &'a [u8]), DecodeError> {
        let mut source = *self;
        let (ident, len) = source.take_header()?;
        let content = source.take_slice(len.value())?;
        *self = source;
        Ok((ident, content))
    }
}

/// # Decoding Primitive Types
///
impl SliceSource<'_> {
    /// Takes a BOOLEAN value.
    pub fn take_bool(&mut self) -> Result<bool, DecodeError> {
        self.take_primitive_if(Tag::BOOLEAN, |prim| prim.to_bool())
    }

    /// Takes an INTEGER value that fits into an `i64`.
    pub fn take_i64(&mut self) -> Result<i64, DecodeError> {
        self.take_primitive_if(Tag::INTEGER, |prim| prim.to_i64())
    }

    /// Takes a non-negative INTEGER value that fits into a `u64`.
    pub fn take_u64(&mut self) -> Result<u64, DecodeError> {
        self.take_primitive_if(Tag::INTEGER, |prim| prim.to_u64())
    }

    /// Takes an INTEGER value as a natural number.
    pub fn take_natural(
        &mut self
    ) -> Result<crate::natural::Natural, DecodeError> {
        self.take_primitive_if(Tag::INTEGER, |prim| Ok(prim.to_natural()))
    }

    /// Takes an ENUMERATED value.
    pub fn take_enumerated(&mut self) -> Result<i64, DecodeError> {
        self.take_primitive_if(Tag::ENUMERATED, |prim| prim.to_i64())
    }

    /// Takes a NULL value.
    pub fn take_null(&mut self) -> Result<(), DecodeError> {
        self.take_primitive_if(Tag::NULL, |prim| prim.to_null())
    }

    /// Takes a REAL value.
    pub fn take_real(&mut self) -> Result<f64, DecodeError> {
        self.take_primitive_if(Tag::REAL, |prim| prim.to_f64())
    }

    /// Takes an IA5String value.
    pub fn take_ia5_string(
        &mut self
    ) -> Result<crate::string::Ia5String, DecodeError> {
        self.take_primitive_if(Tag::IA5_STRING, |prim| prim.to_ia5_string())
    }

    /// Takes a UTF8String value.
    pub fn take_utf8_string(
        &mut self
    ) -> Result<crate::string::Utf8String, DecodeError> {
        self.take_primitive_if(Tag::UTF8_STRING, |prim| prim.to_utf8_string())
    }
}


//------------ Pos -----------------------------------------------------------

/// The position of an error in the input.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Pos(usize);

impl Pos {
    /// Returns the position as an offset into the input.
    pub fn to_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for Pos {
    fn from(pos: usize) -> Pos {
        Pos(pos)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}


//============ Tests =========================================================
