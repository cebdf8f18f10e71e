//! Encoding of values with primitive content.
//!
//! This is an internal module. The relevant items are re-exported by the
//! parent.

use crate::ident::Tag;
use super::target::{Target, infallible};
use super::values::{Values, total_len, write_header};


//------------ PrimitiveContent ----------------------------------------------

/// The content octets of a primitive DER value.
///
/// Implementing this trait only requires knowing the universal tag of the
/// type and how to produce its content octets. The identifier and length
/// octets are added by the [`Primitive`] encoder returned from
/// [`encode`][Self::encode] or, with a different tag for implicit tagging,
/// from [`encode_as`][Self::encode_as].
///
/// Since DER only allows the definite length form, the content length has
/// to be known before anything is written. It is asked for via
/// [`encoded_len`][Self::encoded_len] and must match exactly what
/// [`write_encoded`][Self::write_encoded] produces.
///
/// Implementors have to be `Copy` so the encoder can hold on to them by
/// value. Types owning their data, such as [`Natural`] or the string
/// types, implement the trait for a shared reference instead.
///
/// [`Natural`]: crate::natural::Natural
pub trait PrimitiveContent: Copy {
    /// The universal tag of the type.
    const TAG: Tag;

    /// Returns the number of content octets.
    fn encoded_len(self) -> usize;

    /// Writes the content octets to `target`.
    fn write_encoded<T: Target>(
        self,
        target: &mut T
    ) -> Result<(), T::Error>;


    //--- Provided methods

    /// Returns an encoder for a value tagged with [`TAG`][Self::TAG].
    fn encode(self) -> Primitive<Self> {
        self.encode_as(Self::TAG)
    }

    /// Returns an encoder for a value tagged with `tag`.
    ///
    /// The content stays the same, only the identifier octet changes.
    fn encode_as(self, tag: Tag) -> Primitive<Self> {
        Primitive { tag, content: self }
    }

    /// Returns the bare content octets.
    fn encode_to_vec(self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.encoded_len());
        infallible(self.write_encoded(&mut res));
        res
    }
}


//--- NULL and BOOLEAN
//
// Integers live in crate::int, `f64` and `Real` in crate::real.

impl PrimitiveContent for () {
    const TAG: Tag = Tag::NULL;

    fn encoded_len(self) -> usize {
        0
    }

    fn write_encoded<T: Target>(
        self,
        _: &mut T
    ) -> Result<(), T::Error> {
        Ok(())
    }
}

impl PrimitiveContent for bool {
    const TAG: Tag = Tag::BOOLEAN;

    fn encoded_len(self) -> usize {
        1
    }

    fn write_encoded<T: Target>(
        self,
        target: &mut T
    ) -> Result<(), T::Error> {
        target.write_all(&[if self { 0xFF } else { 0x00 }])
    }
}


//------------ Primitive -----------------------------------------------------

/// A single primitive value ready for encoding.
///
/// The value is written as the identifier octet for its tag, the definite
/// length octets, and then the content.
#[derive(Clone, Copy, Debug)]
pub struct Primitive<P> {
    tag: Tag,
    content: P,
}

impl<P> Primitive<P> {
    /// Returns the tag the value will be encoded with.
    pub fn tag(&self) -> Tag {
        self.tag
    }
}

impl<P: PrimitiveContent> Values for Primitive<P> {
    fn encoded_len(&self) -> usize {
        total_len(self.tag, self.content.encoded_len())
    }

    fn write_encoded<T: Target>(
        &self,
        target: &mut T
    ) -> Result<(), T::Error> {
        write_header(target, self.tag, false, self.content.encoded_len())?;
        self.content.write_encoded(target)
    }
}


//============ Tests =========================================================
