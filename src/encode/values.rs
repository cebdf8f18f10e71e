//! Everything related to the `Values` trait.
//!
//! This is an internal module. The relevant items are re-exported by the
//! parent.

use bytes::{Bytes, BytesMut};
use crate::ident::{Ident, Tag};
use crate::length::Length;
use super::target::{ShortBuf, SliceTarget, Target, infallible};


//------------ Values --------------------------------------------------------

/// A type that is a value encoder.
///
/// Value encoders know how to encode themselves into a sequence of DER
/// encoded values. While you can impl this trait for your type manually,
/// in practice it is often easier to define a method called `encode` and
/// let it return some dedicated value encoder type constructed from the
/// types provided by this module.
///
/// A type implementing this trait should encode itself into one or more
/// DER values. That is, the type becomes the content or part of the
/// content of a constructed value.
pub trait Values {
    /// Returns the length of the encoded values.
    fn encoded_len(&self) -> usize;

    /// Encodes the values and writes them to `target`.
    fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error>;


    //--- Provided methods

    /// Returns the encoded values in a newly allocated vec.
    fn to_vec(&self) -> Vec<u8> {
        let mut target = Vec::with_capacity(self.encoded_len());
        infallible(self.write_encoded(&mut target));
        target
    }

    /// Returns the encoded values in a newly allocated bytes value.
    fn to_bytes(&self) -> Bytes {
        let mut target = BytesMut::with_capacity(self.encoded_len());
        infallible(self.write_encoded(&mut target));
        target.freeze()
    }

    /// Writes the encoded values into a buffer starting at `offset`.
    ///
    /// Returns the offset just past the written data. If the values don’t
    /// fit into the buffer, returns an error. In this case, the content of
    /// the buffer is undefined.
    fn write_into(
        &self, buf: &mut [u8], offset: usize
    ) -> Result<usize, ShortBuf> {
        let mut target = SliceTarget::new(buf, offset);
        self.write_encoded(&mut target)?;
        Ok(target.offset())
    }
}


//--- Blanket impls

impl<V: Values + ?Sized> Values for &'_ V {
    fn encoded_len(&self) -> usize {
        (*self).encoded_len()
    }

    fn write_encoded<T: Target>(
        &self,
        target: &mut T
    ) -> Result<(), T::Error> {
        (*self).write_encoded(target)
    }
}


//--- Impls for Tuples

/// Macro for implementing `Values` for tuples.
///
/// This macro implements `Values` for all tuples up to a certain degree.
/// It needs to be invoked as below. All the `Tx`s are the type parameters
/// of the elements the tuple, the numbers are the tuple element numbers.
/// The number need to be provided backwards ending in 0.
///
/// The `tuple` bit of the macro does the actual impl and invokes itself with
/// one less tuple element. The `write` bit below is to implement
/// `write_encoded` backwards (i.e., starting with the smallest number).
macro_rules! tupl_impl {
    // Termination: empty lists, do nothing.
    ( tuple > ) => { };

    // Impl values for the complete lists, then recurse to the lists without
    // their heads.
    ( tuple $t:ident $( $ttail:ident )* > $i:tt $( $itail:tt )* ) => {
        impl<$t: Values, $( $ttail: Values ),*> Values
                for ($t, $( $ttail ),*) {
            fn encoded_len(&self) -> usize {
                self.$i.encoded_len()
                $(
                    + self.$itail.encoded_len()
                )*
            }

            fn write_encoded<T: Target>(
                &self,
                target: &mut T
            ) -> Result<(), T::Error> {
                tupl_impl!( write self, target, $i $( $itail )* );
                Ok(())
            }
        }

        tupl_impl!(
             tuple $($ttail)* > $($itail)*
        );
    };

    // Termination: empty lists, do nothing.
    ( write $self:expr, $target:expr, ) => { };

    // Write all elements of tuple $self to $target in order.
    ( write $self:expr, $target:expr, $i:tt $($itail:tt)*) => {
        tupl_impl!( write $self, $target, $($itail)* );
        $self.$i.write_encoded($target)?
    }
}

// The standard library implements things for tuples up to twelve elements,
// so we do the same.
tupl_impl!(
    tuple T11 T10 T9 T8 T7 T6 T5 T4 T3 T2 T1 T0 > 11 10 9 8 7 6 5 4 3 2 1 0
);


//--- Impl for Option

/// Encoding of an optional value.
///
/// This implementation encodes `None` as nothing, i.e., as an OPTIONAL
/// in ASN.1 parlance.
impl<V: Values> Values for Option<V> {
    fn encoded_len(&self) -> usize {
        match self {
            Some(v) => v.encoded_len(),
            None => 0,
        }
    }

    fn write_encoded<T: Target>(
        &self,
        target: &mut T
    ) -> Result<(), T::Error> {
        match self {
            Some(v) => v.write_encoded(target),
            None => Ok(())
        }
    }
}


//--- Impl for slice and Vec

impl<V: Values> Values for [V] {
    fn encoded_len(&self) -> usize {
        self.iter().map(|v| v.encoded_len()).sum()
    }

    fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        self.iter().try_for_each(|v| v.write_encoded(target))
    }
}

impl<V: Values> Values for Vec<V> {
    fn encoded_len(&self) -> usize {
        self.as_slice().encoded_len()
    }

    fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        self.as_slice().write_encoded(target)
    }
}


//------------ Constructed ---------------------------------------------------

/// A value encoder for a single constructed value.
///
/// The encoder always uses the definite length form.
pub struct Constructed<V> {
    /// The tag of the value.
    tag: Tag,

    /// A value encoder for the content of the value.
    inner: V,
}

impl<V> Constructed<V> {
    /// Creates a new constructed value encoder from a tag and content.
    ///
    /// The returned value will encode as a single constructed value with
    /// the given tag and whatever `inner` encodes to as its content.
    pub fn new(tag: Tag, inner: V) -> Self {
        Constructed { tag, inner }
    }
}

impl<V: Values> Values for Constructed<V> {
    fn encoded_len(&self) -> usize {
        total_len(self.tag, self.inner.encoded_len())
    }

    fn write_encoded<T: Target>(
        &self, target: &mut T
    ) -> Result<(), T::Error> {
        write_header(target, self.tag, true, self.inner.encoded_len())?;
        self.inner.write_encoded(target)
    }
}


//============ Standard Functions ============================================

/// Returns a value encoder for a SEQUENCE containing `inner`.
pub fn sequence<V: Values>(inner: V) -> impl Values {
    Constructed::new(Tag::SEQUENCE, inner)
}

/// Returns the length of a value with `content_len` content octets.
///
/// This is the content length plus the length of the identifier octet and
/// the length octets.
pub fn total_len(tag: Tag, content_len: usize) -> usize {
    Ident::new(tag, false).encoded_len()
        + Length::new(content_len).encoded_len()
        + content_len
}

/// Writes the header of a value.
///
/// The header consists of the identifier octet with the given tag and
/// constructed flag followed by the length octets for `content_len`.
pub fn write_header<T: Target>(
    target: &mut T, tag: Tag, constructed: bool, content_len: usize
) -> Result<(), T::Error> {
    Ident::new(tag, constructed).write_encoded(target)?;
    Length::new(content_len).write_encoded(target)
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::encode::PrimitiveContent;
    use super::*;

    #[test]
    fn encode_sequence() {
        let seq = sequence((
            true.encode(),
            5i64.encode(),
            ().encode(),
        ));
        assert_eq!(seq.encoded_len(), 10);
        assert_eq!(
            seq.to_vec(),
            b"\x30\x08\x01\x01\xFF\x02\x01\x05\x05\x00"
        );
        assert_eq!(seq.to_bytes().as_ref(), seq.to_vec().as_slice());
    }

    #[test]
    fn encode_optional() {
        let seq = sequence((
            Some(1u8.encode()),
            None::<crate::encode::Primitive<()>>,
        ));
        assert_eq!(seq.to_vec(), b"\x30\x03\x02\x01\x01");
    }

    #[test]
    fn total_len_includes_header() {
        assert_eq!(total_len(Tag::SEQUENCE, 0), 2);
        assert_eq!(total_len(Tag::SEQUENCE, 127), 129);
        assert_eq!(total_len(Tag::SEQUENCE, 128), 131);
        assert_eq!(total_len(Tag::SEQUENCE, 300), 304);

        let content = vec![true.encode(); 50];
        let seq = sequence(content);
        assert_eq!(seq.encoded_len(), total_len(Tag::SEQUENCE, 150));
        assert_eq!(seq.to_vec().len(), seq.encoded_len());
    }

    #[test]
    fn write_into_buffer() {
        let value = (1u8.encode(), 2u8.encode());
        let mut buf = [0u8; 8];
        assert_eq!(value.write_into(&mut buf, 2).unwrap(), 8);
        assert_eq!(buf, [0, 0, 2, 1, 1, 2, 1, 2]);
        assert!(value.write_into(&mut buf, 3).is_err());
    }
}
