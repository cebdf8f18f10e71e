//! DER encoded integers.
//!
//! This module provides the content encoding of INTEGER and ENUMERATED
//! values for the built-in integer types and for [`Natural`]. Decoding
//! happens through [`Primitive::to_i64`], [`Primitive::to_u64`], and
//! [`Primitive::to_natural`].
//!
//! [`Primitive::to_i64`]: crate::decode::Primitive::to_i64
//! [`Primitive::to_u64`]: crate::decode::Primitive::to_u64
//! [`Primitive::to_natural`]: crate::decode::Primitive::to_natural

use smallvec::SmallVec;
use crate::encode::{PrimitiveContent, Target};
use crate::ident::Tag;
use crate::natural::Natural;


//------------ IntOctets -----------------------------------------------------

/// The content octets of an encoded built-in integer.
///
/// Nine octets are needed for a `u64` with the top bit set.
pub type IntOctets = SmallVec<[u8; 9]>;

/// Returns the minimal two’s complement octets of a signed integer.
///
/// A leading octet is dropped while it is only a sign extension of the
/// following octet.
pub fn i64_octets(value: i64) -> IntOctets {
    let octets = value.to_be_bytes();
    let start = octets.windows(2).take_while(|pair| {
        (pair[0] == 0 && pair[1] & 0x80 == 0)
        || (pair[0] == 0xFF && pair[1] & 0x80 != 0)
    }).count();
    IntOctets::from_slice(&octets[start..])
}

/// Returns the minimal two’s complement octets of an unsigned integer.
///
/// A zero octet is prepended if the top bit is set so the value isn’t
/// mistaken for a negative one.
pub fn u64_octets(value: u64) -> IntOctets {
    let octets = value.to_be_bytes();
    let start = significant_start(value);
    let mut res = IntOctets::new();
    if octets[start] & 0x80 != 0 {
        res.push(0);
    }
    res.extend_from_slice(&octets[start..]);
    res
}

/// Returns the index of the first significant octet of a `u64`.
///
/// Zero keeps its last octet.
fn significant_start(value: u64) -> usize {
    if value == 0 {
        7
    }
    else {
        (value.leading_zeros() / 8) as usize
    }
}

/// Decodes two’s complement content octets into an `i64`.
pub fn i64_from_octets(octets: &[u8]) -> Result<i64, &'static str> {
    let first = match octets.first() {
        Some(first) => *first,
        None => xerr!(return Err("empty integer"))
    };
    if octets.len() > 8 {
        xerr!(return Err("integer out of range"))
    }
    let init = if first & 0x80 != 0 { -1i64 } else { 0 };
    Ok(octets.iter().fold(init, |res, &octet| {
        (res << 8) | i64::from(octet)
    }))
}

/// Decodes two’s complement content octets into a `u64`.
///
/// Negative values are rejected.
pub fn u64_from_octets(octets: &[u8]) -> Result<u64, &'static str> {
    let first = match octets.first() {
        Some(first) => *first,
        None => xerr!(return Err("empty integer"))
    };
    if first & 0x80 != 0 {
        xerr!(return Err("negative integer"))
    }
    let octets = if octets.len() == 9 && first == 0 {
        &octets[1..]
    }
    else {
        octets
    };
    if octets.len() > 8 {
        xerr!(return Err("integer out of range"))
    }
    Ok(octets.iter().fold(0, |res, &octet| (res << 8) | u64::from(octet)))
}


//------------ Built-in Integers ---------------------------------------------

macro_rules! signed_content {
    ( $( $type:ident ),* ) => {
        $(
            impl PrimitiveContent for $type {
                const TAG: Tag = Tag::INTEGER;

                fn encoded_len(self) -> usize {
                    i64_octets(i64::from(self)).len()
                }

                fn write_encoded<T: Target>(
                    self,
                    target: &mut T
                ) -> Result<(), T::Error> {
                    target.write_all(&i64_octets(i64::from(self)))
                }
            }
        )*
    }
}

macro_rules! unsigned_content {
    ( $( $type:ident ),* ) => {
        $(
            impl PrimitiveContent for $type {
                const TAG: Tag = Tag::INTEGER;

                fn encoded_len(self) -> usize {
                    u64_octets(u64::from(self)).len()
                }

                fn write_encoded<T: Target>(
                    self,
                    target: &mut T
                ) -> Result<(), T::Error> {
                    target.write_all(&u64_octets(u64::from(self)))
                }
            }
        )*
    }
}

signed_content!(i8, i16, i32, i64);
unsigned_content!(u8, u16, u32, u64);


//------------ Natural -------------------------------------------------------

/// Natural numbers are encoded as non-negative INTEGER values.
///
/// A zero octet is prepended if the most significant bit is set. Zero is
/// encoded as a single zero octet.
impl PrimitiveContent for &'_ Natural {
    const TAG: Tag = Tag::INTEGER;

    fn encoded_len(self) -> usize {
        match self.as_slice().first() {
            Some(&first) if first & 0x80 != 0 => self.payload() + 1,
            Some(_) => self.payload(),
            None => 1,
        }
    }

    fn write_encoded<T: Target>(
        self,
        target: &mut T
    ) -> Result<(), T::Error> {
        match self.as_slice().first() {
            Some(&first) => {
                if first & 0x80 != 0 {
                    target.write_all(&[0])?;
                }
                target.write_all(self.as_slice())
            }
            None => target.write_all(&[0])
        }
    }
}


//------------ Enumerated ----------------------------------------------------

/// The value of an ENUMERATED type.
///
/// The content is encoded just like an INTEGER but uses the ENUMERATED
/// tag. Use the [`der_enum!`][crate::der_enum] macro to define a Rust enum
/// that encodes as ENUMERATED.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Enumerated(pub i64);

impl Enumerated {
    /// Returns the numeric value.
    pub fn into_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for Enumerated {
    fn from(value: i64) -> Self {
        Enumerated(value)
    }
}

impl PrimitiveContent for Enumerated {
    const TAG: Tag = Tag::ENUMERATED;

    fn encoded_len(self) -> usize {
        i64_octets(self.0).len()
    }

    fn write_encoded<T: Target>(
        self,
        target: &mut T
    ) -> Result<(), T::Error> {
        target.write_all(&i64_octets(self.0))
    }
}


//------------ der_enum ------------------------------------------------------

/// Defines an enum that is encoded as an ENUMERATED value.
///
/// Each variant needs an explicit discriminant which becomes its encoded
/// value. The macro derives `Clone`, `Copy`, `Debug`, `Eq`, `Hash`, and
/// `PartialEq` and adds methods for converting from and to `i64`, for
/// encoding, and for taking a value from a source.
///
/// ```
/// natder::der_enum! {
///     /// The state of a key.
///     pub enum KeyState {
///         Active = 0,
///         Revoked = 3,
///     }
/// }
///
/// use natder::encode::Values;
///
/// let encoded = KeyState::Revoked.encode().to_vec();
/// assert_eq!(encoded, b"\x0A\x01\x03");
///
/// let mut source = natder::decode::SliceSource::new(&encoded);
/// assert_eq!(KeyState::take_from(&mut source).unwrap(), KeyState::Revoked);
/// ```
#[macro_export]
macro_rules! der_enum {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vattr:meta])*
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[repr(i64)]
        $vis enum $name {
            $(
                $(#[$vattr])*
                $variant = $value
            ),*
        }

        impl $name {
            /// Returns the variant for the given value if there is one.
            pub fn from_i64(value: i64) -> Option<Self> {
                $(
                    if value == $name::$variant as i64 {
                        return Some($name::$variant)
                    }
                )*
                None
            }

            /// Returns the encoded value of the variant.
            pub fn to_i64(self) -> i64 {
                self as i64
            }

            /// Returns a value encoder for the variant.
            pub fn encode(
                self
            ) -> $crate::encode::Primitive<$crate::int::Enumerated> {
                $crate::encode::PrimitiveContent::encode(
                    $crate::int::Enumerated(self as i64)
                )
            }

            /// Takes an encoded value from the beginning of a source.
            pub fn take_from(
                source: &mut $crate::decode::SliceSource
            ) -> Result<Self, $crate::decode::DecodeError> {
                source.take_primitive_if($crate::Tag::ENUMERATED, |prim| {
                    let pos = prim.pos();
                    let value = prim.to_i64()?;
                    Self::from_i64(value).ok_or_else(|| {
                        $crate::decode::DecodeError::content(
                            "unknown enumerated value", pos
                        )
                    })
                })
            }
        }

        impl From<$name> for $crate::int::Enumerated {
            fn from(src: $name) -> Self {
                $crate::int::Enumerated(src as i64)
            }
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::decode::{ErrorKind, SliceSource};
    use crate::encode::Values;
    use super::*;

    #[test]
    fn signed_content() {
        assert_eq!(0i64.encode_to_vec(), b"\x00");
        assert_eq!(1i64.encode_to_vec(), b"\x01");
        assert_eq!(127i64.encode_to_vec(), b"\x7F");
        assert_eq!(128i64.encode_to_vec(), b"\x00\x80");
        assert_eq!(255i64.encode_to_vec(), b"\x00\xFF");
        assert_eq!(256i64.encode_to_vec(), b"\x01\x00");
        assert_eq!((-1i64).encode_to_vec(), b"\xFF");
        assert_eq!((-128i64).encode_to_vec(), b"\x80");
        assert_eq!((-129i64).encode_to_vec(), b"\xFF\x7F");
        assert_eq!(
            i64::MIN.encode_to_vec(), b"\x80\x00\x00\x00\x00\x00\x00\x00"
        );
        assert_eq!(
            i64::MAX.encode_to_vec(), b"\x7F\xFF\xFF\xFF\xFF\xFF\xFF\xFF"
        );
        assert_eq!((-1i8).encode_to_vec(), b"\xFF");
        assert_eq!(i16::MIN.encode_to_vec(), b"\x80\x00");
        assert_eq!(0x12345i32.encode_to_vec(), b"\x01\x23\x45");
    }

    #[test]
    fn unsigned_content() {
        assert_eq!(0u8.encode_to_vec(), b"\x00");
        assert_eq!(0x80u8.encode_to_vec(), b"\x00\x80");
        assert_eq!(0xFFFFu16.encode_to_vec(), b"\x00\xFF\xFF");
        assert_eq!(0x7FFF_FFFFu32.encode_to_vec(), b"\x7F\xFF\xFF\xFF");
        assert_eq!(
            u64::MAX.encode_to_vec(),
            b"\x00\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF"
        );
        assert_eq!(u64::MAX.encode().encoded_len(), 11);
    }

    #[test]
    fn integer_round_trip() {
        for value in [
            0i64, 1, 127, 128, 255, 65535, -1, -128, i64::MIN, i64::MAX
        ] {
            let encoded = value.encode().to_vec();
            assert_eq!(encoded.len(), value.encode().encoded_len());
            let mut source = SliceSource::new(&encoded);
            assert_eq!(source.take_i64().unwrap(), value);
            assert!(source.is_exhausted());
        }
    }

    #[test]
    fn unsigned_round_trip() {
        for value in [0u64, 1, 0x80, 0xFFFF, 1 << 63, u64::MAX] {
            let encoded = value.encode().to_vec();
            let mut source = SliceSource::new(&encoded);
            assert_eq!(source.take_u64().unwrap(), value);
        }
    }

    #[test]
    fn decode_limits() {
        assert_eq!(i64_from_octets(b""), Err("empty integer"));
        assert_eq!(
            i64_from_octets(b"\x00\x80\x00\x00\x00\x00\x00\x00\x00"),
            Err("integer out of range")
        );
        assert_eq!(i64_from_octets(b"\xFF\x7F"), Ok(-129));
        assert_eq!(u64_from_octets(b"\xFF"), Err("negative integer"));
        assert_eq!(
            u64_from_octets(b"\x01\x00\x00\x00\x00\x00\x00\x00\x00"),
            Err("integer out of range")
        );

        let err = SliceSource::new(b"\x02\x00").take_i64().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed("empty integer"));
    }

    #[test]
    fn natural_content() {
        assert_eq!(Natural::new().encode().to_vec(), b"\x02\x01\x00");
        assert_eq!(
            Natural::from(0x7Fu64).encode().to_vec(), b"\x02\x01\x7F"
        );
        assert_eq!(
            Natural::from(0x80u64).encode().to_vec(), b"\x02\x02\x00\x80"
        );
        let n = Natural::from_str_radix("FF00000000000000000001", 16)
            .unwrap();
        let encoded = n.encode().to_vec();
        assert_eq!(encoded.len(), n.encode().encoded_len());
        assert_eq!(&encoded[..3], b"\x02\x0C\x00");
        let mut source = SliceSource::new(&encoded);
        assert_eq!(source.take_natural().unwrap(), n);
    }

    #[test]
    fn natural_from_padded_content() {
        let mut source = SliceSource::new(b"\x02\x03\x00\x00\x05");
        let n = source.take_natural().unwrap();
        assert_eq!(n, 5);
        assert_eq!(n.capacity(), 3);
    }

    crate::der_enum! {
        enum Color {
            Red = 1,
            Blue = -2,
        }
    }

    #[test]
    fn enumerated() {
        assert_eq!(Enumerated(5).encode().to_vec(), b"\x0A\x01\x05");
        assert_eq!(Color::Blue.encode().to_vec(), b"\x0A\x01\xFE");
        assert_eq!(Color::from_i64(1), Some(Color::Red));
        assert_eq!(Color::from_i64(2), None);
        assert_eq!(Color::Red.to_i64(), 1);

        let mut source = SliceSource::new(b"\x0A\x01\xFE\x0A\x01\x07");
        assert_eq!(Color::take_from(&mut source).unwrap(), Color::Blue);
        let err = Color::take_from(&mut source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed("unknown enumerated value"));
        assert_eq!(source.take_enumerated().unwrap(), 7);
    }
}
