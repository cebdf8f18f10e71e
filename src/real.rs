//! DER encoded REAL values.
//!
//! Only the binary encoding of clause 8.5.7 of X.690 and the special values
//! of clause 8.5.9 are supported. Decimal encoding is rejected when
//! decoding.
//!
//! # Binary Encoding
//!
//! The first content octet is the information octet. Its bits are, from
//! most to least significant:
//!
//! * bit 8: always set for binary encoding,
//! * bit 7: the sign, set for negative values,
//! * bits 6 and 5: the base, with 00 for base 2, 01 for base 8, and 10
//!   for base 16,
//! * bits 4 and 3: the binary scaling factor F,
//! * bits 2 and 1: the format of the exponent, with 00, 01, and 10 for a
//!   exponent of one, two, or three octets and 11 for an exponent whose
//!   length is given in the following octet.
//!
//! The exponent E follows in two’s complement and the remaining octets are
//! the mantissa N, also in two’s complement. The value is
//! `N * 2^F * base^E`, negated if the sign bit is set. The mantissa is
//! always written as a non-negative number, so a zero octet is prepended
//! if its top bit would otherwise be set.
//!
//! Zero is encoded as empty content. Positive infinity, negative infinity,
//! NaN, and negative zero are encoded as the single octets 0x40, 0x41,
//! 0x42, and 0x43, respectively.

use smallvec::SmallVec;
use crate::encode::{PrimitiveContent, Target};
use crate::ident::Tag;
use crate::int;


//------------ Base ----------------------------------------------------------

/// The base used for the exponent of an encoded REAL.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Base {
    #[default]
    Two,
    Eight,
    Sixteen,
}

impl Base {
    /// Returns the numerical value of the base.
    pub const fn radix(self) -> u32 {
        match self {
            Base::Two => 2,
            Base::Eight => 8,
            Base::Sixteen => 16,
        }
    }

    /// Returns the binary logarithm of the base.
    const fn log2(self) -> i64 {
        match self {
            Base::Two => 1,
            Base::Eight => 3,
            Base::Sixteen => 4,
        }
    }

    /// Returns the base bits of the information octet.
    const fn to_info(self) -> u8 {
        match self {
            Base::Two => 0x00,
            Base::Eight => 0x10,
            Base::Sixteen => 0x20,
        }
    }

    /// Returns the base from the information octet.
    fn from_info(info: u8) -> Option<Self> {
        match info & 0x30 {
            0x00 => Some(Base::Two),
            0x10 => Some(Base::Eight),
            0x20 => Some(Base::Sixteen),
            _ => None
        }
    }

    /// Splits a finite, positive value into exponent and mantissa.
    ///
    /// The value is scaled by the base until it is an integer that fits
    /// into an `i64`. Trailing zeros are then moved from the mantissa into
    /// the exponent: whole octets for base 2 and 16, three bits for base 8.
    fn decompose(self, value: f64) -> (i64, i64) {
        let radix = f64::from(self.radix());
        let mut value = value;
        let mut exponent = 0i64;
        while value >= MANTISSA_LIMIT {
            value /= radix;
            exponent += 1;
        }
        while value.fract() != 0.0 {
            value *= radix;
            exponent -= 1;
        }
        let mut mantissa = value as i64;
        match self {
            Base::Two => {
                while mantissa & 0xFF == 0 {
                    mantissa >>= 8;
                    exponent += 8;
                }
            }
            Base::Sixteen => {
                while mantissa & 0xFF == 0 {
                    mantissa >>= 8;
                    exponent += 2;
                }
            }
            Base::Eight => {
                while mantissa & 0x07 == 0 {
                    mantissa >>= 3;
                    exponent += 1;
                }
            }
        }
        (exponent, mantissa)
    }
}

/// The smallest value that doesn’t fit into an `i64` mantissa.
const MANTISSA_LIMIT: f64 = 9_223_372_036_854_775_808.0;


//------------ Real ----------------------------------------------------------

/// A REAL value for encoding.
///
/// The value wraps an `f64` together with the base to use for the
/// exponent. Values of type `f64` can be encoded directly and will use
/// base 2.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Real {
    /// The value.
    value: f64,

    /// The base for encoding.
    base: Base,
}

/// The content octets of an encoded REAL.
pub type RealOctets = SmallVec<[u8; 20]>;

impl Real {
    /// Creates a new value using base 2.
    pub fn new(value: f64) -> Self {
        Self::with_base(value, Base::Two)
    }

    /// Creates a new value using the given base.
    pub fn with_base(value: f64, base: Base) -> Self {
        Real { value, base }
    }

    /// Returns the value.
    pub fn value(self) -> f64 {
        self.value
    }

    /// Returns the base used for encoding.
    pub fn base(self) -> Base {
        self.base
    }

    /// Returns the content octets.
    pub fn to_octets(self) -> RealOctets {
        let mut res = RealOctets::new();
        let value = self.value;
        if value.is_nan() {
            res.push(0x42);
        }
        else if value.is_infinite() {
            res.push(if value > 0. { 0x40 } else { 0x41 });
        }
        else if value == 0. {
            if value.is_sign_negative() {
                res.push(0x43);
            }
        }
        else {
            let (exponent, mantissa) = self.base.decompose(value.abs());
            let exponent = int::i64_octets(exponent);
            let mut info = 0x80 | self.base.to_info();
            if value.is_sign_negative() {
                info |= 0x40;
            }
            match exponent.len() {
                1 => { }
                2 => info |= 0x01,
                3 => info |= 0x02,
                _ => info |= 0x03,
            }
            res.push(info);
            if exponent.len() > 3 {
                res.push(exponent.len() as u8);
            }
            res.extend_from_slice(&exponent);
            res.extend_from_slice(&int::i64_octets(mantissa));
        }
        res
    }
}

impl From<f64> for Real {
    fn from(value: f64) -> Self {
        Real::new(value)
    }
}

impl PrimitiveContent for Real {
    const TAG: Tag = Tag::REAL;

    fn encoded_len(self) -> usize {
        self.to_octets().len()
    }

    fn write_encoded<T: Target>(
        self,
        target: &mut T
    ) -> Result<(), T::Error> {
        target.write_all(&self.to_octets())
    }
}

impl PrimitiveContent for f64 {
    const TAG: Tag = Tag::REAL;

    fn encoded_len(self) -> usize {
        Real::new(self).encoded_len()
    }

    fn write_encoded<T: Target>(
        self,
        target: &mut T
    ) -> Result<(), T::Error> {
        Real::new(self).write_encoded(target)
    }
}


//------------ Decoding ------------------------------------------------------

/// Decodes the content octets of a REAL value.
pub fn f64_from_octets(octets: &[u8]) -> Result<f64, &'static str> {
    let (info, rest) = match octets.split_first() {
        Some((info, rest)) => (*info, rest),
        None => return Ok(0.)
    };

    if info & 0x80 == 0 {
        return match (info, rest.is_empty()) {
            (0x40, true) => Ok(f64::INFINITY),
            (0x41, true) => Ok(f64::NEG_INFINITY),
            (0x42, true) => Ok(f64::NAN),
            (0x43, true) => Ok(-0.),
            (0x40..=0x43, false) => xerr!(Err("invalid special real value")),
            _ => xerr!(Err("unsupported real encoding")),
        }
    }

    let base = match Base::from_info(info) {
        Some(base) => base,
        None => xerr!(return Err("reserved real base"))
    };
    let scale = i64::from((info >> 2) & 0x03);
    let (exp_len, rest) = match info & 0x03 {
        0 => (1, rest),
        1 => (2, rest),
        2 => (3, rest),
        _ => match rest.split_first() {
            Some((len, rest)) => (usize::from(*len), rest),
            None => xerr!(return Err("truncated real exponent"))
        }
    };
    let (exponent, mantissa) = match rest.split_at_checked(exp_len) {
        Some(some) => some,
        None => xerr!(return Err("truncated real exponent"))
    };
    if mantissa.is_empty() {
        return Ok(0.)
    }
    let exponent = int::i64_from_octets(exponent)?;
    if mantissa.len() > 8 {
        xerr!(return Err("real mantissa out of range"))
    }
    let mantissa = int::i64_from_octets(mantissa)?;
    let value = scale_by_power_of_two(
        mantissa as f64,
        exponent.saturating_mul(base.log2()).saturating_add(scale)
    );
    Ok(if info & 0x40 != 0 { -value } else { value })
}

/// Returns `value * 2^exp`.
///
/// The factor is applied in steps that are representable as an `f64` so
/// that values in the subnormal range come out right.
fn scale_by_power_of_two(mut value: f64, mut exp: i64) -> f64 {
    const STEP: i64 = 1000;

    while exp > STEP && value.is_normal() {
        value *= power_of_two(STEP);
        exp -= STEP;
    }
    while exp < -STEP && value.is_normal() {
        value *= power_of_two(-STEP);
        exp += STEP;
    }
    if !value.is_finite() || value == 0. {
        return value
    }
    if exp > STEP || exp < -STEP {
        // The value has become subnormal on the way down.
        let res = if exp > 0 { f64::INFINITY } else { 0. };
        return res.copysign(value)
    }
    value * power_of_two(exp)
}

/// Returns `2^exp` for an exponent between -1022 and 1023.
fn power_of_two(exp: i64) -> f64 {
    f64::from_bits(((exp + 1023) as u64) << 52)
}


//============ Tests =========================================================
