//! Shifts and bitwise operations.
//!
//! This is a private module. It only provides trait impls for its parent.

use std::cmp;
use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign,
    Shl, ShlAssign, Shr, ShrAssign,
};
use super::{Natural, u64_octets};


//------------ Natural -------------------------------------------------------

impl Natural {
    /// Shifts the value left by `bits` bits in place.
    ///
    /// The buffer grows if the result doesn’t fit.
    fn shift_left(&mut self, bits: usize) {
        if self.is_zero() || bits == 0 {
            return
        }
        let octets = bits / 8;
        let rem = (bits % 8) as u32;
        let old = self.payload;
        let new = old + octets + usize::from(rem > 0);
        self.reserve(new);

        // Going downwards from the most significant end, we only ever read
        // octets that haven’t been written yet.
        for idx in (0..new).rev() {
            let high = match idx.checked_sub(octets) {
                Some(src) => self.lsb(src),
                None => 0,
            };
            let value = if rem > 0 {
                let low = match idx.checked_sub(octets + 1) {
                    Some(src) => self.lsb(src),
                    None => 0,
                };
                (high << rem) | (low >> (8 - rem))
            }
            else {
                high
            };
            self.set_lsb(idx, value);
        }
        self.payload = new;
        self.trim();
    }

    /// Shifts the value right by `bits` bits in place.
    fn shift_right(&mut self, bits: usize) {
        if self.is_zero() || bits == 0 {
            return
        }
        let octets = bits / 8;
        let rem = (bits % 8) as u32;
        if octets >= self.payload {
            self.payload = 0;
            return
        }
        let new = self.payload - octets;

        // Going upwards from the least significant end, we only ever read
        // octets that haven’t been written yet.
        for idx in 0..new {
            let low = self.lsb(idx + octets);
            let value = if rem > 0 {
                let high = self.lsb(idx + octets + 1);
                (low >> rem) | (high << (8 - rem))
            }
            else {
                low
            };
            self.set_lsb(idx, value);
        }
        self.payload = new;
        self.trim();
    }

    /// Combines the value with a big-endian number using `op`.
    ///
    /// If `extend` is true, the result covers the longer of the two
    /// operands, otherwise only the shorter one.
    fn combine_octets(
        &mut self, rhs: &[u8], extend: bool, op: impl Fn(u8, u8) -> u8
    ) {
        let digits = if extend {
            cmp::max(self.payload, rhs.len())
        }
        else {
            cmp::min(self.payload, rhs.len())
        };
        self.reserve(digits);
        for idx in 0..digits {
            let right = match rhs.len().checked_sub(idx + 1) {
                Some(pos) => rhs[pos],
                None => 0,
            };
            let value = op(self.lsb(idx), right);
            self.set_lsb(idx, value);
        }
        self.payload = digits;
        self.trim();
    }
}


//--- Shl and ShlAssign, Shr and ShrAssign

impl ShlAssign<usize> for Natural {
    fn shl_assign(&mut self, bits: usize) {
        self.shift_left(bits)
    }
}

impl Shl<usize> for Natural {
    type Output = Natural;

    fn shl(mut self, bits: usize) -> Natural {
        self.shift_left(bits);
        self
    }
}

impl ShrAssign<usize> for Natural {
    fn shr_assign(&mut self, bits: usize) {
        self.shift_right(bits)
    }
}

impl Shr<usize> for Natural {
    type Output = Natural;

    fn shr(mut self, bits: usize) -> Natural {
        self.shift_right(bits);
        self
    }
}


//--- Bitwise operations

/// Implements a bitwise operation for naturals and `u64`s.
macro_rules! bitwise_impl {
    (
        $assign_trait:ident, $assign_fn:ident,
        $trait:ident, $fn:ident,
        $extend:expr, $op:expr
    ) => {
        impl $assign_trait<&'_ Natural> for Natural {
            fn $assign_fn(&mut self, rhs: &Natural) {
                self.combine_octets(rhs.as_slice(), $extend, $op)
            }
        }

        impl $assign_trait<Natural> for Natural {
            fn $assign_fn(&mut self, rhs: Natural) {
                self.combine_octets(rhs.as_slice(), $extend, $op)
            }
        }

        impl $assign_trait<u64> for Natural {
            fn $assign_fn(&mut self, rhs: u64) {
                let (octets, start) = u64_octets(rhs);
                self.combine_octets(&octets[start..], $extend, $op)
            }
        }

        impl<T> $trait<T> for Natural
        where Natural: $assign_trait<T> {
            type Output = Natural;

            fn $fn(mut self, rhs: T) -> Natural {
                self.$assign_fn(rhs);
                self
            }
        }
    }
}

bitwise_impl!(
    BitAndAssign, bitand_assign, BitAnd, bitand, false, |l, r| l & r
);
bitwise_impl!(
    BitOrAssign, bitor_assign, BitOr, bitor, true, |l, r| l | r
);
bitwise_impl!(
    BitXorAssign, bitxor_assign, BitXor, bitxor, true, |l, r| l ^ r
);


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use super::*;

    #[test]
    fn shift_left() {
        let n = Natural::from(1u64) << 8;
        assert_eq!(n, 0x100);
        let n = Natural::from(0x81u64) << 1;
        assert_eq!(n, 0x102);
        let n = Natural::from(0x0Fu64) << 4;
        assert_eq!(n, 0xF0);
        assert_eq!(n.payload(), 1);
        let n = Natural::from(0xABCDu64) << 60;
        assert_eq!(n.to_hexstring(), "0ABCD000000000000000");
        assert!(n.capacity() >= n.payload());
        assert!((Natural::new() << 100).is_zero());
    }

    #[test]
    fn shift_right() {
        let n = Natural::from(0x102u64) >> 1;
        assert_eq!(n, 0x81);
        let n = Natural::from(0xABCDu64) >> 8;
        assert_eq!(n, 0xAB);
        assert_eq!(n.capacity(), 8);
        let n = Natural::from(0xABCDu64) >> 12;
        assert_eq!(n, 0xA);
        assert!((Natural::from(0xABCDu64) >> 16).is_zero());
        assert!((Natural::from(0xABCDu64) >> 1000).is_zero());
    }

    #[test]
    fn shift_round_trip() {
        let value = Natural::from_str_radix(
            "123456789ABCDEF0FEDCBA9876543210", 16
        ).unwrap();
        for bits in [0, 1, 7, 8, 9, 31, 64, 65, 200] {
            let shifted = value.clone() << bits;
            assert_eq!(shifted.integer_length(), value.integer_length() + bits);
            assert_eq!(shifted >> bits, value);
        }
    }

    proptest! {
        #[test]
        fn shift_round_trip_any(
            data in proptest::collection::vec(any::<u8>(), 0..40),
            bits in 0usize..300
        ) {
            let value = Natural::from_be_bytes(&data);
            let shifted = value.clone() << bits;
            if !value.is_zero() {
                prop_assert_eq!(
                    shifted.integer_length(), value.integer_length() + bits
                );
            }
            prop_assert_eq!(shifted >> bits, value);
        }
    }

    #[test]
    fn bitwise() {
        let a = Natural::from(0xFF00FFu64);
        let b = Natural::from(0x0FF0u64);
        assert_eq!(a.clone() & &b, 0xF0);
        assert_eq!(a.clone() | &b, 0xFF0FFF);
        assert_eq!(a.clone() ^ &b, 0xFF0F0F);
        assert_eq!(a.clone() ^ &a, 0);
        assert!((a.clone() ^ &a).is_zero());

        let mut n = Natural::from(0x1234u64);
        n &= 0xFF00u64;
        assert_eq!(n, 0x1200);
        n |= 0x1_0000_0000u64;
        assert_eq!(n, 0x1_0000_1200);
        n ^= 0x1_0000_0000u64;
        assert_eq!(n, 0x1200);
        assert_eq!(n.payload(), 2);
    }

    #[test]
    fn masked_identifier() {
        // Folds the leading octet over the shifted value.
        let id = Natural::from_be_bytes(b"\x12\x34\x56\x78\x9A\xBC");
        let first = u64::from(id.get(0).unwrap());
        let masked = (id << 8) ^ first;
        assert_eq!(masked.as_slice(), b"\x12\x34\x56\x78\x9A\xBC\x12");
    }

    #[test]
    fn and_with_longer_operand() {
        let a = Natural::from(0x12u64);
        let b = Natural::from_be_bytes(b"\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF");
        assert_eq!(a & b, 0x12);
    }

    #[test]
    fn or_grows_buffer() {
        let a = Natural::from_be_bytes(b"\x01");
        let b = Natural::from_be_bytes(b"\x01\x00\x00");
        let c = a | b;
        assert_eq!(c, 0x010001);
        assert_eq!(c.capacity(), 3);
    }
}
