//! Addition and multiplication.
//!
//! This is a private module. It only provides trait impls for its parent.

use std::cmp;
use std::ops::{Add, AddAssign, Mul, MulAssign};
use super::{Natural, u64_octets};


//------------ Natural -------------------------------------------------------

impl Natural {
    /// Increments the value by one.
    ///
    /// If all significant octets overflow, spare capacity is used for the
    /// carry before the buffer is grown.
    pub fn increment(&mut self) -> &mut Self {
        for idx in 0..self.payload {
            let octet = self.lsb(idx);
            if octet == 0xFF {
                self.set_lsb(idx, 0);
            }
            else {
                self.set_lsb(idx, octet + 1);
                return self
            }
        }
        let idx = self.payload;
        self.reserve(idx + 1);
        self.set_lsb(idx, 1);
        self.payload += 1;
        self
    }

    /// Adds a big-endian number to the value.
    ///
    /// The buffer grows to the length of the longer operand. It grows by
    /// one more octet only if a final carry has no room left.
    fn add_octets(&mut self, rhs: &[u8]) {
        let digits = cmp::max(self.payload, rhs.len());
        self.reserve(digits);
        let mut carry = 0u16;
        for idx in 0..digits {
            let right = match rhs.len().checked_sub(idx + 1) {
                Some(pos) => rhs[pos],
                None => 0,
            };
            let sum = u16::from(self.lsb(idx)) + u16::from(right) + carry;
            self.set_lsb(idx, sum as u8);
            carry = sum >> 8;
        }
        self.payload = digits;
        if carry > 0 {
            self.reserve(digits + 1);
            self.set_lsb(digits, carry as u8);
            self.payload += 1;
        }
        self.trim();
    }

    /// Multiplies the value with a big-endian number.
    ///
    /// The product is computed into a new buffer. If the current buffer
    /// can hold the product, it is copied back so the capacity stays the
    /// same.
    fn mul_octets(&mut self, rhs: &[u8]) {
        if self.is_zero() || rhs == [1] {
            return
        }
        if rhs.iter().all(|&octet| octet == 0) {
            self.payload = 0;
            return
        }
        let lhs = self.as_slice();
        let len = lhs.len() + rhs.len();
        let mut product = vec![0u8; len];
        for (i, &left) in lhs.iter().rev().enumerate() {
            let mut carry = 0u32;
            for (j, &right) in rhs.iter().rev().enumerate() {
                let slot = len - 1 - i - j;
                let value = u32::from(left) * u32::from(right)
                    + u32::from(product[slot]) + carry;
                product[slot] = value as u8;
                carry = value >> 8;
            }
            product[len - 1 - i - rhs.len()] = carry as u8;
        }
        self.replace_payload(product);
    }
}


//--- Add and AddAssign

impl AddAssign<&'_ Natural> for Natural {
    fn add_assign(&mut self, rhs: &Natural) {
        self.add_octets(rhs.as_slice())
    }
}

impl AddAssign<Natural> for Natural {
    fn add_assign(&mut self, rhs: Natural) {
        self.add_octets(rhs.as_slice())
    }
}

impl AddAssign<u64> for Natural {
    fn add_assign(&mut self, rhs: u64) {
        let (octets, start) = u64_octets(rhs);
        self.add_octets(&octets[start..])
    }
}

impl<T> Add<T> for Natural
where Natural: AddAssign<T> {
    type Output = Natural;

    fn add(mut self, rhs: T) -> Natural {
        self += rhs;
        self
    }
}

impl Add<&'_ Natural> for &'_ Natural {
    type Output = Natural;

    fn add(self, rhs: &Natural) -> Natural {
        let mut res = self.clone();
        res += rhs;
        res
    }
}


//--- Mul and MulAssign

impl MulAssign<&'_ Natural> for Natural {
    fn mul_assign(&mut self, rhs: &Natural) {
        self.mul_octets(rhs.as_slice())
    }
}

impl MulAssign<Natural> for Natural {
    fn mul_assign(&mut self, rhs: Natural) {
        self.mul_octets(rhs.as_slice())
    }
}

impl MulAssign<u64> for Natural {
    fn mul_assign(&mut self, rhs: u64) {
        let (octets, start) = u64_octets(rhs);
        self.mul_octets(&octets[start..])
    }
}

impl<T> Mul<T> for Natural
where Natural: MulAssign<T> {
    type Output = Natural;

    fn mul(mut self, rhs: T) -> Natural {
        self *= rhs;
        self
    }
}

impl Mul<&'_ Natural> for &'_ Natural {
    type Output = Natural;

    fn mul(self, rhs: &Natural) -> Natural {
        let mut res = self.clone();
        res *= rhs;
        res
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use super::*;

    fn natural(max_octets: usize) -> impl Strategy<Value = Natural> {
        proptest::collection::vec(any::<u8>(), 0..max_octets).prop_map(
            |data| Natural::from_be_bytes(&data)
        )
    }

    fn to_u128(n: &Natural) -> u128 {
        assert!(n.payload() <= 16);
        n.as_slice().iter().fold(0, |res, &octet| (res << 8) | octet as u128)
    }

    #[test]
    fn increment() {
        let mut n = Natural::from(0xFEu64);
        n.increment();
        assert_eq!(n, 0xFF);
        n.increment();
        assert_eq!(n, 0x100);
        assert_eq!(n.capacity(), 8);

        let mut n = Natural::from_be_bytes(b"\xFF\xFF");
        n.increment();
        assert_eq!(n.as_slice(), b"\x01\x00\x00");
        assert_eq!(n.capacity(), 3);

        let mut n = Natural::new();
        n.increment().increment();
        assert_eq!(n, 2);
    }

    #[test]
    fn add() {
        let mut n = Natural::from_be_bytes(b"\xFF");
        n += 1u64;
        assert_eq!(n.as_slice(), b"\x01\x00");
        assert_eq!(n.capacity(), 2);

        let n = Natural::from(u64::MAX) + Natural::from(u64::MAX);
        assert_eq!(n.to_hexstring(), "01FFFFFFFFFFFFFFFE");

        let n = Natural::from(5u64) + 0u64;
        assert_eq!(n, 5);
        let n = Natural::new() + &Natural::from(0x1234u64);
        assert_eq!(n, 0x1234);
    }

    #[test]
    fn add_grows_only_on_carry() {
        let mut n = Natural::from_be_bytes(b"\x01");
        n += 1u64;
        assert_eq!(n, 2);
        assert_eq!(n.capacity(), 1);

        let mut n = Natural::from_be_bytes(b"\x01");
        n += &Natural::from_be_bytes(b"\x01\x00");
        assert_eq!(n, 0x101);
        assert_eq!(n.capacity(), 2);

        let mut n = Natural::from_be_bytes(b"\x01");
        n += &Natural::from_be_bytes(b"\xFF\xFF");
        assert_eq!(n, 0x10000);
        assert_eq!(n.capacity(), 3);
    }

    #[test]
    fn add_keeps_capacity() {
        let mut n = Natural::with_capacity(16);
        n += 0xFFFF_FFFFu64;
        n += 1u64;
        assert_eq!(n, 0x1_0000_0000);
        assert_eq!(n.capacity(), 16);
    }

    #[test]
    fn multiply() {
        let n = Natural::from(0xFFu64) * 0xFFu64;
        assert_eq!(n, 0xFE01);

        let n = Natural::from(u64::MAX) * u64::MAX;
        assert_eq!(n.to_hexstring(), "FFFFFFFFFFFFFFFE0000000000000001");

        let mut n = Natural::from(0x1234u64);
        n *= 0u64;
        assert!(n.is_zero());
        assert_eq!(n.capacity(), 8);

        let mut n = Natural::from(0x1234u64);
        n *= 1u64;
        assert_eq!(n, 0x1234);

        let mut n = Natural::from(3u64);
        n *= &Natural::from(7u64);
        assert_eq!(n, 21);
        assert_eq!(n.capacity(), 8);
    }

    proptest! {
        #[test]
        fn matches_u128(a in any::<u64>(), b in any::<u64>()) {
            let left = Natural::from_be_bytes(&a.to_be_bytes());
            let sum = &left + &Natural::from(b);
            prop_assert_eq!(to_u128(&sum), u128::from(a) + u128::from(b));
            let product = left * b;
            prop_assert_eq!(to_u128(&product), u128::from(a) * u128::from(b));
        }

        #[test]
        fn associativity(a in natural(24), b in natural(18), c in natural(12)) {
            prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
            prop_assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
        }

        #[test]
        fn distributivity(a in natural(24), b in natural(18), c in natural(12)) {
            prop_assert_eq!(
                &a * &(&b + &c),
                &(&a * &b) + &(&a * &c)
            );
        }
    }
}
