//! Arbitrary-precision natural numbers.
//!
//! The [`Natural`] type stores a non-negative integer of any size as a
//! big-endian sequence of octets. It provides the arithmetic and bitwise
//! operations needed for handling key material and large INTEGER values,
//! byte and fixed-width word access, and conversion from and to digit
//! strings.

use std::{cmp, error, fmt, hash};
use bytes::Bytes;

pub use self::parse::{Digit, ParseNaturalError};

mod arith;
mod bits;
mod block;
mod parse;


//------------ Natural -------------------------------------------------------

/// An arbitrary-precision natural number.
///
/// The value is kept in a buffer of octets in big-endian order. Only the
/// trailing part of the buffer, the _payload,_ is significant. Octets
/// before the payload are spare capacity that operations can grow into
/// without reallocating.
///
/// The first octet of the payload is never zero. The value zero has an
/// empty payload.
///
/// Operations never shrink the buffer. It only grows when a result doesn’t
/// fit into the current buffer.
///
/// # Moving out
///
/// The default value is an empty natural without any buffer. It compares
/// equal to zero. Taking a natural via [`std::mem::take`] leaves this value
/// behind.
#[derive(Default)]
pub struct Natural {
    /// The buffer.
    ///
    /// Its length is the capacity of the natural.
    natural: Vec<u8>,

    /// The number of significant octets at the end of the buffer.
    payload: usize,
}

/// # Creation
///
impl Natural {
    /// Creates a new, empty natural.
    ///
    /// The natural has the value zero and no capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a natural with the value zero and the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Natural { natural: vec![0; capacity], payload: 0 }
    }

    /// Creates a natural from its big-endian octets.
    ///
    /// The capacity of the natural will be the length of the slice.
    /// Leading zero octets are permitted but not significant.
    pub fn from_be_bytes(octets: &[u8]) -> Self {
        let mut res = Natural {
            natural: octets.into(),
            payload: octets.len(),
        };
        res.trim();
        res
    }

    /// Creates a natural from big-endian 16 bit words.
    ///
    /// Each word provides two octets, most significant octet first.
    pub fn from_be_words(words: &[u16]) -> Self {
        let mut natural = Vec::with_capacity(words.len() * 2);
        for word in words {
            natural.extend_from_slice(&word.to_be_bytes());
        }
        let mut res = Natural { payload: natural.len(), natural };
        res.trim();
        res
    }
}

/// # Access to Content
///
impl Natural {
    /// Returns the capacity of the natural in octets.
    pub fn capacity(&self) -> usize {
        self.natural.len()
    }

    /// Returns the number of significant octets.
    pub fn payload(&self) -> usize {
        self.payload
    }

    /// Returns the number of significant octets.
    ///
    /// This is the same as [`payload`][Self::payload].
    pub fn length(&self) -> usize {
        self.payload
    }

    /// Returns the number of significant bits.
    ///
    /// This is zero for the value zero.
    pub fn integer_length(&self) -> usize {
        match self.as_slice().first() {
            Some(&first) => {
                (self.payload - 1) * 8 + (8 - first.leading_zeros() as usize)
            }
            None => 0
        }
    }

    /// Returns whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.payload == 0
    }

    /// Returns whether the value is one.
    pub fn is_one(&self) -> bool {
        self.as_slice() == [1]
    }

    /// Returns the significant octets in big-endian order.
    ///
    /// The slice is empty for zero.
    pub fn as_slice(&self) -> &[u8] {
        // The invariant guarantees payload <= natural.len().
        self.natural.get(self.natural.len() - self.payload..)
            .unwrap_or_default()
    }

    /// Returns the significant octets in a bytes value.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_slice())
    }

    /// Returns the value as upper case hexadecimal digits.
    ///
    /// Each octet is rendered as two digits, so there is always an even
    /// number of them. Zero is rendered as `"00"`.
    pub fn to_hexstring(&self) -> String {
        format!("{:X}", self)
    }

    /// Returns the value as a `u64` if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.payload > 8 {
            return None
        }
        Some(self.as_slice().iter().fold(0, |res, &octet| {
            (res << 8) | u64::from(octet)
        }))
    }
}

/// # Octet and Word Access
///
/// Indexes can be given from either end. Non-negative indexes count from
/// the most significant octet starting at zero. Negative indexes count from
/// the least significant octet, so that `-1` is the least significant
/// octet.
impl Natural {
    /// Returns the octet at `index`.
    pub fn get(&self, index: isize) -> Result<u8, OutOfRange> {
        let pos = self.resolve(index)?;
        self.natural.get(pos).copied().ok_or(
            OutOfRange::new(index, self.payload)
        )
    }

    /// Replaces the octet at `index`.
    ///
    /// Setting the most significant octet to zero reduces the payload.
    pub fn set(&mut self, index: isize, value: u8) -> Result<(), OutOfRange> {
        let pos = self.resolve(index)?;
        match self.natural.get_mut(pos) {
            Some(octet) => *octet = value,
            None => return Err(OutOfRange::new(index, self.payload))
        }
        self.trim();
        Ok(())
    }

    /// Returns the buffer position of a payload index.
    fn resolve(&self, index: isize) -> Result<usize, OutOfRange> {
        let cap = self.capacity();
        let idx = index.unsigned_abs();
        if index >= 0 {
            if idx < self.payload {
                return Ok(cap - self.payload + idx)
            }
        }
        else if idx <= self.payload {
            return Ok(cap - idx)
        }
        Err(OutOfRange::new(index, self.payload))
    }

    /// Returns a 16 bit word of the value.
    ///
    /// See [`fixnum64`][Self::fixnum64] for the meaning of the arguments.
    pub fn fixnum16(
        &self, index: isize, offset: usize
    ) -> Result<u16, OutOfRange> {
        self.fixnum(Fixnum::U16, index, offset).map(|res| res as u16)
    }

    /// Returns a 32 bit word of the value.
    ///
    /// See [`fixnum64`][Self::fixnum64] for the meaning of the arguments.
    pub fn fixnum32(
        &self, index: isize, offset: usize
    ) -> Result<u32, OutOfRange> {
        self.fixnum(Fixnum::U32, index, offset).map(|res| res as u32)
    }

    /// Returns a 64 bit word of the value.
    ///
    /// The payload is viewed as a sequence of words of eight octets each.
    /// For a non-negative `index`, the word starts `offset + index * 8`
    /// octets after the most significant octet. For a negative index, the
    /// words are counted from the least significant end with `-1` being
    /// the word ending `offset` octets before the least significant octet.
    ///
    /// Octets of the word that fall outside of the payload are taken as
    /// zero. If no octet of the word is within the payload, an error is
    /// returned.
    pub fn fixnum64(
        &self, index: isize, offset: usize
    ) -> Result<u64, OutOfRange> {
        self.fixnum(Fixnum::U64, index, offset)
    }

    /// Returns a word of the given width.
    pub fn fixnum(
        &self, width: Fixnum, index: isize, offset: usize
    ) -> Result<u64, OutOfRange> {
        let payload = self.payload as i128;
        let width_octets = width.octets() as i128;
        let offset = offset as i128;
        let idx = index as i128;
        let start = if index >= 0 {
            offset + idx * width_octets
        }
        else {
            payload - offset + idx * width_octets
        };
        let end = start + width_octets;
        if end <= 0 || start >= payload {
            return Err(OutOfRange::new(index, self.payload))
        }
        let slice = self.as_slice();
        let mut res = 0u64;
        for pos in start..end {
            res <<= 8;
            if let Ok(pos) = usize::try_from(pos) {
                if let Some(&octet) = slice.get(pos) {
                    res |= u64::from(octet);
                }
            }
        }
        Ok(res)
    }

    /// Returns the number of words of the given width in the payload.
    ///
    /// A partial word at the most significant end is counted as a word.
    pub fn fixnum_count(&self, width: Fixnum) -> usize {
        let width = width.octets();
        (self.payload + width - 1) / width
    }
}

/// # Internal Helpers
///
impl Natural {
    /// Returns the octet `idx` places from the least significant end.
    ///
    /// Octets beyond the payload are zero.
    fn lsb(&self, idx: usize) -> u8 {
        if idx < self.payload {
            self.natural[self.capacity() - 1 - idx]
        }
        else {
            0
        }
    }

    /// Sets the octet `idx` places from the least significant end.
    ///
    /// The octet must be within the capacity. The payload isn’t changed.
    fn set_lsb(&mut self, idx: usize, value: u8) {
        let cap = self.capacity();
        self.natural[cap - 1 - idx] = value;
    }

    /// Grows the buffer to at least `capacity` octets.
    ///
    /// The payload is moved to the end of the new buffer.
    fn reserve(&mut self, capacity: usize) {
        if capacity <= self.capacity() {
            return
        }
        let mut natural = vec![0; capacity];
        natural[capacity - self.payload..].copy_from_slice(self.as_slice());
        self.natural = natural;
    }

    /// Drops leading zero octets from the payload.
    fn trim(&mut self) {
        let cap = self.capacity();
        while self.payload > 0 && self.natural[cap - self.payload] == 0 {
            self.payload -= 1;
        }
    }

    /// Replaces the payload with the given big-endian octets.
    ///
    /// The buffer is reused if it is large enough.
    fn replace_payload(&mut self, octets: Vec<u8>) {
        let len = octets.len();
        if len > self.capacity() {
            self.natural = octets;
        }
        else {
            let cap = self.capacity();
            self.natural[cap - len..].copy_from_slice(&octets);
        }
        self.payload = len;
        self.trim();
    }
}

/// Returns the significant big-endian octets of a `u64`.
pub(crate) fn u64_octets(value: u64) -> ([u8; 8], usize) {
    (value.to_be_bytes(), (value.leading_zeros() / 8) as usize)
}


//--- Clone

impl Clone for Natural {
    /// Clones the natural.
    ///
    /// Only the payload is copied. The capacity of the clone is the length
    /// of the payload.
    fn clone(&self) -> Self {
        Natural {
            natural: self.as_slice().into(),
            payload: self.payload,
        }
    }
}


//--- From

impl From<u64> for Natural {
    /// Creates a natural from a `u64`.
    ///
    /// The natural will have a capacity of eight octets.
    fn from(value: u64) -> Self {
        let mut res = Natural {
            natural: value.to_be_bytes().into(),
            payload: 8,
        };
        res.trim();
        res
    }
}

impl From<u32> for Natural {
    fn from(value: u32) -> Self {
        Self::from(u64::from(value))
    }
}

impl From<&'_ [u8]> for Natural {
    fn from(octets: &[u8]) -> Self {
        Self::from_be_bytes(octets)
    }
}


//--- PartialEq and Eq

impl PartialEq for Natural {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Natural { }

impl PartialEq<u64> for Natural {
    fn eq(&self, other: &u64) -> bool {
        self.to_u64() == Some(*other)
    }
}


//--- PartialOrd and Ord

impl PartialOrd for Natural {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Natural {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.payload.cmp(&other.payload).then_with(|| {
            self.as_slice().cmp(other.as_slice())
        })
    }
}


//--- Hash

impl hash::Hash for Natural {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}


//--- AsRef

impl AsRef<[u8]> for Natural {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}


//--- Display and Debug

impl fmt::UpperHex for Natural {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("00")
        }
        for octet in self.as_slice() {
            write!(f, "{:02X}", octet)?;
        }
        Ok(())
    }
}

impl fmt::LowerHex for Natural {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("00")
        }
        for octet in self.as_slice() {
            write!(f, "{:02x}", octet)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Natural {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Natural(0x{:X}, capacity {})", self, self.capacity())
    }
}


//------------ Fixnum --------------------------------------------------------

/// The width of a word extracted from a natural.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Fixnum {
    U16,
    U32,
    U64,
}

impl Fixnum {
    /// Returns the number of octets in a word.
    pub const fn octets(self) -> usize {
        match self {
            Fixnum::U16 => 2,
            Fixnum::U32 => 4,
            Fixnum::U64 => 8,
        }
    }
}


//------------ OutOfRange ----------------------------------------------------

/// An index was outside the payload of a natural.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OutOfRange {
    /// The index that was requested.
    index: isize,

    /// The payload of the natural at the time.
    payload: usize,
}

impl OutOfRange {
    fn new(index: isize, payload: usize) -> Self {
        OutOfRange { index, payload }
    }

    /// Returns the offending index.
    pub fn index(self) -> isize {
        self.index
    }

    /// Returns the number of significant octets of the natural.
    pub fn payload(self) -> usize {
        self.payload
    }
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f, "index {} out of range for {} significant octets",
            self.index, self.payload
        )
    }
}

impl error::Error for OutOfRange { }


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_u64() {
        let n = Natural::from(0x0102u64);
        assert_eq!(n.capacity(), 8);
        assert_eq!(n.payload(), 2);
        assert_eq!(n.as_slice(), b"\x01\x02");

        let zero = Natural::from(0u64);
        assert!(zero.is_zero());
        assert_eq!(zero.capacity(), 8);
        assert_eq!(zero, Natural::new());
    }

    #[test]
    fn from_be_bytes() {
        let n = Natural::from_be_bytes(b"\x00\x00\xAB\xCD");
        assert_eq!(n.capacity(), 4);
        assert_eq!(n.as_slice(), b"\xAB\xCD");
        assert_eq!(n, 0xABCD);

        let n = Natural::from_be_words(&[0x0001, 0x8000]);
        assert_eq!(n.capacity(), 4);
        assert_eq!(n.as_slice(), b"\x01\x80\x00");
    }

    #[test]
    fn predicates() {
        assert!(Natural::new().is_zero());
        assert!(Natural::from(1u64).is_one());
        assert!(!Natural::from(0x101u64).is_one());
        assert_eq!(Natural::from(0u64).integer_length(), 0);
        assert_eq!(Natural::from(1u64).integer_length(), 1);
        assert_eq!(Natural::from(0x1FFu64).integer_length(), 9);
        assert_eq!(Natural::from(0x1FFu64).length(), 2);
    }

    #[test]
    fn clone_copies_payload_only() {
        let n = Natural::from(0x1234u64);
        let m = n.clone();
        assert_eq!(n, m);
        assert_eq!(m.capacity(), 2);

        let mut n = Natural::from(7u64);
        let m = std::mem::take(&mut n);
        assert_eq!(m, 7);
        assert!(n.is_zero());
        assert_eq!(n.capacity(), 0);
    }

    #[test]
    fn hexstring() {
        assert_eq!(Natural::new().to_hexstring(), "00");
        assert_eq!(Natural::from(0u64).to_hexstring(), "00");
        assert_eq!(Natural::from(0xAu64).to_hexstring(), "0A");
        assert_eq!(Natural::from(0x1ABCu64).to_hexstring(), "1ABC");
        assert_eq!(format!("{:x}", Natural::from(0xBEEFu64)), "beef");
    }

    #[test]
    fn octet_access() {
        let mut n = Natural::from(0x0A0B0Cu64);
        assert_eq!(n.get(0), Ok(0x0A));
        assert_eq!(n.get(2), Ok(0x0C));
        assert_eq!(n.get(-1), Ok(0x0C));
        assert_eq!(n.get(-3), Ok(0x0A));
        assert_eq!(n.get(3), Err(OutOfRange::new(3, 3)));
        assert_eq!(n.get(-4), Err(OutOfRange::new(-4, 3)));

        n.set(-1, 0xFF).unwrap();
        assert_eq!(n, 0x0A0BFF);
        n.set(0, 0).unwrap();
        assert_eq!(n.payload(), 2);
        assert_eq!(n, 0x0BFF);
        assert!(Natural::new().get(0).is_err());
        assert!(Natural::new().get(-1).is_err());
    }

    #[test]
    fn fixnums() {
        let n = Natural::from_be_bytes(
            b"\x01\x02\x03\x04\x05\x06\x07\x08\x09\x0A"
        );
        assert_eq!(n.fixnum16(0, 0), Ok(0x0102));
        assert_eq!(n.fixnum16(1, 0), Ok(0x0304));
        assert_eq!(n.fixnum16(0, 1), Ok(0x0203));
        assert_eq!(n.fixnum16(-1, 0), Ok(0x090A));
        assert_eq!(n.fixnum16(-2, 0), Ok(0x0708));
        assert_eq!(n.fixnum16(-1, 1), Ok(0x0809));
        assert_eq!(n.fixnum32(-1, 0), Ok(0x0708090A));
        assert_eq!(n.fixnum64(-1, 0), Ok(0x030405060708090A));
        assert_eq!(n.fixnum64(0, 0), Ok(0x0102030405060708));

        // Partial words are padded with zeros.
        assert_eq!(n.fixnum64(-2, 0), Ok(0x0102));
        assert_eq!(n.fixnum64(1, 0), Ok(0x090A000000000000));

        assert!(n.fixnum64(-3, 0).is_err());
        assert!(n.fixnum16(5, 0).is_err());
        assert!(n.fixnum16(0, 10).is_err());

        assert_eq!(n.fixnum_count(Fixnum::U16), 5);
        assert_eq!(n.fixnum_count(Fixnum::U32), 3);
        assert_eq!(n.fixnum_count(Fixnum::U64), 2);
        assert_eq!(Natural::new().fixnum_count(Fixnum::U64), 0);
    }

    #[test]
    fn ordering() {
        let small = Natural::from(0xFFu64);
        let big = Natural::from_be_bytes(b"\x00\x01\x00");
        assert!(small < big);
        assert_eq!(big.cmp(&Natural::from(0x100u64)), cmp::Ordering::Equal);
        assert!(Natural::new() < small);
    }

    #[test]
    fn to_u64() {
        assert_eq!(Natural::from(u64::MAX).to_u64(), Some(u64::MAX));
        assert_eq!(
            Natural::from_be_bytes(b"\x01\x00\x00\x00\x00\x00\x00\x00\x00")
                .to_u64(),
            None
        );
    }
}
