//! The length octets.
//!
//! This is a private module. Its public items are re-exported by the parent.

use smallvec::SmallVec;
use crate::decode::{DecodeError, ErrorKind, SliceSource};
use crate::encode::Target;


//------------ Length -------------------------------------------------------

/// The length octets of an encoded value.
///
/// Only definite lengths are supported. The value is the number of content
/// octets that follow the length octets.
///
/// # DER Encoding
///
/// The length can be encoded in one of two basic ways. Which one is used is
/// determined by the most significant bit of the first octet. If it is not
/// set, the length octets is one octet long and the remaining bits of this
/// first octet provide the length. Thus, if the first octet is less than
/// 128, it provides the length already.
///
/// If the most significant bit is set, the remaining bits of the first
/// octet specify the number of octets that follow to encode the actual
/// length. Those following octets give the big-endian encoding of the
/// length. The value 0x80, i.e., zero following octets, denotes the
/// indefinite form and is not supported. The value 0xFF is reserved.
///
/// When encoding, the minimum number of octets is used. When decoding,
/// superfluous leading zero octets are tolerated.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Length(usize);

/// The encoded length octets.
///
/// Nine octets are enough for any `usize` on a 64 bit system.
pub type LengthOctets = SmallVec<[u8; 9]>;

impl Length {
    const LEN: usize = 0usize.to_ne_bytes().len();

    /// Creates a new length value.
    pub const fn new(len: usize) -> Self {
        Length(len)
    }

    /// Returns the number of content octets.
    pub const fn value(self) -> usize {
        self.0
    }

    /// Returns the length of the encoded representation of the value.
    ///
    /// This is one for values up to 127 and one plus the number of octets
    /// in the big-endian representation of the value otherwise.
    pub const fn encoded_len(self) -> usize {
        if self.0 > 0x7F {
            Self::LEN - self.encoded_start_idx() + 1
        }
        else {
            1
        }
    }

    /// Returns the encoded length octets.
    pub fn to_octets(self) -> LengthOctets {
        let mut res = LengthOctets::new();
        if self.0 > 0x7F {
            let idx = self.encoded_start_idx();

            // LEN will never be greater than 126 bytes. Also, `idx` won’t be
            // greater than LEN, so the subtraction here is fine.
            res.push(((Self::LEN - idx) | 0x80) as u8);

            #[allow(clippy::slicing_indexing)]
            res.extend_from_slice(&self.0.to_be_bytes()[idx..]);
        }
        else {
            res.push(self.0 as u8)
        }
        res
    }

    /// Appends the encoded length to the end of `target`.
    pub fn append_encoded(self, target: &mut Vec<u8>) {
        target.extend_from_slice(&self.to_octets())
    }

    /// Writes the encoded length to the given target.
    pub fn write_encoded<T: Target>(
        self, target: &mut T
    ) -> Result<(), T::Error> {
        target.write_all(&self.to_octets())
    }

    /// Returns the index of the first non-zero octet of the value.
    const fn encoded_start_idx(self) -> usize {
        (self.0.leading_zeros() / 8) as usize
    }

    /// Takes a length from the beginning of a source.
    ///
    /// The length is checked against the data remaining in the source after
    /// the length octets. A length claiming more content than is available
    /// results in an error.
    pub fn take_from(
        source: &mut SliceSource
    ) -> Result<Self, DecodeError> {
        let pos = source.pos();
        let first = source.take_u8()?;
        let res = match first {
            // Bit 7 clear: single.
            n if (n & 0x80) == 0 => n as usize,

            // 0x80: indefinite, 0xFF: reserved.
            0x80 | 0xFF => {
                xerr!(return Err(
                    DecodeError::new(ErrorKind::MalformedLength, pos)
                ))
            }

            // anything else: clear left bit, number of octets.
            n => {
                let octets = match source.take_slice((n & 0x7F) as usize) {
                    Ok(octets) => octets,
                    Err(_) => {
                        xerr!(return Err(
                            DecodeError::new(ErrorKind::MalformedLength, pos)
                        ))
                    }
                };
                let mut res = 0usize;
                for &octet in octets {
                    if res > (usize::MAX >> 8) {
                        // Too big for a usize.
                        xerr!(return Err(
                            DecodeError::new(ErrorKind::MalformedLength, pos)
                        ))
                    }
                    res = (res << 8) | octet as usize;
                }
                res
            }
        };
        if res > source.remaining().len() {
            xerr!(return Err(
                DecodeError::new(ErrorKind::MalformedLength, pos)
            ))
        }
        Ok(Length(res))
    }
}

impl From<usize> for Length {
    fn from(len: usize) -> Self {
        Length(len)
    }
}

impl From<Length> for usize {
    fn from(len: Length) -> Self {
        len.0
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    /// Decodes a length from `src` which is followed by `content` octets.
    fn take_from(src: &[u8], content: usize) -> Result<usize, DecodeError> {
        let mut data = src.to_vec();
        data.resize(src.len() + content, 0);
        let mut source = SliceSource::new(&data);
        let res = Length::take_from(&mut source)?;
        assert_eq!(source.offset(), src.len());
        Ok(res.value())
    }

    #[test]
    fn take_from_definite() {
        assert_eq!(take_from(b"\x00", 0).unwrap(), 0x00);
        assert_eq!(take_from(b"\x12", 0x12).unwrap(), 0x12);
        assert_eq!(take_from(b"\x7f", 0x7f).unwrap(), 0x7f);
        assert_eq!(take_from(b"\x81\x80", 0x80).unwrap(), 0x80);
        assert_eq!(take_from(b"\x81\xF0", 0xF0).unwrap(), 0xF0);
        assert_eq!(take_from(b"\x82\x01\x00", 0x100).unwrap(), 0x100);
        assert_eq!(take_from(b"\x82\xF0\x0E", 0xF00E).unwrap(), 0xF00E);

        // Non-minimal forms are tolerated.
        assert_eq!(take_from(b"\x81\x05", 5).unwrap(), 5);
        assert_eq!(take_from(b"\x82\x00\x0E", 0x0E).unwrap(), 0x0E);
        assert_eq!(
            take_from(b"\x8A\x00\x00\x00\x00\x00\x00\x00\x00\x00\x01", 1)
                .unwrap(),
            1
        );
    }

    #[test]
    fn take_from_malformed() {
        fn kind(src: &[u8]) -> ErrorKind {
            Length::take_from(&mut SliceSource::new(src)).unwrap_err().kind()
        }

        assert_eq!(kind(b"\x80"), ErrorKind::MalformedLength);
        assert_eq!(kind(b"\xFF"), ErrorKind::MalformedLength);
        assert_eq!(kind(b"\x82\x01"), ErrorKind::MalformedLength);
        assert_eq!(kind(b"\x05\x00\x00"), ErrorKind::MalformedLength);
        assert_eq!(kind(b"\x81\x03\x00"), ErrorKind::MalformedLength);
        assert_eq!(
            kind(b"\x89\x01\x00\x00\x00\x00\x00\x00\x00\x00"),
            ErrorKind::MalformedLength
        );
        assert_eq!(kind(b""), ErrorKind::UnexpectedEnd);
    }

    #[test]
    fn encode() {
        fn octets(len: usize) -> Vec<u8> {
            let mut res = Vec::new();
            Length::new(len).append_encoded(&mut res);
            assert_eq!(res.len(), Length::new(len).encoded_len());
            res
        }

        assert_eq!(octets(0), b"\x00");
        assert_eq!(octets(127), b"\x7F");
        assert_eq!(octets(128), b"\x81\x80");
        assert_eq!(octets(255), b"\x81\xFF");
        assert_eq!(octets(256), b"\x82\x01\x00");
        assert_eq!(octets(0xF00E), b"\x82\xF0\x0E");
        assert_eq!(octets(0x01_0000), b"\x83\x01\x00\x00");
    }

    #[test]
    fn encoded_len() {
        assert_eq!(Length::new(0).encoded_len(), 1);
        assert_eq!(Length::new(0x7F).encoded_len(), 1);
        assert_eq!(Length::new(0x80).encoded_len(), 2);
        assert_eq!(Length::new(0xFF).encoded_len(), 2);
        assert_eq!(Length::new(0x100).encoded_len(), 3);
        assert_eq!(Length::new(0xFFFF).encoded_len(), 3);
        assert_eq!(Length::new(0x1_0000).encoded_len(), 4);
    }

    #[test]
    fn round_trip() {
        for &len in &[0usize, 1, 0x7F, 0x80, 0x1FF, 0x1_0000] {
            let mut data = Length::new(len).to_octets().to_vec();
            data.resize(data.len() + len, 0xAA);
            let mut source = SliceSource::new(&data);
            assert_eq!(Length::take_from(&mut source).unwrap().value(), len);
            assert_eq!(source.remaining().len(), len);
        }
    }
}
