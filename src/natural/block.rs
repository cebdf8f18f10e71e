//! Padding to a block size.
//!
//! This is a private module. It only adds methods to its parent.

use super::{Natural, OutOfRange};


impl Natural {
    /// Pads the value to a multiple of `block` octets.
    ///
    /// If the payload isn’t a multiple of the block size, the value is
    /// extended at the least significant end by `k` octets of value `k`,
    /// where `k` is the number of octets missing to the next multiple.
    /// Otherwise nothing happens.
    ///
    /// A block size of zero leaves the value unchanged.
    pub fn pad_block(&mut self, block: u8) {
        if block == 0 {
            return
        }
        let rem = self.payload % usize::from(block);
        if rem == 0 {
            return
        }
        let pad = usize::from(block) - rem;
        for _ in 0..pad {
            *self <<= 8;
            *self += pad as u64;
        }
    }

    /// Removes padding added by [`pad_block`][Self::pad_block].
    ///
    /// The least significant octet is taken as the number of padding
    /// octets and that many octets are dropped. Fails if the value is
    /// zero.
    pub fn unpad_block(&mut self) -> Result<(), OutOfRange> {
        let pad = self.get(-1)?;
        *self >>= 8 * usize::from(pad);
        Ok(())
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pad_and_unpad() {
        let mut n = Natural::from_be_bytes(b"\x01\x02\x03");
        n.pad_block(8);
        assert_eq!(n.payload(), 8);
        assert_eq!(n.as_slice(), b"\x01\x02\x03\x05\x05\x05\x05\x05");
        n.unpad_block().unwrap();
        assert_eq!(n.as_slice(), b"\x01\x02\x03");
    }

    #[test]
    fn aligned_value_is_unchanged() {
        let mut n = Natural::from(0x0102_0304_0506_0708u64);
        n.pad_block(8);
        assert_eq!(n, 0x0102_0304_0506_0708);
        n.pad_block(4);
        assert_eq!(n.payload(), 8);
    }

    #[test]
    fn unpad_zero() {
        assert!(Natural::new().unpad_block().is_err());
    }
}
