//! Targets for encoding.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use std::{error, fmt};
use std::convert::Infallible;
use bytes::BytesMut;


//------------ Target --------------------------------------------------------

/// A target for encoding.
///
/// This type provides a simplified version of `io::Write` that allows an
/// implementing type to define its own error type. The main purpose is to
/// be able to set the error to `Infallible`. This allows users to erase
/// the error case and avoid unnecessary `unwrap`s.
pub trait Target {
    /// The error type of the target.
    type Error: error::Error;

    /// Writes the data to the target.
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Target> Target for &mut T {
    type Error = T::Error;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (*self).write_all(data)
    }
}

impl Target for Vec<u8> {
    type Error = Infallible;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(data);
        Ok(())
    }
}

impl Target for BytesMut {
    type Error = Infallible;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(data);
        Ok(())
    }
}


//------------ SliceTarget ---------------------------------------------------

/// A target writing into a caller-provided buffer.
///
/// Writing starts at a given offset. Data that doesn’t fit into the
/// remainder of the buffer results in a [`ShortBuf`] error. In this case,
/// nothing of the offending write is stored.
#[derive(Debug)]
pub struct SliceTarget<'a> {
    /// The buffer to write to.
    buf: &'a mut [u8],

    /// The offset of the next octet to be written.
    offset: usize,
}

impl<'a> SliceTarget<'a> {
    /// Creates a new target writing to `buf` starting at `offset`.
    pub fn new(buf: &'a mut [u8], offset: usize) -> Self {
        SliceTarget { buf, offset }
    }

    /// Returns the offset of the next octet to be written.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Target for SliceTarget<'_> {
    type Error = ShortBuf;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let end = match self.offset.checked_add(data.len()) {
            Some(end) => end,
            None => return Err(ShortBuf(()))
        };
        match self.buf.get_mut(self.offset..end) {
            Some(dest) => {
                dest.copy_from_slice(data);
                self.offset = end;
                Ok(())
            }
            None => Err(ShortBuf(()))
        }
    }
}


//------------ ShortBuf ------------------------------------------------------

/// The buffer provided for encoding was too short.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ShortBuf(());

impl fmt::Display for ShortBuf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("buffer too short")
    }
}

impl error::Error for ShortBuf { }


//------------ infallible ----------------------------------------------------

/// Erases an error if it can’t happen.
#[allow(unreachable_code)]
pub fn infallible<T, E: Into<Infallible>>(res: Result<T, E>) -> T {
    match res {
        Ok(some) => some,
        Err(err) => match err.into() { }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn slice_target() {
        let mut buf = [0u8; 4];
        let mut target = SliceTarget::new(&mut buf, 1);
        target.write_all(b"\x01\x02").unwrap();
        assert_eq!(target.offset(), 3);
        assert_eq!(target.write_all(b"\x03\x04"), Err(ShortBuf(())));
        assert_eq!(target.offset(), 3);
        target.write_all(b"\x03").unwrap();
        assert_eq!(buf, [0, 1, 2, 3]);
    }

    #[test]
    fn offset_beyond_buffer() {
        let mut buf = [0u8; 2];
        let mut target = SliceTarget::new(&mut buf, 5);
        assert!(target.write_all(b"").is_err());
        assert!(target.write_all(b"\x01").is_err());
    }
}
