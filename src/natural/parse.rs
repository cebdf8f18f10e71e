//! Creating naturals from digit strings.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::{error, fmt};
use std::str::FromStr;
use super::Natural;


//------------ Digit ---------------------------------------------------------

/// A type that can provide a digit character.
///
/// This allows creating naturals from digit sequences of narrow characters
/// as well as of UTF-16 code units.
pub trait Digit: Copy {
    /// Returns the ASCII character for the digit if it is one.
    fn to_ascii(self) -> Option<u8>;
}

impl Digit for u8 {
    fn to_ascii(self) -> Option<u8> {
        Some(self)
    }
}

impl Digit for u16 {
    fn to_ascii(self) -> Option<u8> {
        u8::try_from(self).ok()
    }
}

impl Digit for char {
    fn to_ascii(self) -> Option<u8> {
        if self.is_ascii() {
            Some(self as u8)
        }
        else {
            None
        }
    }
}


//------------ Natural -------------------------------------------------------

impl Natural {
    /// Creates a natural from a sequence of digits in the given radix.
    ///
    /// The radix must be 2, 8, 10, or 16. Hexadecimal digits may be upper or
    /// lower case. Leading zero digits are permitted. An empty sequence
    /// results in zero.
    ///
    /// The capacity of the natural is the number of octets needed for the
    /// largest number the digits could represent.
    pub fn from_digits<D: Digit>(
        radix: u32, digits: &[D]
    ) -> Result<Self, ParseNaturalError> {
        match radix {
            16 => Self::from_hex_digits(digits),
            2 | 8 | 10 => Self::from_radix_digits(radix, digits),
            _ => Err(ParseNaturalError::new(ErrorKind::InvalidRadix(radix)))
        }
    }

    /// Creates a natural from a string of digits in the given radix.
    ///
    /// See [`from_digits`][Self::from_digits] for details.
    pub fn from_str_radix(
        s: &str, radix: u32
    ) -> Result<Self, ParseNaturalError> {
        Self::from_digits(radix, s.as_bytes())
    }

    /// Creates a natural from hexadecimal digits.
    ///
    /// Digits are packed two per octet starting at the least significant
    /// end.
    fn from_hex_digits<D: Digit>(
        digits: &[D]
    ) -> Result<Self, ParseNaturalError> {
        let mut res = Natural::with_capacity((digits.len() + 1) / 2);
        for (idx, pair) in digits.rchunks(2).enumerate() {
            let start = digits.len() - idx * 2 - pair.len();
            let mut octet = 0;
            for (pos, &digit) in pair.iter().enumerate() {
                octet = (octet << 4) | digit_value(16, digit, start + pos)?;
            }
            res.set_lsb(idx, octet as u8);
        }
        res.payload = res.capacity();
        res.trim();
        Ok(res)
    }

    /// Creates a natural from digits of radix 2, 8, or 10.
    ///
    /// Each digit is added to the value accumulated so far multiplied by
    /// the radix.
    fn from_radix_digits<D: Digit>(
        radix: u32, digits: &[D]
    ) -> Result<Self, ParseNaturalError> {
        let bits = match radix {
            2 => 1,
            8 => 3,
            // log2(10) rounded up
            _ => 4,
        };
        let mut res = Natural::with_capacity((digits.len() * bits + 7) / 8);
        for (pos, &digit) in digits.iter().enumerate() {
            let mut carry = digit_value(radix, digit, pos)?;
            for idx in 0..res.payload {
                let value = u32::from(res.lsb(idx)) * radix + carry;
                res.set_lsb(idx, value as u8);
                carry = value >> 8;
            }
            while carry > 0 {
                let idx = res.payload;
                res.reserve(idx + 1);
                res.set_lsb(idx, carry as u8);
                res.payload += 1;
                carry >>= 8;
            }
        }
        Ok(res)
    }
}

/// Returns the value of the digit at position `pos`.
fn digit_value<D: Digit>(
    radix: u32, digit: D, pos: usize
) -> Result<u32, ParseNaturalError> {
    digit.to_ascii().and_then(|ch| {
        char::from(ch).to_digit(radix)
    }).ok_or(ParseNaturalError::new(ErrorKind::InvalidDigit(pos)))
}


//--- FromStr

impl FromStr for Natural {
    type Err = ParseNaturalError;

    /// Parses a natural from a string of decimal digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(s, 10)
    }
}


//------------ ParseNaturalError ---------------------------------------------

/// Creating a natural from digits failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseNaturalError {
    kind: ErrorKind,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ErrorKind {
    /// The radix isn’t supported.
    InvalidRadix(u32),

    /// The digit at the given position is invalid for the radix.
    InvalidDigit(usize),
}

impl ParseNaturalError {
    fn new(kind: ErrorKind) -> Self {
        ParseNaturalError { kind }
    }

    /// Returns the position of the invalid digit if there was one.
    pub fn position(self) -> Option<usize> {
        match self.kind {
            ErrorKind::InvalidDigit(pos) => Some(pos),
            ErrorKind::InvalidRadix(_) => None,
        }
    }
}

impl fmt::Display for ParseNaturalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ErrorKind::InvalidRadix(radix) => {
                write!(f, "unsupported radix {}", radix)
            }
            ErrorKind::InvalidDigit(pos) => {
                write!(f, "invalid digit at position {}", pos)
            }
        }
    }
}

impl error::Error for ParseNaturalError { }


//============ Tests =========================================================
