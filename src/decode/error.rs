//! Error Handling.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use std::{error, fmt};
use super::source::Pos;


//------------ DecodeError ---------------------------------------------------

/// An error happened while decoding data.
///
/// The error consists of the kind of problem encountered and the position
/// in the input where it was noticed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodeError {
    /// What went wrong.
    kind: ErrorKind,

    /// The position in the input where things went wrong.
    pos: Pos,
}

impl DecodeError {
    /// Creates a new error from its kind and position.
    pub fn new(kind: ErrorKind, pos: impl Into<Pos>) -> Self {
        DecodeError { kind, pos: pos.into() }
    }

    /// Creates a malformed content error at the given position.
    pub fn content(msg: &'static str, pos: impl Into<Pos>) -> Self {
        Self::new(ErrorKind::Malformed(msg), pos)
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the position where the error happened.
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (at position {})", self.kind, self.pos)
    }
}

impl error::Error for DecodeError { }


//------------ ErrorKind -----------------------------------------------------

/// The kind of a decoding error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The length octets are invalid or exceed the available data.
    ///
    /// This covers the indefinite form, the reserved value 0xFF, lengths
    /// too big for a `usize`, and declared lengths exceeding the remaining
    /// input.
    MalformedLength,

    /// The identifier octet uses the high tag number form.
    UnsupportedTagForm,

    /// A value had a different identifier octet than expected.
    UnexpectedTag {
        /// The identifier octet that was expected.
        expected: u8,

        /// The identifier octet that was found.
        found: u8,
    },

    /// The input ended before the value was complete.
    UnexpectedEnd,

    /// The content of a value is invalid for its type.
    Malformed(&'static str),

    /// Content octets were left over after a value had been decoded.
    TrailingData,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ErrorKind::MalformedLength => f.write_str("malformed length"),
            ErrorKind::UnsupportedTagForm => {
                f.write_str("high tag number form not supported")
            }
            ErrorKind::UnexpectedTag { expected, found } => {
                write!(
                    f, "expected identifier {:#04x}, found {:#04x}",
                    expected, found
                )
            }
            ErrorKind::UnexpectedEnd => f.write_str("unexpected end of data"),
            ErrorKind::Malformed(msg) => f.write_str(msg),
            ErrorKind::TrailingData => f.write_str("trailing data"),
        }
    }
}
