//! Decoding DER encoded data.
//!
//! Decoding starts with a [`SliceSource`] wrapping the encoded octets and a
//! cursor into them. The source provides methods to take values of the
//! supported primitive types, such as [`SliceSource::take_i64`] or
//! [`SliceSource::take_real`], each of which checks the identifier octet,
//! reads the length octets, and interprets the content.
//!
//! For more fine-grained control, [`SliceSource::take_primitive_if`] hands
//! the content of a primitive value to a closure via the [`Primitive`]
//! type, and [`SliceSource::take_constructed_if`] does the same for
//! constructed values by handing out a source limited to their content.
//!
//! All errors are reported as a [`DecodeError`] which contains an
//! [`ErrorKind`] and the position in the input where the problem was
//! noticed. When a decoding method fails, the cursor of the source is not
//! moved.

pub use self::error::{DecodeError, ErrorKind};
pub use self::primitive::Primitive;
pub use self::source::{Pos, SliceSource};

mod error;
mod primitive;
mod source;
