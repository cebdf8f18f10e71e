//! Encoding data in DER.
//!
//! This modules provides means to encode data in DER.
//!
//! Encoding is done using helper types called _encoders_ that represent the
//! structure of the DER encoding. These types implement the trait
//! [`Values`]. A type that can be encoded as DER typically provides a method
//! named `encode` that produces a value of its encoder type representing the
//! value’s encoding.  If necessary, they can also provide a method
//! `encode_as` that does the same thing but allows the caller to provide an
//! tag to use for encoding as is necessary for implicit tagging.
//!
//! The [`Values`] type can then be used to simply write the encoding to
//! anything that implements the [`Target`] trait, to collect it into a
//! vec or bytes value, or to place it into a caller-provided buffer.
//!
//! The trait [`PrimitiveContent`] helps with producing encoders for types
//! that use the primitive encoding. Through this trait the types can declare
//! how their content is encoded and receive an automatic encoder type based
//! on that.

pub use self::primitive::{PrimitiveContent, Primitive};
pub use self::target::{ShortBuf, SliceTarget, Target, infallible};
pub use self::values::{
    Values, Constructed, sequence, total_len, write_header,
};

mod primitive;
mod target;
mod values;
