//! The identifier octet of a DER encoded value.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::{error, fmt};
use crate::decode::{DecodeError, ErrorKind, SliceSource};
use crate::encode::Target;


//------------ Tag -----------------------------------------------------------

/// The tag of a DER encoded value.
///
/// Each encoded value starts with a single octet called the _identifier
/// octet._ It encodes both the tag of the value and whether the value uses
/// primitive or constructed encoding. The `Tag` type represents the tag
/// only, i.e., the class and the number within the class. The constructed
/// flag is added by [`Ident`].
///
/// # Limitations
///
/// Only the low tag number form is supported. Tag numbers must be between
/// 0 and 30. Number 31 marks the high tag number form in the identifier
/// octet and is rejected with [`UnsupportedTagForm`].
//
//  Internally, we store the tag as the identifier octet of a primitive value
//  with the same tag.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Tag(u8);

impl Tag {
    /// The largest tag number available in the low tag number form.
    pub const MAX_NUMBER: u8 = 0x1e;

    /// The mask for the class bits of the identifier octet.
    const CLASS_MASK: u8 = 0xc0;

    /// The mask for the number bits of the identifier octet.
    const NUMBER_MASK: u8 = 0x1f;

    /// Creates a tag from a class and number.
    ///
    /// # Panics
    ///
    /// The function panics if `number` is greater than
    /// [`Tag::MAX_NUMBER`]. Use [`Tag::try_new`] for a fallible version.
    pub const fn new(class: Class, number: u8) -> Self {
        assert!(number <= Self::MAX_NUMBER, "tag number too large");
        Self(class.into_u8() | number)
    }

    /// Creates a tag from a class and number if the number is supported.
    pub const fn try_new(
        class: Class, number: u8
    ) -> Result<Self, UnsupportedTagForm> {
        if number <= Self::MAX_NUMBER {
            Ok(Self(class.into_u8() | number))
        }
        else {
            Err(UnsupportedTagForm(class.into_u8() | Self::NUMBER_MASK))
        }
    }

    /// Creates a new tag in the universal class.
    pub const fn universal(number: u8) -> Self {
        Self::new(Class::Universal, number)
    }

    /// Creates a new tag in the application class.
    pub const fn application(number: u8) -> Self {
        Self::new(Class::Application, number)
    }

    /// Creates a new tag in class “context specific” with the given number.
    pub const fn ctx(number: u8) -> Self {
        Self::new(Class::Context, number)
    }

    /// Creates a new tag in the private class.
    pub const fn private(number: u8) -> Self {
        Self::new(Class::Private, number)
    }

    /// Returns the class of the tag.
    pub const fn class(self) -> Class {
        Class::from_u8(self.0)
    }

    /// Returns the number of the tag.
    pub const fn number(self) -> u8 {
        self.0 & Self::NUMBER_MASK
    }

    /// Returns whether the tag is of the universal class.
    pub const fn is_universal(self) -> bool {
        self.0 & Self::CLASS_MASK == 0
    }
}

/// # Constants for universal tags.
///
/// See clause 8.4 of ITU Recommendation X.690. Only the tags of the types
/// supported by this crate are provided.
impl Tag {
    /// The tag for the BOOLEAN type, UNIVERSAL 1.
    pub const BOOLEAN: Self = Self::new(Class::Universal, 1);

    /// The tag for the INTEGER type, UNIVERSAL 2.
    pub const INTEGER: Self = Self::new(Class::Universal, 2);

    /// The tag for the NULL type, UNIVERSAL 5.
    pub const NULL: Self = Self::new(Class::Universal, 5);

    /// The tag for the REAL type, UNIVERSAL 9.
    pub const REAL: Self = Self::new(Class::Universal, 9);

    /// The tag for the ENUMERATED type, UNIVERSAL 10.
    pub const ENUMERATED: Self = Self::new(Class::Universal, 10);

    /// The tag for the UTF8String type, UNIVERSAL 12.
    pub const UTF8_STRING: Self = Self::new(Class::Universal, 12);

    /// The tag for the SEQUENCE and SEQUENCE OF types, UNIVERSAL 16.
    pub const SEQUENCE: Self = Self::new(Class::Universal, 16);

    /// The tag for the IA5String type, UNIVERSAL 22.
    pub const IA5_STRING: Self = Self::new(Class::Universal, 22);
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Tag::BOOLEAN => write!(f, "BOOLEAN"),
            Tag::INTEGER => write!(f, "INTEGER"),
            Tag::NULL => write!(f, "NULL"),
            Tag::REAL => write!(f, "REAL"),
            Tag::ENUMERATED => write!(f, "ENUMERATED"),
            Tag::UTF8_STRING => write!(f, "UTF8String"),
            Tag::SEQUENCE => write!(f, "SEQUENCE"),
            Tag::IA5_STRING => write!(f, "IA5String"),
            tag => {
                match tag.class() {
                    Class::Universal => write!(f, "[UNIVERSAL ")?,
                    Class::Application => write!(f, "[APPLICATION ")?,
                    Class::Context => write!(f, "[")?,
                    Class::Private => write!(f, "[PRIVATE ")?,
                }
                write!(f, "{}]", tag.number())
            }
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({} - {:#04x})", self, self.0)
    }
}


//------------ Ident ---------------------------------------------------------

/// The identifier octet of an encoded value.
///
/// The octet combines the tag of the value with a flag stating whether the
/// value is constructed: the top two bits are the class, the next bit is
/// the constructed flag, and the low five bits are the tag number.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Ident {
    /// The tag of the value.
    tag: Tag,

    /// Whether the value uses constructed encoding.
    constructed: bool,
}

impl Ident {
    /// The constructed flag in the identifier octet.
    const CONSTRUCTED_MASK: u8 = 0x20;

    /// The identifier of a SEQUENCE value.
    pub const SEQUENCE: Self = Self::new(Tag::SEQUENCE, true);

    /// Creates a new identifier from a tag and the constructed flag.
    pub const fn new(tag: Tag, constructed: bool) -> Self {
        Self { tag, constructed }
    }

    /// Creates an identifier from its three components.
    ///
    /// Returns an error if `number` needs the high tag number form.
    pub const fn from_parts(
        number: u8, constructed: bool, class: Class
    ) -> Result<Self, UnsupportedTagForm> {
        match Tag::try_new(class, number) {
            Ok(tag) => Ok(Self::new(tag, constructed)),
            Err(err) => Err(err),
        }
    }

    /// Interprets an identifier octet.
    ///
    /// Returns an error if the octet announces the high tag number form.
    pub const fn from_octet(octet: u8) -> Result<Self, UnsupportedTagForm> {
        if octet & Tag::NUMBER_MASK == Tag::NUMBER_MASK {
            return Err(UnsupportedTagForm(octet))
        }
        Ok(Self {
            tag: Tag(octet & !Self::CONSTRUCTED_MASK),
            constructed: octet & Self::CONSTRUCTED_MASK != 0,
        })
    }

    /// Returns the identifier octet.
    pub const fn to_octet(self) -> u8 {
        if self.constructed {
            self.tag.0 | Self::CONSTRUCTED_MASK
        }
        else {
            self.tag.0
        }
    }

    /// Returns the tag of the identifier.
    pub const fn tag(self) -> Tag {
        self.tag
    }

    /// Returns the class of the identifier.
    pub const fn class(self) -> Class {
        self.tag.class()
    }

    /// Returns the tag number of the identifier.
    pub const fn number(self) -> u8 {
        self.tag.number()
    }

    /// Returns whether the value is constructed.
    pub const fn is_constructed(self) -> bool {
        self.constructed
    }

    /// Returns whether the octet at `offset` in `data` is this identifier.
    ///
    /// Returns `false` if `data` is too short.
    pub fn is_at(self, data: &[u8], offset: usize) -> bool {
        data.get(offset).copied() == Some(self.to_octet())
    }

    /// Takes an identifier from the beginning of a source.
    pub fn take_from(source: &mut SliceSource) -> Result<Self, DecodeError> {
        let pos = source.pos();
        let octet = source.take_u8()?;
        Self::from_octet(octet).map_err(|_| {
            xerr!(DecodeError::new(ErrorKind::UnsupportedTagForm, pos))
        })
    }

    /// Returns the length of the encoded identifier.
    pub const fn encoded_len(self) -> usize {
        1
    }

    /// Writes the identifier octet to a target.
    pub fn write_encoded<T: Target>(
        self, target: &mut T
    ) -> Result<(), T::Error> {
        target.write_all(&[self.to_octet()])
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f, "Ident({}{})",
            self.tag,
            if self.constructed { ", constructed" } else { "" }
        )
    }
}


//------------ Class ---------------------------------------------------------

/// The class of a tag.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Class {
    Universal,
    Application,
    Context,
    Private,
}

impl Class {
    const fn from_u8(octet: u8) -> Self {
        match octet {
            0x00..=0x3F => Self::Universal,
            0x40..=0x7F => Self::Application,
            0x80..=0xBF => Self::Context,
            0xC0..=0xFF => Self::Private
        }
    }

    const fn into_u8(self) -> u8 {
        match self {
            Self::Universal => 0x00,
            Self::Application => 0x40,
            Self::Context => 0x80,
            Self::Private => 0xC0,
        }
    }
}


//------------ PrimitiveKind -------------------------------------------------

/// The primitive types supported by this crate.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PrimitiveKind {
    Boolean,
    Integer,
    Null,
    Real,
    Enumerated,
    Utf8String,
    Ia5String,
}

impl PrimitiveKind {
    /// The universal tags of the primitive kinds in declaration order.
    const TAGS: [Tag; 7] = [
        Tag::BOOLEAN,
        Tag::INTEGER,
        Tag::NULL,
        Tag::REAL,
        Tag::ENUMERATED,
        Tag::UTF8_STRING,
        Tag::IA5_STRING,
    ];

    /// Returns the universal tag of the kind.
    pub const fn tag(self) -> Tag {
        Self::TAGS[self as usize]
    }

    /// Returns the identifier octet of a value of this kind.
    pub const fn identifier(self) -> u8 {
        Ident::new(self.tag(), false).to_octet()
    }

    /// Returns whether a value of this kind starts at `offset` in `data`.
    ///
    /// This only checks the identifier octet. It can be used to decide
    /// which decoder to use before committing to one.
    pub fn is_at(self, data: &[u8], offset: usize) -> bool {
        Ident::new(self.tag(), false).is_at(data, offset)
    }
}


//------------ UnsupportedTagForm --------------------------------------------

/// An identifier octet used the high tag number form.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnsupportedTagForm(u8);

impl UnsupportedTagForm {
    /// Returns the offending identifier octet.
    pub fn octet(self) -> u8 {
        self.0
    }
}

impl fmt::Display for UnsupportedTagForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f, "high tag number form not supported (octet {:#04x})", self.0
        )
    }
}

impl error::Error for UnsupportedTagForm { }


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identifier_octets() {
        assert_eq!(Ident::new(Tag::BOOLEAN, false).to_octet(), 0x01);
        assert_eq!(Ident::SEQUENCE.to_octet(), 0x30);
        assert_eq!(Ident::new(Tag::ctx(3), true).to_octet(), 0xA3);
        assert_eq!(Ident::new(Tag::application(30), false).to_octet(), 0x5E);
        assert_eq!(Ident::new(Tag::private(0), false).to_octet(), 0xC0);
        assert_eq!(
            Ident::from_parts(22, false, Class::Universal).unwrap().to_octet(),
            0x16
        );
        assert!(Ident::from_parts(31, false, Class::Universal).is_err());
        assert!(Tag::try_new(Class::Context, 31).is_err());
    }

    #[test]
    fn decode_octet() {
        let ident = Ident::from_octet(0xA3).unwrap();
        assert_eq!(ident.number(), 3);
        assert_eq!(ident.class(), Class::Context);
        assert!(ident.is_constructed());

        let ident = Ident::from_octet(0x02).unwrap();
        assert_eq!(ident.tag(), Tag::INTEGER);
        assert_eq!(ident.class(), Class::Universal);
        assert!(!ident.is_constructed());

        assert_eq!(Ident::from_octet(0x1F).unwrap_err().octet(), 0x1F);
        assert!(Ident::from_octet(0xBF).is_err());

        for octet in 0..=0xFFu8 {
            if let Ok(ident) = Ident::from_octet(octet) {
                assert_eq!(ident.to_octet(), octet);
            }
        }
    }

    #[test]
    fn primitive_table() {
        assert_eq!(PrimitiveKind::Boolean.identifier(), 1);
        assert_eq!(PrimitiveKind::Integer.identifier(), 2);
        assert_eq!(PrimitiveKind::Null.identifier(), 5);
        assert_eq!(PrimitiveKind::Real.identifier(), 9);
        assert_eq!(PrimitiveKind::Enumerated.identifier(), 10);
        assert_eq!(PrimitiveKind::Utf8String.identifier(), 12);
        assert_eq!(PrimitiveKind::Ia5String.identifier(), 22);
    }

    #[test]
    fn predicates() {
        let data = b"\x30\x03\x02\x01\x05";
        assert!(Ident::SEQUENCE.is_at(data, 0));
        assert!(PrimitiveKind::Integer.is_at(data, 2));
        assert!(!PrimitiveKind::Boolean.is_at(data, 2));
        assert!(!PrimitiveKind::Integer.is_at(data, 5));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Tag::IA5_STRING), "IA5String");
        assert_eq!(format!("{}", Tag::ctx(2)), "[2]");
        assert_eq!(format!("{}", Tag::application(7)), "[APPLICATION 7]");
        assert_eq!(format!("{}", Tag::universal(17)), "[UNIVERSAL 17]");
    }
}
