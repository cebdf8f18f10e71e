//! Restricted character strings.
//!
//! This module provides the IA5String and UTF8String types. Both are
//! instances of the generic [`RestrictedString`] which wraps a bytes value
//! whose content has been checked against a [`CharSet`].

use std::{error, fmt, hash, str};
use std::marker::PhantomData;
use std::str::FromStr;
use bytes::Bytes;
use crate::encode::{PrimitiveContent, Target};
use crate::ident::Tag;


//------------ CharSet -------------------------------------------------------

/// The character set of a restricted character string type.
///
/// All character sets supported here are subsets of Unicode whose octets
/// are valid UTF-8, so every restricted string is also a `str`.
pub trait CharSet {
    /// The natural tag of the related restricted character string type.
    const TAG: Tag;

    /// Checks whether a sequence of octets is a valid string.
    fn check(octets: &[u8]) -> Result<(), CharSetError>;

    /// Checks whether a string can be represented in the character set.
    fn check_str(s: &str) -> Result<(), CharSetError> {
        Self::check(s.as_bytes())
    }
}


//------------ RestrictedString ----------------------------------------------

/// A generic restricted character string.
///
/// Restricted character strings essentially are a sequence of characters
/// from a specific character set mapped into a sequence of octets. The
/// content octets of an encoded value are exactly these octets.
pub struct RestrictedString<L> {
    /// The octets of the string.
    octets: Bytes,

    /// A marker for the character set.
    marker: PhantomData<L>,
}

impl<L: CharSet> RestrictedString<L> {
    /// Creates a new character string from its octets.
    ///
    /// Returns an error if the octets aren’t valid for the character set.
    pub fn new(octets: Bytes) -> Result<Self, CharSetError> {
        L::check(&octets)?;
        Ok(RestrictedString { octets, marker: PhantomData })
    }

    /// Creates a new character string by copying a slice of octets.
    pub fn from_slice(octets: &[u8]) -> Result<Self, CharSetError> {
        L::check(octets)?;
        Ok(RestrictedString {
            octets: Bytes::copy_from_slice(octets),
            marker: PhantomData
        })
    }

    /// Creates a new character string from a `String`.
    ///
    /// The string’s buffer is reused.
    pub fn from_string(s: String) -> Result<Self, CharSetError> {
        L::check_str(&s)?;
        Ok(RestrictedString { octets: s.into(), marker: PhantomData })
    }

    /// Creates a new character string from UTF-16 code units.
    ///
    /// Fails if the code units aren’t valid UTF-16 or if the resulting
    /// string can’t be represented in the character set.
    pub fn from_wide(wide: &[u16]) -> Result<Self, CharSetError> {
        match String::from_utf16(wide) {
            Ok(s) => Self::from_string(s),
            Err(_) => Err(CharSetError(()))
        }
    }
}

impl<L> RestrictedString<L> {
    /// Returns the string.
    pub fn as_str(&self) -> &str {
        // Checked when created.
        str::from_utf8(&self.octets).unwrap_or_default()
    }

    /// Returns the octets of the string.
    pub fn as_slice(&self) -> &[u8] {
        self.octets.as_ref()
    }

    /// Converts the string into its octets.
    pub fn into_bytes(self) -> Bytes {
        self.octets
    }

    /// Returns the string as UTF-16 code units.
    pub fn to_wide(&self) -> Vec<u16> {
        self.as_str().encode_utf16().collect()
    }

    /// Returns the number of octets in the string.
    pub fn len(&self) -> usize {
        self.octets.len()
    }

    /// Returns whether the string is empty.
    pub fn is_empty(&self) -> bool {
        self.octets.is_empty()
    }
}


//--- Clone, Default

impl<L> Clone for RestrictedString<L> {
    fn clone(&self) -> Self {
        RestrictedString {
            octets: self.octets.clone(),
            marker: PhantomData
        }
    }
}

impl<L> Default for RestrictedString<L> {
    fn default() -> Self {
        RestrictedString { octets: Bytes::new(), marker: PhantomData }
    }
}


//--- FromStr and TryFrom

impl<L: CharSet> FromStr for RestrictedString<L> {
    type Err = CharSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s.as_bytes())
    }
}

impl<L: CharSet> TryFrom<String> for RestrictedString<L> {
    type Error = CharSetError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_string(s)
    }
}


//--- AsRef

impl<L> AsRef<str> for RestrictedString<L> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<L> AsRef<[u8]> for RestrictedString<L> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}


//--- PartialEq and Eq, Hash

impl<L, M> PartialEq<RestrictedString<M>> for RestrictedString<L> {
    fn eq(&self, other: &RestrictedString<M>) -> bool {
        self.octets == other.octets
    }
}

impl<L> PartialEq<str> for RestrictedString<L> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<L> PartialEq<&'_ str> for RestrictedString<L> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<L> Eq for RestrictedString<L> { }

impl<L> hash::Hash for RestrictedString<L> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.octets.hash(state)
    }
}


//--- Display and Debug

impl<L> fmt::Display for RestrictedString<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<L> fmt::Debug for RestrictedString<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("RestrictedString").field(&self.as_str()).finish()
    }
}


//--- PrimitiveContent

impl<L: CharSet> PrimitiveContent for &'_ RestrictedString<L> {
    const TAG: Tag = L::TAG;

    fn encoded_len(self) -> usize {
        self.octets.len()
    }

    fn write_encoded<T: Target>(
        self,
        target: &mut T
    ) -> Result<(), T::Error> {
        target.write_all(self.octets.as_ref())
    }
}


//------------ Ia5String -----------------------------------------------------

/// A string of IA5 characters, i.e., ASCII.
pub type Ia5String = RestrictedString<Ia5CharSet>;

/// The character set for the IA5String ASN.1 type.
#[derive(Clone, Copy, Debug)]
pub struct Ia5CharSet;

impl CharSet for Ia5CharSet {
    const TAG: Tag = Tag::IA5_STRING;

    fn check(octets: &[u8]) -> Result<(), CharSetError> {
        if octets.is_ascii() {
            Ok(())
        }
        else {
            Err(CharSetError(()))
        }
    }
}


//------------ Utf8String ----------------------------------------------------

/// A string of Unicode characters encoded in UTF-8.
pub type Utf8String = RestrictedString<Utf8CharSet>;

/// The character set for the UTF8String ASN.1 type.
#[derive(Clone, Copy, Debug)]
pub struct Utf8CharSet;

impl CharSet for Utf8CharSet {
    const TAG: Tag = Tag::UTF8_STRING;

    fn check(octets: &[u8]) -> Result<(), CharSetError> {
        match str::from_utf8(octets) {
            Ok(_) => Ok(()),
            Err(_) => Err(CharSetError(()))
        }
    }

    fn check_str(_: &str) -> Result<(), CharSetError> {
        Ok(())
    }
}


//------------ CharSetError --------------------------------------------------

/// An illegal value was encountered during character set conversion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CharSetError(());

impl fmt::Display for CharSetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal character")
    }
}

impl error::Error for CharSetError { }


//============ Tests =========================================================
