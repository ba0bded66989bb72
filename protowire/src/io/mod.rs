//! Contains types and traits for reading and writing protobuf coded data.

pub mod read;
pub mod write;

pub use read::{Builder as ReaderBuilder, CodedReader, FieldReader, ReaderOptions};
pub use write::CodedWriter;

use core::convert::TryFrom;
use core::fmt::{self, Display, Formatter};
use core::num::NonZeroU32;
use crate::raw::{self, Packable, Value};
use crate::unknown_fields::UnknownFields;

/// The wire type of a protobuf value.
///
/// A wire type is paired with a field number between 1 and 536,870,911 to create a tag,
/// a unique identifier for a field on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum WireType {
    /// A value read as a variable length integer.
    ///
    /// See the protobuf docs for more information on this encoding: https://developers.google.com/protocol-buffers/docs/encoding#varints
    Varint = 0,
    /// A 64-bit value encoded as 8 little endian bytes
    Bit64 = 1,
    /// A length delimited value. The length is encoded as a varint
    LengthDelimited = 2,
    /// A start group tag. Groups are only ever skipped or preserved as unknown fields.
    StartGroup = 3,
    /// An end group tag.
    EndGroup = 4,
    /// A 32-bit value encoded as 4 little endian bytes
    Bit32 = 5,
}

/// The error struct used when trying to convert from an byte to a wire type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidWireType(pub u8);

impl Display for InvalidWireType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "invalid wire type {}", self.0)
    }
}

impl WireType {
    /// Gets whether a wire type is eligible for repeated field packing.
    /// The valid packable wire types are Bit32, Bit64, and Varint.
    pub const fn is_packable(self) -> bool {
        (self as u8 == WireType::Varint as u8) ||
        (self as u8 == WireType::Bit64 as u8) ||
        (self as u8 == WireType::Bit32 as u8)
    }
}

impl TryFrom<u8> for WireType {
    type Error = InvalidWireType;

    fn try_from(value: u8) -> Result<WireType, InvalidWireType> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Bit64),
            2 => Ok(WireType::LengthDelimited),
            3 => Ok(WireType::StartGroup),
            4 => Ok(WireType::EndGroup),
            5 => Ok(WireType::Bit32),
            _ => Err(InvalidWireType(value)),
        }
    }
}

/// A protobuf field number. Its value is known to be less than or equal to 536870911 and not 0.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldNumber(NonZeroU32);

impl FieldNumber {
    /// The max value of a field number as a u32
    pub const MAX_VALUE: u32 = 536_870_911;

    /// The max value of a field number
    pub const MAX: FieldNumber = FieldNumber::new_const(FieldNumber::MAX_VALUE);

    /// Creates a field number if the given value is not zero or more than 536870911
    ///
    /// # Examples
    ///
    /// ```
    /// use protowire::io::FieldNumber;
    ///
    /// assert_eq!(FieldNumber::new(0), None);
    /// assert_eq!(FieldNumber::new(1).map(FieldNumber::get), Some(1));
    /// assert_eq!(FieldNumber::new(FieldNumber::MAX_VALUE), Some(FieldNumber::MAX));
    /// assert_eq!(FieldNumber::new(FieldNumber::MAX_VALUE + 1), None);
    /// ```
    #[inline]
    pub const fn new(n: u32) -> Option<FieldNumber> {
        if n > Self::MAX_VALUE {
            return None;
        }
        match NonZeroU32::new(n) {
            Some(n) => Some(FieldNumber(n)),
            None => None,
        }
    }

    /// Creates a field number in a constant context. Used by message types to declare
    /// their field numbers.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`) if the value is not a valid field number.
    pub const fn new_const(n: u32) -> FieldNumber {
        match FieldNumber::new(n) {
            Some(n) => n,
            None => panic!("field numbers must be between 1 and 536870911"),
        }
    }

    /// Returns the value as a [`u32`](https://doc.rust-lang.org/std/primitive.u32.html)
    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Display for FieldNumber {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<FieldNumber> for u32 {
    fn from(x: FieldNumber) -> u32 {
        x.get()
    }
}

/// A tag containing a wire type and field number. Its value is known to not be 0, and both field number and wire type are valid values
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(NonZeroU32);

impl Tag {
    /// Creates a new tag value
    #[inline]
    pub const fn new(f: FieldNumber, wt: WireType) -> Tag {
        // a field number is never 0, so neither is the shifted value
        unsafe { Tag(NonZeroU32::new_unchecked((f.get() << 3) | wt as u32)) }
    }

    /// Gets the wire type from this tag
    ///
    /// # Examples
    ///
    /// ```
    /// use protowire::io::{Tag, WireType};
    /// # use std::convert::TryFrom;
    ///
    /// assert_eq!(Tag::try_from(8).unwrap().wire_type(), WireType::Varint);
    /// assert_eq!(Tag::try_from(17).unwrap().wire_type(), WireType::Bit64);
    /// ```
    #[inline]
    pub fn wire_type(self) -> WireType {
        match WireType::try_from((self.get() & 0b111) as u8) {
            Ok(wt) => wt,
            Err(_) => unreachable!("tags are only constructed with valid wire types"),
        }
    }

    /// Gets the field number from this tag
    ///
    /// # Examples
    ///
    /// ```
    /// use protowire::io::Tag;
    /// # use std::convert::TryFrom;
    ///
    /// assert_eq!(Tag::try_from(8).unwrap().field().get(), 1);
    /// assert_eq!(Tag::try_from(17).unwrap().field().get(), 2);
    /// ```
    #[inline]
    pub fn field(self) -> FieldNumber {
        FieldNumber::new_const(self.get() >> 3)
    }

    /// Returns the value as a [`u32`](https://doc.rust-lang.org/std/primitive.u32.html)
    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Tag> for u32 {
    fn from(x: Tag) -> u32 {
        x.get()
    }
}

/// The error returned when an attempt to convert a 32-bit value to a tag fails due to an invalid field number or wire type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TryTagFromRawError(());

impl Display for TryTagFromRawError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "invalid tag; this could be caused by an invalid wire type or a 0 field number")
    }
}

impl std::error::Error for TryTagFromRawError { }

impl TryFrom<u32> for Tag {
    type Error = TryTagFromRawError;

    /// Creates a new tag if the value is not zero and has a valid field number and wire type
    ///
    /// # Examples
    ///
    /// ```
    /// use protowire::io::Tag;
    /// # use std::convert::TryFrom;
    ///
    /// assert!(Tag::try_from(1).is_err());
    /// assert!(Tag::try_from(8).is_ok());
    /// assert!(Tag::try_from(16).is_ok());
    /// assert!(Tag::try_from(14).is_err());
    /// ```
    #[inline]
    fn try_from(n: u32) -> Result<Tag, TryTagFromRawError> {
        let wt = WireType::try_from((n & 0b111) as u8).map_err(|_| TryTagFromRawError(()))?;
        let num = FieldNumber::new(n >> 3).ok_or(TryTagFromRawError(()))?;
        Ok(Tag::new(num, wt))
    }
}

/// An opaque type for building the encoded size of a message.
///
/// Every method mirrors a [`CodedWriter`](write/struct.CodedWriter.html) method, and the two
/// must agree byte for byte: the writer is handed a buffer of exactly the built size.
/// With the `checked_size` feature every addition is checked and overflow returns `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LengthBuilder(usize);

impl LengthBuilder {
    /// Creates a new length builder
    #[inline]
    pub const fn new() -> LengthBuilder {
        Self(0)
    }

    /// Adds an arbitrary number of bytes to the length
    #[inline]
    #[must_use = "this returns the builder to chain and does not mutate it in place"]
    pub fn add_bytes(self, value: usize) -> Option<Self> {
        #[cfg(feature = "checked_size")]
        return self.0.checked_add(value).map(LengthBuilder);

        #[cfg(not(feature = "checked_size"))]
        return Some(LengthBuilder(self.0 + value));
    }

    /// Adds a tag's size to the length
    #[inline]
    #[must_use = "this returns the builder to chain and does not mutate it in place"]
    pub fn add_tag(self, tag: Tag) -> Option<Self> {
        self.add_bytes(raw_varint_size(u64::from(tag.get())))
    }

    /// Adds the size of a length prefix to the length
    #[inline]
    #[must_use = "this returns the builder to chain and does not mutate it in place"]
    pub fn add_length(self, len: usize) -> Option<Self> {
        self.add_bytes(raw_varint_size(len as u64))
    }

    /// Adds a value's length to this instance
    #[inline]
    #[must_use = "this returns the builder to chain and does not mutate it in place"]
    pub fn add_value<V: Value>(self, value: &V::Inner) -> Option<Self> {
        V::wrap_ref(value).calculate_size(self)
    }

    /// Adds a field's length to this instance using the specified field number
    #[inline]
    #[must_use = "this returns the builder to chain and does not mutate it in place"]
    pub fn add_field<V: Value>(self, num: FieldNumber, value: &V::Inner) -> Option<Self> {
        self.add_tag(Tag::new(num, V::WIRE_TYPE))?
            .add_value::<V>(value)
    }

    /// Adds a singular field's length, or nothing if the value is the type's default
    #[inline]
    #[must_use = "this returns the builder to chain and does not mutate it in place"]
    pub fn add_singular<V: Value>(self, num: FieldNumber, value: &V::Inner) -> Option<Self> {
        if V::wrap_ref(value).is_default() {
            Some(self)
        } else {
            self.add_field::<V>(num, value)
        }
    }

    /// Adds the length of a nested message field if it's present
    #[inline]
    #[must_use = "this returns the builder to chain and does not mutate it in place"]
    pub fn add_message<T: crate::Message>(self, num: FieldNumber, value: Option<&T>) -> Option<Self> {
        match value {
            Some(value) => self.add_field::<raw::Message<T>>(num, value),
            None => Some(self),
        }
    }

    /// Adds the length of a repeated field written with one tag per element
    #[inline]
    #[must_use = "this returns the builder to chain and does not mutate it in place"]
    pub fn add_values<V: Value>(self, num: FieldNumber, values: &[V::Inner]) -> Option<Self> {
        values
            .iter()
            .try_fold(self, |builder, value| builder.add_field::<V>(num, value))
    }

    /// Adds the length of a packed repeated field. Empty fields aren't written at all.
    #[inline]
    #[must_use = "this returns the builder to chain and does not mutate it in place"]
    pub fn add_packed<V: Packable>(self, num: FieldNumber, values: &[V::Inner]) -> Option<Self> {
        if values.is_empty() {
            return Some(self);
        }

        let len = V::packed_len(values)?;
        self.add_tag(Tag::new(num, WireType::LengthDelimited))?
            .add_length(len)?
            .add_bytes(len)
    }

    /// Adds the length of a message's unknown fields. These are already encoded.
    #[inline]
    #[must_use = "this returns the builder to chain and does not mutate it in place"]
    pub fn add_unknown(self, value: &UnknownFields) -> Option<Self> {
        self.add_bytes(value.len())
    }

    /// Consumes the builder, returning the total length
    #[inline]
    pub const fn build(self) -> usize {
        self.0
    }
}

/// Returns the number of bytes used to encode the value as a varint
#[inline]
pub const fn raw_varint_size(value: u64) -> usize {
    (((63 ^ (value | 1).leading_zeros()) * 9 + 73) / 64) as usize
}
