//! Defines `UnknownFields`, the fields a message type read but doesn't declare.
//!
//! As APIs are updated, fields may be added to or removed from message definitions. A message type
//! that encounters fields it doesn't recognize keeps their encoded bytes, tags included, and writes
//! them back out after its declared fields, so data passes through older versions unchanged.
//!
//! The bytes are kept as they were read. [`UnknownFields::parse`](struct.UnknownFields.html#method.parse)
//! builds an [`UnknownFieldSet`](struct.UnknownFieldSet.html) view over them for inspection.

use core::convert::TryFrom;
use crate::Mergable;
use crate::io::{read, CodedReader, FieldNumber, WireType};
use hashbrown::HashMap;

/// The encoded unknown fields of a message, in the order they were read
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UnknownFields {
    raw: Vec<u8>,
}

impl UnknownFields {
    /// Creates a new empty set of unknown fields
    #[inline]
    pub const fn new() -> Self {
        UnknownFields { raw: Vec::new() }
    }
    /// Returns the encoded length of the fields
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }
    /// Returns whether there are no unknown fields
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
    /// Gets the encoded fields
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }
    /// Consumes the set, returning the encoded fields
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.raw
    }
    /// Removes all the fields
    #[inline]
    pub fn clear(&mut self) {
        self.raw.clear();
    }
    /// Appends already encoded fields. The bytes must be complete fields, tags included,
    /// or the message they're written with won't decode.
    #[inline]
    pub fn push_raw(&mut self, fields: &[u8]) {
        self.raw.extend_from_slice(fields);
    }
    /// Parses the encoded fields into a set indexed by field number
    ///
    /// # Examples
    ///
    /// ```
    /// use protowire::io::FieldNumber;
    /// use protowire::unknown_fields::{UnknownField, UnknownFields};
    ///
    /// let mut fields = UnknownFields::new();
    /// fields.push_raw(&[0x98, 0x06, 0x07]);
    ///
    /// let set = fields.parse().unwrap();
    /// assert_eq!(set.get(FieldNumber::new_const(99)), &[UnknownField::Varint(7)]);
    /// ```
    pub fn parse(&self) -> read::Result<UnknownFieldSet<'_>> {
        let mut input = CodedReader::with_slice(&self.raw);
        parse_fields(&mut input, None)
    }
}

impl AsRef<[u8]> for UnknownFields {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Mergable for UnknownFields {
    fn merge(&mut self, other: &Self) {
        self.raw.extend_from_slice(&other.raw);
    }
}

/// An unknown field in an [`UnknownFieldSet`](struct.UnknownFieldSet.html).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnknownField<'a> {
    /// A varint field value
    Varint(u64),
    /// A 64-bit field value
    Bit64(u64),
    /// A length delimited series of bytes
    LengthDelimited(&'a [u8]),
    /// A group of other unknown fields
    Group(UnknownFieldSet<'a>),
    /// A 32-bit field value
    Bit32(u32),
}

/// A parsed view of unknown fields, borrowing from the encoded bytes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnknownFieldSet<'a> {
    inner: HashMap<FieldNumber, Vec<UnknownField<'a>>>,
}

impl<'a> UnknownFieldSet<'a> {
    /// Returns the number of distinct field numbers in the set
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }
    /// Returns whether the set contains no fields
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
    /// Gets the values of a field in the order they were read
    pub fn get(&self, number: FieldNumber) -> &[UnknownField<'a>] {
        self.inner.get(&number).map(Vec::as_slice).unwrap_or(&[])
    }
    /// Returns the field numbers in the set in ascending order
    pub fn field_numbers(&self) -> Vec<FieldNumber> {
        let mut numbers: Vec<FieldNumber> = self.inner.keys().copied().collect();
        numbers.sort_unstable();
        numbers
    }
    /// An iterator over every field number and its values, in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (FieldNumber, &[UnknownField<'a>])> {
        self.inner.iter().map(|(number, values)| (*number, values.as_slice()))
    }
}

fn parse_fields<'a>(input: &mut CodedReader<'a>, group: Option<FieldNumber>) -> read::Result<UnknownFieldSet<'a>> {
    let mut set = UnknownFieldSet::default();
    loop {
        let (number, wire_type) = match input.read_key()? {
            Some(key) => key,
            None if group.is_none() => return Ok(set),
            None => return Err(read::Error::UnexpectedEnd),
        };
        let value = match WireType::try_from(wire_type)? {
            WireType::Varint => UnknownField::Varint(input.read_varint64()?),
            WireType::Bit64 => UnknownField::Bit64(input.read_bit64()?),
            WireType::LengthDelimited => UnknownField::LengthDelimited(input.read_length_delimited()?),
            WireType::StartGroup => {
                input.enter_nested()?;
                let fields = parse_fields(input, Some(number))?;
                input.exit_nested();
                UnknownField::Group(fields)
            },
            WireType::EndGroup => {
                if group == Some(number) {
                    return Ok(set);
                }
                return Err(read::Error::UnexpectedEndOfGroup);
            },
            WireType::Bit32 => UnknownField::Bit32(input.read_bit32()?),
        };
        set.inner.entry(number).or_insert_with(Vec::new).push(value);
    }
}
