//! Defines the `CodedReader`, a reader for reading values from a protobuf encoded byte slice.

use core::convert::TryFrom;
use core::mem;
use core::result;
use core::str::Utf8Error;
use crate::io::{FieldNumber, InvalidWireType, Tag, WireType};
use crate::raw::{self, Value};
use crate::unknown_fields::UnknownFields;

const DEFAULT_RECURSION_LIMIT: u32 = 100;

/// The error type for [`CodedReader`](struct.CodedReader.html)
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input contained a variable length integer longer than 10 bytes
    #[error("the input contained a variable length integer that overflows 64 bits")]
    IntegerOverflow,
    /// The input ended in the middle of a value
    #[error("the input ended unexpectedly")]
    UnexpectedEnd,
    /// The input contained a length delimited value which reported a negative size,
    /// or a size that can't be addressed
    #[error("the input contained a length delimited value which reported it had a negative size")]
    NegativeLength,
    /// The input contained a tag with a field number of 0 or larger than the max field number
    #[error("the input contained an illegal tag with field number {0}")]
    IllegalTag(u64),
    /// A declared field was encoded with a wire type it can't be read from
    #[error("wrong wire type {found} for field {field}, expected {expected:?}")]
    WrongWireType {
        /// The field that was being read
        field: FieldNumber,
        /// The wire type the field is declared with
        expected: WireType,
        /// The wire type read from the input
        found: u8,
    },
    /// The input contained a wire type outside of the defined range
    #[error("the input contained an illegal wire type {0}")]
    IllegalWireType(u8),
    /// The input contained an end group tag without a matching start group tag
    #[error("the input contained an end group tag without a matching start group")]
    UnexpectedEndOfGroup,
    /// The input contained an invalid UTF8 string
    #[error("the input contained an invalid UTF8 string")]
    InvalidString(#[from] Utf8Error),
    /// The input nested messages or groups deeper than the reader allows
    #[error("the input exceeded the nesting limit of {0}")]
    RecursionLimitExceeded(u32),
}

impl From<InvalidWireType> for Error {
    fn from(value: InvalidWireType) -> Error {
        Error::IllegalWireType(value.0)
    }
}

/// A result for a [`CodedReader`](struct.CodedReader.html) read operation
pub type Result<T> = result::Result<T, Error>;

/// A set of options that can be used to modify the behavior of [`CodedReader`](struct.CodedReader.html)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Indicates if unknown fields should be skipped instead of preserved
    pub skip_unknown_fields: bool,
    /// The max depth of nested messages and groups
    pub recursion_limit: u32,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            skip_unknown_fields: false,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

/// A builder used to construct [`CodedReader`](struct.CodedReader.html) instances
#[derive(Clone, Debug, Default)]
pub struct Builder {
    options: ReaderOptions
}

impl Builder {
    /// Creates a new builder with the default configuration
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }
    /// Sets whether unknown fields should be skipped instead of preserved
    #[inline]
    pub fn skip_unknown_fields(mut self, value: bool) -> Self {
        self.options.skip_unknown_fields = value;
        self
    }
    /// Sets the max depth of nested messages and groups
    #[inline]
    pub fn recursion_limit(mut self, value: u32) -> Self {
        self.options.recursion_limit = value;
        self
    }
    /// Replaces all options in the builder
    #[inline]
    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }
    /// Constructs a [`CodedReader`](struct.CodedReader.html) using this builder and
    /// the specified slice of bytes
    ///
    /// # Examples
    ///
    /// ```
    /// use protowire::io::ReaderBuilder;
    ///
    /// let data = [8, 15];
    /// let reader =
    ///     ReaderBuilder::new()
    ///         .skip_unknown_fields(true)
    ///         .with_slice(&data);
    /// assert!(reader.skip_unknown_fields());
    /// ```
    #[inline]
    pub fn with_slice<'a>(&self, inner: &'a [u8]) -> CodedReader<'a> {
        CodedReader {
            data: inner,
            pos: 0,
            limit: inner.len(),
            depth: 0,
            options: self.options.clone(),
        }
    }
}

/// A coded input reader that reads forward over a borrowed slice.
///
/// Reads are bounded by the current limit, which starts at the end of the slice and is
/// narrowed to the extent of each length delimited value while it's being read.
#[derive(Debug)]
pub struct CodedReader<'a> {
    data: &'a [u8],
    pos: usize,
    limit: usize,
    depth: u32,
    options: ReaderOptions,
}

impl<'a> CodedReader<'a> {
    /// Creates a new [`CodedReader`](struct.CodedReader.html) over the borrowed slice
    /// in the default configuration.
    #[inline]
    pub fn with_slice(inner: &'a [u8]) -> Self {
        Builder::new().with_slice(inner)
    }

    /// Gets the options in use by this reader
    #[inline]
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }
    /// Returns if unknown fields should be skipped instead of preserved
    #[inline]
    pub fn skip_unknown_fields(&self) -> bool {
        self.options.skip_unknown_fields
    }
    /// Returns the position of the reader in the input
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }
    /// Returns the number of bytes left before the current limit
    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit - self.pos
    }
    /// Returns whether this coded reader has reached the current limit
    #[inline]
    pub fn reached_limit(&self) -> bool {
        self.pos >= self.limit
    }

    #[inline]
    fn read_byte(&mut self) -> Result<u8> {
        if self.reached_limit() {
            return Err(Error::UnexpectedEnd);
        }
        let b = self.data[self.pos];
        self.pos += 1;
        Ok(b)
    }

    #[inline]
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::UnexpectedEnd);
        }
        let data = self.data;
        let start = self.pos;
        self.pos += len;
        Ok(&data[start..self.pos])
    }

    /// Reads a 64-bit varint from the input.
    ///
    /// # Errors
    ///
    /// Returns `IntegerOverflow` if the varint doesn't terminate within 10 bytes.
    pub fn read_varint64(&mut self) -> Result<u64> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            if shift >= 64 {
                return Err(Error::IntegerOverflow);
            }
            let b = self.read_byte()?;
            value |= u64::from(b & 0x7F) << shift;
            if b < 0x80 {
                return Ok(value);
            }
            shift += 7;
        }
    }
    /// Reads a 32-bit varint from the input. This reads the full 64-bit value
    /// and discards the top 32 bits.
    #[inline]
    pub fn read_varint32(&mut self) -> Result<u32> {
        self.read_varint64().map(|v| v as u32)
    }
    /// Reads a 4-byte little endian value
    #[inline]
    pub fn read_bit32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(buf))
    }
    /// Reads a 8-byte little endian value
    #[inline]
    pub fn read_bit64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(u64::from_le_bytes(buf))
    }

    /// Reads a length value from the input.
    ///
    /// # Errors
    ///
    /// If the length would be negative as a signed 64-bit value, this returns a `NegativeLength` error.
    pub fn read_length(&mut self) -> Result<usize> {
        let value = self.read_varint64()?;
        if value > i64::max_value() as u64 {
            return Err(Error::NegativeLength);
        }
        usize::try_from(value).map_err(|_| Error::NegativeLength)
    }
    /// Reads a length delimited string of bytes, borrowed from the input
    #[inline]
    pub fn read_length_delimited(&mut self) -> Result<&'a [u8]> {
        let len = self.read_length()?;
        self.take(len)
    }

    /// Pushes a new limit to the reader `len` bytes past the current position,
    /// returning the old limit to pass back to [`pop_limit`](#method.pop_limit).
    pub fn push_limit(&mut self, len: usize) -> Result<usize> {
        let end = self.pos.checked_add(len).ok_or(Error::NegativeLength)?;
        if end > self.limit {
            return Err(Error::UnexpectedEnd);
        }
        Ok(mem::replace(&mut self.limit, end))
    }
    /// Restores a limit previously returned by [`push_limit`](#method.push_limit).
    pub fn pop_limit(&mut self, old: usize) {
        debug_assert!(old >= self.limit, "popped a limit that was narrower than the current one");
        self.limit = old;
    }

    pub(crate) fn enter_nested(&mut self) -> Result<()> {
        if self.depth >= self.options.recursion_limit {
            return Err(Error::RecursionLimitExceeded(self.options.recursion_limit));
        }
        self.depth += 1;
        Ok(())
    }
    pub(crate) fn exit_nested(&mut self) {
        self.depth -= 1;
    }

    /// Reads a length and runs `f` over exactly that many bytes.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEnd` if `f` returns before reading up to the end of the value.
    pub fn read_message<F>(&mut self, f: F) -> Result<()>
        where F: FnOnce(&mut Self) -> Result<()>
    {
        let len = self.read_length()?;
        self.enter_nested()?;
        let old = self.push_limit(len)?;
        f(self)?;
        if !self.reached_limit() {
            return Err(Error::UnexpectedEnd);
        }
        self.pop_limit(old);
        self.exit_nested();
        Ok(())
    }

    pub(crate) fn read_key(&mut self) -> Result<Option<(FieldNumber, u8)>> {
        if self.reached_limit() {
            return Ok(None);
        }
        let key = self.read_varint64()?;
        let number = key >> 3;
        let field =
            u32::try_from(number).ok()
                .and_then(FieldNumber::new)
                .ok_or(Error::IllegalTag(number))?;
        Ok(Some((field, (key & 0b111) as u8)))
    }

    /// Reads a field tag from the input, returning `None` at the current limit.
    pub fn read_tag(&mut self) -> Result<Option<Tag>> {
        match self.read_key()? {
            Some((field, wt)) => Ok(Some(Tag::new(field, WireType::try_from(wt)?))),
            None => Ok(None),
        }
    }

    /// Reads the next field key, returning a [`FieldReader`](struct.FieldReader.html)
    /// used to dispatch the field's value, or `None` at the current limit.
    #[inline]
    pub fn read_field<'r>(&'r mut self) -> Result<Option<FieldReader<'r, 'a>>> {
        let start = self.pos;
        match self.read_key()? {
            Some((number, wire_type)) => Ok(Some(FieldReader { input: self, number, wire_type, start })),
            None => Ok(None),
        }
    }

    /// Skips a value of the specified wire type without interpreting it.
    ///
    /// Groups are skipped by counting start and end group tags until the
    /// depth returns to 0, rather than by recursing into them.
    pub fn skip_field(&mut self, wire_type: u8) -> Result<()> {
        let mut depth = 0usize;
        let mut wire_type = wire_type;
        loop {
            match WireType::try_from(wire_type)? {
                WireType::Varint => { self.read_varint64()?; },
                WireType::Bit64 => { self.take(8)?; },
                WireType::LengthDelimited => { self.read_length_delimited()?; },
                WireType::StartGroup => depth += 1,
                WireType::EndGroup => {
                    if depth == 0 {
                        return Err(Error::UnexpectedEndOfGroup);
                    }
                    depth -= 1;
                },
                WireType::Bit32 => { self.take(4)?; },
            }
            if depth == 0 {
                return Ok(());
            }
            wire_type = match self.read_key()? {
                Some((_, wt)) => wt,
                None => return Err(Error::UnexpectedEnd),
            };
        }
    }

    /// Reads a new instance of a value from the input
    #[inline]
    pub fn read_value<V: Value>(&mut self) -> Result<V::Inner> {
        V::read_new(self).map(V::unwrap)
    }
    /// Merges an existing instance of a value with a value from the input
    #[inline]
    pub fn merge_value<V: Value>(&mut self, value: &mut V::Inner) -> Result<()> {
        V::wrap_mut(value).merge_from(self)
    }
    /// Reads a packed run of values, appending each one to the vec
    pub fn read_packed<V: Value>(&mut self, values: &mut Vec<V::Inner>) -> Result<()> {
        let len = self.read_length()?;
        let old = self.push_limit(len)?;
        if let Some(size) = V::FIXED_SIZE {
            values.reserve(len / size);
        }
        while !self.reached_limit() {
            values.push(self.read_value::<V>()?);
        }
        self.pop_limit(old);
        Ok(())
    }
}

/// A reader used by message types to read the value of a field after its tag.
///
/// Each method checks the tag's wire type against the value type before reading,
/// so message types only need to match on the field number.
#[derive(Debug)]
pub struct FieldReader<'r, 'a> {
    input: &'r mut CodedReader<'a>,
    number: FieldNumber,
    wire_type: u8,
    start: usize,
}

impl<'r, 'a> FieldReader<'r, 'a> {
    /// Gets the field number of the field
    #[inline]
    pub fn number(&self) -> FieldNumber {
        self.number
    }
    /// Gets the wire type of the field
    #[inline]
    pub fn wire_type(&self) -> result::Result<WireType, InvalidWireType> {
        WireType::try_from(self.wire_type)
    }

    #[inline]
    fn check(&self, expected: WireType) -> Result<()> {
        if self.wire_type == expected as u8 {
            Ok(())
        } else {
            Err(Error::WrongWireType { field: self.number, expected, found: self.wire_type })
        }
    }

    /// Reads a new instance of the value
    #[inline]
    pub fn read_value<V: Value>(self) -> Result<V::Inner> {
        self.check(V::WIRE_TYPE)?;
        self.input.read_value::<V>()
    }
    /// Merges the field's value into an existing value
    #[inline]
    pub fn merge_value<V: Value>(self, value: &mut V::Inner) -> Result<()> {
        self.check(V::WIRE_TYPE)?;
        self.input.merge_value::<V>(value)
    }
    /// Merges the field's value into an optional nested message, creating it if it's not set
    #[inline]
    pub fn merge_message<T: crate::Message>(self, value: &mut Option<Box<T>>) -> Result<()> {
        self.check(WireType::LengthDelimited)?;
        let value = value.get_or_insert_with(Default::default);
        self.input.merge_value::<raw::Message<T>>(&mut **value)
    }
    /// Adds the field's entries to a repeated field.
    ///
    /// Packable value types accept both a packed run and single values, so
    /// either encoding of the field appends in the order read.
    pub fn add_entries_to<V: Value>(self, values: &mut Vec<V::Inner>) -> Result<()> {
        if self.wire_type == V::WIRE_TYPE as u8 {
            values.push(self.input.read_value::<V>()?);
            Ok(())
        } else if V::WIRE_TYPE.is_packable() && self.wire_type == WireType::LengthDelimited as u8 {
            self.input.read_packed::<V>(values)
        } else {
            Err(Error::WrongWireType { field: self.number, expected: V::WIRE_TYPE, found: self.wire_type })
        }
    }
    /// Skips the field and appends its raw bytes, tag included, to the unknown fields.
    /// If the reader skips unknown fields the bytes are dropped instead.
    pub fn add_unknown_to(self, unknown: &mut UnknownFields) -> Result<()> {
        let FieldReader { input, number, wire_type, start } = self;
        input.skip_field(wire_type)?;
        let data = input.data;
        let raw = &data[start..input.pos];
        if input.skip_unknown_fields() {
            tracing::trace!(field = number.get(), wire_type, len = raw.len(), "discarding unknown field");
        } else {
            tracing::trace!(field = number.get(), wire_type, len = raw.len(), "preserving unknown field");
            unknown.push_raw(raw);
        }
        Ok(())
    }
    /// Skips the field without preserving it
    #[inline]
    pub fn skip(self) -> Result<()> {
        self.input.skip_field(self.wire_type)
    }
}
