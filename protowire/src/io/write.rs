//! Defines the `CodedWriter`, a writer for writing protobuf encoded values into a byte slice.
//!
//! The writer fills its buffer from the end towards the front. A value's bytes are written
//! before its tag, and a length delimited value's contents are written before its length,
//! so lengths can be measured from how far the cursor moved instead of being precomputed.

use core::result;
use crate::io::{raw_varint_size, FieldNumber, Tag, WireType};
use crate::raw::{self, Packable, Value};
use crate::unknown_fields::UnknownFields;

/// The error type for [`CodedWriter`](struct.CodedWriter.html)
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The value's size doesn't fit in a `usize`
    #[error("the value is too large to write to the output")]
    ValueTooLarge,
    /// A caller provided buffer is smaller than the encoded value
    #[error("the output buffer holds {available} bytes but {needed} are required")]
    BufferTooSmall {
        /// The encoded size of the value
        needed: usize,
        /// The size of the buffer
        available: usize,
    },
    /// A write ran past the front of the buffer
    #[error("a write of {needed} bytes overran the output with {remaining} bytes remaining")]
    Overrun {
        /// The size of the write
        needed: usize,
        /// The space left in front of the cursor
        remaining: usize,
    },
    /// The writer finished without filling the buffer it was sized for
    #[error("expected to write {expected} bytes but wrote {written}")]
    SizeMismatch {
        /// The size of the buffer
        expected: usize,
        /// The number of bytes written
        written: usize,
    },
}

impl Error {
    /// Returns whether the error means a computed size disagreed with the bytes actually written.
    pub fn is_consistency_fault(&self) -> bool {
        match self {
            Error::Overrun { .. } | Error::SizeMismatch { .. } => true,
            _ => false,
        }
    }
}

/// A result for a [`CodedWriter`](struct.CodedWriter.html) write operation
pub type Result<T = ()> = result::Result<T, Error>;

/// A protobuf coded output writer that writes backwards into a mutable slice
pub struct CodedWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> CodedWriter<'a> {
    /// Creates a new writer with its cursor at the end of the slice
    ///
    /// # Examples
    ///
    /// ```
    /// use protowire::io::CodedWriter;
    ///
    /// let mut data = [0u8; 2];
    /// let mut writer = CodedWriter::with_slice(&mut data);
    /// writer.write_varint64(150).unwrap();
    /// writer.finish().unwrap();
    /// assert_eq!(data, [0x96, 0x01]);
    /// ```
    #[inline]
    pub fn with_slice(buf: &'a mut [u8]) -> Self {
        let pos = buf.len();
        CodedWriter { buf, pos }
    }

    /// Returns the position of the cursor. This is also the number of bytes that can still be written.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }
    /// Returns the number of bytes written so far
    #[inline]
    pub fn written(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[inline]
    fn reserve(&mut self, len: usize) -> Result<&mut [u8]> {
        if len > self.pos {
            return Err(Error::Overrun { needed: len, remaining: self.pos });
        }
        let end = self.pos;
        self.pos -= len;
        Ok(&mut self.buf[self.pos..end])
    }

    /// Writes a 64-bit varint
    pub fn write_varint64(&mut self, value: u64) -> Result {
        let dst = self.reserve(raw_varint_size(value))?;
        let mut value = value;
        let (last, rest) = match dst.split_last_mut() {
            Some(split) => split,
            None => return Ok(()),
        };
        for b in rest {
            *b = (value as u8) | 0x80;
            value >>= 7;
        }
        *last = value as u8;
        Ok(())
    }
    /// Writes a 32-bit varint
    #[inline]
    pub fn write_varint32(&mut self, value: u32) -> Result {
        self.write_varint64(u64::from(value))
    }
    /// Writes a 4-byte little endian value
    #[inline]
    pub fn write_bit32(&mut self, value: u32) -> Result {
        self.write_bytes(&value.to_le_bytes())
    }
    /// Writes a 8-byte little endian value
    #[inline]
    pub fn write_bit64(&mut self, value: u64) -> Result {
        self.write_bytes(&value.to_le_bytes())
    }
    /// Writes raw bytes with no prefix
    #[inline]
    pub fn write_bytes(&mut self, value: &[u8]) -> Result {
        self.reserve(value.len())?.copy_from_slice(value);
        Ok(())
    }
    /// Writes a length prefix
    #[inline]
    pub fn write_length(&mut self, len: usize) -> Result {
        self.write_varint64(len as u64)
    }
    /// Writes a tag
    #[inline]
    pub fn write_tag(&mut self, tag: Tag) -> Result {
        self.write_varint32(tag.get())
    }
    /// Writes a length delimited string of bytes. The bytes are written first, then their length.
    #[inline]
    pub fn write_length_delimited(&mut self, value: &[u8]) -> Result {
        self.write_bytes(value)?;
        self.write_length(value.len())
    }

    /// Writes a value without a tag
    #[inline]
    pub fn write_value<V: Value>(&mut self, value: &V::Inner) -> Result {
        V::wrap_ref(value).write_to(self)
    }
    /// Writes a value and then its tag, which precedes it on the wire
    #[inline]
    pub fn write_field<V: Value>(&mut self, num: FieldNumber, value: &V::Inner) -> Result {
        self.write_value::<V>(value)?;
        self.write_tag(Tag::new(num, V::WIRE_TYPE))
    }
    /// Writes a singular field, or nothing if the value is the type's default
    #[inline]
    pub fn write_singular<V: Value>(&mut self, num: FieldNumber, value: &V::Inner) -> Result {
        if V::wrap_ref(value).is_default() {
            Ok(())
        } else {
            self.write_field::<V>(num, value)
        }
    }
    /// Writes a nested message field if it's present. An empty message is still written.
    #[inline]
    pub fn write_message<T: crate::Message>(&mut self, num: FieldNumber, value: Option<&T>) -> Result {
        match value {
            Some(value) => self.write_field::<raw::Message<T>>(num, value),
            None => Ok(()),
        }
    }
    /// Writes a repeated field with one tag per element.
    /// Elements are written last to first so they appear in order on the wire.
    pub fn write_values<V: Value>(&mut self, num: FieldNumber, values: &[V::Inner]) -> Result {
        for value in values.iter().rev() {
            self.write_field::<V>(num, value)?;
        }
        Ok(())
    }
    /// Writes a packed repeated field under a single tag and length. Empty fields aren't written.
    pub fn write_packed<V: Packable>(&mut self, num: FieldNumber, values: &[V::Inner]) -> Result {
        if values.is_empty() {
            return Ok(());
        }

        let end = self.pos;
        for value in values.iter().rev() {
            self.write_value::<V>(value)?;
        }
        let len = end - self.pos;
        self.write_length(len)?;
        self.write_tag(Tag::new(num, WireType::LengthDelimited))
    }
    /// Writes a message's preserved unknown fields verbatim
    #[inline]
    pub fn write_unknown(&mut self, value: &UnknownFields) -> Result {
        self.write_bytes(value.as_bytes())
    }

    /// Checks that the whole buffer was written
    pub fn finish(self) -> Result {
        if self.pos == 0 {
            Ok(())
        } else {
            Err(Error::SizeMismatch { expected: self.buf.len(), written: self.written() })
        }
    }
}
