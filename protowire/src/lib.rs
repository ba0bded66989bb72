//! A schema-driven protobuf wire format codec.
//!
//! Message types implement [`Message`](trait.Message.html) with a closed `match` over their
//! field numbers for decoding, and by writing their fields through a
//! [`CodedWriter`](io/write/struct.CodedWriter.html) for encoding. The writer fills an exactly
//! sized buffer back to front, so every message is encoded with a single allocation and nested
//! lengths never have to be computed twice.
//!
//! Fields a message type doesn't declare are kept as
//! [`UnknownFields`](unknown_fields/struct.UnknownFields.html) and written back out unchanged.

#![warn(missing_docs)]

mod internal {
    pub trait Sealed { }
}
pub mod collections;
pub mod io;
pub mod raw;
pub mod reflect;
pub mod unknown_fields;

use crate::io::{read, write, CodedReader, CodedWriter, LengthBuilder};
use crate::reflect::MessageInfo;
use std::fmt::Debug;

pub use collections::RepeatedField;
pub use unknown_fields::UnknownFields;

/// A type that can merge another instance of itself into itself
pub trait Mergable {
    /// Merges another instance into this one. Set singular values replace existing values,
    /// repeated values are appended and nested messages are merged.
    fn merge(&mut self, other: &Self);
}

/// A message type that can be read from and written to the protobuf wire format.
///
/// Implementations provide the per-field operations, and this trait provides encoding and decoding
/// on top of them:
///
/// * [`merge_from`](#tymethod.merge_from) reads fields until the input reaches its limit, dispatching
///   on each field number and passing undeclared fields to
///   [`FieldReader::add_unknown_to`](io/read/struct.FieldReader.html#method.add_unknown_to).
/// * [`calculate_size`](#tymethod.calculate_size) adds the size of every field that would be written.
/// * [`write_to`](#tymethod.write_to) writes the unknown fields first, then the declared fields from the
///   highest field number to the lowest. Since the writer fills the buffer back to front, fields
///   appear on the wire in ascending order followed by the unknown fields.
pub trait Message: Mergable + Clone + Default + Debug + MessageInfo {
    /// Merges this message with data from the specified [`CodedReader`](io/read/struct.CodedReader.html)
    fn merge_from(&mut self, input: &mut CodedReader) -> read::Result<()>;
    /// Adds the size of the data in the message to the [`LengthBuilder`](io/struct.LengthBuilder.html)
    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder>;
    /// Writes this message's data to the specified [`CodedWriter`](io/write/struct.CodedWriter.html)
    fn write_to(&self, output: &mut CodedWriter) -> write::Result;

    /// Gets a shared reference to the unknown fields in this message
    fn unknown_fields(&self) -> &UnknownFields;
    /// Gets a unique reference to the unknown fields in this message
    fn unknown_fields_mut(&mut self) -> &mut UnknownFields;
    /// Removes the unknown fields from this message and all the messages nested in it
    fn discard_unknown_fields(&mut self);

    /// Creates a new instance of the message
    fn new() -> Self {
        Self::default()
    }
    /// Reads a new instance of the message from a [`CodedReader`](io/read/struct.CodedReader.html)
    fn new_from(input: &mut CodedReader) -> read::Result<Self> {
        let mut instance = Self::new();
        instance.merge_from(input)?;
        Ok(instance)
    }
    /// Calculates the encoded size of the message. Returns `None` if the size overflows.
    fn size(&self) -> Option<usize> {
        self.calculate_size(LengthBuilder::new()).map(LengthBuilder::build)
    }
    /// Encodes the message into a new vec of exactly the encoded size
    fn encode(&self) -> write::Result<Vec<u8>> {
        let len = self.size().ok_or(write::Error::ValueTooLarge)?;
        let mut data = vec![0u8; len];
        write_exact(self, &mut data)?;
        Ok(data)
    }
    /// Encodes the message to the start of the slice, returning the number of bytes written
    fn encode_to_slice(&self, buf: &mut [u8]) -> write::Result<usize> {
        let len = self.size().ok_or(write::Error::ValueTooLarge)?;
        if len > buf.len() {
            return Err(write::Error::BufferTooSmall { needed: len, available: buf.len() });
        }
        write_exact(self, &mut buf[..len])?;
        Ok(len)
    }
    /// Appends the encoded message to the vec, returning the number of bytes written.
    /// If encoding fails the vec is left unchanged.
    fn encode_into(&self, output: &mut Vec<u8>) -> write::Result<usize> {
        let len = self.size().ok_or(write::Error::ValueTooLarge)?;
        let start = output.len();
        let end = start.checked_add(len).ok_or(write::Error::ValueTooLarge)?;
        output.resize(end, 0);
        if let Err(err) = write_exact(self, &mut output[start..]) {
            output.truncate(start);
            return Err(err);
        }
        Ok(len)
    }
    /// Decodes a new instance of the message from a slice
    fn decode(data: &[u8]) -> read::Result<Self> {
        let mut input = CodedReader::with_slice(data);
        Self::new_from(&mut input).map_err(|err| {
            tracing::debug!(message_type = Self::full_name(), error = %err, "failed to decode message");
            err
        })
    }
    /// Merges the message with the data in a slice
    fn merge_from_slice(&mut self, data: &[u8]) -> read::Result<()> {
        let mut input = CodedReader::with_slice(data);
        self.merge_from(&mut input)
    }
    /// Resets every field in the message to its default and removes the unknown fields
    fn clear(&mut self) {
        *self = Self::default();
    }
}

fn write_exact<T: Message>(message: &T, buf: &mut [u8]) -> write::Result {
    let mut output = CodedWriter::with_slice(buf);
    let result = message.write_to(&mut output).and_then(|()| output.finish());
    if let Err(err) = &result {
        if err.is_consistency_fault() {
            tracing::error!(message_type = T::full_name(), error = %err, "calculated size disagreed with the bytes written");
        }
    }
    result
}
