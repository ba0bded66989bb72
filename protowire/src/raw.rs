//! Contains types for protobuf values and traits for value operations.
//! Each value type wraps the Rust type it's stored as and defines how that
//! type is sized, read, and written on the wire.

use crate::internal::Sealed;
use crate::io::{raw_varint_size, read, write, CodedReader, CodedWriter, LengthBuilder, WireType};
use trapper::{newtype, Wrapper};

/// A value capable of reading itself from an input, writing itself to an output and calculating its size.
pub trait Value: Wrapper + Sized + Sealed {
    /// A value indicating the wire type of the value without packing.
    /// This can be used to indicate if a value is eligible for repeated field packing.
    const WIRE_TYPE: WireType;

    /// The encoded size of the value if every value of the type has the same size
    const FIXED_SIZE: Option<usize> = None;

    /// Calculates the size of the value as encoded on the wire
    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder>;

    /// Reads a new instance of the value from the [`CodedReader`](../io/read/struct.CodedReader.html)
    fn read_new(input: &mut CodedReader) -> read::Result<Self>;

    /// Merges the value with the [`CodedReader`](../io/read/struct.CodedReader.html).
    /// For most values this replaces the existing value.
    fn merge_from(&mut self, input: &mut CodedReader) -> read::Result<()> {
        *self = Self::read_new(input)?;
        Ok(())
    }

    /// Writes the value to the [`CodedWriter`](../io/write/struct.CodedWriter.html)
    fn write_to(&self, output: &mut CodedWriter) -> write::Result;

    /// Returns if the value is the default for its type. Singular default values aren't written.
    fn is_default(&self) -> bool;
}

/// A value which can be written as part of a packed repeated field
pub trait Packable: Value {
    /// Calculates the size of the packed values, not including the tag or length prefix
    fn packed_len(values: &[Self::Inner]) -> Option<usize> {
        match Self::FIXED_SIZE {
            Some(size) => {
                #[cfg(feature = "checked_size")]
                return values.len().checked_mul(size);

                #[cfg(not(feature = "checked_size"))]
                return Some(values.len() * size);
            },
            None => values
                .iter()
                .try_fold(LengthBuilder::new(), |builder, value| builder.add_value::<Self>(value))
                .map(LengthBuilder::build),
        }
    }
}

#[inline]
fn zigzag32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

#[inline]
fn unzigzag32(n: u32) -> i32 {
    ((n >> 1) as i32) ^ -((n & 1) as i32)
}

#[inline]
fn zigzag64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

#[inline]
fn unzigzag64(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}

newtype! {
    /// A varint encoded 32-bit value. Negative values are sign extended and encoded as 10-byte varints.
    pub type Int32(i32);
}

impl Sealed for Int32 { }
impl Value for Int32 {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder.add_bytes(raw_varint_size(i64::from(self.0) as u64))
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        input.read_varint64().map(|v| Self(v as i32))
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_varint64(i64::from(self.0) as u64)
    }
    fn is_default(&self) -> bool { self.0 == 0 }
}
impl Packable for Int32 { }

newtype! {
    /// A varint encoded 32-bit value. Can be at most 5 bytes.
    pub type Uint32(u32);
}

impl Sealed for Uint32 { }
impl Value for Uint32 {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder.add_bytes(raw_varint_size(u64::from(self.0)))
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        input.read_varint32().map(Self)
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_varint32(self.0)
    }
    fn is_default(&self) -> bool { self.0 == 0 }
}
impl Packable for Uint32 { }

newtype! {
    /// A varint encoded 64-bit value. Can be at most 10 bytes.
    pub type Int64(i64);
}

impl Sealed for Int64 { }
impl Value for Int64 {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder.add_bytes(raw_varint_size(self.0 as u64))
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        input.read_varint64().map(|v| Self(v as i64))
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_varint64(self.0 as u64)
    }
    fn is_default(&self) -> bool { self.0 == 0 }
}
impl Packable for Int64 { }

newtype! {
    /// A varint encoded 64-bit value. Can be at most 10 bytes.
    pub type Uint64(u64);
}

impl Sealed for Uint64 { }
impl Value for Uint64 {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder.add_bytes(raw_varint_size(self.0))
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        input.read_varint64().map(Self)
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_varint64(self.0)
    }
    fn is_default(&self) -> bool { self.0 == 0 }
}
impl Packable for Uint64 { }

newtype! {
    /// A varint encoded 32-bit value. This is encoded using zig-zag encoding,
    /// which makes it more efficient at encoding negative values.
    pub type Sint32(i32);
}

impl Sealed for Sint32 { }
impl Value for Sint32 {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder.add_bytes(raw_varint_size(u64::from(zigzag32(self.0))))
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        input.read_varint32().map(|v| Self(unzigzag32(v)))
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_varint32(zigzag32(self.0))
    }
    fn is_default(&self) -> bool { self.0 == 0 }
}
impl Packable for Sint32 { }

newtype! {
    /// A varint encoded 64-bit value. This is encoded using zig-zag encoding,
    /// which makes it more efficient at encoding negative values.
    pub type Sint64(i64);
}

impl Sealed for Sint64 { }
impl Value for Sint64 {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder.add_bytes(raw_varint_size(zigzag64(self.0)))
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        input.read_varint64().map(|v| Self(unzigzag64(v)))
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_varint64(zigzag64(self.0))
    }
    fn is_default(&self) -> bool { self.0 == 0 }
}
impl Packable for Sint64 { }

newtype! {
    /// A fixed size 32-bit value. This is encoded as 4 little endian bytes.
    pub type Fixed32(u32);
}

impl Sealed for Fixed32 { }
impl Value for Fixed32 {
    const WIRE_TYPE: WireType = WireType::Bit32;
    const FIXED_SIZE: Option<usize> = Some(4);

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder.add_bytes(4)
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        input.read_bit32().map(Self)
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_bit32(self.0)
    }
    fn is_default(&self) -> bool { self.0 == 0 }
}
impl Packable for Fixed32 { }

newtype! {
    /// A fixed size 64-bit value. This is encoded as 8 little endian bytes.
    pub type Fixed64(u64);
}

impl Sealed for Fixed64 { }
impl Value for Fixed64 {
    const WIRE_TYPE: WireType = WireType::Bit64;
    const FIXED_SIZE: Option<usize> = Some(8);

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder.add_bytes(8)
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        input.read_bit64().map(Self)
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_bit64(self.0)
    }
    fn is_default(&self) -> bool { self.0 == 0 }
}
impl Packable for Fixed64 { }

newtype! {
    /// A signed, fixed size 32-bit value. This is encoded as 4 little endian bytes.
    pub type Sfixed32(i32);
}

impl Sealed for Sfixed32 { }
impl Value for Sfixed32 {
    const WIRE_TYPE: WireType = WireType::Bit32;
    const FIXED_SIZE: Option<usize> = Some(4);

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder.add_bytes(4)
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        input.read_bit32().map(|v| Self(v as i32))
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_bit32(self.0 as u32)
    }
    fn is_default(&self) -> bool { self.0 == 0 }
}
impl Packable for Sfixed32 { }

newtype! {
    /// A signed, fixed size 64-bit value. This is encoded as 8 little endian bytes.
    pub type Sfixed64(i64);
}

impl Sealed for Sfixed64 { }
impl Value for Sfixed64 {
    const WIRE_TYPE: WireType = WireType::Bit64;
    const FIXED_SIZE: Option<usize> = Some(8);

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder.add_bytes(8)
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        input.read_bit64().map(|v| Self(v as i64))
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_bit64(self.0 as u64)
    }
    fn is_default(&self) -> bool { self.0 == 0 }
}
impl Packable for Sfixed64 { }

newtype! {
    /// A single precision float value. This is encoded as 4 little endian bytes.
    pub type Float(f32);
}

impl Sealed for Float { }
impl Value for Float {
    const WIRE_TYPE: WireType = WireType::Bit32;
    const FIXED_SIZE: Option<usize> = Some(4);

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder.add_bytes(4)
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        input.read_bit32().map(|v| Self(f32::from_bits(v)))
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_bit32(self.0.to_bits())
    }
    // both zeros are omitted, NaN is always written
    fn is_default(&self) -> bool { self.0 == 0.0 }
}
impl Packable for Float { }

newtype! {
    /// A double precision float value. This is encoded as 8 little endian bytes.
    pub type Double(f64);
}

impl Sealed for Double { }
impl Value for Double {
    const WIRE_TYPE: WireType = WireType::Bit64;
    const FIXED_SIZE: Option<usize> = Some(8);

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder.add_bytes(8)
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        input.read_bit64().map(|v| Self(f64::from_bits(v)))
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_bit64(self.0.to_bits())
    }
    fn is_default(&self) -> bool { self.0 == 0.0 }
}
impl Packable for Double { }

newtype! {
    /// A bool value. This is encoded as a varint value
    pub type Bool(bool);
}

impl Sealed for Bool { }
impl Value for Bool {
    const WIRE_TYPE: WireType = WireType::Varint;
    const FIXED_SIZE: Option<usize> = Some(1);

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder.add_bytes(1)
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        input.read_varint64().map(|v| Self(v != 0))
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_varint64(self.0 as u64)
    }
    fn is_default(&self) -> bool { !self.0 }
}
impl Packable for Bool { }

newtype! {
    /// A string value. This is encoded as a length-delimited series of UTF8 bytes.
    pub type String(std::string::String);
}

impl Sealed for String { }
impl Value for String {
    const WIRE_TYPE: WireType = WireType::LengthDelimited;

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        let len = self.0.len();
        builder.add_length(len)?.add_bytes(len)
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        let bytes = input.read_length_delimited()?;
        let value = core::str::from_utf8(bytes)?;
        Ok(Self(value.to_owned()))
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_length_delimited(self.0.as_bytes())
    }
    fn is_default(&self) -> bool { self.0.is_empty() }
}

newtype! {
    /// A bytes value. This is encoded as a length-delimited series of bytes.
    pub type Bytes(Vec<u8>);
}

impl Sealed for Bytes { }
impl Value for Bytes {
    const WIRE_TYPE: WireType = WireType::LengthDelimited;

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        let len = self.0.len();
        builder.add_length(len)?.add_bytes(len)
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        input.read_length_delimited().map(|v| Self(v.to_vec()))
    }
    fn merge_from(&mut self, input: &mut CodedReader) -> read::Result<()> {
        let value = input.read_length_delimited()?;
        self.0.clear();
        self.0.extend_from_slice(value);
        Ok(())
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_length_delimited(&self.0)
    }
    fn is_default(&self) -> bool { self.0.is_empty() }
}

newtype! {
    /// A message value. This is encoded as a length-delimited series of bytes.
    pub type Message<T>(T);
}

impl<T> Sealed for Message<T> { }
impl<T: crate::Message> Value for Message<T> {
    const WIRE_TYPE: WireType = WireType::LengthDelimited;

    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        let len = self.0.calculate_size(LengthBuilder::new())?.build();
        builder.add_length(len)?.add_bytes(len)
    }
    fn read_new(input: &mut CodedReader) -> read::Result<Self> {
        let mut t = Self::wrap(T::default());
        t.merge_from(input)?;
        Ok(t)
    }
    fn merge_from(&mut self, input: &mut CodedReader) -> read::Result<()> {
        let value = &mut self.0;
        input.read_message(|input| value.merge_from(input))
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        let end = output.position();
        self.0.write_to(output)?;
        let len = end - output.position();
        output.write_length(len)
    }
    // a present message is always written, even if it's empty
    fn is_default(&self) -> bool { false }
}
