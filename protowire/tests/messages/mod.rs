//! Message types used by the integration tests and benches, written the way
//! generated code would be.

#![allow(dead_code)]

use protowire::{message_info, Mergable, Message, RepeatedField, UnknownFields};
use protowire::collections::merge_singular;
use protowire::io::{read, write, CodedReader, CodedWriter, FieldNumber, LengthBuilder};
use protowire::raw;

/// A single string field
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Id {
    pub id: String,
    pub unknown: UnknownFields,
}

const ID_ID: FieldNumber = FieldNumber::new_const(1);

message_info! {
    Id = "protowire.test.Id" {
        id: 1 => LengthDelimited,
    }
}

impl Mergable for Id {
    fn merge(&mut self, other: &Self) {
        merge_singular::<raw::String>(&mut self.id, &other.id);
        self.unknown.merge(&other.unknown);
    }
}

impl Message for Id {
    fn merge_from(&mut self, input: &mut CodedReader) -> read::Result<()> {
        while let Some(field) = input.read_field()? {
            match field.number().get() {
                1 => field.merge_value::<raw::String>(&mut self.id)?,
                _ => field.add_unknown_to(&mut self.unknown)?,
            }
        }
        Ok(())
    }
    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder
            .add_singular::<raw::String>(ID_ID, &self.id)?
            .add_unknown(&self.unknown)
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_unknown(&self.unknown)?;
        output.write_singular::<raw::String>(ID_ID, &self.id)
    }
    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }
    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
    fn discard_unknown_fields(&mut self) {
        self.unknown.clear();
    }
}

/// A single int64 field
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Counter {
    pub value: i64,
    pub unknown: UnknownFields,
}

const COUNTER_VALUE: FieldNumber = FieldNumber::new_const(1);

message_info! {
    Counter = "protowire.test.Counter" {
        value: 1 => Varint,
    }
}

impl Mergable for Counter {
    fn merge(&mut self, other: &Self) {
        merge_singular::<raw::Int64>(&mut self.value, &other.value);
        self.unknown.merge(&other.unknown);
    }
}

impl Message for Counter {
    fn merge_from(&mut self, input: &mut CodedReader) -> read::Result<()> {
        while let Some(field) = input.read_field()? {
            match field.number().get() {
                1 => field.merge_value::<raw::Int64>(&mut self.value)?,
                _ => field.add_unknown_to(&mut self.unknown)?,
            }
        }
        Ok(())
    }
    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder
            .add_singular::<raw::Int64>(COUNTER_VALUE, &self.value)?
            .add_unknown(&self.unknown)
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_unknown(&self.unknown)?;
        output.write_singular::<raw::Int64>(COUNTER_VALUE, &self.value)
    }
    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }
    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
    fn discard_unknown_fields(&mut self) {
        self.unknown.clear();
    }
}

/// A nested counter at field 2
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Nested {
    pub child: Option<Box<Counter>>,
    pub unknown: UnknownFields,
}

const NESTED_CHILD: FieldNumber = FieldNumber::new_const(2);

message_info! {
    Nested = "protowire.test.Nested" {
        child: 2 => LengthDelimited,
    }
}

impl Mergable for Nested {
    fn merge(&mut self, other: &Self) {
        self.child.merge(&other.child);
        self.unknown.merge(&other.unknown);
    }
}

impl Message for Nested {
    fn merge_from(&mut self, input: &mut CodedReader) -> read::Result<()> {
        while let Some(field) = input.read_field()? {
            match field.number().get() {
                2 => field.merge_message(&mut self.child)?,
                _ => field.add_unknown_to(&mut self.unknown)?,
            }
        }
        Ok(())
    }
    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder
            .add_message(NESTED_CHILD, self.child.as_deref())?
            .add_unknown(&self.unknown)
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_unknown(&self.unknown)?;
        output.write_message(NESTED_CHILD, self.child.as_deref())
    }
    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }
    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
    fn discard_unknown_fields(&mut self) {
        self.unknown.clear();
        if let Some(child) = &mut self.child {
            child.discard_unknown_fields();
        }
    }
}

/// An embedding vector, the shape of message this codec is usually used for
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vector {
    pub id: Option<Box<Id>>,
    pub values: RepeatedField<f32>,
    pub timestamp: i64,
    pub unknown: UnknownFields,
}

const VECTOR_ID: FieldNumber = FieldNumber::new_const(1);
const VECTOR_VALUES: FieldNumber = FieldNumber::new_const(2);
const VECTOR_TIMESTAMP: FieldNumber = FieldNumber::new_const(3);

message_info! {
    Vector = "protowire.test.Vector" {
        id: 1 => LengthDelimited,
        values: 2 => Bit32 (Packed),
        timestamp: 3 => Varint,
    }
}

impl Mergable for Vector {
    fn merge(&mut self, other: &Self) {
        self.id.merge(&other.id);
        self.values.merge(&other.values);
        merge_singular::<raw::Int64>(&mut self.timestamp, &other.timestamp);
        self.unknown.merge(&other.unknown);
    }
}

impl Message for Vector {
    fn merge_from(&mut self, input: &mut CodedReader) -> read::Result<()> {
        while let Some(field) = input.read_field()? {
            match field.number().get() {
                1 => field.merge_message(&mut self.id)?,
                2 => field.add_entries_to::<raw::Float>(&mut self.values)?,
                3 => field.merge_value::<raw::Int64>(&mut self.timestamp)?,
                _ => field.add_unknown_to(&mut self.unknown)?,
            }
        }
        Ok(())
    }
    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder
            .add_message(VECTOR_ID, self.id.as_deref())?
            .add_packed::<raw::Float>(VECTOR_VALUES, &self.values)?
            .add_singular::<raw::Int64>(VECTOR_TIMESTAMP, &self.timestamp)?
            .add_unknown(&self.unknown)
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_unknown(&self.unknown)?;
        output.write_singular::<raw::Int64>(VECTOR_TIMESTAMP, &self.timestamp)?;
        output.write_packed::<raw::Float>(VECTOR_VALUES, &self.values)?;
        output.write_message(VECTOR_ID, self.id.as_deref())
    }
    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }
    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
    fn discard_unknown_fields(&mut self) {
        self.unknown.clear();
        if let Some(id) = &mut self.id {
            id.discard_unknown_fields();
        }
    }
}

/// A message with a field of every value type
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sample {
    pub int32: i32,
    pub int64: i64,
    pub uint32: u32,
    pub uint64: u64,
    pub sint32: i32,
    pub sint64: i64,
    pub flag: bool,
    pub fixed32: u32,
    pub fixed64: u64,
    pub sfixed32: i32,
    pub sfixed64: i64,
    pub float: f32,
    pub double: f64,
    pub name: String,
    pub data: Vec<u8>,
    pub child: Option<Box<Counter>>,
    pub children: RepeatedField<Counter>,
    pub fixed32s: RepeatedField<u32>,
    pub doubles: RepeatedField<f64>,
    pub labels: RepeatedField<String>,
    pub int64s: RepeatedField<i64>,
    pub unknown: UnknownFields,
}

mod sample {
    use protowire::io::FieldNumber;

    pub const INT32: FieldNumber = FieldNumber::new_const(1);
    pub const INT64: FieldNumber = FieldNumber::new_const(2);
    pub const UINT32: FieldNumber = FieldNumber::new_const(3);
    pub const UINT64: FieldNumber = FieldNumber::new_const(4);
    pub const SINT32: FieldNumber = FieldNumber::new_const(5);
    pub const SINT64: FieldNumber = FieldNumber::new_const(6);
    pub const FLAG: FieldNumber = FieldNumber::new_const(7);
    pub const FIXED32: FieldNumber = FieldNumber::new_const(8);
    pub const FIXED64: FieldNumber = FieldNumber::new_const(9);
    pub const SFIXED32: FieldNumber = FieldNumber::new_const(10);
    pub const SFIXED64: FieldNumber = FieldNumber::new_const(11);
    pub const FLOAT: FieldNumber = FieldNumber::new_const(12);
    pub const DOUBLE: FieldNumber = FieldNumber::new_const(13);
    pub const NAME: FieldNumber = FieldNumber::new_const(14);
    pub const DATA: FieldNumber = FieldNumber::new_const(15);
    pub const CHILD: FieldNumber = FieldNumber::new_const(16);
    pub const CHILDREN: FieldNumber = FieldNumber::new_const(17);
    pub const FIXED32S: FieldNumber = FieldNumber::new_const(18);
    pub const DOUBLES: FieldNumber = FieldNumber::new_const(19);
    pub const LABELS: FieldNumber = FieldNumber::new_const(20);
    pub const INT64S: FieldNumber = FieldNumber::new_const(21);
}

message_info! {
    Sample = "protowire.test.Sample" {
        int32: 1 => Varint,
        int64: 2 => Varint,
        uint32: 3 => Varint,
        uint64: 4 => Varint,
        sint32: 5 => Varint,
        sint64: 6 => Varint,
        flag: 7 => Varint,
        fixed32: 8 => Bit32,
        fixed64: 9 => Bit64,
        sfixed32: 10 => Bit32,
        sfixed64: 11 => Bit64,
        float: 12 => Bit32,
        double: 13 => Bit64,
        name: 14 => LengthDelimited,
        data: 15 => LengthDelimited,
        child: 16 => LengthDelimited,
        children: 17 => LengthDelimited (Repeated),
        fixed32s: 18 => Bit32 (Packed),
        doubles: 19 => Bit64 (Packed),
        labels: 20 => LengthDelimited (Repeated),
        int64s: 21 => Varint (Packed),
    }
}

impl Mergable for Sample {
    fn merge(&mut self, other: &Self) {
        merge_singular::<raw::Int32>(&mut self.int32, &other.int32);
        merge_singular::<raw::Int64>(&mut self.int64, &other.int64);
        merge_singular::<raw::Uint32>(&mut self.uint32, &other.uint32);
        merge_singular::<raw::Uint64>(&mut self.uint64, &other.uint64);
        merge_singular::<raw::Sint32>(&mut self.sint32, &other.sint32);
        merge_singular::<raw::Sint64>(&mut self.sint64, &other.sint64);
        merge_singular::<raw::Bool>(&mut self.flag, &other.flag);
        merge_singular::<raw::Fixed32>(&mut self.fixed32, &other.fixed32);
        merge_singular::<raw::Fixed64>(&mut self.fixed64, &other.fixed64);
        merge_singular::<raw::Sfixed32>(&mut self.sfixed32, &other.sfixed32);
        merge_singular::<raw::Sfixed64>(&mut self.sfixed64, &other.sfixed64);
        merge_singular::<raw::Float>(&mut self.float, &other.float);
        merge_singular::<raw::Double>(&mut self.double, &other.double);
        merge_singular::<raw::String>(&mut self.name, &other.name);
        merge_singular::<raw::Bytes>(&mut self.data, &other.data);
        self.child.merge(&other.child);
        self.children.merge(&other.children);
        self.fixed32s.merge(&other.fixed32s);
        self.doubles.merge(&other.doubles);
        self.labels.merge(&other.labels);
        self.int64s.merge(&other.int64s);
        self.unknown.merge(&other.unknown);
    }
}

impl Message for Sample {
    fn merge_from(&mut self, input: &mut CodedReader) -> read::Result<()> {
        while let Some(field) = input.read_field()? {
            match field.number().get() {
                1 => field.merge_value::<raw::Int32>(&mut self.int32)?,
                2 => field.merge_value::<raw::Int64>(&mut self.int64)?,
                3 => field.merge_value::<raw::Uint32>(&mut self.uint32)?,
                4 => field.merge_value::<raw::Uint64>(&mut self.uint64)?,
                5 => field.merge_value::<raw::Sint32>(&mut self.sint32)?,
                6 => field.merge_value::<raw::Sint64>(&mut self.sint64)?,
                7 => field.merge_value::<raw::Bool>(&mut self.flag)?,
                8 => field.merge_value::<raw::Fixed32>(&mut self.fixed32)?,
                9 => field.merge_value::<raw::Fixed64>(&mut self.fixed64)?,
                10 => field.merge_value::<raw::Sfixed32>(&mut self.sfixed32)?,
                11 => field.merge_value::<raw::Sfixed64>(&mut self.sfixed64)?,
                12 => field.merge_value::<raw::Float>(&mut self.float)?,
                13 => field.merge_value::<raw::Double>(&mut self.double)?,
                14 => field.merge_value::<raw::String>(&mut self.name)?,
                15 => field.merge_value::<raw::Bytes>(&mut self.data)?,
                16 => field.merge_message(&mut self.child)?,
                17 => field.add_entries_to::<raw::Message<Counter>>(&mut self.children)?,
                18 => field.add_entries_to::<raw::Fixed32>(&mut self.fixed32s)?,
                19 => field.add_entries_to::<raw::Double>(&mut self.doubles)?,
                20 => field.add_entries_to::<raw::String>(&mut self.labels)?,
                21 => field.add_entries_to::<raw::Int64>(&mut self.int64s)?,
                _ => field.add_unknown_to(&mut self.unknown)?,
            }
        }
        Ok(())
    }
    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder
            .add_singular::<raw::Int32>(sample::INT32, &self.int32)?
            .add_singular::<raw::Int64>(sample::INT64, &self.int64)?
            .add_singular::<raw::Uint32>(sample::UINT32, &self.uint32)?
            .add_singular::<raw::Uint64>(sample::UINT64, &self.uint64)?
            .add_singular::<raw::Sint32>(sample::SINT32, &self.sint32)?
            .add_singular::<raw::Sint64>(sample::SINT64, &self.sint64)?
            .add_singular::<raw::Bool>(sample::FLAG, &self.flag)?
            .add_singular::<raw::Fixed32>(sample::FIXED32, &self.fixed32)?
            .add_singular::<raw::Fixed64>(sample::FIXED64, &self.fixed64)?
            .add_singular::<raw::Sfixed32>(sample::SFIXED32, &self.sfixed32)?
            .add_singular::<raw::Sfixed64>(sample::SFIXED64, &self.sfixed64)?
            .add_singular::<raw::Float>(sample::FLOAT, &self.float)?
            .add_singular::<raw::Double>(sample::DOUBLE, &self.double)?
            .add_singular::<raw::String>(sample::NAME, &self.name)?
            .add_singular::<raw::Bytes>(sample::DATA, &self.data)?
            .add_message(sample::CHILD, self.child.as_deref())?
            .add_values::<raw::Message<Counter>>(sample::CHILDREN, &self.children)?
            .add_packed::<raw::Fixed32>(sample::FIXED32S, &self.fixed32s)?
            .add_packed::<raw::Double>(sample::DOUBLES, &self.doubles)?
            .add_values::<raw::String>(sample::LABELS, &self.labels)?
            .add_packed::<raw::Int64>(sample::INT64S, &self.int64s)?
            .add_unknown(&self.unknown)
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_unknown(&self.unknown)?;
        output.write_packed::<raw::Int64>(sample::INT64S, &self.int64s)?;
        output.write_values::<raw::String>(sample::LABELS, &self.labels)?;
        output.write_packed::<raw::Double>(sample::DOUBLES, &self.doubles)?;
        output.write_packed::<raw::Fixed32>(sample::FIXED32S, &self.fixed32s)?;
        output.write_values::<raw::Message<Counter>>(sample::CHILDREN, &self.children)?;
        output.write_message(sample::CHILD, self.child.as_deref())?;
        output.write_singular::<raw::Bytes>(sample::DATA, &self.data)?;
        output.write_singular::<raw::String>(sample::NAME, &self.name)?;
        output.write_singular::<raw::Double>(sample::DOUBLE, &self.double)?;
        output.write_singular::<raw::Float>(sample::FLOAT, &self.float)?;
        output.write_singular::<raw::Sfixed64>(sample::SFIXED64, &self.sfixed64)?;
        output.write_singular::<raw::Sfixed32>(sample::SFIXED32, &self.sfixed32)?;
        output.write_singular::<raw::Fixed64>(sample::FIXED64, &self.fixed64)?;
        output.write_singular::<raw::Fixed32>(sample::FIXED32, &self.fixed32)?;
        output.write_singular::<raw::Bool>(sample::FLAG, &self.flag)?;
        output.write_singular::<raw::Sint64>(sample::SINT64, &self.sint64)?;
        output.write_singular::<raw::Sint32>(sample::SINT32, &self.sint32)?;
        output.write_singular::<raw::Uint64>(sample::UINT64, &self.uint64)?;
        output.write_singular::<raw::Uint32>(sample::UINT32, &self.uint32)?;
        output.write_singular::<raw::Int64>(sample::INT64, &self.int64)?;
        output.write_singular::<raw::Int32>(sample::INT32, &self.int32)
    }
    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }
    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
    fn discard_unknown_fields(&mut self) {
        self.unknown.clear();
        if let Some(child) = &mut self.child {
            child.discard_unknown_fields();
        }
        for child in &mut self.children {
            child.discard_unknown_fields();
        }
    }
}

/// An older version of `Sample` that only knows about some of its fields
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleV1 {
    pub int32: i32,
    pub name: String,
    pub child: Option<Box<Counter>>,
    pub unknown: UnknownFields,
}

message_info! {
    SampleV1 = "protowire.test.SampleV1" {
        int32: 1 => Varint,
        name: 14 => LengthDelimited,
        child: 16 => LengthDelimited,
    }
}

impl Mergable for SampleV1 {
    fn merge(&mut self, other: &Self) {
        merge_singular::<raw::Int32>(&mut self.int32, &other.int32);
        merge_singular::<raw::String>(&mut self.name, &other.name);
        self.child.merge(&other.child);
        self.unknown.merge(&other.unknown);
    }
}

impl Message for SampleV1 {
    fn merge_from(&mut self, input: &mut CodedReader) -> read::Result<()> {
        while let Some(field) = input.read_field()? {
            match field.number().get() {
                1 => field.merge_value::<raw::Int32>(&mut self.int32)?,
                14 => field.merge_value::<raw::String>(&mut self.name)?,
                16 => field.merge_message(&mut self.child)?,
                _ => field.add_unknown_to(&mut self.unknown)?,
            }
        }
        Ok(())
    }
    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        builder
            .add_singular::<raw::Int32>(sample::INT32, &self.int32)?
            .add_singular::<raw::String>(sample::NAME, &self.name)?
            .add_message(sample::CHILD, self.child.as_deref())?
            .add_unknown(&self.unknown)
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_unknown(&self.unknown)?;
        output.write_message(sample::CHILD, self.child.as_deref())?;
        output.write_singular::<raw::String>(sample::NAME, &self.name)?;
        output.write_singular::<raw::Int32>(sample::INT32, &self.int32)
    }
    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }
    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
    fn discard_unknown_fields(&mut self) {
        self.unknown.clear();
        if let Some(child) = &mut self.child {
            child.discard_unknown_fields();
        }
    }
}

/// A counter whose calculated size can be made to disagree with the bytes it writes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Miscounted {
    pub value: i64,
    /// Bytes added to the calculated size that are never written
    pub overcount: usize,
    /// Leaves the value out of the calculated size while still writing it
    pub uncounted_value: bool,
    pub unknown: UnknownFields,
}

message_info! {
    Miscounted = "protowire.test.Miscounted" {
        value: 1 => Varint,
    }
}

impl Mergable for Miscounted {
    fn merge(&mut self, other: &Self) {
        merge_singular::<raw::Int64>(&mut self.value, &other.value);
        self.unknown.merge(&other.unknown);
    }
}

impl Message for Miscounted {
    fn merge_from(&mut self, input: &mut CodedReader) -> read::Result<()> {
        while let Some(field) = input.read_field()? {
            match field.number().get() {
                1 => field.merge_value::<raw::Int64>(&mut self.value)?,
                _ => field.add_unknown_to(&mut self.unknown)?,
            }
        }
        Ok(())
    }
    fn calculate_size(&self, builder: LengthBuilder) -> Option<LengthBuilder> {
        let builder = if self.uncounted_value {
            builder
        } else {
            builder.add_singular::<raw::Int64>(COUNTER_VALUE, &self.value)?
        };
        builder
            .add_bytes(self.overcount)?
            .add_unknown(&self.unknown)
    }
    fn write_to(&self, output: &mut CodedWriter) -> write::Result {
        output.write_unknown(&self.unknown)?;
        output.write_singular::<raw::Int64>(COUNTER_VALUE, &self.value)
    }
    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }
    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
    fn discard_unknown_fields(&mut self) {
        self.unknown.clear();
    }
}
