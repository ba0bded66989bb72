//! Provides static type information about message types.
//!
//! Each message type describes its declared fields with a constant table of
//! [`FieldDescriptor`](struct.FieldDescriptor.html)s, usually built by
//! [`message_info!`](../macro.message_info.html).

use crate::io::{FieldNumber, Tag, WireType};

/// How many values a field holds and how they're written
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// A single value, omitted when it's the default
    Singular,
    /// Any number of values, each written with its own tag
    Repeated,
    /// Any number of packable values, written in one length delimited run
    Packed,
}

/// Describes a declared field of a message type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    name: &'static str,
    number: FieldNumber,
    wire_type: WireType,
    cardinality: Cardinality,
}

impl FieldDescriptor {
    /// Creates a new field descriptor. `wire_type` is the wire type of a single value of the field.
    pub const fn new(name: &'static str, number: FieldNumber, wire_type: WireType, cardinality: Cardinality) -> Self {
        FieldDescriptor { name, number, wire_type, cardinality }
    }
    /// Gets the name of the field
    pub const fn name(&self) -> &'static str {
        self.name
    }
    /// Gets the field number of the field
    pub const fn number(&self) -> FieldNumber {
        self.number
    }
    /// Gets the wire type of a single value of the field
    pub const fn wire_type(&self) -> WireType {
        self.wire_type
    }
    /// Gets the cardinality of the field
    pub const fn cardinality(&self) -> Cardinality {
        self.cardinality
    }
    /// Gets the tag the field is written with
    pub fn tag(&self) -> Tag {
        match self.cardinality {
            Cardinality::Packed => Tag::new(self.number, WireType::LengthDelimited),
            _ => Tag::new(self.number, self.wire_type),
        }
    }
    /// Returns whether a value of the field can be read from the wire type.
    /// Repeated packable fields are read both packed and unpacked.
    ///
    /// # Examples
    ///
    /// ```
    /// use protowire::io::{FieldNumber, WireType};
    /// use protowire::reflect::{Cardinality, FieldDescriptor};
    ///
    /// let field = FieldDescriptor::new("values", FieldNumber::new_const(2), WireType::Bit32, Cardinality::Packed);
    /// assert!(field.accepts(WireType::Bit32));
    /// assert!(field.accepts(WireType::LengthDelimited));
    /// assert!(!field.accepts(WireType::Varint));
    /// ```
    pub fn accepts(&self, wire_type: WireType) -> bool {
        if wire_type == self.wire_type {
            return true;
        }
        self.cardinality != Cardinality::Singular
            && self.wire_type.is_packable()
            && wire_type == WireType::LengthDelimited
    }
}

/// Provides basic static type information about a message type.
pub trait MessageInfo {
    /// The full name of the message without a preceding dot.
    fn full_name() -> &'static str;
    /// The name of the message type, the last segment of the full name.
    fn name() -> &'static str {
        let full_name = Self::full_name();
        match full_name.rfind('.') {
            Some(i) => &full_name[i + 1..],
            None => full_name,
        }
    }
    /// The declared fields of the message in ascending field number order
    fn fields() -> &'static [FieldDescriptor];
    /// Finds a declared field by number
    fn field(number: FieldNumber) -> Option<&'static FieldDescriptor> {
        Self::fields().iter().find(|f| f.number == number)
    }
}

/// Implements [`MessageInfo`](reflect/trait.MessageInfo.html) for a message type from its
/// full name and a list of its fields.
///
/// Each field is written as `name: number => WireType`, optionally followed by a
/// parenthesized [`Cardinality`](reflect/enum.Cardinality.html). Fields are singular by default.
///
/// # Examples
///
/// ```
/// use protowire::message_info;
/// use protowire::io::WireType;
/// use protowire::reflect::{Cardinality, MessageInfo};
///
/// struct Vector;
///
/// message_info! {
///     Vector = "geometry.Vector" {
///         id: 1 => LengthDelimited,
///         values: 2 => Bit32 (Packed),
///         tags: 3 => LengthDelimited (Repeated),
///     }
/// }
///
/// assert_eq!(Vector::name(), "Vector");
/// assert_eq!(Vector::fields().len(), 3);
/// assert_eq!(Vector::fields()[1].cardinality(), Cardinality::Packed);
/// assert_eq!(Vector::fields()[1].wire_type(), WireType::Bit32);
/// ```
#[macro_export]
macro_rules! message_info {
    (@cardinality) => {
        $crate::reflect::Cardinality::Singular
    };
    (@cardinality $cardinality:ident) => {
        $crate::reflect::Cardinality::$cardinality
    };
    ($type:ty = $full_name:literal {
        $($field:ident: $number:literal => $wire_type:ident $(($cardinality:ident))?),* $(,)?
    }) => {
        impl $crate::reflect::MessageInfo for $type {
            fn full_name() -> &'static str {
                $full_name
            }
            fn fields() -> &'static [$crate::reflect::FieldDescriptor] {
                const FIELDS: &[$crate::reflect::FieldDescriptor] = &[
                    $($crate::reflect::FieldDescriptor::new(
                        stringify!($field),
                        $crate::io::FieldNumber::new_const($number),
                        $crate::io::WireType::$wire_type,
                        $crate::message_info!(@cardinality $($cardinality)?),
                    )),*
                ];
                FIELDS
            }
        }
    };
}
