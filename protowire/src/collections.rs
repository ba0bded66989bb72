//! Defines collection types used by message types for repeated fields, and the
//! merge behavior of repeated and nested message fields.

use crate::Mergable;
use crate::raw::Value;

/// A repeated field. This is the type used by message types to represent a repeated field value.
pub type RepeatedField<T> = Vec<T>;

impl<T: Clone> Mergable for RepeatedField<T> {
    /// Appends the other field's elements after this field's elements
    fn merge(&mut self, other: &Self) {
        self.extend_from_slice(other);
    }
}

impl<T: Mergable + Clone> Mergable for Option<Box<T>> {
    /// Merges a set nested message into this one, creating it if this one isn't set
    fn merge(&mut self, other: &Self) {
        if let Some(other) = other {
            match self {
                Some(value) => value.merge(other),
                None => *self = Some(other.clone()),
            }
        }
    }
}

/// Merges a singular value into another, replacing it if the source value isn't the type's default.
///
/// # Examples
///
/// ```
/// use protowire::collections::merge_singular;
/// use protowire::raw;
///
/// let mut value = 5;
/// merge_singular::<raw::Int32>(&mut value, &0);
/// assert_eq!(value, 5);
/// merge_singular::<raw::Int32>(&mut value, &7);
/// assert_eq!(value, 7);
/// ```
#[inline]
pub fn merge_singular<V: Value>(value: &mut V::Inner, other: &V::Inner)
    where V::Inner: Clone
{
    if !V::wrap_ref(other).is_default() {
        value.clone_from(other);
    }
}
