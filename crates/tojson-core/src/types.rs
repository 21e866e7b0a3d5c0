//! Value types shared by the reflection traits and the conversion engine.

use serde_json::{Number, Value};

/// The output of a conversion: a tree made only of JSON primitives, arrays and
/// objects.
///
/// `serde_json::Value` is used directly so the result can be handed to any
/// serde-based encoder. With the workspace's `preserve_order` feature, object
/// keys keep the order in which the engine inserted them.
pub type ConvertedTree = Value;

/// A leaf value the engine passes through unchanged.
///
/// Signed and unsigned integers are kept apart so that `u64::MAX` and
/// `i64::MIN` both survive without a detour through floating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(&'a str),
}

impl Primitive<'_> {
    /// Whether this is the zero value of its kind (`false`, `0`, `0.0`, `""`).
    pub fn is_zero(&self) -> bool {
        match *self {
            Primitive::Bool(b) => !b,
            Primitive::Int(i) => i == 0,
            Primitive::Uint(u) => u == 0,
            Primitive::Float(f) => f == 0.0,
            Primitive::Str(s) => s.is_empty(),
        }
    }

    /// Build the JSON leaf for this primitive.
    ///
    /// Non-finite floats have no JSON number form and become `null`, the same
    /// rendering `serde_json` gives them when serializing an `f64`.
    pub fn to_value(&self) -> Value {
        match *self {
            Primitive::Bool(b) => Value::Bool(b),
            Primitive::Int(i) => Value::Number(i.into()),
            Primitive::Uint(u) => Value::Number(u.into()),
            Primitive::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
            Primitive::Str(s) => Value::String(s.to_owned()),
        }
    }
}
