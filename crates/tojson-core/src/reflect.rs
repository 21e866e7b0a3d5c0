//! Runtime introspection traits consumed by the conversion engine.
//!
//! A value takes part in conversion by implementing [`Reflect`]: it reports its
//! dynamic [`Shape`] and may opt into one of three capabilities that take
//! precedence over structural conversion:
//!
//! 1. [`ToJson`] — supply a surrogate value to be converted in its place;
//! 2. `serde::Serialize` — the value already knows how to render itself;
//! 3. `std::error::Error` — the value converts to its message string.
//!
//! Most types get their impl from `#[derive(Reflect)]`; the standard library
//! types that map naturally onto JSON are covered in [`crate::impls`].

use std::error::Error;
use std::fmt;

use crate::info::RecordInfo;
use crate::types::Primitive;

/// A value the conversion engine can inspect.
pub trait Reflect {
    /// The dynamic kind of this value.
    fn shape(&self) -> Shape<'_>;

    /// Custom conversion hook probe.
    fn as_to_json(&self) -> Option<&dyn ToJson> {
        None
    }

    /// Native marshaler probe: `Some` when the value renders itself through
    /// its own `Serialize` impl.
    fn as_marshaler(&self) -> Option<&dyn erased_serde::Serialize> {
        None
    }

    /// Error adapter probe.
    fn as_error(&self) -> Option<&dyn Error> {
        None
    }

    /// Name of the concrete type, used in diagnostics and errors.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Custom conversion hook.
///
/// The returned surrogate is converted in place of `self`, recursively, so it
/// may itself carry hooks.
///
/// ```
/// use tojson_core::{convert, Reflect, ToJson};
///
/// #[derive(Reflect)]
/// #[reflect(to_json)]
/// struct Celsius {
///     pub degrees: f64,
/// }
///
/// impl ToJson for Celsius {
///     fn to_json(&self) -> Box<dyn Reflect + '_> {
///         Box::new(format!("{}°C", self.degrees))
///     }
/// }
///
/// let tree = convert(&Celsius { degrees: 21.5 }).unwrap();
/// assert_eq!(tree, "21.5°C");
/// ```
pub trait ToJson {
    /// Produce the serialization surrogate for `self`.
    fn to_json(&self) -> Box<dyn Reflect + '_>;
}

/// Dynamic kind of a value, resolved once per visit.
#[derive(Clone, Copy)]
pub enum Shape<'a> {
    /// No value at all (`()`, JSON `null`). Converts to `null`.
    Absent,
    /// Type metadata rather than data. Always rejected.
    Introspection,
    /// A leaf passed through unchanged.
    Primitive(Primitive<'a>),
    /// A struct with named fields.
    Record(&'a dyn Record),
    /// An ordered collection.
    Sequence(&'a dyn Sequence),
    /// A key-value collection.
    Mapping(&'a dyn Mapping),
    /// A nilable reference; `None` when unset.
    Reference(Option<&'a dyn Reflect>),
    /// A kind the engine declines to convert.
    Opaque,
}

impl Shape<'_> {
    /// Short name of the kind, for tracing.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Absent => "absent",
            Shape::Introspection => "introspection",
            Shape::Primitive(_) => "primitive",
            Shape::Record(_) => "record",
            Shape::Sequence(_) => "sequence",
            Shape::Mapping(_) => "mapping",
            Shape::Reference(_) => "reference",
            Shape::Opaque => "opaque",
        }
    }
}

/// Field access for struct-like values.
pub trait Record {
    /// Static field metadata for this type.
    fn record_info(&self) -> &'static RecordInfo;

    /// Value of the field at `index` (declaration order).
    ///
    /// Implementations may return `None` for fields that are not exported;
    /// the engine never asks for those.
    fn field(&self, index: usize) -> Option<&dyn Reflect>;
}

/// Element access for ordered collections.
pub trait Sequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements in index order.
    fn items(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;
}

/// Entry access for key-value collections.
pub trait Mapping {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in the collection's own iteration order.
    fn entries(&self) -> Box<dyn Iterator<Item = (MapKey<'_>, &dyn Reflect)> + '_>;
}

/// A mapping key as seen by the engine.
#[derive(Clone, Copy)]
pub enum MapKey<'a> {
    /// The key already is a string and is used as-is.
    Str(&'a str),
    /// Any other key; stringified through its `Display` impl.
    Display(&'a dyn fmt::Display),
}

/// Types usable as mapping keys.
pub trait AsMapKey {
    fn as_map_key(&self) -> MapKey<'_>;
}
