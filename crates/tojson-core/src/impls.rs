//! `Reflect` implementations for standard library and `serde_json` types.
//!
//! | Rust type | Shape |
//! |---|---|
//! | `bool`, integers, floats, `str`, `String` | primitive |
//! | `()`, `serde_json::Value::Null` | absent |
//! | `Option<T>` | nilable reference |
//! | `&T`, `Box<T>`, `Rc<T>`, `Arc<T>`, `Cow<T>` | transparent (never unset) |
//! | `Vec<T>`, `[T; N]`, `&[T]`, `Box<[T]>`, `VecDeque<T>`, sets | sequence |
//! | `HashMap<K, V>`, `BTreeMap<K, V>`, `serde_json::Map` | mapping |
//! | `io::Error`, `dyn Error`, parse errors, ... | error adapter |
//! | `TypeId`, `RecordInfo`, `FieldInfo`, `FieldPolicy` | introspection handle |

use std::any::TypeId;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::error::Error;
use std::rc::Rc;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ConversionError;
use crate::info::{FieldInfo, RecordInfo};
use crate::policy::FieldPolicy;
use crate::reflect::{AsMapKey, MapKey, Mapping, Reflect, Sequence, Shape, ToJson};
use crate::types::Primitive;

// ----------------------------------------------------------------------------
// Primitives

macro_rules! impl_primitive {
    ($variant:ident => $($ty:ty),+ $(,)?) => {$(
        impl Reflect for $ty {
            fn shape(&self) -> Shape<'_> {
                Shape::Primitive(Primitive::$variant((*self).into()))
            }
        }
    )+};
}

impl_primitive!(Bool => bool);
impl_primitive!(Int => i8, i16, i32, i64);
impl_primitive!(Uint => u8, u16, u32, u64);
impl_primitive!(Float => f64);

impl Reflect for f32 {
    fn shape(&self) -> Shape<'_> {
        Shape::Primitive(Primitive::Float(widen_f32(*self)))
    }
}

/// Widen through the shortest decimal form, so `0.1f32` stays `0.1` instead of
/// `0.10000000149011612`.
fn widen_f32(f: f32) -> f64 {
    f.to_string().parse().unwrap_or(f64::from(f))
}

impl Reflect for isize {
    fn shape(&self) -> Shape<'_> {
        Shape::Primitive(Primitive::Int(*self as i64))
    }
}

impl Reflect for usize {
    fn shape(&self) -> Shape<'_> {
        Shape::Primitive(Primitive::Uint(*self as u64))
    }
}

impl Reflect for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Primitive(Primitive::Str(self))
    }
}

impl Reflect for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Primitive(Primitive::Str(self.as_str()))
    }
}

impl Reflect for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Absent
    }
}

// ----------------------------------------------------------------------------
// References

impl<T: Reflect> Reflect for Option<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Reference(self.as_ref().map(|value| value as &dyn Reflect))
    }
}

// Smart pointers and borrows can never be unset, so they are invisible to the
// engine: every probe answers for the pointee.
macro_rules! forward_to_pointee {
    () => {
        fn shape(&self) -> Shape<'_> {
            (**self).shape()
        }

        fn as_to_json(&self) -> Option<&dyn ToJson> {
            (**self).as_to_json()
        }

        fn as_marshaler(&self) -> Option<&dyn erased_serde::Serialize> {
            (**self).as_marshaler()
        }

        fn as_error(&self) -> Option<&dyn Error> {
            (**self).as_error()
        }

        fn type_name(&self) -> &'static str {
            (**self).type_name()
        }
    };
}

impl<T: Reflect + ?Sized> Reflect for &T {
    forward_to_pointee!();
}

impl<T: Reflect + ?Sized> Reflect for &mut T {
    forward_to_pointee!();
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    forward_to_pointee!();
}

impl<T: Reflect + ?Sized> Reflect for Rc<T> {
    forward_to_pointee!();
}

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    forward_to_pointee!();
}

impl<B> Reflect for Cow<'_, B>
where
    B: Reflect + ToOwned + ?Sized,
{
    forward_to_pointee!();
}

// ----------------------------------------------------------------------------
// Sequences

// `len` is called through a path: with method syntax, `Sequence::len` itself
// would be picked for slice and array receivers.
macro_rules! impl_sequence {
    ($({$($generics:tt)*} $ty:ty => $len:expr),+ $(,)?) => {$(
        impl<$($generics)*> Reflect for $ty {
            fn shape(&self) -> Shape<'_> {
                Shape::Sequence(self)
            }
        }

        impl<$($generics)*> Sequence for $ty {
            fn len(&self) -> usize {
                $len(self)
            }

            fn items(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                Box::new(self.iter().map(|item| item as &dyn Reflect))
            }
        }
    )+};
}

impl_sequence! {
    {T: Reflect} Vec<T> => Vec::len,
    {T: Reflect, const N: usize} [T; N] => <[T]>::len,
    {T: Reflect} &[T] => <[T]>::len,
    {T: Reflect} Box<[T]> => <[T]>::len,
    {T: Reflect} VecDeque<T> => VecDeque::len,
    {T: Reflect} BTreeSet<T> => BTreeSet::len,
    {T: Reflect, S} HashSet<T, S> => HashSet::len,
}

// ----------------------------------------------------------------------------
// Mappings

impl AsMapKey for str {
    fn as_map_key(&self) -> MapKey<'_> {
        MapKey::Str(self)
    }
}

impl AsMapKey for String {
    fn as_map_key(&self) -> MapKey<'_> {
        MapKey::Str(self.as_str())
    }
}

impl AsMapKey for Box<str> {
    fn as_map_key(&self) -> MapKey<'_> {
        MapKey::Str(self)
    }
}

impl AsMapKey for Cow<'_, str> {
    fn as_map_key(&self) -> MapKey<'_> {
        MapKey::Str(self)
    }
}

impl<K: AsMapKey + ?Sized> AsMapKey for &K {
    fn as_map_key(&self) -> MapKey<'_> {
        (**self).as_map_key()
    }
}

macro_rules! impl_display_key {
    ($($ty:ty),+ $(,)?) => {$(
        impl AsMapKey for $ty {
            fn as_map_key(&self) -> MapKey<'_> {
                MapKey::Display(self)
            }
        }
    )+};
}

impl_display_key!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_mapping {
    ($({$($generics:tt)*} $ty:ty => $len:expr),+ $(,)?) => {$(
        impl<$($generics)*> Reflect for $ty {
            fn shape(&self) -> Shape<'_> {
                Shape::Mapping(self)
            }
        }

        impl<$($generics)*> Mapping for $ty {
            fn len(&self) -> usize {
                $len(self)
            }

            fn entries(&self) -> Box<dyn Iterator<Item = (MapKey<'_>, &dyn Reflect)> + '_> {
                Box::new(
                    self.iter()
                        .map(|(key, value)| (key.as_map_key(), value as &dyn Reflect)),
                )
            }
        }
    )+};
}

impl_mapping! {
    {K: AsMapKey, V: Reflect, S} HashMap<K, V, S> => HashMap::len,
    {K: AsMapKey, V: Reflect} BTreeMap<K, V> => BTreeMap::len,
    {} serde_json::Map<String, Value> => serde_json::Map::len,
}

// ----------------------------------------------------------------------------
// serde_json::Value

impl Reflect for Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            Value::Null => Shape::Absent,
            Value::Bool(b) => Shape::Primitive(Primitive::Bool(*b)),
            Value::Number(n) => Shape::Primitive(number_primitive(n)),
            Value::String(s) => Shape::Primitive(Primitive::Str(s)),
            Value::Array(items) => Shape::Sequence(items),
            Value::Object(map) => Shape::Mapping(map),
        }
    }
}

fn number_primitive(n: &serde_json::Number) -> Primitive<'static> {
    if let Some(i) = n.as_i64() {
        Primitive::Int(i)
    } else if let Some(u) = n.as_u64() {
        Primitive::Uint(u)
    } else {
        Primitive::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

// ----------------------------------------------------------------------------
// Errors

macro_rules! impl_error {
    ($($ty:ty),+ $(,)?) => {$(
        impl Reflect for $ty {
            fn shape(&self) -> Shape<'_> {
                Shape::Opaque
            }

            fn as_error(&self) -> Option<&dyn Error> {
                Some(self)
            }
        }
    )+};
}

impl_error!(
    dyn Error + '_,
    dyn Error + Send + '_,
    dyn Error + Send + Sync + '_,
    std::io::Error,
    std::fmt::Error,
    std::num::ParseIntError,
    std::num::ParseFloatError,
    std::str::ParseBoolError,
    std::str::Utf8Error,
    std::string::FromUtf8Error,
    serde_json::Error,
    ConversionError,
);

// ----------------------------------------------------------------------------
// Introspection handles

macro_rules! impl_introspection {
    ($($ty:ty),+ $(,)?) => {$(
        impl Reflect for $ty {
            fn shape(&self) -> Shape<'_> {
                Shape::Introspection
            }
        }
    )+};
}

impl_introspection!(TypeId, RecordInfo, FieldInfo, FieldPolicy);
