//! The recursive conversion engine.
//!
//! For every value the engine runs, in order:
//!
//! 1. **Guards**: introspection handles are rejected, absent values become `null`.
//! 2. **Hooks** (first match wins): [`ToJson`](crate::ToJson) surrogate,
//!    native `Serialize` marshaler, `Error` message.
//! 3. **Structural dispatch** on the value's [`Shape`]: records, mappings,
//!    sequences and nilable references are rebuilt recursively; primitives are
//!    passed through.
//!
//! The first error anywhere in the tree aborts the whole conversion and is
//! returned unchanged.

use serde_json::{Map, Value};

use crate::config::{self, ConvertConfig, MapKeyPolicy};
use crate::error::{ConversionError, Result};
use crate::reflect::{MapKey, Mapping, Record, Reflect, Sequence, Shape};
use crate::types::ConvertedTree;

/// Convert `value` using the process-wide settings.
///
/// ```
/// use tojson_core::{convert, Reflect};
///
/// #[derive(Reflect)]
/// struct Account {
///     #[allow(non_snake_case)]
///     pub UserID: u64,
///     #[json = "nick,omitempty"]
///     pub nickname: String,
///     password: String,
/// }
///
/// let account = Account { UserID: 7, nickname: String::new(), password: "hunter2".into() };
/// let tree = convert(&account).unwrap();
/// assert_eq!(tree, serde_json::json!({ "user_id": 7 }));
/// # let _ = &account.password;
/// ```
pub fn convert(value: &dyn Reflect) -> Result<ConvertedTree> {
    Converter::global().convert(value)
}

/// Whether `value` is the zero value of its kind, as used by `omitempty`.
///
/// Only the value's own shape is consulted; hooks are not run.
pub fn is_empty_value(value: &dyn Reflect) -> bool {
    match value.shape() {
        Shape::Absent | Shape::Reference(None) => true,
        Shape::Primitive(primitive) => primitive.is_zero(),
        Shape::Sequence(sequence) => sequence.is_empty(),
        Shape::Mapping(mapping) => mapping.is_empty(),
        Shape::Reference(Some(_)) | Shape::Record(_) | Shape::Opaque | Shape::Introspection => {
            false
        }
    }
}

/// A conversion engine bound to one set of settings.
///
/// Holds no mutable state; share it freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// A converter using the settings installed with [`config::init`].
    pub fn global() -> Self {
        Self::new(config::global())
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Convert `value` into a JSON-ready tree.
    pub fn convert(&self, value: &dyn Reflect) -> Result<ConvertedTree> {
        let shape = value.shape();

        // Hooks only apply to real values; the guards below take precedence.
        if !matches!(shape, Shape::Introspection | Shape::Absent) {
            if let Some(hook) = value.as_to_json() {
                self.note(value, "to_json");
                let surrogate = hook.to_json();
                return self.convert(&*surrogate);
            }

            if let Some(marshaler) = value.as_marshaler() {
                self.note(value, "marshaler");
                return serde_json::to_value(marshaler).map_err(|source| {
                    ConversionError::Marshal {
                        type_name: value.type_name(),
                        source,
                    }
                });
            }

            if let Some(error) = value.as_error() {
                self.note(value, "error");
                return Ok(Value::String(error.to_string()));
            }
        }

        self.note(value, shape.kind_name());
        match shape {
            Shape::Introspection => Err(ConversionError::InvalidIntrospectionArgument {
                type_name: value.type_name(),
            }),
            Shape::Absent | Shape::Reference(None) => Ok(Value::Null),
            Shape::Reference(Some(pointee)) => self.convert(pointee),
            Shape::Primitive(primitive) => Ok(primitive.to_value()),
            Shape::Record(record) => self.convert_record(record),
            Shape::Mapping(mapping) => self.convert_mapping(value, mapping),
            Shape::Sequence(sequence) => self.convert_sequence(sequence),
            Shape::Opaque => Err(ConversionError::UnsupportedKind {
                type_name: value.type_name(),
                reason: "opaque value without a to_json hook, Serialize impl or Error impl",
            }),
        }
    }

    fn convert_record(&self, record: &dyn Record) -> Result<Value> {
        let info = record.record_info();
        let mut object = Map::with_capacity(info.field_count());

        for (index, (field, policy)) in info.fields().iter().zip(info.policies()).enumerate() {
            if !field.is_exported() || policy.omit_always {
                continue;
            }
            let Some(value) = record.field(index) else {
                continue;
            };
            if policy.omit_if_empty && is_empty_value(value) {
                continue;
            }
            object.insert(policy.name.clone(), self.convert(value)?);
        }

        Ok(Value::Object(object))
    }

    fn convert_mapping(&self, owner: &dyn Reflect, mapping: &dyn Mapping) -> Result<Value> {
        let mut object = Map::with_capacity(mapping.len());

        for (key, item) in mapping.entries() {
            let key = match key {
                MapKey::Str(key) => key.to_owned(),
                MapKey::Display(key) => match self.config.map_keys {
                    MapKeyPolicy::Stringify => key.to_string(),
                    MapKeyPolicy::Strict => {
                        return Err(ConversionError::UnsupportedKind {
                            type_name: owner.type_name(),
                            reason: "mapping key is not a string",
                        })
                    }
                },
            };
            // Keys that collide after stringification: last write wins.
            object.insert(key, self.convert(item)?);
        }

        Ok(Value::Object(object))
    }

    fn convert_sequence(&self, sequence: &dyn Sequence) -> Result<Value> {
        sequence
            .items()
            .map(|item| self.convert(item))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    fn note(&self, value: &dyn Reflect, strategy: &'static str) {
        if self.config.trace {
            tracing::debug!(
                target: "tojson::convert",
                type_name = value.type_name(),
                strategy,
                "processing value"
            );
        }
    }
}
