//! Error types for value conversion.

use thiserror::Error;

/// Errors that can occur while converting a value into a JSON-ready tree.
///
/// Errors raised deep inside a record, sequence or mapping are returned
/// verbatim to the top-level caller; the engine adds no context on the way up.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The caller passed type metadata (a `TypeId`, `RecordInfo`, ...) instead
    /// of a domain value.
    #[error("got passed an introspection handle ({type_name}) instead of a value")]
    InvalidIntrospectionArgument { type_name: &'static str },

    /// A value whose kind the engine declines to convert.
    #[error("unsupported kind for {type_name}: {reason}")]
    UnsupportedKind {
        type_name: &'static str,
        reason: &'static str,
    },

    /// A value's own `Serialize` implementation failed while being rendered.
    #[error("native marshaler for {type_name} failed: {source}")]
    Marshal {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout tojson-core.
pub type Result<T> = std::result::Result<T, ConversionError>;
