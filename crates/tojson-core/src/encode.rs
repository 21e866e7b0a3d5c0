//! Text encoding of converted trees.
//!
//! The engine produces `serde_json::Value`s; these helpers give them the
//! rendering used by the HTTP layer and the CLI: two-space indentation, a
//! trailing newline, and an optional `{"result": ...}` envelope.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ConversionError;
use crate::reflect::Reflect;
use crate::types::ConvertedTree;
use crate::Converter;

/// Key of the single-entry envelope object.
pub const ENVELOPE_KEY: &str = "result";

/// Wrap a converted tree as `{"result": tree}`.
pub fn envelope(tree: ConvertedTree) -> Value {
    let mut object = Map::with_capacity(1);
    object.insert(ENVELOPE_KEY.to_owned(), tree);
    Value::Object(object)
}

/// Render `value` as indented JSON followed by a newline.
///
/// ```
/// use serde_json::json;
/// use tojson_core::encode::to_pretty_string;
///
/// let text = to_pretty_string(&json!({"a": [1]})).unwrap();
/// assert_eq!(text, "{\n  \"a\": [\n    1\n  ]\n}\n");
/// ```
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

/// Errors from the convert-then-encode pipeline.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Convert(#[from] ConversionError),

    #[error("JSON encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Convert `value` with `converter`, optionally wrap it in the envelope, and
/// render it with [`to_pretty_string`].
pub fn render(
    converter: &Converter,
    value: &dyn Reflect,
    wrapped: bool,
) -> Result<String, RenderError> {
    let tree = converter.convert(value)?;
    let body = if wrapped { envelope(tree) } else { tree };
    Ok(to_pretty_string(&body)?)
}
