//! # tojson-http
//!
//! axum response helpers on top of `tojson-core`.
//!
//! Each helper converts a value, renders it with two-space indentation and a
//! trailing newline, and builds a response with `Content-Type:
//! application/json`, an explicit `Content-Length` and the requested status.
//! The `write_to_json*` family wraps the converted value as
//! `{"result": ...}`; the `*_not_wrapped*` family emits it at the top level.
//!
//! If conversion or encoding fails, no response is built: the error is logged
//! through `tracing` and returned so the handler can choose what to send.
//!
//! ```rust, ignore
//! async fn show_user(State(db): State<Db>) -> Response {
//!     let user = db.load_user().await;
//!     tojson_http::write_to_json(&user).unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
//! }
//! ```

use axum::body::Body;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{Response, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tojson_core::encode::{self, RenderError};
use tojson_core::{ConversionError, Converter, Reflect};

/// Media type of every response built here.
pub const APPLICATION_JSON: &str = "application/json";

/// Errors that prevent a JSON response from being built.
#[derive(Error, Debug)]
pub enum HttpJsonError {
    #[error(transparent)]
    Convert(#[from] ConversionError),

    #[error("JSON encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("HTTP response error: {0}")]
    Http(#[from] axum::http::Error),
}

impl From<RenderError> for HttpJsonError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Convert(err) => HttpJsonError::Convert(err),
            RenderError::Encode(err) => HttpJsonError::Encode(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, HttpJsonError>;

/// Builds JSON responses with a fixed [`Converter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter {
    converter: Converter,
}

impl JsonWriter {
    pub fn new(converter: Converter) -> Self {
        Self { converter }
    }

    /// A writer using the process-wide conversion settings.
    pub fn global() -> Self {
        Self::new(Converter::global())
    }

    /// Convert `value`, wrap it as `{"result": ...}` and respond with `code`.
    pub fn write(&self, value: &dyn Reflect, code: StatusCode) -> Result<Response<Body>> {
        self.render(value, true, code)
    }

    /// Convert `value` and respond with it at the top level.
    pub fn write_not_wrapped(
        &self,
        value: &dyn Reflect,
        code: StatusCode,
    ) -> Result<Response<Body>> {
        self.render(value, false, code)
    }

    fn render(
        &self,
        value: &dyn Reflect,
        wrapped: bool,
        code: StatusCode,
    ) -> Result<Response<Body>> {
        let text = encode::render(&self.converter, value, wrapped)
            .map_err(|err| log_failure(err.into()))?;
        respond(text, code)
    }
}

/// Convert `value` and respond `200 OK` with `{"result": ...}`.
pub fn write_to_json(value: &dyn Reflect) -> Result<Response<Body>> {
    write_to_json_with_code(value, StatusCode::OK)
}

/// Convert `value` and respond with `code` and `{"result": ...}`.
pub fn write_to_json_with_code(value: &dyn Reflect, code: StatusCode) -> Result<Response<Body>> {
    JsonWriter::global().write(value, code)
}

/// Convert `value` and respond `200 OK` with it at the top level.
pub fn write_to_json_not_wrapped(value: &dyn Reflect) -> Result<Response<Body>> {
    write_to_json_not_wrapped_with_code(value, StatusCode::OK)
}

/// Convert `value` and respond with `code` and the value at the top level.
pub fn write_to_json_not_wrapped_with_code(
    value: &dyn Reflect,
    code: StatusCode,
) -> Result<Response<Body>> {
    JsonWriter::global().write_not_wrapped(value, code)
}

/// Respond with `body` rendered by its own `Serialize` impl, bypassing
/// conversion.
pub fn write_json<T: Serialize + ?Sized>(body: &T, code: StatusCode) -> Result<Response<Body>> {
    let text = encode::to_pretty_string(body).map_err(|err| log_failure(err.into()))?;
    respond(text, code)
}

fn respond(text: String, code: StatusCode) -> Result<Response<Body>> {
    Response::builder()
        .status(code)
        .header(CONTENT_TYPE, APPLICATION_JSON)
        .header(CONTENT_LENGTH, text.len())
        .body(Body::from(text))
        .map_err(|err| log_failure(err.into()))
}

fn log_failure(err: HttpJsonError) -> HttpJsonError {
    tracing::error!(error = %err, "failed to build JSON response");
    err
}
