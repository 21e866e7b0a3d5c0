//! # tojson-core
//!
//! Type-directed conversion of arbitrary Rust values into JSON-ready trees.
//!
//! A value takes part by implementing [`Reflect`], usually through
//! `#[derive(Reflect)]`. The engine then decides, per value, whether the value
//! supplies its own surrogate ([`ToJson`]), renders itself (`serde::Serialize`),
//! is an error (converted to its message), or is walked structurally: records
//! by their field policy, mappings and sequences element-wise, optional values
//! through their pointee.
//!
//! ## Quick start
//!
//! ```rust
//! use serde_json::json;
//! use tojson_core::{convert, Reflect};
//!
//! #[derive(Reflect)]
//! struct User {
//!     pub name: String,
//!     #[json = "mail,omitempty"]
//!     pub email: Option<String>,
//!     #[json = "-"]
//!     pub session: String,
//!     password_hash: String,
//! }
//!
//! let user = User {
//!     name: "Alice".into(),
//!     email: None,
//!     session: "s3cr3t".into(),
//!     password_hash: "x".into(),
//! };
//! assert_eq!(convert(&user).unwrap(), json!({"name": "Alice"}));
//! # let _ = &user.password_hash;
//! ```
//!
//! ## Modules
//!
//! - [`engine`] — the recursive converter (`convert`, `Converter`)
//! - [`policy`] — field naming and omission from raw tags (`FieldPolicy`)
//! - [`reflect`] — introspection traits (`Reflect`, `Record`, `Sequence`, `Mapping`, `ToJson`)
//! - [`info`] — static record metadata (`RecordInfo`, `FieldInfo`)
//! - [`impls`] — `Reflect` for standard library and `serde_json` types
//! - [`config`] — process-wide settings (`ConvertConfig`)
//! - [`encode`] — pretty rendering and the `{"result": ...}` envelope
//! - [`error`] — `ConversionError`
//! - [`types`] — `ConvertedTree`, `Primitive`

extern crate self as tojson_core;

pub mod config;
pub mod encode;
pub mod engine;
pub mod error;
pub mod impls;
pub mod info;
pub mod policy;
pub mod reflect;
pub mod types;

pub use config::{ConvertConfig, MapKeyPolicy};
pub use engine::{convert, is_empty_value, Converter};
pub use error::ConversionError;
pub use policy::FieldPolicy;
pub use reflect::{AsMapKey, MapKey, Mapping, Record, Reflect, Sequence, Shape, ToJson};
pub use types::{ConvertedTree, Primitive};

#[cfg(feature = "derive")]
pub use tojson_derive::Reflect;

#[doc(hidden)]
pub use erased_serde;
