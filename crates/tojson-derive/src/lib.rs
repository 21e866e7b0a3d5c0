//! Derive macro for `tojson_core::Reflect`.
//!
//! Use it through the re-export in `tojson-core`; see [`Reflect`] for the
//! supported attributes.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";
static FIELD_ATTRIBUTE_NAME: &str = "json";

mod derive_data;
mod impls;

/// # `#[derive(Reflect)]`
///
/// Structs with named fields become records: each `pub` field is emitted
/// under a name resolved from its tag, other fields are never emitted.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct Account {
///     pub user_name: String,                // "user_name"
///     #[json = "id"]
///     pub account_id: u64,                  // "id"
///     #[json = "note,omitempty"]
///     pub note: String,                     // "note", skipped when empty
///     #[json = "-"]
///     pub cache_key: String,                // never emitted
///     secret: String,                       // private: never emitted
/// }
/// ```
///
/// The tag is stored raw and parsed at runtime, so options unknown to
/// tojson (e.g. `"name,string"`) are accepted and ignored.
///
/// Unit structs are records without fields (`{}`). Single-field tuple
/// structs are transparent: they convert as their inner value.
///
/// ## Hooks
///
/// Type-level flags opt into the capabilities the engine probes before
/// looking at structure, in this order:
///
/// - `#[reflect(to_json)]` — the type implements `tojson_core::ToJson`;
/// - `#[reflect(serialize)]` — the type implements `serde::Serialize` and
///   renders itself;
/// - `#[reflect(error)]` — the type implements `std::error::Error` and
///   converts to its message.
///
/// Enums and tuple structs with several fields have no structural form and
/// must carry at least one of these flags.
#[proc_macro_derive(Reflect, attributes(reflect, json))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ReflectInput::parse(&ast) {
        Ok(input) => impls::impl_reflect(&input).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
