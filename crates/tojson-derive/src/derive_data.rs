//! Parsed form of a `#[derive(Reflect)]` input.

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Expr, ExprLit, Fields, Lit, Meta, Type, Visibility};

use crate::{FIELD_ATTRIBUTE_NAME, REFLECT_ATTRIBUTE_NAME};

/// Capability flags from `#[reflect(...)]` on the type.
#[derive(Default)]
pub(crate) struct HookFlags {
    pub to_json: bool,
    pub serialize: bool,
    pub error: bool,
}

impl HookFlags {
    pub fn any(&self) -> bool {
        self.to_json || self.serialize || self.error
    }
}

/// One named field of a record.
pub(crate) struct RecordField<'a> {
    pub member: &'a syn::Ident,
    /// Declared name with any `r#` prefix removed.
    pub name: String,
    /// Raw `#[json = "..."]` tag, empty when absent.
    pub tag: String,
    pub exported: bool,
    pub ty: &'a Type,
}

pub(crate) enum Body<'a> {
    /// Struct with named fields, or a unit struct (no fields).
    Record(Vec<RecordField<'a>>),
    /// Single-field tuple struct, converted as its inner value.
    Newtype(&'a Type),
    /// Anything else; only convertible through a hook.
    Opaque,
}

pub(crate) struct ReflectInput<'a> {
    pub ast: &'a DeriveInput,
    pub hooks: HookFlags,
    pub body: Body<'a>,
}

impl<'a> ReflectInput<'a> {
    pub fn parse(ast: &'a DeriveInput) -> syn::Result<Self> {
        let hooks = parse_hook_flags(ast)?;

        let body = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => Body::Record(
                    named
                        .named
                        .iter()
                        .map(parse_record_field)
                        .collect::<syn::Result<_>>()?,
                ),
                Fields::Unit => Body::Record(Vec::new()),
                Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => {
                    Body::Newtype(&unnamed.unnamed[0].ty)
                }
                Fields::Unnamed(_) => Body::Opaque,
            },
            Data::Enum(_) => Body::Opaque,
            Data::Union(_) => {
                return Err(syn::Error::new_spanned(
                    &ast.ident,
                    "`#[derive(Reflect)]` does not support unions",
                ))
            }
        };

        if matches!(body, Body::Opaque) && !hooks.any() {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "enums and multi-field tuple structs need `#[reflect(to_json)]`, \
                 `#[reflect(serialize)]` or `#[reflect(error)]`",
            ));
        }

        Ok(Self { ast, hooks, body })
    }
}

fn parse_hook_flags(ast: &DeriveInput) -> syn::Result<HookFlags> {
    let mut flags = HookFlags::default();

    for attr in &ast.attrs {
        if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("to_json") {
                flags.to_json = true;
            } else if meta.path.is_ident("serialize") {
                flags.serialize = true;
            } else if meta.path.is_ident("error") {
                flags.error = true;
            } else {
                return Err(meta.error(
                    "unknown reflect flag, expected `to_json`, `serialize` or `error`",
                ));
            }
            Ok(())
        })?;
    }

    Ok(flags)
}

fn parse_record_field(field: &syn::Field) -> syn::Result<RecordField<'_>> {
    // Named fields always carry an ident.
    let Some(member) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };

    Ok(RecordField {
        member,
        name: member.unraw().to_string(),
        tag: parse_tag(field)?,
        exported: matches!(field.vis, Visibility::Public(_)),
        ty: &field.ty,
    })
}

/// Read `#[json = "..."]`. The string is kept raw; policy parsing happens at
/// runtime in tojson-core.
fn parse_tag(field: &syn::Field) -> syn::Result<String> {
    let mut tag: Option<String> = None;

    for attr in &field.attrs {
        if !attr.path().is_ident(FIELD_ATTRIBUTE_NAME) {
            continue;
        }
        let value = match &attr.meta {
            Meta::NameValue(name_value) => match &name_value.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => s.value(),
                other => {
                    return Err(syn::Error::new_spanned(other, "expected a string literal"))
                }
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected `#[json = \"name,options\"]`",
                ))
            }
        };
        if tag.replace(value).is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate `json` attribute"));
        }
    }

    Ok(tag.unwrap_or_default())
}
