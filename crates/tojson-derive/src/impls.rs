//! Token generation for `Reflect` and `Record`.

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{Body, HookFlags, RecordField, ReflectInput};

pub(crate) fn impl_reflect(input: &ReflectInput<'_>) -> TokenStream {
    let ident = &input.ast.ident;
    let (impl_generics, ty_generics, where_clause) = input.ast.generics.split_for_impl();

    // Every type the generated code hands out as `&dyn Reflect` must be Reflect.
    let bounded_types: Vec<&syn::Type> = match &input.body {
        Body::Record(fields) => fields.iter().filter(|f| f.exported).map(|f| f.ty).collect(),
        Body::Newtype(ty) => vec![*ty],
        Body::Opaque => Vec::new(),
    };
    let mut where_clause = where_clause.cloned().unwrap_or_else(|| syn::parse_quote!(where));
    for ty in bounded_types {
        where_clause
            .predicates
            .push(syn::parse_quote!(#ty: ::tojson_core::Reflect));
    }

    let shape_tokens = match &input.body {
        Body::Record(_) => quote! {
            ::tojson_core::Shape::Record(self)
        },
        Body::Newtype(_) => quote! {
            ::tojson_core::Reflect::shape(&self.0)
        },
        Body::Opaque => quote! {
            ::tojson_core::Shape::Opaque
        },
    };
    let hook_tokens = hook_methods(&input.hooks, matches!(input.body, Body::Newtype(_)));

    let record_tokens = match &input.body {
        Body::Record(fields) => impl_record(input, fields, &where_clause),
        _ => TokenStream::new(),
    };

    quote! {
        impl #impl_generics ::tojson_core::Reflect for #ident #ty_generics #where_clause {
            fn shape(&self) -> ::tojson_core::Shape<'_> {
                #shape_tokens
            }

            #hook_tokens
        }

        #record_tokens
    }
}

/// Probe overrides for the flagged capabilities. A newtype forwards the probes
/// it does not claim itself to its inner value.
fn hook_methods(hooks: &HookFlags, newtype: bool) -> TokenStream {
    let mut tokens = TokenStream::new();

    if hooks.to_json {
        tokens.extend(quote! {
            fn as_to_json(&self) -> ::core::option::Option<&dyn ::tojson_core::ToJson> {
                ::core::option::Option::Some(self)
            }
        });
    } else if newtype {
        tokens.extend(quote! {
            fn as_to_json(&self) -> ::core::option::Option<&dyn ::tojson_core::ToJson> {
                ::tojson_core::Reflect::as_to_json(&self.0)
            }
        });
    }

    if hooks.serialize {
        tokens.extend(quote! {
            fn as_marshaler(
                &self,
            ) -> ::core::option::Option<&dyn ::tojson_core::erased_serde::Serialize> {
                ::core::option::Option::Some(self)
            }
        });
    } else if newtype {
        tokens.extend(quote! {
            fn as_marshaler(
                &self,
            ) -> ::core::option::Option<&dyn ::tojson_core::erased_serde::Serialize> {
                ::tojson_core::Reflect::as_marshaler(&self.0)
            }
        });
    }

    if hooks.error {
        tokens.extend(quote! {
            fn as_error(&self) -> ::core::option::Option<&dyn ::std::error::Error> {
                ::core::option::Option::Some(self)
            }
        });
    } else if newtype {
        tokens.extend(quote! {
            fn as_error(&self) -> ::core::option::Option<&dyn ::std::error::Error> {
                ::tojson_core::Reflect::as_error(&self.0)
            }
        });
    }

    tokens
}

fn impl_record(
    input: &ReflectInput<'_>,
    fields: &[RecordField<'_>],
    where_clause: &syn::WhereClause,
) -> TokenStream {
    let ident = &input.ast.ident;
    let type_name = ident.to_string();
    let (impl_generics, ty_generics, _) = input.ast.generics.split_for_impl();

    let field_infos = fields.iter().map(|field| {
        let name = &field.name;
        let tag = &field.tag;
        let exported = field.exported;
        quote! {
            ::tojson_core::info::FieldInfo::new(#name, #tag, #exported)
        }
    });

    // Private fields are never read by the engine, so they get no accessor.
    let accessors = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.exported)
        .map(|(index, field)| {
            let member = field.member;
            quote! {
                #index => ::core::option::Option::Some(&self.#member),
            }
        });

    quote! {
        impl #impl_generics ::tojson_core::Record for #ident #ty_generics #where_clause {
            fn record_info(&self) -> &'static ::tojson_core::info::RecordInfo {
                static INFO: ::tojson_core::info::RecordInfo = ::tojson_core::info::RecordInfo::new(
                    #type_name,
                    &[#(#field_infos),*],
                );
                &INFO
            }

            #[allow(clippy::match_single_binding)]
            fn field(
                &self,
                index: usize,
            ) -> ::core::option::Option<&dyn ::tojson_core::Reflect> {
                match index {
                    #(#accessors)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
