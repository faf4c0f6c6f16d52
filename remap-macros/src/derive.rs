//! `#[derive(Remap)]` for structs with named fields.
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, LitStr};

use crate::rename_rule::RenameRule;

const UNSUPPORTED: &str = "`Remap` can only be derived for non-generic structs with named fields. \
    Consider implementing the trait by hand.";

/// Container attributes.
#[derive(Default)]
struct ContainerAttrs {
    rename_all: Option<RenameRule>,
}

/// Field attributes.
#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut parsed = ContainerAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("remap") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let rule: LitStr = meta.value()?.parse()?;
                let Some(rule_value) = RenameRule::parse(&rule.value()) else {
                    return Err(syn::Error::new_spanned(
                        &rule,
                        format!("unknown `rename_all` rule, expected one of {}", RenameRule::ACCEPTED),
                    ));
                };
                parsed.rename_all = Some(rule_value);
                Ok(())
            } else {
                Err(meta.error("unsupported `remap` container attribute, expected `rename_all = \"...\"`"))
            }
        })?;
    }
    Ok(parsed)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("remap") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let tag: LitStr = meta.value()?.parse()?;
                if tag.value().split(',').next().is_none_or(str::is_empty) {
                    return Err(syn::Error::new_spanned(&tag, "`rename` needs a non-empty key"));
                }
                parsed.rename = Some(tag.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                parsed.skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported `remap` field attribute, expected `rename = \"...\"` or `skip`"))
            }
        })?;
    }
    Ok(parsed)
}

pub(crate) fn derive_remap(input: DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(&input.generics, UNSUPPORTED));
    }
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(name, UNSUPPORTED));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(&data.fields, UNSUPPORTED));
    };

    let container = parse_container_attrs(&input.attrs)?;
    let type_identifier = name.to_string();

    let mut accessors = Vec::new();
    let mut field_defs = Vec::new();

    for field in &named.named {
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, UNSUPPORTED));
        };
        let ty = &field.ty;
        let field_name = ident.to_string();
        let field_name = field_name.strip_prefix("r#").unwrap_or(&field_name).to_string();

        let rename = match (attrs.rename, container.rename_all) {
            (Some(tag), _) => quote! { ::core::option::Option::Some(#tag) },
            (None, Some(rule)) => {
                let renamed = rule.apply(&field_name);
                quote! { ::core::option::Option::Some(#renamed) }
            }
            (None, None) => quote! { ::core::option::Option::None },
        };

        let get_fn = format_ident!("__remap_get_{}", field_name);
        let get_mut_fn = format_ident!("__remap_get_mut_{}", field_name);

        accessors.push(quote! {
            fn #get_fn(this: &dyn ::core::any::Any) -> ::core::option::Option<&dyn ::core::any::Any> {
                ::core::option::Option::Some(&this.downcast_ref::<#name>()?.#ident as &dyn ::core::any::Any)
            }

            fn #get_mut_fn(
                this: &mut dyn ::core::any::Any,
            ) -> ::core::option::Option<&mut dyn ::core::any::Any> {
                ::core::option::Option::Some(
                    &mut this.downcast_mut::<#name>()?.#ident as &mut dyn ::core::any::Any,
                )
            }
        });

        field_defs.push(quote! {
            ::remap::Field {
                name: #field_name,
                rename: #rename,
                shape: ::remap::shape_of::<#ty>,
                get: #get_fn,
                get_mut: #get_mut_fn,
            }
        });
    }

    Ok(quote! {
        #[allow(non_snake_case)]
        const _: () = {
            #(#accessors)*

            #[automatically_derived]
            impl ::remap::Remap for #name {
                const SHAPE: &'static ::remap::Shape = &::remap::Shape {
                    id: ::core::any::TypeId::of::<#name>,
                    type_identifier: #type_identifier,
                    def: ::remap::Def::Struct(::remap::StructDef {
                        fields: &[#(#field_defs),*],
                    }),
                };
            }
        };
    })
}
