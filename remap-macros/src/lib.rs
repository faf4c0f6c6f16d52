//! `#[derive(Remap)]`, re-exported by the `remap` crate.
//!
//! Supported attributes:
//!
//! - `#[remap(rename_all = "camelCase")]` on the struct
//! - `#[remap(rename = "employee_id,omitempty")]` on a field; only the part
//!   before the first comma is used as the lookup key
//! - `#[remap(skip)]` on a field, which then always keeps its default

mod derive;
mod rename_rule;

#[proc_macro_derive(Remap, attributes(remap))]
pub fn derive_remap(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    derive::derive_remap(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
