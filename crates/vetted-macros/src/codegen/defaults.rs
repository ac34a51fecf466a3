//! Headerless declarations for parameters with defaults.
//!
//! Rust has no default arguments, so a function declaring defaults gets a
//! `macro_rules!` companion of the same name accepting every arity from the
//! number of required parameters up to the full parameter count. Supplied
//! arguments fill the required parameters first, then the defaulted ones left
//! to right; the rest take their defaults.
//!
//! The companion is textually scoped: it is usable after the `defn!` block in
//! the same module and its children.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;

use crate::descriptor::ParamDescriptor;

pub(crate) fn generate_defaults_macro(name: &Ident, params: &[ParamDescriptor]) -> TokenStream {
    let defaulted: Vec<usize> = (0..params.len())
        .filter(|&i| params[i].default.is_some())
        .collect();
    if defaulted.is_empty() {
        return TokenStream::new();
    }
    let required: Vec<usize> = (0..params.len())
        .filter(|&i| params[i].default.is_none())
        .collect();

    let arms = (required.len()..=params.len()).map(|supplied| {
        let vars: Vec<Ident> = (0..supplied).map(|i| format_ident!("a{}", i)).collect();
        let fill_order = required.iter().chain(&defaulted).take(supplied);
        let mut args: Vec<TokenStream> = params
            .iter()
            .map(|param| {
                let default = &param.default;
                quote!(#default)
            })
            .collect();
        for (position, var) in fill_order.zip(&vars) {
            args[*position] = quote!($#var);
        }
        let matcher = if vars.is_empty() {
            TokenStream::new()
        } else {
            quote!(#($#vars:expr),* $(,)?)
        };
        quote! {
            (#matcher) => { #name(#(#args),*) };
        }
    });

    quote! {
        #[allow(unused_macros)]
        macro_rules! #name {
            #(#arms)*
        }
    }
}
