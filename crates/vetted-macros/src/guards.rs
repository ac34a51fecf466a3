//! Guard synthesis for refinement aliases.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

use crate::shared::last_segment;

/// Boolean test for `subject` of type `ty`, or `None` when the type has no
/// guard.
pub(crate) fn synthesize(ty: &Type, subject: &TokenStream) -> Option<TokenStream> {
    match ty {
        Type::Paren(paren) => synthesize(&paren.elem, subject),
        Type::Group(group) => synthesize(&group.elem, subject),
        Type::Tuple(tuple) => {
            let tests: Vec<TokenStream> = tuple
                .elems
                .iter()
                .enumerate()
                .filter_map(|(i, elem)| {
                    let index = syn::Index::from(i);
                    synthesize(elem, &quote!(#subject.#index))
                })
                .collect();
            conjunction(tests)
        }
        _ => {
            let name = last_segment(ty)?.ident.to_string();
            match name.as_str() {
                "PosInteger" => Some(quote!(#subject > 0)),
                "NonNegInteger" => Some(quote!(#subject >= 0)),
                "NegInteger" => Some(quote!(#subject < 0)),
                "Byte" | "Arity" => Some(quote!((0..=255).contains(&#subject))),
                "Char" => Some(quote!((0..=0x10FFFF).contains(&#subject))),
                "Finite" => Some(quote!(#subject.is_finite())),
                "NonEmptyString" | "NonEmptyList" => Some(quote!(!#subject.is_empty())),
                _ => None,
            }
        }
    }
}

/// Join tests with `&&`, left to right.
pub(crate) fn conjunction(tests: Vec<TokenStream>) -> Option<TokenStream> {
    tests
        .into_iter()
        .reduce(|combined, test| quote!(#combined && #test))
}
