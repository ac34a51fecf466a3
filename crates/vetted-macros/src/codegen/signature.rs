//! Signature registration for generated functions.
//!
//! Emits a `vetted::Signature` static into the `vetted::SIGNATURES`
//! distributed slice.

use std::collections::BTreeMap;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{GenericParam, Generics, ReturnType, WherePredicate};

use crate::descriptor::ParamDescriptor;
use crate::parsing::FnDef;
use crate::shared::render;

/// Generate the signature registration for one function.
pub(crate) fn generate_registration(
    def: &FnDef,
    params: &[ParamDescriptor],
    clauses: usize,
) -> TokenStream {
    let name = def.name.to_string().trim_start_matches("r#").to_owned();
    let static_name = format_ident!("__VETTED_SIG_{}", name);

    let params = params.iter().map(|param| {
        let binding = render(&param.pat);
        let ty = &param.label;
        let default = match &param.default {
            Some(expr) => {
                let text = render(expr);
                quote!(::core::option::Option::Some(#text))
            }
            None => quote!(::core::option::Option::None),
        };
        let (guard, validate) = (param.guard, param.validate);
        quote! {
            ::vetted::Param {
                binding: #binding,
                ty: #ty,
                default: #default,
                guard: #guard,
                validate: #validate,
            }
        }
    });
    let returns = match &def.output {
        ReturnType::Type(_, ty) => render(ty),
        ReturnType::Default => "()".to_owned(),
    };
    let constraints = constraints(&def.generics)
        .into_iter()
        .map(|(var, bound)| quote!((#var, #bound)));

    quote! {
        #[allow(non_upper_case_globals)]
        #[::vetted::linkme::distributed_slice(::vetted::SIGNATURES)]
        #[linkme(crate = ::vetted::linkme)]
        static #static_name: ::vetted::Signature = ::vetted::Signature {
            module: ::core::module_path!(),
            name: #name,
            params: &[#(#params),*],
            returns: #returns,
            constraints: &[#(#constraints),*],
            clauses: #clauses,
        };
    }
}

/// Type-variable bounds from the generic list and the where clause, sorted
/// by variable.
fn constraints(generics: &Generics) -> Vec<(String, String)> {
    let mut bounds: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for param in &generics.params {
        if let GenericParam::Type(type_param) = param {
            let entry = bounds.entry(type_param.ident.to_string()).or_default();
            entry.extend(type_param.bounds.iter().map(|bound| render(bound)));
        }
    }
    for predicate in generics.where_clause.iter().flat_map(|w| &w.predicates) {
        if let WherePredicate::Type(predicate) = predicate {
            let entry = bounds.entry(render(&predicate.bounded_ty)).or_default();
            entry.extend(predicate.bounds.iter().map(|bound| render(bound)));
        }
    }
    bounds
        .into_iter()
        .filter(|(_, bounds)| !bounds.is_empty())
        .map(|(var, bounds)| (var, bounds.join(" + ")))
        .collect()
}
