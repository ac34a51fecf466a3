//! Function assembly.
//!
//! Each [`FnDef`] expands to the function itself, its signature registration
//! and, when it declares defaults, a companion `macro_rules!` of the same
//! name.
//!
//! Three shapes are emitted:
//!
//! - **direct**: every parameter is a plain variable and no guard applies;
//!   parameters are written as ordinary Rust parameters.
//! - **guarded**: parameters become positional arguments `__arg0..` and the
//!   body is a single-arm `match` over the argument tuple carrying the
//!   patterns and the combined guard.
//! - **clauses**: the body's arms are matched against the parameter (or the
//!   tuple of parameters) in order.
//!
//! Guarded and clause shapes end in a panicking fallback arm.

use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::{Arm, Ident, ReturnType, Stmt};

use crate::codegen::{defaults, signature};
use crate::descriptor::{ParamDescriptor, describe, scrutinee};
use crate::guards;
use crate::parsing::{Body, Definitions, FnDef};
use crate::shared::{Settings, last_segment};

pub(crate) fn expand_definitions(defs: &Definitions, settings: Settings) -> syn::Result<TokenStream> {
    defs.functions
        .iter()
        .map(|def| expand_function(def, settings))
        .collect()
}

pub(crate) fn expand_function(def: &FnDef, settings: Settings) -> syn::Result<TokenStream> {
    let params = def
        .params
        .iter()
        .map(|raw| describe(raw, settings))
        .collect::<syn::Result<Vec<_>>>()?;

    for param in &params {
        if param.guard {
            param.require_var("carry a guard")?;
        }
        if param.validate {
            param.require_var("be validated")?;
        }
        if param.default.is_some() {
            param.require_var("take a default")?;
        }
    }
    if params.iter().any(|p| p.validate) && !returns_result(&def.output) {
        return Err(syn::Error::new_spanned(
            return_span(def),
            "argument validation requires a `Result` return type",
        ));
    }

    let (function, clauses) = match &def.body {
        Body::Block(stmts) => (single_clause(def, &params, stmts), 1),
        Body::Clauses(arms) => (multi_clause(def, &params, arms)?, arms.len()),
    };
    let registration = signature::generate_registration(def, &params, clauses);
    let headerless = match &def.body {
        Body::Block(_) => defaults::generate_defaults_macro(&def.name, &params),
        Body::Clauses(_) => TokenStream::new(),
    };

    Ok(quote! {
        #function
        #registration
        #headerless
    })
}

/// Whether the return type can carry a validation failure.
fn returns_result(output: &ReturnType) -> bool {
    match output {
        ReturnType::Type(_, ty) => last_segment(ty).is_some_and(|segment| {
            let name = segment.ident.to_string();
            name.ends_with("Result") || name == "Outcome"
        }),
        ReturnType::Default => false,
    }
}

fn return_span(def: &FnDef) -> TokenStream {
    match &def.output {
        ReturnType::Type(_, ty) => ty.to_token_stream(),
        ReturnType::Default => def.name.to_token_stream(),
    }
}

fn single_clause(def: &FnDef, params: &[ParamDescriptor], stmts: &[Stmt]) -> TokenStream {
    let prologue = params
        .iter()
        .filter(|p| p.validate)
        .filter_map(|p| p.var().map(|var| validation_prologue(var, &p.ty)));
    let body = quote! {
        #(#prologue)*
        #(#stmts)*
    };

    let guard = guards::conjunction(
        params
            .iter()
            .filter(|p| p.guard)
            .filter_map(|p| {
                let var = p.var()?;
                guards::synthesize(&p.ty, &quote!(#var))
            })
            .collect(),
    );

    if guard.is_none() && params.iter().all(ParamDescriptor::is_plain_var) {
        let inputs = params.iter().map(|p| {
            let (pat, ty) = (&p.pat, &p.ty);
            quote!(#pat: #ty)
        });
        return emit(def, quote!(#(#inputs),*), quote!({ #body }), false);
    }

    let args: Vec<Ident> = (0..params.len()).map(|i| format_ident!("__arg{}", i)).collect();
    let inputs = params.iter().zip(&args).map(|(p, arg)| {
        let ty = &p.ty;
        quote!(#arg: #ty)
    });
    let scrutinees = params.iter().zip(&args).map(|(p, arg)| scrutinee(p, arg));
    let pats = params.iter().map(|p| &p.pat);
    let guard = guard.map(|guard| quote!(if #guard));
    let fallback = no_clause_matches(&def.name);

    let block = quote!({
        match (#(#scrutinees,)*) {
            (#(#pats,)*) #guard => { #body }
            #fallback
        }
    });
    emit(def, quote!(#(#inputs),*), block, true)
}

fn multi_clause(def: &FnDef, params: &[ParamDescriptor], arms: &[Arm]) -> syn::Result<TokenStream> {
    for param in params {
        if param.guard {
            return Err(syn::Error::new_spanned(
                &param.pat,
                "guard generation cannot be used with clause syntax",
            ));
        }
        if param.validate {
            return Err(syn::Error::new_spanned(
                &param.pat,
                "argument validation cannot be used with clause syntax",
            ));
        }
        if param.default.is_some() {
            return Err(syn::Error::new_spanned(
                &param.pat,
                "default values cannot be used with clause syntax",
            ));
        }
    }

    let vars = params
        .iter()
        .map(|p| {
            if p.is_plain_var() {
                p.require_var("head a clause")
            } else {
                Err(syn::Error::new_spanned(
                    &p.pat,
                    "parameter is not a var: clause syntax matches patterns in its arms",
                ))
            }
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let inputs = params.iter().zip(&vars).map(|(p, var)| {
        let ty = &p.ty;
        quote!(#var: #ty)
    });
    let subject = match vars.as_slice() {
        [single] => quote!(#single),
        many => quote!((#(#many),*)),
    };
    let arms = arms.iter().map(|arm| Arm {
        comma: Some(Default::default()),
        ..arm.clone()
    });
    let fallback = no_clause_matches(&def.name);

    let block = quote!({
        match #subject {
            #(#arms)*
            #fallback
        }
    });
    Ok(emit(def, quote!(#(#inputs),*), block, true))
}

/// Rebind `var` to its validated value, returning the failure otherwise.
fn validation_prologue(var: &Ident, ty: &syn::Type) -> TokenStream {
    quote! {
        let #var = match ::vetted::validate_arg::<#ty>(#var) {
            ::core::result::Result::Ok(validated) => validated,
            ::core::result::Result::Err(failure) => {
                return ::core::result::Result::Err(::core::convert::From::from(failure));
            }
        };
    }
}

fn no_clause_matches(name: &Ident) -> TokenStream {
    let message = format!("no clause of `{name}` matches the given arguments");
    quote! {
        _ => ::core::panic!(#message),
    }
}

fn emit(def: &FnDef, inputs: TokenStream, block: TokenStream, dispatches: bool) -> TokenStream {
    let FnDef {
        attrs,
        vis,
        name,
        generics,
        output,
        ..
    } = def;
    let where_clause = &generics.where_clause;
    let allow = dispatches.then(|| quote!(#[allow(unreachable_patterns, unused_variables)]));
    quote! {
        #(#attrs)*
        #allow
        #vis fn #name #generics (#inputs) #output #where_clause #block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand(def: FnDef) -> syn::Result<String> {
        expand_function(&def, Settings::ENABLED).map(|tokens| tokens.to_string())
    }

    fn expand_err(def: FnDef) -> String {
        match expand_function(&def, Settings::ENABLED) {
            Ok(_) => panic!("expected a build-time error"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn plain_params_stay_ordinary() {
        let out = expand(parse_quote! { fn add(a: i64, b: i64) -> i64 { a + b } }).unwrap();
        assert!(out.contains(&quote!(fn add(a: i64, b: i64) -> i64).to_string()));
        assert!(!out.contains("__arg0"));
    }

    #[test]
    fn guards_become_a_match_guard() {
        let out = expand(parse_quote! {
            fn halve(n: guard<PosInteger>) -> i64 { n / 2 }
        })
        .unwrap();
        assert!(out.contains(&quote!(__arg0: PosInteger).to_string()));
        assert!(out.contains(&quote!((n,) if n > 0 =>).to_string()));
        assert!(out.contains("no clause of `halve` matches the given arguments"));
    }

    #[test]
    fn disabled_guards_generate_nothing() {
        let def: FnDef = parse_quote! { fn halve(n: guard<PosInteger>) -> i64 { n / 2 } };
        let settings = Settings {
            guards: false,
            validation: true,
        };
        let out = expand_function(&def, settings).unwrap().to_string();
        assert!(out.contains(&quote!(fn halve(n: PosInteger) -> i64).to_string()));
        assert!(!out.contains("n > 0"));
    }

    #[test]
    fn disabled_validation_generates_nothing() {
        let def: FnDef = parse_quote! { fn pay(amount: validate<Amount>) -> i64 { amount.0 } };
        let settings = Settings {
            guards: true,
            validation: false,
        };
        let out = expand_function(&def, settings).unwrap().to_string();
        assert!(out.contains(&quote!(fn pay(amount: Amount) -> i64).to_string()));
        assert!(!out.contains("validate_arg"));
        assert!(out.contains("validate : false"));
    }

    #[test]
    fn validation_prologue_precedes_body() {
        let out = expand(parse_quote! {
            fn pay(amount: validate<Amount>) -> Outcome<i64> { Ok(amount.0) }
        })
        .unwrap();
        let prologue = out
            .find(&quote!(::vetted::validate_arg::<Amount>(amount)).to_string())
            .unwrap();
        let body = out.find(&quote!(Ok(amount.0)).to_string()).unwrap();
        assert!(prologue < body);
    }

    #[test]
    fn validation_needs_a_result_return() {
        let err = expand_err(parse_quote! {
            fn pay(amount: validate<Amount>) -> i64 { amount.0 }
        });
        assert_eq!(err, "argument validation requires a `Result` return type");
    }

    #[test]
    fn clause_syntax_rejects_guards_and_validation() {
        let err = expand_err(parse_quote! {
            fn sign(n: guard<PosInteger>) -> i64 { 1 => 1, _ => 0 }
        });
        assert_eq!(err, "guard generation cannot be used with clause syntax");

        let err = expand_err(parse_quote! {
            fn sign(n: validate<Amount>) -> Outcome<i64> { _ => Ok(0) }
        });
        assert_eq!(err, "argument validation cannot be used with clause syntax");
    }

    #[test]
    fn clause_syntax_dispatches_in_order() {
        let out = expand(parse_quote! {
            fn classify(a: i64, b: i64) -> &'static str {
                (0, _) => "zero",
                (x, y) if x > y => "greater",
                _ => "other",
            }
        })
        .unwrap();
        let zero = out.find("\"zero\"").unwrap();
        let greater = out.find("\"greater\"").unwrap();
        assert!(zero < greater);
        assert!(out.contains(&quote!(match (a, b)).to_string()));
        assert!(out.contains("clauses : 3usize"));
    }

    #[test]
    fn non_var_targets_are_rejected() {
        let err = expand_err(parse_quote! { fn f((a, b): guard<(PosInteger, PosInteger)>) {} });
        assert!(err.starts_with("parameter is not a var"));

        let err = expand_err(parse_quote! { fn f(1 = 1) {} });
        assert!(err.starts_with("parameter is not a var"));
    }

    #[test]
    fn patterns_force_the_guarded_shape() {
        let out = expand(parse_quote! {
            fn swap((a, b)) -> (Value, Value) { (b, a) }
        })
        .unwrap();
        assert!(out.contains(&quote!(__arg0: (::vetted::Value, ::vetted::Value)).to_string()));
        assert!(out.contains(&quote!(((a, b),) =>).to_string()));
    }
}
