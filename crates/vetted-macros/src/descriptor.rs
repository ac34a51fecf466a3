//! Parameter descriptors.
//!
//! A descriptor normalizes one raw parameter: the binding pattern, the
//! declared or inferred type, the default, and whether a guard or validation
//! was requested. Requests are gated by [`Settings`], so a marker on a
//! disabled feature is unwrapped and then ignored.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Expr, Ident, Pat, Type, parse_quote};

use crate::parsing::RawParam;
use crate::shared::{Settings, is_capitalized, last_segment, render, single_type_argument};

/// Normalized parameter, consumed by the function assembler.
pub(crate) struct ParamDescriptor {
    pub(crate) pat: Pat,
    pub(crate) ty: Type,
    /// Type text recorded in the signature.
    pub(crate) label: String,
    pub(crate) default: Option<Expr>,
    pub(crate) guard: bool,
    pub(crate) validate: bool,
    /// Top-level list pattern over an inferred `Vec<Value>`; matched through
    /// a slice view.
    pub(crate) slice_view: bool,
}

impl ParamDescriptor {
    /// The variable this parameter binds, if its pattern is a variable.
    pub(crate) fn var(&self) -> Option<&Ident> {
        match &self.pat {
            Pat::Ident(pat_ident) => Some(&pat_ident.ident),
            _ => None,
        }
    }

    /// Whether the pattern can be an ordinary Rust parameter as written.
    pub(crate) fn is_plain_var(&self) -> bool {
        matches!(&self.pat, Pat::Ident(p) if p.subpat.is_none() && p.by_ref.is_none())
    }

    /// The variable, or a "parameter is not a var" error naming the pattern.
    pub(crate) fn require_var(&self, purpose: &str) -> syn::Result<&Ident> {
        self.var().ok_or_else(|| {
            syn::Error::new_spanned(
                &self.pat,
                format!(
                    "parameter is not a var: `{}` cannot {purpose}",
                    render(&self.pat)
                ),
            )
        })
    }
}

/// Which marker wrapped a declared type.
enum Marker {
    Guard,
    Validate,
}

/// Build the descriptor for one raw parameter.
pub(crate) fn describe(raw: &RawParam, settings: Settings) -> syn::Result<ParamDescriptor> {
    let (ty, label, guard, validate, slice_view) = match &raw.ty {
        Some(declared) => {
            let (ty, marker) = unwrap_marker(declared);
            let guard = matches!(marker, Some(Marker::Guard)) && settings.guards;
            let validate = matches!(marker, Some(Marker::Validate)) && settings.validation;
            (ty.clone(), render(ty), guard, validate, false)
        }
        None => {
            let (ty, label) = infer(&raw.pat, true)?;
            let slice_view = matches!(raw.pat, Pat::Slice(_));
            (ty, label, false, false, slice_view)
        }
    };
    Ok(ParamDescriptor {
        pat: raw.pat.clone(),
        ty,
        label,
        default: raw.default.clone(),
        guard,
        validate,
        slice_view,
    })
}

fn unwrap_marker(ty: &Type) -> (&Type, Option<Marker>) {
    let Some(segment) = last_segment(ty) else {
        return (ty, None);
    };
    let marker = match segment.ident.to_string().as_str() {
        "guard" => Marker::Guard,
        "validate" => Marker::Validate,
        _ => return (ty, None),
    };
    match single_type_argument(segment) {
        Some(inner) => (inner, Some(marker)),
        None => (ty, None),
    }
}

/// Infer a type from the shape of a binding pattern.
fn infer(pat: &Pat, top_level: bool) -> syn::Result<(Type, String)> {
    match pat {
        Pat::Ident(_) | Pat::Wild(_) => Ok(any()),
        Pat::Paren(paren) => infer(&paren.pat, top_level),
        Pat::Tuple(tuple) => {
            let elems = tuple
                .elems
                .iter()
                .map(|elem| infer(elem, false))
                .collect::<syn::Result<Vec<_>>>()?;
            let types = elems.iter().map(|(ty, _)| ty);
            let labels: Vec<&str> = elems.iter().map(|(_, label)| label.as_str()).collect();
            let (ty, label) = if elems.len() == 1 {
                (parse_quote!((#(#types,)*)), format!("({},)", labels[0]))
            } else {
                (parse_quote!((#(#types),*)), format!("({})", labels.join(", ")))
            };
            Ok((ty, label))
        }
        Pat::Slice(_) if top_level => Ok((
            parse_quote!(::std::vec::Vec<::vetted::Value>),
            "Vec<Value>".to_owned(),
        )),
        Pat::Struct(pat_struct) => record_type(&pat_struct.path, pat),
        Pat::TupleStruct(pat_tuple) => record_type(&pat_tuple.path, pat),
        Pat::Path(pat_path) if pat_path.path.segments.len() > 1 => record_type(&pat_path.path, pat),
        Pat::Lit(lit) => literal_type(&lit.lit, pat),
        Pat::Range(range) => match range.start.as_deref().or(range.end.as_deref()) {
            Some(Expr::Lit(bound)) => literal_type(&bound.lit, pat),
            _ => Err(cannot_infer(pat)),
        },
        _ => Err(cannot_infer(pat)),
    }
}

fn any() -> (Type, String) {
    (parse_quote!(::vetted::Value), "Value".to_owned())
}

/// The type named by a struct or enum-variant pattern path.
fn record_type(path: &syn::Path, pat: &Pat) -> syn::Result<(Type, String)> {
    let mut path = path.clone();
    let segments: Vec<&Ident> = path.segments.iter().map(|s| &s.ident).collect();
    let is_variant = matches!(
        segments.as_slice(),
        [.., owner, variant] if is_capitalized(owner) && is_capitalized(variant)
    );
    if is_variant {
        path.segments.pop();
        // Drop the trailing `::` left by `pop`.
        let last = path.segments.pop().map(|pair| pair.into_value());
        path.segments.extend(last);
    } else if let [only] = segments.as_slice()
        && ["Some", "None", "Ok", "Err"].contains(&only.to_string().as_str())
    {
        return Err(cannot_infer(pat));
    }
    let label = render(&path);
    Ok((Type::Path(syn::TypePath { qself: None, path }), label))
}

fn literal_type(lit: &syn::Lit, pat: &Pat) -> syn::Result<(Type, String)> {
    let suffixed = |suffix: &str, fallback: &str| -> (Type, String) {
        let name = if suffix.is_empty() { fallback } else { suffix };
        let ident = Ident::new(name, proc_macro2::Span::call_site());
        (parse_quote!(#ident), name.to_owned())
    };
    Ok(match lit {
        syn::Lit::Bool(_) => (parse_quote!(bool), "bool".to_owned()),
        syn::Lit::Int(int) => suffixed(int.suffix(), "i64"),
        syn::Lit::Float(float) => suffixed(float.suffix(), "f64"),
        syn::Lit::Str(_) => (parse_quote!(&str), "&str".to_owned()),
        syn::Lit::Char(_) => (parse_quote!(char), "char".to_owned()),
        syn::Lit::Byte(_) => (parse_quote!(u8), "u8".to_owned()),
        syn::Lit::ByteStr(_) => (parse_quote!(&[u8]), "&[u8]".to_owned()),
        _ => return Err(cannot_infer(pat)),
    })
}

fn cannot_infer(pat: &Pat) -> syn::Error {
    syn::Error::new_spanned(pat, format!("cannot infer type of `{}`", render(pat)))
}

/// Tokens for the argument value a pattern is matched against.
pub(crate) fn scrutinee(param: &ParamDescriptor, arg: &Ident) -> TokenStream {
    if param.slice_view {
        quote!(#arg.as_slice())
    } else {
        arg.to_token_stream()
    }
}
