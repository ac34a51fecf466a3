//! Shared types and utilities used across the macro modules.

use quote::ToTokens;

/// Build-time generation switches, read once per expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Synthesize guards for `guard<T>` parameters.
    pub(crate) guards: bool,
    /// Emit validation prologues for `validate<T>` parameters.
    pub(crate) validation: bool,
}

impl Settings {
    #[cfg(test)]
    pub(crate) const ENABLED: Self = Self {
        guards: true,
        validation: true,
    };

    /// Settings selected by the crate's `guards` and `validation` features.
    pub(crate) fn from_features() -> Self {
        Self {
            guards: cfg!(feature = "guards"),
            validation: cfg!(feature = "validation"),
        }
    }
}

/// Render tokens as compact source text.
///
/// `Vec < i64 >` becomes `Vec<i64>` and `(a , b)` becomes `(a, b)`.
pub(crate) fn render(tokens: &impl ToTokens) -> String {
    const JOINS: &[(&str, &str)] = &[
        (" ,", ","),
        (" ;", ";"),
        (" <", "<"),
        ("< ", "<"),
        (" >", ">"),
        ("( ", "("),
        (" )", ")"),
        ("[ ", "["),
        (" ]", "]"),
        ("& ", "&"),
        (" :: ", "::"),
        (":: ", "::"),
        (" . ", "."),
        (" ! [", "!["),
        (" ! (", "!("),
    ];
    JOINS.iter().fold(
        tokens.to_token_stream().to_string(),
        |text, (from, to)| text.replace(from, to),
    )
}

/// Last path segment of a plain path type.
pub(crate) fn last_segment(ty: &syn::Type) -> Option<&syn::PathSegment> {
    match ty {
        syn::Type::Path(type_path) if type_path.qself.is_none() => type_path.path.segments.last(),
        syn::Type::Group(group) => last_segment(&group.elem),
        syn::Type::Paren(paren) => last_segment(&paren.elem),
        _ => None,
    }
}

/// The single type argument of a path segment such as `guard<T>`.
pub(crate) fn single_type_argument(segment: &syn::PathSegment) -> Option<&syn::Type> {
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match (args.args.len(), args.args.first()) {
        (1, Some(syn::GenericArgument::Type(ty))) => Some(ty),
        _ => None,
    }
}

pub(crate) fn is_capitalized(ident: &syn::Ident) -> bool {
    ident
        .to_string()
        .trim_start_matches("r#")
        .starts_with(|c: char| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn render_compacts_generic_types() {
        let ty: syn::Type = parse_quote!(::std::collections::HashMap<String, Vec<i64>>);
        assert_eq!(render(&ty), "::std::collections::HashMap<String, Vec<i64>>");
    }

    #[test]
    fn render_compacts_tuples_and_references() {
        let ty: syn::Type = parse_quote!((&'static str, [u8; 4]));
        assert_eq!(render(&ty), "(&'static str, [u8; 4])");
    }

    #[test]
    fn single_type_argument_requires_exactly_one() {
        let ty: syn::Type = parse_quote!(guard<PosInteger>);
        let segment = last_segment(&ty).unwrap();
        assert!(single_type_argument(segment).is_some());

        let ty: syn::Type = parse_quote!(Result<i64, String>);
        assert!(single_type_argument(last_segment(&ty).unwrap()).is_none());
    }
}
