//! Parsing logic for `defn!` input.

use syn::{
    Arm, Attribute, Block, Expr, Generics, Ident, Pat, ReturnType, Stmt, Token, Type, Visibility,
    braced, parenthesized,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

/// Everything inside one `defn! { ... }` invocation.
pub(crate) struct Definitions {
    pub(crate) functions: Vec<FnDef>,
}

/// One declared function.
pub(crate) struct FnDef {
    pub(crate) attrs: Vec<Attribute>,
    pub(crate) vis: Visibility,
    pub(crate) name: Ident,
    pub(crate) generics: Generics,
    pub(crate) params: Vec<RawParam>,
    pub(crate) output: ReturnType,
    pub(crate) body: Body,
}

/// A parameter as written: `pattern (: type)? (= default)?`.
pub(crate) struct RawParam {
    pub(crate) pat: Pat,
    pub(crate) ty: Option<Type>,
    pub(crate) default: Option<Expr>,
}

/// Function body: statements, or `match`-style clauses.
pub(crate) enum Body {
    Block(Vec<Stmt>),
    Clauses(Vec<Arm>),
}

impl Parse for Definitions {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut functions = Vec::new();
        while !input.is_empty() {
            functions.push(input.parse()?);
        }
        Ok(Definitions { functions })
    }
}

impl Parse for FnDef {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        input.parse::<Token![fn]>()?;
        let name: Ident = input.parse()?;
        let mut generics: Generics = input.parse()?;

        let content;
        parenthesized!(content in input);
        let params = Punctuated::<RawParam, Token![,]>::parse_terminated(&content)?
            .into_iter()
            .collect();

        let output: ReturnType = input.parse()?;
        generics.where_clause = input.parse()?;

        let content;
        braced!(content in input);
        let body = content.parse()?;

        Ok(FnDef {
            attrs,
            vis,
            name,
            generics,
            params,
            output,
            body,
        })
    }
}

impl Parse for RawParam {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let pat = Pat::parse_single(input)?;
        let ty = if input.peek(Token![:]) && !input.peek(Token![::]) {
            input.parse::<Token![:]>()?;
            Some(input.parse()?)
        } else {
            None
        };
        let default = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            Some(input.parse()?)
        } else {
            None
        };
        Ok(RawParam { pat, ty, default })
    }
}

impl Parse for Body {
    /// Clause syntax is tried first on a fork; anything that is not a
    /// non-empty sequence of arms is a statement block.
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let fork = input.fork();
        if let Ok(arms) = parse_arms(&fork)
            && !arms.is_empty()
        {
            // Re-parse on the real stream to advance it.
            return parse_arms(input).map(Body::Clauses);
        }
        input.call(Block::parse_within).map(Body::Block)
    }
}

fn parse_arms(input: ParseStream) -> syn::Result<Vec<Arm>> {
    let mut arms = Vec::new();
    while !input.is_empty() {
        arms.push(input.parse()?);
    }
    Ok(arms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn parses_typed_and_defaulted_params() {
        let def: FnDef = parse_quote! {
            pub fn scale(x: guard<PosInteger>, (a, b), label: &str = "x") -> i64 { x }
        };
        assert_eq!(def.params.len(), 3);
        assert!(def.params[0].ty.is_some());
        assert!(def.params[1].ty.is_none());
        assert!(def.params[2].default.is_some());
        assert!(matches!(def.body, Body::Block(ref stmts) if stmts.len() == 1));
    }

    #[test]
    fn detects_clause_bodies() {
        let def: FnDef = parse_quote! {
            fn sign(n: i64) -> i64 {
                0 => 0,
                n if n < 0 => -1,
                _ => 1,
            }
        };
        assert!(matches!(def.body, Body::Clauses(ref arms) if arms.len() == 3));
    }

    #[test]
    fn statement_bodies_are_not_clauses() {
        let def: FnDef = parse_quote! {
            fn twice(x: i64) -> i64 {
                let y = x;
                match y { 0 => 0, _ => y * 2 }
            }
        };
        assert!(matches!(def.body, Body::Block(ref stmts) if stmts.len() == 2));
    }

    #[test]
    fn empty_body_is_a_block() {
        let def: FnDef = parse_quote! { fn noop() {} };
        assert!(matches!(def.body, Body::Block(ref stmts) if stmts.is_empty()));
    }

    #[test]
    fn parses_many_functions_with_where_clauses() {
        let defs: Definitions = parse_quote! {
            /// Docs survive.
            fn first<T>(x: T) -> T where T: Clone { x }
            fn second() {}
        };
        assert_eq!(defs.functions.len(), 2);
        assert!(defs.functions[0].generics.where_clause.is_some());
        assert_eq!(defs.functions[0].attrs.len(), 1);
    }
}
