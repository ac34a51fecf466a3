//! Record schemas: field tables with accepted key spellings.

use std::collections::HashMap;

use convert_case::{Case, Casing};
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type, Visibility};

/// Key-naming convention from `#[record(accept_case = "...")]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Convention {
    None,
    LowerCamel,
    UpperCamel,
    Snake,
    Upper,
}

impl Convention {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "none" => Ok(Convention::None),
            "lower_camel" => Ok(Convention::LowerCamel),
            "upper_camel" => Ok(Convention::UpperCamel),
            "snake" => Ok(Convention::Snake),
            "upper" => Ok(Convention::Upper),
            other => Err(syn::Error::new_spanned(
                lit,
                format!(
                    "unknown accept_case `{other}`; expected none, lower_camel, upper_camel, snake, or upper"
                ),
            )),
        }
    }

    /// The transformed spelling of a field name.
    pub(crate) fn apply(self, name: &str) -> String {
        let case = match self {
            Convention::None => return name.to_owned(),
            Convention::LowerCamel => Case::Camel,
            Convention::UpperCamel => Case::Pascal,
            Convention::Snake => Case::Snake,
            Convention::Upper => Case::UpperSnake,
        };
        name.to_case(case)
    }
}

/// Record and validator operations that a generated getter would shadow.
const RESERVED: &[&str] = &[
    "new",
    "validate",
    "update",
    "try_new",
    "try_validate",
    "try_update",
    "to_map",
    "is_valid",
    "matches",
    "from_value",
    "to_value",
    "default_value",
    "construct",
    "conforms",
];

/// One record field.
pub(crate) struct FieldSchema {
    pub(crate) ident: Ident,
    pub(crate) name: String,
    pub(crate) ty: Type,
    /// Canonical name first, then the transformed spelling if it differs.
    pub(crate) keys: Vec<String>,
}

/// Normalized description of a `#[derive(Record)]` struct.
pub(crate) struct RecordSchema {
    pub(crate) fields: Vec<FieldSchema>,
    pub(crate) recursive: bool,
    pub(crate) vis: Visibility,
}

pub(crate) fn build(input: &DeriveInput) -> syn::Result<RecordSchema> {
    let mut convention = Convention::None;
    let mut recursive = false;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("accept_case") {
                convention = Convention::parse(&meta.value()?.parse::<LitStr>()?)?;
                Ok(())
            } else if meta.path.is_ident("recursive") {
                recursive = true;
                Ok(())
            } else {
                Err(meta.error("expected `accept_case = \"...\"` or `recursive`"))
            }
        })?;
    }

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    let mut claimed: HashMap<String, String> = HashMap::new();
    for field in named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let name = ident.to_string().trim_start_matches("r#").to_owned();
        if RESERVED.contains(&name.as_str()) {
            return Err(syn::Error::new_spanned(
                &ident,
                format!("field `{name}` would shadow the record operation of the same name"),
            ));
        }
        let mut keys = vec![name.clone()];
        let transformed = convention.apply(&name);
        if transformed != name {
            keys.push(transformed);
        }
        for key in &keys {
            if let Some(owner) = claimed.insert(key.clone(), name.clone()) {
                return Err(syn::Error::new_spanned(
                    &ident,
                    format!("accepted key `{key}` is claimed by both `{owner}` and `{name}`"),
                ));
            }
        }
        fields.push(FieldSchema {
            ident,
            name,
            ty: field.ty.clone(),
            keys,
        });
    }

    Ok(RecordSchema {
        fields,
        recursive,
        vis: input.vis.clone(),
    })
}
