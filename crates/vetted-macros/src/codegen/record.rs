//! Record operation generation.
//!
//! Generated methods stay thin: each field initializer delegates to the
//! `vetted::record` helpers with the record type, the field type and the
//! field's entry in `FIELDS`. Struct literal fields are evaluated in
//! declaration order, so the first failing field short-circuits with `?`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, Generics, parse_quote};

use crate::schema::RecordSchema;

pub(crate) fn generate_record(input: &DeriveInput, schema: &RecordSchema) -> TokenStream {
    let name = &input.ident;
    let type_name = name.to_string();
    let generics = bounded(&input.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let recursive = schema.recursive;
    let vis = &schema.vis;

    let idents: Vec<_> = schema.fields.iter().map(|f| &f.ident).collect();
    let types: Vec<_> = schema.fields.iter().map(|f| &f.ty).collect();
    let names: Vec<_> = schema.fields.iter().map(|f| f.name.as_str()).collect();
    let indices = 0..schema.fields.len();
    let specs = schema.fields.iter().map(|field| {
        let (name, ty, keys) = (&field.name, &field.ty, &field.keys);
        quote! {
            ::vetted::FieldSpec {
                name: #name,
                module: <#ty as ::vetted::Validate>::TYPE,
                keys: &[#(#keys),*],
            }
        }
    });
    let setters: Vec<_> = schema
        .fields
        .iter()
        .map(|f| format_ident!("with_{}", f.name))
        .collect();

    let field_spec = |i: usize| quote!(&<Self as ::vetted::Record>::FIELDS[#i]);
    let construct = indices.clone().map(field_spec);
    let validate = indices.clone().map(field_spec);
    let update = indices.map(field_spec);

    quote! {
        impl #impl_generics ::vetted::Validate for #name #ty_generics #where_clause {
            const TYPE: &'static str = #type_name;

            fn from_value(value: &::vetted::Value) -> ::vetted::Outcome<Self> {
                <Self as ::vetted::Record>::try_validate(value)
            }

            fn to_value(&self) -> ::vetted::Value {
                ::vetted::Value::Map(<Self as ::vetted::Record>::to_map(self))
            }

            fn construct(
                value: &::vetted::Value,
            ) -> ::core::option::Option<::vetted::Outcome<Self>> {
                ::core::option::Option::Some(<Self as ::vetted::Record>::try_new(value))
            }

            fn conforms(&self) -> bool {
                <Self as ::vetted::Record>::is_valid(self)
            }
        }

        impl #impl_generics ::vetted::Record for #name #ty_generics #where_clause {
            const FIELDS: &'static [::vetted::FieldSpec] = &[#(#specs),*];
            const RECURSIVE: bool = #recursive;

            fn try_new(input: &::vetted::Value) -> ::vetted::Outcome<Self> {
                ::vetted::record::ensure_entries::<Self>(input)?;
                ::core::result::Result::Ok(Self {
                    #(#idents: ::vetted::record::construct_field::<Self, #types>(input, #construct)?,)*
                })
            }

            fn try_validate(input: &::vetted::Value) -> ::vetted::Outcome<Self> {
                ::vetted::record::ensure_entries::<Self>(input)?;
                ::core::result::Result::Ok(Self {
                    #(#idents: ::vetted::record::validate_field::<Self, #types>(input, #validate)?,)*
                })
            }

            fn try_update(&self, input: &::vetted::Value) -> ::vetted::Outcome<Self> {
                ::vetted::record::ensure_entries::<Self>(input)?;
                ::core::result::Result::Ok(Self {
                    #(#idents: ::vetted::record::update_field::<Self, #types>(input, #update, &self.#idents)?,)*
                })
            }

            fn to_map(&self) -> ::vetted::Map {
                ::vetted::Map::from_iter([
                    #((
                        ::std::string::String::from(#names),
                        ::vetted::Validate::to_value(&self.#idents),
                    )),*
                ])
            }

            fn is_valid(&self) -> bool {
                true #(&& ::vetted::Validate::conforms(&self.#idents))*
            }
        }

        #[allow(non_snake_case, dead_code)]
        impl #impl_generics #name #ty_generics #where_clause {
            #(
                #vis fn #idents(&self) -> &#types {
                    &self.#idents
                }

                #vis fn #setters(&self, value: #types) -> Self {
                    Self {
                        #idents: value,
                        ..::core::clone::Clone::clone(self)
                    }
                }
            )*
        }
    }
}

/// Every type parameter must itself be a cloneable field module.
fn bounded(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    let params: Vec<_> = generics.type_params().map(|param| param.ident.clone()).collect();
    if params.is_empty() {
        return generics;
    }
    let where_clause = generics.make_where_clause();
    for param in params {
        where_clause
            .predicates
            .push(parse_quote!(#param: ::vetted::Validate + ::core::clone::Clone));
    }
    generics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use syn::parse_quote;

    fn expand(input: DeriveInput) -> String {
        let schema = schema::build(&input).unwrap();
        generate_record(&input, &schema).to_string()
    }

    #[test]
    fn field_table_lists_accepted_keys() {
        let out = expand(parse_quote! {
            #[record(accept_case = "snake")]
            pub struct Page { pub pageSize: u32 }
        });
        assert!(out.contains(r#"keys : & ["pageSize" , "page_size"]"#), "{out}");
        assert!(out.contains("const RECURSIVE : bool = false"));
        assert!(out.contains(r#"const TYPE : & 'static str = "Page""#));
    }

    #[test]
    fn fields_resolve_in_declaration_order() {
        let out = expand(parse_quote! {
            struct Pair { left: i64, right: String }
        });
        let left = out.find("left : :: vetted :: record :: construct_field").unwrap();
        let right = out.find("right : :: vetted :: record :: construct_field").unwrap();
        assert!(left < right);
        assert!(out.contains("FIELDS [1usize]"));
    }

    #[test]
    fn accessors_follow_struct_visibility() {
        let out = expand(parse_quote! {
            pub struct Point { x: i64 }
        });
        assert!(out.contains(&quote!(pub fn x(&self) -> &i64).to_string()));
        assert!(out.contains(&quote!(pub fn with_x(&self, value: i64) -> Self).to_string()));
    }

    #[test]
    fn generic_records_split_generics() {
        let out = expand(parse_quote! {
            struct Tagged<T: Clone> { tag: T }
        });
        assert!(out.contains(
            &quote!(impl<T: Clone> ::vetted::Record for Tagged<T>
                where T: ::vetted::Validate + ::core::clone::Clone)
            .to_string()
        ));
    }

    #[test]
    fn non_generic_records_get_no_where_clause() {
        let out = expand(parse_quote! {
            struct Plain { x: i64 }
        });
        assert!(out.contains("impl :: vetted :: Record for Plain {"), "{out}");
    }
}
