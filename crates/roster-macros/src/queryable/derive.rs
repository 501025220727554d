//! Implementation of the `#[derive(Queryable)]` macro.
//!
//! Generates an implementation of `roster_query::Queryable` and field name
//! constants for the fields marked `#[query]`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_query_attrs;

/// Main implementation of the Queryable derive macro.
pub fn queryable_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Queryable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Queryable can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_query_attrs(&field.attrs)?;
        if !attrs.is_queryable() {
            continue;
        }

        let query_name = attrs.rename.unwrap_or_else(|| field_name.to_string());
        if seen.contains(&query_name) {
            return Err(Error::new(
                field.span(),
                format!("duplicate query field name '{}'", query_name),
            ));
        }
        seen.push(query_name.clone());

        let const_name = to_screaming_snake_case(&query_name);
        if const_name == "QUERY_FIELDS" || syn::parse_str::<syn::Ident>(&const_name).is_err() {
            return Err(Error::new(
                field.span(),
                format!("query field name '{}' cannot form a constant name", query_name),
            ));
        }
        let const_name = format_ident!("{}", const_name);
        field_constants.push(quote! {
            /// Field name constant for query specs and facet definitions.
            pub const #const_name: &'static str = #query_name;
        });

        field_matches.push(quote! {
            #query_name => ::roster_query::AsValue::as_value(&self.#field_name),
        });
    }

    let field_names = seen.iter();

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*

            /// Names of all queryable fields, in declaration order.
            pub const QUERY_FIELDS: &'static [&'static str] = &[#(#field_names),*];
        }

        impl #impl_generics ::roster_query::Queryable for #struct_name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::roster_query::Value<'_> {
                match field {
                    #(#field_matches)*
                    _ => ::roster_query::Value::None,
                }
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == ' ' || c == '.' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphanumeric();
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("name"), "NAME");
        assert_eq!(to_screaming_snake_case("last_visit"), "LAST_VISIT");
        assert_eq!(to_screaming_snake_case("lastVisit"), "LAST_VISIT");
        assert_eq!(to_screaming_snake_case("visit-count"), "VISIT_COUNT");
        assert_eq!(to_screaming_snake_case("doctor.city"), "DOCTOR_CITY");
    }

    #[test]
    fn generates_constants_and_match_arms() {
        let input: DeriveInput = syn::parse_quote! {
            struct Doctor {
                #[query]
                name: String,
                #[query(rename = "visits")]
                visit_count: u32,
                #[query(skip)]
                id: u64,
                notes: String,
            }
        };
        let tokens = queryable_derive_impl(input).unwrap().to_string();
        assert!(tokens.contains("pub const NAME"));
        assert!(tokens.contains("pub const VISITS"));
        assert!(tokens.contains("\"visits\" =>"));
        assert!(!tokens.contains("const ID"));
        assert!(!tokens.contains("const NOTES"));
    }

    #[test]
    fn rejects_tuple_structs() {
        let input: DeriveInput = syn::parse_quote! { struct Pair(String, u32); };
        let err = queryable_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }

    #[test]
    fn rejects_enums() {
        let input: DeriveInput = syn::parse_quote! { enum Stage { New, Won } };
        assert!(queryable_derive_impl(input).is_err());
    }

    #[test]
    fn rejects_duplicate_names() {
        let input: DeriveInput = syn::parse_quote! {
            struct Lead {
                #[query]
                stage: String,
                #[query(rename = "stage")]
                status: String,
            }
        };
        let err = queryable_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }
}
