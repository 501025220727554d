//! Attribute parsing for the Queryable derive macro.
//!
//! Accepted forms on a named field:
//!
//! - `#[query]` - the field is queryable under its own name
//! - `#[query(rename = "...")]` - queryable under another name
//! - `#[query(skip)]` - explicitly excluded

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[query(...)]`.
#[derive(Debug, Clone)]
pub struct QueryAttr {
    /// The field carries a `#[query]` attribute at all.
    pub present: bool,
    /// Exclude this field.
    pub skip: bool,
    /// Custom field name (default: the Rust field name).
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for QueryAttr {
    fn default() -> Self {
        QueryAttr {
            present: false,
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl QueryAttr {
    /// Whether the field should be exposed to queries.
    pub fn is_queryable(&self) -> bool {
        self.present && !self.skip
    }
}

impl Parse for QueryAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = QueryAttr {
            present: true,
            span: input.span(),
            ..QueryAttr::default()
        };

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        if s.value().is_empty() {
                            return Err(Error::new(s.span(), "rename must not be empty"));
                        }
                        attr.rename = Some(s.value());
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    }
                }
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown query attribute. Expected: skip or rename = \"...\"",
                    ));
                }
            }
        }

        if attr.skip && attr.rename.is_some() {
            return Err(Error::new(attr.span, "skip and rename cannot be combined"));
        }

        Ok(attr)
    }
}

/// Extract `#[query]` / `#[query(...)]` from a field's attributes.
pub fn parse_query_attrs(attrs: &[Attribute]) -> Result<QueryAttr> {
    for attr in attrs {
        if !attr.path().is_ident("query") {
            continue;
        }
        return match &attr.meta {
            Meta::Path(p) => Ok(QueryAttr {
                present: true,
                span: p.span(),
                ..QueryAttr::default()
            }),
            Meta::List(_) => attr.parse_args::<QueryAttr>(),
            Meta::NameValue(nv) => Err(Error::new(
                nv.span(),
                "expected #[query] or #[query(...)]",
            )),
        };
    }
    Ok(QueryAttr::default())
}
