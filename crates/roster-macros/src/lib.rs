//! Proc macros for roster records.
//!
//! # Available Macros
//!
//! - [`Queryable`] - Generate `roster_query::Queryable` and field name
//!   constants from struct field annotations
//!
//! # Examples
//!
//! For working examples, see `roster/tests/queryable_derive.rs`.

mod queryable;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Queryable` trait for typed record structs.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[query]` | Expose the field under its own name |
/// | `#[query(rename = "...")]` | Expose the field under a custom name |
/// | `#[query(skip)]` | Exclude the field (same as no attribute) |
///
/// Fields without `#[query]` are not queryable. Field types must implement
/// `roster_query::AsValue`: strings, integers, floats, `bool`,
/// `chrono::NaiveDate`, `Scalar`, and `Option`s of these.
///
/// # Generated Code
///
/// 1. A `&'static str` constant per queryable field, named in
///    SCREAMING_SNAKE_CASE (e.g. `Doctor::LAST_VISIT`)
/// 2. `QUERY_FIELDS`, every queryable name in declaration order
/// 3. An implementation of `Queryable::field_value()`
///
/// # Example
///
/// ```ignore
/// use roster::query::{evaluate, EvaluateOptions, QuerySpec, SortSpec};
/// use roster::Queryable;
///
/// #[derive(Queryable)]
/// struct Doctor {
///     #[query]
///     name: String,
///
///     #[query]
///     city: String,
///
///     #[query(rename = "visits")]
///     visit_count: u32,
///
///     #[query(skip)]
///     internal_id: u64,
/// }
///
/// let doctors = vec![
///     Doctor { name: "Dr. Ravi Patel".into(), city: "Durg".into(), visit_count: 12, internal_id: 1 },
///     Doctor { name: "Dr. Anil Verma".into(), city: "Raipur".into(), visit_count: 3, internal_id: 2 },
/// ];
///
/// let spec = QuerySpec::new()
///     .facet(Doctor::CITY, "Durg")
///     .sort_by(SortSpec::desc(Doctor::VISITS));
///
/// let view = evaluate(&doctors, &spec, &[], EvaluateOptions::default());
/// assert_eq!(view.len(), 1);
/// ```
#[proc_macro_derive(Queryable, attributes(query))]
pub fn queryable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    queryable::queryable_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
