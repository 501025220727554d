//! Roster query - search, facet filtering, sorting and facet counts over
//! in-memory record collections.
//!
//! Every list screen of the field app (doctors, leads, tasks, visits) shows
//! the same thing: a collection narrowed by a search box and a row of facet
//! dropdowns, sorted by a chosen key, with summary tiles counting records per
//! facet option. This crate is that computation, as one pure function.
//!
//! # Quick Start
//!
//! ```rust
//! use roster_query::{
//!     evaluate, EvaluateOptions, FacetDefinition, FacetOption, QuerySpec, Record, SortSpec,
//! };
//!
//! let doctors = vec![
//!     Record::new().with("name", "Dr. Ravi Patel").with("city", "Durg").with("category", "A"),
//!     Record::new().with("name", "Dr. Anil Verma").with("city", "Raipur").with("category", "B"),
//!     Record::new().with("name", "Dr. Rakhi Patel").with("city", "Durg").with("category", "B"),
//! ];
//!
//! let facets = vec![
//!     FacetDefinition::single("city").options(["Raipur", "Durg"].map(FacetOption::plain)),
//!     FacetDefinition::single("category").options(["A", "B"].map(FacetOption::plain)),
//! ];
//!
//! let spec = QuerySpec::new()
//!     .search("patel")
//!     .search_in(["name"])
//!     .facet("city", "Durg")
//!     .sort_by(SortSpec::asc("name"));
//!
//! let view = evaluate(&doctors, &spec, &facets, EvaluateOptions::with_summary());
//! assert_eq!(view.len(), 2);
//!
//! let summary = view.summary.unwrap();
//! // The city tiles ignore the city selection itself.
//! assert_eq!(summary.count("city", "Raipur"), Some(0));
//! assert_eq!(summary.count("category", "B"), Some(1));
//! ```
//!
//! # Evaluation Stages
//!
//! ```text
//! records ─▶ search ─▶ facets ─▶ stable sort ─▶ results
//!               │
//!               └────▶ facets minus one ─▶ counts per option ─▶ summary
//! ```
//!
//! - **Search**: case-insensitive substring over the declared search fields;
//!   any field may match. Empty search text matches everything.
//! - **Facets**: every non-empty selection must accept the record (AND across
//!   facets, OR within a multi selection). Missing fields never match.
//! - **Sort**: lexicographic, numeric or date. Unreadable values sort last in
//!   either direction; ties keep collection order.
//! - **Summary**: each facet is counted with its own selection left out.
//!
//! # Record Shapes
//!
//! Records are anything implementing [`Queryable`]: the schema-less
//! [`Record`] map, a hand-written impl, or `#[derive(Queryable)]` from
//! `roster-macros`. [`evaluate_with`] accepts a bare accessor function
//! instead.

mod date;
mod engine;
mod error;
mod facet;
mod ordering;
mod record;
mod spec;
mod summary;
mod traits;
mod value;

// Re-export public API
pub use date::{parse_date, value_to_date};
pub use engine::{evaluate, evaluate_with, EvaluateOptions, ResultView};
pub use error::{QueryError, Result};
pub use facet::{FacetDefinition, FacetOption, SelectMode, Selection};
pub use ordering::{collation_key, Dir, SortKey, SortKind, SortOption, SortSpec};
pub use record::{Record, Scalar};
pub use spec::{fold_case, QuerySpec};
pub use summary::{FacetCount, FacetTally, Summary};
pub use traits::{AsValue, Queryable};
pub use value::{Number, Value};
