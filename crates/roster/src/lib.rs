//! # Roster - searchable, faceted list screens
//!
//! Roster is the reusable core behind list screens of a field-sales app
//! (doctors, leads, tasks, visits): a search box, a row of facet dropdowns,
//! a "Sort by" control, summary tiles counting records per option, and the
//! list itself.
//!
//! - [`query`]: the pure query engine (`evaluate`), re-exported from
//!   `roster-query`
//! - [`select`]: selector controls as open/closed state machines,
//!   re-exported from `roster-select`
//! - [`Queryable`] derive: named field accessors for typed records
//! - [`RosterConfig`]: declarative screen configuration (YAML or JSON)
//! - [`RosterScreen`]: routes control input into the query and keeps the
//!   view current
//!
//! ## Quick Start
//!
//! ```rust
//! use roster::prelude::*;
//!
//! let config = RosterConfig::from_yaml(r#"
//! search_fields: [name, city]
//! facets:
//!   - field: city
//!     label: City
//!     options: [{ label: All, value: "" }, { label: Durg, value: Durg }, { label: Raipur, value: Raipur }]
//! sort_options:
//!   - { label: "Name (A-Z)", field: name, dir: asc }
//! default_sort: "Name (A-Z)"
//! include_summary: true
//! "#).unwrap();
//!
//! let doctors = vec![
//!     Record::new().with("name", "Dr. Ravi Patel").with("city", "Durg"),
//!     Record::new().with("name", "Dr. Anil Verma").with("city", "Raipur"),
//!     Record::new().with("name", "Dr. Rakhi Patel").with("city", "Durg"),
//! ];
//!
//! let mut screen = RosterScreen::from_config(&config, doctors);
//! screen.tap_tile("city", "Durg").unwrap();
//!
//! assert_eq!(screen.len(), 2);
//! assert_eq!(screen.summary().unwrap().count("city", "Raipur"), Some(1));
//! ```
//!
//! ## Typed Records
//!
//! `#[derive(Queryable)]` expands to paths under `roster_query`, so crates
//! using the derive depend on `roster-query` next to `roster`.

mod config;
mod error;
mod screen;

pub use roster_query as query;
pub use roster_select as select;

pub use config::{facet_selector, RosterConfig};
pub use error::{Result, RosterError};
pub use screen::{Control, RosterScreen};

// Trait and derive share the name, in separate namespaces.
pub use roster_macros::Queryable;
pub use roster_query::Queryable;

/// Everything a screen needs, in one import.
pub mod prelude {
    pub use crate::{Control, RosterConfig, RosterError, RosterScreen};
    pub use roster_macros::Queryable;
    pub use roster_query::{
        evaluate, EvaluateOptions, FacetDefinition, FacetOption, QuerySpec, Queryable, Record,
        Selection, SortOption, SortSpec, Summary,
    };
    pub use roster_select::{Selector, SelectorEvent, SelectorInput, SelectorValue};
}
