//! Selector controls for roster screens, as explicit state machines.
//!
//! `roster-select` models the dropdowns and search box above a list screen:
//! single-select, multi-select and free-text search. Each control is Closed
//! or Open and keeps an uncommitted snapshot (`pending`) taken when it opens,
//! so a dismissed dropdown can put back the value the user had.
//!
//! # Quick Start
//!
//! ```
//! use roster_select::{SelectOption, Selector, SelectorValue};
//!
//! let mut category = Selector::multi("category")
//!     .with_label("Category")
//!     .with_options(["A", "B", "C"].map(SelectOption::plain));
//!
//! category.open();
//! category.pick("B");
//! let event = category.pick("A").unwrap();
//! category.close();
//!
//! assert_eq!(event.field, "category");
//! assert_eq!(event.value, SelectorValue::Many(vec!["A".into(), "B".into()]));
//! assert_eq!(category.display_text(), "A, B");
//! ```
//!
//! # Events
//!
//! Every transition returns `Option<SelectorEvent>`: `Some` exactly when the
//! committed value changed. The owning screen merges events into its query
//! state; nothing else is reported.
//!
//! # Stale Input
//!
//! Input that does not fit the current phase is absorbed, never an error.
//! A pick or remove while closed commits directly; a close while closed does
//! nothing; picks of values that are not options are ignored.

mod event;
mod presentation;
mod selector;
mod value;

pub use event::{CommitCause, SelectorEvent};
pub use presentation::{label_mode, LabelMode};
pub use selector::{Phase, Selector, SelectorInput, SelectorKind};
pub use value::{SelectOption, SelectorValue};
