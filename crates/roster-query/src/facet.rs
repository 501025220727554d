//! Facets: caller-declared filter dimensions and their selections.

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};
use crate::value::Value;

/// Whether a facet accepts one value or a set of values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectMode {
    /// One value at a time; matching is equality.
    #[default]
    Single,
    /// Any number of values; matching is membership.
    Multi,
}

/// One choice of a facet.
///
/// An option whose `value` is empty is the "All" sentinel: selecting it
/// removes the facet's constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacetOption {
    /// Text shown to the user.
    pub label: String,
    /// Value compared against the record field.
    pub value: String,
}

impl FacetOption {
    /// Creates an option.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        FacetOption {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Creates an option whose label and value are the same.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        FacetOption {
            label: value.clone(),
            value,
        }
    }

    /// Creates the "no constraint" sentinel option.
    pub fn all(label: impl Into<String>) -> Self {
        FacetOption::new(label, "")
    }

    /// Returns `true` for the "no constraint" sentinel.
    pub fn is_all(&self) -> bool {
        self.value.is_empty()
    }
}

/// A static filter dimension declared by the screen.
///
/// # Example
///
/// ```
/// use roster_query::{FacetDefinition, FacetOption};
///
/// let city = FacetDefinition::single("city")
///     .label("City")
///     .option(FacetOption::all("All cities"))
///     .options(["Raipur", "Bilaspur", "Durg"].map(FacetOption::plain));
///
/// assert_eq!(city.options.len(), 4);
/// assert!(city.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetDefinition {
    /// Record field this facet filters on.
    pub field: String,
    /// Display label; empty means the field name is shown.
    #[serde(default)]
    pub label: String,
    /// Declared options in display order.
    #[serde(default)]
    pub options: Vec<FacetOption>,
    /// Single or multi select.
    #[serde(default)]
    pub mode: SelectMode,
}

impl FacetDefinition {
    /// Creates a facet with no options.
    pub fn new(field: impl Into<String>, mode: SelectMode) -> Self {
        let field = field.into();
        FacetDefinition {
            label: field.clone(),
            field,
            options: Vec::new(),
            mode,
        }
    }

    /// Creates a single-select facet.
    pub fn single(field: impl Into<String>) -> Self {
        FacetDefinition::new(field, SelectMode::Single)
    }

    /// Creates a multi-select facet.
    pub fn multi(field: impl Into<String>) -> Self {
        FacetDefinition::new(field, SelectMode::Multi)
    }

    /// Sets the display label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Appends one option.
    pub fn option(mut self, option: FacetOption) -> Self {
        self.options.push(option);
        self
    }

    /// Appends several options in order.
    pub fn options<I>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = FacetOption>,
    {
        self.options.extend(options);
        self
    }

    /// The label to show, falling back to the field name.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.field
        } else {
            &self.label
        }
    }

    /// Looks up an option by value.
    pub fn find(&self, value: &str) -> Option<&FacetOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Options other than the "All" sentinel.
    pub fn value_options(&self) -> impl Iterator<Item = &FacetOption> {
        self.options.iter().filter(|o| !o.is_all())
    }

    /// Checks the definition for an empty field name or repeated values.
    pub fn validate(&self) -> Result<()> {
        if self.field.trim().is_empty() {
            return Err(QueryError::EmptyFacetField);
        }
        for (i, option) in self.options.iter().enumerate() {
            if self.options[..i].iter().any(|o| o.value == option.value) {
                return Err(QueryError::DuplicateFacetOption {
                    field: self.field.clone(),
                    value: option.value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// The value(s) currently selected for one facet.
///
/// Serialized untagged: a string for one value, an array for several.
/// Empty strings are the "All" sentinel and never constrain anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    /// Single-select: the field must equal this value.
    One(String),
    /// Multi-select: the field must equal any of these values.
    Any(Vec<String>),
}

impl Selection {
    /// Selection of one value.
    pub fn one(value: impl Into<String>) -> Self {
        Selection::One(value.into())
    }

    /// Selection of a set of values.
    pub fn any<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Any(values.into_iter().map(Into::into).collect())
    }

    /// The constraining values, skipping "All" sentinels.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Selection::One(v) => std::slice::from_ref(v),
            Selection::Any(vs) => vs,
        };
        slice.iter().map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Returns `true` when the selection imposes no constraint.
    pub fn is_empty(&self) -> bool {
        self.values().next().is_none()
    }

    /// Returns `true` if `value` satisfies this selection.
    ///
    /// An empty selection accepts everything, including missing fields.
    /// Otherwise missing fields never match.
    pub fn accepts(&self, value: &Value<'_>) -> bool {
        if self.is_empty() {
            return true;
        }
        match value.to_text() {
            Some(text) => self.values().any(|v| v == text),
            None => false,
        }
    }
}
