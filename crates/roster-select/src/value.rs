//! Selector values and options.

use serde::{Deserialize, Serialize};

/// The committed (or pending) value of a selector.
///
/// Single and search selectors hold [`One`](SelectorValue::One), multi
/// selectors hold [`Many`](SelectorValue::Many). Empty values are
/// normalized to [`Unset`](SelectorValue::Unset) when committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectorValue {
    #[default]
    Unset,
    One(String),
    Many(Vec<String>),
}

impl SelectorValue {
    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        match self {
            SelectorValue::Unset => true,
            SelectorValue::One(s) => s.is_empty(),
            SelectorValue::Many(v) => v.iter().all(|s| s.is_empty()),
        }
    }

    /// Returns `true` if `value` is selected.
    pub fn contains(&self, value: &str) -> bool {
        match self {
            SelectorValue::Unset => false,
            SelectorValue::One(s) => s == value,
            SelectorValue::Many(v) => v.iter().any(|s| s == value),
        }
    }

    /// The selected values, skipping empty entries.
    pub fn values(&self) -> Vec<&str> {
        match self {
            SelectorValue::Unset => Vec::new(),
            SelectorValue::One(s) if s.is_empty() => Vec::new(),
            SelectorValue::One(s) => vec![s.as_str()],
            SelectorValue::Many(v) => v
                .iter()
                .map(String::as_str)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// The single value, if this holds exactly one.
    pub fn as_one(&self) -> Option<&str> {
        match self {
            SelectorValue::One(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    pub(crate) fn normalized(self) -> Self {
        if self.is_empty() {
            SelectorValue::Unset
        } else {
            self
        }
    }
}

impl From<&str> for SelectorValue {
    fn from(s: &str) -> Self {
        SelectorValue::One(s.to_string()).normalized()
    }
}

impl From<String> for SelectorValue {
    fn from(s: String) -> Self {
        SelectorValue::One(s).normalized()
    }
}

impl From<Vec<String>> for SelectorValue {
    fn from(v: Vec<String>) -> Self {
        SelectorValue::Many(v).normalized()
    }
}

/// One choice offered by a selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        SelectOption {
            label: label.into(),
            value: value.into(),
        }
    }

    /// An option whose label is its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        SelectOption {
            label: value.clone(),
            value,
        }
    }
}
