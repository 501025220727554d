//! Sort specifications and record comparison.
//!
//! A [`SortSpec`] names one field, a [`Dir`] and a [`SortKind`]. Values that
//! cannot be read for the requested kind (missing fields, unparsable dates,
//! non-numeric text under a numeric sort) always go after every readable
//! value, whatever the direction, and compare equal among themselves so the
//! stable sort keeps them in collection order.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::value_to_date;
use crate::value::{Number, Value};

/// Which end of the list readable values start from. Unreadable values
/// stay at the bottom either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    #[default]
    Asc,
    Desc,
}

impl Dir {
    /// Orients a comparison of two readable keys.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        if self == Dir::Desc {
            ordering.reverse()
        } else {
            ordering
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How sort values are read and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    /// Locale-aware string comparison.
    #[default]
    Lexicographic,
    /// Numeric comparison; numeric strings are parsed.
    Numeric,
    /// Calendar-date comparison; date strings are parsed.
    Date,
}

impl SortKind {
    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKind::Lexicographic => "lexicographic",
            SortKind::Numeric => "numeric",
            SortKind::Date => "date",
        }
    }
}

/// The active sort: a field, a direction and a comparison kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
    /// How values are compared.
    #[serde(default)]
    pub kind: SortKind,
}

impl SortSpec {
    /// Creates a sort specification.
    pub fn new(field: impl Into<String>, dir: Dir, kind: SortKind) -> Self {
        SortSpec {
            field: field.into(),
            dir,
            kind,
        }
    }

    /// Ascending lexicographic sort on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        SortSpec::new(field, Dir::Asc, SortKind::Lexicographic)
    }

    /// Descending lexicographic sort on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        SortSpec::new(field, Dir::Desc, SortKind::Lexicographic)
    }

    /// Replaces the comparison kind, builder style.
    pub fn kind(mut self, kind: SortKind) -> Self {
        self.kind = kind;
        self
    }

    /// Reads the sort key of one value, or `None` if it cannot be sorted
    /// under this kind.
    pub fn key<'a>(&self, value: &Value<'a>) -> Option<SortKey<'a>> {
        SortKey::read(value, self.kind)
    }

    /// Compares two already-extracted keys, placing `None` last.
    pub fn compare_keys(&self, a: Option<&SortKey<'_>>, b: Option<&SortKey<'_>>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => self.dir.apply(a.cmp(b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Compares two field values according to this specification.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        self.compare_keys(self.key(a).as_ref(), self.key(b).as_ref())
    }
}

/// A labelled, enumerated sort choice as offered by a "Sort by" control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortOption {
    /// Text shown to the user, e.g. "Name (A-Z)".
    pub label: String,
    /// The sort applied when chosen.
    #[serde(flatten)]
    pub sort: SortSpec,
}

impl SortOption {
    /// Creates a sort option.
    pub fn new(label: impl Into<String>, sort: SortSpec) -> Self {
        SortOption {
            label: label.into(),
            sort,
        }
    }
}

/// A comparable sort key extracted from one field value.
///
/// Keys of one [`SortKind`] are always the same variant, so the cross-variant
/// arm of the ordering is never reached during a sort.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey<'a> {
    /// Collation key plus the original text as a tie-breaker.
    Text { folded: String, raw: Cow<'a, str> },
    /// Finite number.
    Number(Number),
    /// Calendar date.
    Date(NaiveDate),
}

impl<'a> SortKey<'a> {
    /// Reads a key from a value for the given kind.
    pub fn read(value: &Value<'a>, kind: SortKind) -> Option<SortKey<'a>> {
        match kind {
            SortKind::Lexicographic => value.to_text().map(|raw| SortKey::Text {
                folded: collation_key(&raw),
                raw,
            }),
            SortKind::Numeric => read_number(value).map(SortKey::Number),
            SortKind::Date => value_to_date(value).map(SortKey::Date),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Text { .. } => 0,
            SortKey::Number(_) => 1,
            SortKey::Date(_) => 2,
        }
    }
}

impl Eq for SortKey<'_> {}

impl PartialOrd for SortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                SortKey::Text { folded: fa, raw: ra },
                SortKey::Text { folded: fb, raw: rb },
            ) => fa.cmp(fb).then_with(|| ra.cmp(rb)),
            // Only finite numbers become keys, so `compare` always succeeds.
            (SortKey::Number(a), SortKey::Number(b)) => a.compare(*b).unwrap_or(Ordering::Equal),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn read_number(value: &Value<'_>) -> Option<Number> {
    let n = match value {
        Value::Number(n) => *n,
        Value::Text(s) => Number::parse(s)?,
        Value::Date(d) => Number::I64(i64::from(d.num_days_from_ce())),
        Value::Bool(_) | Value::None => return None,
    };
    n.is_finite().then_some(n)
}

/// Builds a locale-insensitive collation key.
///
/// Text is transliterated to ASCII (so "É" sorts with "E") and lower-cased,
/// giving the dictionary order users expect from a contact list.
pub fn collation_key(text: &str) -> String {
    deunicode::deunicode(text).to_lowercase()
}
