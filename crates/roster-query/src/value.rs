//! Field values as the engine sees them.
//!
//! An accessor hands the engine one [`Value`] per field. Search and facets
//! only ever look at its canonical text ([`Value::to_text`]); sorting reads
//! it through the active sort kind.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One field of one record, borrowed where possible.
///
/// # Example
///
/// ```
/// use roster_query::{Number, Value};
///
/// struct Visit {
///     doctor: String,
///     samples: u32,
/// }
///
/// fn field<'a>(visit: &'a Visit, name: &str) -> Value<'a> {
///     match name {
///         "doctor" => Value::Text(&visit.doctor),
///         "samples" => Value::Number(Number::from(visit.samples)),
///         _ => Value::None,
///     }
/// }
///
/// let visit = Visit { doctor: "Dr. Ravi Patel".into(), samples: 4 };
/// assert_eq!(field(&visit, "samples").to_text().as_deref(), Some("4"));
/// assert!(field(&visit, "remarks").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Number(Number),
    Date(NaiveDate),
    Bool(bool),
    /// Missing, null, or of a type the record cannot express.
    None,
}

impl<'a> Value<'a> {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// The borrowed text, for [`Value::Text`] only.
    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Canonical text form used by search and facet matching.
    ///
    /// Numbers render in decimal, dates as `YYYY-MM-DD`, booleans as
    /// `true`/`false`. Returns `None` for [`Value::None`].
    pub fn to_text(&self) -> Option<Cow<'a, str>> {
        match *self {
            Value::Text(s) => Some(Cow::Borrowed(s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Date(d) => Some(Cow::Owned(d.format("%Y-%m-%d").to_string())),
            Value::Bool(b) => Some(Cow::Borrowed(if b { "true" } else { "false" })),
            Value::None => None,
        }
    }
}

/// A record number: visit counts, sample quantities, order values.
///
/// Integers keep their own variants so two counts compare exactly; only a
/// comparison involving a float goes through `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    fn widen(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `false` for NaN and infinities.
    pub fn is_finite(self) -> bool {
        match self {
            Number::F64(n) => n.is_finite(),
            _ => true,
        }
    }

    /// Orders two numbers. `None` only when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::I64(a), Number::U64(b)) => Some(compare_signed(a, b)),
            (Number::U64(a), Number::I64(b)) => Some(compare_signed(b, a).reverse()),
            _ => self.widen().partial_cmp(&other.widen()),
        }
    }

    /// Parses numeric text such as `"12"`, `" -3 "` or `"4.75"`.
    ///
    /// Integers stay integers. `NaN` and infinities are rejected.
    pub fn parse(s: &str) -> Option<Number> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(n) = s.parse::<i64>() {
            return Some(Number::I64(n));
        }
        if let Ok(n) = s.parse::<u64>() {
            return Some(Number::U64(n));
        }
        s.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Number::F64)
    }
}

fn compare_signed(a: i64, b: u64) -> Ordering {
    match u64::try_from(a) {
        Ok(a) => a.cmp(&b),
        Err(_) => Ordering::Less,
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => n.fmt(f),
            Number::U64(n) => n.fmt(f),
            Number::F64(n) => n.fmt(f),
        }
    }
}

macro_rules! number_from {
    ($variant:ident, $target:ty; $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64, i64; i8, i16, i32, i64, isize);
number_from!(U64, u64; u8, u16, u32, u64, usize);
number_from!(F64, f64; f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_borrowed_only_from_text() {
        assert_eq!(Value::Text("Durg").as_text(), Some("Durg"));
        assert_eq!(Value::Number(Number::I64(12)).as_text(), None);
        assert!(Value::None.is_none());
        assert!(!Value::Bool(false).is_none());
    }

    #[test]
    fn canonical_text() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(Value::Text("Durg").to_text().as_deref(), Some("Durg"));
        assert_eq!(
            Value::Number(Number::I64(12)).to_text().as_deref(),
            Some("12")
        );
        assert_eq!(
            Value::Number(Number::F64(2.5)).to_text().as_deref(),
            Some("2.5")
        );
        assert_eq!(Value::Date(date).to_text().as_deref(), Some("2024-03-09"));
        assert_eq!(Value::Bool(false).to_text().as_deref(), Some("false"));
        assert_eq!(Value::None.to_text(), None);
    }

    #[test]
    fn visit_counts_compare_across_variants() {
        assert_eq!(Number::I64(3).compare(Number::U64(12)), Some(Ordering::Less));
        assert_eq!(Number::I64(-1).compare(Number::U64(0)), Some(Ordering::Less));
        assert_eq!(
            Number::U64(u64::MAX).compare(Number::I64(i64::MAX)),
            Some(Ordering::Greater)
        );
        assert_eq!(Number::U64(7).compare(Number::F64(7.0)), Some(Ordering::Equal));
        assert_eq!(Number::F64(f64::NAN).compare(Number::I64(1)), None);
    }

    #[test]
    fn parses_numeric_text() {
        assert_eq!(Number::parse(" 42 "), Some(Number::I64(42)));
        assert_eq!(Number::parse("-3"), Some(Number::I64(-3)));
        assert_eq!(
            Number::parse("18446744073709551615"),
            Some(Number::U64(u64::MAX))
        );
        assert_eq!(Number::parse("4.75"), Some(Number::F64(4.75)));
        assert_eq!(Number::parse("NaN"), None);
        assert_eq!(Number::parse("inf"), None);
        assert_eq!(Number::parse("twelve"), None);
        assert_eq!(Number::parse(""), None);
    }

    #[test]
    fn conversions_pick_the_matching_variant() {
        assert_eq!(Number::from(-2i32), Number::I64(-2));
        assert_eq!(Number::from(12u32), Number::U64(12));
        assert_eq!(Number::from(0.5f32), Number::F64(0.5));
    }
}
