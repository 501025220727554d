//! Schema-light records.
//!
//! A [`Record`] is a map from field name to [`Scalar`]. It is the shape of
//! records that arrive from a JSON feed or a mock fixture, where no Rust type
//! describes them. Typed structs implement [`Queryable`] directly instead.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::traits::Queryable;
use crate::value::{Number, Value};

/// An owned scalar stored in a [`Record`].
///
/// Deserialization is untagged: `null` becomes [`Scalar::Null`], JSON numbers
/// become [`Scalar::Number`], a string becomes [`Scalar::Date`] only when it
/// is already a canonical `YYYY-MM-DD` date, and every other string stays
/// [`Scalar::Text`] exactly as written.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    Date(NaiveDate),
    Text(String),
}

impl Scalar {
    /// Borrows this scalar as a comparison [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Scalar::Null => Value::None,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Number(n) => Value::Number(*n),
            Scalar::Date(d) => Value::Date(*d),
            Scalar::Text(s) => Value::Text(s),
        }
    }

    /// Returns `true` for [`Scalar::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawScalar::deserialize(deserializer)? {
            RawScalar::Null => Scalar::Null,
            RawScalar::Bool(b) => Scalar::Bool(b),
            RawScalar::Number(n) => Scalar::Number(n),
            RawScalar::Text(s) => match canonical_date(&s) {
                Some(d) => Scalar::Date(d),
                None => Scalar::Text(s),
            },
        })
    }
}

/// Reads `s` as a date only if formatting the date gives `s` back, so the
/// canonical text of the field is unchanged.
fn canonical_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .filter(|d| d.format("%Y-%m-%d").to_string() == s)
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<NaiveDate> for Scalar {
    fn from(d: NaiveDate) -> Self {
        Scalar::Date(d)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<Number> for Scalar {
    fn from(n: Number) -> Self {
        Scalar::Number(n)
    }
}

macro_rules! scalar_from_number {
    ($($source:ty),*) => {
        $(
            impl From<$source> for Scalar {
                fn from(n: $source) -> Self {
                    Scalar::Number(Number::from(n))
                }
            }
        )*
    };
}

scalar_from_number!(i32, i64, u32, u64, usize, f32, f64);

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

/// A record with dynamically named fields.
///
/// Fields live in a sorted map, so the order in which they were inserted or
/// appeared in the source document has no effect on comparisons or output.
///
/// # Example
///
/// ```
/// use roster_query::{Queryable, Record, Value};
///
/// let doctor = Record::new()
///     .with("name", "Dr. Ravi Patel")
///     .with("city", "Durg")
///     .with("visits", 4);
///
/// assert_eq!(doctor.field_value("city"), Value::Text("Durg"));
/// assert_eq!(doctor.field_value("phone"), Value::None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Scalar>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record::default()
    }

    /// Adds a field, builder style.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Scalar>) -> Option<Scalar> {
        self.fields.insert(field.into(), value.into())
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<Scalar> {
        self.fields.remove(field)
    }

    /// Returns the stored scalar for a field.
    pub fn get(&self, field: &str) -> Option<&Scalar> {
        self.fields.get(field)
    }

    /// Returns `true` if the field is present and not null.
    pub fn has(&self, field: &str) -> bool {
        self.fields.get(field).is_some_and(|s| !s.is_null())
    }

    /// Iterates fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of stored fields, nulls included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields are stored.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Queryable for Record {
    fn field_value(&self, field: &str) -> Value<'_> {
        self.fields
            .get(field)
            .map_or(Value::None, Scalar::as_value)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Scalar>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_fields_read_as_none() {
        let record = Record::new()
            .with("name", "Dr. Rakhi Patel")
            .with("phone", Option::<String>::None);

        assert_eq!(record.field_value("name"), Value::Text("Dr. Rakhi Patel"));
        assert_eq!(record.field_value("phone"), Value::None);
        assert_eq!(record.field_value("email"), Value::None);
        assert!(record.has("name"));
        assert!(!record.has("phone"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let a = Record::new().with("city", "Durg").with("name", "A");
        let b = Record::new().with("name", "A").with("city", "Durg");
        assert_eq!(a, b);
        let names: Vec<&str> = a.fields().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["city", "name"]);
    }

    #[test]
    fn deserializes_scalars_untagged() {
        let record: Record = serde_json::from_str(
            r#"{"name": "Dr. Ravi Patel", "visits": 3, "rating": 4.5,
                "last_visit": "2024-02-11", "active": true, "notes": null}"#,
        )
        .unwrap();

        assert_eq!(record.get("name"), Some(&Scalar::Text("Dr. Ravi Patel".into())));
        assert_eq!(record.get("visits"), Some(&Scalar::Number(Number::I64(3))));
        assert_eq!(record.get("rating"), Some(&Scalar::Number(Number::F64(4.5))));
        assert_eq!(
            record.get("last_visit"),
            Some(&Scalar::Date(NaiveDate::from_ymd_opt(2024, 2, 11).unwrap()))
        );
        assert_eq!(record.get("active"), Some(&Scalar::Bool(true)));
        assert_eq!(record.get("notes"), Some(&Scalar::Null));
    }

    #[test]
    fn non_iso_date_strings_stay_text() {
        let record: Record = serde_json::from_str(r#"{"due": "11/02/2024"}"#).unwrap();
        assert_eq!(record.get("due"), Some(&Scalar::Text("11/02/2024".into())));
    }

    #[test]
    fn date_like_codes_keep_their_text() {
        let records: Vec<Record> =
            serde_json::from_str(r#"[{"code": "2024-1-5"}, {"code": "7-8-9"}, {"code": "2024-01-05"}]"#)
                .unwrap();

        assert_eq!(records[0].get("code"), Some(&Scalar::Text("2024-1-5".into())));
        assert_eq!(records[1].get("code"), Some(&Scalar::Text("7-8-9".into())));
        assert!(matches!(records[2].get("code"), Some(Scalar::Date(_))));
        assert_eq!(
            serde_json::to_string(&records).unwrap(),
            r#"[{"code":"2024-1-5"},{"code":"7-8-9"},{"code":"2024-01-05"}]"#
        );
    }

    #[test]
    fn collects_from_pairs() {
        let record: Record = vec![("city", "Raipur"), ("category", "B")]
            .into_iter()
            .collect();
        assert_eq!(record.field_value("category"), Value::Text("B"));
    }
}
