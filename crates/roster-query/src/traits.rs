//! Traits for record field access.
//!
//! [`Queryable`] is implemented by anything the engine can evaluate: the
//! generic [`Record`](crate::Record), hand-written impls, or the
//! `#[derive(Queryable)]` macro from `roster-macros`. [`AsValue`] is the
//! per-field conversion the derive macro relies on.

use chrono::NaiveDate;

use crate::record::Scalar;
use crate::value::{Number, Value};

/// Trait for types that can be searched, filtered and sorted.
///
/// # Derive Usage
///
/// ```ignore
/// use roster::Queryable;
///
/// #[derive(Queryable)]
/// struct Doctor {
///     #[query]
///     name: String,
///     #[query]
///     city: String,
///     #[query(rename = "visits")]
///     visit_count: u32,
/// }
///
/// assert_eq!(Doctor::CITY, "city");
/// ```
///
/// # Manual Implementation
///
/// ```
/// use roster_query::{Number, Queryable, Value};
///
/// struct Lead {
///     company: String,
///     value: Option<u64>,
/// }
///
/// impl Queryable for Lead {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "company" => Value::Text(&self.company),
///             "value" => self.value.map_or(Value::None, |v| Value::Number(Number::from(v))),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Queryable {
    /// Returns the value of a field, or [`Value::None`] if the field does not
    /// exist or holds nothing.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Returns a static accessor function suitable for
    /// [`evaluate_with`](crate::evaluate_with).
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field_value(field)
    }
}

/// Conversion from a struct field to a comparison [`Value`].
///
/// Implemented for strings, numbers, dates, booleans, [`Scalar`], and
/// `Option`s of each. `None` maps to [`Value::None`].
pub trait AsValue {
    /// Borrows `self` as a [`Value`].
    fn as_value(&self) -> Value<'_>;
}

impl AsValue for String {
    fn as_value(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl AsValue for str {
    fn as_value(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl AsValue for &str {
    fn as_value(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl AsValue for NaiveDate {
    fn as_value(&self) -> Value<'_> {
        Value::Date(*self)
    }
}

impl AsValue for bool {
    fn as_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl AsValue for Number {
    fn as_value(&self) -> Value<'_> {
        Value::Number(*self)
    }
}

impl AsValue for Scalar {
    fn as_value(&self) -> Value<'_> {
        Scalar::as_value(self)
    }
}

macro_rules! as_value_number {
    ($($source:ty),*) => {
        $(
            impl AsValue for $source {
                fn as_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

as_value_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.as_value(),
            None => Value::None,
        }
    }
}
