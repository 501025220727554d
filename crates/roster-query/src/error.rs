//! Error types for the roster-query crate.
//!
//! Evaluation itself never fails. These errors come from validating
//! caller-declared facets and from (de)serializing query specifications.

use thiserror::Error;

/// Errors that can occur when declaring facets or loading specifications.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A facet was declared without a field name.
    #[error("facet field name must not be empty")]
    EmptyFacetField,

    /// A facet declares the same option value twice.
    #[error("facet '{field}' declares option value '{value}' more than once")]
    DuplicateFacetOption { field: String, value: String },

    /// A query specification could not be encoded or decoded.
    #[error("invalid query specification: {0}")]
    InvalidSpec(#[from] serde_json::Error),
}

/// Result type for roster-query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
