//! Error types for screen configuration and control routing.

use std::path::PathBuf;

use roster_query::QueryError;
use thiserror::Error;

/// Errors raised while loading a screen configuration or driving a screen.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML configuration could not be parsed.
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON configuration or remembered spec could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension names no supported format.
    #[error("unsupported configuration format '{0}' (expected yaml, yml or json)")]
    UnsupportedFormat(String),

    /// `default_sort` names no declared sort option.
    #[error("default sort '{0}' is not one of the declared sort options")]
    UnknownDefaultSort(String),

    /// Two sort options share a label.
    #[error("sort option '{0}' is declared more than once")]
    DuplicateSortOption(String),

    /// A facet field collides with a fixed control name.
    #[error("facet field '{0}' is reserved for the {0} control")]
    ReservedFacetField(String),

    /// Two facets filter the same field.
    #[error("facet '{0}' is declared more than once")]
    DuplicateFacet(String),

    /// Input was routed to a control the screen does not have.
    #[error("unknown control '{0}'")]
    UnknownControl(String),

    /// A facet definition is invalid.
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Result type for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;
