//! Declarative screen configuration.
//!
//! A roster screen is described by its search fields, its facets and its
//! enumerated sort options, loaded from YAML or JSON:
//!
//! ```yaml
//! search_fields: [name, city]
//! facets:
//!   - field: city
//!     label: City
//!     mode: single
//!     options: [{ label: All, value: "" }, { label: Durg, value: Durg }]
//! sort_options:
//!   - { label: "Name (A-Z)", field: name, dir: asc, kind: lexicographic }
//! default_sort: "Name (A-Z)"
//! include_summary: true
//! ```

use std::path::Path;

use roster_query::{
    EvaluateOptions, FacetDefinition, QuerySpec, SelectMode, SortOption, SortSpec,
};
use roster_select::{SelectOption, Selector, SelectorKind};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

fn default_search_placeholder() -> String {
    "Search".to_string()
}

fn default_sort_label() -> String {
    "Sort by".to_string()
}

/// Configuration of one roster screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Fields the search box matches against.
    #[serde(default)]
    pub search_fields: Vec<String>,
    /// Placeholder of the search box.
    #[serde(default = "default_search_placeholder")]
    pub search_placeholder: String,
    /// Facet dropdowns, in display order.
    #[serde(default)]
    pub facets: Vec<FacetDefinition>,
    /// Choices of the "Sort by" control.
    #[serde(default)]
    pub sort_options: Vec<SortOption>,
    /// Label of the "Sort by" control.
    #[serde(default = "default_sort_label")]
    pub sort_label: String,
    /// Label of the sort option applied initially.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<String>,
    /// Whether summary tiles are computed.
    #[serde(default)]
    pub include_summary: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        RosterConfig {
            search_fields: Vec::new(),
            search_placeholder: default_search_placeholder(),
            facets: Vec::new(),
            sort_options: Vec::new(),
            sort_label: default_sort_label(),
            default_sort: None,
            include_summary: false,
        }
    }
}

impl RosterConfig {
    /// Parses and validates a YAML configuration.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: RosterConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RosterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file, choosing the format by extension
    /// (`.yaml`, `.yml` or `.json`).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let content = std::fs::read_to_string(path).map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml(&content)?,
            "json" => Self::from_json(&content)?,
            other => return Err(RosterError::UnsupportedFormat(other.to_string())),
        };
        tracing::debug!(
            path = %path.display(),
            facets = config.facets.len(),
            sort_options = config.sort_options.len(),
            "loaded roster configuration"
        );
        Ok(config)
    }

    /// Checks facets, sort option labels and the default sort.
    pub fn validate(&self) -> Result<()> {
        for (i, facet) in self.facets.iter().enumerate() {
            facet.validate()?;
            if matches!(facet.field.as_str(), "search" | "sort") {
                return Err(RosterError::ReservedFacetField(facet.field.clone()));
            }
            if self.facets[..i].iter().any(|f| f.field == facet.field) {
                return Err(RosterError::DuplicateFacet(facet.field.clone()));
            }
        }
        for (i, option) in self.sort_options.iter().enumerate() {
            if self.sort_options[..i].iter().any(|o| o.label == option.label) {
                return Err(RosterError::DuplicateSortOption(option.label.clone()));
            }
        }
        if let Some(label) = &self.default_sort {
            if self.sort_option(label).is_none() {
                return Err(RosterError::UnknownDefaultSort(label.clone()));
            }
        }
        Ok(())
    }

    /// The sort option with the given label.
    pub fn sort_option(&self, label: &str) -> Option<&SortOption> {
        self.sort_options.iter().find(|o| o.label == label)
    }

    /// The sort option whose sort equals `sort`.
    pub fn sort_option_for(&self, sort: &SortSpec) -> Option<&SortOption> {
        self.sort_options.iter().find(|o| &o.sort == sort)
    }

    /// The spec a freshly opened screen starts with: the search fields and
    /// the default sort, nothing else.
    pub fn initial_spec(&self) -> QuerySpec {
        let mut spec = QuerySpec::new().search_in(self.search_fields.iter().cloned());
        let sort = self
            .default_sort
            .as_deref()
            .and_then(|label| self.sort_option(label))
            .map(|o| o.sort.clone());
        spec.set_sort(sort);
        spec
    }

    pub fn evaluate_options(&self) -> EvaluateOptions {
        EvaluateOptions {
            include_summary: self.include_summary,
        }
    }

    /// The search box.
    pub fn search_selector(&self) -> Selector {
        Selector::search("search").with_placeholder(self.search_placeholder.clone())
    }

    /// The "Sort by" dropdown; option values are sort option labels.
    pub fn sort_selector(&self) -> Selector {
        let selector = Selector::single("sort")
            .with_label(self.sort_label.clone())
            .with_options(self.sort_options.iter().map(|o| SelectOption::plain(o.label.clone())));
        match &self.default_sort {
            Some(label) => selector.with_value(label.as_str()),
            None => selector,
        }
    }

    /// One dropdown per facet, in declared order.
    pub fn facet_selectors(&self) -> Vec<Selector> {
        self.facets.iter().map(facet_selector).collect()
    }
}

/// The dropdown for one facet.
pub fn facet_selector(facet: &FacetDefinition) -> Selector {
    let kind = match facet.mode {
        SelectMode::Single => SelectorKind::Single,
        SelectMode::Multi => SelectorKind::Multi,
    };
    Selector::new(facet.field.clone(), kind)
        .with_label(facet.display_label())
        .with_options(
            facet
                .options
                .iter()
                .map(|o| SelectOption::new(o.label.clone(), o.value.clone())),
        )
}
