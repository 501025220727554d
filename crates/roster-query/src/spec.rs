//! The query specification value object.
//!
//! A [`QuerySpec`] captures what the user currently wants to see: search
//! text, the fields that text is matched against, the active facet
//! selections, and the sort. It never refers to records, so it can be
//! compared, cloned, and stored as remembered filters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::facet::Selection;
use crate::ordering::SortSpec;
use crate::value::Value;

/// What the user currently wants to see.
///
/// Facet filters are kept in a sorted map and empty selections are never
/// stored, so two specifications that constrain the same things compare
/// equal regardless of the order in which they were built.
///
/// # Example
///
/// ```
/// use roster_query::{QuerySpec, SortSpec};
///
/// let spec = QuerySpec::new()
///     .search("patel")
///     .search_in(["name", "city"])
///     .facet("city", "Durg")
///     .facet_any("category", ["A", "B"])
///     .sort_by(SortSpec::asc("name"))
///     .build();
///
/// assert_eq!(spec.active_facets(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    search_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    search_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    facet_filters: BTreeMap<String, Selection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sort: Option<SortSpec>,
}

impl QuerySpec {
    /// Creates an empty specification, which matches every record in
    /// collection order.
    pub fn new() -> Self {
        QuerySpec::default()
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Sets the search text.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Sets the fields the search text is matched against, in order.
    pub fn search_in<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Requires `field` to equal `value`.
    pub fn facet(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_selection(field, Selection::one(value))
    }

    /// Requires `field` to equal any of `values`.
    pub fn facet_any<I, S>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_selection(field, Selection::any(values))
    }

    /// Applies a selection to `field`. Empty selections clear the facet.
    pub fn with_selection(mut self, field: impl Into<String>, selection: Selection) -> Self {
        self.set_facet(field, selection);
        self
    }

    /// Sets the sort.
    pub fn sort_by(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Finalizes the specification.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Mutation (screens merging committed control changes)
    // ========================================================================

    /// Replaces the search text. Returns `true` if it changed.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.search_text == text {
            return false;
        }
        self.search_text = text;
        true
    }

    /// Replaces the search fields.
    pub fn set_search_fields<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
    }

    /// Sets or clears the selection for `field`. Returns `true` if the
    /// specification changed.
    pub fn set_facet(&mut self, field: impl Into<String>, selection: Selection) -> bool {
        let field = field.into();
        if selection.is_empty() {
            return self.facet_filters.remove(&field).is_some();
        }
        if self.facet_filters.get(&field) == Some(&selection) {
            return false;
        }
        self.facet_filters.insert(field, selection);
        true
    }

    /// Removes the selection for `field`. Returns `true` if one was present.
    pub fn clear_facet(&mut self, field: &str) -> bool {
        self.facet_filters.remove(field).is_some()
    }

    /// Removes every facet selection.
    pub fn clear_facets(&mut self) {
        self.facet_filters.clear();
    }

    /// Replaces the sort. Returns `true` if it changed.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> bool {
        if self.sort == sort {
            return false;
        }
        self.sort = sort;
        true
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// The search text as entered.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Fields searched, in order.
    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// The selection for one facet, if any.
    pub fn selection(&self, field: &str) -> Option<&Selection> {
        self.facet_filters.get(field)
    }

    /// Active facet selections in field-name order.
    pub fn facet_filters(&self) -> impl Iterator<Item = (&str, &Selection)> {
        self.facet_filters.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of facets currently constraining results.
    pub fn active_facets(&self) -> usize {
        self.facet_filters.len()
    }

    /// The active sort, if any.
    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Returns `true` if neither search nor facets constrain results.
    pub fn is_unconstrained(&self) -> bool {
        self.search_text.is_empty() && self.facet_filters.is_empty()
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Tests one record against search and facets (sorting aside).
    pub fn matches<T, F>(&self, item: &T, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        let matcher = Matcher::new(self);
        matcher.search(item, &accessor) && matcher.facets(item, &accessor, None)
    }

    /// Counts records that pass search and facets.
    pub fn count<T, F>(&self, items: &[T], accessor: F) -> usize
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        let matcher = Matcher::new(self);
        items
            .iter()
            .filter(|item| matcher.search(*item, &accessor) && matcher.facets(*item, &accessor, None))
            .count()
    }

    // ========================================================================
    // Persistence helpers
    // ========================================================================

    /// Encodes the specification as JSON, e.g. for remembered filters.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a specification previously produced by [`to_json`](Self::to_json).
    ///
    /// Empty selections in the input are dropped.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut spec: QuerySpec = serde_json::from_str(json)?;
        spec.facet_filters.retain(|_, selection| !selection.is_empty());
        Ok(spec)
    }
}

/// Case folding used by search: each character is lower-cased on its own,
/// so folding a longer string always yields an extension of folding its
/// prefix.
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Search and facet predicates of one specification, with the search term
/// folded once.
pub(crate) struct Matcher<'s> {
    spec: &'s QuerySpec,
    needle: Option<String>,
}

impl<'s> Matcher<'s> {
    pub(crate) fn new(spec: &'s QuerySpec) -> Self {
        let needle = (!spec.search_text.is_empty()).then(|| fold_case(&spec.search_text));
        Matcher { spec, needle }
    }

    /// Search stage: any declared search field contains the term.
    pub(crate) fn search<T, F>(&self, item: &T, accessor: &F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        let Some(needle) = &self.needle else {
            return true;
        };
        self.spec.search_fields.iter().any(|field| {
            accessor(item, field)
                .to_text()
                .is_some_and(|text| fold_case(&text).contains(needle.as_str()))
        })
    }

    /// Facet stage: every active selection accepts the record, optionally
    /// ignoring one facet.
    pub(crate) fn facets<T, F>(&self, item: &T, accessor: &F, skip: Option<&str>) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.spec
            .facet_filters
            .iter()
            .filter(|(field, _)| Some(field.as_str()) != skip)
            .all(|(field, selection)| selection.accepts(&accessor(item, field)))
    }
}
