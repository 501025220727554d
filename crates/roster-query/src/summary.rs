//! Facet counts for summary tiles.
//!
//! Each facet is counted over the records that pass the search term and
//! every *other* active facet. A facet's own selection never changes its own
//! tiles, so tapping a tile to filter leaves the tile row intact.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::facet::FacetDefinition;
use crate::spec::Matcher;
use crate::value::Value;

/// Count of records for one facet option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub label: String,
    pub value: String,
    pub count: usize,
}

/// Counts for every declared option of one facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetTally {
    /// Field the facet filters on.
    pub field: String,
    /// Records passing search and the other facets. The "All" sentinel
    /// option reports this number.
    pub total: usize,
    /// Per-option counts in declared option order.
    pub counts: Vec<FacetCount>,
}

impl FacetTally {
    fn new(facet: &FacetDefinition) -> Self {
        FacetTally {
            field: facet.field.clone(),
            total: 0,
            counts: facet
                .options
                .iter()
                .map(|o| FacetCount {
                    label: o.label.clone(),
                    value: o.value.clone(),
                    count: 0,
                })
                .collect(),
        }
    }

    fn add(&mut self, value: &Value<'_>) {
        self.total += 1;
        let Some(text) = value.to_text() else {
            return;
        };
        for count in self.counts.iter_mut() {
            if !count.value.is_empty() && count.value == text {
                count.count += 1;
            }
        }
    }

    fn finish(mut self) -> Self {
        let total = self.total;
        for count in self.counts.iter_mut().filter(|c| c.value.is_empty()) {
            count.count = total;
        }
        self
    }

    /// The count for one option value, if the option is declared.
    pub fn count(&self, value: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|c| c.value == value)
            .map(|c| c.count)
    }
}

/// Facet counts keyed by facet field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Summary {
    facets: BTreeMap<String, FacetTally>,
}

impl Summary {
    /// The tally for one facet.
    pub fn get(&self, field: &str) -> Option<&FacetTally> {
        self.facets.get(field)
    }

    /// Shorthand for `get(field)?.count(value)`.
    pub fn count(&self, field: &str, value: &str) -> Option<usize> {
        self.get(field)?.count(value)
    }

    /// Tallies in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = &FacetTally> {
        self.facets.values()
    }

    /// Number of facets counted.
    pub fn len(&self) -> usize {
        self.facets.len()
    }

    /// Returns `true` if no facets were counted.
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

/// Summary stage. `searched[i]` is the search-stage verdict for `records[i]`.
pub(crate) fn summarize<T, F>(
    records: &[T],
    searched: &[bool],
    matcher: &Matcher<'_>,
    facets: &[FacetDefinition],
    accessor: &F,
) -> Summary
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    let mut summary = Summary::default();
    for facet in facets {
        let mut tally = FacetTally::new(facet);
        for (record, _) in records
            .iter()
            .zip(searched)
            .filter(|(_, passed)| **passed)
        {
            if matcher.facets(record, accessor, Some(&facet.field)) {
                tally.add(&accessor(record, &facet.field));
            }
        }
        summary.facets.insert(facet.field.clone(), tally.finish());
    }
    summary
}
