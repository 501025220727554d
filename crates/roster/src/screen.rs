//! The roster screen controller.
//!
//! A [`RosterScreen`] owns a record collection, the current [`QuerySpec`] and
//! one selector per control. Input is routed to a control; when the control
//! commits a change, the screen merges it into the spec and re-evaluates.
//!
//! ```text
//! SelectorInput ─▶ Selector ─▶ SelectorEvent ─▶ QuerySpec ─▶ evaluate ─▶ rows + tiles
//! ```

use std::fmt;

use roster_query::{
    evaluate, EvaluateOptions, FacetDefinition, QuerySpec, Queryable, Selection, SortOption,
    Summary,
};
use roster_select::{Selector, SelectorEvent, SelectorInput, SelectorValue};

use crate::config::RosterConfig;
use crate::error::{Result, RosterError};

/// A control on a roster screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Control {
    /// The search box.
    Search,
    /// The "Sort by" dropdown.
    Sort,
    /// The dropdown of the facet on this field.
    Facet(String),
}

impl Control {
    pub fn facet(field: impl Into<String>) -> Self {
        Control::Facet(field.into())
    }
}

impl From<&str> for Control {
    /// `"search"` and `"sort"` name the fixed controls; anything else is a
    /// facet field.
    fn from(name: &str) -> Self {
        match name {
            "search" => Control::Search,
            "sort" => Control::Sort,
            field => Control::Facet(field.to_string()),
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::Search => write!(f, "search"),
            Control::Sort => write!(f, "sort"),
            Control::Facet(field) => write!(f, "facet:{}", field),
        }
    }
}

/// A searchable, faceted, sortable list screen over records of type `T`.
///
/// The result view is recomputed only when the spec or the collection
/// changes, never on read.
///
/// # Example
///
/// ```
/// use roster::{Control, RosterConfig, RosterScreen};
/// use roster::query::Record;
/// use roster::select::SelectorInput;
///
/// let config = RosterConfig::from_yaml(r#"
/// search_fields: [name]
/// facets:
///   - { field: city, options: [{ label: Durg, value: Durg }, { label: Raipur, value: Raipur }] }
/// "#).unwrap();
///
/// let mut screen = RosterScreen::from_config(&config, vec![
///     Record::new().with("name", "Dr. Ravi Patel").with("city", "Durg"),
///     Record::new().with("name", "Dr. Anil Verma").with("city", "Raipur"),
/// ]);
///
/// let changed = screen.handle(&Control::facet("city"), SelectorInput::Pick("Durg".into())).unwrap();
/// assert!(changed);
/// assert_eq!(screen.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RosterScreen<T> {
    records: Vec<T>,
    config: RosterConfig,
    spec: QuerySpec,
    options: EvaluateOptions,
    search: Selector,
    sort: Selector,
    facets: Vec<Selector>,
    positions: Vec<usize>,
    summary: Option<Summary>,
}

impl<T: Queryable> RosterScreen<T> {
    /// Builds a screen from a validated configuration.
    pub fn from_config(config: &RosterConfig, records: Vec<T>) -> Self {
        let mut screen = RosterScreen {
            records,
            spec: config.initial_spec(),
            options: config.evaluate_options(),
            search: config.search_selector(),
            sort: config.sort_selector(),
            facets: config.facet_selectors(),
            config: config.clone(),
            positions: Vec::new(),
            summary: None,
        };
        screen.refresh();
        screen
    }

    // ========================================================================
    // Record source
    // ========================================================================

    /// Replaces the whole collection, e.g. after the record source reloads.
    pub fn replace_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.refresh();
    }

    /// Appends a record.
    pub fn push_record(&mut self, record: T) {
        self.records.push(record);
        self.refresh();
    }

    /// Removes the record at a collection index.
    pub fn remove_record(&mut self, index: usize) -> Option<T> {
        if index >= self.records.len() {
            return None;
        }
        let removed = self.records.remove(index);
        self.refresh();
        Some(removed)
    }

    /// Replaces the record at a collection index, returning the old one.
    pub fn update_record(&mut self, index: usize, record: T) -> Option<T> {
        let slot = self.records.get_mut(index)?;
        let old = std::mem::replace(slot, record);
        self.refresh();
        Some(old)
    }

    // ========================================================================
    // Controls
    // ========================================================================

    /// Routes one input to a control. Returns `true` if the spec changed.
    pub fn handle(&mut self, control: &Control, input: SelectorInput) -> Result<bool> {
        let selector = self
            .selector_mut(control)
            .ok_or_else(|| RosterError::UnknownControl(control.to_string()))?;
        let Some(event) = selector.handle(input) else {
            return Ok(false);
        };
        let changed = self.apply(control, &event);
        tracing::debug!(%control, cause = %event.cause, changed, "control committed");
        if changed {
            self.refresh();
        }
        Ok(changed)
    }

    /// A summary tile tapped as a filter shortcut: picks `value` on the
    /// facet's dropdown.
    pub fn tap_tile(&mut self, field: &str, value: &str) -> Result<bool> {
        self.handle(&Control::facet(field), SelectorInput::Pick(value.to_string()))
    }

    /// Applies a remembered spec and syncs every control to it. Search
    /// fields come from the configuration when the remembered spec has none.
    /// Facet selections are reshaped to what each control can hold: one
    /// value for a single-select facet, declared options only.
    /// Returns `true` if the spec changed.
    pub fn restore_spec(&mut self, spec: QuerySpec) -> bool {
        let mut spec = spec;
        if spec.search_fields().is_empty() {
            spec.set_search_fields(self.spec.search_fields().iter().cloned());
        }

        self.search.set_value(spec.search_text());
        let sort_label = spec
            .sort()
            .and_then(|sort| self.config.sort_option_for(sort))
            .map(|o| o.label.clone());
        self.sort.set_value(sort_label.unwrap_or_default());
        for selector in &mut self.facets {
            let value = spec
                .selection(selector.field())
                .map_or(SelectorValue::Unset, |selection| declared_value(selector, selection));
            selector.set_value(value);
            spec.set_facet(selector.field(), value_selection(selector.value()));
        }

        if spec == self.spec {
            return false;
        }
        self.spec = spec;
        self.refresh();
        true
    }

    fn apply(&mut self, control: &Control, event: &SelectorEvent) -> bool {
        match control {
            Control::Search => self
                .spec
                .set_search_text(event.value.as_one().unwrap_or_default()),
            Control::Sort => {
                let sort = event
                    .value
                    .as_one()
                    .and_then(|label| self.config.sort_option(label))
                    .map(|o| o.sort.clone());
                self.spec.set_sort(sort)
            }
            Control::Facet(field) => self
                .spec
                .set_facet(field.clone(), value_selection(&event.value)),
        }
    }

    fn refresh(&mut self) {
        let view = evaluate(&self.records, &self.spec, &self.config.facets, self.options);
        self.positions = view.positions;
        self.summary = view.summary;
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Matching records in display order.
    pub fn results(&self) -> Vec<&T> {
        self.positions.iter().map(|&i| &self.records[i]).collect()
    }

    /// Collection index of each result.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Facet counts, when the configuration asks for them.
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    /// The record behind a tapped row, with its collection index, for
    /// handing off to a detail screen.
    pub fn tap(&self, row: usize) -> Option<(usize, &T)> {
        let index = *self.positions.get(row)?;
        Some((index, self.records.get(index)?))
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn facets(&self) -> &[FacetDefinition] {
        &self.config.facets
    }

    pub fn sort_options(&self) -> &[SortOption] {
        &self.config.sort_options
    }

    /// The selector behind a control.
    pub fn selector(&self, control: &Control) -> Option<&Selector> {
        match control {
            Control::Search => Some(&self.search),
            Control::Sort => Some(&self.sort),
            Control::Facet(field) => self.facets.iter().find(|s| s.field() == field),
        }
    }

    fn selector_mut(&mut self, control: &Control) -> Option<&mut Selector> {
        match control {
            Control::Search => Some(&mut self.search),
            Control::Sort => Some(&mut self.sort),
            Control::Facet(field) => self.facets.iter_mut().find(|s| s.field() == field),
        }
    }
}

/// The selector value for a remembered selection, keeping declared options.
fn declared_value(selector: &Selector, selection: &Selection) -> SelectorValue {
    let values: Vec<String> = selection
        .values()
        .filter(|v| selector.find_option(v).is_some())
        .map(String::from)
        .collect();
    SelectorValue::Many(values)
}

fn value_selection(value: &SelectorValue) -> Selection {
    match value {
        SelectorValue::Unset => Selection::Any(Vec::new()),
        SelectorValue::One(value) => Selection::One(value.clone()),
        SelectorValue::Many(values) => Selection::Any(values.clone()),
    }
}
