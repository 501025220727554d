//! The selector state machine.
//!
//! A selector is Closed or Open. Opening captures the committed value into
//! `pending`; picking while open marks the open as "picked". Closing an open
//! without a pick, while the committed value is empty, restores `pending`.
//! Every change of the committed value goes through one commit path, which
//! reports it as a [`SelectorEvent`].
//!
//! ```text
//!            open (capture pending)
//!   Closed ─────────────────────────▶ Open ──┐ pick (multi), type, remove, clear
//!     ▲                                │ ◀───┘
//!     │  close (restore if no pick     │
//!     └───── and value is empty) ◀─────┤
//!     └───────── pick (single) ◀───────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::event::{CommitCause, SelectorEvent};
use crate::presentation::{label_mode, LabelMode};
use crate::value::{SelectOption, SelectorValue};

/// Selector variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    /// Pick one option; picking closes the dropdown.
    Single,
    /// Toggle any number of options; the dropdown stays open.
    Multi,
    /// Free text; typing commits.
    Search,
}

/// Whether the dropdown (or text input) is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Closed,
    Open,
}

/// One user interaction, as delivered by a UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorInput {
    /// Focus the control.
    Open,
    /// Tap on the control: opens when closed, closes when open.
    Press,
    /// Choose an option by value.
    Pick(String),
    /// Remove one selected item.
    Remove(String),
    /// Text typed into the control. Search selectors commit it; dropdowns
    /// use it to narrow their options.
    Type(String),
    /// The clear affordance.
    Clear,
    /// Blur or dismiss.
    Close,
}

/// A single, multi or search selector control.
///
/// # Example
///
/// ```
/// use roster_select::{CommitCause, SelectOption, Selector, SelectorValue};
///
/// let mut city = Selector::single("city")
///     .with_label("City")
///     .with_options(["Raipur", "Durg"].map(SelectOption::plain))
///     .with_value("Durg");
///
/// city.open();
/// city.clear();
/// // Dismissed without picking: the value captured on open comes back.
/// let event = city.close().unwrap();
/// assert_eq!(event.cause, CommitCause::Restore);
/// assert_eq!(city.value(), &SelectorValue::from("Durg"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    field: String,
    kind: SelectorKind,
    label: String,
    placeholder: String,
    options: Vec<SelectOption>,
    committed: SelectorValue,
    pending: SelectorValue,
    phase: Phase,
    picked: bool,
    option_filter: String,
}

impl Selector {
    pub fn new(field: impl Into<String>, kind: SelectorKind) -> Self {
        let field = field.into();
        Selector {
            label: field.clone(),
            field,
            kind,
            placeholder: String::new(),
            options: Vec::new(),
            committed: SelectorValue::Unset,
            pending: SelectorValue::Unset,
            phase: Phase::Closed,
            picked: false,
            option_filter: String::new(),
        }
    }

    pub fn single(field: impl Into<String>) -> Self {
        Self::new(field, SelectorKind::Single)
    }

    pub fn multi(field: impl Into<String>) -> Self {
        Self::new(field, SelectorKind::Multi)
    }

    pub fn search(field: impl Into<String>) -> Self {
        Self::new(field, SelectorKind::Search)
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_option(mut self, option: SelectOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = SelectOption>) -> Self {
        self.options.extend(options);
        self
    }

    /// Sets the initial committed value without emitting an event.
    pub fn with_value(mut self, value: impl Into<SelectorValue>) -> Self {
        self.set_value(value);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> SelectorKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Text shown when nothing is selected; falls back to the label.
    pub fn placeholder(&self) -> &str {
        if self.placeholder.is_empty() {
            &self.label
        } else {
            &self.placeholder
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// The committed value.
    pub fn value(&self) -> &SelectorValue {
        &self.committed
    }

    /// The value captured when the control opened. Only set while open;
    /// reads [`SelectorValue::Unset`] once the control closes.
    pub fn pending(&self) -> &SelectorValue {
        &self.pending
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    pub fn option_filter(&self) -> &str {
        &self.option_filter
    }

    /// The option carrying `value`.
    pub fn find_option(&self, value: &str) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Options whose label contains the current option filter,
    /// case-insensitively.
    pub fn visible_options(&self) -> Vec<&SelectOption> {
        if self.option_filter.is_empty() {
            return self.options.iter().collect();
        }
        let needle = self.option_filter.to_lowercase();
        self.options
            .iter()
            .filter(|o| o.label.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn label_mode(&self) -> LabelMode {
        label_mode(&self.committed, self.is_open())
    }

    /// Labels of the selected options joined by commas, or the placeholder.
    pub fn display_text(&self) -> String {
        let labels: Vec<&str> = self
            .committed
            .values()
            .into_iter()
            .map(|v| self.find_option(v).map_or(v, |o| o.label.as_str()))
            .collect();
        if labels.is_empty() {
            self.placeholder().to_string()
        } else {
            labels.join(", ")
        }
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Routes one input to its transition.
    pub fn handle(&mut self, input: SelectorInput) -> Option<SelectorEvent> {
        match input {
            SelectorInput::Open => {
                self.open();
                None
            }
            SelectorInput::Press => self.press(),
            SelectorInput::Pick(value) => self.pick(&value),
            SelectorInput::Remove(value) => self.remove(&value),
            SelectorInput::Type(text) => match self.kind {
                SelectorKind::Search => self.set_text(&text),
                SelectorKind::Single | SelectorKind::Multi => {
                    self.set_option_filter(&text);
                    None
                }
            },
            SelectorInput::Clear => self.clear(),
            SelectorInput::Close => self.close(),
        }
    }

    /// Closed → Open, capturing the committed value. No-op when open.
    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.phase = Phase::Open;
        self.pending = self.committed.clone();
        self.picked = false;
        self.option_filter.clear();
        tracing::trace!(field = %self.field, "selector opened");
    }

    /// Open → Closed. Restores the captured value if nothing was picked
    /// during this open and the committed value is empty. No-op when closed.
    pub fn close(&mut self) -> Option<SelectorEvent> {
        if !self.is_open() {
            return None;
        }
        let restore = !self.picked && self.committed.is_empty();
        let pending = self.end_open();
        tracing::trace!(field = %self.field, restore, "selector closed");
        if restore {
            self.commit(pending, CommitCause::Restore)
        } else {
            None
        }
    }

    /// Toggles the open state.
    pub fn press(&mut self) -> Option<SelectorEvent> {
        if self.is_open() {
            self.close()
        } else {
            self.open();
            None
        }
    }

    /// Picks an option by value.
    ///
    /// Single selectors take the value and close; multi selectors toggle it
    /// and stay open (the empty "All" option clears them). Search selectors
    /// treat the value as typed text. Values that are not options are
    /// ignored. A pick arriving while closed commits directly.
    pub fn pick(&mut self, value: &str) -> Option<SelectorEvent> {
        let next = match self.kind {
            SelectorKind::Search => return self.set_text(value),
            _ if self.find_option(value).is_none() => {
                tracing::trace!(field = %self.field, value, "ignoring pick of unknown option");
                return None;
            }
            SelectorKind::Single => SelectorValue::One(value.to_string()),
            SelectorKind::Multi => self.toggled(value),
        };
        if self.is_open() {
            self.picked = true;
            if self.kind == SelectorKind::Single {
                self.end_open();
            }
        }
        self.commit(next, CommitCause::Pick)
    }

    /// Removes one selected item through the commit path.
    pub fn remove(&mut self, value: &str) -> Option<SelectorEvent> {
        if value.is_empty() || !self.committed.contains(value) {
            return None;
        }
        let next = match &self.committed {
            SelectorValue::Many(values) => {
                SelectorValue::Many(values.iter().filter(|v| *v != value).cloned().collect())
            }
            _ => SelectorValue::Unset,
        };
        if self.is_open() {
            self.picked = true;
        }
        self.commit(next, CommitCause::Remove)
    }

    /// Sets the text of a search selector. Ignored by dropdowns.
    pub fn set_text(&mut self, text: &str) -> Option<SelectorEvent> {
        if self.kind != SelectorKind::Search {
            return None;
        }
        if self.is_open() {
            self.picked = true;
        }
        self.commit(SelectorValue::One(text.to_string()), CommitCause::Pick)
    }

    /// Empties the committed value. Not a pick: closing afterwards restores.
    pub fn clear(&mut self) -> Option<SelectorEvent> {
        self.commit(SelectorValue::Unset, CommitCause::Clear)
    }

    /// Narrows the visible options while open. Ignored when closed.
    pub fn set_option_filter(&mut self, text: &str) {
        if self.is_open() {
            self.option_filter = text.to_string();
        }
    }

    /// Replaces the committed value without emitting an event, for syncing
    /// the control to state restored elsewhere. Returns whether it changed.
    pub fn set_value(&mut self, value: impl Into<SelectorValue>) -> bool {
        let next = self.conform(value.into());
        if next == self.committed {
            return false;
        }
        self.committed = next;
        true
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn end_open(&mut self) -> SelectorValue {
        self.phase = Phase::Closed;
        self.option_filter.clear();
        std::mem::take(&mut self.pending)
    }

    fn commit(&mut self, next: SelectorValue, cause: CommitCause) -> Option<SelectorEvent> {
        let next = self.conform(next);
        if next == self.committed {
            return None;
        }
        self.committed = next.clone();
        tracing::debug!(field = %self.field, %cause, "selector committed");
        Some(SelectorEvent {
            field: self.field.clone(),
            value: next,
            cause,
        })
    }

    fn toggled(&self, value: &str) -> SelectorValue {
        if value.is_empty() {
            return SelectorValue::Unset;
        }
        let mut values: Vec<String> = self
            .committed
            .values()
            .into_iter()
            .map(str::to_string)
            .collect();
        match values.iter().position(|v| v == value) {
            Some(i) => {
                values.remove(i);
            }
            None => values.push(value.to_string()),
        }
        SelectorValue::Many(values)
    }

    /// Shapes a value for this selector's kind: multi values become a list
    /// in option order without duplicates, empties become `Unset`.
    fn conform(&self, value: SelectorValue) -> SelectorValue {
        let value = match (self.kind, value) {
            (SelectorKind::Multi, SelectorValue::One(s)) => SelectorValue::Many(vec![s]),
            (SelectorKind::Multi, SelectorValue::Many(mut values)) => {
                values.retain(|v| !v.is_empty());
                let mut unique: Vec<String> = Vec::with_capacity(values.len());
                for v in values {
                    if !unique.contains(&v) {
                        unique.push(v);
                    }
                }
                unique.sort_by_key(|v| self.option_index(v));
                SelectorValue::Many(unique)
            }
            (_, SelectorValue::Many(values)) => values
                .into_iter()
                .find(|v| !v.is_empty())
                .map_or(SelectorValue::Unset, SelectorValue::One),
            (_, value) => value,
        };
        value.normalized()
    }

    fn option_index(&self, value: &str) -> usize {
        self.options
            .iter()
            .position(|o| o.value == value)
            .unwrap_or(usize::MAX)
    }
}
