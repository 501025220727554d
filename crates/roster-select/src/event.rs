//! Change notifications emitted by selectors.

use serde::Serialize;

use crate::value::SelectorValue;

/// A committed value change, reported upward to the owning screen.
///
/// Selectors only emit an event when the committed value actually changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorEvent {
    /// Field the selector controls.
    pub field: String,
    /// The new committed value.
    pub value: SelectorValue,
    /// What caused the commit.
    pub cause: CommitCause,
}

/// The transition that produced a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitCause {
    /// An option was picked, or search text was typed.
    Pick,
    /// A selected item was removed.
    Remove,
    /// The value was cleared.
    Clear,
    /// Closing without a pick restored the value captured on open.
    Restore,
}

impl std::fmt::Display for CommitCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pick => write!(f, "pick"),
            Self::Remove => write!(f, "remove"),
            Self::Clear => write!(f, "clear"),
            Self::Restore => write!(f, "restore"),
        }
    }
}
