//! Rendering contract for selector labels.

use serde::Serialize;

use crate::value::SelectorValue;

/// Where the field label is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    /// Label shrinks above the field.
    Floating,
    /// Label sits inside the empty field.
    Placeholder,
}

/// The label mode for a committed value and open state.
///
/// Depends on nothing else, so renderers can compute it without touching
/// the selector itself.
pub fn label_mode(value: &SelectorValue, is_open: bool) -> LabelMode {
    if is_open || !value.is_empty() {
        LabelMode::Floating
    } else {
        LabelMode::Placeholder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floating_when_open_or_filled() {
        assert_eq!(label_mode(&SelectorValue::Unset, false), LabelMode::Placeholder);
        assert_eq!(label_mode(&SelectorValue::Unset, true), LabelMode::Floating);
        assert_eq!(label_mode(&SelectorValue::from("Durg"), false), LabelMode::Floating);
        assert_eq!(
            label_mode(&SelectorValue::Many(vec![]), false),
            LabelMode::Placeholder
        );
    }
}
