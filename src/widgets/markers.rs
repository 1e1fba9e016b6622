//! DOM marker contract: which attributes/classes activate which behavior.

#[cfg(test)]
#[path = "markers_test.rs"]
mod markers_test;

/// Class applied to a `.needs-validation` form after a submit attempt.
pub const VALIDATED_CLASS: &str = "was-validated";

/// Attribute carrying a confirmation prompt.
pub const CONFIRM_ATTRIBUTE: &str = "data-confirm";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    Tooltip,
    Confirm,
    Validation,
    AutoSave,
    AmbientAlert,
}

impl Marker {
    pub const ALL: [Self; 5] = [Self::Tooltip, Self::Confirm, Self::Validation, Self::AutoSave, Self::AmbientAlert];

    pub fn name(self) -> &'static str {
        match self {
            Self::Tooltip => "tooltip",
            Self::Confirm => "confirm",
            Self::Validation => "validation",
            Self::AutoSave => "autosave",
            Self::AmbientAlert => "alert",
        }
    }

    /// CSS selector matching the elements this marker activates.
    pub fn selector(self) -> &'static str {
        match self {
            Self::Tooltip => r#"[data-bs-toggle="tooltip"]"#,
            Self::Confirm => "[data-confirm]",
            Self::Validation => ".needs-validation",
            Self::AutoSave => "[data-autosave]",
            Self::AmbientAlert => ".alert:not(.alert-permanent)",
        }
    }

    /// Attribute stamped on an element once its behavior is attached.
    pub fn bound_attribute(self) -> &'static str {
        match self {
            Self::Tooltip => "data-pk-tooltip",
            Self::Confirm => "data-pk-confirm",
            Self::Validation => "data-pk-validation",
            Self::AutoSave => "data-pk-autosave",
            Self::AmbientAlert => "data-pk-alert",
        }
    }
}

/// Prompt for a `data-confirm` element; an empty attribute uses `fallback`.
pub fn confirm_message(attribute: Option<&str>, fallback: &str) -> String {
    match attribute.map(str::trim).filter(|a| !a.is_empty()) {
        Some(text) => text.to_owned(),
        None => fallback.to_owned(),
    }
}
