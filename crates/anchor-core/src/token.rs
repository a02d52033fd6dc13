use crate::sanitize::{sanitize_with, Mode};

/// Validated anchor value object. The raw input is sanitized at
/// construction and not retained; a token is immutable thereafter and must
/// be rebuilt from scratch if its source value changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorToken {
    value: Option<String>,
}

impl AnchorToken {
    /// Build a token from raw editor input using [`Mode::Anchor`].
    pub fn new(raw: &str) -> Self {
        AnchorToken {
            value: sanitize_with(raw, Mode::Anchor),
        }
    }

    /// Build a token from raw editor input using [`Mode::Identifier`].
    pub fn identifier(raw: &str) -> Self {
        AnchorToken {
            value: sanitize_with(raw, Mode::Identifier),
        }
    }

    /// A token carrying no anchor.
    pub fn absent() -> Self {
        AnchorToken { value: None }
    }

    /// Wrap a value that was sanitized before persistence. Stored values
    /// are trusted and not re-sanitized; debug builds assert canonical
    /// form.
    pub fn from_stored(value: impl Into<String>) -> Self {
        let value = value.into();
        debug_assert!(
            is_canonical(&value),
            "stored anchor '{value}' is not in canonical form"
        );
        if value.is_empty() {
            AnchorToken { value: None }
        } else {
            AnchorToken { value: Some(value) }
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub fn into_value(self) -> Option<String> {
        self.value
    }
}

/// Whether `value` is in the form the sanitizer produces: ASCII letters,
/// digits, hyphens and underscores only, with no hyphen at either end and
/// no doubled hyphen. The empty string is canonical (it denotes absence).
pub fn is_canonical(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    if value.starts_with('-') || value.ends_with('-') || value.contains("--") {
        return false;
    }
    value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}
