use anchor_core::{sanitize_with, Mode};
use anchor_config::Config;

/// Sanitization policy applied at the trust boundary: the core pipeline
/// plus an optional length cap from configuration.
#[derive(Debug, Clone, Copy)]
pub struct AnchorPolicy {
    mode: Mode,
    max_length: Option<usize>,
}

impl AnchorPolicy {
    pub fn new(mode: Mode) -> Self {
        AnchorPolicy {
            mode,
            max_length: None,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn from_config(mode: Mode, config: &Config) -> Self {
        AnchorPolicy {
            mode,
            max_length: config.sanitize.max_length,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Sanitize `raw` and enforce the length cap. The cut never leaves a
    /// trailing hyphen; a value that truncates to nothing degrades to
    /// `None` like any other unusable input.
    pub fn apply(&self, raw: &str) -> Option<String> {
        let value = sanitize_with(raw, self.mode)?;
        match self.max_length {
            Some(max) if value.len() > max => {
                // Sanitized output is pure ASCII, so byte slicing is safe.
                let cut = value[..max].trim_end_matches('-');
                if cut.is_empty() {
                    None
                } else {
                    Some(cut.to_string())
                }
            }
            _ => Some(value),
        }
    }
}

impl Default for AnchorPolicy {
    fn default() -> Self {
        AnchorPolicy::new(Mode::Anchor)
    }
}
