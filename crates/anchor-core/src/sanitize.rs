/// Sanitization mode. The two variants share the same pipeline; `Identifier`
/// additionally guarantees the result is usable as an HTML/CSS id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// General URL-fragment safety.
    Anchor,
    /// CSS identifiers may not begin with a digit; results that do are
    /// prefixed with [`IDENTIFIER_PREFIX`].
    Identifier,
}

/// Prefix applied in [`Mode::Identifier`] when the sanitized value starts
/// with an ASCII digit.
pub const IDENTIFIER_PREFIX: &str = "anchor-";

/// Sanitize a raw anchor string for use as a URL fragment.
///
/// Returns `None` when the input degrades to nothing. Never fails; case is
/// preserved.
pub fn sanitize(input: &str) -> Option<String> {
    sanitize_with(input, Mode::Anchor)
}

/// Sanitize a raw anchor string for use as an HTML/CSS identifier.
pub fn sanitize_identifier(input: &str) -> Option<String> {
    sanitize_with(input, Mode::Identifier)
}

/// Shared sanitization pipeline. Steps, in order:
///
/// 1. trim surrounding whitespace
/// 2. cut at the first `?`, `/` or `\` — query strings and path segments
///    must not ride along in an anchor field
/// 3. map whitespace to `-`
/// 4. drop every character outside `[A-Za-z0-9_-]`
/// 5. collapse hyphen runs, trim hyphens from both ends
/// 6. empty result becomes `None`
pub fn sanitize_with(input: &str, mode: Mode) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let head = trimmed
        .split(['?', '/', '\\'])
        .next()
        .unwrap_or_default();

    let mut cleaned = String::with_capacity(head.len());
    let mut last_was_hyphen = false;
    for ch in head.chars() {
        let mapped = if ch.is_whitespace() {
            '-'
        } else if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            ch
        } else {
            // Dropped characters do not break a hyphen run: `a-!-b`
            // collapses to `a-b`.
            continue;
        };

        if mapped == '-' {
            if last_was_hyphen {
                continue;
            }
            last_was_hyphen = true;
        } else {
            last_was_hyphen = false;
        }
        cleaned.push(mapped);
    }

    let cleaned = cleaned.trim_matches('-');
    if cleaned.is_empty() {
        return None;
    }

    match mode {
        Mode::Anchor => Some(cleaned.to_string()),
        Mode::Identifier => {
            if cleaned.starts_with(|ch: char| ch.is_ascii_digit()) {
                Some(format!("{IDENTIFIER_PREFIX}{cleaned}"))
            } else {
                Some(cleaned.to_string())
            }
        }
    }
}
