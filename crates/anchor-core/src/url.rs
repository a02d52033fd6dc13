use crate::token::AnchorToken;

/// Build the final link URL for a (possibly absent) anchor.
///
/// Without an anchor the original URL passes through untouched — no
/// fragment is added or removed. With one, the base is the live-resolved
/// target permalink when available (so the link survives slug renames),
/// otherwise the original URL minus any pre-existing fragment. The output
/// never carries two `#` fragments.
pub fn build_url(
    anchor: Option<&str>,
    original_url: &str,
    resolved_target_url: Option<&str>,
) -> String {
    let anchor = match anchor {
        Some(anchor) if !anchor.is_empty() => anchor,
        _ => return original_url.to_string(),
    };

    let base = resolved_target_url.unwrap_or_else(|| strip_fragment(original_url));
    format!("{base}#{anchor}")
}

/// Everything before the first `#` of a URL.
pub fn strip_fragment(url: &str) -> &str {
    url.split('#').next().unwrap_or(url)
}

/// Inputs needed to produce a final URL for one link. Derived per menu
/// item or widget link at render time; never persisted.
#[derive(Debug, Clone)]
pub struct AnchorLinkSpec {
    pub token: AnchorToken,
    pub original_url: String,
    pub target_resolved_url: Option<String>,
}

impl AnchorLinkSpec {
    pub fn resolve(&self) -> String {
        build_url(
            self.token.value(),
            &self.original_url,
            self.target_resolved_url.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_anchor_passes_url_through() {
        assert_eq!(
            build_url(None, "https://x/page", None),
            "https://x/page"
        );
        // Even a pre-existing fragment is left alone.
        assert_eq!(
            build_url(None, "https://x/page#old", None),
            "https://x/page#old"
        );
    }

    #[test]
    fn replaces_existing_fragment() {
        assert_eq!(
            build_url(Some("top"), "https://x/page#old", None),
            "https://x/page#top"
        );
    }

    #[test]
    fn prefers_resolved_target_url() {
        assert_eq!(
            build_url(Some("top"), "https://x/page", Some("https://x/new-slug")),
            "https://x/new-slug#top"
        );
    }

    #[test]
    fn never_doubles_fragments() {
        let url = build_url(Some("a"), "https://x/p#b#c", None);
        assert_eq!(url.matches('#').count(), 1);
        assert_eq!(url, "https://x/p#a");
    }

    #[test]
    fn strip_fragment_keeps_base() {
        assert_eq!(strip_fragment("https://x/p#frag"), "https://x/p");
        assert_eq!(strip_fragment("https://x/p"), "https://x/p");
        assert_eq!(strip_fragment("#only"), "");
    }

    #[test]
    fn spec_resolves_through_token() {
        let spec = AnchorLinkSpec {
            token: AnchorToken::new("My Section"),
            original_url: "https://x/page#stale".to_string(),
            target_resolved_url: None,
        };
        assert_eq!(spec.resolve(), "https://x/page#My-Section");
    }
}
