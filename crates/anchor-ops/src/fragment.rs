use percent_encoding::percent_decode_str;

/// The percent-decoded fragment of a URL, trimmed. Case is preserved;
/// anchors in this domain are case-sensitive. Returns `None` for URLs
/// without a fragment or with an empty one.
pub fn existing_fragment(url: &str) -> Option<String> {
    let (_, fragment) = url.split_once('#')?;
    let decoded = percent_decode_str(fragment).decode_utf8_lossy();
    let trimmed = decoded.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
