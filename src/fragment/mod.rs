//! URL fragment <-> tag conversion.
//!
//! Browsers percent-encode whatever is assigned to `location.hash`, so a tag
//! like `rust lang` comes back as `#rust%20lang`. Decoding happens here so
//! the coordinator only ever sees plain tag text.

/// Tag named by a raw `location.hash` value, or `None` for an empty fragment.
pub fn tag_from_fragment(raw: &str) -> Option<String> {
    let raw = raw.strip_prefix('#').unwrap_or(raw);
    if raw.is_empty() {
        return None;
    }

    // Malformed escapes are kept verbatim; the tag then simply isn't found.
    let tag = match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    };
    Some(tag)
}

/// Fragment to write for a selection (without the leading `#`).
pub fn fragment_for_tag(tag: Option<&str>) -> String {
    match tag {
        Some(tag) => urlencoding::encode(tag).into_owned(),
        None => String::new(),
    }
}

/// Whether a label's `href` only points at a fragment of the current page.
/// Following such a link would overwrite the fragment we just wrote.
pub fn is_same_document_link(href: Option<&str>) -> bool {
    href.is_some_and(|h| h.starts_with('#'))
}
