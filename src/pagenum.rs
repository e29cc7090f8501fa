//! Page numbers from page-marker ids.

/// Parse the page number out of a page-marker id.
///
/// A trailing run of digits wins (`"page012"` is page `"12"`). Failing that,
/// an id starting with `p` names the page by the rest of the id, lowercased,
/// which covers roman-numeral front matter (`"pXVII"` is page `"xvii"`).
/// Anything else is logged and yields `None`.
pub fn parse_pagenum(id: &str) -> Option<String> {
    let digits_from = id
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);

    if let Some(from) = digits_from {
        let trimmed = id[from..].trim_start_matches('0');
        return Some(if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        });
    }

    if let Some(rest) = id.strip_prefix('p') {
        return Some(rest.to_lowercase());
    }

    log::warn!("unable to parse page number from {id:?}");
    None
}
