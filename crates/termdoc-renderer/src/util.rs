//! Shared helpers for HTML output.

/// Compute a relative URL from one document to a build-root path (RFC 3986).
///
/// Both `from` and `to` are `/`-separated paths without leading slash. The
/// last segment of `from` is the document itself; its directory is the base.
///
/// # Examples
///
/// ```
/// use termdoc_renderer::relative_path;
///
/// assert_eq!(relative_path("index", "_static/termynal.js"), "_static/termynal.js");
/// assert_eq!(relative_path("guide/install", "_static/termynal.js"), "../_static/termynal.js");
/// ```
#[must_use]
pub fn relative_path(from: &str, to: &str) -> String {
    let from_segs: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_segs: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let from_dir = if from.ends_with('/') || from_segs.is_empty() {
        &from_segs[..]
    } else {
        &from_segs[..from_segs.len() - 1]
    };

    let common = from_dir
        .iter()
        .zip(&to_segs)
        .take_while(|(a, b)| a == b)
        .count();

    let result = format!(
        "{}{}",
        "../".repeat(from_dir.len() - common),
        to_segs[common..].join("/")
    );
    if result.is_empty() {
        "./".to_owned()
    } else {
        result
    }
}

/// Escape text for HTML content and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
