//! Link target resolution.
//!
//! Relative hrefs are resolved against the directory of the document they
//! appear in, so that every link names a path relative to the same root as
//! the document paths themselves.

use percent_encoding::percent_decode_str;

/// Resolve `href` as found in the document at `file`.
///
/// Absolute URLs (anything containing `://`) are returned untouched.
/// Everything else is percent-decoded, joined onto the directory of `file`
/// and lexically normalized.
///
/// ```
/// use folio::links::resolve_href;
///
/// assert_eq!(resolve_href("text/ch1.html", "../x.html"), "x.html");
/// assert_eq!(resolve_href("text/ch1.html", "ch2.html#s%201"), "text/ch2.html#s 1");
/// assert_eq!(resolve_href("ch1.html", "https://a.org/b"), "https://a.org/b");
/// ```
pub fn resolve_href(file: &str, href: &str) -> String {
    if href.contains("://") {
        return href.to_string();
    }
    let decoded = percent_decode_str(href).decode_utf8_lossy();
    posix_normpath(&posix_join(dirname(file), &decoded))
}

/// Directory part of a `/`-separated path, without the trailing slash
/// (unless the directory is the root itself).
pub fn dirname(path: &str) -> &str {
    let Some(slash) = path.rfind('/') else {
        return "";
    };
    let head = &path[..=slash];
    let trimmed = head.trim_end_matches('/');
    if trimmed.is_empty() { head } else { trimmed }
}

fn posix_join(base: &str, path: &str) -> String {
    if path.starts_with('/') || base.is_empty() {
        path.to_string()
    } else if base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Lexically normalize a POSIX path.
///
/// Collapses empty and `.` segments and folds `..` into its parent. Leading
/// `..` segments of a relative path are kept; `..` at the root is dropped.
/// An empty result is `.`.
pub fn posix_normpath(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    // POSIX leaves exactly two leading slashes alone; one or three-plus
    // collapse to one.
    let root = if path.starts_with("//") && !path.starts_with("///") {
        "//"
    } else if path.starts_with('/') {
        "/"
    } else {
        ""
    };

    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if root.is_empty() {
                    parts.push("..");
                }
            }
            s => parts.push(s),
        }
    }

    let joined = format!("{root}{}", parts.join("/"));
    if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
