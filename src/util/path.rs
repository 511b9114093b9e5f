//! Helpers for `/`-delimited content paths.
//!
//! These operate on strings, never on the filesystem.

/// Append `name` to `parent` with exactly one `/` between them.
pub fn join(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    let name = name.trim_start_matches('/');
    format!("{parent}/{name}")
}

/// Parent folder of `path`, or `None` at the top level.
///
/// ```
/// use cf_repair::util::path::parent;
/// assert_eq!(parent("/content/dam/a.jpg"), Some("/content/dam"));
/// assert_eq!(parent("/content"), None);
/// ```
pub fn parent(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches('/');
    let idx = trimmed.rfind('/')?;
    let parent = &trimmed[..idx];
    if parent.trim_matches('/').is_empty() {
        None
    } else {
        Some(parent)
    }
}

/// Last non-empty segment of `path`.
pub fn name(path: &str) -> &str {
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or_default()
}

pub fn has_double_slashes(path: &str) -> bool {
    path.contains("//")
}

/// Collapse runs of `/` into one, keeping any `scheme://` prefix intact.
pub fn collapse_slashes(path: &str) -> String {
    let (scheme, rest) = match path.find("://") {
        Some(idx) => path.split_at(idx + 3),
        None => ("", path),
    };

    let mut out = String::with_capacity(path.len());
    out.push_str(scheme);
    let mut prev_slash = false;
    for ch in rest.chars() {
        if ch == '/' && prev_slash {
            continue;
        }
        prev_slash = ch == '/';
        out.push(ch);
    }
    out
}
