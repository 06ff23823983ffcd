/// Path utilities for validation, normalization and base-path handling
///
/// All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::Serialize;

/// Validates if a path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
/// - Must not be empty
///
/// # Examples
///
/// ```
/// use heritage_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/trace/123"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("about"));
/// assert!(!is_valid_path("/about/"));
/// assert!(!is_valid_path("/about//page"));
/// assert!(!is_valid_path("/about\\page"));
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalize a path to canonical form
///
/// Returns `Cow::Borrowed` when input is already valid (zero allocations).
/// Returns `Cow::Owned` when normalization needed (single allocation).
///
/// - Trailing slashes: `/path/` → `/path`
/// - Double slashes: `/path//to` → `/path/to`
/// - Backslashes: `\path\to` → `/path/to`
///
/// # Examples
///
/// ```
/// use heritage_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// let path = normalize_path("/about");
/// assert!(matches!(path, Cow::Borrowed("/about")));
///
/// assert_eq!(normalize_path("/trace/"), "/trace");
/// assert_eq!(normalize_path("\\product\\42"), "/product/42");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Normalizes a deployment base path
///
/// The result has a leading slash and no trailing slash; the root base is the
/// empty string so it can be prefixed onto any path.
///
/// ```
/// use heritage_router::path::normalize_base;
///
/// assert_eq!(normalize_base("/"), "");
/// assert_eq!(normalize_base(""), "");
/// assert_eq!(normalize_base("heritage/"), "/heritage");
/// assert_eq!(normalize_base("/shop/app/"), "/shop/app");
/// ```
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Strips a normalized base from a path
///
/// Matching is ASCII case-insensitive. Paths outside the base are returned unchanged.
///
/// ```
/// use heritage_router::path::strip_base;
///
/// assert_eq!(strip_base("/heritage/trace/1", "/heritage"), "/trace/1");
/// assert_eq!(strip_base("/Heritage", "/heritage"), "/");
/// assert_eq!(strip_base("/about", "/heritage"), "/about");
/// assert_eq!(strip_base("/about", ""), "/about");
/// ```
pub fn strip_base<'a>(path: &'a str, base: &str) -> &'a str {
    strip_base_with_options(path, base, true)
}

/// Strips a normalized base from a path, optionally comparing case-insensitively
pub fn strip_base_with_options<'a>(path: &'a str, base: &str, case_insensitive: bool) -> &'a str {
    if base.is_empty() {
        return path;
    }

    let (head, rest) = match (path.get(..base.len()), path.get(base.len()..)) {
        (Some(head), Some(rest)) => (head, rest),
        _ => return path,
    };
    let matched = if case_insensitive {
        head.eq_ignore_ascii_case(base)
    } else {
        head == base
    };
    if !matched {
        return path;
    }

    match rest {
        "" => "/",
        _ if rest.starts_with('/') => rest,
        // `/heritagex` is not under `/heritage`
        _ => path,
    }
}

/// A location split into its path, query and hash parts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Location {
    /// Normalized path relative to the base
    pub path: String,
    /// Decoded query pairs; later duplicates overwrite earlier ones
    pub query: HashMap<String, String>,
    /// Fragment without the leading `#`
    pub hash: Option<String>,
}

impl Location {
    /// Parses a raw location string (`/trace/1?from=qr#top`), stripping `base`
    ///
    /// ```
    /// use heritage_router::path::Location;
    ///
    /// let loc = Location::parse("/heritage/trace/1/?from=qr#top", "/heritage");
    /// assert_eq!(loc.path, "/trace/1");
    /// assert_eq!(loc.query.get("from"), Some(&"qr".to_string()));
    /// assert_eq!(loc.hash.as_deref(), Some("top"));
    /// ```
    pub fn parse(raw: &str, base: &str) -> Self {
        Self::parse_with_options(raw, base, true)
    }

    /// Like [`Location::parse`], with explicit case handling for the base
    pub fn parse_with_options(raw: &str, base: &str, case_insensitive: bool) -> Self {
        let (rest, hash) = match raw.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (raw, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (rest, HashMap::new()),
        };

        Location {
            path: normalize_path(strip_base_with_options(path, base, case_insensitive)).into_owned(),
            query,
            hash,
        }
    }
}

/// Percent-decodes a single component, keeping the raw text when it is not valid UTF-8
pub fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

/// Parses a query string into decoded key/value pairs
///
/// ```
/// use heritage_router::path::parse_query;
///
/// let query = parse_query("q=silver+crown&page=2&flag");
/// assert_eq!(query.get("q"), Some(&"silver crown".to_string()));
/// assert_eq!(query.get("page"), Some(&"2".to_string()));
/// assert_eq!(query.get("flag"), Some(&String::new()));
/// ```
pub fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (
                decode_component(&key.replace('+', " ")),
                decode_component(&value.replace('+', " ")),
            )
        })
        .collect()
}
