/// Pattern parsing for route segments
///
/// Pure functional parsing of declared route patterns (`/trace/:id?`) into typed segments.
/// All functions are **pure**: same input → same output, no side effects.

use once_cell::sync::Lazy;
use regex::Regex;

static PARAM_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("parameter name regex is valid")
});

/// Represents different types of route pattern segments
///
/// Functional sum type for pattern matching route segments.
///
/// # Examples
///
/// ```
/// use heritage_router::route::pattern::{classify_segment, PatternSegmentType};
///
/// // Static segment
/// let seg = classify_segment("products");
/// assert!(matches!(seg, PatternSegmentType::Static(_)));
///
/// // Required parameter
/// let seg = classify_segment(":id");
/// assert!(matches!(seg, PatternSegmentType::Required(_)));
///
/// // Optional parameter
/// let seg = classify_segment(":id?");
/// assert!(matches!(seg, PatternSegmentType::Optional(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PatternSegmentType {
    /// Optional parameter: `:id?`
    Optional(String),
    /// Required parameter: `:id`
    Required(String),
    /// Static text segment
    Static(String),
}

impl PatternSegmentType {
    /// Parameter name carried by this segment, if any
    pub fn param_name(&self) -> Option<&str> {
        match self {
            PatternSegmentType::Optional(name) | PatternSegmentType::Required(name) => Some(name),
            PatternSegmentType::Static(_) => None,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, PatternSegmentType::Optional(_))
    }
}

/// Classifies a segment into a pattern type (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Optional param**: `:name?`
/// 2. **Required param**: `:name`
/// 3. **Static**: Any other text
///
/// Classification never fails; [`validate_segment`] reports malformed segments.
pub fn classify_segment(segment: &str) -> PatternSegmentType {
    match segment.strip_prefix(':') {
        Some(inner) => match inner.strip_suffix('?') {
            Some(name) => PatternSegmentType::Optional(name.to_string()),
            None => PatternSegmentType::Required(inner.to_string()),
        },
        None => PatternSegmentType::Static(segment.to_string()),
    }
}

/// Checks whether a string is a valid parameter name
///
/// ```
/// use heritage_router::route::pattern::is_valid_param_name;
///
/// assert!(is_valid_param_name("id"));
/// assert!(is_valid_param_name("product_id"));
/// assert!(!is_valid_param_name("1st"));
/// assert!(!is_valid_param_name("id-x"));
/// ```
pub fn is_valid_param_name(name: &str) -> bool {
    PARAM_NAME.is_match(name)
}

/// Validates a single classified segment, returning the reason it is malformed
pub fn validate_segment(raw: &str, segment: &PatternSegmentType) -> Result<(), String> {
    match segment {
        PatternSegmentType::Static(text) => {
            if let Some(bad) = text.chars().find(|c| matches!(c, '?' | '#' | ':')) {
                return Err(format!("static segment `{raw}` contains reserved character `{bad}`"));
            }
            Ok(())
        }
        PatternSegmentType::Optional(name) | PatternSegmentType::Required(name) => {
            if is_valid_param_name(name) {
                Ok(())
            } else {
                Err(format!("`{name}` in segment `{raw}` is not a valid parameter name"))
            }
        }
    }
}
