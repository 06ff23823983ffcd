/// Pattern parsing and validation for declared routes
///
/// Pure functional parsers that transform declared patterns into typed segments.
/// All functions are **pure**: same input → same output, no side effects.

use std::collections::HashSet;

use super::pattern::{classify_segment, validate_segment, PatternSegmentType};
use crate::error::ConfigurationError;

/// Result of parsing a declared pattern
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPattern {
    /// Typed segments in declaration order
    pub segments: Vec<PatternSegmentType>,
    /// All parameter names, in order of appearance
    pub params: Vec<String>,
    /// Names of optional parameters
    pub optional_params: Vec<String>,
}

impl ParsedPattern {
    /// Adds a static segment
    fn with_static_segment(mut self, segment: String) -> Self {
        self.segments.push(PatternSegmentType::Static(segment));
        self
    }

    /// Adds a required parameter segment
    fn with_required_param(mut self, param_name: String) -> Self {
        self.params.push(param_name.clone());
        self.segments.push(PatternSegmentType::Required(param_name));
        self
    }

    /// Adds an optional parameter segment
    fn with_optional_param(mut self, param_name: String) -> Self {
        self.params.push(param_name.clone());
        self.optional_params.push(param_name.clone());
        self.segments.push(PatternSegmentType::Optional(param_name));
        self
    }

    /// Number of dynamic segments
    pub fn dynamic_count(&self) -> usize {
        self.params.len()
    }
}

/// Processes a single segment and updates the parse state
///
/// Pure function: (state, segment) -> new state
fn process_segment(state: ParsedPattern, segment: &str) -> ParsedPattern {
    if segment.is_empty() {
        return state;
    }

    match classify_segment(segment) {
        PatternSegmentType::Optional(param_name) => state.with_optional_param(param_name),
        PatternSegmentType::Required(param_name) => state.with_required_param(param_name),
        PatternSegmentType::Static(seg) => state.with_static_segment(seg),
    }
}

/// Parses a declared pattern into route components (pure function)
///
/// Empty segments are skipped, so parsing never fails; use [`validate_pattern`]
/// to reject malformed patterns.
///
/// # Examples
///
/// ```
/// use heritage_router::route::parser::parse_pattern;
///
/// let parsed = parse_pattern("/trace/:id?");
/// assert_eq!(parsed.params, vec!["id".to_string()]);
/// assert_eq!(parsed.optional_params, vec!["id".to_string()]);
///
/// let parsed = parse_pattern("/");
/// assert!(parsed.segments.is_empty());
/// ```
pub fn parse_pattern(pattern: &str) -> ParsedPattern {
    pattern
        .split('/')
        .fold(ParsedPattern::default(), process_segment)
}

/// Validates a declared pattern and returns its parsed form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `\` or empty segments (`//`, trailing `/` except root)
/// - Static segments must not contain `?`, `#` or `:`
/// - Parameter names must be identifiers and unique within the pattern
///
/// # Examples
///
/// ```
/// use heritage_router::route::parser::validate_pattern;
///
/// assert!(validate_pattern("/product/:id").is_ok());
/// assert!(validate_pattern("product/:id").is_err());
/// assert!(validate_pattern("/a/:id/:id").is_err());
/// ```
pub fn validate_pattern(pattern: &str) -> Result<ParsedPattern, ConfigurationError> {
    if !pattern.starts_with('/') {
        return Err(ConfigurationError::invalid(pattern, "must start with `/`"));
    }
    if pattern.contains('\\') {
        return Err(ConfigurationError::invalid(pattern, "must not contain `\\`"));
    }
    if pattern != "/" && pattern[1..].split('/').any(str::is_empty) {
        return Err(ConfigurationError::invalid(pattern, "contains an empty segment"));
    }

    let parsed = parse_pattern(pattern);

    for (raw, segment) in pattern[1..]
        .split('/')
        .filter(|s| !s.is_empty())
        .zip(&parsed.segments)
    {
        validate_segment(raw, segment).map_err(|reason| ConfigurationError::invalid(pattern, reason))?;
    }

    let mut seen = HashSet::new();
    if let Some(dup) = parsed.params.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(ConfigurationError::invalid(
            pattern,
            format!("parameter `{dup}` is declared more than once"),
        ));
    }

    Ok(parsed)
}
