/// Route module for declared-pattern routing
///
/// Contains pure functional components for route parsing and validation:
/// - Pure functions (same input → same output)
/// - Immutable data structures
/// - Pattern matching for control flow

pub mod parser;
pub mod pattern;

// Re-export commonly used types
pub use parser::{parse_pattern, validate_pattern, ParsedPattern};
pub use pattern::{classify_segment, is_valid_param_name, PatternSegmentType};
