//! Exempt Path Patterns
//!
//! Paths that bypass login enforcement, parsed once at startup.

use std::fmt;

/// Wildcard marker inside a configured pattern
const WILDCARD: char = '*';

/// A configured path rule that bypasses enforcement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExemptPattern {
    /// No usable wildcard: the bare path must equal the pattern
    Exact(String),
    /// Pattern truncated at its first wildcard; the bare path must contain it
    Contains(String),
}

impl ExemptPattern {
    /// Parse a configured pattern
    ///
    /// Only a wildcard after the first character marks a prefix pattern.
    /// `*` alone, or `*foo`, stays an exact pattern on its literal text.
    // Leading-wildcard handling is kept as configured; clarify with product before changing it.
    pub fn parse(raw: &str) -> Self {
        match raw.find(WILDCARD) {
            Some(index) if index > 0 => ExemptPattern::Contains(raw[..index].to_string()),
            _ => ExemptPattern::Exact(raw.to_string()),
        }
    }

    /// Whether the bare path is exempted by this pattern
    ///
    /// Prefix patterns match anywhere in the path, not only at the start:
    /// `/admin/*` exempts `/other/admin/x` too.
    pub fn matches(&self, bare_path: &str) -> bool {
        match self {
            ExemptPattern::Exact(pattern) => pattern == bare_path,
            ExemptPattern::Contains(prefix) => bare_path.contains(prefix.as_str()),
        }
    }
}

impl fmt::Display for ExemptPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExemptPattern::Exact(pattern) => write!(f, "{pattern}"),
            ExemptPattern::Contains(prefix) => write!(f, "{prefix}{WILDCARD}"),
        }
    }
}

/// Whether any pattern exempts the path; first match wins
pub fn is_exempt(patterns: &[ExemptPattern], bare_path: &str) -> bool {
    patterns.iter().any(|p| p.matches(bare_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact() {
        assert_eq!(
            ExemptPattern::parse("/public/health"),
            ExemptPattern::Exact("/public/health".to_string())
        );
    }

    #[test]
    fn test_parse_truncates_at_first_wildcard() {
        assert_eq!(
            ExemptPattern::parse("/static/*/js/*"),
            ExemptPattern::Contains("/static/".to_string())
        );
    }

    #[test]
    fn test_exact_requires_equality() {
        let pattern = ExemptPattern::parse("/public/health");
        assert!(pattern.matches("/public/health"));
        assert!(!pattern.matches("/public/health2"));
        assert!(!pattern.matches("/public"));
    }

    #[test]
    fn test_prefix_matches_by_containment() {
        let pattern = ExemptPattern::parse("/static/*");
        assert!(pattern.matches("/static/app.js"));
        assert!(pattern.matches("/other/static/app.js"));
        assert!(!pattern.matches("/staticfiles"));
    }

    // Current behavior: a leading wildcard is not a wildcard. Kept as-is
    // pending a product decision on what `*` patterns should mean.
    #[test]
    fn test_leading_wildcard_is_literal() {
        let star = ExemptPattern::parse("*");
        assert_eq!(star, ExemptPattern::Exact("*".to_string()));
        assert!(star.matches("*"));
        assert!(!star.matches("/anything"));

        let suffix = ExemptPattern::parse("*.js");
        assert!(suffix.matches("*.js"));
        assert!(!suffix.matches("/app.js"));
    }

    #[test]
    fn test_is_exempt_over_list() {
        let patterns = vec![
            ExemptPattern::parse("/login"),
            ExemptPattern::parse("/static/*"),
        ];
        assert!(is_exempt(&patterns, "/login"));
        assert!(is_exempt(&patterns, "/static/css/site.css"));
        assert!(!is_exempt(&patterns, "/index"));
        assert!(!is_exempt(&[], "/login"));
    }

    #[test]
    fn test_display_round_trips_configured_text() {
        assert_eq!(ExemptPattern::parse("/static/*").to_string(), "/static/*");
        assert_eq!(ExemptPattern::parse("*").to_string(), "*");
    }
}
