//! Uppercase-and-truncate transform.

use thiserror::Error;

/// Output length (in characters) kept before the truncation marker is appended.
pub const DEFAULT_MAX_OUTPUT_CHARS: usize = 50;

/// Appended to output that was cut at the length cap.
pub const TRUNCATION_MARKER: &str = "... (truncated)";

/// Errors that can occur while processing input data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// Input was missing, blank, or otherwise rejected. Maps to 400.
    #[error("{0}")]
    InvalidInput(String),

    /// Anything else. Detail is logged, never returned to the caller.
    #[error("internal processing failure: {0}")]
    Internal(String),
}

impl ProcessError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// A text transform invoked once per processing request.
pub trait Transform: Send + Sync {
    fn apply(&self, input: Option<&str>) -> Result<String, ProcessError>;
}

/// Trims, uppercases and caps the result at `max_output_chars` characters.
#[derive(Debug, Clone, Copy)]
pub struct UppercaseTransform {
    max_output_chars: usize,
}

impl UppercaseTransform {
    pub fn new(max_output_chars: usize) -> Self {
        Self { max_output_chars }
    }

    pub fn max_output_chars(&self) -> usize {
        self.max_output_chars
    }
}

impl Default for UppercaseTransform {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_OUTPUT_CHARS)
    }
}

impl Transform for UppercaseTransform {
    fn apply(&self, input: Option<&str>) -> Result<String, ProcessError> {
        let trimmed = match input.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => return Err(ProcessError::invalid("Input data cannot be null or empty")),
        };

        let upper = trimmed.to_uppercase();

        // Cut on a char boundary, never mid code point.
        match upper.char_indices().nth(self.max_output_chars) {
            Some((cut, _)) => {
                let mut out = String::with_capacity(cut + TRUNCATION_MARKER.len());
                out.push_str(&upper[..cut]);
                out.push_str(TRUNCATION_MARKER);
                Ok(out)
            }
            None => Ok(upper),
        }
    }
}

/// Process input with the default output cap.
pub fn process(input: Option<&str>) -> Result<String, ProcessError> {
    UppercaseTransform::default().apply(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercases_and_trims() {
        assert_eq!(process(Some("hello world")).unwrap(), "HELLO WORLD");
        assert_eq!(process(Some("  padded\t\n")).unwrap(), "PADDED");
        assert_eq!(process(Some("MiXeD 123 !?")).unwrap(), "MIXED 123 !?");
    }

    #[test]
    fn test_rejects_missing_and_blank_input() {
        let expected = ProcessError::invalid("Input data cannot be null or empty");
        assert_eq!(process(None), Err(expected.clone()));
        assert_eq!(process(Some("")), Err(expected.clone()));
        assert_eq!(process(Some("   \t\r\n ")), Err(expected));
    }

    #[test]
    fn test_blank_means_unicode_whitespace() {
        assert!(process(Some("\u{00A0}\u{2003}")).is_err());
        assert_eq!(process(Some("\u{0001}")).unwrap(), "\u{0001}");
    }

    #[test]
    fn test_exactly_at_cap_is_not_truncated() {
        let input = "b".repeat(50);
        let out = process(Some(&input)).unwrap();
        assert_eq!(out, "B".repeat(50));
        assert!(!out.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_over_cap_is_truncated_with_marker() {
        let input = "a".repeat(60);
        let out = process(Some(&input)).unwrap();
        assert_eq!(out, format!("{}{}", "A".repeat(50), TRUNCATION_MARKER));

        let out = process(Some(&"x".repeat(51))).unwrap();
        assert_eq!(out, format!("{}... (truncated)", "X".repeat(50)));
    }

    #[test]
    fn test_length_is_measured_after_trimming() {
        let input = format!("   {}   ", "c".repeat(50));
        assert_eq!(process(Some(&input)).unwrap(), "C".repeat(50));
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let input = "é".repeat(55);
        let out = process(Some(&input)).unwrap();
        assert_eq!(out, format!("{}{}", "É".repeat(50), TRUNCATION_MARKER));
    }

    #[test]
    fn test_property_short_inputs_match_uppercase() {
        let long = "m".repeat(49);
        let samples = ["a", " z ", "hello", "The quick brown fox", long.as_str()];
        for s in samples {
            assert_eq!(process(Some(s)).unwrap(), s.trim().to_uppercase());
        }
    }

    #[test]
    fn test_custom_cap() {
        let t = UppercaseTransform::new(3);
        assert_eq!(t.max_output_chars(), 3);
        assert_eq!(t.apply(Some("abc")).unwrap(), "ABC");
        assert_eq!(t.apply(Some("abcd")).unwrap(), "ABC... (truncated)");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ProcessError::invalid("Input data cannot be null or empty").to_string(),
            "Input data cannot be null or empty"
        );
        assert_eq!(
            ProcessError::Internal("boom".into()).to_string(),
            "internal processing failure: boom"
        );
    }
}
