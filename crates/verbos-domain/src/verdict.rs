//! Validation verdict for a candidate document

/// Result of checking one candidate document against the schema
///
/// A verdict is either valid with no error, or invalid with a non-empty
/// human-readable description that can be quoted back to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationVerdict {
    valid: bool,
    error: Option<String>,
}

impl ValidationVerdict {
    /// A passing verdict
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    /// A failing verdict with the given description
    ///
    /// An empty description is replaced with a generic one so that an
    /// invalid verdict always carries something to report.
    pub fn invalid(error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            "document failed validation".to_string()
        } else {
            error
        };
        Self {
            valid: false,
            error: Some(error),
        }
    }

    /// Whether the candidate satisfied the schema
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Error description, present only for invalid verdicts
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_verdict_has_no_error() {
        let verdict = ValidationVerdict::valid();
        assert!(verdict.is_valid());
        assert!(verdict.error().is_none());
    }

    #[test]
    fn test_invalid_verdict_keeps_message() {
        let verdict = ValidationVerdict::invalid("'infinitivo' is a required property");
        assert!(!verdict.is_valid());
        assert_eq!(verdict.error(), Some("'infinitivo' is a required property"));
    }

    #[test]
    fn test_invalid_verdict_never_empty() {
        let verdict = ValidationVerdict::invalid("  ");
        assert!(!verdict.error().unwrap().is_empty());
    }
}
