//! Candidate document validation

use crate::document::CandidateDocument;
use crate::schema::SchemaDefinition;
use serde_json::Value;
use verbos_domain::ValidationVerdict;

/// Violations listed individually before the rest are summarised
const MAX_REPORTED_VIOLATIONS: usize = 10;

/// Checks candidate documents against a schema
///
/// Parsing and schema failures produce different messages, but both yield
/// an invalid verdict and both go down the same correction path.
#[derive(Debug, Clone, Copy)]
pub struct DocumentValidator<'s> {
    schema: &'s SchemaDefinition,
}

impl<'s> DocumentValidator<'s> {
    /// Create a validator for the given schema
    pub fn new(schema: &'s SchemaDefinition) -> Self {
        Self { schema }
    }

    /// Validate a candidate
    pub fn validate(&self, candidate: &CandidateDocument) -> ValidationVerdict {
        self.validate_text(candidate.text())
    }

    /// Validate raw document text
    pub fn validate_text(&self, text: &str) -> ValidationVerdict {
        let parsed: Value = match serde_yaml::from_str(text) {
            Ok(value) => value,
            Err(e) => return ValidationVerdict::invalid(format!("document is not valid YAML: {}", e)),
        };

        let violations = self.schema.check(&parsed);
        if violations.is_empty() {
            return ValidationVerdict::valid();
        }

        let mut messages: Vec<String> = violations
            .iter()
            .take(MAX_REPORTED_VIOLATIONS)
            .map(|v| v.to_string())
            .collect();
        if violations.len() > MAX_REPORTED_VIOLATIONS {
            messages.push(format!(
                "and {} more violation(s)",
                violations.len() - MAX_REPORTED_VIOLATIONS
            ));
        }

        ValidationVerdict::invalid(format!(
            "document does not match the schema: {}",
            messages.join("; ")
        ))
    }
}
