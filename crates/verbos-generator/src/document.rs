//! Candidate documents returned by the completion service

/// Unvalidated text from one completion attempt
///
/// Models often wrap YAML in a Markdown code fence or in `---` document
/// markers despite being told not to. Both are removed on construction so
/// that what gets validated is exactly what gets persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDocument {
    text: String,
}

impl CandidateDocument {
    /// Build a candidate from raw completion text
    pub fn from_completion(raw: impl AsRef<str>) -> Self {
        Self {
            text: strip_document_markers(&strip_code_fence(raw.as_ref())),
        }
    }

    /// The document text
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Remove a surrounding ```` ```yaml ```` / ```` ``` ```` fence, if any
fn strip_code_fence(response: &str) -> String {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let mut lines: Vec<&str> = trimmed.lines().collect();
    // Opening fence, possibly with a language tag
    lines.remove(0);
    if lines.last().map(|l| l.trim() == "```").unwrap_or(false) {
        lines.pop();
    }
    lines.join("\n").trim().to_string()
}

/// Remove a lone `---` start marker and a lone `---` / `...` end marker
fn strip_document_markers(text: &str) -> String {
    let mut lines: Vec<&str> = text.lines().collect();
    if lines.first().map(|l| l.trim_end() == "---").unwrap_or(false) {
        lines.remove(0);
    }
    if lines
        .last()
        .map(|l| matches!(l.trim_end(), "---" | "..."))
        .unwrap_or(false)
    {
        lines.pop();
    }
    lines.join("\n").trim().to_string()
}
