//! LLM prompt engineering for conjugation generation

use crate::error::GeneratorError;
use verbos_domain::Item;

/// Builds the generation prompt for one item
pub struct PromptBuilder<'a> {
    item: &'a Item,
    example: &'a str,
    schema: &'a str,
    required_fields: Vec<&'a str>,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(item: &'a Item, example: &'a str, schema: &'a str) -> Self {
        Self {
            item,
            example,
            schema,
            required_fields: Vec::new(),
        }
    }

    /// List the top-level fields the response must contain
    pub fn with_required_fields(mut self, fields: Vec<&'a str>) -> Self {
        self.required_fields = fields;
        self
    }

    /// Build the complete generation prompt
    ///
    /// # Errors
    /// [`GeneratorError::EmptyInput`] if the example or the schema is blank.
    pub fn build(&self) -> Result<String, GeneratorError> {
        if self.example.trim().is_empty() {
            return Err(GeneratorError::EmptyInput("worked example"));
        }
        if self.schema.trim().is_empty() {
            return Err(GeneratorError::EmptyInput("schema"));
        }

        let verb = self.item.as_str();
        let mut prompt = String::new();

        // 1. Task and target
        prompt.push_str(&format!(
            "Conjugate the Spanish verb \"{}\" in all 14 tenses and moods, \
             as well as the infinitive, gerundio and past participle.\n\n",
            verb
        ));

        // 2. Worked example
        prompt.push_str("Here is a complete example of the expected output:\n");
        prompt.push_str("<example>\n");
        prompt.push_str(self.example.trim_end());
        prompt.push_str("\n</example>\n\n");

        // 3. Schema for self-checking
        prompt.push_str("Here is the JSON schema that will be used to validate your response:\n");
        prompt.push_str("<schema>\n");
        prompt.push_str(self.schema.trim_end());
        prompt.push_str("\n</schema>\n\n");

        // 4. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_RULES);
        prompt.push_str(&format!(
            "\nThe only thing that differs from the example is the verb, which must be: {}\n",
            verb
        ));
        if !self.required_fields.is_empty() {
            prompt.push_str(&format!(
                "Make sure you provide ALL {} top-level fields: {}\n",
                self.required_fields.len(),
                self.required_fields.join(", ")
            ));
        } else {
            prompt.push_str("Make sure you provide ALL top-level fields shown in the example and the schema.\n");
        }

        Ok(prompt)
    }
}

/// Build the follow-up prompt sent after a rejected attempt
///
/// The original instruction is repeated verbatim so the model keeps the full
/// task, and the validator's error is quoted verbatim so it knows what to fix.
pub fn correction_prompt(item: &Item, original_prompt: &str, error: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(original_prompt.trim_end());
    prompt.push_str("\n\n");
    prompt.push_str("A previous response to the instruction above was rejected by the validator with this error:\n");
    prompt.push_str("<error>\n");
    prompt.push_str(error.trim_end());
    prompt.push_str("\n</error>\n\n");
    prompt.push_str(&format!(
        "Reply with the complete, corrected YAML document for \"{}\". \
         Fix the error above and keep every field required by the schema.\n",
        item.as_str()
    ));
    prompt.push_str(OUTPUT_FORMAT_REMINDER);
    prompt
}

const OUTPUT_FORMAT_RULES: &str = r#"Your response must be YAML only:
- no explanations before or after the document
- no Markdown code fences
- no `---` or `...` document markers, and do not repeat the <example> tags
- use exactly the field names you see in the example above
- keep the same nesting: one mapping per tense, keyed by pronoun"#;

const OUTPUT_FORMAT_REMINDER: &str = "Remember: return ONLY the YAML document, no prose, no code fences.\n";
