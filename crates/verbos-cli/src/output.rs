//! Output formatting for the CLI.

use crate::conjugation::{Tense, TenseTable, VerbConjugation};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use verbos_domain::{ItemOutcome, ItemReport};
use verbos_generator::{BatchSummary, Progress};

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format one item's outcome as a progress line.
    pub fn report(&self, progress: Progress, report: &ItemReport) -> String {
        let item = report.item.as_str();
        let line = match report.outcome {
            ItemOutcome::Created => self.colorize(&format!("✓ {} created", item), "green"),
            ItemOutcome::Corrected => self.colorize(&format!("✎ {} corrected", item), "cyan"),
            ItemOutcome::Skipped => self.colorize(&format!("↷ {} skipped (already exists)", item), "yellow"),
            ItemOutcome::Failed => self.colorize(
                &format!("✗ {} failed: {}", item, report.error.as_deref().unwrap_or("unknown error")),
                "red",
            ),
        };
        format!("{} {}", progress, line)
    }

    /// Format the end-of-batch summary table.
    pub fn summary(&self, summary: &BatchSummary) -> String {
        if summary.reports.is_empty() {
            return self.colorize("No verbs processed.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Created", "Corrected", "Skipped", "Failed", "Requests"]);
        builder.push_record([
            summary.count(ItemOutcome::Created).to_string(),
            summary.count(ItemOutcome::Corrected).to_string(),
            summary.count(ItemOutcome::Skipped).to_string(),
            summary.count(ItemOutcome::Failed).to_string(),
            summary.completion_calls().to_string(),
        ]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a tense as a pronoun/form table.
    pub fn tense_table(&self, tense: Tense, table: TenseTable<'_>) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Pronoun", "Form"]);
        for (pronoun, form) in table.rows() {
            builder.push_record([pronoun.as_str().to_string(), form]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", self.colorize(tense.label(), "cyan"), table)
    }

    /// Format the scalar fields of a record.
    pub fn record_summary(&self, record: &VerbConjugation) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Infinitivo", "Meaning", "Gerundio", "Participio pasado"]);
        builder.push_record([
            record.infinitivo.as_str(),
            record.meaning.as_str(),
            record.gerundio.as_str(),
            record.participio_pasado.as_str(),
        ]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
