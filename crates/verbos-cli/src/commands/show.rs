//! Show command implementation.

use crate::cli::ShowArgs;
use crate::config::Config;
use crate::conjugation::{Tense, VerbConjugation};
use crate::error::Result;
use crate::output::Formatter;
use verbos_domain::Item;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    println!("{}", render(args, config, formatter)?);
    Ok(())
}

/// Produce the text `show` prints.
pub fn render(args: ShowArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let mut generator = config.generator.clone();
    if let Some(dir) = args.output_dir {
        generator.output_dir = dir;
    }

    let item = Item::new(&args.verb)?;
    let path = generator.artifact_store().path_for(&item);
    tracing::debug!("Loading verb file {}", path.display());
    let record = VerbConjugation::load(&path)?;

    if let Some(field) = args.field {
        return Ok(record.field(field.into()).to_string());
    }

    match (args.tense, args.pronoun) {
        (Some(tense), Some(pronoun)) => record.form(tense.into(), pronoun.into()),
        (Some(tense), None) => {
            let tense: Tense = tense.into();
            Ok(formatter.tense_table(tense, record.tense(tense)))
        }
        (None, _) => Ok(formatter.record_summary(&record)),
    }
}
