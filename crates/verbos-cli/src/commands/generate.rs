//! Generate command implementation.

use crate::cli::{GenerateArgs, GenerateMode};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::collections::HashSet;
use tracing::debug;
use verbos_domain::{Item, ItemReport};
use verbos_generator::{BatchDriver, BatchObserver, GenerationInputs, GeneratorConfig, Progress};
use verbos_llm::OpenAiProvider;

/// Prints batch events to stdout as they happen.
struct ConsoleObserver<'f> {
    formatter: &'f Formatter,
}

impl BatchObserver for ConsoleObserver<'_> {
    fn on_report(&mut self, progress: Progress, report: &ItemReport) {
        println!("{}", self.formatter.report(progress, report));
    }

    fn on_prompt(&mut self, item: &Item, prompt: &str) {
        println!("{}", self.formatter.info(&format!("Prompt for {}:", item)));
        println!("{}", prompt);
    }

    fn on_affected(&mut self, item: &Item) {
        println!("{}", item);
    }
}

/// Execute the generate command.
pub fn execute_generate(args: GenerateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mode = args.mode();

    // The credential is checked before anything is read or written
    let api_key = match mode {
        GenerateMode::Generate => Some(
            args.api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .ok_or(CliError::MissingCredential)?,
        ),
        GenerateMode::PromptOnly | GenerateMode::ListAffected => None,
    };

    let generator = generator_config(&args, config)?;
    let items = parse_items(&args.verbs)?;

    let store = generator.artifact_store();
    let inputs = GenerationInputs::load(&generator, &store)?;
    let driver = BatchDriver::new(&inputs, &store).with_force(args.force);
    let mut observer = ConsoleObserver { formatter };

    match mode {
        GenerateMode::PromptOnly => {
            driver.emit_prompts(&items, &mut observer)?;
            Ok(())
        }
        GenerateMode::ListAffected => {
            let affected = driver.affected(&items, &mut observer);
            debug!("{} of {} verb(s) would be generated", affected.len(), items.len());
            Ok(())
        }
        GenerateMode::Generate => {
            let mut settings = config.llm.clone();
            if let Some(model) = args.model {
                settings.model = model;
            }
            settings.validate().map_err(|e| CliError::Config(format!("[llm] {}", e)))?;

            let provider = OpenAiProvider::new(settings, api_key.unwrap_or_default())?;
            let summary = driver.run(&provider, &items, &mut observer);
            println!("{}", formatter.summary(&summary));

            let failed = summary.failures().count();
            if failed > 0 {
                return Err(CliError::ItemsFailed(failed));
            }
            Ok(())
        }
    }
}

/// Apply command-line overrides on top of the configured generator settings.
fn generator_config(args: &GenerateArgs, config: &Config) -> Result<GeneratorConfig> {
    let mut generator = config.generator.clone();
    if let Some(dir) = &args.output_dir {
        generator.output_dir = dir.clone();
    }
    if let Some(schema) = &args.schema {
        generator.schema_path = schema.clone();
    }
    generator
        .validate()
        .map_err(|e| CliError::Config(format!("[generator] {}", e)))?;
    Ok(generator)
}

/// Validate verb names, dropping repeats while keeping the first occurrence.
fn parse_items(verbs: &[String]) -> Result<Vec<Item>> {
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(verbs.len());
    for verb in verbs {
        let item = Item::new(verb)?;
        if seen.insert(item.clone()) {
            items.push(item);
        } else {
            debug!(item = %item, "Ignoring repeated verb");
        }
    }
    Ok(items)
}
