//! Accents command implementation.

use crate::cli::AccentsArgs;
use crate::error::{CliError, Result};
use std::io::{self, BufRead, IsTerminal};

const ACCENTED_VOWELS: &str = "áéíóúÁÉÍÓÚ";

/// Whether a word contains an accented vowel.
pub fn has_accent(word: &str) -> bool {
    word.chars().any(|c| ACCENTED_VOWELS.contains(c))
}

/// Trim each token and keep the ones with an accented vowel.
pub fn accented<I, S>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| has_accent(t))
        .collect()
}

/// Execute the accents command.
pub fn execute_accents(args: AccentsArgs) -> Result<()> {
    let words = if !args.words.is_empty() {
        accented(&args.words)
    } else {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            return Err(CliError::InvalidInput(
                "No input provided or piped. Please provide input as arguments or pipe it in.".to_string(),
            ));
        }
        let lines = stdin.lock().lines().collect::<io::Result<Vec<_>>>()?;
        accented(lines)
    };

    for word in words {
        println!("{}", word);
    }
    Ok(())
}
