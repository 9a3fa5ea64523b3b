//! Verbos CLI - Generate and browse Spanish verb conjugation records.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use verbos_cli::commands;
use verbos_cli::{Cli, Command, Config, Formatter};

fn main() {
    // Initialize tracing (log to stderr, stdout carries prompts and lookups)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> verbos_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(color_enabled);

    match cli.command {
        Command::Generate(args) => commands::execute_generate(args, &config, &formatter),
        Command::Show(args) => commands::execute_show(args, &config, &formatter),
        Command::Accents(args) => commands::execute_accents(args),
    }
}
