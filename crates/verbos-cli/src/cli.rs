//! CLI command definitions and argument parsing.

use crate::conjugation::{Field, Pronoun, Tense};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Verbos CLI - Generate and browse Spanish verb conjugation records.
#[derive(Debug, Parser)]
#[command(name = "verbos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate conjugation records for one or more verbs
    Generate(GenerateArgs),

    /// Look up a generated record
    Show(ShowArgs),

    /// Print the words that carry an accented vowel
    Accents(AccentsArgs),
}

/// Arguments for the generate command.
#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Verbs to generate (infinitives)
    #[arg(required = true)]
    pub verbs: Vec<String>,

    /// Output directory for records
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Print the prompts instead of calling the completion service
    #[arg(short, long, conflicts_with = "list")]
    pub prompt_only: bool,

    /// Regenerate records that already exist
    #[arg(short, long)]
    pub force: bool,

    /// List the verbs that would be generated and exit
    #[arg(short, long)]
    pub list: bool,

    /// Schema file used for validation
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Model name
    #[arg(long)]
    pub model: Option<String>,

    /// API key for the completion service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// What the generate command should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateMode {
    /// Call the service and write records
    Generate,
    /// Only print prompts
    PromptOnly,
    /// Only list the verbs that would be processed
    ListAffected,
}

impl GenerateArgs {
    /// The mode selected by the flags.
    pub fn mode(&self) -> GenerateMode {
        if self.prompt_only {
            GenerateMode::PromptOnly
        } else if self.list {
            GenerateMode::ListAffected
        } else {
            GenerateMode::Generate
        }
    }
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Verb to look up
    pub verb: String,

    /// Tense to print
    #[arg(short, long, value_enum, conflicts_with = "field")]
    pub tense: Option<TenseArg>,

    /// Only print this pronoun's form
    #[arg(short, long, value_enum, requires = "tense")]
    pub pronoun: Option<PronounArg>,

    /// Print a single field
    #[arg(long, value_enum)]
    pub field: Option<FieldArg>,

    /// Directory holding the records
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the accents command.
#[derive(Debug, Parser)]
pub struct AccentsArgs {
    /// Words to filter; read from stdin when omitted
    pub words: Vec<String>,
}

/// Tense argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum TenseArg {
    /// Presente indicativo
    Presente,
    /// Pretérito perfecto simple
    Preterito,
    /// Pretérito imperfecto
    Imperfecto,
    /// Futuro simple
    Futuro,
    /// Condicional simple
    Condicional,
    /// Presente perfecto
    PresPerf,
    /// Pretérito pluscuamperfecto
    PretPlus,
    /// Futuro perfecto
    FutPerf,
    /// Condicional perfecto
    CondPerf,
    /// Presente subjuntivo
    PresSubj,
    /// Pretérito perfecto subjuntivo
    PretPerfSubj,
    /// Imperfecto subjuntivo
    ImpSubj,
    /// Pluscuamperfecto subjuntivo
    PlusSubj,
    /// Imperativo
    Imperativo,
}

/// Pronoun argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PronounArg {
    /// yo
    Yo,
    /// tú
    Tu,
    /// vos
    Vos,
    /// usted
    Ud,
    /// nosotros
    Nosotros,
    /// vosotros
    Vosotros,
    /// ustedes
    Uds,
}

/// Field argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FieldArg {
    /// English meaning
    Meaning,
    /// Gerund
    Gerundio,
    /// Past participle
    ParticipioPasado,
}

impl From<TenseArg> for Tense {
    fn from(tense: TenseArg) -> Self {
        match tense {
            TenseArg::Presente => Tense::Presente,
            TenseArg::Preterito => Tense::Preterito,
            TenseArg::Imperfecto => Tense::Imperfecto,
            TenseArg::Futuro => Tense::Futuro,
            TenseArg::Condicional => Tense::Condicional,
            TenseArg::PresPerf => Tense::PresentePerfecto,
            TenseArg::PretPlus => Tense::PreteritoPluscuamperfecto,
            TenseArg::FutPerf => Tense::FuturoPerfecto,
            TenseArg::CondPerf => Tense::CondicionalPerfecto,
            TenseArg::PresSubj => Tense::PresenteSubjuntivo,
            TenseArg::PretPerfSubj => Tense::PreteritoPerfectoSubjuntivo,
            TenseArg::ImpSubj => Tense::ImperfectoSubjuntivo,
            TenseArg::PlusSubj => Tense::PluscuamperfectoSubjuntivo,
            TenseArg::Imperativo => Tense::Imperativo,
        }
    }
}

impl From<PronounArg> for Pronoun {
    fn from(pronoun: PronounArg) -> Self {
        match pronoun {
            PronounArg::Yo => Pronoun::Yo,
            PronounArg::Tu => Pronoun::Tu,
            PronounArg::Vos => Pronoun::Vos,
            PronounArg::Ud => Pronoun::Ud,
            PronounArg::Nosotros => Pronoun::Nosotros,
            PronounArg::Vosotros => Pronoun::Vosotros,
            PronounArg::Uds => Pronoun::Uds,
        }
    }
}

impl From<FieldArg> for Field {
    fn from(field: FieldArg) -> Self {
        match field {
            FieldArg::Meaning => Field::Meaning,
            FieldArg::Gerundio => Field::Gerundio,
            FieldArg::ParticipioPasado => Field::ParticipioPasado,
        }
    }
}
