//! Typed view of a generated conjugation record.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Personal pronoun used as a row key in every tense table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pronoun {
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

impl Pronoun {
    /// All pronouns in table order.
    pub const ALL: [Pronoun; 7] = [
        Pronoun::Yo,
        Pronoun::Tu,
        Pronoun::Vos,
        Pronoun::Ud,
        Pronoun::Nosotros,
        Pronoun::Vosotros,
        Pronoun::Uds,
    ];

    /// Record key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Pronoun::Yo => "yo",
            Pronoun::Tu => "tu",
            Pronoun::Vos => "vos",
            Pronoun::Ud => "ud",
            Pronoun::Nosotros => "nosotros",
            Pronoun::Vosotros => "vosotros",
            Pronoun::Uds => "uds",
        }
    }
}

impl fmt::Display for Pronoun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fourteen tenses and moods of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tense {
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
    PresentePerfecto,
    /// Pretérito pluscuamperfecto
    PreteritoPluscuamperfecto,
    /// Futuro perfecto
    FuturoPerfecto,
    /// Condicional perfecto
    CondicionalPerfecto,
    /// Presente subjuntivo
    PresenteSubjuntivo,
    /// Pretérito perfecto subjuntivo
    PreteritoPerfectoSubjuntivo,
    /// Imperfecto subjuntivo
    ImperfectoSubjuntivo,
    /// Pluscuamperfecto subjuntivo
    PluscuamperfectoSubjuntivo,
    /// Imperativo
    Imperativo,
}

impl Tense {
    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Tense::Presente => "Presente Indicativo",
            Tense::Preterito => "Pretérito Perfecto Simple",
            Tense::Imperfecto => "Pretérito Imperfecto",
            Tense::Futuro => "Futuro Simple",
            Tense::Condicional => "Condicional Simple",
            Tense::PresentePerfecto => "Presente Perfecto",
            Tense::PreteritoPluscuamperfecto => "Pretérito Pluscuamperfecto",
            Tense::FuturoPerfecto => "Futuro Perfecto",
            Tense::CondicionalPerfecto => "Condicional Perfecto",
            Tense::PresenteSubjuntivo => "Presente Subjuntivo",
            Tense::PreteritoPerfectoSubjuntivo => "Pretérito Perfecto Subjuntivo",
            Tense::ImperfectoSubjuntivo => "Imperfecto Subjuntivo",
            Tense::PluscuamperfectoSubjuntivo => "Pluscuamperfecto Subjuntivo",
            Tense::Imperativo => "Imperativo",
        }
    }
}

/// Scalar fields that can be looked up directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// English meaning
    Meaning,
    /// Gerund
    Gerundio,
    /// Past participle
    ParticipioPasado,
}

/// One form per pronoun.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conjugation {
    pub yo: String,
    pub tu: String,
    pub vos: String,
    pub ud: String,
    pub nosotros: String,
    pub vosotros: String,
    pub uds: String,
}

/// Several accepted forms per pronoun (-ra / -se subjunctive endings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConjugationWithAlternatives {
    pub yo: Vec<String>,
    pub tu: Vec<String>,
    pub vos: Vec<String>,
    pub ud: Vec<String>,
    pub nosotros: Vec<String>,
    pub vosotros: Vec<String>,
    pub uds: Vec<String>,
}

/// Imperative forms; there is no first person singular.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImperativeConjugation {
    pub tu: String,
    pub vos: String,
    pub ud: String,
    pub nosotros: String,
    pub vosotros: String,
    pub uds: String,
}

/// A complete conjugation record as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VerbConjugation {
    pub meaning: String,
    pub infinitivo: String,
    pub gerundio: String,
    pub participio_pasado: String,
    pub presente_indicativo: Conjugation,
    pub preterito_perfecto_simple: Conjugation,
    pub preterito_imperfecto: Conjugation,
    pub futuro_simple: Conjugation,
    pub condicional_simple: Conjugation,
    pub presente_perfecto: Conjugation,
    pub preterito_pluscuamperfecto: Conjugation,
    pub futuro_perfecto: Conjugation,
    pub condicional_perfecto: Conjugation,
    pub presente_subjuntivo: Conjugation,
    pub preterito_perfecto_subjuntivo: Conjugation,
    pub imperfecto_subjuntivo: ConjugationWithAlternatives,
    pub pluscuamperfecto_subjuntivo: ConjugationWithAlternatives,
    pub imperativo: ImperativeConjugation,
}

/// Borrowed view of one tense table.
#[derive(Debug, Clone, Copy)]
pub enum TenseTable<'a> {
    /// Single form per pronoun
    Simple(&'a Conjugation),
    /// Alternative forms per pronoun
    Alternatives(&'a ConjugationWithAlternatives),
    /// Imperative, no `yo`
    Imperative(&'a ImperativeConjugation),
}

impl TenseTable<'_> {
    /// The form for a pronoun, alternatives joined with " / ".
    pub fn form(&self, pronoun: Pronoun) -> Option<String> {
        match self {
            TenseTable::Simple(c) => Some(
                match pronoun {
                    Pronoun::Yo => &c.yo,
                    Pronoun::Tu => &c.tu,
                    Pronoun::Vos => &c.vos,
                    Pronoun::Ud => &c.ud,
                    Pronoun::Nosotros => &c.nosotros,
                    Pronoun::Vosotros => &c.vosotros,
                    Pronoun::Uds => &c.uds,
                }
                .clone(),
            ),
            TenseTable::Alternatives(c) => {
                let forms = match pronoun {
                    Pronoun::Yo => &c.yo,
                    Pronoun::Tu => &c.tu,
                    Pronoun::Vos => &c.vos,
                    Pronoun::Ud => &c.ud,
                    Pronoun::Nosotros => &c.nosotros,
                    Pronoun::Vosotros => &c.vosotros,
                    Pronoun::Uds => &c.uds,
                };
                Some(forms.join(" / "))
            }
            TenseTable::Imperative(c) => match pronoun {
                Pronoun::Yo => None,
                Pronoun::Tu => Some(c.tu.clone()),
                Pronoun::Vos => Some(c.vos.clone()),
                Pronoun::Ud => Some(c.ud.clone()),
                Pronoun::Nosotros => Some(c.nosotros.clone()),
                Pronoun::Vosotros => Some(c.vosotros.clone()),
                Pronoun::Uds => Some(c.uds.clone()),
            },
        }
    }

    /// Every (pronoun, form) row the table has.
    pub fn rows(&self) -> Vec<(Pronoun, String)> {
        Pronoun::ALL
            .iter()
            .filter_map(|p| self.form(*p).map(|form| (*p, form)))
            .collect()
    }
}

impl VerbConjugation {
    /// Load a record from a file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::NotFound(format!(
                "verb file {} does not exist",
                path.display()
            )));
        }
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a record from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// A scalar field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Meaning => &self.meaning,
            Field::Gerundio => &self.gerundio,
            Field::ParticipioPasado => &self.participio_pasado,
        }
    }

    /// A tense table.
    pub fn tense(&self, tense: Tense) -> TenseTable<'_> {
        match tense {
            Tense::Presente => TenseTable::Simple(&self.presente_indicativo),
            Tense::Preterito => TenseTable::Simple(&self.preterito_perfecto_simple),
            Tense::Imperfecto => TenseTable::Simple(&self.preterito_imperfecto),
            Tense::Futuro => TenseTable::Simple(&self.futuro_simple),
            Tense::Condicional => TenseTable::Simple(&self.condicional_simple),
            Tense::PresentePerfecto => TenseTable::Simple(&self.presente_perfecto),
            Tense::PreteritoPluscuamperfecto => TenseTable::Simple(&self.preterito_pluscuamperfecto),
            Tense::FuturoPerfecto => TenseTable::Simple(&self.futuro_perfecto),
            Tense::CondicionalPerfecto => TenseTable::Simple(&self.condicional_perfecto),
            Tense::PresenteSubjuntivo => TenseTable::Simple(&self.presente_subjuntivo),
            Tense::PreteritoPerfectoSubjuntivo => TenseTable::Simple(&self.preterito_perfecto_subjuntivo),
            Tense::ImperfectoSubjuntivo => TenseTable::Alternatives(&self.imperfecto_subjuntivo),
            Tense::PluscuamperfectoSubjuntivo => TenseTable::Alternatives(&self.pluscuamperfecto_subjuntivo),
            Tense::Imperativo => TenseTable::Imperative(&self.imperativo),
        }
    }

    /// One form, or an error when the tense has no such pronoun.
    pub fn form(&self, tense: Tense, pronoun: Pronoun) -> Result<String> {
        self.tense(tense).form(pronoun).ok_or_else(|| {
            CliError::InvalidInput(format!("{} has no form for '{}'", tense.label(), pronoun))
        })
    }
}
