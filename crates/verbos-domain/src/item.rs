//! Item module - the unit of work in a generation batch

use std::fmt;

/// Reasons an identifier cannot be used as an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// Identifier is empty after trimming
    Empty,

    /// Identifier contains a character that cannot appear in a file name
    InvalidCharacter {
        /// The rejected identifier
        value: String,
        /// The offending character
        ch: char,
    },

    /// Identifier starts with a dot (hidden file or relative path component)
    LeadingDot(String),
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemError::Empty => write!(f, "item identifier cannot be empty"),
            ItemError::InvalidCharacter { value, ch } => {
                write!(f, "item identifier '{}' contains invalid character {:?}", value, ch)
            }
            ItemError::LeadingDot(value) => {
                write!(f, "item identifier '{}' cannot start with '.'", value)
            }
        }
    }
}

impl std::error::Error for ItemError {}

/// Identifier of one unit of work (e.g. the infinitive `hablar`)
///
/// The identifier doubles as the stem of the artifact file name, so it is
/// restricted to characters that are safe in a single path component.
///
/// # Examples
///
/// ```
/// use verbos_domain::Item;
///
/// let item = Item::new("comer").unwrap();
/// assert_eq!(item.as_str(), "comer");
///
/// assert!(Item::new("../etc/passwd").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item(String);

impl Item {
    /// Create an item from a raw identifier
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    /// Returns error if the identifier is empty, starts with `.`, or contains
    /// a path separator, whitespace or a control character.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ItemError> {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err(ItemError::Empty);
        }
        if value.starts_with('.') {
            return Err(ItemError::LeadingDot(value.to_string()));
        }
        if let Some(ch) = value
            .chars()
            .find(|c| matches!(c, '/' | '\\' | ':') || c.is_whitespace() || c.is_control())
        {
            return Err(ItemError::InvalidCharacter {
                value: value.to_string(),
                ch,
            });
        }
        Ok(Self(value.to_string()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Item {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Item {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
