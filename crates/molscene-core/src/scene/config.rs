use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid alias file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Case-insensitive mapping from friendly target names to chain letters.
///
/// Selection targets are chain letters internally, but interactive callers
/// refer to well-known sub-complexes by name. Which names map to which
/// letters is a property of the loaded data, so the table is configuration:
/// it can be loaded from a TOML file shaped like
///
/// ```toml
/// [aliases]
/// ponatinib = "D"
/// "abl kinase" = "A"
/// water = "W"
/// ```
///
/// The default table carries exactly those three entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainAliases {
    #[serde(default)]
    aliases: HashMap<String, char>,
}

impl Default for ChainAliases {
    fn default() -> Self {
        let mut aliases = HashMap::new();
        let _ = aliases.insert("ponatinib".to_string(), 'D');
        let _ = aliases.insert("abl kinase".to_string(), 'A');
        let _ = aliases.insert("water".to_string(), 'W');
        Self { aliases }
    }
}

impl ChainAliases {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Resolves a raw target string to a chain letter.
    ///
    /// Single-character inputs are taken as chain letters directly; anything
    /// longer is looked up case-insensitively in the alias table.
    pub fn resolve(&self, raw: &str) -> Option<char> {
        let trimmed = raw.trim();
        let mut chars = trimmed.chars();
        if let (Some(only), None) = (chars.next(), chars.next()) {
            return Some(only);
        }
        self.aliases
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
            .map(|(_, &chain)| chain)
    }
}
