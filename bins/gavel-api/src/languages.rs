// Language configuration management
// Loads the language -> runtime-version table from languages.json

use anyhow::{bail, Context, Result};
use gavel_common::types::Language;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct LanguagesFile {
    languages: Vec<LanguageEntry>,
}

/// Registry of enabled languages and their sandbox runtime versions.
/// This is the authoritative source for which languages are judged;
/// a language missing here is a precondition violation, rejected before
/// any network call. Immutable once loaded and injected where needed,
/// so tests can substitute versions and endpoints freely.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    versions: HashMap<Language, String>,
}

impl LanguageRegistry {
    /// Load from languages.json
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;

        let file: LanguagesFile =
            serde_json::from_str(&content).context("Failed to parse languages.json")?;

        Self::from_entries(file.languages)
    }

    pub fn from_entries(entries: Vec<LanguageEntry>) -> Result<Self> {
        let mut versions = HashMap::new();

        for entry in entries {
            match Language::from_str(&entry.name) {
                Some(language) => {
                    versions.insert(language, entry.version);
                }
                None => {
                    bail!("Unknown language '{}' in languages.json", entry.name);
                }
            }
        }

        if versions.is_empty() {
            bail!("No languages configured in languages.json");
        }

        Ok(Self { versions })
    }

    /// Runtime version for a language, if it is enabled
    pub fn version(&self, language: Language) -> Option<&str> {
        self.versions.get(&language).map(String::as_str)
    }

    /// Check if a language is enabled
    pub fn is_enabled(&self, language: Language) -> bool {
        self.versions.contains_key(&language)
    }

    /// All enabled languages
    pub fn enabled_languages(&self) -> Vec<Language> {
        self.versions.keys().copied().collect()
    }
}
