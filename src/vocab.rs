//! Persona vocabulary: demonyms, adjectives, and language colors.
//!
//! All lookup data is embedded at compile time and parsed once at process
//! start; the resulting tables are read-only for the rest of the run.

use crate::models::Color;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const DEMONYMS_TOML: &str = include_str!("../data/demonyms.toml");
const COLORS_TOML: &str = include_str!("../data/colors.toml");
const ADJECTIVES_TXT: &str = include_str!("../data/adjectives.txt");

/// Read-only lookup tables used to name personas.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    demonyms: IndexMap<String, String>,
    colors: IndexMap<String, String>,
    adjectives: Vec<String>,
}

impl Vocabulary {
    /// Load the built-in vocabulary from the embedded data files.
    pub fn builtin() -> Result<Self> {
        let demonyms: IndexMap<String, String> =
            toml::from_str(DEMONYMS_TOML).context("Failed to parse built-in demonym table")?;
        let colors: IndexMap<String, String> =
            toml::from_str(COLORS_TOML).context("Failed to parse built-in color table")?;
        let adjectives: Vec<String> = ADJECTIVES_TXT
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            demonyms,
            colors,
            adjectives,
        })
    }

    /// Build a vocabulary from explicit tables.
    pub fn new(
        demonyms: IndexMap<String, String>,
        colors: IndexMap<String, String>,
        adjectives: Vec<String>,
    ) -> Self {
        Self {
            demonyms,
            colors,
            adjectives,
        }
    }

    /// Look up the practitioner name for a language, if one exists.
    pub fn demonym(&self, language: &str) -> Option<&str> {
        self.demonyms.get(language).map(String::as_str)
    }

    /// Draw one adjective at random.
    pub fn random_adjective(&self) -> String {
        self.adjectives
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_default()
    }

    /// Display color for a language. Languages without a table entry get a
    /// deterministic color derived from the language name, so repeated
    /// requests render the same chart.
    pub fn color_for_language(&self, language: &str) -> Color {
        if let Some(color) = self.colors.get(language) {
            return color.clone();
        }
        let mut hasher = DefaultHasher::new();
        language.hash(&mut hasher);
        format!("#{:06x}", hasher.finish() & 0x00ff_ffff)
    }
}
