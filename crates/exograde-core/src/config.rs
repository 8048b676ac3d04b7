//! Grading policy configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How submitted words are matched against the expected words of a
/// text-with-blanks exercise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankMatching {
    /// Blank `g` must hold word `g`.
    #[default]
    Positional,
    /// Each submitted word consumes one matching expected word, wherever it
    /// was placed.
    AnyOrder,
}

/// Top-level grading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Matching policy for `fill_in_blanks` and `word_placement`.
    #[serde(default)]
    pub blank_matching: BlankMatching,
    /// Elided prefixes stripped before comparing underlined words
    /// (`l'autoroute` matches `autoroute`).
    #[serde(default = "default_elisions")]
    pub elisions: Vec<String>,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            blank_matching: BlankMatching::default(),
            elisions: default_elisions(),
        }
    }
}

fn default_elisions() -> Vec<String> {
    ["l'", "d'", "n'", "m'", "t'", "s'", "c'", "j'", "qu'"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl GradingConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GradingConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise from `exograde.toml` in the
    /// current directory if it exists, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let local = Path::new("exograde.toml");
        if local.exists() {
            tracing::debug!("using {}", local.display());
            return Self::load(local);
        }
        Ok(Self::default())
    }
}
