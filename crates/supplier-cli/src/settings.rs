//! Optional TOML settings file.
//!
//! ```toml
//! [matching]
//! threshold = 90
//! scorer = "token-set"
//!
//! [registry]
//! format = "lines"
//! delimiter = "\t"
//!
//! [ledger]
//! supplier_column = "pembekal"
//! code_column = "kod_pembekal"
//! ```
//!
//! Every key is optional. Command-line flags win over the file, and the file
//! wins over the built-in defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use supplier_ingest::{LedgerOptions, RegistryFormat, RegistryOptions};
use supplier_model::{MatchConfig, Scorer, Threshold};

/// Threshold used when neither a flag nor the settings file sets one.
pub const DEFAULT_THRESHOLD: f64 = 90.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub matching: MatchingSettings,
    pub registry: RegistryOptions,
    pub ledger: LedgerOptions,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchingSettings {
    pub threshold: Option<Threshold>,
    pub scorer: Option<Scorer>,
}

/// Values given on the command line; `None` defers to the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub threshold: Option<Threshold>,
    pub scorer: Option<Scorer>,
    pub registry_format: Option<RegistryFormat>,
    pub registry_delimiter: Option<char>,
    pub supplier_column: Option<String>,
    pub code_column: Option<String>,
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse settings")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid settings in {}", path.display()))
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Applies command-line overrides on top of the file values.
    #[must_use]
    pub fn merged(mut self, overrides: Overrides) -> Self {
        if let Some(threshold) = overrides.threshold {
            self.matching.threshold = Some(threshold);
        }
        if let Some(scorer) = overrides.scorer {
            self.matching.scorer = Some(scorer);
        }
        if let Some(format) = overrides.registry_format {
            self.registry.format = format;
        }
        if let Some(delimiter) = overrides.registry_delimiter {
            self.registry.delimiter = delimiter;
        }
        if let Some(column) = overrides.supplier_column {
            self.ledger.supplier_column = column;
        }
        if let Some(column) = overrides.code_column {
            self.ledger.code_column = column;
        }
        self
    }

    pub fn match_config(&self) -> Result<MatchConfig> {
        let threshold = match self.matching.threshold {
            Some(threshold) => threshold,
            None => Threshold::new(DEFAULT_THRESHOLD)?,
        };
        Ok(MatchConfig::new(
            threshold,
            self.matching.scorer.unwrap_or_default(),
        ))
    }
}
