//! Matching configuration shared by the resolver and its callers.
//!
//! The core carries no default threshold: every caller picks its own cutoff,
//! since the value trades precision for recall.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Similarity cutoff in `[0, 100]` for accepting an approximate match.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    /// Validates `value` as a threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidThreshold`] for NaN or values outside `[0, 100]`.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ModelError::InvalidThreshold(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// True when `score` meets or exceeds the cutoff.
    pub fn accepts(self, score: f64) -> bool {
        score >= self.0
    }
}

impl TryFrom<f64> for Threshold {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

impl FromStr for Threshold {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| ModelError::InvalidThreshold(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token-based similarity scorer used by the approximate stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scorer {
    /// Compares shared tokens against each side's leftovers; tolerant of insertions.
    #[default]
    TokenSet,
    /// Compares the sorted token sequences; tolerant of reordering only.
    TokenSort,
}

impl Scorer {
    pub const ALL: [Scorer; 2] = [Scorer::TokenSet, Scorer::TokenSort];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TokenSet => "token-set",
            Self::TokenSort => "token-sort",
        }
    }
}

impl FromStr for Scorer {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "token-set" => Ok(Self::TokenSet),
            "token-sort" => Ok(Self::TokenSort),
            _ => Err(ModelError::UnknownScorer(s.to_string())),
        }
    }
}

impl fmt::Display for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold and scorer for one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub threshold: Threshold,
    #[serde(default)]
    pub scorer: Scorer,
}

impl MatchConfig {
    pub fn new(threshold: Threshold, scorer: Scorer) -> Self {
        Self { threshold, scorer }
    }

    /// Config with the given threshold and the token-set scorer.
    pub fn with_threshold(threshold: Threshold) -> Self {
        Self::new(threshold, Scorer::default())
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }
}
