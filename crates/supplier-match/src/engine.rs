//! Two-stage name resolution.
//!
//! The exact stage always runs first. The approximate stage is a fallback for
//! exact misses and never refines an exact hit.

use serde::Serialize;
use supplier_model::{MatchConfig, Scorer};

use crate::index::RegistryIndex;
use crate::normalize::{cleaned_name, strict_key};
use crate::score::score;

/// Which stage decided a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum MatchStage {
    /// Query missing or blank.
    Blank,
    /// Strict key found in the registry.
    Exact,
    /// Best corpus entry met the threshold.
    Approximate { score: f64 },
    /// Best corpus entry fell below the threshold.
    Rejected { best_score: f64 },
    /// Nothing to compare against.
    Unmatched,
}

impl MatchStage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Exact => "exact",
            Self::Approximate { .. } => "approximate",
            Self::Rejected { .. } => "rejected",
            Self::Unmatched => "unmatched",
        }
    }

    /// Similarity score of the best candidate, when one was scored.
    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Approximate { score } => Some(*score),
            Self::Rejected { best_score } => Some(*best_score),
            _ => None,
        }
    }
}

/// Resolution of one query, with the reason behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Resolved code; empty when nothing matched.
    pub code: String,
    #[serde(flatten)]
    pub stage: MatchStage,
    /// Cleaned registry name of the best approximate candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<String>,
}

impl Resolution {
    fn empty(stage: MatchStage) -> Self {
        Self {
            code: String::new(),
            stage,
            candidate: None,
        }
    }

    pub fn is_match(&self) -> bool {
        !self.code.is_empty()
    }
}

/// Best-scoring corpus entry for a cleaned query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Position in the corpus.
    pub position: usize,
    pub score: f64,
}

/// Resolver bound to one index and one configuration.
///
/// Holds only shared references, so a single engine can serve many threads.
#[derive(Debug, Clone, Copy)]
pub struct MatchEngine<'a> {
    index: &'a RegistryIndex,
    config: MatchConfig,
}

impl<'a> MatchEngine<'a> {
    pub fn new(index: &'a RegistryIndex, config: MatchConfig) -> Self {
        Self { index, config }
    }

    pub fn config(&self) -> MatchConfig {
        self.config
    }

    /// Resolved code for `query`, empty when unmatched.
    pub fn resolve(&self, query: Option<&str>) -> String {
        self.resolve_detailed(query).code
    }

    pub fn resolve_detailed(&self, query: Option<&str>) -> Resolution {
        let Some(query) = query.filter(|value| !value.trim().is_empty()) else {
            return Resolution::empty(MatchStage::Blank);
        };

        if let Some(bucket) = self.index.exact(&strict_key(query)) {
            return Resolution {
                code: bucket.code().to_string(),
                stage: MatchStage::Exact,
                candidate: None,
            };
        }

        let cleaned = cleaned_name(query);
        let Some(candidate) = self.best_candidate(&cleaned) else {
            return Resolution::empty(MatchStage::Unmatched);
        };
        let entry = &self.index.corpus()[candidate.position];
        if self.config.threshold.accepts(candidate.score) {
            Resolution {
                code: entry.id.clone(),
                stage: MatchStage::Approximate {
                    score: candidate.score,
                },
                candidate: Some(entry.cleaned.clone()),
            }
        } else {
            Resolution {
                code: String::new(),
                stage: MatchStage::Rejected {
                    best_score: candidate.score,
                },
                candidate: Some(entry.cleaned.clone()),
            }
        }
    }

    /// First corpus entry reaching the highest score for `cleaned`.
    ///
    /// Returns `None` when the query or the corpus is empty.
    pub fn best_candidate(&self, cleaned: &str) -> Option<Candidate> {
        if cleaned.is_empty() {
            return None;
        }
        best_in_corpus(self.index, self.config.scorer, cleaned)
    }
}

fn best_in_corpus(index: &RegistryIndex, scorer: Scorer, cleaned: &str) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for (position, entry) in index.corpus().iter().enumerate() {
        let value = score(scorer, cleaned, &entry.cleaned);
        if best.is_none_or(|current| value > current.score) {
            best = Some(Candidate {
                position,
                score: value,
            });
            // Nothing can beat a perfect score; keep the earliest.
            if value >= 100.0 {
                break;
            }
        }
    }
    best
}

/// Resolves one name against `index`.
///
/// Shorthand for [`MatchEngine::resolve`].
pub fn resolve(index: &RegistryIndex, query: Option<&str>, config: &MatchConfig) -> String {
    MatchEngine::new(index, *config).resolve(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use supplier_model::{RegistryEntry, Threshold};

    fn config(threshold: f64) -> MatchConfig {
        MatchConfig::with_threshold(Threshold::new(threshold).unwrap())
    }

    fn index(entries: &[(&str, &str)]) -> RegistryIndex {
        let entries: Vec<RegistryEntry> = entries
            .iter()
            .map(|(id, name)| RegistryEntry::new(*id, *name))
            .collect();
        RegistryIndex::build(&entries)
    }

    #[test]
    fn blank_queries_short_circuit() {
        let index = index(&[("UP001", "ABC SDN BHD")]);
        let engine = MatchEngine::new(&index, config(0.0));
        for query in [None, Some(""), Some("   "), Some("\t\n")] {
            let resolution = engine.resolve_detailed(query);
            assert_eq!(resolution.stage, MatchStage::Blank);
            assert!(!resolution.is_match());
        }
    }

    #[test]
    fn exact_stage_reports_no_score() {
        let index = index(&[("UP001", "ABC SDN BHD")]);
        let resolution = MatchEngine::new(&index, config(100.0)).resolve_detailed(Some("abcsdnbhd"));
        assert_eq!(resolution.code, "UP001");
        assert_eq!(resolution.stage, MatchStage::Exact);
        assert_eq!(resolution.stage.score(), None);
        assert_eq!(resolution.candidate, None);
    }

    #[test]
    fn rejected_candidate_keeps_best_score() {
        let index = index(&[("UP001", "ACTION POINT TECHNOLOGIES")]);
        let resolution =
            MatchEngine::new(&index, config(95.0)).resolve_detailed(Some("ACTION POINT TECHNOLOGY"));
        assert_eq!(resolution.code, "");
        assert_eq!(resolution.stage, MatchStage::Rejected { best_score: 92.0 });
        assert_eq!(
            resolution.candidate.as_deref(),
            Some("action point technologies")
        );
    }

    #[test]
    fn ties_resolve_to_earliest_corpus_entry() {
        let index = index(&[
            ("UP001", "Delta Trading"),
            ("UP002", "Trading Delta"),
        ]);
        let engine = MatchEngine::new(&index, config(90.0));
        let candidate = engine.best_candidate("delta trading co").expect("candidate");
        assert_eq!(candidate.position, 0);
        assert_eq!(engine.resolve(Some("Delta, Trading")), "UP001");
    }

    #[test]
    fn punctuation_only_query_is_unmatched() {
        let index = index(&[("UP001", "ABC SDN BHD")]);
        let resolution = MatchEngine::new(&index, config(0.0)).resolve_detailed(Some("&&"));
        assert_eq!(resolution.stage, MatchStage::Unmatched);
    }

    #[test]
    fn resolution_serializes_with_stage_tag() {
        let index = index(&[("UP001", "ABC SDN BHD")]);
        let resolution = MatchEngine::new(&index, config(90.0)).resolve_detailed(Some("ABC SDN. BHD"));
        let json = serde_json::to_value(&resolution).unwrap();
        assert_eq!(json["code"], "UP001");
        assert_eq!(json["stage"], "approximate");
        assert_eq!(json["score"], 100.0);
        assert_eq!(json["candidate"], "abc sdn bhd");
    }
}
