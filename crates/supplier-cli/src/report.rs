use std::path::PathBuf;

use serde::Serialize;
use supplier_match::{BatchSummary, RegistryIndex, Resolution};
use supplier_model::MatchConfig;

/// Registry size before and after indexing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub entries: usize,
    /// Lines or rows skipped while loading.
    pub dropped: usize,
    pub keys: usize,
    /// Keys that resolve to more than one id.
    pub shared_keys: usize,
    /// Names searchable by the approximate stage.
    pub searchable: usize,
}

impl RegistryStats {
    pub fn new(entries: usize, dropped: usize, index: &RegistryIndex) -> Self {
        Self {
            entries,
            dropped,
            keys: index.bucket_count(),
            shared_keys: index.shared_bucket_count(),
            searchable: index.corpus().len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowReport {
    pub supplier: Option<String>,
    #[serde(flatten)]
    pub resolution: Resolution,
}

/// Everything printed after a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Where the ledger names came from.
    pub source: String,
    pub output: Option<PathBuf>,
    pub supplier_header: String,
    pub code_header: String,
    pub registry: RegistryStats,
    pub config: MatchConfig,
    pub rows: Vec<RowReport>,
    pub summary: BatchSummary,
}

impl RunReport {
    pub fn unresolved(&self) -> impl Iterator<Item = &RowReport> {
        self.rows.iter().filter(|row| !row.resolution.is_match())
    }
}
