//! Batch resolution of ledger rows.
//!
//! Rows are independent: each output row depends only on its own supplier
//! name, the index, and the config. With the `parallel` feature rows are
//! resolved on the rayon pool; output order always matches input order.

use serde::Serialize;
use supplier_model::{LedgerRow, MatchConfig};
use tracing::{debug, info};

use crate::engine::{MatchEngine, MatchStage, Resolution};
use crate::index::RegistryIndex;

/// Per-stage counts for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub exact: usize,
    pub approximate: usize,
    pub rejected: usize,
    pub unmatched: usize,
    pub blank: usize,
}

impl BatchSummary {
    pub fn record(&mut self, stage: &MatchStage) {
        self.total += 1;
        match stage {
            MatchStage::Blank => self.blank += 1,
            MatchStage::Exact => self.exact += 1,
            MatchStage::Approximate { .. } => self.approximate += 1,
            MatchStage::Rejected { .. } => self.rejected += 1,
            MatchStage::Unmatched => self.unmatched += 1,
        }
    }

    pub fn resolved(&self) -> usize {
        self.exact + self.approximate
    }

    pub fn unresolved(&self) -> usize {
        self.total - self.resolved()
    }
}

/// Resolved rows with the resolution behind each one.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub rows: Vec<LedgerRow>,
    pub resolutions: Vec<Resolution>,
    pub summary: BatchSummary,
}

/// Resolves every row, leaving all other fields untouched.
pub fn resolve_all(index: &RegistryIndex, rows: &[LedgerRow], config: &MatchConfig) -> Vec<LedgerRow> {
    resolve_batch(MatchEngine::new(index, *config), rows, || {}).rows
}

/// Resolves every row, calling `tick` once per finished row.
///
/// `tick` may be called from several threads when the `parallel` feature is on.
pub fn resolve_batch<F>(engine: MatchEngine<'_>, rows: &[LedgerRow], tick: F) -> BatchOutcome
where
    F: Fn() + Sync,
{
    let config = engine.config();
    debug!(
        rows = rows.len(),
        threshold = config.threshold.value(),
        scorer = %config.scorer,
        "resolving ledger rows"
    );

    let resolutions = resolve_rows(engine, rows, &tick);

    let mut summary = BatchSummary::default();
    let mut resolved_rows = Vec::with_capacity(rows.len());
    for (row, resolution) in rows.iter().zip(&resolutions) {
        summary.record(&resolution.stage);
        resolved_rows.push(row.with_resolved_code(resolution.code.clone()));
    }

    info!(
        total = summary.total,
        exact = summary.exact,
        approximate = summary.approximate,
        rejected = summary.rejected,
        unmatched = summary.unmatched + summary.blank,
        "ledger resolved"
    );

    BatchOutcome {
        rows: resolved_rows,
        resolutions,
        summary,
    }
}

#[cfg(not(feature = "parallel"))]
fn resolve_rows<F>(engine: MatchEngine<'_>, rows: &[LedgerRow], tick: &F) -> Vec<Resolution>
where
    F: Fn() + Sync,
{
    rows.iter()
        .map(|row| {
            let resolution = engine.resolve_detailed(row.supplier_name());
            tick();
            resolution
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn resolve_rows<F>(engine: MatchEngine<'_>, rows: &[LedgerRow], tick: &F) -> Vec<Resolution>
where
    F: Fn() + Sync,
{
    use rayon::prelude::*;

    rows.par_iter()
        .map(|row| {
            let resolution = engine.resolve_detailed(row.supplier_name());
            tick();
            resolution
        })
        .collect()
}
