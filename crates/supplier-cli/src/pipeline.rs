//! Load the registry, index it, resolve a ledger, write it back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use indicatif::ProgressBar;
use supplier_ingest::{
    LedgerOptions, LedgerTable, RegistryOptions, default_output_path, read_ledger, read_registry,
    write_ledger,
};
use supplier_match::{BatchOutcome, MatchEngine, RegistryIndex, resolve_batch};
use supplier_model::MatchConfig;
use tracing::{info_span, trace, warn};

use crate::logging::redact_value;
use crate::report::{RegistryStats, RowReport, RunReport};
use crate::sample;

#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub registry: PathBuf,
    pub ledger: PathBuf,
    /// Defaults to `<ledger stem>_resolved.<ext>` next to the ledger.
    pub output: Option<PathBuf>,
    pub dry_run: bool,
    pub config: MatchConfig,
    pub registry_options: RegistryOptions,
    pub ledger_options: LedgerOptions,
}

pub fn load_index(path: &Path, options: &RegistryOptions) -> Result<(RegistryIndex, RegistryStats)> {
    let load = read_registry(path, options)
        .with_context(|| format!("load registry {}", path.display()))?;
    let index = RegistryIndex::build(&load.entries);
    if index.is_empty() {
        warn!(path = %path.display(), "registry has no usable entries");
    }
    let stats = RegistryStats::new(load.entries.len(), load.dropped, &index);
    Ok((index, stats))
}

/// Resolves every row of the requested ledger and writes the result unless
/// `dry_run` is set. `progress` advances once per row.
pub fn resolve_ledger(request: &ResolveRequest, progress: &ProgressBar) -> Result<RunReport> {
    let span = info_span!("resolve", ledger = %request.ledger.display());
    let _guard = span.enter();

    let output = if request.dry_run {
        None
    } else {
        let path = request
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&request.ledger));
        if same_file(&path, &request.ledger) {
            bail!(
                "output path {} is the input ledger; choose another --output",
                path.display()
            );
        }
        Some(path)
    };

    let (index, registry) = load_index(&request.registry, &request.registry_options)?;
    let ledger = read_ledger(&request.ledger, &request.ledger_options)
        .with_context(|| format!("load ledger {}", request.ledger.display()))?;

    progress.set_length(ledger.rows.len() as u64);
    let outcome = resolve_batch(
        MatchEngine::new(&index, request.config),
        &ledger.rows,
        || progress.inc(1),
    );
    progress.finish_and_clear();

    let report_rows = row_reports(&ledger, &outcome);
    if let Some(path) = &output {
        let resolved = ledger.with_rows(outcome.rows);
        write_ledger(path, &resolved, &request.ledger_options)
            .with_context(|| format!("write ledger {}", path.display()))?;
    }

    Ok(RunReport {
        source: request.ledger.display().to_string(),
        output,
        supplier_header: ledger.supplier_header().to_string(),
        code_header: ledger.code_header().to_string(),
        registry,
        config: request.config,
        rows: report_rows,
        summary: outcome.summary,
    })
}

/// Resolves ad-hoc names against a registry file.
pub fn lookup_names(
    registry: &Path,
    options: &RegistryOptions,
    config: MatchConfig,
    names: &[String],
) -> Result<RunReport> {
    let (index, stats) = load_index(registry, options)?;
    let table = LedgerTable::from_names(names.iter().cloned(), &LedgerOptions::default());
    Ok(resolve_table(&index, stats, &table, config, "command line"))
}

/// Resolves the bundled sample ledger against the bundled sample registry.
pub fn run_sample(config: MatchConfig) -> RunReport {
    let entries = sample::registry_entries();
    let index = RegistryIndex::build(&entries);
    let stats = RegistryStats::new(entries.len(), 0, &index);
    let table = LedgerTable::from_names(
        sample::ledger_names().iter().copied(),
        &LedgerOptions::default(),
    );
    resolve_table(&index, stats, &table, config, "sample data")
}

fn resolve_table(
    index: &RegistryIndex,
    registry: RegistryStats,
    table: &LedgerTable,
    config: MatchConfig,
    source: &str,
) -> RunReport {
    let outcome = resolve_batch(MatchEngine::new(index, config), &table.rows, || {});
    RunReport {
        source: source.to_string(),
        output: None,
        supplier_header: table.supplier_header().to_string(),
        code_header: table.code_header().to_string(),
        registry,
        config,
        rows: row_reports(table, &outcome),
        summary: outcome.summary,
    }
}

/// Compares resolved paths when both exist, the paths as given otherwise.
fn same_file(left: &Path, right: &Path) -> bool {
    match (fs::canonicalize(left), fs::canonicalize(right)) {
        (Ok(left), Ok(right)) => left == right,
        _ => left == right,
    }
}

fn row_reports(table: &LedgerTable, outcome: &BatchOutcome) -> Vec<RowReport> {
    table
        .rows
        .iter()
        .zip(&outcome.resolutions)
        .enumerate()
        .map(|(position, (row, resolution))| {
            trace!(
                row = position,
                supplier = redact_value(row.supplier_name().unwrap_or_default()),
                code = %resolution.code,
                stage = resolution.stage.label(),
                "supplier resolved"
            );
            RowReport {
                supplier: row.supplier_name().map(str::to_string),
                resolution: resolution.clone(),
            }
        })
        .collect()
}
