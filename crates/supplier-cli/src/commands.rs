use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use supplier_cli::pipeline::{ResolveRequest, lookup_names, resolve_ledger, run_sample};
use supplier_cli::report::RunReport;
use supplier_cli::settings::{Overrides, Settings};
use supplier_cli::summary::{rows_table, verification_lines};

use crate::cli::{DemoArgs, LookupArgs, MatchArgs, OutputFormatArg, RegistryArgs, ResolveArgs};

pub fn run_resolve(args: &ResolveArgs) -> Result<RunReport> {
    let settings = load_settings(&args.matching, &args.registry_layout)?.merged(Overrides {
        supplier_column: args.supplier_column.clone(),
        code_column: args.code_column.clone(),
        ..Overrides::default()
    });
    let request = ResolveRequest {
        registry: args.registry.clone(),
        ledger: args.ledger.clone(),
        output: args.output.clone(),
        dry_run: args.dry_run,
        config: settings.match_config()?,
        registry_options: settings.registry,
        ledger_options: settings.ledger,
    };
    let progress = row_progress()?;
    resolve_ledger(&request, &progress)
}

pub fn run_lookup(args: &LookupArgs) -> Result<()> {
    let settings = load_settings(&args.matching, &args.registry_layout)?;
    let report = lookup_names(
        &args.registry,
        &settings.registry,
        settings.match_config()?,
        &args.names,
    )?;
    emit(&report, args.format)
}

pub fn run_demo(args: &DemoArgs) -> Result<()> {
    let settings = load_settings(&args.matching, &RegistryArgs::default())?;
    let report = run_sample(settings.match_config()?);
    emit(&report, args.format)
}

/// Settings file merged with the matching and registry flags.
fn load_settings(matching: &MatchArgs, registry: &RegistryArgs) -> Result<Settings> {
    let settings = Settings::load_optional(matching.config.as_deref())?;
    Ok(settings.merged(Overrides {
        threshold: matching.threshold,
        scorer: matching.scorer,
        registry_format: registry.registry_format.map(Into::into),
        registry_delimiter: registry.registry_delimiter,
        ..Overrides::default()
    }))
}

fn emit(report: &RunReport, format: OutputFormatArg) -> Result<()> {
    match format {
        OutputFormatArg::Table => {
            println!(
                "Matching: {} scorer, threshold {}",
                report.config.scorer, report.config.threshold
            );
            println!("{}", rows_table(report));
        }
        OutputFormatArg::Plain => print!("{}", verification_lines(report)),
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(report).context("serialize report")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Row progress on stderr, hidden when stderr is not a terminal.
fn row_progress() -> Result<ProgressBar> {
    if !io::stderr().is_terminal() {
        return Ok(ProgressBar::hidden());
    }
    let progress = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} rows ({eta})")?
            .progress_chars("=> "),
    );
    Ok(progress)
}
