//! Command-line arguments for the supplier resolver.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use supplier_ingest::RegistryFormat;
use supplier_model::{Scorer, Threshold};

#[derive(Parser)]
#[command(
    name = "supplier-resolve",
    version,
    about = "Fill asset ledger supplier codes from a supplier registry",
    long_about = "Fill asset ledger supplier codes from a supplier registry.\n\n\
                  Each ledger name is looked up exactly (ignoring case and spaces),\n\
                  then by token similarity against the cleaned registry names.\n\
                  Approximate matches below the threshold are left blank."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include supplier names in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve every ledger row and write the updated ledger.
    Resolve(ResolveArgs),

    /// Resolve names given on the command line.
    Lookup(LookupArgs),

    /// Run the bundled sample registry and ledger.
    Demo(DemoArgs),
}

/// Flags shared by every command that matches names.
#[derive(Args)]
pub struct MatchArgs {
    /// Minimum similarity (0-100) for an approximate match [default: 90].
    #[arg(long, value_name = "N")]
    pub threshold: Option<Threshold>,

    /// Similarity scorer for the approximate stage [default: token-set].
    #[arg(long, value_name = "SCORER")]
    pub scorer: Option<Scorer>,

    /// TOML settings file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// How the registry file is laid out.
#[derive(Args, Default)]
pub struct RegistryArgs {
    /// Registry layout [default: lines].
    #[arg(long = "registry-format", value_enum)]
    pub registry_format: Option<RegistryFormatArg>,

    /// Registry field separator [default: tab].
    #[arg(long = "registry-delimiter", value_name = "CHAR")]
    pub registry_delimiter: Option<char>,
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// Supplier registry file.
    #[arg(value_name = "REGISTRY")]
    pub registry: PathBuf,

    /// Asset ledger (CSV or TSV) with a supplier name column.
    #[arg(value_name = "LEDGER")]
    pub ledger: PathBuf,

    /// Output ledger path (default: <LEDGER stem>_resolved.<ext>).
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub matching: MatchArgs,

    #[command(flatten)]
    pub registry_layout: RegistryArgs,

    /// Ledger column holding supplier names [default: pembekal].
    #[arg(long = "supplier-column", value_name = "NAME")]
    pub supplier_column: Option<String>,

    /// Ledger column receiving resolved codes [default: kod_pembekal].
    #[arg(long = "code-column", value_name = "NAME")]
    pub code_column: Option<String>,

    /// Resolve and report without writing the output ledger.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print every row instead of only the unresolved ones.
    #[arg(long)]
    pub details: bool,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Supplier registry file.
    #[arg(value_name = "REGISTRY")]
    pub registry: PathBuf,

    /// Supplier names to resolve.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,

    #[command(flatten)]
    pub matching: MatchArgs,

    #[command(flatten)]
    pub registry_layout: RegistryArgs,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct DemoArgs {
    #[command(flatten)]
    pub matching: MatchArgs,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RegistryFormatArg {
    /// Header line, then `id<TAB>name` per line.
    Lines,
    /// Delimited table with detected id and name columns.
    Table,
}

impl From<RegistryFormatArg> for RegistryFormat {
    fn from(format: RegistryFormatArg) -> Self {
        match format {
            RegistryFormatArg::Lines => RegistryFormat::Lines,
            RegistryFormatArg::Table => RegistryFormat::Table,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    /// `supplier | code` lines.
    Plain,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
