use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use expedition_tools::export::{self, ExportSummary};
use expedition_tools::normalize::{ExportOptions, ExportProfile, HEADER_ROW};
use expedition_tools::{ExportError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing()?;
    match cli.command {
        Command::Export(args) => execute_export(args),
        Command::Check(args) => execute_check(args),
    }
}

fn execute_export(args: ExportArgs) -> Result<()> {
    if !args.source.input.exists() {
        return Err(ExportError::MissingInput(args.source.input));
    }

    let options = args.source.options();
    let summary = export::export_workbook(&args.source.input, &args.output, &options)?;
    println!(
        "Exported {} expeditions to {}",
        summary.exported,
        args.output.display()
    );
    Ok(())
}

fn execute_check(args: CheckArgs) -> Result<()> {
    if !args.source.input.exists() {
        return Err(ExportError::MissingInput(args.source.input));
    }

    let options = args.source.options();
    let summary = export::check_workbook(&args.source.input, &options)?;
    print_check_summary(&args.source.input, &summary);
    Ok(())
}

fn print_check_summary(input: &Path, summary: &ExportSummary) {
    println!(
        "Checked {}: {} expeditions, {} rows skipped",
        input.display(),
        summary.exported,
        summary.report.skipped_total()
    );
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ExportError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Export expedition content from a designer workbook to engine JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert the workbook into the normalized expedition document.
    Export(ExportArgs),
    /// Validate the workbook and report skipped rows without writing output.
    Check(CheckArgs),
}

#[derive(clap::Args)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output JSON file path.
    #[arg(long)]
    output: PathBuf,
}

#[derive(clap::Args)]
struct CheckArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Input workbook path.
    #[arg(long)]
    input: PathBuf,

    /// Schema revision profile governing validation, the quest-giver column,
    /// and item id serialization.
    #[arg(long, value_enum)]
    profile: ProfileKind,

    /// Override the column supplying the quest-giver NPC identifier.
    #[arg(long)]
    npc_id_column: Option<String>,

    /// 0-indexed header row of every sheet.
    #[arg(long, default_value_t = HEADER_ROW)]
    header_row: usize,
}

impl SourceArgs {
    fn options(&self) -> ExportOptions {
        let mut options = ExportProfile::from(self.profile).options();
        if let Some(column) = &self.npc_id_column {
            options.npc_id_column = column.clone();
        }
        options.header_row = self.header_row;
        options
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ProfileKind {
    Strict,
    Lenient,
}

impl From<ProfileKind> for ExportProfile {
    fn from(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Strict => ExportProfile::Strict,
            ProfileKind::Lenient => ExportProfile::Lenient,
        }
    }
}
