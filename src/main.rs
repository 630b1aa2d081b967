use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use zvuk_tools::canonical::Canonicalizer;
use zvuk_tools::io::excel_write;
use zvuk_tools::model::{RunSummary, SOURCE_HEADER, Table};
use zvuk_tools::sync::{self, RunReport};
use zvuk_tools::{Result, ToolError};

const DEFAULT_SOURCE: &str = "zvukaři.csv";
const DEFAULT_DICTIONARY: &str = "zvukaři_řízený_slovník.csv";
const DEFAULT_ORDERED: &str = "zvukaři_mapping_ordered.csv";
const DEFAULT_REVERSE: &str = "zvukaři_mapping_na_původní.csv";

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let canonicalizer = Canonicalizer::new(cli.header_label.clone());

    let reports = match &cli.command {
        Command::Dictionary(args) => {
            vec![sync::build_dictionary(&canonicalizer, &args.source, &args.output)?]
        }
        Command::Ordered(args) => vec![sync::export_ordered(
            &canonicalizer,
            &args.source,
            &args.dictionary,
            &args.output,
        )?],
        Command::Reverse(args) => vec![sync::export_reverse(
            &canonicalizer,
            &args.source,
            &args.dictionary,
            &args.output,
        )?],
        Command::All(args) => run_all(&canonicalizer, args)?,
    };

    for report in &reports {
        let summary = &report.summary;
        info!(
            workflow = summary.workflow,
            source_rows = summary.source_rows,
            distinct_variants = summary.distinct_variants,
            canonical_names = summary.canonical_names,
            "workflow finished"
        );
        for output in &summary.outputs {
            info!(output = %output.display(), "wrote table");
        }
    }

    if let Some(path) = &cli.workbook {
        let tables: Vec<Table> = reports
            .iter()
            .flat_map(|report| report.tables.iter().cloned())
            .collect();
        excel_write::write_workbook(path, &tables)?;
        info!(workbook = %path.display(), sheets = tables.len(), "wrote workbook");
    }

    if let Some(path) = &cli.summary {
        let summaries: Vec<&RunSummary> = reports.iter().map(|report| &report.summary).collect();
        write_summary(path, &summaries)?;
    }

    Ok(())
}

/// Builds the dictionary, then runs both exports against the fresh file.
fn run_all(canonicalizer: &Canonicalizer, args: &AllArgs) -> Result<Vec<RunReport>> {
    let dictionary = sync::build_dictionary(canonicalizer, &args.source, &args.dictionary)?;
    let ordered =
        sync::export_ordered(canonicalizer, &args.source, &args.dictionary, &args.ordered)?;
    let reverse =
        sync::export_reverse(canonicalizer, &args.source, &args.dictionary, &args.reverse)?;
    Ok(vec![dictionary, ordered, reverse])
}

fn write_summary(path: &Path, summaries: &[&RunSummary]) -> Result<()> {
    let json = serde_json::to_string_pretty(summaries)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Canonicalize sound-engineer credits and re-map source tables."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Header label of the source column; rows repeating it are skipped.
    #[arg(long, global = true, default_value = SOURCE_HEADER)]
    header_label: String,

    /// Also write every produced table as a sheet of this Excel workbook.
    #[arg(long, global = true)]
    workbook: Option<PathBuf>,

    /// Write a JSON summary of the run to this path.
    #[arg(long, global = true)]
    summary: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the variant → canonical dictionary from the source column.
    Dictionary(DictionaryArgs),
    /// Pair every source value with its canonical name, keeping source order.
    Ordered(OrderedArgs),
    /// Group source variants under their canonical names.
    Reverse(ReverseArgs),
    /// Build the dictionary and run both exports.
    All(AllArgs),
}

#[derive(clap::Args)]
struct DictionaryArgs {
    /// Source table; the first column holds the credits (CSV or XLSX).
    #[arg(long, default_value = DEFAULT_SOURCE)]
    source: PathBuf,

    /// Dictionary output path.
    #[arg(long, default_value = DEFAULT_DICTIONARY)]
    output: PathBuf,
}

#[derive(clap::Args)]
struct OrderedArgs {
    /// Source table; the first column holds the credits (CSV or XLSX).
    #[arg(long, default_value = DEFAULT_SOURCE)]
    source: PathBuf,

    /// Dictionary table with `Variant` and `Kanonický název` columns.
    #[arg(long, default_value = DEFAULT_DICTIONARY)]
    dictionary: PathBuf,

    /// Ordered mapping output path.
    #[arg(long, default_value = DEFAULT_ORDERED)]
    output: PathBuf,
}

#[derive(clap::Args)]
struct ReverseArgs {
    /// Source table; the first column holds the credits (CSV or XLSX).
    #[arg(long, default_value = DEFAULT_SOURCE)]
    source: PathBuf,

    /// Dictionary table with `Variant` and `Kanonický název` columns.
    #[arg(long, default_value = DEFAULT_DICTIONARY)]
    dictionary: PathBuf,

    /// Reverse mapping output path; companions are written next to it.
    #[arg(long, default_value = DEFAULT_REVERSE)]
    output: PathBuf,
}

#[derive(clap::Args)]
struct AllArgs {
    #[arg(long, default_value = DEFAULT_SOURCE)]
    source: PathBuf,

    #[arg(long, default_value = DEFAULT_DICTIONARY)]
    dictionary: PathBuf,

    #[arg(long, default_value = DEFAULT_ORDERED)]
    ordered: PathBuf,

    #[arg(long, default_value = DEFAULT_REVERSE)]
    reverse: PathBuf,
}
