// crates/wakedrag/src/main.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wakedrag_core::normalize::normalize;
use wakedrag_core::{CalculationError, TableSchema, WakeCalculator, WakeConfig};
use wakedrag_parser::{parse_table_file, ParsedTable};

mod export;
mod render;
mod settings;

use render::CalculationReport;
use settings::Overrides;

/// Drag from wind-tunnel wake surveys
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Emit logs as JSON lines (verbosity follows RUST_LOG)
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute drag, C_D and SCD from a wake traverse (CSV or XLSX)
    Calculate(CalculateArgs),
    /// Show how the columns of a traverse file are classified
    Inspect(InspectArgs),
    /// Print the default configuration as TOML
    Defaults,
}

#[derive(Args, Debug)]
struct CalculateArgs {
    /// Traverse CSV or XLSX with a `z (mm)` column and `P_tot_y_*` columns
    input: PathBuf,
    #[command(flatten)]
    overrides: Overrides,
    /// Print the full report as JSON instead of tables
    #[arg(long)]
    json: bool,
    /// Write the per-row wake profile (.csv or .parquet)
    #[arg(long)]
    profile_out: Option<PathBuf>,
    /// Write the per-segment integration terms (.csv or .parquet)
    #[arg(long)]
    segments_out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    input: PathBuf,
    #[command(flatten)]
    overrides: Overrides,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Command::Calculate(args) => handle_calculate(args),
        Command::Inspect(args) => handle_inspect(args),
        Command::Defaults => handle_defaults(),
    }
}

/// Keeps the short user-facing message on top of the detailed one.
fn describe(err: CalculationError) -> anyhow::Error {
    let message = err.message();
    anyhow::Error::new(err).context(message)
}

fn load_table(input: &Path) -> Result<ParsedTable> {
    let parsed = parse_table_file(input)
        .with_context(|| format!("failed to load {}", input.display()))?;
    info!(
        path = %input.display(),
        format = parsed.format,
        rows = parsed.table.len(),
        hash = parsed.file_hash.as_str(),
        "loaded measurement table"
    );
    Ok(parsed)
}

fn handle_calculate(args: CalculateArgs) -> Result<()> {
    let config = args.overrides.resolve()?;
    let parsed = load_table(&args.input)?;

    let calculator = WakeCalculator::from_config(&config);
    let result = calculator.run(&parsed.table).map_err(describe)?;

    if let Some(path) = &args.profile_out {
        let frame = result.profile.rows_frame()?;
        export::write_frame(path, &frame)?;
        info!(path = %path.display(), rows = frame.height(), "wrote wake profile");
    }
    if let Some(path) = &args.segments_out {
        let frame = result.profile.segments_frame()?;
        export::write_frame(path, &frame)?;
        info!(path = %path.display(), rows = frame.height(), "wrote wake segments");
    }

    let report = CalculationReport {
        source: args.input.display().to_string(),
        file_hash: &parsed.file_hash,
        format: parsed.format,
        constants: *calculator.constants(),
        options: *calculator.options(),
        result: &result,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render::summary_table(&report));
        println!("{}", render::profile_table(&result));
    }

    Ok(())
}

fn handle_inspect(args: InspectArgs) -> Result<()> {
    let config = args.overrides.resolve()?;
    let parsed = load_table(&args.input)?;

    let schema = TableSchema::discover(&parsed.table.columns, config.options.reference_position_mm)
        .map_err(describe)?;
    println!("{}", render::schema_table(&parsed, &schema));
    if !schema.has_position {
        println!(
            "warning: no '{}' column; no row can be used",
            wakedrag_core::schema::POSITION_COLUMN
        );
    }

    println!("format: {}", parsed.format);
    println!("rows: {}", parsed.table.len());
    match normalize(&parsed.table, &schema) {
        Ok(table) => println!("usable rows: {}", table.len()),
        Err(err) => println!("usable rows: none ({err})"),
    }
    println!("blake3: {}", parsed.file_hash);

    Ok(())
}

fn handle_defaults() -> Result<()> {
    let text = WakeConfig::default().to_toml_string()?;
    print!("{text}");
    Ok(())
}
