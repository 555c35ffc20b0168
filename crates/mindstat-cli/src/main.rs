mod config;
mod registry;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use config::{CliConfig, ConfigError};
use mindstat_generate::{GenerateOptions, GenerationEngine, GenerationError};
use mindstat_query::{
    DatasetCache, LoadOptions, LoadedDataset, QueryError, coordinates_for, correlation_matrix,
    fetch_dataset_file, filter_by_region, filter_by_year, time_series_for,
};
use registry::{RunContext, init_run_logging, init_stderr_logging, start_run, write_run_report};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("query error: {0}")]
    Query(#[from] QueryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

#[derive(Parser, Debug)]
#[command(name = "mindstat", version, about = "Mental health dataset generator and explorer")]
struct Cli {
    /// Path to a TOML config file (defaults to ./mindstat.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a synthetic dataset and its report.
    Generate(GenerateArgs),
    /// Per-year mean of one field.
    Timeseries(TimeseriesArgs),
    /// Two-feature coordinates for one year.
    Clusters(ClustersArgs),
    /// Correlation matrix for disorder fields.
    Correlation(CorrelationArgs),
    /// Records for a region and/or year.
    Filter(FilterArgs),
    /// Load a dataset and print its load report.
    Inspect(InspectArgs),
    /// Copy a raw dataset file to stdout or a path.
    Fetch(FetchArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Output directory for the dataset.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Dataset file name inside the output directory.
    #[arg(long)]
    file: Option<String>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    start_year: Option<i32>,
    #[arg(long)]
    end_year: Option<i32>,
    /// Directory for run artifacts.
    #[arg(long)]
    runs_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DatasetArg {
    /// Dataset file name inside the data directory.
    #[arg(long)]
    file: Option<String>,
}

#[derive(Args, Debug)]
struct TimeseriesArgs {
    #[arg(long)]
    field: String,
    #[arg(long, default_value = mindstat_query::GLOBAL_REGION)]
    region: String,
    #[command(flatten)]
    dataset: DatasetArg,
}

#[derive(Args, Debug)]
struct ClustersArgs {
    /// Two numeric fields, comma separated.
    #[arg(long, value_delimiter = ',')]
    features: Vec<String>,
    #[arg(long)]
    year: String,
    #[command(flatten)]
    dataset: DatasetArg,
}

#[derive(Args, Debug)]
struct CorrelationArgs {
    #[arg(long, value_delimiter = ',', required = true)]
    fields: Vec<String>,
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long, default_value = mindstat_query::GLOBAL_REGION)]
    region: String,
    #[arg(long)]
    year: Option<String>,
    #[command(flatten)]
    dataset: DatasetArg,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Fail on the first malformed row.
    #[arg(long, default_value_t = false)]
    strict: bool,
    #[command(flatten)]
    dataset: DatasetArg,
}

#[derive(Args, Debug)]
struct FetchArgs {
    #[arg(long)]
    file: Option<String>,
    /// Write the file here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Generate(args) => run_generate(args, config),
        command => {
            init_stderr_logging()?;
            run_query(command, &config, &mut std::io::stdout().lock())
        }
    }
}

fn run_generate(args: GenerateArgs, config: CliConfig) -> Result<(), CliError> {
    let CliConfig { data, mut generate } = config;
    if let Some(start_year) = args.start_year {
        generate.start_year = start_year;
    }
    if let Some(end_year) = args.end_year {
        generate.end_year = end_year;
    }

    let options = GenerateOptions {
        out_dir: args.out_dir.unwrap_or_else(|| data.dir.clone()),
        file_name: args.file.unwrap_or_else(|| data.default_file.clone()),
        seed: args.seed,
        delimiter: data.delimiter_byte()?,
        run_id: Some(Uuid::new_v4().to_string()),
    };
    let run_id = options.run_id.clone().unwrap_or_default();

    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        runs_dir: args.runs_dir.unwrap_or(data.runs_dir),
        dataset_path: options.out_dir.join(&options.file_name),
        seed: options.seed,
        generator: generate.clone(),
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(event = "run_started", run_id = %run_id, run_dir = %run_paths.root.display());

    let engine = GenerationEngine::new(options);
    let result = match engine.run(&generate) {
        Ok(result) => result,
        Err(err) => {
            tracing::error!(event = "run_failed", run_id = %run_id, error = %err);
            return Err(err.into());
        }
    };

    write_run_report(&run_paths, &result.report)?;
    tracing::info!(
        event = "run_finished",
        run_id = %run_id,
        dataset = %result.dataset_path.display(),
        report = %result.report_path.display(),
        records = result.report.total_records
    );

    write_json(&mut std::io::stdout().lock(), &result.report)
}

fn run_query<W: Write>(
    command: Command,
    config: &CliConfig,
    out: &mut W,
) -> Result<(), CliError> {
    let load_options = LoadOptions {
        strict: false,
        delimiter: config.data.delimiter_byte()?,
    };
    let mut cache = DatasetCache::new(config.data.dir.clone(), load_options);
    let default_file = config.data.default_file.as_str();

    match command {
        Command::Timeseries(args) => {
            let loaded = load(&mut cache, &args.dataset, default_file)?;
            let points = time_series_for(&loaded.dataset, &args.field, &args.region)?;
            write_json(out, &points)
        }
        Command::Clusters(args) => {
            let loaded = load(&mut cache, &args.dataset, default_file)?;
            let points =
                coordinates_for(&loaded.dataset, args.features.as_slice(), args.year.as_str())?;
            write_json(out, &points)
        }
        Command::Correlation(args) => write_json(out, &correlation_matrix(args.fields.as_slice())?),
        Command::Filter(args) => {
            let loaded = load(&mut cache, &args.dataset, default_file)?;
            let mut records = filter_by_region(&loaded.dataset, &args.region)?;
            if let Some(year) = args.year.as_deref() {
                records = filter_by_year(&records, year)?;
            }
            write_json(out, &records)
        }
        Command::Inspect(args) => {
            let mut cache = DatasetCache::new(
                config.data.dir.clone(),
                LoadOptions {
                    strict: args.strict,
                    ..load_options
                },
            );
            let loaded = load(&mut cache, &args.dataset, default_file)?;
            write_json(out, &loaded.report)
        }
        Command::Fetch(args) => {
            let download = fetch_dataset_file(
                &config.data.dir,
                Some(args.file.as_deref().unwrap_or(default_file)),
            )?;
            match args.out {
                Some(path) => {
                    std::fs::write(&path, &download.bytes)?;
                    tracing::info!(
                        event = "dataset_fetched",
                        file = %download.file_name,
                        out = %path.display()
                    );
                }
                None => {
                    out.write_all(&download.bytes)?;
                    out.flush()?;
                }
            }
            Ok(())
        }
        Command::Generate(_) => Err(CliError::InvalidArgs(
            "generate is not a query command".to_string(),
        )),
    }
}

fn load(
    cache: &mut DatasetCache,
    dataset: &DatasetArg,
    default_file: &str,
) -> Result<Arc<LoadedDataset>, CliError> {
    let file_name = dataset.file.as_deref().unwrap_or(default_file);
    let loaded = cache.get_or_load(file_name)?;
    if loaded.report.rows_skipped > 0 {
        tracing::warn!(
            event = "rows_skipped",
            file = %file_name,
            skipped = loaded.report.rows_skipped
        );
    }
    Ok(loaded)
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
