//! jsonflat CLI.
//!
//! Flattens a JSON document from a file or stdin, or runs a golden-vector
//! corpus. Failures are reported as a single JSON line on stdout:
//! `{"err":{"code":N,"name":"...","message":"..."}}` with exit code 1.

use clap::{ArgAction, Args, Parser, Subcommand};
use jsonflat::conformance::{CorpusRunner, TestResult};
use jsonflat::output::{self, OutputFormat};
use jsonflat::{FlattenError, FlattenOptions, Flattener};
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jsonflat")]
#[command(about = "Flatten nested JSON objects into (path, value) pairs", long_about = None)]
#[command(version)]
struct Cli {
    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten a JSON document
    Flatten(FlattenArgs),

    /// Run a golden-vector corpus file
    Check {
        /// Path to the corpus JSON file
        corpus: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct FlattenArgs {
    /// Input file; stdin when omitted or "-"
    file: Option<PathBuf>,

    /// JSON options file; the flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path segment delimiter [default: ,]
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Text emitted for null leaves [default: null]
    #[arg(long)]
    null_text: Option<String>,

    /// Output format: lines, json, or list
    #[arg(short, long, default_value_t = OutputFormat::Lines)]
    format: OutputFormat,

    /// Maximum object nesting depth
    #[arg(long)]
    max_depth: Option<u64>,

    /// Maximum input size in bytes
    #[arg(long)]
    max_input_size: Option<u64>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Corpus(String),

    #[error(transparent)]
    Flatten(#[from] FlattenError),
}

impl CliError {
    fn code(&self) -> u32 {
        match self {
            CliError::Io { .. } => 1,
            CliError::Config { .. } => 2,
            CliError::Corpus(_) => 3,
            CliError::Flatten(e) => e.code(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            CliError::Io { .. } => "Io",
            CliError::Config { .. } => "Config",
            CliError::Corpus(_) => "Corpus",
            CliError::Flatten(e) => e.name(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Flatten(args)) => run_flatten(&args),
        Some(Commands::Check { corpus }) => run_check(&corpus),
        Some(Commands::Version) => {
            println!("jsonflat v{}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("jsonflat v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            let line = serde_json::json!({
                "err": { "code": e.code(), "name": e.name(), "message": e.to_string() }
            });
            println!("{}", line);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn run_flatten(args: &FlattenArgs) -> Result<ExitCode, CliError> {
    let options = load_options(args)?;
    debug!(?options, "resolved options");

    let input = read_input(args.file.as_deref(), options.limits.max_input_size)?;
    let pairs = Flattener::new(options).flatten(&input)?;
    info!(pairs = pairs.len(), "flattened input");

    write_stdout(&output::render(&pairs, args.format))?;
    Ok(ExitCode::SUCCESS)
}

fn run_check(path: &Path) -> Result<ExitCode, CliError> {
    let runner = CorpusRunner::load(path).map_err(CliError::Corpus)?;
    info!(vectors = runner.vector_count(), "loaded corpus");

    let results = runner.run_all();
    let mut report = String::new();
    for (id, result) in &results.details {
        match result {
            TestResult::Pass => {}
            TestResult::Fail { expected, actual } => {
                report.push_str(&format!("FAIL {}: expected {}, actual {}\n", id, expected, actual));
            }
            TestResult::Error { message } => {
                report.push_str(&format!("ERROR {}: {}\n", id, message));
            }
        }
    }
    report.push_str(&results.summary());
    report.push('\n');
    write_stdout(&report)?;

    if results.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Options from the config file (if any), then command-line overrides.
fn load_options(args: &FlattenArgs) -> Result<FlattenOptions, CliError> {
    let mut options = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| CliError::Config {
                path: path.display().to_string(),
                source,
            })?
        }
        None => FlattenOptions::default(),
    };

    if let Some(delimiter) = &args.delimiter {
        options.delimiter = delimiter.clone();
    }
    if let Some(null_text) = &args.null_text {
        options.null_text = null_text.clone();
    }
    if args.max_depth.is_some() {
        options.limits.max_nesting_depth = args.max_depth;
    }
    if args.max_input_size.is_some() {
        options.limits.max_input_size = args.max_input_size;
    }
    Ok(options)
}

/// Read the whole input; non-UTF-8 input is invalid JSON. With a size limit
/// at most `limit + 1` bytes are held in memory.
fn read_input(file: Option<&Path>, limit: Option<u64>) -> Result<String, CliError> {
    let mut bytes = Vec::new();
    let (label, size) = match file {
        Some(path) if path != Path::new("-") => {
            let label = path.display().to_string();
            let io_error = |source| CliError::Io {
                path: label.clone(),
                source,
            };
            let file = fs::File::open(path).map_err(io_error)?;
            if let Some(limit) = limit {
                let size = file.metadata().map_err(io_error)?.len();
                if size > limit {
                    return Err(FlattenError::InputTooLarge(size, limit).into());
                }
            }
            let size = read_bounded(file, limit, &mut bytes).map_err(io_error)?;
            (label, size)
        }
        _ => {
            let size = read_bounded(io::stdin().lock(), limit, &mut bytes).map_err(|source| {
                CliError::Io {
                    path: "<stdin>".to_string(),
                    source,
                }
            })?;
            ("<stdin>".to_string(), size)
        }
    };
    debug!(input = %label, size, "read input");

    if let Some(limit) = limit {
        if size > limit {
            return Err(FlattenError::InputTooLarge(size, limit).into());
        }
    }

    String::from_utf8(bytes)
        .map_err(|e| FlattenError::InvalidJson(format!("input is not valid UTF-8: {}", e)).into())
}

/// Read into `bytes`, keeping at most `limit + 1` bytes. Returns the total
/// input size; anything past that is counted and discarded.
fn read_bounded<R: Read>(
    mut reader: R,
    limit: Option<u64>,
    bytes: &mut Vec<u8>,
) -> io::Result<u64> {
    let Some(limit) = limit else {
        return reader.read_to_end(bytes).map(|n| n as u64);
    };
    let held = reader
        .by_ref()
        .take(limit.saturating_add(1))
        .read_to_end(bytes)? as u64;
    if held <= limit {
        return Ok(held);
    }
    let rest = io::copy(&mut reader, &mut io::sink())?;
    Ok(held + rest)
}

fn write_stdout(text: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    let written = stdout.write_all(text.as_bytes());
    written
        .and_then(|()| stdout.flush())
        .map_err(|source| CliError::Io {
            path: "<stdout>".to_string(),
            source,
        })
}
