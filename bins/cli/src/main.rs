//! CLI binary entrypoint.

mod commands;
mod error;
mod format;

use clap::{Parser, Subcommand};
use commands::{ResolveInput, TableArgs, ValidateInput, run_resolve, run_validate};
use error::{CliError, ExitCode};
use format::{OutputArgs, OutputMode};
use search_index_adapters::{JsonLogger, StderrLogSink, TracingLogger};
use search_index_ports::{LogLevel, LoggerPort};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "search-index",
    version,
    about = "Validate and resolve per-table search index options",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check an option file the way index creation does, without building a config.
    Validate {
        /// Option file (JSON/TOML).
        #[arg(long)]
        options: PathBuf,
        /// Keyspace of the indexed table; omit to skip column checks.
        #[arg(long)]
        keyspace: Option<String>,
        /// Indexed table name.
        #[arg(long)]
        table: Option<String>,
        /// Stable table id (32 hex digits or UUID form).
        #[arg(long)]
        table_id: Option<String>,
        /// Table column as `name:type` (repeatable).
        #[arg(long = "column")]
        columns: Vec<String>,
        /// Data directory index paths are derived under.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
    /// Resolve an option file into the full index config.
    Resolve {
        /// Option file (JSON/TOML).
        #[arg(long)]
        options: PathBuf,
        /// Keyspace of the indexed table.
        #[arg(long)]
        keyspace: String,
        /// Indexed table name.
        #[arg(long)]
        table: String,
        /// Index name.
        #[arg(long)]
        index: String,
        /// Stable table id (32 hex digits or UUID form).
        #[arg(long)]
        table_id: Option<String>,
        /// Table column as `name:type` (repeatable).
        #[arg(long = "column")]
        columns: Vec<String>,
        /// Data directory index paths are derived under.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);
    let logger = init_logging(&cli.output);

    match run(&cli.command, mode, logger) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn init_logging(args: &OutputArgs) -> Arc<dyn LoggerPort> {
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    if args.log_json {
        return Arc::new(JsonLogger::new(Arc::new(StderrLogSink)).with_min_level(level));
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
    Arc::new(TracingLogger::new())
}

fn run(
    command: &Commands,
    mode: OutputMode,
    logger: Arc<dyn LoggerPort>,
) -> Result<CliOutput, CliError> {
    match command {
        Commands::Validate {
            options,
            keyspace,
            table,
            table_id,
            columns,
            data_dir,
        } => run_validate(
            mode,
            &ValidateInput {
                options: options.as_path(),
                keyspace: keyspace.as_deref(),
                table: table.as_deref(),
                table_id: table_id.as_deref(),
                columns: columns.as_slice(),
                data_dir: data_dir.as_path(),
            },
            logger,
        ),
        Commands::Resolve {
            options,
            keyspace,
            table,
            index,
            table_id,
            columns,
            data_dir,
        } => run_resolve(
            mode,
            &ResolveInput {
                options: options.as_path(),
                table: TableArgs {
                    keyspace: keyspace.as_str(),
                    table: table.as_str(),
                    table_id: table_id.as_deref(),
                    columns: columns.as_slice(),
                },
                index: index.as_str(),
                data_dir: data_dir.as_path(),
            },
            logger,
        ),
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}
