//! `validate` command handler.

use super::{TableArgs, build_resolver, invalid_arguments};
use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, format_error_output, format_json, format_ok_text};
use search_index_config::load_index_options_from_path;
use search_index_domain::{Identity, TableMetadata};
use search_index_ports::LoggerPort;
use search_index_shared::{ErrorEnvelope, ResultExt};
use std::path::Path;
use std::sync::Arc;

/// Inputs for the validate command.
#[derive(Debug)]
pub struct ValidateInput<'a> {
    pub options: &'a Path,
    pub keyspace: Option<&'a str>,
    pub table: Option<&'a str>,
    pub table_id: Option<&'a str>,
    pub columns: &'a [String],
    pub data_dir: &'a Path,
}

/// Check an option file without building a config.
pub fn run_validate(
    mode: OutputMode,
    input: &ValidateInput<'_>,
    logger: Arc<dyn LoggerPort>,
) -> Result<CliOutput, CliError> {
    let table = match validate_options(input, logger) {
        Ok(table) => table,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };
    let table = table.map_or_else(|| "unknown".to_string(), |table| table.to_string());
    let options = input.options.display().to_string();

    let stdout = if mode.is_json() {
        format_json(&serde_json::json!({
            "status": "ok",
            "optionsPath": options,
            "table": table,
        }))?
    } else {
        format_ok_text(&[("options", options), ("table", table)])
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn validate_options(
    input: &ValidateInput<'_>,
    logger: Arc<dyn LoggerPort>,
) -> Result<Option<TableMetadata>, ErrorEnvelope> {
    let table = match (input.keyspace, input.table) {
        (Some(keyspace), Some(table)) => Some(
            TableArgs {
                keyspace,
                table,
                table_id: input.table_id,
                columns: input.columns,
            }
            .build()?,
        ),
        (None, None) if input.columns.is_empty() => None,
        _ => {
            return Err(invalid_arguments(
                "--keyspace and --table must be given together; --column needs both",
            ));
        },
    };

    let options = load_index_options_from_path(input.options)?;
    let resolver = build_resolver(input.data_dir, logger);
    resolver
        .validate(&options, Identity::from(table.as_ref()))
        .into_envelope()?;
    Ok(table)
}
