//! `resolve` command handler.

use super::{TableArgs, build_resolver};
use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, format_error_output, format_json, format_ok_text};
use search_index_config::{IndexConfig, load_index_options_from_path};
use search_index_domain::{IndexName, TableMetadata};
use search_index_ports::LoggerPort;
use search_index_shared::{ErrorEnvelope, ResultExt};
use std::path::Path;
use std::sync::Arc;

/// Inputs for the resolve command.
#[derive(Debug)]
pub struct ResolveInput<'a> {
    pub options: &'a Path,
    pub table: TableArgs<'a>,
    pub index: &'a str,
    pub data_dir: &'a Path,
}

/// Resolve an option file into a full index config.
pub fn run_resolve(
    mode: OutputMode,
    input: &ResolveInput<'_>,
    logger: Arc<dyn LoggerPort>,
) -> Result<CliOutput, CliError> {
    let (table, index, config) = match resolve_options(input, logger) {
        Ok(resolved) => resolved,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let stdout = if mode.is_json() {
        format_json(&serde_json::json!({
            "status": "ok",
            "table": table.to_string(),
            "index": index.as_str(),
            "config": serde_json::to_value(&config)?,
        }))?
    } else {
        format_resolve_text(&table, &index, &config)
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn resolve_options(
    input: &ResolveInput<'_>,
    logger: Arc<dyn LoggerPort>,
) -> Result<(TableMetadata, IndexName, IndexConfig), ErrorEnvelope> {
    let table = input.table.build()?;
    let index = IndexName::parse(input.index)?;
    let options = load_index_options_from_path(input.options)?;
    let config = build_resolver(input.data_dir, logger)
        .resolve(&options, &table, &index)
        .with_envelope_metadata("index", index.as_str())?;
    Ok((table, index, config))
}

fn format_resolve_text(table: &TableMetadata, index: &IndexName, config: &IndexConfig) -> String {
    format_ok_text(&[
        ("table", table.to_string()),
        ("index", index.to_string()),
        ("path", config.path().display().to_string()),
        ("refresh_seconds", config.refresh_seconds().to_string()),
        ("ram_buffer_mb", config.ram_buffer_mb().to_string()),
        ("max_merge_mb", config.max_merge_mb().to_string()),
        ("max_cached_mb", config.max_cached_mb().to_string()),
        ("indexing_threads", config.indexing_threads().to_string()),
        ("indexing_queues_size", config.indexing_queues_size().to_string()),
        (
            "excluded_data_centers",
            config.excluded_data_centers().join(","),
        ),
        ("schema", config.schema().to_string()),
    ])
}
