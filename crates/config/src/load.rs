//! Option file loading helpers.
//!
//! Index definitions are kept as flat option maps. Files may be JSON or TOML
//! objects; scalar values are stringified so that the resolver sees exactly
//! what an operator would have written in a `WITH OPTIONS` clause.

use crate::index_config::IndexConfig;
use crate::options::SCHEMA_OPTION;
use crate::resolver::RawOptions;
use search_index_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use std::path::Path;

/// Supported option file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsFormat {
    /// JSON object.
    Json,
    /// TOML table.
    Toml,
}

impl OptionsFormat {
    /// Detect the format from a file extension (JSON when absent).
    pub fn from_path(path: &Path) -> Result<Self, ErrorEnvelope> {
        let ext = path
            .extension()
            .and_then(|value| value.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            None | Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some(other) => Err(ErrorEnvelope::expected(
                ErrorCode::new("index_options", "unsupported_format"),
                "unsupported options format; use .json or .toml",
            )
            .with_metadata("extension", other.to_string())),
        }
    }
}

/// Read an option map from a `.json` or `.toml` file.
pub fn load_index_options_from_path(path: &Path) -> Result<RawOptions, ErrorEnvelope> {
    let format = OptionsFormat::from_path(path)?;
    let contents = read_options_file(path)?;
    parse_index_options(&contents, format)
        .map_err(|error| error.with_metadata("path", path.to_string_lossy().to_string()))
}

/// Parse an option map from text.
///
/// Strings are kept verbatim, numbers and booleans are rendered as text. A
/// nested object is only accepted for `schema`, where it is re-encoded as
/// compact JSON.
pub fn parse_index_options(
    input: &str,
    format: OptionsFormat,
) -> Result<RawOptions, ErrorEnvelope> {
    match format {
        OptionsFormat::Json => {
            let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(input)
                .map_err(|error| {
                    ErrorEnvelope::expected(
                        ErrorCode::new("index_options", "invalid_json"),
                        format!("invalid options JSON: {error}"),
                    )
                })?;
            object
                .into_iter()
                .map(|(option, value)| {
                    let value = json_option_value(&option, value)?;
                    Ok((option, value))
                })
                .collect()
        },
        OptionsFormat::Toml => {
            let table: toml::Table = toml::from_str(input).map_err(|error| {
                ErrorEnvelope::expected(
                    ErrorCode::new("index_options", "invalid_toml"),
                    format!("invalid options TOML: {error}"),
                )
            })?;
            table
                .into_iter()
                .map(|(option, value)| {
                    let value = toml_option_value(&option, value)?;
                    Ok((option, value))
                })
                .collect()
        },
    }
}

/// Serialize a resolved config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &IndexConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize index config: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

fn json_option_value(option: &str, value: serde_json::Value) -> Result<String, ErrorEnvelope> {
    match value {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        serde_json::Value::Bool(flag) => Ok(flag.to_string()),
        serde_json::Value::Object(_) if option == SCHEMA_OPTION => Ok(value.to_string()),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Err(invalid_option_value(option))
        },
    }
}

fn toml_option_value(option: &str, value: toml::Value) -> Result<String, ErrorEnvelope> {
    match value {
        toml::Value::String(text) => Ok(text),
        toml::Value::Integer(number) => Ok(number.to_string()),
        toml::Value::Float(number) => Ok(number.to_string()),
        toml::Value::Boolean(flag) => Ok(flag.to_string()),
        toml::Value::Table(table) if option == SCHEMA_OPTION => serde_json::to_string(&table)
            .map_err(|error| {
                ErrorEnvelope::expected(
                    ErrorCode::new("index_options", "invalid_option_value"),
                    format!("schema table cannot be encoded as JSON: {error}"),
                )
                .with_metadata("option", option.to_string())
            }),
        toml::Value::Datetime(_) | toml::Value::Array(_) | toml::Value::Table(_) => {
            Err(invalid_option_value(option))
        },
    }
}

fn invalid_option_value(option: &str) -> ErrorEnvelope {
    ErrorEnvelope::expected(
        ErrorCode::new("index_options", "invalid_option_value"),
        format!("option '{option}' must be a string, number or boolean"),
    )
    .with_metadata("option", option.to_string())
}

fn read_options_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => {
                ErrorCode::new("index_options", "options_file_not_found")
            },
            _ => ErrorCode::new("index_options", "options_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read options file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}
