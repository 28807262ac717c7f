//! Output format helpers for CLI commands.

use crate::CliOutput;
use crate::error::ExitCode;
use clap::{Args, ValueEnum};
use search_index_shared::ErrorEnvelope;
use std::fmt::Write;

/// Output format choices for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly text output.
    Text,
    /// Machine-friendly JSON output.
    Json,
}

/// Output-related CLI flags.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format for command responses.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
    /// Emit debug diagnostics (every supplied option) on stderr.
    #[arg(long, global = true)]
    pub verbose: bool,
    /// Render diagnostics on stderr as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Output mode derived from CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct OutputMode {
    pub format: OutputFormat,
}

impl OutputMode {
    /// Build output mode from CLI flags.
    #[must_use]
    pub const fn from_args(args: &OutputArgs) -> Self {
        Self {
            format: args.output,
        }
    }

    /// Returns true when JSON output is requested.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }
}

/// Render `fields` as `key: value` lines after a `status: ok` line.
pub fn format_ok_text(fields: &[(&str, String)]) -> String {
    let mut output = String::from("status: ok\n");
    for (key, value) in fields {
        let _ = writeln!(output, "{key}: {value}");
    }
    output
}

/// Render a JSON payload with a trailing newline.
pub fn format_json(payload: &serde_json::Value) -> Result<String, serde_json::Error> {
    let mut output = serde_json::to_string_pretty(payload)?;
    output.push('\n');
    Ok(output)
}

/// Turn a failure into command output with the matching exit code.
pub fn format_error_output(mode: OutputMode, error: &ErrorEnvelope) -> CliOutput {
    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "error": {
                "code": error.code.to_string(),
                "message": error.message,
                "kind": error.kind.to_string(),
                "metadata": error.metadata,
            },
        });

        // This is a CLI boundary, so JSON serialization errors are internal.
        format_json(&payload).unwrap_or_else(|_| {
            "{\"status\":\"error\",\"error\":{\"code\":\"core:internal\",\"message\":\"internal error\"}}\n".to_string()
        })
    } else {
        let mut output = format!("status: error\ncode: {}\nmessage: {}\n", error.code, error.message);
        for (key, value) in &error.metadata {
            let _ = writeln!(output, "{key}: {value}");
        }
        output
    };

    CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::for_envelope(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_index_shared::ErrorCode;

    #[test]
    fn text_errors_list_metadata() {
        let error = ErrorEnvelope::expected(
            ErrorCode::new("index_options", "out_of_range"),
            "'ram_buffer_mb' must be strictly positive",
        )
        .with_metadata("option", "ram_buffer_mb")
        .with_metadata("value", "0");

        let output = format_error_output(
            OutputMode {
                format: OutputFormat::Text,
            },
            &error,
        );
        assert_eq!(
            output.stdout,
            "status: error\ncode: index_options:out_of_range\nmessage: 'ram_buffer_mb' must be strictly positive\noption: ram_buffer_mb\nvalue: 0\n"
        );
        assert_eq!(output.exit_code, ExitCode::InvalidInput);
    }

    #[test]
    fn ok_text_lists_fields_in_order() {
        let rendered = format_ok_text(&[("table", "demo.tweets".to_string()), ("path", "-".to_string())]);
        assert_eq!(rendered, "status: ok\ntable: demo.tweets\npath: -\n");
    }
}
