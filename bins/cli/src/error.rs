use search_index_shared::{ErrorEnvelope, ErrorKind};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Ok = 0,
    InvalidInput = 2,
    Io = 3,
    Internal = 1,
}

impl ExitCode {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Exit code for a failure surfaced as an envelope.
    #[must_use]
    pub fn for_envelope(envelope: &ErrorEnvelope) -> Self {
        match (envelope.kind, envelope.code.code()) {
            (_, "options_file_not_found" | "options_file_io") => Self::Io,
            (ErrorKind::Expected, _) => Self::InvalidInput,
            (ErrorKind::Invariant | ErrorKind::Unexpected, _) => Self::Internal,
        }
    }
}

#[derive(Debug)]
pub enum CliError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl CliError {
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io(_) => ExitCode::Io,
            Self::Serialization(_) => ExitCode::Internal,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(formatter, "io error: {error}"),
            Self::Serialization(error) => write!(formatter, "serialization error: {error}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_index_shared::{ErrorClass, ErrorCode};

    #[test]
    fn envelopes_map_to_exit_codes() {
        let missing = ErrorEnvelope::expected(
            ErrorCode::new("index_options", "options_file_not_found"),
            "missing",
        );
        let invalid = ErrorEnvelope::expected(
            ErrorCode::new("index_options", "missing_schema"),
            "'schema' required",
        );
        let internal =
            ErrorEnvelope::unexpected(ErrorCode::internal(), "boom", ErrorClass::NonRetriable);

        assert_eq!(ExitCode::for_envelope(&missing), ExitCode::Io);
        assert_eq!(ExitCode::for_envelope(&invalid), ExitCode::InvalidInput);
        assert_eq!(ExitCode::for_envelope(&internal), ExitCode::Internal);
        assert_eq!(ExitCode::InvalidInput.as_u8(), 2);
    }
}
