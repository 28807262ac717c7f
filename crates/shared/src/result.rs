//! Result helpers for shared error handling.

use crate::errors::ErrorEnvelope;

/// Shared result type used across the workspace.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

/// Extension helpers for results carrying typed crate errors.
pub trait ResultExt<T, E> {
    /// Convert a typed error into the shared envelope.
    fn into_envelope(self) -> Result<T>
    where
        E: Into<ErrorEnvelope>;

    /// Convert into the shared envelope and attach one metadata entry.
    fn with_envelope_metadata(self, key: &str, value: &str) -> Result<T>
    where
        E: Into<ErrorEnvelope>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn into_envelope(self) -> Result<T>
    where
        E: Into<ErrorEnvelope>,
    {
        self.map_err(Into::into)
    }

    fn with_envelope_metadata(self, key: &str, value: &str) -> Result<T>
    where
        E: Into<ErrorEnvelope>,
    {
        self.map_err(|error| error.into().with_metadata(key, value))
    }
}
