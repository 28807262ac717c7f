//! Index option validation failures.

use crate::options::SCHEMA_OPTION;
use search_index_domain::SchemaError;
use search_index_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;

/// Shape an option value was expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedValue {
    /// Finite decimal greater than zero.
    PositiveDouble,
    /// 32-bit integer greater than zero.
    PositiveInteger,
    /// Any 32-bit integer.
    Integer,
}

impl ExpectedValue {
    const fn describe(self) -> &'static str {
        match self {
            Self::PositiveDouble => "a strictly positive double",
            Self::PositiveInteger => "a strictly positive integer",
            Self::Integer => "an integer",
        }
    }
}

/// Rejection of an index definition's options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Option present but not parseable as its type.
    Malformed {
        /// Option name.
        option: &'static str,
        /// Raw value as supplied.
        value: String,
        /// Expected shape.
        expected: ExpectedValue,
    },
    /// Option parsed but is zero, negative, or not finite.
    NotStrictlyPositive {
        /// Option name.
        option: &'static str,
        /// Raw value as supplied.
        value: String,
    },
    /// The `schema` option is absent or blank.
    MissingSchema,
    /// The schema builder or column validation rejected the schema.
    InvalidSchema {
        /// Reason reported by the schema layer.
        reason: String,
    },
}

impl ConfigurationError {
    /// Name of the offending option.
    #[must_use]
    pub const fn option(&self) -> &'static str {
        match self {
            Self::Malformed { option, .. } | Self::NotStrictlyPositive { option, .. } => option,
            Self::MissingSchema | Self::InvalidSchema { .. } => SCHEMA_OPTION,
        }
    }

    /// Raw offending value, when there is one.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Malformed { value, .. } | Self::NotStrictlyPositive { value, .. } => {
                Some(value)
            },
            Self::MissingSchema | Self::InvalidSchema { .. } => None,
        }
    }

    fn error_code(&self) -> ErrorCode {
        match self {
            Self::Malformed { .. } => ErrorCode::new("index_options", "malformed_value"),
            Self::NotStrictlyPositive { .. } => ErrorCode::new("index_options", "out_of_range"),
            Self::MissingSchema => ErrorCode::new("index_options", "missing_schema"),
            Self::InvalidSchema { .. } => ErrorCode::new("index_options", "invalid_schema"),
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed {
                option, expected, ..
            } => write!(formatter, "'{option}' must be {}", expected.describe()),
            Self::NotStrictlyPositive { option, .. } => {
                write!(formatter, "'{option}' must be strictly positive")
            },
            Self::MissingSchema => write!(formatter, "'{SCHEMA_OPTION}' required"),
            Self::InvalidSchema { reason } => {
                write!(formatter, "'{SCHEMA_OPTION}' is invalid : {reason}")
            },
        }
    }
}

impl std::error::Error for ConfigurationError {}

impl From<SchemaError> for ConfigurationError {
    fn from(error: SchemaError) -> Self {
        Self::InvalidSchema {
            reason: error.to_string(),
        }
    }
}

impl From<ConfigurationError> for ErrorEnvelope {
    fn from(error: ConfigurationError) -> Self {
        let mut envelope = Self::expected(error.error_code(), error.to_string())
            .with_metadata("option", error.option());

        match error {
            ConfigurationError::Malformed { value, .. }
            | ConfigurationError::NotStrictlyPositive { value, .. } => {
                envelope = envelope.with_metadata("value", value);
            },
            ConfigurationError::InvalidSchema { reason } => {
                envelope = envelope.with_metadata("reason", reason);
            },
            ConfigurationError::MissingSchema => {},
        }

        envelope
    }
}
