//! Domain primitives with validated constructors.

use search_index_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Validation failures for domain primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Identifier is empty after trimming.
    EmptyIdentifier {
        /// Which identifier was being parsed (e.g. `keyspace`).
        kind: &'static str,
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// Identifier contains characters outside `[A-Za-z0-9_]`.
    InvalidIdentifier {
        /// Which identifier was being parsed (e.g. `index`).
        kind: &'static str,
        /// Trimmed input that failed validation.
        input: String,
    },
    /// Table id is not 32 hex digits (dashes allowed).
    InvalidTableId {
        /// Raw input that failed validation.
        input: String,
    },
    /// Column type name is not a known CQL type.
    UnknownColumnType {
        /// Raw input that failed validation.
        input: String,
    },
}

impl PrimitiveError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyIdentifier { .. } | Self::InvalidIdentifier { .. } => {
                ErrorCode::new("domain", "invalid_identifier")
            },
            Self::InvalidTableId { .. } => ErrorCode::new("domain", "invalid_table_id"),
            Self::UnknownColumnType { .. } => ErrorCode::new("domain", "unknown_column_type"),
        }
    }
}

impl fmt::Display for PrimitiveError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIdentifier { kind, .. } => write!(formatter, "{kind} name must be non-empty"),
            Self::InvalidIdentifier { kind, input } => {
                write!(
                    formatter,
                    "{kind} name must match /^[a-zA-Z0-9_]+$/ (got {input})"
                )
            },
            Self::InvalidTableId { input } => {
                write!(formatter, "table id must be 32 hex digits (got {input})")
            },
            Self::UnknownColumnType { input } => write!(formatter, "unknown column type: {input}"),
        }
    }
}

impl std::error::Error for PrimitiveError {}

impl From<PrimitiveError> for ErrorEnvelope {
    fn from(error: PrimitiveError) -> Self {
        let mut envelope = Self::expected(error.error_code(), error.to_string());

        match error {
            PrimitiveError::EmptyIdentifier { kind, input_length } => {
                envelope = envelope
                    .with_metadata("kind", kind)
                    .with_metadata("input_length", input_length.to_string());
            },
            PrimitiveError::InvalidIdentifier { kind, input } => {
                envelope = envelope
                    .with_metadata("kind", kind)
                    .with_metadata("input", input);
            },
            PrimitiveError::InvalidTableId { input } | PrimitiveError::UnknownColumnType { input } => {
                envelope = envelope.with_metadata("input", input);
            },
        }

        envelope
    }
}

macro_rules! identifier_type {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Box<str>);

        impl $name {
            /// Parse a name that satisfies the identifier allowlist.
            pub fn parse(input: impl AsRef<str>) -> Result<Self, PrimitiveError> {
                parse_identifier(input.as_ref(), $kind).map(Self)
            }

            /// Access the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(self.as_str())
            }
        }
    };
}

identifier_type!(
    /// Name of the keyspace owning a table.
    KeyspaceName,
    "keyspace"
);

identifier_type!(
    /// Name of an indexed table.
    TableName,
    "table"
);

identifier_type!(
    /// Name of a search index, used as the last segment of its storage path.
    IndexName,
    "index"
);

identifier_type!(
    /// Name of a table column.
    ColumnName,
    "column"
);

/// Stable table identifier, rendered as 32 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(Uuid);

impl TableId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Parse a table id in simple (32 hex digits) or hyphenated UUID form.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PrimitiveError> {
        let raw = input.as_ref();
        Uuid::try_parse(raw.trim())
            .map(Self)
            .map_err(|_| PrimitiveError::InvalidTableId {
                input: raw.to_owned(),
            })
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u128 {
        self.0.as_u128()
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0.simple())
    }
}

fn parse_identifier(raw: &str, kind: &'static str) -> Result<Box<str>, PrimitiveError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PrimitiveError::EmptyIdentifier {
            kind,
            input_length: raw.len(),
        });
    }

    if !is_valid_identifier(trimmed) {
        return Err(PrimitiveError::InvalidIdentifier {
            kind,
            input: trimmed.to_owned(),
        });
    }

    Ok(trimmed.to_owned().into_boxed_str())
}

fn is_valid_identifier(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identifiers_are_trimmed() -> Result<(), PrimitiveError> {
        let name = IndexName::parse("  tweets_index ")?;
        assert_eq!(name.as_str(), "tweets_index");
        assert_eq!(name.to_string(), "tweets_index");
        Ok(())
    }

    #[test]
    fn empty_identifier_reports_kind() {
        let error = KeyspaceName::parse("   ").err();
        assert_eq!(
            error,
            Some(PrimitiveError::EmptyIdentifier {
                kind: "keyspace",
                input_length: 3
            })
        );
    }

    #[test]
    fn invalid_identifier_maps_to_envelope() {
        let error = TableName::parse("tweets/../etc").err();
        let envelope: Option<ErrorEnvelope> = error.map(Into::into);

        assert_eq!(
            envelope.as_ref().map(|envelope| &envelope.code),
            Some(&ErrorCode::new("domain", "invalid_identifier"))
        );
        assert_eq!(
            envelope
                .as_ref()
                .and_then(|envelope| envelope.metadata_value("kind")),
            Some("table")
        );
    }

    #[test]
    fn table_id_accepts_uuid_form() -> Result<(), PrimitiveError> {
        let id = TableId::parse("5a1c395e-b41f-11e5-9f22-ba0be0483c18")?;
        assert_eq!(id.to_string(), "5a1c395eb41f11e59f22ba0be0483c18");
        assert_eq!(TableId::parse(id.to_string())?, id);
        Ok(())
    }

    #[test]
    fn table_id_rejects_short_input() {
        assert!(matches!(
            TableId::parse("abc"),
            Err(PrimitiveError::InvalidTableId { .. })
        ));
    }

    proptest! {
        #[test]
        fn identifier_accepts_word_characters(name in "[a-zA-Z0-9_]{1,32}") {
            let parsed = ColumnName::parse(&name);
            prop_assert_eq!(parsed.map(|value| value.as_str().to_owned()), Ok(name));
        }

        #[test]
        fn identifier_rejects_separators(prefix in "[a-z]{1,8}", sep in "[-./ ]", suffix in "[a-z]{1,8}") {
            let candidate = format!("{prefix}{sep}{suffix}");
            let is_invalid = matches!(
                IndexName::parse(&candidate),
                Err(PrimitiveError::InvalidIdentifier { kind: "index", .. })
            );
            prop_assert!(is_invalid);
        }
    }
}
