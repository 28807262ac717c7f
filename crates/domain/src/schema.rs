//! Compiled index schema: which columns are indexed and how.
//!
//! An [`IndexSchema`] is checked twice:
//! - at construction, for internal consistency (analyzer references);
//! - against a table, for column existence and type support.

use crate::table::{ColumnType, TableMetadata};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Analyzer used when a schema does not name one.
pub const DEFAULT_ANALYZER: &str = "standard";

/// Analyzers available without a declaration.
pub const BUILTIN_ANALYZERS: &[&str] = &[
    "standard",
    "keyword",
    "whitespace",
    "simple",
    "stop",
    "english",
    "french",
    "german",
    "italian",
    "portuguese",
    "spanish",
];

/// Failures raised while building or validating an index schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The textual definition could not be parsed.
    InvalidDefinition {
        /// Parser-provided reason.
        reason: String,
    },
    /// A mapped field name is not a valid column name.
    InvalidFieldName {
        /// Offending field name.
        field: String,
    },
    /// An analyzer reference is neither builtin nor declared.
    UnknownAnalyzer {
        /// Field referencing the analyzer (`None` for the default analyzer).
        field: Option<String>,
        /// Referenced analyzer name.
        analyzer: String,
    },
    /// A non-text mapper names an analyzer.
    AnalyzerNotAllowed {
        /// Offending field.
        field: String,
        /// Mapper kind of the field.
        kind: MapperKind,
    },
    /// A mapped field does not exist in the table.
    UnknownColumn {
        /// Offending field.
        field: String,
        /// Qualified table name.
        table: String,
    },
    /// A mapper kind cannot index the column's declared type.
    UnsupportedColumnType {
        /// Offending field.
        field: String,
        /// Mapper kind of the field.
        kind: MapperKind,
        /// Declared column type.
        column_type: ColumnType,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDefinition { reason } => {
                write!(formatter, "unparseable schema definition: {reason}")
            },
            Self::InvalidFieldName { field } => {
                write!(formatter, "field name '{field}' is not a valid column name")
            },
            Self::UnknownAnalyzer {
                field: Some(field),
                analyzer,
            } => write!(
                formatter,
                "field '{field}' uses undefined analyzer '{analyzer}'"
            ),
            Self::UnknownAnalyzer {
                field: None,
                analyzer,
            } => write!(formatter, "default analyzer '{analyzer}' is undefined"),
            Self::AnalyzerNotAllowed { field, kind } => write!(
                formatter,
                "field '{field}' of type {kind} does not accept an analyzer"
            ),
            Self::UnknownColumn { field, table } => {
                write!(formatter, "no column named '{field}' in table {table}")
            },
            Self::UnsupportedColumnType {
                field,
                kind,
                column_type,
            } => write!(
                formatter,
                "'{kind}' mapper for field '{field}' does not support column type {column_type}"
            ),
        }
    }
}

impl std::error::Error for SchemaError {}

/// How a field is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapperKind {
    /// Untokenized string.
    String,
    /// Analyzed full text.
    Text,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    Bigint,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Arbitrary precision decimal.
    Bigdec,
    /// Boolean.
    Boolean,
    /// Point in time.
    Date,
    /// UUID.
    Uuid,
    /// IP address.
    Inet,
    /// Raw bytes.
    Blob,
}

impl MapperKind {
    /// Parse a mapper type name.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let parsed = match input {
            "string" => Self::String,
            "text" => Self::Text,
            "integer" => Self::Integer,
            "bigint" => Self::Bigint,
            "float" => Self::Float,
            "double" => Self::Double,
            "bigdec" => Self::Bigdec,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "uuid" => Self::Uuid,
            "inet" => Self::Inet,
            "blob" => Self::Blob,
            _ => return None,
        };
        Some(parsed)
    }

    /// Canonical mapper type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Bigint => "bigint",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bigdec => "bigdec",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Uuid => "uuid",
            Self::Inet => "inet",
            Self::Blob => "blob",
        }
    }

    /// Returns true when this mapper can index a column of the given type.
    #[must_use]
    pub const fn supports(self, column_type: ColumnType) -> bool {
        if column_type.is_textual() {
            return true;
        }
        match self {
            Self::String => !matches!(column_type, ColumnType::Blob | ColumnType::Counter),
            Self::Text => false,
            Self::Integer | Self::Bigint | Self::Float | Self::Double | Self::Bigdec => {
                column_type.is_numeric()
            },
            Self::Boolean => matches!(column_type, ColumnType::Boolean),
            Self::Date => matches!(
                column_type,
                ColumnType::Timestamp
                    | ColumnType::Date
                    | ColumnType::Timeuuid
                    | ColumnType::Int
                    | ColumnType::Bigint
            ),
            Self::Uuid => matches!(column_type, ColumnType::Uuid | ColumnType::Timeuuid),
            Self::Inet => matches!(column_type, ColumnType::Inet),
            Self::Blob => matches!(column_type, ColumnType::Blob),
        }
    }
}

impl fmt::Display for MapperKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Declared custom analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnalyzerDefinition {
    /// Analyzer loaded by class name.
    Classpath {
        /// Fully qualified analyzer class.
        class: String,
    },
    /// Snowball stemming analyzer.
    Snowball {
        /// Stemmer language.
        language: String,
        /// Optional comma-separated stopwords.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stopwords: Option<String>,
    },
}

/// Mapping for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapper {
    /// Mapper kind.
    pub kind: MapperKind,
    /// Analyzer override (text mappers only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<String>,
}

impl FieldMapper {
    /// Mapper without an analyzer override.
    #[must_use]
    pub const fn new(kind: MapperKind) -> Self {
        Self {
            kind,
            analyzer: None,
        }
    }

    /// Mapper with an analyzer override.
    #[must_use]
    pub fn with_analyzer(kind: MapperKind, analyzer: impl Into<String>) -> Self {
        Self {
            kind,
            analyzer: Some(analyzer.into()),
        }
    }
}

/// A compiled, internally consistent index schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSchema {
    default_analyzer: String,
    analyzers: BTreeMap<String, AnalyzerDefinition>,
    fields: BTreeMap<String, FieldMapper>,
}

impl IndexSchema {
    /// Build a schema, checking analyzer references and field names.
    pub fn new(
        default_analyzer: Option<String>,
        analyzers: BTreeMap<String, AnalyzerDefinition>,
        fields: BTreeMap<String, FieldMapper>,
    ) -> Result<Self, SchemaError> {
        let default_analyzer = default_analyzer.unwrap_or_else(|| DEFAULT_ANALYZER.to_owned());
        let is_known = |name: &str| BUILTIN_ANALYZERS.contains(&name) || analyzers.contains_key(name);

        if !is_known(&default_analyzer) {
            return Err(SchemaError::UnknownAnalyzer {
                field: None,
                analyzer: default_analyzer,
            });
        }

        for (field, mapper) in &fields {
            if field.is_empty()
                || !field
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
            {
                return Err(SchemaError::InvalidFieldName {
                    field: field.clone(),
                });
            }
            let Some(analyzer) = mapper.analyzer.as_deref() else {
                continue;
            };
            if mapper.kind != MapperKind::Text {
                return Err(SchemaError::AnalyzerNotAllowed {
                    field: field.clone(),
                    kind: mapper.kind,
                });
            }
            if !is_known(analyzer) {
                return Err(SchemaError::UnknownAnalyzer {
                    field: Some(field.clone()),
                    analyzer: analyzer.to_owned(),
                });
            }
        }

        Ok(Self {
            default_analyzer,
            analyzers,
            fields,
        })
    }

    /// Check the schema against the columns of the indexed table.
    pub fn validate_against(&self, table: &TableMetadata) -> Result<(), SchemaError> {
        for (field, mapper) in &self.fields {
            let Some(column) = table.column(field) else {
                return Err(SchemaError::UnknownColumn {
                    field: field.clone(),
                    table: table.to_string(),
                });
            };
            if !mapper.kind.supports(column.column_type) {
                return Err(SchemaError::UnsupportedColumnType {
                    field: field.clone(),
                    kind: mapper.kind,
                    column_type: column.column_type,
                });
            }
        }
        Ok(())
    }

    /// Analyzer applied to text fields without an override.
    #[must_use]
    pub fn default_analyzer(&self) -> &str {
        &self.default_analyzer
    }

    /// Declared custom analyzers.
    #[must_use]
    pub const fn analyzers(&self) -> &BTreeMap<String, AnalyzerDefinition> {
        &self.analyzers
    }

    /// Field mappers keyed by column name.
    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, FieldMapper> {
        &self.fields
    }

    /// Analyzer effectively used for a field, if the field is analyzed.
    #[must_use]
    pub fn analyzer_for(&self, field: &str) -> Option<&str> {
        let mapper = self.fields.get(field)?;
        if mapper.kind != MapperKind::Text {
            return None;
        }
        Some(
            mapper
                .analyzer
                .as_deref()
                .unwrap_or(&self.default_analyzer),
        )
    }
}

impl fmt::Display for IndexSchema {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "IndexSchema{{defaultAnalyzer={}, fields=[",
            self.default_analyzer
        )?;
        for (position, (field, mapper)) in self.fields.iter().enumerate() {
            if position > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{field}:{}", mapper.kind)?;
        }
        formatter.write_str("]}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{KeyspaceName, PrimitiveError, TableName};
    use crate::table::ColumnMetadata;
    use std::error::Error;

    fn tweets() -> Result<TableMetadata, PrimitiveError> {
        Ok(
            TableMetadata::new(KeyspaceName::parse("demo")?, TableName::parse("tweets")?)
                .with_column(ColumnMetadata::parse_spec("id:int")?)
                .with_column(ColumnMetadata::parse_spec("body:text")?)
                .with_column(ColumnMetadata::parse_spec("created:timestamp")?)
                .with_column(ColumnMetadata::parse_spec("payload:blob")?),
        )
    }

    fn fields(entries: &[(&str, FieldMapper)]) -> BTreeMap<String, FieldMapper> {
        entries
            .iter()
            .map(|(name, mapper)| ((*name).to_owned(), mapper.clone()))
            .collect()
    }

    #[test]
    fn default_analyzer_is_standard() -> Result<(), SchemaError> {
        let schema = IndexSchema::new(
            None,
            BTreeMap::new(),
            fields(&[("body", FieldMapper::new(MapperKind::Text))]),
        )?;
        assert_eq!(schema.default_analyzer(), DEFAULT_ANALYZER);
        assert_eq!(schema.analyzer_for("body"), Some("standard"));
        assert_eq!(schema.analyzer_for("missing"), None);
        Ok(())
    }

    #[test]
    fn declared_analyzers_can_be_referenced() -> Result<(), SchemaError> {
        let mut analyzers = BTreeMap::new();
        analyzers.insert(
            "my_snowball".to_owned(),
            AnalyzerDefinition::Snowball {
                language: "English".to_owned(),
                stopwords: None,
            },
        );
        let schema = IndexSchema::new(
            Some("my_snowball".to_owned()),
            analyzers,
            fields(&[("body", FieldMapper::with_analyzer(MapperKind::Text, "english"))]),
        )?;
        assert_eq!(schema.analyzer_for("body"), Some("english"));
        Ok(())
    }

    #[test]
    fn undefined_analyzers_are_rejected() {
        let error = IndexSchema::new(
            None,
            BTreeMap::new(),
            fields(&[("body", FieldMapper::with_analyzer(MapperKind::Text, "klingon"))]),
        )
        .err();
        assert_eq!(
            error,
            Some(SchemaError::UnknownAnalyzer {
                field: Some("body".to_owned()),
                analyzer: "klingon".to_owned()
            })
        );

        let error = IndexSchema::new(Some("klingon".to_owned()), BTreeMap::new(), BTreeMap::new())
            .err();
        assert!(matches!(
            error,
            Some(SchemaError::UnknownAnalyzer { field: None, .. })
        ));
    }

    #[test]
    fn analyzer_on_non_text_mapper_is_rejected() {
        let error = IndexSchema::new(
            None,
            BTreeMap::new(),
            fields(&[("id", FieldMapper::with_analyzer(MapperKind::Integer, "english"))]),
        )
        .err();
        assert!(matches!(
            error,
            Some(SchemaError::AnalyzerNotAllowed {
                kind: MapperKind::Integer,
                ..
            })
        ));
    }

    #[test]
    fn validation_accepts_compatible_columns() -> Result<(), Box<dyn Error>> {
        let schema = IndexSchema::new(
            None,
            BTreeMap::new(),
            fields(&[
                ("id", FieldMapper::new(MapperKind::Integer)),
                ("body", FieldMapper::new(MapperKind::Text)),
                ("created", FieldMapper::new(MapperKind::Date)),
                ("payload", FieldMapper::new(MapperKind::Blob)),
            ]),
        )?;
        schema.validate_against(&tweets()?)?;
        Ok(())
    }

    #[test]
    fn validation_rejects_missing_columns() -> Result<(), Box<dyn Error>> {
        let schema = IndexSchema::new(
            None,
            BTreeMap::new(),
            fields(&[("author", FieldMapper::new(MapperKind::String))]),
        )?;
        let error = schema.validate_against(&tweets()?).err();
        assert_eq!(
            error.map(|error| error.to_string()).as_deref(),
            Some("no column named 'author' in table demo.tweets")
        );
        Ok(())
    }

    #[test]
    fn validation_rejects_unsupported_types() -> Result<(), Box<dyn Error>> {
        let schema = IndexSchema::new(
            None,
            BTreeMap::new(),
            fields(&[("payload", FieldMapper::new(MapperKind::Text))]),
        )?;
        let error = schema.validate_against(&tweets()?).err();
        assert_eq!(
            error,
            Some(SchemaError::UnsupportedColumnType {
                field: "payload".to_owned(),
                kind: MapperKind::Text,
                column_type: ColumnType::Blob,
            })
        );
        Ok(())
    }

    #[test]
    fn display_lists_fields_in_order() -> Result<(), SchemaError> {
        let schema = IndexSchema::new(
            None,
            BTreeMap::new(),
            fields(&[
                ("id", FieldMapper::new(MapperKind::Integer)),
                ("body", FieldMapper::new(MapperKind::Text)),
            ]),
        )?;
        assert_eq!(
            schema.to_string(),
            "IndexSchema{defaultAnalyzer=standard, fields=[body:text, id:integer]}"
        );
        Ok(())
    }
}
