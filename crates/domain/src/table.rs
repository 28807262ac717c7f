//! Table metadata consumed by index schema validation and path derivation.

use crate::primitives::{ColumnName, KeyspaceName, PrimitiveError, TableId, TableName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// CQL column types a table may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// `ascii`.
    Ascii,
    /// `text` / `varchar`.
    Text,
    /// `int`.
    Int,
    /// `bigint`.
    Bigint,
    /// `smallint`.
    Smallint,
    /// `tinyint`.
    Tinyint,
    /// `varint`.
    Varint,
    /// `counter`.
    Counter,
    /// `float`.
    Float,
    /// `double`.
    Double,
    /// `decimal`.
    Decimal,
    /// `boolean`.
    Boolean,
    /// `timestamp`.
    Timestamp,
    /// `date`.
    Date,
    /// `time`.
    Time,
    /// `uuid`.
    Uuid,
    /// `timeuuid`.
    Timeuuid,
    /// `inet`.
    Inet,
    /// `blob`.
    Blob,
}

impl ColumnType {
    /// Parse a CQL type name (case-insensitive; `varchar` is an alias of `text`).
    pub fn parse(input: &str) -> Result<Self, PrimitiveError> {
        let parsed = match input.trim().to_ascii_lowercase().as_str() {
            "ascii" => Self::Ascii,
            "text" | "varchar" => Self::Text,
            "int" => Self::Int,
            "bigint" => Self::Bigint,
            "smallint" => Self::Smallint,
            "tinyint" => Self::Tinyint,
            "varint" => Self::Varint,
            "counter" => Self::Counter,
            "float" => Self::Float,
            "double" => Self::Double,
            "decimal" => Self::Decimal,
            "boolean" => Self::Boolean,
            "timestamp" => Self::Timestamp,
            "date" => Self::Date,
            "time" => Self::Time,
            "uuid" => Self::Uuid,
            "timeuuid" => Self::Timeuuid,
            "inet" => Self::Inet,
            "blob" => Self::Blob,
            _ => {
                return Err(PrimitiveError::UnknownColumnType {
                    input: input.to_owned(),
                });
            },
        };
        Ok(parsed)
    }

    /// Canonical CQL name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Text => "text",
            Self::Int => "int",
            Self::Bigint => "bigint",
            Self::Smallint => "smallint",
            Self::Tinyint => "tinyint",
            Self::Varint => "varint",
            Self::Counter => "counter",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Date => "date",
            Self::Time => "time",
            Self::Uuid => "uuid",
            Self::Timeuuid => "timeuuid",
            Self::Inet => "inet",
            Self::Blob => "blob",
        }
    }

    /// Returns true for textual types.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Ascii | Self::Text)
    }

    /// Returns true for numeric types.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Bigint
                | Self::Smallint
                | Self::Tinyint
                | Self::Varint
                | Self::Counter
                | Self::Float
                | Self::Double
                | Self::Decimal
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A single table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name.
    pub name: ColumnName,
    /// Declared column type.
    pub column_type: ColumnType,
}

impl ColumnMetadata {
    /// Create column metadata.
    #[must_use]
    pub const fn new(name: ColumnName, column_type: ColumnType) -> Self {
        Self { name, column_type }
    }

    /// Parse a `name:type` column spec.
    pub fn parse_spec(spec: &str) -> Result<Self, PrimitiveError> {
        let (name, column_type) = spec
            .split_once(':')
            .ok_or_else(|| PrimitiveError::UnknownColumnType {
                input: spec.to_owned(),
            })?;
        Ok(Self::new(
            ColumnName::parse(name)?,
            ColumnType::parse(column_type)?,
        ))
    }
}

/// Identity and column layout of an indexed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    keyspace: KeyspaceName,
    table: TableName,
    id: Option<TableId>,
    columns: Vec<ColumnMetadata>,
}

impl TableMetadata {
    /// Create table metadata without columns.
    #[must_use]
    pub const fn new(keyspace: KeyspaceName, table: TableName) -> Self {
        Self {
            keyspace,
            table,
            id: None,
            columns: Vec::new(),
        }
    }

    /// Attach the stable table id.
    #[must_use]
    pub fn with_id(mut self, id: TableId) -> Self {
        self.id = Some(id);
        self
    }

    /// Append a column.
    #[must_use]
    pub fn with_column(mut self, column: ColumnMetadata) -> Self {
        self.columns.push(column);
        self
    }

    /// Owning keyspace.
    #[must_use]
    pub const fn keyspace(&self) -> &KeyspaceName {
        &self.keyspace
    }

    /// Table name.
    #[must_use]
    pub const fn table(&self) -> &TableName {
        &self.table
    }

    /// Stable table id, when known.
    #[must_use]
    pub const fn id(&self) -> Option<TableId> {
        self.id
    }

    /// Declared columns in order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnMetadata] {
        &self.columns
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns
            .iter()
            .find(|column| column.name.as_str() == name)
    }
}

impl fmt::Display for TableMetadata {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}.{}", self.keyspace, self.table)
    }
}
