//! Table, schema, and option fixtures shared by integration tests.

use search_index_domain::{
    ColumnMetadata, FieldMapper, IndexName, IndexSchema, KeyspaceName, MapperKind,
    PrimitiveError, SchemaError, TableId, TableMetadata, TableName,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Table id of [`tweets_table`].
pub const TWEETS_TABLE_ID: &str = "5a1c395e-b41f-11e5-9f22-ba0be0483c18";

/// JSON schema definition matching [`tweets_table`].
pub const TWEETS_SCHEMA_JSON: &str = r#"{
    "default_analyzer": "english",
    "fields": {
        "id": {"type": "integer"},
        "user": {"type": "string"},
        "body": {"type": "text", "analyzer": "english"},
        "created": {"type": "date"}
    }
}"#;

/// `demo.tweets(id int, user text, body text, created timestamp)` with a stable id.
pub fn tweets_table() -> Result<TableMetadata, PrimitiveError> {
    Ok(
        TableMetadata::new(KeyspaceName::parse("demo")?, TableName::parse("tweets")?)
            .with_id(TableId::parse(TWEETS_TABLE_ID)?)
            .with_column(ColumnMetadata::parse_spec("id:int")?)
            .with_column(ColumnMetadata::parse_spec("user:text")?)
            .with_column(ColumnMetadata::parse_spec("body:text")?)
            .with_column(ColumnMetadata::parse_spec("created:timestamp")?),
    )
}

/// Index name used with [`tweets_table`].
pub fn tweets_index() -> Result<IndexName, PrimitiveError> {
    IndexName::parse("tweets_index")
}

/// Compiled form of [`TWEETS_SCHEMA_JSON`].
pub fn tweets_schema() -> Result<IndexSchema, SchemaError> {
    let fields: BTreeMap<String, FieldMapper> = [
        ("id", FieldMapper::new(MapperKind::Integer)),
        ("user", FieldMapper::new(MapperKind::String)),
        ("body", FieldMapper::with_analyzer(MapperKind::Text, "english")),
        ("created", FieldMapper::new(MapperKind::Date)),
    ]
    .into_iter()
    .map(|(name, mapper)| (name.to_owned(), mapper))
    .collect();
    IndexSchema::new(Some("english".to_owned()), BTreeMap::new(), fields)
}

/// Option map from string pairs.
pub fn raw_options(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}

/// Directory holding the fixture files of this crate.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Path of a fixture file relative to [`fixtures_dir`].
pub fn fixture_path(relative: &str) -> PathBuf {
    fixtures_dir().join(relative)
}
