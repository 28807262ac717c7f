//! JSON schema definition builder.
//!
//! Accepted shape:
//!
//! ```json
//! {
//!   "default_analyzer": "english",
//!   "analyzers": { "my_analyzer": { "type": "classpath", "class": "org.example.Analyzer" } },
//!   "fields": { "body": { "type": "text", "analyzer": "my_analyzer" } }
//! }
//! ```

use search_index_domain::{AnalyzerDefinition, FieldMapper, MapperKind};
use search_index_ports::{IndexSchema, SchemaBuilderPort, SchemaError};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDefinition {
    #[serde(default)]
    default_analyzer: Option<String>,
    #[serde(default)]
    analyzers: BTreeMap<String, AnalyzerDefinition>,
    #[serde(default)]
    fields: BTreeMap<String, FieldDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDefinition {
    #[serde(rename = "type")]
    kind: MapperKind,
    #[serde(default)]
    analyzer: Option<String>,
}

impl From<FieldDefinition> for FieldMapper {
    fn from(definition: FieldDefinition) -> Self {
        Self {
            kind: definition.kind,
            analyzer: definition.analyzer,
        }
    }
}

/// Builds [`IndexSchema`] values from JSON definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaBuilder;

impl SchemaBuilderPort for JsonSchemaBuilder {
    fn build(&self, definition: &str) -> Result<IndexSchema, SchemaError> {
        let parsed: SchemaDefinition =
            serde_json::from_str(definition).map_err(|error| SchemaError::InvalidDefinition {
                reason: error.to_string(),
            })?;

        let fields = parsed
            .fields
            .into_iter()
            .map(|(name, field)| (name, FieldMapper::from(field)))
            .collect();
        IndexSchema::new(parsed.default_analyzer, parsed.analyzers, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_fields_and_analyzers() -> Result<(), SchemaError> {
        let schema = JsonSchemaBuilder.build(
            r#"{
                "default_analyzer": "tweets",
                "analyzers": {
                    "tweets": {"type": "classpath", "class": "org.apache.lucene.analysis.en.EnglishAnalyzer"},
                    "stems": {"type": "snowball", "language": "Spanish"}
                },
                "fields": {
                    "body": {"type": "text", "analyzer": "stems"},
                    "id": {"type": "bigint"}
                }
            }"#,
        )?;

        assert_eq!(schema.default_analyzer(), "tweets");
        assert_eq!(schema.analyzers().len(), 2);
        assert_eq!(schema.analyzer_for("body"), Some("stems"));
        assert_eq!(
            schema.fields().get("id").map(|mapper| mapper.kind),
            Some(MapperKind::Bigint)
        );
        Ok(())
    }

    #[test]
    fn empty_object_is_a_valid_schema() -> Result<(), SchemaError> {
        let schema = JsonSchemaBuilder.build("{}")?;
        assert!(schema.fields().is_empty());
        assert_eq!(schema.default_analyzer(), "standard");
        Ok(())
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = JsonSchemaBuilder
            .build(r#"{"fields": {}, "refresh": 3}"#)
            .err();
        assert!(matches!(error, Some(SchemaError::InvalidDefinition { .. })));
    }

    #[test]
    fn unknown_field_types_are_rejected() {
        let error = JsonSchemaBuilder
            .build(r#"{"fields": {"body": {"type": "geo_shape"}}}"#)
            .err();
        let reason = match error {
            Some(SchemaError::InvalidDefinition { reason }) => reason,
            _ => String::new(),
        };
        assert!(reason.contains("geo_shape"), "reason was: {reason}");
    }

    #[test]
    fn malformed_json_keeps_parser_message() {
        let error = JsonSchemaBuilder.build("{\"fields\":").err();
        assert!(
            error
                .map(|error| error.to_string())
                .is_some_and(|message| message.starts_with("unparseable schema definition: "))
        );
    }

    #[test]
    fn consistency_errors_come_from_the_schema() {
        let error = JsonSchemaBuilder
            .build(r#"{"fields": {"body": {"type": "text", "analyzer": "missing"}}}"#)
            .err();
        assert_eq!(
            error,
            Some(SchemaError::UnknownAnalyzer {
                field: Some("body".to_string()),
                analyzer: "missing".to_string(),
            })
        );
    }
}
