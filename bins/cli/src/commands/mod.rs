//! Command handlers for the CLI.

mod resolve;
mod validate;

pub use resolve::{ResolveInput, run_resolve};
pub use validate::{ValidateInput, run_validate};

use search_index_adapters::{DataDirectories, JsonSchemaBuilder};
use search_index_config::{IndexConfigResolver, IndexOptionsDeps};
use search_index_domain::{ColumnMetadata, KeyspaceName, TableId, TableMetadata, TableName};
use search_index_ports::LoggerPort;
use search_index_shared::{ErrorCode, ErrorEnvelope};
use std::path::Path;
use std::sync::Arc;

/// Table identity and layout given on the command line.
#[derive(Debug, Clone, Copy)]
pub struct TableArgs<'a> {
    pub keyspace: &'a str,
    pub table: &'a str,
    pub table_id: Option<&'a str>,
    pub columns: &'a [String],
}

impl TableArgs<'_> {
    /// Build table metadata from the flags.
    pub fn build(&self) -> Result<TableMetadata, ErrorEnvelope> {
        let mut metadata = TableMetadata::new(
            KeyspaceName::parse(self.keyspace)?,
            TableName::parse(self.table)?,
        );
        if let Some(id) = self.table_id {
            metadata = metadata.with_id(TableId::parse(id)?);
        }
        for spec in self.columns {
            metadata = metadata.with_column(ColumnMetadata::parse_spec(spec)?);
        }
        Ok(metadata)
    }
}

/// Wire the resolver with the filesystem-backed adapters.
pub fn build_resolver(data_dir: &Path, logger: Arc<dyn LoggerPort>) -> IndexConfigResolver {
    IndexConfigResolver::new(IndexOptionsDeps {
        directories: Arc::new(DataDirectories::new(data_dir)),
        schema_builder: Arc::new(JsonSchemaBuilder),
        logger: Some(logger),
    })
}

fn invalid_arguments(message: impl Into<String>) -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::invalid_input(), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_args_build_metadata() -> Result<(), ErrorEnvelope> {
        let columns = vec!["id:int".to_string(), "body:text".to_string()];
        let table = TableArgs {
            keyspace: "demo",
            table: "tweets",
            table_id: Some("5a1c395e-b41f-11e5-9f22-ba0be0483c18"),
            columns: &columns,
        }
        .build()?;

        assert_eq!(table.to_string(), "demo.tweets");
        assert_eq!(table.columns().len(), 2);
        assert!(table.id().is_some());
        Ok(())
    }

    #[test]
    fn bad_column_spec_is_rejected() {
        let columns = vec!["body".to_string()];
        let error = TableArgs {
            keyspace: "demo",
            table: "tweets",
            table_id: None,
            columns: &columns,
        }
        .build()
        .err();

        assert!(error.is_some());
    }
}
