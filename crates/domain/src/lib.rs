//! # search-index-domain
//!
//! Domain model for per-table search index configuration.
//!
//! - **Primitives** - `KeyspaceName`, `TableName`, `IndexName`, `ColumnName`, `TableId`
//! - **Identity** - `Identity<T>` for identities that may not exist yet
//! - **Table** - `ColumnType`, `ColumnMetadata`, `TableMetadata`
//! - **Schema** - `IndexSchema`, `FieldMapper`, `MapperKind`, `SchemaError`
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use search_index_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod identity;
pub mod primitives;
pub mod schema;
pub mod table;

pub use identity::Identity;
pub use primitives::{ColumnName, IndexName, KeyspaceName, PrimitiveError, TableId, TableName};
pub use schema::{
    AnalyzerDefinition, BUILTIN_ANALYZERS, DEFAULT_ANALYZER, FieldMapper, IndexSchema,
    MapperKind, SchemaError,
};
pub use table::{ColumnMetadata, ColumnType, TableMetadata};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
