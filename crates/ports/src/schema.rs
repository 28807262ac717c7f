//! Index schema construction boundary contract.

use search_index_domain::{IndexSchema, SchemaError};

/// Boundary contract for compiling a textual schema definition.
///
/// Builders check internal consistency only. Column validation against a
/// concrete table happens in the caller through
/// [`IndexSchema::validate_against`].
pub trait SchemaBuilderPort: Send + Sync {
    /// Compile a schema definition.
    fn build(&self, definition: &str) -> Result<IndexSchema, SchemaError>;
}
