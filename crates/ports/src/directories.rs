//! Storage naming boundary contract.

use search_index_domain::TableMetadata;
use std::path::PathBuf;

/// Sub-directory of a table's base directory holding search indexes.
pub const INDEX_DIRECTORY: &str = "lucene";

/// Boundary contract for locating a table's on-disk storage.
///
/// Implementations only compute names; they never touch the filesystem.
pub trait DirectoryNamingPort: Send + Sync {
    /// Base data directory for the given table.
    fn base_directory_for(&self, table: &TableMetadata) -> PathBuf;
}
