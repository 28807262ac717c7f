//! Data directory naming for table storage.

use search_index_ports::{DirectoryNamingPort, TableMetadata};
use std::path::{Path, PathBuf};

/// Lays out tables as `<root>/<keyspace>/<table>-<id>`.
///
/// The id suffix keeps directories of dropped and re-created tables apart.
/// Tables without an id use the bare table name.
#[derive(Debug, Clone)]
pub struct DataDirectories {
    root: PathBuf,
}

impl DataDirectories {
    /// Create naming rooted at a data directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Data root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DirectoryNamingPort for DataDirectories {
    fn base_directory_for(&self, table: &TableMetadata) -> PathBuf {
        let directory = table.id().map_or_else(
            || table.table().to_string(),
            |id| format!("{}-{id}", table.table()),
        );
        self.root.join(table.keyspace().as_str()).join(directory)
    }
}
