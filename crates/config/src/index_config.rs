//! Resolved, immutable index configuration.

use crate::options::PositiveInt;
use search_index_domain::IndexSchema;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Typed configuration of a search index, built from its option map.
///
/// Instances are only produced by [`crate::IndexConfigResolver::resolve`] and
/// are never modified afterwards. Altering an index resolves a new config.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexConfig {
    schema: IndexSchema,
    path: PathBuf,
    refresh_seconds: f64,
    ram_buffer_mb: PositiveInt,
    max_merge_mb: PositiveInt,
    max_cached_mb: PositiveInt,
    indexing_threads: i32,
    indexing_queues_size: PositiveInt,
    excluded_data_centers: Vec<String>,
}

/// Option values that do not depend on table or index identity.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TunedOptions {
    pub(crate) refresh_seconds: f64,
    pub(crate) ram_buffer_mb: PositiveInt,
    pub(crate) max_merge_mb: PositiveInt,
    pub(crate) max_cached_mb: PositiveInt,
    pub(crate) indexing_threads: i32,
    pub(crate) indexing_queues_size: PositiveInt,
    pub(crate) excluded_data_centers: Vec<String>,
}

impl IndexConfig {
    pub(crate) fn assemble(tuned: TunedOptions, path: PathBuf, schema: IndexSchema) -> Self {
        Self {
            schema,
            path,
            refresh_seconds: tuned.refresh_seconds,
            ram_buffer_mb: tuned.ram_buffer_mb,
            max_merge_mb: tuned.max_merge_mb,
            max_cached_mb: tuned.max_cached_mb,
            indexing_threads: tuned.indexing_threads,
            indexing_queues_size: tuned.indexing_queues_size,
            excluded_data_centers: tuned.excluded_data_centers,
        }
    }

    /// Compiled index schema.
    #[must_use]
    pub const fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    /// Index directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seconds between index reader refreshes.
    #[must_use]
    pub const fn refresh_seconds(&self) -> f64 {
        self.refresh_seconds
    }

    /// Indexing RAM buffer in MB.
    #[must_use]
    pub const fn ram_buffer_mb(&self) -> PositiveInt {
        self.ram_buffer_mb
    }

    /// Largest mergeable segment in MB.
    #[must_use]
    pub const fn max_merge_mb(&self) -> PositiveInt {
        self.max_merge_mb
    }

    /// Near-real-time cache budget in MB.
    #[must_use]
    pub const fn max_cached_mb(&self) -> PositiveInt {
        self.max_cached_mb
    }

    /// Asynchronous indexing threads; `0` selects the engine default.
    #[must_use]
    pub const fn indexing_threads(&self) -> i32 {
        self.indexing_threads
    }

    /// Queue capacity per indexing thread.
    #[must_use]
    pub const fn indexing_queues_size(&self) -> PositiveInt {
        self.indexing_queues_size
    }

    /// Data centers where the index is not maintained, in declaration order.
    #[must_use]
    pub fn excluded_data_centers(&self) -> &[String] {
        &self.excluded_data_centers
    }

    /// Returns true when writes from `data_center` should skip this index.
    #[must_use]
    pub fn is_excluded(&self, data_center: &str) -> bool {
        self.excluded_data_centers
            .iter()
            .any(|excluded| excluded == data_center)
    }
}

impl fmt::Display for IndexConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "IndexConfig{{schema={}, path={}, refresh_seconds={}, ram_buffer_mb={}, \
             max_merge_mb={}, max_cached_mb={}, indexing_threads={}, \
             indexing_queues_size={}, excluded_data_centers={:?}}}",
            self.schema,
            self.path.display(),
            self.refresh_seconds,
            self.ram_buffer_mb,
            self.max_merge_mb,
            self.max_cached_mb,
            self.indexing_threads,
            self.indexing_queues_size,
            self.excluded_data_centers,
        )
    }
}
