//! Option vocabulary and defaults for search index definitions.
//!
//! Option names are part of the persisted index definition and must stay
//! stable across releases.

use search_index_shared::BoundedU32;

/// Strictly positive 32-bit integer option value.
pub type PositiveInt = BoundedU32<1, 2_147_483_647>;

/// Seconds between index reader refreshes.
pub const REFRESH_SECONDS_OPTION: &str = "refresh_seconds";
/// Size of the indexing RAM buffer, in MB.
pub const RAM_BUFFER_MB_OPTION: &str = "ram_buffer_mb";
/// Largest segment considered for merging, in MB.
pub const MAX_MERGE_MB_OPTION: &str = "max_merge_mb";
/// Memory budget for cached near-real-time segments, in MB.
pub const MAX_CACHED_MB_OPTION: &str = "max_cached_mb";
/// Number of asynchronous indexing threads (`0` means synchronous).
pub const INDEXING_THREADS_OPTION: &str = "indexing_threads";
/// Queue capacity per indexing thread.
pub const INDEXING_QUEUES_SIZE_OPTION: &str = "indexing_queues_size";
/// Comma-separated data centers where the index is not maintained.
pub const EXCLUDED_DATA_CENTERS_OPTION: &str = "excluded_data_centers";
/// Explicit index directory, overriding the derived location.
pub const DIRECTORY_PATH_OPTION: &str = "directory_path";
/// Index schema definition (mandatory).
pub const SCHEMA_OPTION: &str = "schema";

/// Every recognized option, in resolution order.
pub const RECOGNIZED_OPTIONS: [&str; 9] = [
    REFRESH_SECONDS_OPTION,
    RAM_BUFFER_MB_OPTION,
    MAX_MERGE_MB_OPTION,
    MAX_CACHED_MB_OPTION,
    INDEXING_THREADS_OPTION,
    INDEXING_QUEUES_SIZE_OPTION,
    EXCLUDED_DATA_CENTERS_OPTION,
    DIRECTORY_PATH_OPTION,
    SCHEMA_OPTION,
];

/// Returns true when `option` belongs to the recognized vocabulary.
#[must_use]
pub fn is_recognized_option(option: &str) -> bool {
    RECOGNIZED_OPTIONS.contains(&option)
}

/// Values used for options absent from an index definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexOptionDefaults {
    /// Default `refresh_seconds`.
    pub refresh_seconds: f64,
    /// Default `ram_buffer_mb`.
    pub ram_buffer_mb: PositiveInt,
    /// Default `max_merge_mb`.
    pub max_merge_mb: PositiveInt,
    /// Default `max_cached_mb`.
    pub max_cached_mb: PositiveInt,
    /// Default `indexing_threads`.
    pub indexing_threads: i32,
    /// Default `indexing_queues_size`.
    pub indexing_queues_size: PositiveInt,
}

/// The defaults applied by [`crate::IndexConfigResolver`].
pub const DEFAULT_INDEX_OPTIONS: IndexOptionDefaults = IndexOptionDefaults {
    refresh_seconds: 60.0,
    ram_buffer_mb: PositiveInt::saturating(64),
    max_merge_mb: PositiveInt::saturating(5),
    max_cached_mb: PositiveInt::saturating(30),
    indexing_threads: 0,
    indexing_queues_size: PositiveInt::saturating(50),
};
