//! # search-index-config
//!
//! Index option vocabulary, defaults, and the resolver that turns an index
//! definition's raw option map into a validated [`IndexConfig`].
//! This crate depends on `domain`, `ports`, and `shared` only.

/// Option rejection errors.
pub mod error;
/// Resolved index configuration.
pub mod index_config;
/// Option file loading helpers.
pub mod load;
/// Option names and defaults.
pub mod options;
/// Option map resolution and validation.
pub mod resolver;

pub use error::{ConfigurationError, ExpectedValue};
pub use index_config::IndexConfig;
pub use load::{OptionsFormat, load_index_options_from_path, parse_index_options, to_pretty_json};
pub use options::{
    DEFAULT_INDEX_OPTIONS, DIRECTORY_PATH_OPTION, EXCLUDED_DATA_CENTERS_OPTION,
    INDEXING_QUEUES_SIZE_OPTION, INDEXING_THREADS_OPTION, IndexOptionDefaults,
    MAX_CACHED_MB_OPTION, MAX_MERGE_MB_OPTION, PositiveInt, RAM_BUFFER_MB_OPTION,
    RECOGNIZED_OPTIONS, REFRESH_SECONDS_OPTION, SCHEMA_OPTION, is_recognized_option,
};
pub use resolver::{IndexConfigResolver, IndexOptionsDeps, RawOptions};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
