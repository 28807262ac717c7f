//! # search-index-adapters
//!
//! Concrete collaborators for the index options resolver: JSON schema
//! building, data directory naming, and structured logging.
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod directories;
pub mod log_sink;
pub mod logger;
pub mod schema_json;
pub mod tracing_logger;

pub use directories::DataDirectories;
pub use log_sink::{LogSink, MemoryLogSink, StderrLogSink};
pub use logger::{DEFAULT_MAX_VALUE_CHARS, JsonLogger};
pub use schema_json::JsonSchemaBuilder;
pub use tracing_logger::TracingLogger;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
