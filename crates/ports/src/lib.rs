//! # search-index-ports
//!
//! Collaborator contracts consumed by the index options resolver.
//!
//! This crate defines the interfaces between the resolver and the concrete
//! storage naming, schema building and logging implementations. It depends
//! only on `domain` and `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod directories;
pub mod logger;
pub mod schema;

pub use directories::*;
pub use logger::*;
pub use schema::*;

// Re-export domain types used in port signatures, so adapter crates can
// implement ports without directly depending on `search-index-domain`.
pub use search_index_domain::{IndexSchema, SchemaError, TableMetadata};
