//! # search-index-testkit
//!
//! Test helpers, fixtures, and in-memory collaborators.
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod errors;
pub mod fixtures;
pub mod in_memory;

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_index_ports::ports_crate_version;
    use search_index_shared::shared_crate_version;

    #[test]
    fn testkit_can_use_ports_and_shared() {
        assert!(!testkit_crate_version().is_empty());
        assert!(!ports_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }

    #[test]
    fn fixtures_dir_exists() {
        assert!(fixtures::fixtures_dir().is_dir());
        assert!(fixtures::fixture_path("options/tweets.valid.json").is_file());
    }

    #[test]
    fn tweets_fixtures_are_consistent() {
        let table = fixtures::tweets_table();
        let schema = fixtures::tweets_schema();
        assert!(table.is_ok());
        assert!(schema.is_ok());
        if let (Ok(table), Ok(schema)) = (table, schema) {
            assert!(schema.validate_against(&table).is_ok());
        }
    }
}
