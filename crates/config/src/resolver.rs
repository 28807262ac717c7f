//! Resolution of raw index options into an [`IndexConfig`].
//!
//! Options are checked in a fixed order and the first failure aborts the
//! call: refresh, ram buffer, max merge, max cached, indexing threads,
//! indexing queues size, excluded data centers, path, schema.

use crate::error::{ConfigurationError, ExpectedValue};
use crate::index_config::{IndexConfig, TunedOptions};
use crate::options::{
    DEFAULT_INDEX_OPTIONS, DIRECTORY_PATH_OPTION, EXCLUDED_DATA_CENTERS_OPTION,
    INDEXING_QUEUES_SIZE_OPTION, INDEXING_THREADS_OPTION, MAX_CACHED_MB_OPTION,
    MAX_MERGE_MB_OPTION, PositiveInt, RAM_BUFFER_MB_OPTION, REFRESH_SECONDS_OPTION,
    SCHEMA_OPTION, is_recognized_option,
};
use search_index_domain::{IndexName, IndexSchema, Identity, TableMetadata};
use search_index_ports::{
    DirectoryNamingPort, INDEX_DIRECTORY, LoggerPort, SchemaBuilderPort, log_fields,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Raw option map of an index definition.
pub type RawOptions = BTreeMap<String, String>;

/// Collaborators required by the resolver.
#[derive(Clone)]
pub struct IndexOptionsDeps {
    /// Table storage naming.
    pub directories: Arc<dyn DirectoryNamingPort>,
    /// Schema definition compiler.
    pub schema_builder: Arc<dyn SchemaBuilderPort>,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolutionMode {
    Resolve,
    Validate,
}

impl ResolutionMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Resolve => "resolve",
            Self::Validate => "validate",
        }
    }
}

/// Turns index option maps into validated [`IndexConfig`] values.
///
/// The resolver holds no state besides its collaborators and can be shared
/// across threads.
#[derive(Clone)]
pub struct IndexConfigResolver {
    deps: IndexOptionsDeps,
}

impl IndexConfigResolver {
    /// Create a resolver over the given collaborators.
    #[must_use]
    pub const fn new(deps: IndexOptionsDeps) -> Self {
        Self { deps }
    }

    /// Resolve the options of an index being created or altered.
    pub fn resolve(
        &self,
        options: &RawOptions,
        table: &TableMetadata,
        index: &IndexName,
    ) -> Result<IndexConfig, ConfigurationError> {
        let logger = self.scoped_logger(ResolutionMode::Resolve);
        log_supplied_options(logger.as_deref(), options);

        let tuned = parse_tuned_options(options)?;
        let path = self
            .resolve_path(options, Identity::Known(table), Identity::Known(index))
            .unwrap_or_else(|| self.derive_path(table, index));
        let schema = self.resolve_schema(options, Identity::Known(table))?;
        let config = IndexConfig::assemble(tuned, path, schema);

        if let Some(logger) = logger.as_deref() {
            let path = config.path().display().to_string();
            let table = table.to_string();
            logger.debug(
                "index_options.resolved",
                "Index options resolved",
                Some(log_fields([
                    ("table", table.as_str()),
                    ("index", index.as_str()),
                    ("path", path.as_str()),
                ])),
            );
        }

        Ok(config)
    }

    /// Check options without building a config.
    ///
    /// The index does not exist yet, so no path is derived. When `table` is
    /// `Unknown`, the schema is not checked against columns.
    pub fn validate(
        &self,
        options: &RawOptions,
        table: Identity<&TableMetadata>,
    ) -> Result<(), ConfigurationError> {
        let logger = self.scoped_logger(ResolutionMode::Validate);
        log_supplied_options(logger.as_deref(), options);

        parse_tuned_options(options)?;
        let path = self.resolve_path(options, table, Identity::Unknown);
        self.resolve_schema(options, table)?;

        if let Some(logger) = logger.as_deref() {
            let table = table.known().map(ToString::to_string);
            let path = path.map(|path| path.display().to_string());
            logger.debug(
                "index_options.validated",
                "Index options validated",
                Some(log_fields([
                    ("table", table.as_deref().unwrap_or("unknown")),
                    ("path", path.as_deref().unwrap_or("deferred")),
                ])),
            );
        }

        Ok(())
    }

    fn scoped_logger(&self, mode: ResolutionMode) -> Option<Box<dyn LoggerPort>> {
        self.deps
            .logger
            .as_ref()
            .map(|logger| logger.child(log_fields([("mode", mode.as_str())])))
    }

    fn resolve_path(
        &self,
        options: &RawOptions,
        table: Identity<&TableMetadata>,
        index: Identity<&IndexName>,
    ) -> Option<PathBuf> {
        if let Some(raw) = options.get(DIRECTORY_PATH_OPTION) {
            return Some(PathBuf::from(raw));
        }
        match (table, index) {
            (Identity::Known(table), Identity::Known(index)) => {
                Some(self.derive_path(table, index))
            },
            _ => None,
        }
    }

    fn derive_path(&self, table: &TableMetadata, index: &IndexName) -> PathBuf {
        self.deps
            .directories
            .base_directory_for(table)
            .join(INDEX_DIRECTORY)
            .join(index.as_str())
    }

    fn resolve_schema(
        &self,
        options: &RawOptions,
        table: Identity<&TableMetadata>,
    ) -> Result<IndexSchema, ConfigurationError> {
        let Some(definition) = options
            .get(SCHEMA_OPTION)
            .filter(|definition| !definition.trim().is_empty())
        else {
            return Err(ConfigurationError::MissingSchema);
        };

        let schema = self.deps.schema_builder.build(definition)?;
        if let Identity::Known(table) = table {
            schema.validate_against(table)?;
        }
        Ok(schema)
    }
}

fn log_supplied_options(logger: Option<&dyn LoggerPort>, options: &RawOptions) {
    let Some(logger) = logger else {
        return;
    };
    for (option, value) in options {
        let fields = Some(log_fields([
            ("option", option.as_str()),
            ("value", value.as_str()),
        ]));
        if is_recognized_option(option) {
            logger.debug("index_options.option", "Index option supplied", fields);
        } else {
            logger.debug(
                "index_options.unknown_option",
                "Unrecognized index option ignored",
                fields,
            );
        }
    }
}

fn parse_tuned_options(options: &RawOptions) -> Result<TunedOptions, ConfigurationError> {
    Ok(TunedOptions {
        refresh_seconds: parse_refresh_seconds(options)?,
        ram_buffer_mb: parse_positive_int(
            options,
            RAM_BUFFER_MB_OPTION,
            DEFAULT_INDEX_OPTIONS.ram_buffer_mb,
        )?,
        max_merge_mb: parse_positive_int(
            options,
            MAX_MERGE_MB_OPTION,
            DEFAULT_INDEX_OPTIONS.max_merge_mb,
        )?,
        max_cached_mb: parse_positive_int(
            options,
            MAX_CACHED_MB_OPTION,
            DEFAULT_INDEX_OPTIONS.max_cached_mb,
        )?,
        indexing_threads: parse_indexing_threads(options)?,
        indexing_queues_size: parse_positive_int(
            options,
            INDEXING_QUEUES_SIZE_OPTION,
            DEFAULT_INDEX_OPTIONS.indexing_queues_size,
        )?,
        excluded_data_centers: parse_excluded_data_centers(options),
    })
}

fn parse_refresh_seconds(options: &RawOptions) -> Result<f64, ConfigurationError> {
    let Some(raw) = options.get(REFRESH_SECONDS_OPTION) else {
        return Ok(DEFAULT_INDEX_OPTIONS.refresh_seconds);
    };

    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigurationError::Malformed {
            option: REFRESH_SECONDS_OPTION,
            value: raw.clone(),
            expected: ExpectedValue::PositiveDouble,
        })?;

    // NaN fails the comparison as well.
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigurationError::NotStrictlyPositive {
            option: REFRESH_SECONDS_OPTION,
            value: raw.clone(),
        });
    }

    Ok(value)
}

fn parse_positive_int(
    options: &RawOptions,
    option: &'static str,
    default: PositiveInt,
) -> Result<PositiveInt, ConfigurationError> {
    let Some(raw) = options.get(option) else {
        return Ok(default);
    };

    let value = raw
        .parse::<i32>()
        .map_err(|_| ConfigurationError::Malformed {
            option,
            value: raw.clone(),
            expected: ExpectedValue::PositiveInteger,
        })?;

    u32::try_from(value)
        .ok()
        .and_then(PositiveInt::new)
        .ok_or_else(|| ConfigurationError::NotStrictlyPositive {
            option,
            value: raw.clone(),
        })
}

fn parse_indexing_threads(options: &RawOptions) -> Result<i32, ConfigurationError> {
    let Some(raw) = options.get(INDEXING_THREADS_OPTION) else {
        return Ok(DEFAULT_INDEX_OPTIONS.indexing_threads);
    };

    raw.parse::<i32>()
        .map_err(|_| ConfigurationError::Malformed {
            option: INDEXING_THREADS_OPTION,
            value: raw.clone(),
            expected: ExpectedValue::Integer,
        })
}

fn parse_excluded_data_centers(options: &RawOptions) -> Vec<String> {
    options
        .get(EXCLUDED_DATA_CENTERS_OPTION)
        .map(|raw| raw.trim().split(',').map(str::to_owned).collect())
        .unwrap_or_default()
}
