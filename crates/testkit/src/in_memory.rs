//! In-memory implementations of the resolver's collaborator ports.
//!
//! These implementations are intended for:
//! - Unit/integration tests
//! - Observing how often and with what the resolver consults collaborators

use search_index_ports::{
    DirectoryNamingPort, IndexSchema, LogEvent, LogFields, LoggerPort, SchemaBuilderPort,
    SchemaError, TableMetadata, merge_fields,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// A no-op logger implementation.
#[derive(Debug, Default)]
pub struct NoopLogger;

impl LoggerPort for NoopLogger {
    fn log(&self, _event: LogEvent) {}

    fn child(&self, _fields: LogFields) -> Box<dyn LoggerPort> {
        Box::new(Self)
    }
}

/// Logger that keeps every event in memory; children share the buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    events: Arc<Mutex<Vec<LogEvent>>>,
    base_fields: LogFields,
}

impl RecordingLogger {
    /// Create an empty recording logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events in emission order.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded events with the given name.
    pub fn events_named(&self, name: &str) -> Vec<LogEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.event.as_ref() == name)
            .collect()
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LoggerPort for RecordingLogger {
    fn log(&self, mut event: LogEvent) {
        event.fields = merge_fields(&self.base_fields, event.fields.take());
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut base_fields = self.base_fields.clone();
        base_fields.extend(fields);
        Box::new(Self {
            events: Arc::clone(&self.events),
            base_fields,
        })
    }
}

/// Directory naming that places every table under `<root>/<keyspace>/<table>`
/// and counts lookups.
#[derive(Debug)]
pub struct CountingDirectories {
    root: PathBuf,
    lookups: AtomicUsize,
}

impl CountingDirectories {
    /// Create a naming double rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Number of `base_directory_for` calls so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl DirectoryNamingPort for CountingDirectories {
    fn base_directory_for(&self, table: &TableMetadata) -> PathBuf {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.root
            .join(table.keyspace().as_str())
            .join(table.table().as_str())
    }
}

/// Schema builder returning a canned outcome and recording definitions.
#[derive(Debug)]
pub struct StaticSchemaBuilder {
    outcome: Result<IndexSchema, SchemaError>,
    definitions: Mutex<Vec<String>>,
}

impl StaticSchemaBuilder {
    /// Builder that always returns `schema`.
    pub fn accepting(schema: IndexSchema) -> Self {
        Self {
            outcome: Ok(schema),
            definitions: Mutex::new(Vec::new()),
        }
    }

    /// Builder that always fails with `error`.
    pub fn rejecting(error: SchemaError) -> Self {
        Self {
            outcome: Err(error),
            definitions: Mutex::new(Vec::new()),
        }
    }

    /// Definitions passed to `build`, in call order.
    pub fn definitions(&self) -> Vec<String> {
        self.definitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SchemaBuilderPort for StaticSchemaBuilder {
    fn build(&self, definition: &str) -> Result<IndexSchema, SchemaError> {
        self.definitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(definition.to_owned());
        self.outcome.clone()
    }
}
