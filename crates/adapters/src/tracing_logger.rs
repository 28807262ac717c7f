//! Logger adapter forwarding events to `tracing`.

use search_index_ports::{LogEvent, LogFields, LogLevel, LoggerPort, merge_fields};
use serde_json::Value;

/// Logger that re-emits events through the `tracing` macros.
///
/// Fields are rendered as one JSON object so subscribers see them regardless
/// of their field support.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    base_fields: LogFields,
}

impl TracingLogger {
    /// Create a logger without base fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LoggerPort for TracingLogger {
    fn log(&self, event: LogEvent) {
        let fields = render_fields(merge_fields(&self.base_fields, event.fields));
        let error = event.error.map(|error| error.to_string()).unwrap_or_default();
        let name = event.event.as_ref();
        let message = event.message.as_ref();

        match event.level {
            LogLevel::Debug => tracing::debug!(event = name, fields = %fields, "{message}"),
            LogLevel::Info => tracing::info!(event = name, fields = %fields, "{message}"),
            LogLevel::Warn => tracing::warn!(event = name, fields = %fields, "{message}"),
            LogLevel::Error => {
                tracing::error!(event = name, fields = %fields, error = %error, "{message}");
            },
        }
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut base_fields = self.base_fields.clone();
        base_fields.extend(fields);
        Box::new(Self { base_fields })
    }
}

fn render_fields(fields: Option<LogFields>) -> String {
    let map: serde_json::Map<String, Value> = fields
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key.into_string(), value))
        .collect();
    Value::Object(map).to_string()
}
