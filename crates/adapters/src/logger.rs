//! Structured JSON logger adapter.

use crate::log_sink::LogSink;
use search_index_ports::{LogEvent, LogFields, LogLevel, LoggerPort, merge_fields};
use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default cap on rendered string field length.
///
/// Schema definitions are logged as option values and can be large.
pub const DEFAULT_MAX_VALUE_CHARS: usize = 512;

/// JSON logger emitting one line per event.
#[derive(Clone)]
pub struct JsonLogger {
    sink: Arc<dyn LogSink>,
    base_fields: LogFields,
    min_level: LogLevel,
    max_value_chars: usize,
}

impl JsonLogger {
    /// Create a JSON logger backed by the provided sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            base_fields: LogFields::new(),
            min_level: LogLevel::Info,
            max_value_chars: DEFAULT_MAX_VALUE_CHARS,
        }
    }

    /// Set base fields applied to every event.
    #[must_use]
    pub fn with_base_fields(mut self, fields: LogFields) -> Self {
        self.base_fields = fields;
        self
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the maximum number of characters kept per string field.
    #[must_use]
    pub const fn with_max_value_chars(mut self, max_value_chars: usize) -> Self {
        self.max_value_chars = max_value_chars;
        self
    }

    fn render(&self, event: LogEvent) -> String {
        let mut payload = serde_json::Map::new();
        payload.insert("timestampMs".to_string(), Value::from(now_epoch_ms()));
        payload.insert("level".to_string(), Value::from(event.level.as_str()));
        payload.insert("event".to_string(), Value::from(event.event.as_ref()));
        payload.insert("message".to_string(), Value::from(event.message.as_ref()));

        if let Some(fields) = merge_fields(&self.base_fields, event.fields) {
            let fields = fields
                .into_iter()
                .map(|(key, value)| (key.into_string(), self.clip(value)))
                .collect();
            payload.insert("fields".to_string(), Value::Object(fields));
        }
        if let Some(error) = event.error {
            payload.insert("error".to_string(), error);
        }

        serde_json::to_string(&Value::Object(payload)).map_or_else(
            |_| {
                "{\"timestampMs\":0,\"level\":\"error\",\"event\":\"logger.serialize_failed\",\"message\":\"log serialization failed\"}\n"
                    .to_string()
            },
            |mut encoded| {
                encoded.push('\n');
                encoded
            },
        )
    }

    fn clip(&self, value: Value) -> Value {
        match value {
            Value::String(text) if text.chars().count() > self.max_value_chars => {
                let mut clipped: String = text.chars().take(self.max_value_chars).collect();
                clipped.push_str("...");
                Value::String(clipped)
            },
            other => other,
        }
    }
}

impl LoggerPort for JsonLogger {
    fn log(&self, event: LogEvent) {
        if event.level < self.min_level {
            return;
        }
        self.sink.write_line(&self.render(event));
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut merged = self.base_fields.clone();
        merged.extend(fields);
        Box::new(Self {
            base_fields: merged,
            ..self.clone()
        })
    }
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|duration| u64::try_from(duration.as_millis()).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_sink::MemoryLogSink;
    use search_index_ports::log_fields;
    use std::error::Error;

    fn payload(line: Option<&String>) -> Result<Value, Box<dyn Error>> {
        let line = line.ok_or("missing log line")?;
        Ok(serde_json::from_str(line.trim())?)
    }

    #[test]
    fn events_below_min_level_are_dropped() {
        let sink = Arc::new(MemoryLogSink::default());
        let logger = JsonLogger::new(sink.clone());

        logger.debug("index_options.option", "Index option supplied", None);
        logger.warn("index_options.unknown_option", "ignored", None);

        assert_eq!(sink.take().len(), 1);
    }

    #[test]
    fn child_logger_merges_fields() -> Result<(), Box<dyn Error>> {
        let sink = Arc::new(MemoryLogSink::default());
        let logger = JsonLogger::new(sink.clone())
            .with_min_level(LogLevel::Debug)
            .with_base_fields(log_fields([("service", "search-index")]));

        let child = logger.child(log_fields([("mode", "resolve")]));
        child.debug(
            "index_options.option",
            "Index option supplied",
            Some(log_fields([("option", "ram_buffer_mb"), ("value", "64")])),
        );

        let lines = sink.take();
        assert_eq!(lines.len(), 1);
        let payload = payload(lines.first())?;
        assert_eq!(payload.get("level").and_then(Value::as_str), Some("debug"));
        assert_eq!(
            payload.get("event").and_then(Value::as_str),
            Some("index_options.option")
        );
        let fields = payload
            .get("fields")
            .and_then(Value::as_object)
            .ok_or("missing fields")?;
        assert_eq!(fields.get("service").and_then(Value::as_str), Some("search-index"));
        assert_eq!(fields.get("mode").and_then(Value::as_str), Some("resolve"));
        assert_eq!(fields.get("value").and_then(Value::as_str), Some("64"));
        Ok(())
    }

    #[test]
    fn long_values_are_clipped() -> Result<(), Box<dyn Error>> {
        let sink = Arc::new(MemoryLogSink::default());
        let logger = JsonLogger::new(sink.clone()).with_max_value_chars(4);
        let schema = "{\"fields\":{}}";

        logger.info(
            "index_options.option",
            "Index option supplied",
            Some(log_fields([("value", schema)])),
        );

        let payload = payload(sink.take().first())?;
        assert_eq!(
            payload.pointer("/fields/value").and_then(Value::as_str),
            Some("{\"fi...")
        );
        Ok(())
    }

    #[test]
    fn error_payload_is_kept() -> Result<(), Box<dyn Error>> {
        let sink = Arc::new(MemoryLogSink::default());
        let logger = JsonLogger::new(sink.clone());

        logger.log(
            LogEvent::new(LogLevel::Error, "cli.failed", "resolution failed")
                .with_error(serde_json::json!({"code": "index_options:missing_schema"})),
        );

        let payload = payload(sink.take().first())?;
        assert_eq!(
            payload.pointer("/error/code").and_then(Value::as_str),
            Some("index_options:missing_schema")
        );
        assert!(payload.get("fields").is_none());
        Ok(())
    }
}
