//! Assertions for error envelopes produced across the workspace.

use search_index_shared::{ErrorClass, ErrorEnvelope, ErrorKind};

/// Error codes the resolver surfaces through `ErrorEnvelope`.
pub const INDEX_OPTION_ERROR_CODES: &[&str] = &[
    "malformed_value",
    "out_of_range",
    "missing_schema",
    "invalid_schema",
];

/// Returns true when the envelope is an operator-facing validation failure
/// in `namespace`.
pub fn is_expected_failure(envelope: &ErrorEnvelope, namespace: &str) -> bool {
    envelope.kind == ErrorKind::Expected
        && envelope.class == ErrorClass::NonRetriable
        && envelope.code.namespace() == namespace
}

/// Returns true when the envelope names `option` in its metadata.
pub fn names_option(envelope: &ErrorEnvelope, option: &str) -> bool {
    envelope.metadata_value("option") == Some(option)
}
