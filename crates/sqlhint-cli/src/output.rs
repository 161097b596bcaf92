//! Output formatting for completion results.

use anyhow::{Context, Result};
use serde::Serialize;
use sqlhint_core::{CompletionResult, SchemaMetadata};

/// One candidate per line, in engine order.
pub fn format_text(result: &CompletionResult) -> String {
    let mut out = result.candidates.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Format the completion result as JSON.
///
/// If `compact` is true, outputs minified JSON without whitespace.
pub fn format_json(result: &CompletionResult, compact: bool) -> Result<String> {
    to_json(result, compact).context("Failed to serialize completion result")
}

/// JSON Schema describing the `--schema` metadata file format.
pub fn format_metadata_schema(compact: bool) -> Result<String> {
    let schema = schemars::schema_for!(SchemaMetadata);
    to_json(&schema, compact).context("Failed to serialize metadata JSON Schema")
}

fn to_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}
