//! Error types for schema lookups.
//!
//! # Error Handling Strategy
//!
//! The completion engine never fails a request. Two patterns cover the cases
//! where something goes wrong:
//!
//! - [`SchemaError`]: returned by [`crate::schema::SchemaProvider`] lookups. The
//!   engine treats any such error as "no contribution" for the affected part
//!   (one table's columns, one schema's tables) and keeps going.
//!
//! - [`crate::types::CompletionResult::error`]: set when a request is rejected
//!   up front (cursor outside the text, oversize input). Candidates are then
//!   empty.

use thiserror::Error;

/// Error raised by a schema provider lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The named schema does not exist.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// The table does not exist in the given schema (`None` is the default schema).
    #[error("table not found: {}", qualified(.schema.as_deref(), .table))]
    TableNotFound {
        schema: Option<String>,
        table: String,
    },

    /// The underlying metadata source failed (connection lost, query error, ...).
    #[error("schema backend error: {0}")]
    Backend(String),
}

impl SchemaError {
    pub fn table_not_found(schema: Option<&str>, table: &str) -> Self {
        Self::TableNotFound {
            schema: schema.map(str::to_string),
            table: table.to_string(),
        }
    }

    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

fn qualified(schema: Option<&str>, table: &str) -> String {
    match schema {
        Some(schema) => format!("{schema}.{table}"),
        None => table.to_string(),
    }
}
