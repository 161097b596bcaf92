//! Types for the SQL completion API.
//!
//! This module defines the request, context and result types exchanged between
//! the completion engine and its host, plus the schema snapshot format a host
//! can load from disk.

mod common;
mod completion;
mod request;
mod schema;

// Re-export all public types
pub use common::Span;
pub use completion::{
    CandidateSourceKind, ClauseKeyword, CompletionContext, CompletionResult,
};
pub use request::{CompletionOptions, CompletionRequest};
pub use schema::{ColumnSchema, SchemaMetadata, SchemaTable};
