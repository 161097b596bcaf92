pub mod completion;
pub mod error;
pub mod schema;
pub mod types;

// Re-export main types and functions
pub use completion::{complete, completion_context, get_completions};
pub use error::SchemaError;
pub use schema::{CachedProvider, MetadataProvider, SchemaProvider, SchemaSession};

// Re-export types explicitly
pub use types::{
    CandidateSourceKind, ClauseKeyword, ColumnSchema, CompletionContext, CompletionOptions,
    CompletionRequest, CompletionResult, SchemaMetadata, SchemaTable, Span,
};
