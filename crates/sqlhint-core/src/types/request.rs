use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Maximum SQL input size (10MB) accepted by [`crate::complete`].
pub const DEFAULT_MAX_SQL_LENGTH: usize = 10 * 1024 * 1024;

/// A single completion request forwarded by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    /// Full text of the statement being edited
    pub sql: String,
    /// Byte offset of the cursor inside `sql`
    pub cursor_offset: usize,
    /// Optional request limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<CompletionOptions>,
}

impl CompletionRequest {
    pub fn new(sql: impl Into<String>, cursor_offset: usize) -> Self {
        Self {
            sql: sql.into(),
            cursor_offset,
            options: None,
        }
    }

    /// Builds a request with the cursor placed at the end of `sql`.
    pub fn at_end(sql: impl Into<String>) -> Self {
        let sql = sql.into();
        let cursor_offset = sql.len();
        Self::new(sql, cursor_offset)
    }

    pub fn max_sql_length(&self) -> usize {
        self.options
            .as_ref()
            .map(|options| options.max_sql_length)
            .unwrap_or(DEFAULT_MAX_SQL_LENGTH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOptions {
    /// Requests whose SQL exceeds this many bytes are rejected with an error result
    #[serde(default = "default_max_sql_length")]
    pub max_sql_length: usize,
}

fn default_max_sql_length() -> usize {
    DEFAULT_MAX_SQL_LENGTH
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_sql_length: DEFAULT_MAX_SQL_LENGTH,
        }
    }
}
