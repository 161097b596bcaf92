//! Schema metadata access for completion.
//!
//! The engine reads schema, table and column names through the
//! [`SchemaProvider`] trait and re-queries it on every request. Providers:
//!
//! - [`MetadataProvider`]: an in-memory snapshot, typically loaded from JSON or DDL.
//! - [`CachedProvider`]: memoizes another provider's answers for a bounded time.
//!
//! Hosts that talk to a live database implement the trait themselves.

mod cache;
mod metadata;

pub use cache::CachedProvider;
pub use metadata::MetadataProvider;

use crate::error::SchemaError;

/// Read-only access to schema metadata.
///
/// A `schema` argument of `None` means the default schema. Implementations
/// must be safe to call from several threads at once; the engine never holds
/// on to a provider beyond one request.
pub trait SchemaProvider: Send + Sync {
    /// All schema names visible to the session, including the default one.
    fn list_schemas(&self) -> Result<Vec<String>, SchemaError>;

    /// Table names in `schema`, unqualified.
    fn list_tables(&self, schema: Option<&str>) -> Result<Vec<String>, SchemaError>;

    /// Column names of `table` in `schema`. Fails when the table does not exist.
    fn list_columns(&self, table: &str, schema: Option<&str>) -> Result<Vec<String>, SchemaError>;

    /// Name of the schema unqualified references resolve to, if the source has one.
    fn default_schema_name(&self) -> Option<String>;
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for Box<P> {
    fn list_schemas(&self) -> Result<Vec<String>, SchemaError> {
        (**self).list_schemas()
    }

    fn list_tables(&self, schema: Option<&str>) -> Result<Vec<String>, SchemaError> {
        (**self).list_tables(schema)
    }

    fn list_columns(&self, table: &str, schema: Option<&str>) -> Result<Vec<String>, SchemaError> {
        (**self).list_columns(table, schema)
    }

    fn default_schema_name(&self) -> Option<String> {
        (**self).default_schema_name()
    }
}

/// The host's active schema session.
///
/// Owned by the host and lent to the engine per call. Reconnecting or
/// switching databases swaps the provider in place via [`SchemaSession::replace`].
pub struct SchemaSession {
    label: String,
    provider: Box<dyn SchemaProvider>,
}

impl SchemaSession {
    pub fn new(label: impl Into<String>, provider: impl SchemaProvider + 'static) -> Self {
        Self {
            label: label.into(),
            provider: Box::new(provider),
        }
    }

    /// Human-readable description of what the session is connected to.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn provider(&self) -> &dyn SchemaProvider {
        self.provider.as_ref()
    }

    /// Replaces the provider, returning the previous one.
    pub fn replace(
        &mut self,
        label: impl Into<String>,
        provider: impl SchemaProvider + 'static,
    ) -> Box<dyn SchemaProvider> {
        self.label = label.into();
        std::mem::replace(&mut self.provider, Box::new(provider))
    }
}

impl std::fmt::Debug for SchemaSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaSession")
            .field("label", &self.label)
            .field("default_schema", &self.provider.default_schema_name())
            .finish()
    }
}
