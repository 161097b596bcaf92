use crate::error::SchemaError;
use crate::types::{SchemaMetadata, SchemaTable};

use super::SchemaProvider;

/// Provider over an in-memory [`SchemaMetadata`] snapshot.
///
/// Name matching is exact. Tables without an explicit schema belong to the
/// snapshot's default schema.
#[derive(Debug, Clone, Default)]
pub struct MetadataProvider {
    metadata: SchemaMetadata,
}

impl MetadataProvider {
    pub fn new(metadata: SchemaMetadata) -> Self {
        Self { metadata }
    }

    pub fn metadata(&self) -> &SchemaMetadata {
        &self.metadata
    }

    fn default_schema(&self) -> Option<&str> {
        self.metadata.default_schema.as_deref()
    }

    fn tables_in<'a>(
        &'a self,
        schema: Option<&'a str>,
    ) -> impl Iterator<Item = &'a SchemaTable> + 'a {
        let default_schema = self.default_schema();
        self.metadata
            .tables
            .iter()
            .filter(move |table| table.in_schema(schema, default_schema))
    }

    fn has_schema(&self, schema: Option<&str>) -> bool {
        let normalized = schema.or(self.default_schema());
        normalized.is_none()
            || normalized == self.default_schema()
            || self.tables_in(schema).next().is_some()
    }
}

impl SchemaProvider for MetadataProvider {
    fn list_schemas(&self) -> Result<Vec<String>, SchemaError> {
        let mut schemas: Vec<String> = Vec::new();
        if let Some(default_schema) = self.default_schema() {
            schemas.push(default_schema.to_string());
        }
        for table in &self.metadata.tables {
            if let Some(schema) = &table.schema {
                if !schemas.contains(schema) {
                    schemas.push(schema.clone());
                }
            }
        }
        Ok(schemas)
    }

    fn list_tables(&self, schema: Option<&str>) -> Result<Vec<String>, SchemaError> {
        if !self.has_schema(schema) {
            return Err(SchemaError::SchemaNotFound(
                schema.unwrap_or_default().to_string(),
            ));
        }
        Ok(self.tables_in(schema).map(|table| table.name.clone()).collect())
    }

    fn list_columns(&self, table: &str, schema: Option<&str>) -> Result<Vec<String>, SchemaError> {
        self.tables_in(schema)
            .find(|candidate| candidate.name == table)
            .map(|found| found.columns.iter().map(|column| column.name.clone()).collect())
            .ok_or_else(|| SchemaError::table_not_found(schema, table))
    }

    fn default_schema_name(&self) -> Option<String> {
        self.metadata.default_schema.clone()
    }
}

impl From<SchemaMetadata> for MetadataProvider {
    fn from(metadata: SchemaMetadata) -> Self {
        Self::new(metadata)
    }
}
