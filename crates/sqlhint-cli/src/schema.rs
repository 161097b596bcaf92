//! Schema snapshot loading from JSON metadata or DDL files.

use anyhow::{bail, Context, Result};
use sqlhint_core::{ColumnSchema, SchemaMetadata, SchemaTable};
use sqlparser::ast::{ObjectName, Statement};
use sqlparser::dialect::Dialect;
use sqlparser::parser::Parser;
use std::path::Path;

/// Load a schema snapshot, choosing the format from the file extension.
///
/// `.json` files are parsed as [`SchemaMetadata`]; anything else is treated as
/// CREATE TABLE DDL.
pub fn load_schema(path: &Path, dialect: &dyn Dialect) -> Result<SchemaMetadata> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        load_schema_from_json(path)
    } else {
        load_schema_from_ddl(path, dialect)
    }
}

/// Load a JSON schema snapshot.
pub fn load_schema_from_json(path: &Path) -> Result<SchemaMetadata> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file: {}", path.display()))?;

    SchemaMetadata::from_json(&content)
        .with_context(|| format!("Invalid schema metadata in {}", path.display()))
}

/// Load schema from a DDL file containing CREATE TABLE statements.
pub fn load_schema_from_ddl(path: &Path, dialect: &dyn Dialect) -> Result<SchemaMetadata> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file: {}", path.display()))?;

    parse_schema_ddl(&content, dialect)
        .with_context(|| format!("Failed to load schema from {}", path.display()))
}

/// Parse DDL content to extract schema metadata.
///
/// Statements other than CREATE TABLE are ignored. The snapshot carries no
/// default schema; unqualified tables belong to whichever default the host
/// picks.
fn parse_schema_ddl(content: &str, dialect: &dyn Dialect) -> Result<SchemaMetadata> {
    let statements = Parser::parse_sql(dialect, content).context("Failed to parse schema DDL")?;

    let tables: Vec<SchemaTable> = statements
        .iter()
        .filter_map(|statement| match statement {
            Statement::CreateTable(create) => {
                let (schema, name) = split_object_name(&create.name);
                Some(SchemaTable {
                    schema,
                    name,
                    columns: create
                        .columns
                        .iter()
                        .map(|column| ColumnSchema {
                            name: column.name.value.clone(),
                            data_type: Some(column.data_type.to_string()),
                        })
                        .collect(),
                })
            }
            _ => None,
        })
        .collect();

    if tables.is_empty() {
        bail!("Schema DDL produced no table definitions");
    }

    Ok(SchemaMetadata {
        default_schema: None,
        tables,
    })
}

/// Table name and its immediate schema qualifier. Catalog qualifiers are dropped.
fn split_object_name(name: &ObjectName) -> (Option<String>, String) {
    let parts: Vec<String> = name
        .0
        .iter()
        .map(|part| {
            part.as_ident()
                .map(|ident| ident.value.clone())
                .unwrap_or_else(|| part.to_string())
        })
        .collect();

    match parts.as_slice() {
        [] => (None, String::new()),
        [table] => (None, table.clone()),
        [.., schema, table] => (Some(schema.clone()), table.clone()),
    }
}
