//! Candidate generation for each [`CandidateSource`].

use regex::Regex;
use std::sync::OnceLock;
#[cfg(feature = "tracing")]
use tracing::debug;

use crate::schema::SchemaProvider;

use super::rules::CandidateSource;

/// Builtin functions offered alongside columns.
pub const BUILTIN_FUNCTIONS: &[&str] = &[
    "COUNT()", "AVG()", "SUM()", "MIN()", "MAX()", "LOWER()", "UPPER()", "NOW()", "DATE()",
    "ROUND()",
];

/// Keyword phrases offered when no more specific rule applies. Multi-word
/// phrases are single candidates.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "SELECT",
    "FROM",
    "WHERE",
    "GROUP BY",
    "ORDER BY",
    "HAVING",
    "INSERT INTO",
    "VALUES",
    "UPDATE",
    "SET",
    "DELETE FROM",
    "JOIN",
    "INNER JOIN",
    "LEFT JOIN",
    "RIGHT JOIN",
    "FULL JOIN",
    "ON",
    "DISTINCT",
    "LIMIT",
    "OFFSET",
];

/// A table reference split into schema and name. `schema` is `None` for the
/// default schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRef<'a> {
    pub schema: Option<&'a str>,
    pub table: &'a str,
}

/// Materializes the candidates for `source`.
///
/// `statement` is the full statement text, including anything after the
/// cursor, so tables named later in the statement still contribute columns.
pub fn generate(
    source: CandidateSource,
    provider: &dyn SchemaProvider,
    statement: &str,
) -> Vec<String> {
    match source {
        CandidateSource::Keywords => to_owned(RESERVED_KEYWORDS),
        CandidateSource::Tables => tables(provider),
        CandidateSource::Columns => columns(provider, statement),
        CandidateSource::ColumnsAndFunctions => {
            let mut candidates = columns(provider, statement);
            candidates.extend(builtin_functions());
            candidates
        }
        CandidateSource::Fixed(words) => to_owned(words),
        CandidateSource::SetAndTables => {
            let mut candidates = vec!["SET".to_string()];
            candidates.extend(tables(provider));
            candidates
        }
        CandidateSource::Literal(literal) => vec![literal.to_string()],
        CandidateSource::Empty => Vec::new(),
    }
}

pub fn builtin_functions() -> Vec<String> {
    to_owned(BUILTIN_FUNCTIONS)
}

pub fn reserved_keywords() -> Vec<String> {
    to_owned(RESERVED_KEYWORDS)
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| (*word).to_string()).collect()
}

/// Default-schema tables unqualified, then every other schema's tables as
/// `schema.table`.
///
/// A schema whose tables cannot be listed contributes nothing.
pub fn tables(provider: &dyn SchemaProvider) -> Vec<String> {
    let mut tables = provider.list_tables(None).unwrap_or_else(|_err| {
        #[cfg(feature = "tracing")]
        debug!(error = %_err, "skipping default schema tables");
        Vec::new()
    });

    let Some(default_schema) = provider.default_schema_name() else {
        return tables;
    };

    let schemas = provider.list_schemas().unwrap_or_else(|_err| {
        #[cfg(feature = "tracing")]
        debug!(error = %_err, "skipping non-default schemas");
        Vec::new()
    });

    for schema in schemas.iter().filter(|schema| **schema != default_schema) {
        match provider.list_tables(Some(schema)) {
            Ok(names) => {
                tables.extend(names.into_iter().map(|table| format!("{schema}.{table}")));
            }
            Err(_err) => {
                #[cfg(feature = "tracing")]
                debug!(schema = %schema, error = %_err, "skipping schema tables");
            }
        }
    }

    tables
}

/// Columns of every table the statement references, in reference order.
///
/// A reference that cannot be resolved contributes no columns.
pub fn columns(provider: &dyn SchemaProvider, statement: &str) -> Vec<String> {
    let default_schema = provider.default_schema_name();
    let mut columns = Vec::new();

    for name in extract_table_names(statement) {
        let reference = split_schema_table(name, default_schema.as_deref());
        match provider.list_columns(reference.table, reference.schema) {
            Ok(names) => columns.extend(names),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                debug!(table = name, error = %_err, "skipping unresolved table");
            }
        }
    }

    columns
}

/// Names following `FROM`, `JOIN` or `UPDATE`, case-insensitively, dots allowed.
pub fn extract_table_names(statement: &str) -> Vec<&str> {
    static TABLE_REFERENCE: OnceLock<Regex> = OnceLock::new();
    let re = TABLE_REFERENCE.get_or_init(|| {
        Regex::new(r"(?i)FROM\s+([\w.]+)|JOIN\s+([\w.]+)|UPDATE\s+([\w.]+)")
            .expect("Invalid regex pattern")
    });

    re.captures_iter(statement)
        .filter_map(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .next()
                .map(|group| group.as_str())
        })
        .collect()
}

/// Splits `schema.table`, folding the default schema into `None`.
///
/// Names without exactly one dot are looked up whole in the default schema.
pub fn split_schema_table<'a>(name: &'a str, default_schema: Option<&str>) -> TableRef<'a> {
    let mut parts = name.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(schema), Some(table), None) => TableRef {
            schema: (Some(schema) != default_schema).then_some(schema),
            table,
        },
        _ => TableRef {
            schema: None,
            table: name,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MetadataProvider;
    use crate::types::{SchemaMetadata, SchemaTable};

    fn provider() -> MetadataProvider {
        MetadataProvider::new(SchemaMetadata {
            default_schema: Some("public".to_string()),
            tables: vec![
                SchemaTable::new(Some("public"), "orders", &["id", "total"]),
                SchemaTable::new(Some("public"), "users", &["id", "email"]),
                SchemaTable::new(Some("sales"), "leads", &["lead_id", "score"]),
            ],
        })
    }

    #[test]
    fn test_extract_table_names() {
        let names = extract_table_names(
            "SELECT * FROM orders o JOIN sales.leads l ON o.id = l.lead_id; update users set",
        );
        assert_eq!(names, vec!["orders", "sales.leads", "users"]);
    }

    #[test]
    fn test_extract_table_names_requires_name() {
        assert!(extract_table_names("SELECT * FROM ").is_empty());
        assert!(extract_table_names("SELECT 1").is_empty());
    }

    #[test]
    fn test_split_default_schema_is_unqualified() {
        assert_eq!(
            split_schema_table("public.orders", Some("public")),
            split_schema_table("orders", Some("public"))
        );
        assert_eq!(
            split_schema_table("orders", Some("public")),
            TableRef {
                schema: None,
                table: "orders"
            }
        );
    }

    #[test]
    fn test_split_keeps_other_schema() {
        assert_eq!(
            split_schema_table("sales.leads", Some("public")),
            TableRef {
                schema: Some("sales"),
                table: "leads"
            }
        );
        assert_eq!(
            split_schema_table("sales.leads", None),
            TableRef {
                schema: Some("sales"),
                table: "leads"
            }
        );
    }

    #[test]
    fn test_split_three_parts_is_looked_up_whole() {
        assert_eq!(
            split_schema_table("db.sales.leads", Some("public")),
            TableRef {
                schema: None,
                table: "db.sales.leads"
            }
        );
    }

    #[test]
    fn test_tables_qualifies_non_default_schemas() {
        assert_eq!(
            tables(&provider()),
            vec![
                "orders".to_string(),
                "users".to_string(),
                "sales.leads".to_string()
            ]
        );
    }

    #[test]
    fn test_tables_without_default_schema_lists_default_only() {
        let provider = MetadataProvider::new(SchemaMetadata {
            default_schema: None,
            tables: vec![
                SchemaTable::new(None, "items", &["sku"]),
                SchemaTable::new(Some("archive"), "items_2020", &["sku"]),
            ],
        });
        assert_eq!(tables(&provider), vec!["items".to_string()]);
    }

    #[test]
    fn test_columns_skip_unknown_tables() {
        let columns = columns(
            &provider(),
            "SELECT FROM missing JOIN public.orders JOIN sales.leads",
        );
        assert_eq!(
            columns,
            vec![
                "id".to_string(),
                "total".to_string(),
                "lead_id".to_string(),
                "score".to_string()
            ]
        );
    }

    #[test]
    fn test_generate_set_and_tables() {
        let candidates = generate(CandidateSource::SetAndTables, &provider(), "UPDATE ");
        assert_eq!(candidates[0], "SET");
        assert!(candidates.contains(&"sales.leads".to_string()));
    }

    #[test]
    fn test_generate_literal_is_single_element_list() {
        let candidates = generate(CandidateSource::Literal("("), &provider(), "");
        assert_eq!(candidates, vec!["(".to_string()]);
    }
}
