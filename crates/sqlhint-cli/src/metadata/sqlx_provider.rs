//! SQLx-based schema provider for live database introspection.
//!
//! Supports PostgreSQL, MySQL, and SQLite databases.

use anyhow::{Context, Result};
use sqlhint_core::{SchemaError, SchemaProvider};
use sqlx::any::AnyRow;
use sqlx::{AnyPool, Row};
use std::future::Future;
use tokio::runtime::Runtime;
use tracing::debug;

/// Schema name SQLite reports for the primary database.
const SQLITE_MAIN_SCHEMA: &str = "main";

/// Database type inferred from connection URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    Postgres,
    Mysql,
    Sqlite,
}

impl DatabaseType {
    /// Infer database type from a connection URL.
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Self::Postgres)
        } else if url.starts_with("mysql://") || url.starts_with("mariadb://") {
            Some(Self::Mysql)
        } else if url.starts_with("sqlite://") || url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }
}

/// A schema provider that queries a database's system catalogs through SQLx.
///
/// Async queries run on a runtime owned by the provider, so callers use it
/// synchronously. It must not be called from inside another tokio runtime.
pub struct SqlxProvider {
    pool: AnyPool,
    runtime: Runtime,
    db_type: DatabaseType,
    default_schema: Option<String>,
}

impl SqlxProvider {
    /// Connect to the database at `url`.
    ///
    /// `default_schema` overrides the schema the connection reports as current
    /// (`current_schema()` on PostgreSQL, `DATABASE()` on MySQL, `main` on
    /// SQLite).
    ///
    /// # Errors
    /// Returns an error if the URL scheme is not supported, the connection
    /// fails, or the current schema cannot be queried.
    pub fn connect(url: &str, default_schema: Option<String>) -> Result<Self> {
        let db_type = DatabaseType::from_url(url)
            .with_context(|| format!("Unsupported database URL scheme: {url}"))?;

        sqlx::any::install_default_drivers();

        let runtime = Runtime::new().context("Failed to start async runtime")?;
        let pool = runtime
            .block_on(AnyPool::connect(url))
            .with_context(|| format!("Failed to connect to {} database", db_type.name()))?;

        let mut provider = Self {
            pool,
            runtime,
            db_type,
            default_schema,
        };

        if provider.default_schema.is_none() {
            provider.default_schema = provider
                .current_schema()
                .context("Failed to query the current schema")?;
        }

        debug!(
            database = db_type.name(),
            default_schema = ?provider.default_schema,
            "connected schema provider"
        );

        Ok(provider)
    }

    pub fn database_type(&self) -> DatabaseType {
        self.db_type
    }

    fn block_on<F, T>(&self, future: F) -> Result<T, SchemaError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        self.runtime.block_on(future).map_err(SchemaError::backend)
    }

    fn current_schema(&self) -> Result<Option<String>, SchemaError> {
        let query = match self.db_type {
            DatabaseType::Postgres => "SELECT CAST(current_schema() AS TEXT) AS name",
            DatabaseType::Mysql => "SELECT DATABASE() AS name",
            DatabaseType::Sqlite => return Ok(Some(SQLITE_MAIN_SCHEMA.to_string())),
        };

        let row = self.block_on(sqlx::query(query).fetch_one(&self.pool))?;
        row.try_get::<Option<String>, _>("name")
            .map_err(SchemaError::backend)
    }

    /// Resolve `None` to the default schema.
    fn target_schema<'a>(&'a self, schema: Option<&'a str>) -> Option<&'a str> {
        schema.or(self.default_schema.as_deref())
    }

    fn names(&self, rows: Vec<AnyRow>) -> Result<Vec<String>, SchemaError> {
        rows.iter()
            .map(|row| row.try_get::<String, _>("name").map_err(SchemaError::backend))
            .collect()
    }

    fn fetch_schemas(&self) -> Result<Vec<String>, SchemaError> {
        let query = match self.db_type {
            DatabaseType::Postgres => {
                r#"
                SELECT CAST(schema_name AS TEXT) AS name
                FROM information_schema.schemata
                WHERE schema_name NOT LIKE 'pg\_%'
                    AND schema_name <> 'information_schema'
                ORDER BY schema_name
                "#
            }
            DatabaseType::Mysql => {
                r#"
                SELECT SCHEMA_NAME AS name
                FROM information_schema.SCHEMATA
                WHERE SCHEMA_NAME NOT IN ('information_schema', 'mysql', 'performance_schema', 'sys')
                ORDER BY SCHEMA_NAME
                "#
            }
            DatabaseType::Sqlite => return Ok(vec![SQLITE_MAIN_SCHEMA.to_string()]),
        };

        let rows = self.block_on(sqlx::query(query).fetch_all(&self.pool))?;
        self.names(rows)
    }

    fn fetch_tables(&self, schema: &str) -> Result<Vec<String>, SchemaError> {
        let query = match self.db_type {
            DatabaseType::Postgres => {
                r#"
                SELECT CAST(table_name AS TEXT) AS name
                FROM information_schema.tables
                WHERE table_schema = $1 AND table_type = 'BASE TABLE'
                ORDER BY table_name
                "#
            }
            DatabaseType::Mysql => {
                r#"
                SELECT TABLE_NAME AS name
                FROM information_schema.TABLES
                WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE'
                ORDER BY TABLE_NAME
                "#
            }
            DatabaseType::Sqlite => {
                if schema != SQLITE_MAIN_SCHEMA {
                    return Err(SchemaError::SchemaNotFound(schema.to_string()));
                }
                let rows = self.block_on(
                    sqlx::query(
                        r#"
                        SELECT name FROM sqlite_master
                        WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                        ORDER BY name
                        "#,
                    )
                    .fetch_all(&self.pool),
                )?;
                return self.names(rows);
            }
        };

        let rows = self.block_on(
            sqlx::query(query)
                .bind(schema.to_string())
                .fetch_all(&self.pool),
        )?;
        self.names(rows)
    }

    fn fetch_columns(&self, table: &str, schema: &str) -> Result<Vec<String>, SchemaError> {
        let rows = match self.db_type {
            DatabaseType::Postgres => self.block_on(
                sqlx::query(
                    r#"
                    SELECT CAST(column_name AS TEXT) AS name
                    FROM information_schema.columns
                    WHERE table_schema = $1 AND table_name = $2
                    ORDER BY ordinal_position
                    "#,
                )
                .bind(schema.to_string())
                .bind(table.to_string())
                .fetch_all(&self.pool),
            )?,
            DatabaseType::Mysql => self.block_on(
                sqlx::query(
                    r#"
                    SELECT COLUMN_NAME AS name
                    FROM information_schema.COLUMNS
                    WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
                    ORDER BY ORDINAL_POSITION
                    "#,
                )
                .bind(schema.to_string())
                .bind(table.to_string())
                .fetch_all(&self.pool),
            )?,
            DatabaseType::Sqlite => {
                if schema != SQLITE_MAIN_SCHEMA {
                    return Err(SchemaError::SchemaNotFound(schema.to_string()));
                }
                // pragma_table_info is table-valued, so the name is inlined.
                let query = format!("PRAGMA table_info('{}')", table.replace('\'', "''"));
                self.block_on(sqlx::query(&query).fetch_all(&self.pool))?
            }
        };

        let columns = self.names(rows)?;
        if columns.is_empty() {
            return Err(SchemaError::table_not_found(Some(schema), table));
        }
        Ok(columns)
    }
}

impl SchemaProvider for SqlxProvider {
    fn list_schemas(&self) -> Result<Vec<String>, SchemaError> {
        let mut schemas = self.fetch_schemas()?;
        if let Some(default_schema) = &self.default_schema {
            if let Some(index) = schemas.iter().position(|schema| schema == default_schema) {
                let default_schema = schemas.remove(index);
                schemas.insert(0, default_schema);
            }
        }
        Ok(schemas)
    }

    fn list_tables(&self, schema: Option<&str>) -> Result<Vec<String>, SchemaError> {
        match self.target_schema(schema) {
            Some(schema) => self.fetch_tables(schema),
            None => Ok(Vec::new()),
        }
    }

    fn list_columns(&self, table: &str, schema: Option<&str>) -> Result<Vec<String>, SchemaError> {
        let Some(target) = self.target_schema(schema) else {
            return Err(SchemaError::table_not_found(schema, table));
        };
        self.fetch_columns(table, target)
    }

    fn default_schema_name(&self) -> Option<String> {
        self.default_schema.clone()
    }
}

impl Drop for SqlxProvider {
    fn drop(&mut self) {
        self.runtime.block_on(self.pool.close());
    }
}

impl std::fmt::Debug for SqlxProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlxProvider")
            .field("db_type", &self.db_type)
            .field("default_schema", &self.default_schema)
            .finish()
    }
}
