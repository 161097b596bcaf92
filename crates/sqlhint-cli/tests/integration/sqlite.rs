//! SQLite integration tests for the live schema provider.

use rusqlite::Connection;
use sqlhint_cli::metadata::{DatabaseType, SqlxProvider};
use sqlhint_core::{get_completions, CachedProvider, SchemaError, SchemaProvider};
use std::time::Duration;
use tempfile::{tempdir, TempDir};

use crate::run_cli_success;

/// Create a test SQLite database with sample tables and return its URL.
fn create_test_db(dir: &TempDir) -> String {
    let path = dir.path().join("test.db");
    let conn = Connection::open(&path).expect("open sqlite db");

    conn.execute_batch(
        r#"
        CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT UNIQUE
        );

        CREATE TABLE orders (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id),
            total REAL NOT NULL
        );

        CREATE VIEW big_orders AS SELECT * FROM orders WHERE total > 100;
        "#,
    )
    .expect("create test tables");

    format!("sqlite://{}", path.display())
}

#[test]
fn test_sqlite_provider_lookups() {
    let dir = tempdir().expect("create temp dir");
    let url = create_test_db(&dir);
    let provider = SqlxProvider::connect(&url, None).expect("connect");

    assert_eq!(provider.database_type(), DatabaseType::Sqlite);
    assert_eq!(provider.default_schema_name().as_deref(), Some("main"));
    assert_eq!(provider.list_schemas().unwrap(), vec!["main".to_string()]);
    assert_eq!(
        provider.list_tables(None).unwrap(),
        vec!["orders".to_string(), "users".to_string()]
    );
    assert_eq!(
        provider.list_columns("users", None).unwrap(),
        vec!["id".to_string(), "name".to_string(), "email".to_string()]
    );
    assert!(matches!(
        provider.list_columns("missing", None),
        Err(SchemaError::TableNotFound { .. })
    ));
    assert!(matches!(
        provider.list_tables(Some("attached")),
        Err(SchemaError::SchemaNotFound(_))
    ));
}

#[test]
fn test_sqlite_completions_resolve_qualified_default_schema() {
    let dir = tempdir().expect("create temp dir");
    let url = create_test_db(&dir);
    let provider = SqlxProvider::connect(&url, None).expect("connect");

    let qualified = "SELECT * FROM main.orders WHERE ";
    let unqualified = "SELECT * FROM orders WHERE ";
    let columns = get_completions(&provider, qualified, qualified.len());

    assert_eq!(columns, get_completions(&provider, unqualified, unqualified.len()));
    assert_eq!(&columns[..3], ["id", "user_id", "total"]);
}

#[test]
fn test_sqlite_cli_lists_tables() {
    let dir = tempdir().expect("create temp dir");
    let url = create_test_db(&dir);

    let output = run_cli_success(&["--metadata-url", &url, "--sql", "SELECT * FROM "]);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "orders\nusers\n");
}

#[test]
fn test_sqlite_cached_provider_serves_snapshot_until_invalidated() {
    let dir = tempdir().expect("create temp dir");
    let url = create_test_db(&dir);
    let provider = SqlxProvider::connect(&url, None).expect("connect");
    let cached = CachedProvider::new(provider, Duration::from_secs(60));

    let before = get_completions(&cached, "UPDATE users SET ", 17);
    assert_eq!(&before[..3], ["id", "name", "email"]);
    assert!(!before.contains(&"age".to_string()));

    let conn = Connection::open(dir.path().join("test.db")).expect("reopen sqlite db");
    conn.execute_batch("ALTER TABLE users ADD COLUMN age INTEGER")
        .expect("alter table");

    assert_eq!(get_completions(&cached, "UPDATE users SET ", 17), before);
    cached.invalidate();
    let after = get_completions(&cached, "UPDATE users SET ", 17);
    assert!(after.contains(&"age".to_string()));
}
