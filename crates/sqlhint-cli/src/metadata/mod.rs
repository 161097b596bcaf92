//! Live database schema providers.
//!
//! [`SqlxProvider`] answers schema lookups by querying the database catalog on
//! every call, so completions track DDL changes without a restart. Wrap it in
//! [`sqlhint_core::CachedProvider`] to trade freshness for fewer round trips.
//!
//! Note: This is a CLI-only feature. Hosts without a database connection
//! should load a JSON or DDL snapshot instead.

mod sqlx_provider;

pub use sqlx_provider::{DatabaseType, SqlxProvider};
