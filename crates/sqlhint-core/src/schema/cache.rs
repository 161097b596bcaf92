use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::error::SchemaError;

use super::SchemaProvider;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum LookupKey {
    Schemas,
    Tables(Option<String>),
    Columns(Option<String>, String),
}

type LookupResult = Result<Vec<String>, SchemaError>;

/// Memoizes another provider's lookups for at most `ttl`.
///
/// Failed lookups are cached as well so an unreachable table does not cost a
/// round trip on every keystroke. A zero `ttl` disables caching entirely.
pub struct CachedProvider<P> {
    inner: P,
    ttl: Duration,
    entries: Mutex<HashMap<LookupKey, (Instant, LookupResult)>>,
}

impl<P: SchemaProvider> CachedProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Drops every cached entry.
    pub fn invalidate(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<LookupKey, (Instant, LookupResult)>> {
        // A panic while holding the lock cannot leave a half-written entry.
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn cached(&self, key: LookupKey, fetch: impl FnOnce(&P) -> LookupResult) -> LookupResult {
        if self.ttl.is_zero() {
            return fetch(&self.inner);
        }

        if let Some((fetched_at, result)) = self.lock().get(&key) {
            if fetched_at.elapsed() < self.ttl {
                #[cfg(feature = "tracing")]
                trace!(?key, "schema cache hit");
                return result.clone();
            }
        }

        #[cfg(feature = "tracing")]
        trace!(?key, "schema cache miss");

        // Fetch without holding the lock; concurrent misses may both query.
        let result = fetch(&self.inner);
        let mut entries = self.lock();
        let ttl = self.ttl;
        entries.retain(|_, (fetched_at, _)| fetched_at.elapsed() < ttl);
        entries.insert(key, (Instant::now(), result.clone()));
        result
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lock().len()
    }
}

impl<P: SchemaProvider> SchemaProvider for CachedProvider<P> {
    fn list_schemas(&self) -> Result<Vec<String>, SchemaError> {
        self.cached(LookupKey::Schemas, |inner| inner.list_schemas())
    }

    fn list_tables(&self, schema: Option<&str>) -> Result<Vec<String>, SchemaError> {
        let key = LookupKey::Tables(schema.map(str::to_string));
        self.cached(key, |inner| inner.list_tables(schema))
    }

    fn list_columns(&self, table: &str, schema: Option<&str>) -> Result<Vec<String>, SchemaError> {
        let key = LookupKey::Columns(schema.map(str::to_string), table.to_string());
        self.cached(key, |inner| inner.list_columns(table, schema))
    }

    fn default_schema_name(&self) -> Option<String> {
        self.inner.default_schema_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MetadataProvider;
    use crate::types::{SchemaMetadata, SchemaTable};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        inner: MetadataProvider,
        calls: AtomicUsize,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                inner: MetadataProvider::new(SchemaMetadata {
                    default_schema: Some("public".to_string()),
                    tables: vec![SchemaTable::new(None, "orders", &["id", "total"])],
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SchemaProvider for CountingProvider {
        fn list_schemas(&self) -> Result<Vec<String>, SchemaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.list_schemas()
        }

        fn list_tables(&self, schema: Option<&str>) -> Result<Vec<String>, SchemaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.list_tables(schema)
        }

        fn list_columns(
            &self,
            table: &str,
            schema: Option<&str>,
        ) -> Result<Vec<String>, SchemaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.list_columns(table, schema)
        }

        fn default_schema_name(&self) -> Option<String> {
            self.inner.default_schema_name()
        }
    }

    #[test]
    fn test_repeated_lookups_hit_cache() {
        let cached = CachedProvider::new(CountingProvider::new(), Duration::from_secs(60));
        for _ in 0..3 {
            assert_eq!(cached.list_tables(None).unwrap(), vec!["orders".to_string()]);
        }
        assert_eq!(cached.inner().calls(), 1);
    }

    #[test]
    fn test_failures_are_cached() {
        let cached = CachedProvider::new(CountingProvider::new(), Duration::from_secs(60));
        assert!(cached.list_columns("missing", None).is_err());
        assert!(cached.list_columns("missing", None).is_err());
        assert_eq!(cached.inner().calls(), 1);
    }

    #[test]
    fn test_keys_distinguish_schema_and_table() {
        let cached = CachedProvider::new(CountingProvider::new(), Duration::from_secs(60));
        cached.list_columns("orders", None).unwrap();
        cached.list_columns("orders", Some("public")).unwrap();
        cached.list_tables(None).unwrap();
        assert_eq!(cached.inner().calls(), 3);
    }

    #[test]
    fn test_zero_ttl_disables_cache() {
        let cached = CachedProvider::new(CountingProvider::new(), Duration::ZERO);
        cached.list_schemas().unwrap();
        cached.list_schemas().unwrap();
        assert_eq!(cached.inner().calls(), 2);
    }

    #[test]
    fn test_expired_entries_are_refetched() {
        let cached = CachedProvider::new(CountingProvider::new(), Duration::from_millis(10));
        cached.list_schemas().unwrap();
        std::thread::sleep(Duration::from_millis(30));
        cached.list_schemas().unwrap();
        assert_eq!(cached.inner().calls(), 2);
    }

    #[test]
    fn test_miss_evicts_expired_entries() {
        let cached = CachedProvider::new(CountingProvider::new(), Duration::from_millis(250));
        for i in 0..50 {
            let _ = cached.list_columns(&format!("t{i}"), None);
        }
        assert_eq!(cached.len(), 50);
        std::thread::sleep(Duration::from_millis(400));
        cached.list_tables(None).unwrap();
        assert_eq!(cached.len(), 1);
    }

    #[test]
    fn test_fresh_entries_survive_eviction() {
        let cached = CachedProvider::new(CountingProvider::new(), Duration::from_secs(60));
        cached.list_schemas().unwrap();
        cached.list_tables(None).unwrap();
        assert_eq!(cached.len(), 2);
        cached.list_schemas().unwrap();
        assert_eq!(cached.inner().calls(), 2);
    }

    #[test]
    fn test_invalidate_clears_entries() {
        let cached = CachedProvider::new(CountingProvider::new(), Duration::from_secs(60));
        cached.list_schemas().unwrap();
        cached.invalidate();
        cached.list_schemas().unwrap();
        assert_eq!(cached.inner().calls(), 2);
    }
}
