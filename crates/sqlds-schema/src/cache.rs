//! Column metadata cache to avoid repeated datasource round-trips

use parking_lot::RwLock;
use sqlds_core::{TableSchema, TableTarget};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default TTL for cached column metadata
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct Timestamped<T> {
    value: T,
    cached_at: Instant,
}

impl<T: Clone> Timestamped<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            cached_at: Instant::now(),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() < ttl
    }

    fn fresh(&self, ttl: Duration) -> Option<T> {
        self.is_fresh(ttl).then(|| self.value.clone())
    }
}

/// Cached metadata for one datasource
#[derive(Debug, Default)]
struct CachedDatasource {
    /// Keyed by qualified table name and the orderable flag
    fields: HashMap<(String, bool), Timestamped<Vec<String>>>,
    schemas: HashMap<String, Timestamped<TableSchema>>,
}

/// Cache of column lists and table schemas, per datasource.
///
/// Expired entries of a datasource are pruned whenever a new entry is stored
/// for it.
pub struct ColumnCache {
    cache: RwLock<HashMap<String, CachedDatasource>>,
    ttl: Duration,
}

impl ColumnCache {
    /// Create a new cache
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get cached column names for a table
    pub fn get_fields(
        &self,
        datasource_id: &str,
        table: &TableTarget,
        orderable: bool,
    ) -> Option<Vec<String>> {
        let key = (table.qualified_name(), orderable);
        let result = self
            .cache
            .read()
            .get(datasource_id)
            .and_then(|c| c.fields.get(&key))
            .and_then(|entry| entry.fresh(self.ttl));
        if result.is_some() {
            tracing::debug!(datasource_id = %datasource_id, table = %table, "cache hit for fields");
        } else {
            tracing::debug!(datasource_id = %datasource_id, table = %table, "cache miss for fields");
        }
        result
    }

    /// Store column names for a table
    pub fn set_fields(
        &self,
        datasource_id: &str,
        table: &TableTarget,
        orderable: bool,
        fields: Vec<String>,
    ) {
        tracing::debug!(datasource_id = %datasource_id, table = %table, field_count = fields.len(), "caching fields");
        let mut cache = self.cache.write();
        let entry = cache.entry(datasource_id.to_string()).or_default();
        entry.fields.retain(|_, cached| cached.is_fresh(self.ttl));
        entry
            .fields
            .insert((table.qualified_name(), orderable), Timestamped::new(fields));
    }

    /// Get a cached table schema
    pub fn get_schema(&self, datasource_id: &str, table: &TableTarget) -> Option<TableSchema> {
        let result = self
            .cache
            .read()
            .get(datasource_id)
            .and_then(|c| c.schemas.get(&table.qualified_name()))
            .and_then(|entry| entry.fresh(self.ttl));
        if result.is_some() {
            tracing::debug!(datasource_id = %datasource_id, table = %table, "cache hit for table schema");
        } else {
            tracing::debug!(datasource_id = %datasource_id, table = %table, "cache miss for table schema");
        }
        result
    }

    /// Store a table schema
    pub fn set_schema(&self, datasource_id: &str, table: &TableTarget, schema: TableSchema) {
        tracing::debug!(datasource_id = %datasource_id, table = %table, "caching table schema");
        let mut cache = self.cache.write();
        let entry = cache.entry(datasource_id.to_string()).or_default();
        entry.schemas.retain(|_, cached| cached.is_fresh(self.ttl));
        entry
            .schemas
            .insert(table.qualified_name(), Timestamped::new(schema));
    }

    /// Invalidate everything cached for a datasource
    pub fn invalidate(&self, datasource_id: &str) {
        tracing::info!(datasource_id = %datasource_id, "invalidating column cache");
        self.cache.write().remove(datasource_id);
    }

    /// Clear all caches
    pub fn clear(&self) {
        let count = self.cache.read().len();
        tracing::info!(cache_entries = count, "clearing all column caches");
        self.cache.write().clear();
    }
}

impl Default for ColumnCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
