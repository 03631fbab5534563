//! Datasource trait used by the column tooling

use crate::{ResourceItem, Result, TableSchema, TableTarget};
use async_trait::async_trait;

/// Column and schema lookups for a SQL datasource
///
/// Implementations talk to the actual backend. Callers are expected to
/// handle failures themselves; nothing here retries.
#[async_trait]
pub trait SqlDatasource: Send + Sync {
    /// Stable identifier of this datasource, used as a cache key
    fn id(&self) -> &str;

    /// List column names of a table, in declaration order.
    ///
    /// With `orderable` set only columns usable in `ORDER BY` are returned.
    async fn fields(&self, table: &TableTarget, orderable: bool) -> Result<Vec<String>>;

    /// Describe a table's columns
    async fn table_schema(&self, table: &TableTarget) -> Result<TableSchema>;

    /// Browse tables, optionally restricted to a dataset path
    async fn lookup(&self, path: Option<&str>) -> Result<Vec<ResourceItem>>;

    /// List datasets.
    /// Default returns an empty list since not every backend has them.
    async fn datasets(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}
