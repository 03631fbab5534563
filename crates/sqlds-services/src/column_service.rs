//! Column metadata service with caching
//!
//! Backs the column pickers and the raw SQL editor's completion. Datasource
//! round-trips go through a [`ColumnCache`]; classification itself stays a
//! pure function in `sqlds-schema`.

use std::sync::Arc;

use sqlds_core::{ResourceItem, SqlDatasource, SqlQuery, TableSchema, TableTarget};
use sqlds_schema::{ColumnCache, classify_columns, column_info_from_schema};

use crate::error::{ServiceError, ServiceResult};
use crate::settings::ServiceSettings;
use crate::view_models::{ColumnsState, EditorColumn};

/// Service for column lookups against a datasource
pub struct ColumnService {
    cache: Arc<ColumnCache>,
}

impl ColumnService {
    /// Create a new column service
    pub fn new() -> Self {
        Self {
            cache: Arc::new(ColumnCache::default()),
        }
    }

    /// Create a column service with a custom cache
    pub fn with_cache(cache: Arc<ColumnCache>) -> Self {
        Self { cache }
    }

    /// Create a column service configured from settings
    pub fn from_settings(settings: &ServiceSettings) -> Self {
        Self::with_cache(Arc::new(ColumnCache::new(settings.cache_ttl())))
    }

    async fn fetch_fields(
        &self,
        datasource: &dyn SqlDatasource,
        table: &TableTarget,
        orderable: bool,
    ) -> sqlds_core::Result<Vec<String>> {
        if let Some(fields) = self.cache.get_fields(datasource.id(), table, orderable) {
            return Ok(fields);
        }
        let fields = datasource.fields(table, orderable).await?;
        self.cache
            .set_fields(datasource.id(), table, orderable, fields.clone());
        Ok(fields)
    }

    async fn fetch_schema(
        &self,
        datasource: &dyn SqlDatasource,
        table: &TableTarget,
    ) -> sqlds_core::Result<TableSchema> {
        if let Some(schema) = self.cache.get_schema(datasource.id(), table) {
            return Ok(schema);
        }
        let schema = datasource.table_schema(table).await?;
        self.cache
            .set_schema(datasource.id(), table, schema.clone());
        Ok(schema)
    }

    /// Load the column picker entries for a query's table.
    ///
    /// Queries without both dataset and table stay [`ColumnsState::Idle`].
    /// Datasource failures become [`ColumnsState::Failed`] instead of an error
    /// so the picker can show a "could not load columns" message.
    #[tracing::instrument(skip(self, datasource, query), fields(datasource_id = %datasource.id(), ref_id = %query.ref_id))]
    pub async fn load_columns(
        &self,
        datasource: &dyn SqlDatasource,
        query: &SqlQuery,
        orderable: bool,
    ) -> ColumnsState {
        let Some(table) = query.target() else {
            tracing::debug!("query has no table selected, skipping column load");
            return ColumnsState::Idle;
        };

        let loaded = tokio::try_join!(
            self.fetch_fields(datasource, &table, orderable),
            self.fetch_schema(datasource, &table),
        );

        match loaded {
            Ok((fields, schema)) => {
                let columns = classify_columns(&fields, Some(&schema));
                tracing::debug!(
                    table = %table,
                    fields = fields.len(),
                    classified = columns.len(),
                    "columns loaded"
                );
                ColumnsState::Loaded { columns }
            }
            Err(e) => {
                tracing::warn!(table = %table, error = %e, "failed to load columns");
                ColumnsState::Failed {
                    message: ServiceError::ColumnsLoadFailed(e.to_string()).to_string(),
                }
            }
        }
    }

    /// Columns of a table for raw editor completion.
    ///
    /// `table` may be fully qualified. The schema is only fetched when the
    /// table has columns; columns the schema does not describe are still
    /// returned, without type information.
    #[tracing::instrument(skip(self, datasource), fields(datasource_id = %datasource.id()))]
    pub async fn editor_columns(
        &self,
        datasource: &dyn SqlDatasource,
        table: &str,
    ) -> ServiceResult<Vec<EditorColumn>> {
        let target = TableTarget::parse(table);
        let fields = self
            .fetch_fields(datasource, &target, false)
            .await
            .map_err(|e| ServiceError::ColumnsLoadFailed(e.to_string()))?;

        if fields.is_empty() {
            return Ok(Vec::new());
        }

        let schema = self
            .fetch_schema(datasource, &target)
            .await
            .map_err(|e| ServiceError::SchemaLoadFailed(e.to_string()))?;

        Ok(fields
            .into_iter()
            .map(|name| {
                let info = schema
                    .fields()
                    .and_then(|fields| column_info_from_schema(&name, fields));
                match info {
                    Some(info) => EditorColumn {
                        name,
                        data_type: info.data_type,
                        description: info.description,
                        mode: info.mode,
                    },
                    None => EditorColumn {
                        name,
                        data_type: None,
                        description: None,
                        mode: None,
                    },
                }
            })
            .collect())
    }

    /// Tables for raw editor completion, optionally within a dataset path
    #[tracing::instrument(skip(self, datasource), fields(datasource_id = %datasource.id()))]
    pub async fn editor_tables(
        &self,
        datasource: &dyn SqlDatasource,
        path: Option<&str>,
    ) -> ServiceResult<Vec<ResourceItem>> {
        datasource.lookup(path).await.map_err(|e| {
            tracing::error!("Failed to look up tables: {}", e);
            ServiceError::LookupFailed(e.to_string())
        })
    }

    /// Schema of a table for the raw editor
    #[tracing::instrument(skip(self, datasource), fields(datasource_id = %datasource.id()))]
    pub async fn editor_table_schema(
        &self,
        datasource: &dyn SqlDatasource,
        table: &str,
    ) -> ServiceResult<TableSchema> {
        let target = TableTarget::parse(table);
        self.fetch_schema(datasource, &target)
            .await
            .map_err(|e| ServiceError::SchemaLoadFailed(e.to_string()))
    }

    /// Drop everything cached for a datasource
    pub fn invalidate(&self, datasource_id: &str) {
        self.cache.invalidate(datasource_id);
    }
}

impl Default for ColumnService {
    fn default() -> Self {
        Self::new()
    }
}
