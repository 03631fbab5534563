//! SQLite datasource

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{Connection as RusqliteConnection, OpenFlags};
use sqlds_core::{
    FieldMode, ResourceItem, Result, SqlDatasource, SqldsError, TableFieldSchema, TableSchema,
    TableTarget,
};
use std::sync::Arc;

const DEFAULT_SCHEMA: &str = "main";

/// One row of `PRAGMA table_info`
struct ColumnRow {
    name: String,
    declared_type: Option<String>,
    not_null: bool,
}

/// Quote an identifier for use in a statement
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn query_error(e: rusqlite::Error) -> SqldsError {
    SqldsError::Query(e.to_string())
}

/// SQLite database exposed as a datasource
///
/// Datasets map to SQLite schema names (`main`, `temp`, attached databases).
pub struct SqliteDatasource {
    id: String,
    conn: Arc<Mutex<RusqliteConnection>>,
}

impl SqliteDatasource {
    /// Open a SQLite database file. The file must already exist.
    pub fn open(path: &str) -> Result<Self> {
        tracing::info!(path = %path, "opening SQLite database");
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = RusqliteConnection::open_with_flags(path, flags).map_err(|e| {
            SqldsError::Connection(format!("Failed to open SQLite database at '{}': {}", path, e))
        })?;
        Ok(Self::from_connection(format!("sqlite:{}", path), conn))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = RusqliteConnection::open_in_memory().map_err(|e| {
            SqldsError::Connection(format!("Failed to open in-memory database: {}", e))
        })?;
        Ok(Self::from_connection("sqlite::memory:", conn))
    }

    fn from_connection(id: impl Into<String>, conn: RusqliteConnection) -> Self {
        Self {
            id: id.into(),
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run one or more statements, e.g. to create tables
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.lock().execute_batch(sql).map_err(query_error)
    }

    fn table_columns(&self, table: &TableTarget) -> Result<Vec<ColumnRow>> {
        let schema = table.dataset.as_deref().unwrap_or(DEFAULT_SCHEMA);
        let sql = format!(
            "PRAGMA {}.table_info({})",
            quote_ident(schema),
            quote_ident(&table.table)
        );
        tracing::trace!(table = %table, "fetching column information");

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql).map_err(query_error)?;
        let rows = stmt
            .query_map([], |row| {
                let declared: String = row.get(2)?;
                let not_null: i64 = row.get(3)?;
                Ok(ColumnRow {
                    name: row.get(1)?,
                    declared_type: (!declared.trim().is_empty())
                        .then(|| declared.trim().to_uppercase()),
                    not_null: not_null != 0,
                })
            })
            .map_err(query_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(query_error)
    }

    fn table_names(&self, schema: &str) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT name FROM {}.sqlite_master \
             WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite_%' ORDER BY name",
            quote_ident(schema)
        );
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql).map_err(query_error)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(query_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(query_error)
    }

    fn schema_names(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("PRAGMA database_list").map_err(query_error)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .map_err(query_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(query_error)
    }
}

#[async_trait]
impl SqlDatasource for SqliteDatasource {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fields(&self, table: &TableTarget, orderable: bool) -> Result<Vec<String>> {
        let columns = self.table_columns(table)?;
        Ok(columns
            .into_iter()
            .filter(|c| !orderable || c.declared_type.as_deref() != Some("BLOB"))
            .map(|c| c.name)
            .collect())
    }

    async fn table_schema(&self, table: &TableTarget) -> Result<TableSchema> {
        let columns = self.table_columns(table)?;
        if columns.is_empty() {
            tracing::debug!(table = %table, "table not found, returning schema without fields");
            return Ok(TableSchema::empty(table.table.clone()));
        }

        let fields = columns
            .into_iter()
            .map(|c| {
                let field = match c.declared_type {
                    Some(data_type) => TableFieldSchema::new(c.name, data_type),
                    None => TableFieldSchema::untyped(c.name),
                };
                field.with_mode(if c.not_null {
                    FieldMode::Required
                } else {
                    FieldMode::Nullable
                })
            })
            .collect();
        Ok(TableSchema::new(table.table.clone(), fields))
    }

    async fn lookup(&self, path: Option<&str>) -> Result<Vec<ResourceItem>> {
        let schema = path.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_SCHEMA);
        tracing::debug!(schema = %schema, "listing tables from sqlite_master");
        let tables = self.table_names(schema)?;
        Ok(tables
            .into_iter()
            .map(|name| {
                let completion = format!("{}.{}", schema, name);
                ResourceItem::new(name).with_completion(completion)
            })
            .collect())
    }

    async fn datasets(&self) -> Result<Vec<String>> {
        self.schema_names()
    }
}
