//! Datasource backed by a static JSON description

use async_trait::async_trait;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use sqlds_core::{
    ResourceItem, Result, SqlDatasource, SqldsError, TableFieldSchema, TableSchema, TableTarget,
};
use std::path::Path;

fn default_id() -> String {
    "fixture".to_string()
}

/// A table in a fixture document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureTable {
    #[serde(default)]
    pub dataset: Option<String>,
    pub name: String,
    /// Column names. When empty, the top-level schema field names are used.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Columns usable in `ORDER BY`. Defaults to all columns.
    #[serde(default)]
    pub orderable: Option<Vec<String>>,
    /// Schema descriptor. `null` or missing models a table that cannot be described.
    #[serde(default)]
    pub schema: Option<Vec<TableFieldSchema>>,
}

impl FixtureTable {
    fn matches(&self, target: &TableTarget) -> bool {
        self.name == target.table
            && match &target.dataset {
                Some(dataset) => self.dataset.as_deref() == Some(dataset.as_str()),
                None => true,
            }
    }

    fn column_names(&self) -> Vec<String> {
        if !self.columns.is_empty() {
            return self.columns.clone();
        }
        self.schema
            .iter()
            .flatten()
            .map(|f| f.name.clone())
            .collect()
    }
}

/// Top-level fixture document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureDocument {
    #[serde(default = "default_id")]
    pub id: String,
    #[serde(default)]
    pub tables: Vec<FixtureTable>,
}

/// In-memory datasource serving the tables of a [`FixtureDocument`]
#[derive(Debug, Clone)]
pub struct FixtureDatasource {
    document: FixtureDocument,
}

impl FixtureDatasource {
    pub fn new(document: FixtureDocument) -> Self {
        Self { document }
    }

    /// Parse a fixture from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let document: FixtureDocument = serde_json::from_str(json)?;
        tracing::debug!(id = %document.id, tables = document.tables.len(), "loaded fixture datasource");
        Ok(Self::new(document))
    }

    /// Load a fixture from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "loading fixture datasource");
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn table(&self, target: &TableTarget) -> Result<&FixtureTable> {
        self.document
            .tables
            .iter()
            .find(|t| t.matches(target))
            .ok_or_else(|| SqldsError::NotFound(format!("Table '{}' not found", target)))
    }
}

#[async_trait]
impl SqlDatasource for FixtureDatasource {
    fn id(&self) -> &str {
        &self.document.id
    }

    async fn fields(&self, table: &TableTarget, orderable: bool) -> Result<Vec<String>> {
        let table = self.table(table)?;
        let columns = table.column_names();
        match (&table.orderable, orderable) {
            (Some(allowed), true) => Ok(columns
                .into_iter()
                .filter(|c| allowed.contains(c))
                .collect()),
            _ => Ok(columns),
        }
    }

    async fn table_schema(&self, table: &TableTarget) -> Result<TableSchema> {
        let table = self.table(table)?;
        Ok(TableSchema {
            name: Some(table.name.clone()),
            schema: table.schema.clone(),
        })
    }

    async fn lookup(&self, path: Option<&str>) -> Result<Vec<ResourceItem>> {
        let path = path.filter(|p| !p.is_empty());
        Ok(self
            .document
            .tables
            .iter()
            .filter(|t| path.is_none() || t.dataset.as_deref() == path)
            .map(|t| {
                let item = ResourceItem::new(t.name.clone());
                match &t.dataset {
                    Some(dataset) => item.with_completion(format!("{}.{}", dataset, t.name)),
                    None => item,
                }
            })
            .collect())
    }

    async fn datasets(&self) -> Result<Vec<String>> {
        let datasets: IndexSet<&str> = self
            .document
            .tables
            .iter()
            .filter_map(|t| t.dataset.as_deref())
            .collect();
        Ok(datasets.into_iter().map(str::to_string).collect())
    }
}
