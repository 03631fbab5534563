//! Editor query model

use crate::TableTarget;
use serde::{Deserialize, Serialize};

/// A SQL query as edited in the query editor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlQuery {
    pub ref_id: String,
    #[serde(default)]
    pub dataset: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub raw_sql: Option<String>,
}

impl SqlQuery {
    pub fn new(ref_id: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            ..Default::default()
        }
    }

    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = Some(dataset.into());
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_raw_sql(mut self, sql: impl Into<String>) -> Self {
        self.raw_sql = Some(sql.into());
        self
    }

    /// The table this query selects from.
    ///
    /// Only defined once both dataset and table are chosen; empty strings
    /// count as not chosen.
    pub fn target(&self) -> Option<TableTarget> {
        let dataset = self.dataset.as_deref().filter(|d| !d.is_empty())?;
        let table = self.table.as_deref().filter(|t| !t.is_empty())?;
        Some(TableTarget::new(table).with_dataset(dataset))
    }
}
