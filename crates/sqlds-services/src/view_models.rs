use serde::{Deserialize, Serialize};
use sqlds_core::FieldMode;
use sqlds_schema::ClassifiedColumn;

/// Outcome of loading a column picker's entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ColumnsState {
    /// No table chosen yet, nothing was loaded
    Idle,
    Loaded { columns: Vec<ClassifiedColumn> },
    /// The datasource could not be queried. The picker stays usable.
    Failed { message: String },
}

impl ColumnsState {
    /// Entries to show; empty unless loaded
    pub fn columns(&self) -> &[ClassifiedColumn] {
        match self {
            Self::Loaded { columns } => columns,
            _ => &[],
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Column offered by raw editor completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorColumn {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<FieldMode>,
}
