//! Table schema types reported by datasources

use serde::{Deserialize, Serialize};
use std::fmt;

/// A table reference, optionally qualified by its dataset
///
/// Qualified names use `.` as the separator. Everything before the last
/// separator is the dataset, so `project.dataset.table` keeps
/// `project.dataset` as the dataset part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableTarget {
    pub dataset: Option<String>,
    pub table: String,
}

impl TableTarget {
    /// Create a target for an unqualified table
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            dataset: None,
            table: table.into(),
        }
    }

    /// Set the dataset the table belongs to
    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = Some(dataset.into());
        self
    }

    /// Parse a possibly qualified table name
    pub fn parse(qualified: &str) -> Self {
        let qualified = qualified.trim();
        match qualified.rsplit_once('.') {
            Some((dataset, table)) if !dataset.is_empty() && !table.is_empty() => {
                Self::new(table).with_dataset(dataset)
            }
            _ => Self::new(qualified),
        }
    }

    /// Qualified name, used as a cache key and for display
    pub fn qualified_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TableTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.dataset {
            Some(dataset) => write!(f, "{}.{}", dataset, self.table),
            None => write!(f, "{}", self.table),
        }
    }
}

/// Field mode as reported by the datasource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldMode {
    Nullable,
    Required,
    Repeated,
}

/// A single field in a table schema
///
/// Record fields carry their children in `schema`; a column path such as
/// `address.city` walks into them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFieldSchema {
    pub name: String,
    #[serde(rename = "type", default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub mode: Option<FieldMode>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schema: Vec<TableFieldSchema>,
}

impl TableFieldSchema {
    /// Create a field with a declared type
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: Some(data_type.into()),
            mode: None,
            description: None,
            schema: Vec::new(),
        }
    }

    /// Create a field whose type is not known
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            mode: None,
            description: None,
            schema: Vec::new(),
        }
    }

    pub fn with_mode(mut self, mode: FieldMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach nested fields (for record types)
    pub fn with_fields(mut self, fields: Vec<TableFieldSchema>) -> Self {
        self.schema = fields;
        self
    }
}

/// Schema descriptor for one table
///
/// `schema` is `None` when the datasource knows the table but could not
/// describe it. Consumers treat that as "no column has a known type".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub schema: Option<Vec<TableFieldSchema>>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, fields: Vec<TableFieldSchema>) -> Self {
        Self {
            name: Some(name.into()),
            schema: Some(fields),
        }
    }

    /// A schema response that carries no field descriptions
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            schema: None,
        }
    }

    /// Top-level fields, if the descriptor is present
    pub fn fields(&self) -> Option<&[TableFieldSchema]> {
        self.schema.as_deref()
    }
}

/// Item returned when browsing datasets and tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceItem {
    pub name: String,
    /// Text inserted by editor completion, when different from `name`
    #[serde(default)]
    pub completion: Option<String>,
}

impl ResourceItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            completion: None,
        }
    }

    pub fn with_completion(mut self, completion: impl Into<String>) -> Self {
        self.completion = Some(completion.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unqualified_table() {
        let target = TableTarget::parse("users");
        assert_eq!(target.dataset, None);
        assert_eq!(target.table, "users");
    }

    #[test]
    fn test_parse_fully_qualified_table() {
        let target = TableTarget::parse("my-project.analytics.events");
        assert_eq!(target.dataset.as_deref(), Some("my-project.analytics"));
        assert_eq!(target.table, "events");
        assert_eq!(target.qualified_name(), "my-project.analytics.events");
    }

    #[test]
    fn test_parse_ignores_dangling_separator() {
        assert_eq!(TableTarget::parse("users.").table, "users.");
        assert_eq!(TableTarget::parse(".users").dataset, None);
    }

    #[test]
    fn test_field_schema_deserializes_type_key() {
        let field: TableFieldSchema = serde_json::from_str(
            r#"{"name":"created_at","type":"TIMESTAMP","mode":"REQUIRED"}"#,
        )
        .unwrap();
        assert_eq!(field.data_type.as_deref(), Some("TIMESTAMP"));
        assert_eq!(field.mode, Some(FieldMode::Required));
        assert!(field.schema.is_empty());
    }

    #[test]
    fn test_table_schema_without_descriptor() {
        let schema: TableSchema = serde_json::from_str(r#"{"name":"users"}"#).unwrap();
        assert!(schema.fields().is_none());
    }
}
