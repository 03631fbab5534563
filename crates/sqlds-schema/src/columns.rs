//! Column classification for column pickers
//!
//! Columns are grouped by their declared type so that pickers show, for
//! example, all timestamps together. Each entry carries an icon hint taken
//! from a fixed table of type tokens.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sqlds_core::TableSchema;
use std::fmt;

use crate::fields::column_type;

/// Icon hint for a column, named after the icon assets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnIcon {
    ClockNine,
    ToggleOff,
    CalculatorAlt,
    Text,
    Map,
}

impl ColumnIcon {
    /// Icon asset name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClockNine => "clock-nine",
            Self::ToggleOff => "toggle-off",
            Self::CalculatorAlt => "calculator-alt",
            Self::Text => "text",
            Self::Map => "map",
        }
    }
}

impl fmt::Display for ColumnIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a declared column type to its icon.
///
/// Matching is exact and case-sensitive: `INTEGER` has an icon, `integer`
/// does not.
pub fn map_column_type_to_icon(data_type: &str) -> Option<ColumnIcon> {
    match data_type {
        "TIME" | "DATETIME" | "TIMESTAMP" => Some(ColumnIcon::ClockNine),
        "BOOLEAN" => Some(ColumnIcon::ToggleOff),
        "INTEGER" | "FLOAT" | "FLOAT64" | "INT" | "SMALLINT" | "BIGINT" | "TINYINT"
        | "BYTEINT" | "INT64" | "NUMERIC" | "DECIMAL" => Some(ColumnIcon::CalculatorAlt),
        "STRING" | "BYTES" => Some(ColumnIcon::Text),
        "GEOGRAPHY" => Some(ColumnIcon::Map),
        _ => None,
    }
}

/// A selectable column entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedColumn {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<ColumnIcon>,
}

impl ClassifiedColumn {
    fn new(name: &str, data_type: &str) -> Self {
        Self {
            value: name.to_string(),
            label: name.to_string(),
            icon: map_column_type_to_icon(data_type),
        }
    }
}

/// Group columns by type using a caller supplied type lookup.
///
/// Groups appear in the order their type is first seen, columns keep their
/// input order within a group. Columns the lookup cannot type, or types as
/// an empty string, are left out.
pub fn classify_columns_by<'t, S, F>(columns: &[S], mut type_of: F) -> Vec<ClassifiedColumn>
where
    S: AsRef<str>,
    F: FnMut(&str) -> Option<&'t str>,
{
    let mut groups: IndexMap<&'t str, Vec<ClassifiedColumn>> = IndexMap::new();

    for column in columns {
        let name = column.as_ref();
        match type_of(name).filter(|t| !t.is_empty()) {
            Some(data_type) => groups
                .entry(data_type)
                .or_default()
                .push(ClassifiedColumn::new(name, data_type)),
            None => tracing::trace!(column = %name, "skipping column without type information"),
        }
    }

    groups.into_values().flatten().collect()
}

/// Group a table's columns by their declared type in `schema`.
///
/// Without a schema no column can be typed and the result is empty.
pub fn classify_columns<S: AsRef<str>>(
    columns: &[S],
    schema: Option<&TableSchema>,
) -> Vec<ClassifiedColumn> {
    match schema {
        Some(schema) => classify_columns_by(columns, |name| column_type(name, schema)),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sqlds_core::TableFieldSchema;

    fn schema(fields: &[(&str, &str)]) -> TableSchema {
        TableSchema::new(
            "t",
            fields
                .iter()
                .map(|(name, ty)| TableFieldSchema::new(*name, *ty))
                .collect(),
        )
    }

    fn names(columns: &[ClassifiedColumn]) -> Vec<&str> {
        columns.iter().map(|c| c.value.as_str()).collect()
    }

    #[test]
    fn test_icon_table() {
        for ty in ["TIME", "DATETIME", "TIMESTAMP"] {
            assert_eq!(map_column_type_to_icon(ty), Some(ColumnIcon::ClockNine));
        }
        assert_eq!(map_column_type_to_icon("BOOLEAN"), Some(ColumnIcon::ToggleOff));
        for ty in [
            "INTEGER", "FLOAT", "FLOAT64", "INT", "SMALLINT", "BIGINT", "TINYINT", "BYTEINT",
            "INT64", "NUMERIC", "DECIMAL",
        ] {
            assert_eq!(map_column_type_to_icon(ty), Some(ColumnIcon::CalculatorAlt), "{ty}");
        }
        assert_eq!(map_column_type_to_icon("STRING"), Some(ColumnIcon::Text));
        assert_eq!(map_column_type_to_icon("BYTES"), Some(ColumnIcon::Text));
        assert_eq!(map_column_type_to_icon("GEOGRAPHY"), Some(ColumnIcon::Map));
    }

    #[test]
    fn test_icon_lookup_is_exact() {
        assert_eq!(map_column_type_to_icon("TIMESTAMP").unwrap().as_str(), "clock-nine");
        assert_eq!(map_column_type_to_icon("UNKNOWN_TYPE"), None);
        assert_eq!(map_column_type_to_icon("integer"), None);
        assert_ne!(
            map_column_type_to_icon("integer"),
            map_column_type_to_icon("INTEGER")
        );
        assert_eq!(map_column_type_to_icon(" INTEGER"), None);
        assert_eq!(map_column_type_to_icon(""), None);
    }

    #[test]
    fn test_no_schema_yields_nothing() {
        let columns = ["id", "name"];
        assert!(classify_columns(&columns, None).is_empty());
    }

    #[test]
    fn test_schema_without_descriptor_yields_nothing() {
        let empty = TableSchema::empty("t");
        assert!(classify_columns(&["id", "name"], Some(&empty)).is_empty());
    }

    #[test]
    fn test_groups_follow_first_seen_type() {
        let schema = schema(&[("a", "STRING"), ("b", "INTEGER"), ("c", "STRING")]);
        let result = classify_columns(&["a", "b", "c"], Some(&schema));
        assert_eq!(names(&result), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_example_table() {
        let schema = schema(&[
            ("id", "INT64"),
            ("name", "STRING"),
            ("created_at", "TIMESTAMP"),
        ]);
        let result = classify_columns(&["id", "name", "created_at"], Some(&schema));
        let expected = vec![
            ClassifiedColumn {
                value: "id".into(),
                label: "id".into(),
                icon: Some(ColumnIcon::CalculatorAlt),
            },
            ClassifiedColumn {
                value: "name".into(),
                label: "name".into(),
                icon: Some(ColumnIcon::Text),
            },
            ClassifiedColumn {
                value: "created_at".into(),
                label: "created_at".into(),
                icon: Some(ColumnIcon::ClockNine),
            },
        ];
        assert_eq!(result, expected);
    }

    #[test]
    fn test_untyped_and_unknown_columns_are_dropped() {
        let mut schema = schema(&[("id", "INT64")]);
        if let Some(fields) = schema.schema.as_mut() {
            fields.push(TableFieldSchema::untyped("payload"));
        }
        let result = classify_columns(&["id", "payload", "ghost"], Some(&schema));
        assert_eq!(names(&result), vec!["id"]);
    }

    #[test]
    fn test_empty_type_is_dropped() {
        let schema = schema(&[("a", ""), ("b", "INT64")]);
        let result = classify_columns(&["a", "b"], Some(&schema));
        assert_eq!(names(&result), vec!["b"]);

        let by_lookup = classify_columns_by(&["a", "b"], |name| match name {
            "a" => Some(""),
            _ => Some("STRING"),
        });
        assert_eq!(names(&by_lookup), vec!["b"]);
    }

    #[test]
    fn test_unrecognized_type_keeps_column_without_icon() {
        let schema = schema(&[("tags", "ARRAY<STRING>"), ("id", "INT64")]);
        let result = classify_columns(&["tags", "id"], Some(&schema));
        assert_eq!(names(&result), vec!["tags", "id"]);
        assert_eq!(result[0].icon, None);
    }

    #[test]
    fn test_groups_key_on_exact_type_string() {
        let schema = schema(&[("a", "INT64"), ("b", "INTEGER"), ("c", "INT64")]);
        let result = classify_columns(&["a", "b", "c"], Some(&schema));
        assert_eq!(names(&result), vec!["a", "c", "b"]);
        assert!(result.iter().all(|c| c.icon == Some(ColumnIcon::CalculatorAlt)));
    }

    #[test]
    fn test_duplicate_columns_are_kept() {
        let schema = schema(&[("id", "INT64"), ("name", "STRING")]);
        let result = classify_columns(&["id", "name", "id"], Some(&schema));
        assert_eq!(names(&result), vec!["id", "id", "name"]);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let schema = schema(&[("x", "BOOLEAN"), ("y", "GEOGRAPHY"), ("z", "BOOLEAN")]);
        let columns = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        let first = classify_columns(&columns, Some(&schema));
        let second = classify_columns(&columns, Some(&schema));
        assert_eq!(first, second);
    }

    #[test]
    fn test_classify_by_custom_lookup() {
        let result = classify_columns_by(&["a", "b"], |name| (name == "b").then_some("BOOLEAN"));
        assert_eq!(names(&result), vec!["b"]);
        assert_eq!(result[0].icon, Some(ColumnIcon::ToggleOff));
    }

    #[test]
    fn test_serialized_entry_shape() {
        let entry = ClassifiedColumn {
            value: "created_at".into(),
            label: "created_at".into(),
            icon: Some(ColumnIcon::ClockNine),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["icon"], "clock-nine");

        let plain = ClassifiedColumn {
            icon: None,
            ..entry
        };
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("icon").is_none());
    }
}
