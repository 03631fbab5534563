//! Column lookups in table schema descriptors

use serde::{Deserialize, Serialize};
use sqlds_core::{FieldMode, TableFieldSchema, TableSchema};

/// Type information for one column, as found in a schema descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTypeInfo {
    pub data_type: Option<String>,
    pub description: Option<String>,
    pub mode: Option<FieldMode>,
}

/// Walk a dotted column path through nested fields.
///
/// `address.city` matches field `address` at the top level, then `city`
/// among its children.
fn find_field<'a>(column: &str, fields: &'a [TableFieldSchema]) -> Option<&'a TableFieldSchema> {
    let mut segments = column.split('.');
    let first = segments.next()?;
    let mut current = fields.iter().find(|f| f.name == first)?;
    for segment in segments {
        current = current.schema.iter().find(|f| f.name == segment)?;
    }
    Some(current)
}

/// Look up the schema entry for a column.
///
/// Returns `None` when any segment of the column path has no matching field.
pub fn column_info_from_schema(column: &str, fields: &[TableFieldSchema]) -> Option<ColumnTypeInfo> {
    find_field(column, fields).map(|field| ColumnTypeInfo {
        data_type: field.data_type.clone(),
        description: field.description.clone(),
        mode: field.mode,
    })
}

/// Declared type of a column, if the schema knows it.
///
/// An empty type string counts as no type.
pub fn column_type<'a>(column: &str, schema: &'a TableSchema) -> Option<&'a str> {
    let fields = schema.fields()?;
    find_field(column, fields)?
        .data_type
        .as_deref()
        .filter(|t| !t.is_empty())
}
