//! sqlds schema - column metadata helpers
//!
//! This crate provides:
//! - Column classification by declared type, with icon hints
//! - Nested column lookups in table schema descriptors
//! - A TTL cache for fetched column lists and table schemas

mod cache;
mod columns;
mod fields;

pub use cache::{ColumnCache, DEFAULT_CACHE_TTL};
pub use columns::{
    ClassifiedColumn, ColumnIcon, classify_columns, classify_columns_by, map_column_type_to_icon,
};
pub use fields::{ColumnTypeInfo, column_info_from_schema, column_type};
