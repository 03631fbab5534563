//! sqlds core - shared abstractions for SQL datasource tooling
//!
//! This crate defines the types every other sqlds crate depends on:
//!
//! - `SqlDatasource` - trait for column and schema lookups
//! - `TableSchema` / `TableFieldSchema` - schema descriptors
//! - `TableTarget` - (dataset, table) references
//! - `SqlQuery` - the editor query model
//! - `SqldsError` - common error type

mod datasource;
mod error;
mod query;
mod schema;

pub use datasource::*;
pub use error::*;
pub use query::*;
pub use schema::*;
