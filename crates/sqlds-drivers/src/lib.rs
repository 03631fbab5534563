//! sqlds drivers - datasource implementations
//!
//! - [`FixtureDatasource`] serves tables described in a JSON document
//! - [`SqliteDatasource`] introspects a SQLite database (feature `sqlite`)

mod fixture;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use fixture::{FixtureDatasource, FixtureDocument, FixtureTable};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatasource;
