//! sqlds services layer
//!
//! Sits between user-facing surfaces (the CLI, editor integrations) and the
//! datasource and schema crates.
//!
//! ```text
//! Surfaces (sqlds-cli)
//!     ↓
//! Service Layer (sqlds-services) ← This crate
//!     ↓
//! Domain Layer (sqlds-schema)
//!     ↓
//! Infrastructure Layer (sqlds-core, sqlds-drivers)
//! ```
//!
//! # Services
//!
//! - [`ColumnService`] - column pickers and raw editor completion, with caching
//!
//! Services never return datasource errors for column pickers; failures are
//! folded into [`ColumnsState::Failed`].

mod column_service;
mod error;
pub mod settings;
mod view_models;

pub use column_service::ColumnService;
pub use error::{ServiceError, ServiceResult};
pub use settings::ServiceSettings;
pub use view_models::{ColumnsState, EditorColumn};
