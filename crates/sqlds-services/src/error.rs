use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level errors with user-friendly messages
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Could not load columns: {0}")]
    ColumnsLoadFailed(String),

    #[error("Schema loading failed: {0}")]
    SchemaLoadFailed(String),

    #[error("Table lookup failed: {0}")]
    LookupFailed(String),
}
