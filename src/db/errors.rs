use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Referenced entity not found: {0}")]
    ReferenceNotFound(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Invalid order status: {0}")]
    InvalidStatus(String),
    #[error("Password hashing error: {0}")]
    HashingError(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(#[from] diesel::r2d2::PoolError),
}
