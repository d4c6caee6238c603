use thiserror::Error;

/// Custom error type for catalog operations
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("SKU '{0}' already exists for this owner.")]
    DuplicateSku(String),
    #[error("Product {0} not found.")]
    NotFound(i32),
    #[error("Insufficient stock: {available} available, {requested} requested.")]
    InsufficientStock { available: i32, requested: i32 },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, ProductError>;
