use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for the transaction recorder
#[derive(Debug, Error)]
pub enum SaleError {
    #[error("A sale must contain at least one line item.")]
    EmptySale,
    #[error("Product {0} not found.")]
    ProductNotFound(i32),
    #[error(
        "Insufficient stock for product {product_id}: {available} available, {requested} requested."
    )]
    InsufficientStock {
        product_id: i32,
        available: i32,
        requested: i32,
    },
    #[error("Sale {0} not found.")]
    NotFound(i32),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DieselError> for SaleError {
    fn from(err: DieselError) -> Self {
        SaleError::DatabaseError(err.to_string())
    }
}

// Lets record_sale run through the pool's transaction executor
impl From<crate::errors::Error> for SaleError {
    fn from(err: crate::errors::Error) -> Self {
        SaleError::DatabaseError(err.to_string())
    }
}

/// Result type for sale operations
pub type Result<T> = std::result::Result<T, SaleError>;
