// Module declarations
pub(crate) mod sales_errors;
pub(crate) mod sales_model;
pub(crate) mod sales_repository;
pub(crate) mod sales_service;
pub(crate) mod sales_traits;

// Re-export the public interface
pub use sales_model::{NewSale, Sale, SaleItem, SaleLineItem, SaleWithItems};
pub use sales_repository::SaleRepository;
pub use sales_service::SaleService;
pub use sales_traits::SaleRepositoryTrait;

// Re-export error types for convenience
pub use sales_errors::{Result, SaleError};
