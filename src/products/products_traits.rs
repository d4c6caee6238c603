use super::products_errors::Result;
use super::products_model::{ProductDB, ProductQuery, ProductUpdate};

/// Trait for catalog repository operations
pub trait ProductRepositoryTrait: Send + Sync {
    fn insert(&self, product: &ProductDB) -> Result<ProductDB>;
    fn list(&self, user_id: i32, params: &ProductQuery) -> Result<Vec<ProductDB>>;
    fn find(&self, user_id: i32, product_id: i32) -> Result<Option<ProductDB>>;
    fn update(&self, user_id: i32, product_id: i32, changes: &ProductUpdate) -> Result<ProductDB>;
    fn delete(&self, user_id: i32, product_id: i32) -> Result<()>;
    fn adjust_stock(&self, user_id: i32, product_id: i32, delta: i32) -> Result<ProductDB>;
}
