use log::debug;
use std::sync::Arc;

use super::products_errors::{ProductError, Result};
use super::products_model::{NewProduct, Product, ProductDB, ProductQuery, ProductUpdate};
use super::products_repository::ProductRepository;
use crate::db::DbPool;

/// Service for the product catalog
pub struct ProductService {
    repo: ProductRepository,
}

impl ProductService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            repo: ProductRepository::new(pool),
        }
    }

    /// Creates a product after validating the caller-supplied fields
    pub fn create_product(&self, user_id: i32, new_product: NewProduct) -> Result<Product> {
        new_product.validate()?;

        let product = self
            .repo
            .insert(&ProductDB::from_new(user_id, new_product))?;
        debug!("Created product {} for user {}", product.id, user_id);
        Ok(product.into())
    }

    pub fn get_products(&self, user_id: i32, params: &ProductQuery) -> Result<Vec<Product>> {
        Ok(self
            .repo
            .list(user_id, params)?
            .into_iter()
            .map(Product::from)
            .collect())
    }

    pub fn get_product(&self, user_id: i32, product_id: i32) -> Result<Product> {
        self.repo
            .find(user_id, product_id)?
            .map(Product::from)
            .ok_or(ProductError::NotFound(product_id))
    }

    pub fn update_product(
        &self,
        user_id: i32,
        product_id: i32,
        changes: ProductUpdate,
    ) -> Result<Product> {
        changes.validate()?;
        self.repo
            .update(user_id, product_id, &changes)
            .map(Product::from)
    }

    pub fn delete_product(&self, user_id: i32, product_id: i32) -> Result<()> {
        self.repo.delete(user_id, product_id)
    }

    /// Applies a signed stock delta; a delta of zero is a no-op success
    pub fn adjust_stock(&self, user_id: i32, product_id: i32, delta: i32) -> Result<Product> {
        self.repo
            .adjust_stock(user_id, product_id, delta)
            .map(Product::from)
    }
}
