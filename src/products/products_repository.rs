use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use super::products_errors::{ProductError, Result};
use super::products_model::{ProductDB, ProductQuery, ProductSortBy, ProductUpdate, SortOrder};
use super::products_traits::ProductRepositoryTrait;
use crate::db::get_connection;
use crate::schema::products;

/// Repository for catalog rows, always scoped to an owner
pub struct ProductRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl ProductRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    fn connection(&self) -> Result<crate::db::DbConnection> {
        get_connection(&self.pool).map_err(|e| ProductError::DatabaseError(e.to_string()))
    }

    pub fn insert(&self, product: &ProductDB) -> Result<ProductDB> {
        let mut conn = self.connection()?;

        diesel::insert_into(products::table)
            .values(product)
            .returning(products::all_columns)
            .get_result::<ProductDB>(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    ProductError::DuplicateSku(product.sku.clone().unwrap_or_default())
                }
                other => storage_err(other),
            })
    }

    pub fn list(&self, user_id: i32, params: &ProductQuery) -> Result<Vec<ProductDB>> {
        let mut conn = self.connection()?;

        let mut query = products::table
            .filter(products::user_id.eq(user_id))
            .into_boxed();

        if let Some(ref term) = params.search {
            // SQLite LIKE is case-insensitive for ASCII by default.
            let pattern = format!("%{}%", term);
            query = query.filter(
                products::name
                    .nullable()
                    .like(pattern.clone())
                    .or(products::sku.like(pattern.clone()))
                    .or(products::description.like(pattern.clone()))
                    .or(products::brand.like(pattern)),
            );
        }

        if let Some(ref category) = params.category {
            query = query.filter(products::category.eq(category.clone()));
        }

        query = match (params.sort_by, params.sort_order) {
            (ProductSortBy::Name, SortOrder::Asc) => query.order(products::name.asc()),
            (ProductSortBy::Name, SortOrder::Desc) => query.order(products::name.desc()),
            (ProductSortBy::SellingPrice, SortOrder::Asc) => {
                query.order(products::selling_price.asc())
            }
            (ProductSortBy::SellingPrice, SortOrder::Desc) => {
                query.order(products::selling_price.desc())
            }
            (ProductSortBy::StockQuantity, SortOrder::Asc) => {
                query.order(products::stock_quantity.asc())
            }
            (ProductSortBy::StockQuantity, SortOrder::Desc) => {
                query.order(products::stock_quantity.desc())
            }
            (ProductSortBy::CreatedAt, SortOrder::Asc) => query.order(products::created_at.asc()),
            (ProductSortBy::CreatedAt, SortOrder::Desc) => query.order(products::created_at.desc()),
        };

        query
            .load::<ProductDB>(&mut conn)
            .map_err(storage_err)
    }

    /// Lookup scoped to the owner; a row owned by someone else is absent
    pub fn find(&self, user_id: i32, product_id: i32) -> Result<Option<ProductDB>> {
        let mut conn = self.connection()?;

        products::table
            .filter(products::id.eq(product_id).and(products::user_id.eq(user_id)))
            .first::<ProductDB>(&mut conn)
            .optional()
            .map_err(storage_err)
    }

    pub fn update(
        &self,
        user_id: i32,
        product_id: i32,
        changes: &ProductUpdate,
    ) -> Result<ProductDB> {
        let mut conn = self.connection()?;

        diesel::update(
            products::table.filter(products::id.eq(product_id).and(products::user_id.eq(user_id))),
        )
        .set((changes, products::updated_at.eq(chrono::Utc::now().naive_utc())))
        .returning(products::all_columns)
        .get_result::<ProductDB>(&mut conn)
        .optional()
        .map_err(|e| match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                ProductError::DuplicateSku(
                    changes.sku.clone().flatten().unwrap_or_default(),
                )
            }
            other => storage_err(other),
        })?
        .ok_or(ProductError::NotFound(product_id))
    }

    pub fn delete(&self, user_id: i32, product_id: i32) -> Result<()> {
        let mut conn = self.connection()?;

        let deleted = diesel::delete(
            products::table.filter(products::id.eq(product_id).and(products::user_id.eq(user_id))),
        )
        .execute(&mut conn)
        .map_err(storage_err)?;

        if deleted == 0 {
            return Err(ProductError::NotFound(product_id));
        }
        Ok(())
    }

    /// Applies a signed stock delta. The non-negativity guard lives in the
    /// WHERE clause, so a concurrent writer can never drive stock below zero.
    pub fn adjust_stock(&self, user_id: i32, product_id: i32, delta: i32) -> Result<ProductDB> {
        if delta == 0 {
            return self
                .find(user_id, product_id)?
                .ok_or(ProductError::NotFound(product_id));
        }

        let mut conn = self.connection()?;

        let updated = diesel::update(
            products::table.filter(
                products::id
                    .eq(product_id)
                    .and(products::user_id.eq(user_id))
                    .and(products::stock_quantity.ge(-delta)),
            ),
        )
        .set((
            products::stock_quantity.eq(products::stock_quantity + delta),
            products::updated_at.eq(chrono::Utc::now().naive_utc()),
        ))
        .returning(products::all_columns)
        .get_result::<ProductDB>(&mut conn)
        .optional()
        .map_err(storage_err)?;

        match updated {
            Some(product) => Ok(product),
            None => match self.find(user_id, product_id)? {
                Some(product) => Err(ProductError::InsufficientStock {
                    available: product.stock_quantity,
                    requested: -delta,
                }),
                None => Err(ProductError::NotFound(product_id)),
            },
        }
    }
}

impl ProductRepositoryTrait for ProductRepository {
    fn insert(&self, product: &ProductDB) -> Result<ProductDB> {
        ProductRepository::insert(self, product)
    }

    fn list(&self, user_id: i32, params: &ProductQuery) -> Result<Vec<ProductDB>> {
        ProductRepository::list(self, user_id, params)
    }

    fn find(&self, user_id: i32, product_id: i32) -> Result<Option<ProductDB>> {
        ProductRepository::find(self, user_id, product_id)
    }

    fn update(&self, user_id: i32, product_id: i32, changes: &ProductUpdate) -> Result<ProductDB> {
        ProductRepository::update(self, user_id, product_id, changes)
    }

    fn delete(&self, user_id: i32, product_id: i32) -> Result<()> {
        ProductRepository::delete(self, user_id, product_id)
    }

    fn adjust_stock(&self, user_id: i32, product_id: i32, delta: i32) -> Result<ProductDB> {
        ProductRepository::adjust_stock(self, user_id, product_id, delta)
    }
}

fn storage_err(e: DieselError) -> ProductError {
    ProductError::DatabaseError(e.to_string())
}
