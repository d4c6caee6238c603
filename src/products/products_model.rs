use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::products_errors::{ProductError, Result};

pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;

/// Domain model representing a catalog product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub purchase_price: f64,
    pub selling_price: f64,
    pub stock_quantity: i32,
    pub low_stock_threshold: i32,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    #[serde(default)]
    pub purchase_price: f64,
    pub selling_price: f64,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i32,
    pub image_url: Option<String>,
    pub notes: Option<String>,
}

fn default_low_stock_threshold() -> i32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl NewProduct {
    /// Validates caller-supplied data before any storage call
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ProductError::InvalidData(
                "Product name and selling price are required.".to_string(),
            ));
        }
        if !self.selling_price.is_finite() || self.selling_price < 0.0 {
            return Err(ProductError::InvalidData(
                "Selling price must be a non-negative number.".to_string(),
            ));
        }
        if !self.purchase_price.is_finite() || self.purchase_price < 0.0 {
            return Err(ProductError::InvalidData(
                "Purchase price must be a non-negative number.".to_string(),
            ));
        }
        if self.stock_quantity < 0 {
            return Err(ProductError::InvalidData(
                "Stock quantity cannot be negative.".to_string(),
            ));
        }
        if self.low_stock_threshold < 0 {
            return Err(ProductError::InvalidData(
                "Low stock threshold cannot be negative.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update for a product. Unset fields are left untouched; the
/// nullable columns take `Some(None)` to clear a stored value. Only the
/// columns present here can ever be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, AsChangeset)]
#[serde(rename_all = "camelCase")]
#[diesel(table_name = crate::schema::products)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub sku: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub brand: Option<Option<String>>,
    pub purchase_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub stock_quantity: Option<i32>,
    pub low_stock_threshold: Option<i32>,
    pub image_url: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sku.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.brand.is_none()
            && self.purchase_price.is_none()
            && self.selling_price.is_none()
            && self.stock_quantity.is_none()
            && self.low_stock_threshold.is_none()
            && self.image_url.is_none()
            && self.notes.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ProductError::InvalidData(
                "No valid fields to update.".to_string(),
            ));
        }
        if let Some(ref name) = self.name {
            if name.trim().is_empty() {
                return Err(ProductError::InvalidData(
                    "Product name cannot be empty.".to_string(),
                ));
            }
        }
        for price in [self.purchase_price, self.selling_price].into_iter().flatten() {
            if !price.is_finite() || price < 0.0 {
                return Err(ProductError::InvalidData(
                    "Invalid numeric value for price or quantity.".to_string(),
                ));
            }
        }
        for qty in [self.stock_quantity, self.low_stock_threshold]
            .into_iter()
            .flatten()
        {
            if qty < 0 {
                return Err(ProductError::InvalidData(
                    "Invalid numeric value for price or quantity.".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Sortable columns for catalog listings. Anything unrecognized falls back
/// to sorting by name, so a caller-supplied sort key can never reach the
/// query builder as raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortBy {
    #[default]
    Name,
    SellingPrice,
    StockQuantity,
    CreatedAt,
}

impl From<&str> for ProductSortBy {
    fn from(key: &str) -> Self {
        match key {
            "name" | "product_name" => ProductSortBy::Name,
            "price" | "selling_price" => ProductSortBy::SellingPrice,
            "stock" | "stock_quantity" => ProductSortBy::StockQuantity,
            "created_at" => ProductSortBy::CreatedAt,
            _ => ProductSortBy::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl From<&str> for SortOrder {
    fn from(key: &str) -> Self {
        if key.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Listing parameters for the catalog
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Case-insensitive substring match across name, SKU, description and brand
    pub search: Option<String>,
    /// Exact category filter
    pub category: Option<String>,
    pub sort_by: ProductSortBy,
    pub sort_order: SortOrder,
}

/// Database model for products
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductDB {
    #[diesel(skip_insertion)]
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub purchase_price: f64,
    pub selling_price: f64,
    pub stock_quantity: i32,
    pub low_stock_threshold: i32,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ProductDB> for Product {
    fn from(db: ProductDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            sku: db.sku,
            description: db.description,
            category: db.category,
            brand: db.brand,
            purchase_price: db.purchase_price,
            selling_price: db.selling_price,
            stock_quantity: db.stock_quantity,
            low_stock_threshold: db.low_stock_threshold,
            image_url: db.image_url,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl ProductDB {
    pub fn from_new(user_id: i32, new_product: NewProduct) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: 0,
            user_id,
            name: new_product.name.trim().to_string(),
            sku: new_product.sku,
            description: new_product.description,
            category: new_product.category,
            brand: new_product.brand,
            purchase_price: new_product.purchase_price,
            selling_price: new_product.selling_price,
            stock_quantity: new_product.stock_quantity,
            low_stock_threshold: new_product.low_stock_threshold,
            image_url: new_product.image_url,
            notes: new_product.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sort_key_falls_back_to_name() {
        assert_eq!(ProductSortBy::from("price"), ProductSortBy::SellingPrice);
        assert_eq!(ProductSortBy::from("'; DROP TABLE"), ProductSortBy::Name);
        assert_eq!(ProductSortBy::from(""), ProductSortBy::Name);
    }

    #[test]
    fn sort_order_defaults_to_ascending() {
        assert_eq!(SortOrder::from("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::from("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::from("sideways"), SortOrder::Asc);
    }

    #[test]
    fn new_product_requires_name_and_valid_price() {
        let mut p = NewProduct {
            name: "Widget".to_string(),
            sku: None,
            description: None,
            category: None,
            brand: None,
            purchase_price: 0.0,
            selling_price: 10.0,
            stock_quantity: 0,
            low_stock_threshold: 5,
            image_url: None,
            notes: None,
        };
        assert!(p.validate().is_ok());

        p.name = "  ".to_string();
        assert!(p.validate().is_err());

        p.name = "Widget".to_string();
        p.selling_price = -1.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn empty_update_is_rejected() {
        assert!(ProductUpdate::default().validate().is_err());
    }
}
