use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::sales_errors::{Result, SaleError};

/// Domain model for a sale header. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i32,
    pub user_id: i32,
    pub sale_date: NaiveDateTime,
    pub total_amount: f64,
    pub notes: Option<String>,
}

/// Domain model for one line of a recorded sale. `price_at_sale` is a
/// snapshot; later catalog price changes do not affect it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: i32,
    pub sale_id: i32,
    pub product_id: i32,
    pub quantity_sold: i32,
    pub price_at_sale: f64,
}

/// A sale header together with its line items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleWithItems {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

/// One product+quantity+price entry within a sale being recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineItem {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
}

/// Input model for recording a sale. The total is taken as supplied by the
/// caller and is not recomputed from the line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub items: Vec<SaleLineItem>,
    pub total_amount: f64,
    pub notes: Option<String>,
    /// Defaults to now when unset
    pub sale_date: Option<NaiveDateTime>,
}

impl NewSale {
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(SaleError::EmptySale);
        }
        for item in &self.items {
            if item.quantity <= 0 {
                return Err(SaleError::InvalidData(format!(
                    "Quantity for product {} must be a positive integer.",
                    item.product_id
                )));
            }
            if !item.unit_price.is_finite() || item.unit_price < 0.0 {
                return Err(SaleError::InvalidData(format!(
                    "Unit price for product {} must be a non-negative number.",
                    item.product_id
                )));
            }
        }
        if !self.total_amount.is_finite() || self.total_amount < 0.0 {
            return Err(SaleError::InvalidData(
                "Total amount must be a non-negative number.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Database model for sale headers
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::sales)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SaleDB {
    #[diesel(skip_insertion)]
    pub id: i32,
    pub user_id: i32,
    pub sale_date: NaiveDateTime,
    pub total_amount: f64,
    pub notes: Option<String>,
}

/// Database model for sale line items
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::sale_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SaleItemDB {
    #[diesel(skip_insertion)]
    pub id: i32,
    pub sale_id: i32,
    pub product_id: i32,
    pub quantity_sold: i32,
    pub price_at_sale: f64,
}

impl From<SaleDB> for Sale {
    fn from(db: SaleDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            sale_date: db.sale_date,
            total_amount: db.total_amount,
            notes: db.notes,
        }
    }
}

impl From<SaleItemDB> for SaleItem {
    fn from(db: SaleItemDB) -> Self {
        Self {
            id: db.id,
            sale_id: db.sale_id,
            product_id: db.product_id,
            quantity_sold: db.quantity_sold,
            price_at_sale: db.price_at_sale,
        }
    }
}
