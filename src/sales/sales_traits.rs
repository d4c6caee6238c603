use chrono::NaiveDateTime;

use super::sales_errors::Result;
use super::sales_model::{NewSale, Sale, SaleWithItems};

/// Trait for sale repository operations
pub trait SaleRepositoryTrait: Send + Sync {
    fn record_sale(&self, user_id: i32, new_sale: &NewSale) -> Result<SaleWithItems>;
    fn find(&self, user_id: i32, sale_id: i32) -> Result<Option<SaleWithItems>>;
    fn list(
        &self,
        user_id: i32,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<Sale>>;
}
