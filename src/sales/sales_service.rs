use chrono::NaiveDateTime;
use log::info;
use std::sync::Arc;

use super::sales_errors::{Result, SaleError};
use super::sales_model::{NewSale, Sale, SaleWithItems};
use super::sales_repository::SaleRepository;
use crate::db::DbPool;

/// Service for recording and reading sales
pub struct SaleService {
    repo: SaleRepository,
}

impl SaleService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            repo: SaleRepository::new(pool),
        }
    }

    /// Records a sale as one all-or-nothing unit. On success the header,
    /// line items, stock decrements and audit entry are all durably
    /// committed together.
    pub fn record_sale(&self, user_id: i32, new_sale: NewSale) -> Result<SaleWithItems> {
        new_sale.validate()?;

        let recorded = self.repo.record_sale(user_id, &new_sale)?;
        info!(
            "Recorded sale {} for user {} ({} items, total {:.2})",
            recorded.sale.id,
            user_id,
            recorded.items.len(),
            recorded.sale.total_amount
        );
        Ok(recorded)
    }

    pub fn get_sale(&self, user_id: i32, sale_id: i32) -> Result<SaleWithItems> {
        self.repo
            .find(user_id, sale_id)?
            .ok_or(SaleError::NotFound(sale_id))
    }

    pub fn get_sales(
        &self,
        user_id: i32,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<Sale>> {
        self.repo.list(user_id, start, end)
    }
}
