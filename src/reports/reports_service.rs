use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::sync::Arc;

use super::reports_errors::{ReportError, Result};
use super::reports_model::{DailyRevenuePoint, GoalProgress, KpiSummary, SalesRecord, TopProduct};
use super::reports_repository::ReportRepository;
use crate::activities::{ActivityLogEntry, ActivityRepository};
use crate::db::DbPool;
use crate::goals::Goal;
use crate::products::Product;

pub const DEFAULT_TOP_PRODUCTS_LIMIT: i64 = 5;
pub const DEFAULT_RECENT_ACTIVITY_LIMIT: i64 = 5;

/// The read-only reporting engine. Serves dashboards, the sales page and
/// the goal progress bars; never mutates anything.
pub struct ReportService {
    repo: ReportRepository,
    activity_log: ActivityRepository,
}

impl ReportService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            repo: ReportRepository::new(pool.clone()),
            activity_log: ActivityRepository::new(pool),
        }
    }

    pub fn sales_records(
        &self,
        user_id: i32,
        product_id: Option<i32>,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<SalesRecord>> {
        self.repo.sales_records(user_id, product_id, start, end)
    }

    /// Headline metrics. The stock figure reflects current inventory and
    /// ignores the date window on purpose.
    pub fn kpi_summary(
        &self,
        user_id: i32,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<KpiSummary> {
        let (total_revenue, items_sold) = self.repo.revenue_and_items(user_id, start, end)?;
        let stock_on_hand = self.repo.stock_on_hand(user_id)?;

        Ok(KpiSummary {
            total_revenue,
            items_sold,
            stock_on_hand,
        })
    }

    /// Dense revenue series for the trailing `days` calendar days ending
    /// today. Days without sales report 0, never absence.
    pub fn daily_revenue_series(&self, user_id: i32, days: u32) -> Result<Vec<DailyRevenuePoint>> {
        let end_day = chrono::Utc::now().date_naive();
        self.daily_revenue_series_ending(user_id, end_day, days)
    }

    pub fn daily_revenue_series_ending(
        &self,
        user_id: i32,
        end_day: NaiveDate,
        days: u32,
    ) -> Result<Vec<DailyRevenuePoint>> {
        if days == 0 {
            return Ok(Vec::new());
        }

        let since = end_day - Duration::days(i64::from(days) - 1);
        let rows = self.repo.daily_revenue(user_id, since)?;
        Ok(zero_fill_series(since, end_day, &rows))
    }

    pub fn top_products(
        &self,
        user_id: i32,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        limit: Option<i64>,
    ) -> Result<Vec<TopProduct>> {
        self.repo.top_products(
            user_id,
            start,
            end,
            limit.unwrap_or(DEFAULT_TOP_PRODUCTS_LIMIT),
        )
    }

    pub fn low_stock_items(&self, user_id: i32) -> Result<Vec<Product>> {
        Ok(self
            .repo
            .low_stock(user_id)?
            .into_iter()
            .map(Product::from)
            .collect())
    }

    pub fn recent_activity(
        &self,
        user_id: i32,
        limit: Option<i64>,
    ) -> Result<Vec<ActivityLogEntry>> {
        self.activity_log
            .recent(user_id, limit.unwrap_or(DEFAULT_RECENT_ACTIVITY_LIMIT))
            .map_err(|e| ReportError::DatabaseError(e.to_string()))
    }

    /// Progress for one goal over its own window
    pub fn goal_progress(&self, user_id: i32, goal: &Goal) -> Result<GoalProgress> {
        self.repo
            .sales_progress(user_id, goal.start_date, goal.deadline, goal.product_id)
    }
}

/// Expands sparse per-day revenue rows into one point per calendar day
fn zero_fill_series(
    since: NaiveDate,
    end_day: NaiveDate,
    rows: &[(NaiveDate, f64)],
) -> Vec<DailyRevenuePoint> {
    let by_day: HashMap<NaiveDate, f64> = rows.iter().copied().collect();

    let mut series = Vec::new();
    let mut day = since;
    while day <= end_day {
        series.push(DailyRevenuePoint {
            date: day,
            revenue: by_day.get(&day).copied().unwrap_or(0.0),
        });
        day += Duration::days(1);
    }
    series
}
