use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_types::{BigInt, Date, Double, Integer, Nullable, Timestamp};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use super::reports_errors::{ReportError, Result};
use super::reports_model::{GoalProgress, SalesRecord, TopProduct};
use crate::db::get_connection;
use crate::products::products_model::ProductDB;
use crate::schema::products;

/// Read-only rollups over sales, line items and the catalog. Nothing in
/// this repository mutates state; every call re-queries the store.
pub struct ReportRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl ReportRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    fn connection(&self) -> Result<crate::db::DbConnection> {
        get_connection(&self.pool).map_err(|e| ReportError::DatabaseError(e.to_string()))
    }

    /// Flat sales history with product details, newest first
    pub fn sales_records(
        &self,
        user_id: i32,
        product_id: Option<i32>,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<SalesRecord>> {
        let mut conn = self.connection()?;

        diesel::sql_query(
            r#"
            SELECT
                s.sale_date,
                p.name AS product_name,
                p.sku,
                p.category,
                si.quantity_sold,
                si.price_at_sale,
                (si.quantity_sold * si.price_at_sale) AS line_revenue
            FROM sales s
            JOIN sale_items si ON si.sale_id = s.id
            JOIN products p ON p.id = si.product_id
            WHERE s.user_id = ?1
              AND (?2 IS NULL OR si.product_id = ?2)
              AND (?3 IS NULL OR s.sale_date >= ?3)
              AND (?4 IS NULL OR s.sale_date <= ?4)
            ORDER BY s.sale_date DESC, si.id DESC
            "#,
        )
        .bind::<Integer, _>(user_id)
        .bind::<Nullable<Integer>, _>(product_id)
        .bind::<Nullable<Timestamp>, _>(start)
        .bind::<Nullable<Timestamp>, _>(end)
        .load::<SalesRecord>(&mut conn)
        .map_err(ReportError::from)
    }

    /// Revenue and items sold within the window. Stock on hand is queried
    /// separately by the service because it ignores the window.
    pub fn revenue_and_items(
        &self,
        user_id: i32,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<(f64, i64)> {
        #[derive(QueryableByName)]
        struct Totals {
            #[diesel(sql_type = Double)]
            total_revenue: f64,
            #[diesel(sql_type = BigInt)]
            items_sold: i64,
        }

        let mut conn = self.connection()?;

        let totals: Totals = diesel::sql_query(
            r#"
            SELECT
                COALESCE(SUM(si.quantity_sold * si.price_at_sale), 0.0) AS total_revenue,
                COALESCE(SUM(si.quantity_sold), 0) AS items_sold
            FROM sales s
            JOIN sale_items si ON si.sale_id = s.id
            WHERE s.user_id = ?1
              AND (?2 IS NULL OR s.sale_date >= ?2)
              AND (?3 IS NULL OR s.sale_date <= ?3)
            "#,
        )
        .bind::<Integer, _>(user_id)
        .bind::<Nullable<Timestamp>, _>(start)
        .bind::<Nullable<Timestamp>, _>(end)
        .get_result(&mut conn)?;

        Ok((totals.total_revenue, totals.items_sold))
    }

    /// Current inventory total across the owner's catalog
    pub fn stock_on_hand(&self, user_id: i32) -> Result<i64> {
        #[derive(QueryableByName)]
        struct Stock {
            #[diesel(sql_type = BigInt)]
            stock_on_hand: i64,
        }

        let mut conn = self.connection()?;

        let row: Stock = diesel::sql_query(
            "SELECT COALESCE(SUM(stock_quantity), 0) AS stock_on_hand
             FROM products WHERE user_id = ?1",
        )
        .bind::<Integer, _>(user_id)
        .get_result(&mut conn)?;

        Ok(row.stock_on_hand)
    }

    /// Revenue summed per calendar day since `since`, sparse (days without
    /// sales are absent; the service zero-fills)
    pub fn daily_revenue(&self, user_id: i32, since: NaiveDate) -> Result<Vec<(NaiveDate, f64)>> {
        #[derive(QueryableByName)]
        struct DayRevenue {
            #[diesel(sql_type = Date)]
            day: NaiveDate,
            #[diesel(sql_type = Double)]
            revenue: f64,
        }

        let mut conn = self.connection()?;

        let rows = diesel::sql_query(
            r#"
            SELECT
                date(s.sale_date) AS day,
                COALESCE(SUM(si.quantity_sold * si.price_at_sale), 0.0) AS revenue
            FROM sales s
            JOIN sale_items si ON si.sale_id = s.id
            WHERE s.user_id = ?1
              AND date(s.sale_date) >= date(?2)
            GROUP BY date(s.sale_date)
            ORDER BY day ASC
            "#,
        )
        .bind::<Integer, _>(user_id)
        .bind::<Date, _>(since)
        .load::<DayRevenue>(&mut conn)?;

        Ok(rows.into_iter().map(|r| (r.day, r.revenue)).collect())
    }

    /// Products ranked by summed line revenue, descending. Ties break on
    /// ascending product id so the ordering is deterministic.
    pub fn top_products(
        &self,
        user_id: i32,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        limit: i64,
    ) -> Result<Vec<TopProduct>> {
        let mut conn = self.connection()?;

        diesel::sql_query(
            r#"
            SELECT
                p.id AS product_id,
                p.name AS product_name,
                p.sku,
                COALESCE(SUM(si.quantity_sold), 0) AS units_sold,
                COALESCE(SUM(si.quantity_sold * si.price_at_sale), 0.0) AS revenue
            FROM sale_items si
            JOIN sales s ON s.id = si.sale_id
            JOIN products p ON p.id = si.product_id
            WHERE s.user_id = ?1
              AND (?2 IS NULL OR s.sale_date >= ?2)
              AND (?3 IS NULL OR s.sale_date <= ?3)
            GROUP BY p.id, p.name, p.sku
            ORDER BY revenue DESC, p.id ASC
            LIMIT ?4
            "#,
        )
        .bind::<Integer, _>(user_id)
        .bind::<Nullable<Timestamp>, _>(start)
        .bind::<Nullable<Timestamp>, _>(end)
        .bind::<BigInt, _>(limit)
        .load::<TopProduct>(&mut conn)
        .map_err(ReportError::from)
    }

    /// Products at or below their own threshold but not yet out of stock.
    /// Rows at exactly zero belong to the out-of-stock view, not this one.
    pub fn low_stock(&self, user_id: i32) -> Result<Vec<ProductDB>> {
        let mut conn = self.connection()?;

        products::table
            .filter(products::user_id.eq(user_id))
            .filter(products::stock_quantity.le(products::low_stock_threshold))
            .filter(products::stock_quantity.gt(0))
            .order((products::stock_quantity.asc(), products::name.asc()))
            .load::<ProductDB>(&mut conn)
            .map_err(ReportError::from)
    }

    /// Revenue and quantity sold within a goal window, optionally filtered
    /// to one product. Both window bounds are inclusive whole days.
    pub fn sales_progress(
        &self,
        user_id: i32,
        start_date: NaiveDate,
        deadline: NaiveDate,
        product_id: Option<i32>,
    ) -> Result<GoalProgress> {
        let mut conn = self.connection()?;

        diesel::sql_query(
            r#"
            SELECT
                COALESCE(SUM(si.quantity_sold * si.price_at_sale), 0.0) AS total_revenue,
                COALESCE(SUM(si.quantity_sold), 0) AS total_quantity
            FROM sales s
            JOIN sale_items si ON si.sale_id = s.id
            WHERE s.user_id = ?1
              AND date(s.sale_date) >= date(?2)
              AND date(s.sale_date) <= date(?3)
              AND (?4 IS NULL OR si.product_id = ?4)
            "#,
        )
        .bind::<Integer, _>(user_id)
        .bind::<Date, _>(start_date)
        .bind::<Date, _>(deadline)
        .bind::<Nullable<Integer>, _>(product_id)
        .get_result::<GoalProgress>(&mut conn)
        .map_err(ReportError::from)
    }
}
