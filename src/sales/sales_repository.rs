use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::sync::Arc;

use super::sales_errors::{Result, SaleError};
use super::sales_model::{NewSale, Sale, SaleDB, SaleItem, SaleItemDB, SaleWithItems};
use super::sales_traits::SaleRepositoryTrait;
use crate::activities::{ActivityRepository, NewActivityLogEntry, ACTIVITY_TYPE_SALE};
use crate::db::{get_connection, DbConnection, DbPool, DbTransactionExecutor};
use crate::schema::{products, sale_items, sales};

/// Repository for sale headers and line items. `record_sale` is the one
/// multi-statement write in the system and always runs as a single
/// transaction: header, items, stock decrements and the audit entry either
/// all commit or none do.
pub struct SaleRepository {
    pool: Arc<DbPool>,
}

impl SaleRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub fn record_sale(&self, user_id: i32, new_sale: &NewSale) -> Result<SaleWithItems> {
        self.pool.execute(|conn| {
            let sale = insert_header(conn, user_id, new_sale)?;
            let items = insert_items(conn, &sale, new_sale)?;
            decrement_stock(conn, user_id, new_sale)?;

            let description = format!(
                "Recorded sale #{} ({} item(s), total {:.2})",
                sale.id,
                items.len(),
                sale.total_amount
            );
            ActivityRepository::append_with_conn(
                conn,
                &NewActivityLogEntry::now(user_id, ACTIVITY_TYPE_SALE, description),
            )
            .map_err(|e| SaleError::DatabaseError(e.to_string()))?;

            Ok(SaleWithItems {
                sale: sale.into(),
                items: items.into_iter().map(SaleItem::from).collect(),
            })
        })
    }

    pub fn find(&self, user_id: i32, sale_id: i32) -> Result<Option<SaleWithItems>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| SaleError::DatabaseError(e.to_string()))?;

        let header = sales::table
            .filter(sales::id.eq(sale_id).and(sales::user_id.eq(user_id)))
            .first::<SaleDB>(&mut conn)
            .optional()?;

        let Some(header) = header else {
            return Ok(None);
        };

        let items = sale_items::table
            .filter(sale_items::sale_id.eq(header.id))
            .order(sale_items::id.asc())
            .load::<SaleItemDB>(&mut conn)?;

        Ok(Some(SaleWithItems {
            sale: header.into(),
            items: items.into_iter().map(SaleItem::from).collect(),
        }))
    }

    /// Sale headers for an owner, newest first, optionally date-bounded
    pub fn list(
        &self,
        user_id: i32,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<Sale>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| SaleError::DatabaseError(e.to_string()))?;

        let mut query = sales::table
            .filter(sales::user_id.eq(user_id))
            .into_boxed();

        if let Some(start) = start {
            query = query.filter(sales::sale_date.ge(start));
        }
        if let Some(end) = end {
            query = query.filter(sales::sale_date.le(end));
        }

        let headers = query
            .order((sales::sale_date.desc(), sales::id.desc()))
            .load::<SaleDB>(&mut conn)?;

        Ok(headers.into_iter().map(Sale::from).collect())
    }
}

impl SaleRepositoryTrait for SaleRepository {
    fn record_sale(&self, user_id: i32, new_sale: &NewSale) -> Result<SaleWithItems> {
        SaleRepository::record_sale(self, user_id, new_sale)
    }

    fn find(&self, user_id: i32, sale_id: i32) -> Result<Option<SaleWithItems>> {
        SaleRepository::find(self, user_id, sale_id)
    }

    fn list(
        &self,
        user_id: i32,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<Sale>> {
        SaleRepository::list(self, user_id, start, end)
    }
}

fn insert_header(conn: &mut DbConnection, user_id: i32, new_sale: &NewSale) -> Result<SaleDB> {
    let header = SaleDB {
        id: 0,
        user_id,
        sale_date: new_sale
            .sale_date
            .unwrap_or_else(|| chrono::Utc::now().naive_utc()),
        total_amount: new_sale.total_amount,
        notes: new_sale.notes.clone(),
    };

    Ok(diesel::insert_into(sales::table)
        .values(&header)
        .returning(sales::all_columns)
        .get_result::<SaleDB>(conn)?)
}

fn insert_items(
    conn: &mut DbConnection,
    sale: &SaleDB,
    new_sale: &NewSale,
) -> Result<Vec<SaleItemDB>> {
    let mut items = Vec::with_capacity(new_sale.items.len());

    for line in &new_sale.items {
        let item = SaleItemDB {
            id: 0,
            sale_id: sale.id,
            product_id: line.product_id,
            quantity_sold: line.quantity,
            price_at_sale: line.unit_price,
        };

        let inserted = diesel::insert_into(sale_items::table)
            .values(&item)
            .returning(sale_items::all_columns)
            .get_result::<SaleItemDB>(conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    SaleError::ProductNotFound(line.product_id)
                }
                other => SaleError::from(other),
            })?;
        items.push(inserted);
    }

    Ok(items)
}

/// Guarded decrement: the WHERE clause keeps stock from going below zero
/// and scopes the product to its owner. Zero rows affected means either a
/// foreign product or an overdraw; both abort the transaction.
fn decrement_stock(conn: &mut DbConnection, user_id: i32, new_sale: &NewSale) -> Result<()> {
    for line in &new_sale.items {
        let updated = diesel::update(
            products::table.filter(
                products::id
                    .eq(line.product_id)
                    .and(products::user_id.eq(user_id))
                    .and(products::stock_quantity.ge(line.quantity)),
            ),
        )
        .set(products::stock_quantity.eq(products::stock_quantity - line.quantity))
        .execute(conn)?;

        if updated == 0 {
            let available = products::table
                .filter(
                    products::id
                        .eq(line.product_id)
                        .and(products::user_id.eq(user_id)),
                )
                .select(products::stock_quantity)
                .first::<i32>(conn)
                .optional()?;

            return Err(match available {
                Some(available) => SaleError::InsufficientStock {
                    product_id: line.product_id,
                    available,
                    requested: line.quantity,
                },
                None => SaleError::ProductNotFound(line.product_id),
            });
        }
    }

    Ok(())
}
