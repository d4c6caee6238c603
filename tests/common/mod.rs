#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use stockbook_core::db::{self, DbPool};
use stockbook_core::products::{NewProduct, Product, ProductService};
use stockbook_core::sales::{NewSale, SaleLineItem};
use stockbook_core::users::{NewUser, UserService};
use tempfile::TempDir;

/// A throwaway database with migrations applied. The temp directory lives
/// as long as this struct does.
pub struct TestDb {
    pub pool: Arc<DbPool>,
    _dir: TempDir,
}

pub fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = db::init(dir.path().to_str().expect("temp path is utf-8"))
        .expect("initialize database");
    let pool = db::create_pool(&db_path).expect("create pool");
    db::run_migrations(&pool).expect("run migrations");

    TestDb { pool, _dir: dir }
}

pub fn register_user(pool: &Arc<DbPool>, email: &str) -> i32 {
    let users = UserService::new(pool.clone());
    users
        .register(NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
        })
        .expect("register user")
        .id
}

pub fn new_product(name: &str, sku: Option<&str>, selling_price: f64, stock: i32) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        sku: sku.map(str::to_string),
        description: None,
        category: None,
        brand: None,
        purchase_price: 0.0,
        selling_price,
        stock_quantity: stock,
        low_stock_threshold: 5,
        image_url: None,
        notes: None,
    }
}

pub fn create_product(
    pool: &Arc<DbPool>,
    user_id: i32,
    name: &str,
    sku: Option<&str>,
    selling_price: f64,
    stock: i32,
) -> Product {
    let products = ProductService::new(pool.clone());
    products
        .create_product(user_id, new_product(name, sku, selling_price, stock))
        .expect("create product")
}

pub fn line(product_id: i32, quantity: i32, unit_price: f64) -> SaleLineItem {
    SaleLineItem {
        product_id,
        quantity,
        unit_price,
    }
}

pub fn sale(items: Vec<SaleLineItem>, total_amount: f64) -> NewSale {
    NewSale {
        items,
        total_amount,
        notes: None,
        sale_date: None,
    }
}

pub fn sale_on(items: Vec<SaleLineItem>, total_amount: f64, date: NaiveDateTime) -> NewSale {
    NewSale {
        items,
        total_amount,
        notes: None,
        sale_date: Some(date),
    }
}

pub fn noon(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(12, 0, 0).expect("valid time")
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
