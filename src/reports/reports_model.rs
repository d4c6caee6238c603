use chrono::{NaiveDate, NaiveDateTime};
use diesel::sql_types::{BigInt, Double, Integer, Nullable, Text, Timestamp};
use diesel::QueryableByName;
use serde::{Deserialize, Serialize};

/// One flattened row of the sales history, the sole data feed for export
/// collaborators (CSV/spreadsheet/PDF generators downstream).
#[derive(QueryableByName, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    #[diesel(sql_type = Timestamp)]
    pub sale_date: NaiveDateTime,
    #[diesel(sql_type = Text)]
    pub product_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub sku: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub category: Option<String>,
    #[diesel(sql_type = Integer)]
    pub quantity_sold: i32,
    #[diesel(sql_type = Double)]
    pub price_at_sale: f64,
    #[diesel(sql_type = Double)]
    pub line_revenue: f64,
}

/// Headline numbers for the dashboard. `stock_on_hand` reflects current
/// inventory and is deliberately not bounded by the report window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_revenue: f64,
    pub items_sold: i64,
    pub stock_on_hand: i64,
}

/// One day of the dense revenue series; days without sales carry 0.0
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenuePoint {
    pub date: NaiveDate,
    pub revenue: f64,
}

/// Product ranked by summed line revenue
#[derive(QueryableByName, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    #[diesel(sql_type = Integer)]
    pub product_id: i32,
    #[diesel(sql_type = Text)]
    pub product_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub sku: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub units_sold: i64,
    #[diesel(sql_type = Double)]
    pub revenue: f64,
}

/// Sales progress within a goal window
#[derive(QueryableByName, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    #[diesel(sql_type = Double)]
    #[diesel(column_name = total_revenue)]
    pub current_revenue: f64,
    #[diesel(sql_type = BigInt)]
    #[diesel(column_name = total_quantity)]
    pub current_quantity: i64,
}
