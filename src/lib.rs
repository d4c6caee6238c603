pub mod db;

pub mod activities;
pub mod goals;
pub mod products;
pub mod reports;
pub mod sales;
pub mod users;

pub mod errors;
pub mod schema;

pub use errors::{Error, Result};
