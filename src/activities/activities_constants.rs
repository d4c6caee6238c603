/// Free-text activity tags used by the core. The log column is not
/// constrained to these; UI layers may record their own tags.
pub const ACTIVITY_TYPE_SALE: &str = "SALE";
pub const ACTIVITY_TYPE_GOAL: &str = "Goal";
pub const ACTIVITY_TYPE_PRODUCT: &str = "Product";
