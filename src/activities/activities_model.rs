use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of the append-only audit trail. Entries are never updated or
/// deleted by the application.
#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[serde(rename_all = "camelCase")]
#[diesel(table_name = crate::schema::activity_log)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ActivityLogEntry {
    pub id: i32,
    pub user_id: i32,
    pub activity_type: String,
    pub description: String,
    pub activity_date: NaiveDateTime,
}

/// Insert model for a log entry
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::activity_log)]
pub struct NewActivityLogEntry {
    pub user_id: i32,
    pub activity_type: String,
    pub description: String,
    pub activity_date: NaiveDateTime,
}

impl NewActivityLogEntry {
    pub fn now(user_id: i32, activity_type: &str, description: impl Into<String>) -> Self {
        Self {
            user_id,
            activity_type: activity_type.to_string(),
            description: description.into(),
            activity_date: chrono::Utc::now().naive_utc(),
        }
    }
}
