use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use super::activities_errors::{ActivityError, Result};
use super::activities_model::{ActivityLogEntry, NewActivityLogEntry};
use crate::db::{get_connection, DbConnection};
use crate::schema::activity_log;

/// Repository for the activity log
pub struct ActivityRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl ActivityRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    pub fn append(&self, entry: &NewActivityLogEntry) -> Result<ActivityLogEntry> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| ActivityError::DatabaseError(e.to_string()))?;
        Self::append_with_conn(&mut conn, entry)
    }

    /// Variant used inside an enclosing transaction
    pub fn append_with_conn(
        conn: &mut DbConnection,
        entry: &NewActivityLogEntry,
    ) -> Result<ActivityLogEntry> {
        diesel::insert_into(activity_log::table)
            .values(entry)
            .returning(activity_log::all_columns)
            .get_result::<ActivityLogEntry>(conn)
            .map_err(ActivityError::from)
    }

    /// Latest entries for an owner, newest first
    pub fn recent(&self, user_id: i32, limit: i64) -> Result<Vec<ActivityLogEntry>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| ActivityError::DatabaseError(e.to_string()))?;

        activity_log::table
            .filter(activity_log::user_id.eq(user_id))
            .order((activity_log::activity_date.desc(), activity_log::id.desc()))
            .limit(limit)
            .load::<ActivityLogEntry>(&mut conn)
            .map_err(ActivityError::from)
    }
}
