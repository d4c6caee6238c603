use std::sync::Arc;

use super::activities_errors::Result;
use super::activities_model::{ActivityLogEntry, NewActivityLogEntry};
use super::activities_repository::ActivityRepository;
use crate::db::DbPool;

pub const DEFAULT_RECENT_LIMIT: i64 = 5;

/// Service for the append-only activity log
pub struct ActivityService {
    repo: ActivityRepository,
}

impl ActivityService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            repo: ActivityRepository::new(pool),
        }
    }

    pub fn log_activity(
        &self,
        user_id: i32,
        activity_type: &str,
        description: impl Into<String>,
    ) -> Result<ActivityLogEntry> {
        self.repo
            .append(&NewActivityLogEntry::now(user_id, activity_type, description))
    }

    pub fn recent_activity(&self, user_id: i32, limit: Option<i64>) -> Result<Vec<ActivityLogEntry>> {
        self.repo
            .recent(user_id, limit.unwrap_or(DEFAULT_RECENT_LIMIT))
    }
}
