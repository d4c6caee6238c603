use log::debug;
use std::sync::Arc;

use super::goals_errors::{GoalError, Result};
use super::goals_model::{Goal, GoalDB, GoalWithProgress, NewGoal};
use super::goals_repository::GoalRepository;
use crate::activities::{ActivityRepository, NewActivityLogEntry, ACTIVITY_TYPE_GOAL};
use crate::db::DbPool;
use crate::reports::ReportRepository;

/// Service for managing sales goals
pub struct GoalService {
    repo: GoalRepository,
    reports: ReportRepository,
    activity_log: ActivityRepository,
}

impl GoalService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            repo: GoalRepository::new(pool.clone()),
            reports: ReportRepository::new(pool.clone()),
            activity_log: ActivityRepository::new(pool),
        }
    }

    pub fn create_goal(&self, user_id: i32, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;

        let created = self.repo.insert(&GoalDB::from_new(user_id, new_goal))?;
        debug!("Created goal {} for user {}", created.id, user_id);

        self.activity_log
            .append(&NewActivityLogEntry::now(
                user_id,
                ACTIVITY_TYPE_GOAL,
                format!("Created goal '{}'", created.goal_name),
            ))
            .map_err(|e| GoalError::DatabaseError(e.to_string()))?;

        Ok(created.into())
    }

    pub fn get_goals(&self, user_id: i32) -> Result<Vec<Goal>> {
        Ok(self
            .repo
            .list(user_id)?
            .into_iter()
            .map(Goal::from)
            .collect())
    }

    pub fn get_goal(&self, user_id: i32, goal_id: i32) -> Result<Goal> {
        self.repo
            .find(user_id, goal_id)?
            .map(Goal::from)
            .ok_or(GoalError::NotFound(goal_id))
    }

    /// Every goal joined with its sales progress over the goal window
    pub fn get_goals_with_progress(&self, user_id: i32) -> Result<Vec<GoalWithProgress>> {
        let goals = self.get_goals(user_id)?;

        goals
            .into_iter()
            .map(|goal| {
                let progress = self
                    .reports
                    .sales_progress(user_id, goal.start_date, goal.deadline, goal.product_id)
                    .map_err(|e| GoalError::DatabaseError(e.to_string()))?;
                Ok(GoalWithProgress {
                    goal,
                    current_revenue: progress.current_revenue,
                    current_quantity: progress.current_quantity,
                })
            })
            .collect()
    }

    pub fn delete_goal(&self, user_id: i32, goal_id: i32) -> Result<()> {
        self.repo.delete(user_id, goal_id)
    }
}
