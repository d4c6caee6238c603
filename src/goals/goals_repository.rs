use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use super::goals_errors::{GoalError, Result};
use super::goals_model::GoalDB;
use super::goals_traits::GoalRepositoryTrait;
use crate::db::get_connection;
use crate::schema::goals;

/// Repository for goal rows, scoped to an owner
pub struct GoalRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl GoalRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    fn connection(&self) -> Result<crate::db::DbConnection> {
        get_connection(&self.pool).map_err(|e| GoalError::DatabaseError(e.to_string()))
    }

    pub fn insert(&self, new_goal: &GoalDB) -> Result<GoalDB> {
        let mut conn = self.connection()?;

        diesel::insert_into(goals::table)
            .values(new_goal)
            .returning(goals::all_columns)
            .get_result::<GoalDB>(&mut conn)
            .map_err(GoalError::from)
    }

    /// Goals for an owner, most pressing deadline first
    pub fn list(&self, user_id: i32) -> Result<Vec<GoalDB>> {
        let mut conn = self.connection()?;

        goals::table
            .filter(goals::user_id.eq(user_id))
            .order((goals::deadline.asc(), goals::id.asc()))
            .load::<GoalDB>(&mut conn)
            .map_err(GoalError::from)
    }

    pub fn find(&self, user_id: i32, goal_id: i32) -> Result<Option<GoalDB>> {
        let mut conn = self.connection()?;

        goals::table
            .filter(goals::id.eq(goal_id).and(goals::user_id.eq(user_id)))
            .first::<GoalDB>(&mut conn)
            .optional()
            .map_err(GoalError::from)
    }

    pub fn delete(&self, user_id: i32, goal_id: i32) -> Result<()> {
        let mut conn = self.connection()?;

        let deleted = diesel::delete(
            goals::table.filter(goals::id.eq(goal_id).and(goals::user_id.eq(user_id))),
        )
        .execute(&mut conn)
        .map_err(GoalError::from)?;

        if deleted == 0 {
            return Err(GoalError::NotFound(goal_id));
        }
        Ok(())
    }
}

impl GoalRepositoryTrait for GoalRepository {
    fn insert(&self, new_goal: &GoalDB) -> Result<GoalDB> {
        GoalRepository::insert(self, new_goal)
    }

    fn list(&self, user_id: i32) -> Result<Vec<GoalDB>> {
        GoalRepository::list(self, user_id)
    }

    fn find(&self, user_id: i32, goal_id: i32) -> Result<Option<GoalDB>> {
        GoalRepository::find(self, user_id, goal_id)
    }

    fn delete(&self, user_id: i32, goal_id: i32) -> Result<()> {
        GoalRepository::delete(self, user_id, goal_id)
    }
}
