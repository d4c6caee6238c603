use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use super::users_errors::{Result, UserError};
use super::users_model::UserDB;
use crate::db::get_connection;
use crate::schema::users;

/// Repository for user rows
pub struct UserRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl UserRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    pub fn insert(&self, new_user: &UserDB) -> Result<UserDB> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        diesel::insert_into(users::table)
            .values(new_user)
            .returning(users::all_columns)
            .get_result::<UserDB>(&mut conn)
            .map_err(UserError::from)
    }

    /// Lookup by (lowercased) email; absence is a normal outcome
    pub fn find_by_email(&self, user_email: &str) -> Result<Option<UserDB>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        users::table
            .filter(users::email.eq(user_email))
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(UserError::from)
    }

    pub fn find_by_id(&self, user_id: i32) -> Result<Option<UserDB>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        users::table
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(UserError::from)
    }

    pub fn update_profile(
        &self,
        user_id: i32,
        changes: &super::users_model::UserUpdate,
    ) -> Result<UserDB> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        diesel::update(users::table.find(user_id))
            .set(changes)
            .returning(users::all_columns)
            .get_result::<UserDB>(&mut conn)
            .map_err(UserError::from)
    }

    pub fn update_password_hash(&self, user_id: i32, new_hash: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let updated = diesel::update(users::table.find(user_id))
            .set(users::password_hash.eq(new_hash))
            .execute(&mut conn)
            .map_err(UserError::from)?;

        if updated == 0 {
            return Err(UserError::NotFound);
        }
        Ok(())
    }
}
