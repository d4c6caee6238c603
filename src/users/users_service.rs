use log::{debug, info};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use super::users_errors::{Result, UserError};
use super::users_model::{NewUser, User, UserDB, UserUpdate};
use super::users_repository::UserRepository;
use crate::db::DbPool;

/// Service for registration, authentication and profile management
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            repo: UserRepository::new(pool),
        }
    }

    /// Registers a new user. Emails are stored lowercased, which makes the
    /// uniqueness constraint case-insensitive at this boundary.
    pub fn register(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;

        let user_db = UserDB {
            id: 0,
            name: new_user.name.trim().to_string(),
            email: new_user.email.trim().to_lowercase(),
            password_hash: hash_password(&new_user.password),
            created_at: chrono::Utc::now().naive_utc(),
        };

        let created = self.repo.insert(&user_db)?;
        info!("Registered user {} ({})", created.id, created.email);
        Ok(created.into())
    }

    /// Verifies credentials. Unknown email and wrong password are
    /// indistinguishable to the caller.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .repo
            .find_by_email(&email.trim().to_lowercase())?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&user.password_hash, password) {
            debug!("Password mismatch for {}", user.email);
            return Err(UserError::InvalidCredentials);
        }
        Ok(user.into())
    }

    pub fn get_user(&self, user_id: i32) -> Result<User> {
        self.repo
            .find_by_id(user_id)?
            .map(User::from)
            .ok_or(UserError::NotFound)
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .repo
            .find_by_email(&email.trim().to_lowercase())?
            .map(User::from))
    }

    pub fn update_profile(&self, user_id: i32, mut changes: UserUpdate) -> Result<User> {
        if changes.name.is_none() && changes.email.is_none() {
            return Err(UserError::InvalidData(
                "No valid fields to update.".to_string(),
            ));
        }
        if let Some(ref name) = changes.name {
            if name.trim().is_empty() {
                return Err(UserError::InvalidData(
                    "Name cannot be empty.".to_string(),
                ));
            }
        }
        if let Some(email) = changes.email.take() {
            let email = email.trim().to_lowercase();
            if !email.contains('@') {
                return Err(UserError::InvalidData(
                    "A valid email address is required.".to_string(),
                ));
            }
            changes.email = Some(email);
        }

        self.repo.update_profile(user_id, &changes).map(User::from)
    }

    /// Changes the password after verifying the old one
    pub fn change_password(
        &self,
        user_id: i32,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        if new_password.is_empty() {
            return Err(UserError::InvalidData(
                "Password cannot be empty.".to_string(),
            ));
        }

        let user = self.repo.find_by_id(user_id)?.ok_or(UserError::NotFound)?;
        if !verify_password(&user.password_hash, old_password) {
            return Err(UserError::InvalidCredentials);
        }

        self.repo
            .update_password_hash(user_id, &hash_password(new_password))
    }
}

fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    hex::encode(digest)
}

fn verify_password(stored_hash: &str, provided_password: &str) -> bool {
    stored_hash == hash_password(provided_password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_hex_sha256() {
        let h = hash_password("password123");
        assert_eq!(h.len(), 64);
        assert_eq!(h, hash_password("password123"));
        assert_ne!(h, hash_password("password124"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let stored = hash_password("pw");
        assert!(verify_password(&stored, "pw"));
        assert!(!verify_password(&stored, "pW"));
    }
}
