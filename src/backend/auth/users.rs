/**
 * User Model and Operations
 *
 * This module defines the stored user record and the lookups the
 * authentication handlers and board membership rely on.
 */

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::DocumentStore;
use crate::shared::{PublicUser, UserSummary};

/// User record as stored
///
/// Not `Serialize`: the password hash must never reach a response. Convert
/// to [`PublicUser`] first.
#[derive(Debug, Clone, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name (optional)
    pub name: Option<String>,
    /// Unique login name
    pub username: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: Option<String>, username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            username,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
        }
    }

    pub fn to_summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Create a new user
///
/// Fails with `Conflict` when the username is taken.
pub async fn create_user(
    store: &dyn DocumentStore,
    name: Option<String>,
    username: String,
    password_hash: String,
) -> Result<User, BackendError> {
    let user = User::new(name, username, password_hash);
    store.insert_user(&user).await?;
    Ok(user)
}

/// Get user by username
pub async fn get_user_by_username(
    store: &dyn DocumentStore,
    username: &str,
) -> Result<Option<User>, BackendError> {
    Ok(store.find_user_by_username(username).await?)
}

/// Get user by ID
pub async fn get_user_by_id(
    store: &dyn DocumentStore,
    id: Uuid,
) -> Result<Option<User>, BackendError> {
    Ok(store.find_user_by_id(id).await?)
}

/// Look up a user by username, failing with `NotFound`
pub async fn require_user_by_username(
    store: &dyn DocumentStore,
    username: &str,
) -> Result<User, BackendError> {
    get_user_by_username(store, username)
        .await?
        .ok_or_else(|| BackendError::not_found("user", username))
}

/// All users, for the member picker
pub async fn list_user_summaries(
    store: &dyn DocumentStore,
) -> Result<Vec<UserSummary>, BackendError> {
    let users = store.list_users().await?;
    Ok(users.iter().map(User::to_summary).collect())
}
