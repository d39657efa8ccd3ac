/**
 * Get Current User Handler
 *
 * GET /auth/me - the caller's public profile. The bearer token has
 * already been verified by the auth middleware.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::store::DocumentStore;
use crate::shared::PublicUser;

pub async fn get_me(
    State(store): State<Arc<dyn DocumentStore>>,
    AuthUser(caller): AuthUser,
) -> Result<Json<PublicUser>, BackendError> {
    let user = get_user_by_id(store.as_ref(), caller.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", caller.user_id);
            BackendError::not_found("user", caller.user_id)
        })?;

    Ok(Json(user.to_public()))
}
