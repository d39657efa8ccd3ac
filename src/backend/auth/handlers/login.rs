/**
 * Sign-in Handler
 *
 * POST /auth/sign-in
 *
 * Unknown usernames and wrong passwords both return 401 "Invalid
 * credentials" so callers cannot enumerate accounts.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::backend::auth::handlers::types::{SignInRequest, TokenResponse};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::BackendError;
use crate::backend::store::DocumentStore;
use crate::shared::AppConfig;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn sign_in(
    State(store): State<Arc<dyn DocumentStore>>,
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<TokenResponse>, BackendError> {
    let username = request.username.unwrap_or_default();
    let password = request.password.unwrap_or_default();
    tracing::info!("Sign-in request for: {}", username);

    let user = get_user_by_username(store.as_ref(), username.trim())
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", username);
            BackendError::unauthenticated(INVALID_CREDENTIALS)
        })?;

    if !verify(&password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", username);
        return Err(BackendError::unauthenticated(INVALID_CREDENTIALS));
    }

    let token = create_token(&config.jwt_secret, config.token_ttl_hours, &user)
        .map_err(|e| BackendError::internal(format!("failed to sign token: {}", e)))?;

    tracing::info!("User signed in: {} ({})", user.username, user.id);

    Ok(Json(TokenResponse { token }))
}
