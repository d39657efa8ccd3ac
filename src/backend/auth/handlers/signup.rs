/**
 * Sign-up Handler
 *
 * POST /auth/sign-up
 *
 * 1. Validate username and password
 * 2. Reject a taken username with 409
 * 3. Hash the password with bcrypt and store the user
 * 4. Return a signed token (201)
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::hash;

use crate::backend::auth::handlers::types::{SignUpRequest, TokenResponse, MIN_PASSWORD_LEN};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_username};
use crate::backend::error::BackendError;
use crate::backend::store::DocumentStore;
use crate::shared::error::require_text;
use crate::shared::AppConfig;

pub async fn sign_up(
    State(store): State<Arc<dyn DocumentStore>>,
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), BackendError> {
    let username = require_text("username", request.username.as_deref())?;
    let password = request.password.unwrap_or_default();
    if password.len() < MIN_PASSWORD_LEN {
        tracing::warn!("Password too short for sign-up of {}", username);
        return Err(BackendError::invalid_field(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    let name = request
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    tracing::info!("Sign-up request for username: {}", username);

    if get_user_by_username(store.as_ref(), &username).await?.is_some() {
        tracing::warn!("Username already exists: {}", username);
        return Err(BackendError::conflict("Username already taken"));
    }

    let password_hash = hash(&password, config.bcrypt_cost)?;
    let user = create_user(store.as_ref(), name, username, password_hash).await?;
    let token = create_token(&config.jwt_secret, config.token_ttl_hours, &user)
        .map_err(|e| BackendError::internal(format!("failed to sign token: {}", e)))?;

    tracing::info!("User created successfully: {} ({})", user.username, user.id);

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}
