/**
 * Authentication Middleware
 *
 * Protects every board, column, card and comment route. The middleware
 * reads `Authorization: Bearer <token>`, verifies the JWT with the
 * configured secret, checks the user still exists, and attaches an
 * `AuthenticatedUser` to the request extensions for the `AuthUser`
 * extractor.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::{user_id_from_claims, verify_token};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

const INVALID_TOKEN: &str = "invalid token";

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

/// Authentication middleware
///
/// Returns 401 `{"error": "invalid token"}` if the token is missing,
/// malformed, expired, or names a user that no longer exists.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Missing or malformed Authorization header");
            BackendError::unauthenticated(INVALID_TOKEN)
        })?;

    let claims = verify_token(&app_state.config.jwt_secret, token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthenticated(INVALID_TOKEN)
    })?;

    let user_id = user_id_from_claims(&claims).map_err(|e| {
        tracing::warn!("{}", e);
        BackendError::unauthenticated(INVALID_TOKEN)
    })?;

    if app_state.store.find_user_by_id(user_id).await?.is_none() {
        tracing::warn!("Token names unknown user: {}", user_id);
        return Err(BackendError::unauthenticated(INVALID_TOKEN));
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        username: claims.username,
        name: claims.name,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the user attached by [`auth_middleware`]
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthenticated(INVALID_TOKEN)
            })
    }
}
