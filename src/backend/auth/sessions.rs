/**
 * Session Management and JWT Tokens
 *
 * Access tokens are HS256 JWTs carrying the caller's id, name and
 * username. The signing secret and lifetime come from `AppConfig`.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::User;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Username
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

fn now_secs() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

/// Create a JWT token for a user
pub fn create_token(
    secret: &str,
    ttl_hours: u64,
    user: &User,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = now_secs();
    let claims = Claims {
        sub: user.id.to_string(),
        name: user.name.clone(),
        username: user.username.clone(),
        exp: now + ttl_hours * 60 * 60,
        iat: now,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a JWT token
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}

/// Extract user ID from verified claims
pub fn user_id_from_claims(claims: &Claims) -> Result<Uuid, String> {
    Uuid::parse_str(&claims.sub).map_err(|e| format!("Invalid user ID in token: {}", e))
}
