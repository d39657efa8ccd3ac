/**
 * Authentication Handler Types
 *
 * Request and response bodies shared by the sign-up, sign-in and me
 * handlers.
 */

use serde::{Deserialize, Serialize};

/// Sign up request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct SignUpRequest {
    /// Optional display name
    pub name: Option<String>,
    /// Unique login name
    pub username: Option<String>,
    /// Plain password (hashed before storage)
    pub password: Option<String>,
}

/// Sign in request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct SignInRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Token response returned by sign-up and sign-in
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub token: String,
}

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;
