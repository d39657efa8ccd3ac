//! Authentication Handlers Module
//!
//! # Handlers
//!
//! - **`sign_up`** - POST /auth/sign-up - User registration
//! - **`sign_in`** - POST /auth/sign-in - User authentication
//! - **`get_me`** - GET /auth/me - Current user info (token required)

/// Request and response types
pub mod types;

/// Sign-up handler
pub mod signup;

/// Sign-in handler
pub mod login;

/// Get current user handler
pub mod me;

pub use types::{SignInRequest, SignUpRequest, TokenResponse};

pub use login::sign_in;
pub use me::get_me;
pub use signup::sign_up;
