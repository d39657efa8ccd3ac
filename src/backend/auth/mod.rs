//! Authentication Module
//!
//! This module handles user registration, sign-in and token sessions.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User record and lookups
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── signup.rs   - POST /auth/sign-up
//!     ├── login.rs    - POST /auth/sign-in
//!     └── me.rs       - GET /auth/me
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Sign-up**: name, username and password → user created → token returned
//! 2. **Sign-in**: username and password verified → token returned
//! 3. **Me**: bearer token verified by the middleware → public user returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Invalid credentials return 401 without saying which part was wrong
//! - Password hashes are never serialized

/// User record and lookups
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{SignInRequest, SignUpRequest, TokenResponse};
pub use handlers::{get_me, sign_in, sign_up};
