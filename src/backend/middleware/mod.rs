//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer-token authentication for protected routes
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use kanban_board::backend::middleware::auth_middleware;
//!
//! let protected = routes.route_layer(from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
