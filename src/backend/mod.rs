//! Backend Module
//!
//! The Axum HTTP server for the board service.
//!
//! # Architecture
//!
//! - **`server`** - application state, configuration, app creation
//! - **`routes`** - router assembly
//! - **`auth`** - users, JWT sessions, sign-up / sign-in / me
//! - **`middleware`** - bearer-token authentication
//! - **`store`** - `DocumentStore` trait with Postgres and in-memory stores
//! - **`boards`** - board CRUD, membership, Column Ordering Service
//! - **`cards`** - Card Placement Service, Consistency Synchronizer, comments
//! - **`locks`** - per-board structural mutation locks
//! - **`error`** - `BackendError` and its JSON response
//!
//! ```text
//! backend/
//! ├── mod.rs
//! ├── main.rs         - kanban-server binary
//! ├── server/
//! ├── routes/
//! ├── auth/
//! ├── middleware/
//! ├── store/
//! ├── boards/
//! ├── cards/
//! ├── locks.rs
//! └── error/
//! ```
//!
//! # Request flow
//!
//! A structural request (reorder columns, reorder cards, move card, ...)
//! passes the auth middleware, takes the board's lock, loads the board and
//! checks membership, runs the pure sequencer from `shared::sequencer`,
//! commits every changed card position in one store call, and finally
//! patches the `cardIds` caches on the board.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Document store abstraction
pub mod store;

/// Boards and columns
pub mod boards;

/// Cards and comments
pub mod cards;

/// Per-board locks
pub mod locks;

pub use error::BackendError;
pub use server::create_app;
