//! Kanban Board - Main Library
//!
//! A REST backend for Kanban-style task boards: boards hold ordered
//! columns, columns hold ordered cards, cards hold comments. Callers
//! authenticate with a bearer token.
//!
//! # Module Structure
//!
//! - **`shared`** - Documents, payloads, the position sequencer, config
//! - **`backend`** - Axum server, authentication, the document store
//!   abstraction and the ordering services built on top of it
//!
//! # Ordering
//!
//! Columns are embedded in their board document; cards are independent
//! records referencing a column. Both carry a dense zero-based `position`.
//! Each column also caches its card ids (`cardIds`); card records stay the
//! source of truth and the cache is patched after every structural change
//! and rebuilt on demand.
//!
//! # Usage
//!
//! ```rust,no_run
//! use kanban_board::backend::server::init::create_app;
//! use kanban_board::shared::AppConfig;
//!
//! # async fn example() {
//! let config = AppConfig::builder().build().unwrap();
//! let app = create_app(config).await;
//! // Serve `app` with axum::serve
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
