//! Server Module
//!
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`config`** - configuration and store loading
//! - **`init`** - app creation
//!
//! # Example
//!
//! ```rust,no_run
//! use kanban_board::backend::server::{config::load_config, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config()?;
//! let app = create_app(config).await;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Configuration and store loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::{create_app, create_app_with_store};
pub use state::AppState;
