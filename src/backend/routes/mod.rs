//! Route Configuration Module
//!
//! - **`router`** - main router: public routes, middleware, fallback
//! - **`api_routes`** - authenticated board, column, card and comment routes
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - Authenticated API routes
//! ```

/// Main router creation
pub mod router;

/// Authenticated API routes
pub mod api_routes;

pub use router::create_router;
