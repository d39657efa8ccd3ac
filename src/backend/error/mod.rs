//! Backend Error Module
//!
//! This module defines the request-level error taxonomy of the server.
//! Every handler returns `Result<_, BackendError>`, and each variant maps
//! to one HTTP status and one stable `kind` string.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse and From implementations
//! ```
//!
//! # Response Format
//!
//! ```json
//! { "error": "column not found: ...", "kind": "NotFoundError", "status": 404 }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
