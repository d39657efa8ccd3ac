//! Boards Module
//!
//! Board documents and their embedded columns.
//!
//! - **`access`** - owner/member checks every board route goes through
//! - **`service`** - board CRUD and membership
//! - **`columns`** - Column Ordering Service (add, rename, reorder, delete)
//! - **`handlers`** - HTTP handlers

pub mod access;
pub mod columns;
pub mod handlers;
pub mod service;

pub use access::{ensure_access, ensure_owner, load_board, load_board_for};
