//! Cards Module
//!
//! - **`placement`** - Card Placement Service: add, reorder, move, delete, edit
//! - **`sync`** - Consistency Synchronizer for the columns' `cardIds` caches
//! - **`comments`** - comments embedded in a card
//! - **`handlers`** - HTTP handlers

pub mod comments;
pub mod handlers;
pub mod placement;
pub mod sync;
