//! Document Store Module
//!
//! The persistence seam of the server. Services talk to an
//! `Arc<dyn DocumentStore>` created once at startup and carried in
//! `AppState`; they never reach for a global connection.
//!
//! # Documents
//!
//! - **users** - credentials and profile
//! - **boards** - one document per board with its columns embedded
//! - **cards** - one record per card, comments embedded
//!
//! # Atomicity
//!
//! Single-document writes are atomic. Multi-card position changes go
//! through [`DocumentStore::commit_cards`], which applies a whole
//! [`CardWriteBatch`] as one unit: one transaction on Postgres, one
//! write-lock scope in memory. A failed batch leaves no card changed.
//!
//! # Implementations
//!
//! - **`postgres`** - `PgStore`, backed by `sqlx::PgPool`
//! - **`memory`** - `MemoryStore`, used in tests and when no database is
//!   configured

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::shared::{Board, Card};

/// Postgres-backed store
pub mod postgres;

/// In-process store
pub mod memory;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Uniqueness constraint violated
    #[error("duplicate {what}")]
    Duplicate { what: String },

    /// Update targeted a document that no longer exists
    #[error("{resource} {id} does not exist")]
    Missing { resource: &'static str, id: Uuid },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// New home of one card: its column and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPlacement {
    pub card_id: Uuid,
    pub column_id: Uuid,
    pub position: i64,
}

/// Card writes applied as one unit
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CardWriteBatch {
    pub placements: Vec<CardPlacement>,
    pub deletions: Vec<Uuid>,
}

impl CardWriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, card_id: Uuid, column_id: Uuid, position: i64) {
        self.placements.push(CardPlacement {
            card_id,
            column_id,
            position,
        });
    }

    pub fn delete(&mut self, card_id: Uuid) {
        self.deletions.push(card_id);
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty() && self.deletions.is_empty()
    }
}

/// Abstract document store
///
/// Finders return `Ok(None)` for absent documents; `save_*` methods return
/// `StoreError::Missing` when the target vanished.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name reported by the health endpoint
    fn kind(&self) -> &'static str;

    async fn insert_user(&self, user: &User) -> StoreResult<()>;
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    async fn insert_board(&self, board: &Board) -> StoreResult<()>;
    async fn find_board(&self, id: Uuid) -> StoreResult<Option<Board>>;
    /// Boards the user owns or is a member of
    async fn list_boards_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Board>>;
    /// Replace the whole board document, columns included
    async fn save_board(&self, board: &Board) -> StoreResult<()>;
    /// Delete a board together with all of its cards
    async fn delete_board(&self, id: Uuid) -> StoreResult<()>;

    async fn insert_card(&self, card: &Card) -> StoreResult<()>;
    async fn find_card(&self, id: Uuid) -> StoreResult<Option<Card>>;
    /// Cards of a column ordered by position
    async fn find_cards_in_column(&self, column_id: Uuid) -> StoreResult<Vec<Card>>;
    /// Persist content fields (title, description, assignee, completion,
    /// comments); never column or position
    async fn save_card_content(&self, card: &Card) -> StoreResult<()>;
    /// Apply placements and deletions atomically
    async fn commit_cards(&self, batch: &CardWriteBatch) -> StoreResult<()>;
}
