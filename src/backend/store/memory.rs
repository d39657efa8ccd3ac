//! In-memory document store
//!
//! All collections live behind one `RwLock`, so every trait method,
//! including a whole `commit_cards` batch, is applied atomically.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CardWriteBatch, DocumentStore, StoreError, StoreResult};
use crate::backend::auth::users::User;
use crate::shared::{Board, Card};

#[derive(Debug, Default)]
struct Collections {
    users: HashMap<Uuid, User>,
    boards: HashMap<Uuid, Board>,
    cards: HashMap<Uuid, Card>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut data = self.data.write().await;
        if data.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate {
                what: "username".to_string(),
            });
        }
        data.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.data.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let data = self.data.read().await;
        Ok(data.users.values().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let data = self.data.read().await;
        let mut users: Vec<User> = data.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn insert_board(&self, board: &Board) -> StoreResult<()> {
        self.data.write().await.boards.insert(board.id, board.clone());
        Ok(())
    }

    async fn find_board(&self, id: Uuid) -> StoreResult<Option<Board>> {
        Ok(self.data.read().await.boards.get(&id).cloned())
    }

    async fn list_boards_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Board>> {
        let data = self.data.read().await;
        let mut boards: Vec<Board> = data
            .boards
            .values()
            .filter(|b| b.can_access(user_id))
            .cloned()
            .collect();
        boards.sort_by_key(|b| b.created_at);
        Ok(boards)
    }

    async fn save_board(&self, board: &Board) -> StoreResult<()> {
        let mut data = self.data.write().await;
        match data.boards.get_mut(&board.id) {
            Some(stored) => {
                *stored = board.clone();
                Ok(())
            }
            None => Err(StoreError::Missing {
                resource: "board",
                id: board.id,
            }),
        }
    }

    async fn delete_board(&self, id: Uuid) -> StoreResult<()> {
        let mut data = self.data.write().await;
        data.boards.remove(&id);
        data.cards.retain(|_, card| card.board_id != id);
        Ok(())
    }

    async fn insert_card(&self, card: &Card) -> StoreResult<()> {
        self.data.write().await.cards.insert(card.id, card.clone());
        Ok(())
    }

    async fn find_card(&self, id: Uuid) -> StoreResult<Option<Card>> {
        Ok(self.data.read().await.cards.get(&id).cloned())
    }

    async fn find_cards_in_column(&self, column_id: Uuid) -> StoreResult<Vec<Card>> {
        let data = self.data.read().await;
        let mut cards: Vec<Card> = data
            .cards
            .values()
            .filter(|c| c.column_id == column_id)
            .cloned()
            .collect();
        cards.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(cards)
    }

    async fn save_card_content(&self, card: &Card) -> StoreResult<()> {
        let mut data = self.data.write().await;
        let stored = data.cards.get_mut(&card.id).ok_or(StoreError::Missing {
            resource: "card",
            id: card.id,
        })?;
        stored.title = card.title.clone();
        stored.description = card.description.clone();
        stored.assigned_to = card.assigned_to;
        stored.completed_at = card.completed_at;
        stored.comments = card.comments.clone();
        stored.updated_at = card.updated_at;
        Ok(())
    }

    async fn commit_cards(&self, batch: &CardWriteBatch) -> StoreResult<()> {
        let mut data = self.data.write().await;

        // Validate the whole batch before touching anything
        if let Some(missing) = batch
            .placements
            .iter()
            .map(|p| p.card_id)
            .find(|id| !data.cards.contains_key(id))
        {
            return Err(StoreError::Missing {
                resource: "card",
                id: missing,
            });
        }

        let now = chrono::Utc::now();
        for placement in &batch.placements {
            if let Some(card) = data.cards.get_mut(&placement.card_id) {
                card.column_id = placement.column_id;
                card.position = placement.position;
                card.updated_at = now;
            }
        }
        for id in &batch.deletions {
            data.cards.remove(id);
        }
        Ok(())
    }
}
