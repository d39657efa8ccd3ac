//! Card and Comment documents
//!
//! Cards are top-level records that reference their board and column. The
//! pair (`columnId`, `position`) is the source of truth for card order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comment embedded in a card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(text: impl Into<String>, author_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            author_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A work item belonging to exactly one column at a time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub board_id: Uuid,
    pub column_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assigned_to: Option<Uuid>,
    pub position: i64,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    pub fn new(board_id: Uuid, column_id: Uuid, fields: NewCard, position: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            board_id,
            column_id,
            title: fields.title,
            description: fields.description,
            assigned_to: fields.assigned_to,
            position,
            completed_at: None,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn comment(&self, comment_id: Uuid) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }
}

/// Validated fields for a new card
#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub title: String,
    pub description: String,
    pub assigned_to: Option<Uuid>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<Uuid>,
}

/// Content edit; position is never touched through this request
///
/// `assignedTo: null` unassigns the card.
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::shared::nullable::deserialize")]
    pub assigned_to: Option<Option<Uuid>>,
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderCardsRequest {
    pub column_id: Uuid,
    #[serde(default)]
    pub ordered_card_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCardRequest {
    pub card_id: Uuid,
    pub from_column_id: Uuid,
    pub to_column_id: Uuid,
    pub to_index: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CommentRequest {
    pub text: Option<String>,
}
