//! Board and Column documents
//!
//! A board is stored as a single document with its columns embedded. Each
//! column carries a `position` (dense `0..N-1` within the board) and a
//! `cardIds` cache mirroring the card records that reference it, ordered by
//! card position. The cache is derived; card records are authoritative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ordered stage within a board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: Uuid,
    pub title: String,
    pub position: i64,
    /// Card ids in this column ordered by card position
    #[serde(default)]
    pub card_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Column {
    pub fn new(title: impl Into<String>, position: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            position,
            card_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Top-level container of columns, owned by one user and shared with members
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    pub owner_id: Uuid,
    #[serde(default)]
    pub member_ids: Vec<Uuid>,
    pub start_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    /// Embedded columns, stored in position order
    #[serde(default)]
    pub columns: Vec<Column>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    pub fn new(
        title: impl Into<String>,
        owner_id: Uuid,
        start_date: Option<DateTime<Utc>>,
        due_date: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            owner_id,
            member_ids: Vec::new(),
            start_date: start_date.unwrap_or(now),
            due_date,
            columns: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.member_ids.contains(&user_id)
    }

    /// Owner or member
    pub fn can_access(&self, user_id: Uuid) -> bool {
        self.is_owner(user_id) || self.is_member(user_id)
    }

    pub fn column(&self, column_id: Uuid) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn column_mut(&mut self, column_id: Uuid) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Create board request
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    pub title: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Update board request
///
/// `username` adds a member and `removeUsername` removes one; both are
/// owner-only. `dueDate: null` clears the due date.
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoardRequest {
    pub title: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::shared::nullable::deserialize")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub username: Option<String>,
    pub remove_username: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnTitleRequest {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderColumnsRequest {
    pub ordered_column_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BoardListResponse {
    pub boards: Vec<Board>,
}
