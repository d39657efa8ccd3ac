//! Card comments
//!
//! Comments are embedded in the card record and written with
//! `save_card_content`, so they can never disturb a card's position.

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::DocumentStore;
use crate::shared::error::require_text;
use crate::shared::{Board, Card, Comment};

fn find_index(card: &Card, comment_id: Uuid) -> Result<usize, BackendError> {
    card.comments
        .iter()
        .position(|c| c.id == comment_id)
        .ok_or_else(|| BackendError::not_found("comment", comment_id))
}

pub async fn add_comment(
    store: &dyn DocumentStore,
    card: &mut Card,
    author_id: Uuid,
    text: Option<&str>,
) -> Result<Comment, BackendError> {
    let comment = Comment::new(require_text("text", text)?, author_id);
    card.comments.push(comment.clone());
    card.updated_at = chrono::Utc::now();
    store.save_card_content(card).await?;

    tracing::info!("Comment {} added to card {}", comment.id, card.id);
    Ok(comment)
}

/// Only the author may edit a comment
pub async fn edit_comment(
    store: &dyn DocumentStore,
    card: &mut Card,
    comment_id: Uuid,
    caller_id: Uuid,
    text: Option<&str>,
) -> Result<Comment, BackendError> {
    let text = require_text("text", text)?;
    let index = find_index(card, comment_id)?;
    if card.comments[index].author_id != caller_id {
        return Err(BackendError::forbidden("Only the author can edit this comment"));
    }

    let now = chrono::Utc::now();
    let comment = &mut card.comments[index];
    comment.text = text;
    comment.updated_at = now;
    let edited = comment.clone();

    card.updated_at = now;
    store.save_card_content(card).await?;
    Ok(edited)
}

/// The author or the board owner may delete a comment
pub async fn delete_comment(
    store: &dyn DocumentStore,
    board: &Board,
    card: &mut Card,
    comment_id: Uuid,
    caller_id: Uuid,
) -> Result<(), BackendError> {
    let index = find_index(card, comment_id)?;
    if card.comments[index].author_id != caller_id && !board.is_owner(caller_id) {
        return Err(BackendError::forbidden(
            "Only the author or the board owner can delete this comment",
        ));
    }

    card.comments.remove(index);
    card.updated_at = chrono::Utc::now();
    store.save_card_content(card).await?;

    tracing::info!("Comment {} deleted from card {}", comment_id, card.id);
    Ok(())
}
