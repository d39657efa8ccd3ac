//! Card Placement Service
//!
//! Cards are independent records; `column_id` and `position` on the card
//! are the source of truth for ordering. Each structural operation loads
//! the affected sibling group(s), runs the sequencer, and commits every
//! resulting position change as one [`CardWriteBatch`]. Only after that
//! commit does the synchronizer patch the `cardIds` caches on the board.
//!
//! Callers hold the board's lock for the whole operation.

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::{CardWriteBatch, DocumentStore};
use crate::backend::cards::sync;
use crate::shared::card::{MoveCardRequest, UpdateCardRequest};
use crate::shared::error::require_text;
use crate::shared::sequencer::{
    self, append_at, insert_and_shift, move_within_group, remove_and_compact, sort_by_position,
    PositionChange,
};
use crate::shared::{Board, Card, NewCard, SequenceError};

fn ensure_column(board: &Board, column_id: Uuid) -> Result<(), BackendError> {
    board
        .column(column_id)
        .map(|_| ())
        .ok_or_else(|| BackendError::not_found("column", column_id))
}

fn place_changes(batch: &mut CardWriteBatch, column_id: Uuid, changes: &[PositionChange]) {
    for change in changes {
        batch.place(change.id, column_id, change.to);
    }
}

/// Validate the fields of a new card
pub fn new_card_fields(
    board: &Board,
    title: Option<&str>,
    description: Option<String>,
    assigned_to: Option<Uuid>,
) -> Result<NewCard, BackendError> {
    let title = require_text("title", title)?;
    if let Some(assignee) = assigned_to {
        ensure_assignable(board, assignee)?;
    }
    Ok(NewCard {
        title,
        description: description.unwrap_or_default(),
        assigned_to,
    })
}

fn ensure_assignable(board: &Board, assignee: Uuid) -> Result<(), BackendError> {
    if board.can_access(assignee) {
        Ok(())
    } else {
        Err(BackendError::invalid_field(
            "assignedTo",
            "Assignee must be the board owner or a member",
        ))
    }
}

/// Load a card that belongs to `board`
pub async fn load_card(
    store: &dyn DocumentStore,
    board: &Board,
    card_id: Uuid,
) -> Result<Card, BackendError> {
    store
        .find_card(card_id)
        .await?
        .filter(|card| card.board_id == board.id)
        .ok_or_else(|| BackendError::not_found("card", card_id))
}

/// Create a card at the end of its column
pub async fn add_card(
    store: &dyn DocumentStore,
    board: &mut Board,
    column_id: Uuid,
    fields: NewCard,
) -> Result<Card, BackendError> {
    ensure_column(board, column_id)?;
    let siblings = store.find_cards_in_column(column_id).await?;
    let card = Card::new(board.id, column_id, fields, append_at(&siblings));
    store.insert_card(&card).await?;

    sync::attach(board, column_id, card.id, usize::MAX);
    sync::persist(store, board).await;

    tracing::info!(
        "Card {} added to column {} at position {}",
        card.id,
        column_id,
        card.position
    );
    Ok(card)
}

/// Cards of a column in position order
pub async fn list_column_cards(
    store: &dyn DocumentStore,
    board: &Board,
    column_id: Uuid,
) -> Result<Vec<Card>, BackendError> {
    ensure_column(board, column_id)?;
    Ok(store.find_cards_in_column(column_id).await?)
}

/// Assign `position = index` from `ordered_card_ids`
///
/// The list must be non-empty and name every card of the column exactly
/// once; otherwise nothing is written.
pub async fn reorder_cards_in_column(
    store: &dyn DocumentStore,
    board: &mut Board,
    column_id: Uuid,
    ordered_card_ids: &[Uuid],
) -> Result<Vec<Card>, BackendError> {
    ensure_column(board, column_id)?;
    if ordered_card_ids.is_empty() {
        return Err(BackendError::invalid_field(
            "orderedCardIds",
            "orderedCardIds must not be empty",
        ));
    }

    let mut cards = store.find_cards_in_column(column_id).await?;
    let changes = sequencer::reorder(&mut cards, ordered_card_ids).map_err(|e| match e {
        SequenceError::InvalidReorder { .. } => {
            BackendError::invalid_field("orderedCardIds", e.to_string())
        }
        other => other.into(),
    })?;
    sort_by_position(&mut cards);

    if !changes.is_empty() {
        let mut batch = CardWriteBatch::new();
        place_changes(&mut batch, column_id, &changes);
        store.commit_cards(&batch).await?;
        tracing::info!("Reordered {} cards in column {}", changes.len(), column_id);
    }

    if let Some(column) = board.column_mut(column_id) {
        if !sync::column_matches(column, &cards) {
            sync::rebuild(column, &cards);
            sync::persist(store, board).await;
        }
    }
    Ok(cards)
}

/// Move a card within its column or to another column of the same board
pub async fn move_card(
    store: &dyn DocumentStore,
    board: &mut Board,
    request: &MoveCardRequest,
) -> Result<Card, BackendError> {
    ensure_column(board, request.from_column_id)?;
    ensure_column(board, request.to_column_id)?;

    let mut card = load_card(store, board, request.card_id).await?;
    if card.column_id != request.from_column_id {
        return Err(BackendError::invalid_field(
            "fromColumnId",
            format!("card {} is not in column {}", card.id, request.from_column_id),
        ));
    }

    if request.from_column_id == request.to_column_id {
        move_within_column(store, board, &mut card, request.to_index).await?;
    } else {
        move_across_columns(store, board, &mut card, request.to_column_id, request.to_index)
            .await?;
    }
    Ok(card)
}

async fn move_within_column(
    store: &dyn DocumentStore,
    board: &mut Board,
    card: &mut Card,
    to_index: i64,
) -> Result<(), BackendError> {
    let column_id = card.column_id;
    let mut siblings = store.find_cards_in_column(column_id).await?;
    let changes = move_within_group(&mut siblings, card.id, to_index)?;
    if changes.is_empty() {
        tracing::debug!("Card {} already at position {}", card.id, to_index);
        return Ok(());
    }

    let mut batch = CardWriteBatch::new();
    place_changes(&mut batch, column_id, &changes);
    store.commit_cards(&batch).await?;
    *card = load_card(store, board, card.id).await?;

    sort_by_position(&mut siblings);
    if let Some(column) = board.column_mut(column_id) {
        sync::rebuild(column, &siblings);
    }
    sync::persist(store, board).await;

    tracing::info!(
        "Card {} moved within column {} to {} ({} cards shifted)",
        card.id,
        column_id,
        to_index,
        changes.len() - 1
    );
    Ok(())
}

async fn move_across_columns(
    store: &dyn DocumentStore,
    board: &mut Board,
    card: &mut Card,
    to_column_id: Uuid,
    to_index: i64,
) -> Result<(), BackendError> {
    let from_column_id = card.column_id;

    // Destination first so an out-of-range index fails before anything changes
    let mut destination = store.find_cards_in_column(to_column_id).await?;
    let opened = insert_and_shift(&mut destination, to_index)?;

    let mut source: Vec<Card> = store
        .find_cards_in_column(from_column_id)
        .await?
        .into_iter()
        .filter(|c| c.id != card.id)
        .collect();
    let closed = remove_and_compact(&mut source, card.position);

    let mut batch = CardWriteBatch::new();
    place_changes(&mut batch, from_column_id, &closed);
    place_changes(&mut batch, to_column_id, &opened);
    batch.place(card.id, to_column_id, to_index);
    store.commit_cards(&batch).await?;
    *card = load_card(store, board, card.id).await?;

    sync::detach(board, from_column_id, card.id);
    sync::attach(board, to_column_id, card.id, to_index as usize);
    sync::persist(store, board).await;

    tracing::info!(
        "Card {} moved from column {} to column {} at {}",
        card.id,
        from_column_id,
        to_column_id,
        to_index
    );
    Ok(())
}

/// Delete a card and close the gap it leaves
pub async fn delete_card(
    store: &dyn DocumentStore,
    board: &mut Board,
    card_id: Uuid,
) -> Result<(), BackendError> {
    let card = load_card(store, board, card_id).await?;
    let mut siblings: Vec<Card> = store
        .find_cards_in_column(card.column_id)
        .await?
        .into_iter()
        .filter(|c| c.id != card.id)
        .collect();
    let changes = remove_and_compact(&mut siblings, card.position);

    let mut batch = CardWriteBatch::new();
    place_changes(&mut batch, card.column_id, &changes);
    batch.delete(card.id);
    store.commit_cards(&batch).await?;

    sync::detach(board, card.column_id, card.id);
    sync::persist(store, board).await;

    tracing::info!(
        "Card {} deleted from column {} ({} cards shifted)",
        card.id,
        card.column_id,
        changes.len()
    );
    Ok(())
}

/// Edit card content; never touches column or position
pub async fn update_card(
    store: &dyn DocumentStore,
    board: &Board,
    card_id: Uuid,
    request: UpdateCardRequest,
) -> Result<Card, BackendError> {
    let mut card = load_card(store, board, card_id).await?;

    if request.title.is_some() {
        card.title = require_text("title", request.title.as_deref())?;
    }
    if let Some(description) = request.description {
        card.description = description;
    }
    match request.assigned_to {
        Some(Some(assignee)) => {
            ensure_assignable(board, assignee)?;
            card.assigned_to = Some(assignee);
        }
        Some(None) => card.assigned_to = None,
        None => {}
    }
    match request.completed {
        Some(true) if card.completed_at.is_none() => card.completed_at = Some(chrono::Utc::now()),
        Some(false) => card.completed_at = None,
        _ => {}
    }

    card.updated_at = chrono::Utc::now();
    store.save_card_content(&card).await?;
    Ok(card)
}
