//! Consistency Synchronizer
//!
//! Keeps each column's `cardIds` cache in line with the card records,
//! which are authoritative. Patches are applied to the in-memory board
//! after the card write has committed, then the board is saved on a best
//! effort basis: a failed save is logged and left for reconciliation.

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::DocumentStore;
use crate::shared::{Board, Card, Column};

/// Remove `card_id` from the column's cache
pub fn detach(board: &mut Board, column_id: Uuid, card_id: Uuid) {
    if let Some(column) = board.column_mut(column_id) {
        column.card_ids.retain(|id| *id != card_id);
    }
}

/// Insert `card_id` into the column's cache at `index` (clamped)
pub fn attach(board: &mut Board, column_id: Uuid, card_id: Uuid, index: usize) {
    if let Some(column) = board.column_mut(column_id) {
        column.card_ids.retain(|id| *id != card_id);
        let at = index.min(column.card_ids.len());
        column.card_ids.insert(at, card_id);
    }
}

/// Replace the column's cache with the given cards, ordered by position
pub fn rebuild(column: &mut Column, cards: &[Card]) {
    let mut ordered: Vec<&Card> = cards.iter().collect();
    ordered.sort_by_key(|c| c.position);
    column.card_ids = ordered.into_iter().map(|c| c.id).collect();
}

/// Whether the cache lists exactly `cards` in position order
pub fn column_matches(column: &Column, cards: &[Card]) -> bool {
    let mut ordered: Vec<&Card> = cards.iter().collect();
    ordered.sort_by_key(|c| c.position);
    column.card_ids.len() == ordered.len()
        && column
            .card_ids
            .iter()
            .zip(ordered)
            .all(|(cached, card)| *cached == card.id)
}

/// Save the patched board, logging instead of failing
pub async fn persist(store: &dyn DocumentStore, board: &Board) {
    if let Err(e) = store.save_board(board).await {
        tracing::warn!(
            "cardIds cache for board {} not saved, reconciliation will repair it: {}",
            board.id,
            e
        );
    }
}

/// Recompute one column's cache from the card records and save it
///
/// This is the explicit repair operation, so unlike [`persist`] a failed
/// save is returned to the caller.
pub async fn reconcile_column(
    store: &dyn DocumentStore,
    board: &mut Board,
    column_id: Uuid,
) -> Result<Column, BackendError> {
    let cards = store.find_cards_in_column(column_id).await?;
    let column = board
        .column_mut(column_id)
        .ok_or_else(|| BackendError::not_found("column", column_id))?;

    if column_matches(column, &cards) {
        return Ok(column.clone());
    }

    tracing::warn!(
        "Reconciling cardIds of column {}: cached {} ids, {} cards stored",
        column_id,
        column.card_ids.len(),
        cards.len()
    );
    rebuild(column, &cards);
    let repaired = column.clone();
    store.save_board(board).await?;
    Ok(repaired)
}
