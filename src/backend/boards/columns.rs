//! Column Ordering Service
//!
//! Columns are embedded in the board document, so every operation here
//! mutates the loaded `Board` and writes the whole document back. The
//! stored column array is always kept in position order.
//!
//! Callers hold the board's lock from load to save.

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::DocumentStore;
use crate::shared::sequencer::{self, append_at, remove_and_compact, sort_by_position};
use crate::shared::{Board, Column};

/// Append a column after all existing ones
pub async fn add_column(
    store: &dyn DocumentStore,
    board: &mut Board,
    title: String,
) -> Result<Column, BackendError> {
    let column = Column::new(title, append_at(&board.columns));
    board.columns.push(column.clone());
    board.touch();
    store.save_board(board).await?;

    tracing::info!(
        "Added column {} to board {} at position {}",
        column.id,
        board.id,
        column.position
    );
    Ok(column)
}

pub async fn rename_column(
    store: &dyn DocumentStore,
    board: &mut Board,
    column_id: Uuid,
    title: String,
) -> Result<Column, BackendError> {
    let column = board
        .column_mut(column_id)
        .ok_or_else(|| BackendError::not_found("column", column_id))?;
    column.title = title;
    column.updated_at = chrono::Utc::now();
    let renamed = column.clone();

    board.touch();
    store.save_board(board).await?;
    Ok(renamed)
}

/// Assign `position = index` from `ordered_column_ids`
///
/// The list must name every column exactly once. On failure nothing is
/// written and the board is unchanged.
pub async fn reorder_columns(
    store: &dyn DocumentStore,
    board: &mut Board,
    ordered_column_ids: &[Uuid],
) -> Result<Vec<Column>, BackendError> {
    let changes = sequencer::reorder(&mut board.columns, ordered_column_ids)?;
    sort_by_position(&mut board.columns);

    if changes.is_empty() {
        tracing::debug!("Column order of board {} unchanged", board.id);
        return Ok(board.columns.clone());
    }

    let now = chrono::Utc::now();
    for column in board.columns.iter_mut() {
        if changes.iter().any(|c| c.id == column.id) {
            column.updated_at = now;
        }
    }
    board.touch();
    store.save_board(board).await?;

    tracing::info!("Reordered {} columns on board {}", changes.len(), board.id);
    Ok(board.columns.clone())
}

/// Remove an empty column and close the gap it leaves
///
/// A column is empty only when both its `cardIds` cache and the card
/// records agree that it holds nothing.
pub async fn delete_column(
    store: &dyn DocumentStore,
    board: &mut Board,
    column_id: Uuid,
) -> Result<(), BackendError> {
    let column = board
        .column(column_id)
        .ok_or_else(|| BackendError::not_found("column", column_id))?;
    let removed_position = column.position;
    let cached = column.card_ids.len();

    let stored = store.find_cards_in_column(column_id).await?.len();
    let count = cached.max(stored);
    if count > 0 {
        tracing::warn!(
            "Refusing to delete column {} on board {}: {} cards",
            column_id,
            board.id,
            count
        );
        return Err(BackendError::NonEmptyColumn {
            id: column_id,
            count,
        });
    }

    board.columns.retain(|c| c.id != column_id);
    let changes = remove_and_compact(&mut board.columns, removed_position);
    sort_by_position(&mut board.columns);
    board.touch();
    store.save_board(board).await?;

    tracing::info!(
        "Deleted column {} from board {} ({} columns shifted)",
        column_id,
        board.id,
        changes.len()
    );
    Ok(())
}
