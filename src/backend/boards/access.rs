//! Board access checks
//!
//! Every board-scoped operation first loads the board and checks that the
//! caller is its owner or a member. Owner-only operations additionally go
//! through [`ensure_owner`].

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::DocumentStore;
use crate::shared::Board;

/// Load a board, failing with `NotFound`
pub async fn load_board(store: &dyn DocumentStore, board_id: Uuid) -> Result<Board, BackendError> {
    store
        .find_board(board_id)
        .await?
        .ok_or_else(|| BackendError::not_found("board", board_id))
}

pub fn ensure_access(board: &Board, user_id: Uuid) -> Result<(), BackendError> {
    if board.can_access(user_id) {
        Ok(())
    } else {
        tracing::warn!("User {} denied access to board {}", user_id, board.id);
        Err(BackendError::forbidden("You are not a member of this board"))
    }
}

pub fn ensure_owner(board: &Board, user_id: Uuid) -> Result<(), BackendError> {
    if board.is_owner(user_id) {
        Ok(())
    } else {
        tracing::warn!("User {} is not the owner of board {}", user_id, board.id);
        Err(BackendError::forbidden("Only the board owner can do this"))
    }
}

/// Load a board the caller may act on
pub async fn load_board_for(
    store: &dyn DocumentStore,
    board_id: Uuid,
    user_id: Uuid,
) -> Result<Board, BackendError> {
    let board = load_board(store, board_id).await?;
    ensure_access(&board, user_id)?;
    Ok(board)
}
