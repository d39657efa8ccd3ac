//! Board CRUD and membership

use uuid::Uuid;

use crate::backend::auth::users::require_user_by_username;
use crate::backend::boards::access::ensure_owner;
use crate::backend::error::BackendError;
use crate::backend::store::DocumentStore;
use crate::shared::error::require_text;
use crate::shared::board::{CreateBoardRequest, UpdateBoardRequest};
use crate::shared::Board;

/// Boards the user owns or is a member of
pub async fn list_boards(
    store: &dyn DocumentStore,
    user_id: Uuid,
) -> Result<Vec<Board>, BackendError> {
    Ok(store.list_boards_for_user(user_id).await?)
}

pub async fn create_board(
    store: &dyn DocumentStore,
    owner_id: Uuid,
    request: CreateBoardRequest,
) -> Result<Board, BackendError> {
    let title = require_text("title", request.title.as_deref())?;
    let board = Board::new(title, owner_id, request.start_date, request.due_date);
    store.insert_board(&board).await?;

    tracing::info!("Board created: {} by {}", board.id, owner_id);
    Ok(board)
}

/// Apply an edit to a loaded board and save it
///
/// Title and dates may be changed by any member. Adding or removing a
/// member is owner-only.
pub async fn update_board(
    store: &dyn DocumentStore,
    board: &mut Board,
    caller_id: Uuid,
    request: UpdateBoardRequest,
) -> Result<(), BackendError> {
    if request.title.is_some() {
        board.title = require_text("title", request.title.as_deref())?;
    }
    if let Some(start_date) = request.start_date {
        board.start_date = start_date;
    }
    if let Some(due_date) = request.due_date {
        board.due_date = due_date;
    }

    if let Some(username) = request.username.as_deref() {
        ensure_owner(board, caller_id)?;
        let user = require_user_by_username(store, username.trim()).await?;
        if user.id == board.owner_id || board.is_member(user.id) {
            tracing::debug!("{} already belongs to board {}", user.username, board.id);
        } else {
            board.member_ids.push(user.id);
            tracing::info!("Added member {} to board {}", user.username, board.id);
        }
    }

    if let Some(username) = request.remove_username.as_deref() {
        ensure_owner(board, caller_id)?;
        let user = require_user_by_username(store, username.trim()).await?;
        board.member_ids.retain(|id| *id != user.id);
        tracing::info!("Removed member {} from board {}", user.username, board.id);
    }

    board.touch();
    store.save_board(board).await?;
    Ok(())
}

/// Delete a board and all of its cards (owner only)
pub async fn delete_board(
    store: &dyn DocumentStore,
    board: &Board,
    caller_id: Uuid,
) -> Result<(), BackendError> {
    ensure_owner(board, caller_id)?;
    store.delete_board(board.id).await?;
    tracing::info!("Board deleted: {}", board.id);
    Ok(())
}
