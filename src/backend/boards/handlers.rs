/**
 * Board and Column Handlers
 *
 * GET    /boards/users
 * GET    /boards
 * POST   /boards
 * GET    /boards/{board_id}
 * PUT    /boards/{board_id}
 * DELETE /boards/{board_id}
 * POST   /boards/{board_id}/columns
 * PUT    /boards/{board_id}/columns/reorder
 * PUT    /boards/{board_id}/columns/{column_id}
 * DELETE /boards/{board_id}/columns/{column_id}
 *
 * Every handler that writes the board document holds the board's lock
 * from load to save.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::backend::auth::users::list_user_summaries;
use crate::backend::boards::access::load_board_for;
use crate::backend::boards::{columns, service};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::board::{
    BoardListResponse, ColumnTitleRequest, CreateBoardRequest, ReorderColumnsRequest,
    UpdateBoardRequest,
};
use crate::shared::error::require_text;
use crate::shared::{Board, Column, UserSummary};

/// GET /boards/users
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    Ok(Json(list_user_summaries(state.store.as_ref()).await?))
}

/// GET /boards
pub async fn list_boards(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<BoardListResponse>, BackendError> {
    let boards = service::list_boards(state.store.as_ref(), caller.user_id).await?;
    Ok(Json(BoardListResponse { boards }))
}

/// POST /boards
pub async fn create_board(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(request): Json<CreateBoardRequest>,
) -> Result<(StatusCode, Json<Board>), BackendError> {
    let board = service::create_board(state.store.as_ref(), caller.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

/// GET /boards/{board_id}
pub async fn get_board(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<Board>, BackendError> {
    let board = load_board_for(state.store.as_ref(), board_id, caller.user_id).await?;
    Ok(Json(board))
}

/// PUT /boards/{board_id}
pub async fn update_board(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(board_id): Path<Uuid>,
    Json(request): Json<UpdateBoardRequest>,
) -> Result<Json<Board>, BackendError> {
    let _guard = state.locks.lock(board_id).await;
    let mut board = load_board_for(state.store.as_ref(), board_id, caller.user_id).await?;
    service::update_board(state.store.as_ref(), &mut board, caller.user_id, request).await?;
    Ok(Json(board))
}

/// DELETE /boards/{board_id}
pub async fn delete_board(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    let _guard = state.locks.lock(board_id).await;
    let board = load_board_for(state.store.as_ref(), board_id, caller.user_id).await?;
    service::delete_board(state.store.as_ref(), &board, caller.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /boards/{board_id}/columns
pub async fn add_column(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(board_id): Path<Uuid>,
    Json(request): Json<ColumnTitleRequest>,
) -> Result<(StatusCode, Json<Column>), BackendError> {
    let title = require_text("title", request.title.as_deref())?;
    let _guard = state.locks.lock(board_id).await;
    let mut board = load_board_for(state.store.as_ref(), board_id, caller.user_id).await?;
    let column = columns::add_column(state.store.as_ref(), &mut board, title).await?;
    Ok((StatusCode::CREATED, Json(column)))
}

/// PUT /boards/{board_id}/columns/{column_id}
pub async fn rename_column(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((board_id, column_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<ColumnTitleRequest>,
) -> Result<Json<Column>, BackendError> {
    let title = require_text("title", request.title.as_deref())?;
    let _guard = state.locks.lock(board_id).await;
    let mut board = load_board_for(state.store.as_ref(), board_id, caller.user_id).await?;
    let column = columns::rename_column(state.store.as_ref(), &mut board, column_id, title).await?;
    Ok(Json(column))
}

/// PUT /boards/{board_id}/columns/reorder
pub async fn reorder_columns(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(board_id): Path<Uuid>,
    Json(request): Json<ReorderColumnsRequest>,
) -> Result<Json<Vec<Column>>, BackendError> {
    let _guard = state.locks.lock(board_id).await;
    let mut board = load_board_for(state.store.as_ref(), board_id, caller.user_id).await?;
    let ordered =
        columns::reorder_columns(state.store.as_ref(), &mut board, &request.ordered_column_ids)
            .await?;
    Ok(Json(ordered))
}

/// DELETE /boards/{board_id}/columns/{column_id}
pub async fn delete_column(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((board_id, column_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, BackendError> {
    let _guard = state.locks.lock(board_id).await;
    let mut board = load_board_for(state.store.as_ref(), board_id, caller.user_id).await?;
    columns::delete_column(state.store.as_ref(), &mut board, column_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
