/**
 * Card and Comment Handlers
 *
 * POST   /boards/{board_id}/columns/{column_id}/cards
 * GET    /boards/{board_id}/columns/{column_id}/cards
 * POST   /boards/{board_id}/columns/{column_id}/reconcile
 * PUT    /boards/{board_id}/cards/reorder
 * PUT    /boards/{board_id}/cards/move
 * GET    /boards/{board_id}/cards/{card_id}
 * PATCH  /boards/{board_id}/cards/{card_id}
 * DELETE /boards/{board_id}/cards/{card_id}
 * POST   /boards/{board_id}/cards/{card_id}/comments
 * PUT    /boards/{board_id}/cards/{card_id}/comments/{comment_id}
 * DELETE /boards/{board_id}/cards/{card_id}/comments/{comment_id}
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::backend::boards::access::{load_board, load_board_for};
use crate::backend::cards::{comments, placement, sync};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::card::{
    CommentRequest, CreateCardRequest, MoveCardRequest, ReorderCardsRequest, UpdateCardRequest,
};
use crate::shared::{Card, Column, Comment};

/// POST /boards/{board_id}/columns/{column_id}/cards
pub async fn add_card(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((board_id, column_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<Card>), BackendError> {
    let store = state.store.as_ref();
    let _guard = state.locks.lock(board_id).await;
    let mut board = load_board_for(store, board_id, caller.user_id).await?;
    let fields = placement::new_card_fields(
        &board,
        request.title.as_deref(),
        request.description,
        request.assigned_to,
    )?;
    let card = placement::add_card(store, &mut board, column_id, fields).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

/// GET /boards/{board_id}/columns/{column_id}/cards
///
/// When the column's `cardIds` cache disagrees with the card records it
/// is repaired in passing; a failed repair does not fail the read.
pub async fn list_cards(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((board_id, column_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<Card>>, BackendError> {
    let store = state.store.as_ref();
    let board = load_board_for(store, board_id, caller.user_id).await?;
    let cards = placement::list_column_cards(store, &board, column_id).await?;

    let drifted = board
        .column(column_id)
        .is_some_and(|column| !sync::column_matches(column, &cards));
    if drifted && state.config.reconcile_on_read {
        let _guard = state.locks.lock(board_id).await;
        let mut fresh = load_board(store, board_id).await?;
        if let Err(e) = sync::reconcile_column(store, &mut fresh, column_id).await {
            tracing::warn!("Reconcile on read failed for column {}: {}", column_id, e);
        }
    }

    Ok(Json(cards))
}

/// POST /boards/{board_id}/columns/{column_id}/reconcile
pub async fn reconcile_column(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((board_id, column_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Column>, BackendError> {
    let store = state.store.as_ref();
    let _guard = state.locks.lock(board_id).await;
    let mut board = load_board_for(store, board_id, caller.user_id).await?;
    let column = sync::reconcile_column(store, &mut board, column_id).await?;
    Ok(Json(column))
}

/// PUT /boards/{board_id}/cards/reorder
pub async fn reorder_cards(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(board_id): Path<Uuid>,
    Json(request): Json<ReorderCardsRequest>,
) -> Result<Json<Vec<Card>>, BackendError> {
    let store = state.store.as_ref();
    let _guard = state.locks.lock(board_id).await;
    let mut board = load_board_for(store, board_id, caller.user_id).await?;
    let cards = placement::reorder_cards_in_column(
        store,
        &mut board,
        request.column_id,
        &request.ordered_card_ids,
    )
    .await?;
    Ok(Json(cards))
}

/// PUT /boards/{board_id}/cards/move
pub async fn move_card(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(board_id): Path<Uuid>,
    Json(request): Json<MoveCardRequest>,
) -> Result<Json<Card>, BackendError> {
    let store = state.store.as_ref();
    let _guard = state.locks.lock(board_id).await;
    let mut board = load_board_for(store, board_id, caller.user_id).await?;
    let card = placement::move_card(store, &mut board, &request).await?;
    Ok(Json(card))
}

/// GET /boards/{board_id}/cards/{card_id}
pub async fn get_card(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((board_id, card_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Card>, BackendError> {
    let store = state.store.as_ref();
    let board = load_board_for(store, board_id, caller.user_id).await?;
    Ok(Json(placement::load_card(store, &board, card_id).await?))
}

/// PATCH /boards/{board_id}/cards/{card_id}
pub async fn update_card(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((board_id, card_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateCardRequest>,
) -> Result<Json<Card>, BackendError> {
    let store = state.store.as_ref();
    let _guard = state.locks.lock(board_id).await;
    let board = load_board_for(store, board_id, caller.user_id).await?;
    let card = placement::update_card(store, &board, card_id, request).await?;
    Ok(Json(card))
}

/// DELETE /boards/{board_id}/cards/{card_id}
pub async fn delete_card(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((board_id, card_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, BackendError> {
    let store = state.store.as_ref();
    let _guard = state.locks.lock(board_id).await;
    let mut board = load_board_for(store, board_id, caller.user_id).await?;
    placement::delete_card(store, &mut board, card_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /boards/{board_id}/cards/{card_id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((board_id, card_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>), BackendError> {
    let store = state.store.as_ref();
    let _guard = state.locks.lock(board_id).await;
    let board = load_board_for(store, board_id, caller.user_id).await?;
    let mut card = placement::load_card(store, &board, card_id).await?;
    let comment =
        comments::add_comment(store, &mut card, caller.user_id, request.text.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// PUT /boards/{board_id}/cards/{card_id}/comments/{comment_id}
pub async fn edit_comment(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((board_id, card_id, comment_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(request): Json<CommentRequest>,
) -> Result<Json<Comment>, BackendError> {
    let store = state.store.as_ref();
    let _guard = state.locks.lock(board_id).await;
    let board = load_board_for(store, board_id, caller.user_id).await?;
    let mut card = placement::load_card(store, &board, card_id).await?;
    let comment = comments::edit_comment(
        store,
        &mut card,
        comment_id,
        caller.user_id,
        request.text.as_deref(),
    )
    .await?;
    Ok(Json(comment))
}

/// DELETE /boards/{board_id}/cards/{card_id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((board_id, card_id, comment_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<StatusCode, BackendError> {
    let store = state.store.as_ref();
    let _guard = state.locks.lock(board_id).await;
    let board = load_board_for(store, board_id, caller.user_id).await?;
    let mut card = placement::load_card(store, &board, card_id).await?;
    comments::delete_comment(store, &board, &mut card, comment_id, caller.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
