/**
 * API Routes
 *
 * Every route here sits behind the bearer-token middleware.
 *
 * ## Auth
 * - `GET /auth/me`
 *
 * ## Boards
 * - `GET /boards/users`
 * - `GET|POST /boards`
 * - `GET|PUT|DELETE /boards/{board_id}`
 *
 * ## Columns
 * - `POST /boards/{board_id}/columns`
 * - `PUT /boards/{board_id}/columns/reorder`
 * - `PUT|DELETE /boards/{board_id}/columns/{column_id}`
 * - `GET|POST /boards/{board_id}/columns/{column_id}/cards`
 * - `POST /boards/{board_id}/columns/{column_id}/reconcile`
 *
 * ## Cards
 * - `PUT /boards/{board_id}/cards/reorder`
 * - `PUT /boards/{board_id}/cards/move`
 * - `GET|PATCH|DELETE /boards/{board_id}/cards/{card_id}`
 * - `POST /boards/{board_id}/cards/{card_id}/comments`
 * - `PUT|DELETE /boards/{board_id}/cards/{card_id}/comments/{comment_id}`
 */

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::get_me;
use crate::backend::boards::handlers as boards;
use crate::backend::cards::handlers as cards;
use crate::backend::server::state::AppState;

/// Configure the authenticated API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/auth/me", get(get_me))
        // Boards
        .route("/boards/users", get(boards::list_users))
        .route("/boards", get(boards::list_boards).post(boards::create_board))
        .route(
            "/boards/{board_id}",
            get(boards::get_board)
                .put(boards::update_board)
                .delete(boards::delete_board),
        )
        // Columns
        .route("/boards/{board_id}/columns", post(boards::add_column))
        .route(
            "/boards/{board_id}/columns/reorder",
            put(boards::reorder_columns),
        )
        .route(
            "/boards/{board_id}/columns/{column_id}",
            put(boards::rename_column).delete(boards::delete_column),
        )
        .route(
            "/boards/{board_id}/columns/{column_id}/cards",
            get(cards::list_cards).post(cards::add_card),
        )
        .route(
            "/boards/{board_id}/columns/{column_id}/reconcile",
            post(cards::reconcile_column),
        )
        // Cards
        .route("/boards/{board_id}/cards/reorder", put(cards::reorder_cards))
        .route("/boards/{board_id}/cards/move", put(cards::move_card))
        .route(
            "/boards/{board_id}/cards/{card_id}",
            get(cards::get_card)
                .patch(cards::update_card)
                .delete(cards::delete_card),
        )
        // Comments
        .route(
            "/boards/{board_id}/cards/{card_id}/comments",
            post(cards::add_comment),
        )
        .route(
            "/boards/{board_id}/cards/{card_id}/comments/{comment_id}",
            put(cards::edit_comment).delete(cards::delete_comment),
        )
}
