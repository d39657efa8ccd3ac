/**
 * Postgres Document Store
 *
 * Boards keep their columns as a JSONB document and their members as a
 * `UUID[]`; cards keep their comments as JSONB. This mirrors the document
 * shape of the API while letting multi-card position updates run inside a
 * single transaction.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{CardWriteBatch, DocumentStore, StoreError, StoreResult};
use crate::backend::auth::users::User;
use crate::shared::{Board, Card, Column, Comment};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and run pending migrations
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!().run(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(sqlx::FromRow)]
struct BoardRow {
    id: Uuid,
    title: String,
    owner_id: Uuid,
    member_ids: Vec<Uuid>,
    start_date: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
    columns: Json<Vec<Column>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BoardRow> for Board {
    fn from(row: BoardRow) -> Self {
        Board {
            id: row.id,
            title: row.title,
            owner_id: row.owner_id,
            member_ids: row.member_ids,
            start_date: row.start_date,
            due_date: row.due_date,
            columns: row.columns.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CardRow {
    id: Uuid,
    board_id: Uuid,
    column_id: Uuid,
    title: String,
    description: String,
    assigned_to: Option<Uuid>,
    position: i64,
    completed_at: Option<DateTime<Utc>>,
    comments: Json<Vec<Comment>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CardRow> for Card {
    fn from(row: CardRow) -> Self {
        Card {
            id: row.id,
            board_id: row.board_id,
            column_id: row.column_id,
            title: row.title,
            description: row.description,
            assigned_to: row.assigned_to,
            position: row.position,
            completed_at: row.completed_at,
            comments: row.comments.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const BOARD_COLUMNS: &str =
    "id, title, owner_id, member_ids, start_date, due_date, columns, created_at, updated_at";

const CARD_COLUMNS: &str = "id, board_id, column_id, title, description, assigned_to, position, \
     completed_at, comments, created_at, updated_at";

const USER_COLUMNS: &str = "id, name, username, password_hash, created_at, updated_at";

fn map_unique_violation(err: sqlx::Error, what: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Duplicate {
                what: what.to_string(),
            };
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl DocumentStore for PgStore {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, username, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "username"))?;
        Ok(())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY username", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn insert_board(&self, board: &Board) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO boards (id, title, owner_id, member_ids, start_date, due_date, columns, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(board.id)
        .bind(&board.title)
        .bind(board.owner_id)
        .bind(&board.member_ids)
        .bind(board.start_date)
        .bind(board.due_date)
        .bind(Json(&board.columns))
        .bind(board.created_at)
        .bind(board.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_board(&self, id: Uuid) -> StoreResult<Option<Board>> {
        let sql = format!("SELECT {} FROM boards WHERE id = $1", BOARD_COLUMNS);
        let row = sqlx::query_as::<_, BoardRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Board::from))
    }

    async fn list_boards_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Board>> {
        let sql = format!(
            "SELECT {} FROM boards WHERE owner_id = $1 OR $1 = ANY(member_ids) ORDER BY created_at",
            BOARD_COLUMNS
        );
        let rows = sqlx::query_as::<_, BoardRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Board::from).collect())
    }

    async fn save_board(&self, board: &Board) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE boards
            SET title = $2, member_ids = $3, start_date = $4, due_date = $5, columns = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(board.id)
        .bind(&board.title)
        .bind(&board.member_ids)
        .bind(board.start_date)
        .bind(board.due_date)
        .bind(Json(&board.columns))
        .bind(board.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing {
                resource: "board",
                id: board.id,
            });
        }
        Ok(())
    }

    async fn delete_board(&self, id: Uuid) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM cards WHERE board_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn insert_card(&self, card: &Card) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO cards (id, board_id, column_id, title, description, assigned_to, position, completed_at, comments, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(card.id)
        .bind(card.board_id)
        .bind(card.column_id)
        .bind(&card.title)
        .bind(&card.description)
        .bind(card.assigned_to)
        .bind(card.position)
        .bind(card.completed_at)
        .bind(Json(&card.comments))
        .bind(card.created_at)
        .bind(card.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_card(&self, id: Uuid) -> StoreResult<Option<Card>> {
        let sql = format!("SELECT {} FROM cards WHERE id = $1", CARD_COLUMNS);
        let row = sqlx::query_as::<_, CardRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Card::from))
    }

    async fn find_cards_in_column(&self, column_id: Uuid) -> StoreResult<Vec<Card>> {
        let sql = format!(
            "SELECT {} FROM cards WHERE column_id = $1 ORDER BY position, created_at",
            CARD_COLUMNS
        );
        let rows = sqlx::query_as::<_, CardRow>(&sql)
            .bind(column_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Card::from).collect())
    }

    async fn save_card_content(&self, card: &Card) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE cards
            SET title = $2, description = $3, assigned_to = $4, completed_at = $5, comments = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(card.id)
        .bind(&card.title)
        .bind(&card.description)
        .bind(card.assigned_to)
        .bind(card.completed_at)
        .bind(Json(&card.comments))
        .bind(card.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing {
                resource: "card",
                id: card.id,
            });
        }
        Ok(())
    }

    async fn commit_cards(&self, batch: &CardWriteBatch) -> StoreResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for placement in &batch.placements {
            let result = sqlx::query(
                "UPDATE cards SET column_id = $2, position = $3, updated_at = NOW() WHERE id = $1",
            )
            .bind(placement.card_id)
            .bind(placement.column_id)
            .bind(placement.position)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                // Dropping `tx` rolls back everything applied so far
                return Err(StoreError::Missing {
                    resource: "card",
                    id: placement.card_id,
                });
            }
        }
        for id in &batch.deletions {
            sqlx::query("DELETE FROM cards WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        tracing::debug!(
            "Committed card batch: {} placements, {} deletions",
            batch.placements.len(),
            batch.deletions.len()
        );
        Ok(())
    }
}
