use crate::traits::BoardStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{
    Board, BoardId, Card, CardDraft, CardId, CardOrder, CardUpdate, List, ListId, ListOrder,
    ListWithCards,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use uuid::Uuid;

const SCHEMA: &str = include_str!("../schema.sql");

const BOARD_COLUMNS: &str = "id, org_id, title, created_at, updated_at";
const LIST_COLUMNS: &str = "id, board_id, title, position, created_at, updated_at";
const CARD_COLUMNS: &str = "id, list_id, title, description, position, created_at, updated_at";

fn db_err(e: sqlx::Error) -> KanbanError {
    KanbanError::Database(e.to_string())
}

fn parse_id(row: &SqliteRow, column: &str) -> KanbanResult<Uuid> {
    let raw: String = row.try_get(column).map_err(db_err)?;
    Uuid::parse_str(&raw).map_err(|e| KanbanError::Serialization(format!("{}: {}", column, e)))
}

fn parse_time(row: &SqliteRow, column: &str) -> KanbanResult<DateTime<Utc>> {
    let raw: String = row.try_get(column).map_err(db_err)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| KanbanError::Serialization(format!("{}: {}", column, e)))
}

fn row_to_board(row: &SqliteRow) -> KanbanResult<Board> {
    Ok(Board {
        id: parse_id(row, "id")?,
        org_id: row.try_get("org_id").map_err(db_err)?,
        title: row.try_get("title").map_err(db_err)?,
        created_at: parse_time(row, "created_at")?,
        updated_at: parse_time(row, "updated_at")?,
    })
}

fn row_to_list(row: &SqliteRow) -> KanbanResult<List> {
    Ok(List {
        id: parse_id(row, "id")?,
        board_id: parse_id(row, "board_id")?,
        title: row.try_get("title").map_err(db_err)?,
        order: row.try_get("position").map_err(db_err)?,
        created_at: parse_time(row, "created_at")?,
        updated_at: parse_time(row, "updated_at")?,
    })
}

fn row_to_card(row: &SqliteRow) -> KanbanResult<Card> {
    Ok(Card {
        id: parse_id(row, "id")?,
        list_id: parse_id(row, "list_id")?,
        title: row.try_get("title").map_err(db_err)?,
        description: row.try_get("description").map_err(db_err)?,
        order: row.try_get("position").map_err(db_err)?,
        created_at: parse_time(row, "created_at")?,
        updated_at: parse_time(row, "updated_at")?,
    })
}

async fn insert_card<'e, E>(executor: E, card: &Card) -> KanbanResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO cards (id, list_id, title, description, position, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(card.id.to_string())
    .bind(card.list_id.to_string())
    .bind(&card.title)
    .bind(&card.description)
    .bind(card.order)
    .bind(card.created_at.to_rfc3339())
    .bind(card.updated_at.to_rfc3339())
    .execute(executor)
    .await
    .map_err(db_err)?;
    Ok(())
}

/// Board store on a SQLite database file.
///
/// The pool is opened lazily on first use; the schema is applied at the same
/// time. Order updates run in one transaction and are rolled back if any item
/// falls outside the board.
pub struct SqliteStore {
    path: PathBuf,
    pool: tokio::sync::OnceCell<Pool<Sqlite>>,
}

impl SqliteStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pool: tokio::sync::OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn get_pool(&self) -> KanbanResult<&Pool<Sqlite>> {
        self.pool
            .get_or_try_init(|| async {
                let options = SqliteConnectOptions::from_str(&format!(
                    "sqlite://{}?mode=rwc",
                    self.path.display()
                ))
                .map_err(db_err)?
                .create_if_missing(true)
                .foreign_keys(true);

                let pool = SqlitePoolOptions::new()
                    .max_connections(5)
                    .connect_with(options)
                    .await
                    .map_err(|e| KanbanError::Connection(e.to_string()))?;

                sqlx::raw_sql(SCHEMA).execute(&pool).await.map_err(db_err)?;
                tracing::info!("Opened SQLite store at {}", self.path.display());

                Ok(pool)
            })
            .await
    }

    async fn cards_of(&self, pool: &Pool<Sqlite>, list_id: ListId) -> KanbanResult<Vec<Card>> {
        sqlx::query(&format!(
            "SELECT {} FROM cards WHERE list_id = ? ORDER BY position, created_at",
            CARD_COLUMNS
        ))
        .bind(list_id.to_string())
        .fetch_all(pool)
        .await
        .map_err(db_err)?
        .iter()
        .map(row_to_card)
        .collect()
    }
}

#[async_trait]
impl BoardStore for SqliteStore {
    async fn create_board(&self, org_id: &str, title: &str) -> KanbanResult<Board> {
        let pool = self.get_pool().await?;
        let board = Board::new(org_id.to_string(), title.to_string());

        sqlx::query(
            "INSERT INTO boards (id, org_id, title, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(board.id.to_string())
        .bind(&board.org_id)
        .bind(&board.title)
        .bind(board.created_at.to_rfc3339())
        .bind(board.updated_at.to_rfc3339())
        .execute(pool)
        .await
        .map_err(db_err)?;

        Ok(board)
    }

    async fn find_board(&self, org_id: &str, board_id: BoardId) -> KanbanResult<Option<Board>> {
        let pool = self.get_pool().await?;
        sqlx::query(&format!(
            "SELECT {} FROM boards WHERE id = ? AND org_id = ?",
            BOARD_COLUMNS
        ))
        .bind(board_id.to_string())
        .bind(org_id)
        .fetch_optional(pool)
        .await
        .map_err(db_err)?
        .as_ref()
        .map(row_to_board)
        .transpose()
    }

    async fn list_boards(&self, org_id: &str) -> KanbanResult<Vec<Board>> {
        let pool = self.get_pool().await?;
        sqlx::query(&format!(
            "SELECT {} FROM boards WHERE org_id = ? ORDER BY created_at",
            BOARD_COLUMNS
        ))
        .bind(org_id)
        .fetch_all(pool)
        .await
        .map_err(db_err)?
        .iter()
        .map(row_to_board)
        .collect()
    }

    async fn load_board_view(
        &self,
        org_id: &str,
        board_id: BoardId,
    ) -> KanbanResult<Vec<ListWithCards>> {
        if self.find_board(org_id, board_id).await?.is_none() {
            return Err(KanbanError::NotFound(format!("Board {}", board_id)));
        }
        let pool = self.get_pool().await?;
        let lists: Vec<List> = sqlx::query(&format!(
            "SELECT {} FROM lists WHERE board_id = ? ORDER BY position, created_at",
            LIST_COLUMNS
        ))
        .bind(board_id.to_string())
        .fetch_all(pool)
        .await
        .map_err(db_err)?
        .iter()
        .map(row_to_list)
        .collect::<KanbanResult<_>>()?;

        let mut view = Vec::with_capacity(lists.len());
        for list in lists {
            let cards = self.cards_of(pool, list.id).await?;
            view.push(ListWithCards::new(list, cards));
        }
        Ok(view)
    }

    async fn find_list(
        &self,
        org_id: &str,
        board_id: BoardId,
        list_id: ListId,
    ) -> KanbanResult<Option<ListWithCards>> {
        let pool = self.get_pool().await?;
        let list = sqlx::query(
            "SELECT l.id, l.board_id, l.title, l.position, l.created_at, l.updated_at
             FROM lists l JOIN boards b ON b.id = l.board_id
             WHERE l.id = ? AND l.board_id = ? AND b.org_id = ?",
        )
        .bind(list_id.to_string())
        .bind(board_id.to_string())
        .bind(org_id)
        .fetch_optional(pool)
        .await
        .map_err(db_err)?
        .as_ref()
        .map(row_to_list)
        .transpose()?;

        match list {
            Some(list) => {
                let cards = self.cards_of(pool, list.id).await?;
                Ok(Some(ListWithCards::new(list, cards)))
            }
            None => Ok(None),
        }
    }

    async fn find_last_list_order(&self, board_id: BoardId) -> KanbanResult<Option<i32>> {
        let pool = self.get_pool().await?;
        let row = sqlx::query("SELECT MAX(position) AS last_order FROM lists WHERE board_id = ?")
            .bind(board_id.to_string())
            .fetch_one(pool)
            .await
            .map_err(db_err)?;
        row.try_get::<Option<i32>, _>("last_order").map_err(db_err)
    }

    async fn create_list(
        &self,
        board_id: BoardId,
        title: &str,
        order: i32,
        cards: Vec<CardDraft>,
    ) -> KanbanResult<ListWithCards> {
        let pool = self.get_pool().await?;
        let list = List::new(board_id, title.to_string(), order);
        let cards: Vec<Card> = cards
            .into_iter()
            .map(|draft| Card::from_draft(list.id, draft))
            .collect();

        let mut tx = pool.begin().await.map_err(db_err)?;
        let inserted = sqlx::query(
            "INSERT INTO lists (id, board_id, title, position, created_at, updated_at)
             SELECT ?, id, ?, ?, ?, ? FROM boards WHERE id = ?",
        )
        .bind(list.id.to_string())
        .bind(&list.title)
        .bind(list.order)
        .bind(list.created_at.to_rfc3339())
        .bind(list.updated_at.to_rfc3339())
        .bind(board_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;
        if inserted.rows_affected() == 0 {
            return Err(KanbanError::NotFound(format!("Board {}", board_id)));
        }

        for card in &cards {
            insert_card(&mut *tx, card).await?;
        }
        tx.commit().await.map_err(db_err)?;

        Ok(ListWithCards::new(list, cards))
    }

    async fn find_card(&self, org_id: &str, card_id: CardId) -> KanbanResult<Option<Card>> {
        let pool = self.get_pool().await?;
        sqlx::query(
            "SELECT c.id, c.list_id, c.title, c.description, c.position, c.created_at, c.updated_at
             FROM cards c
             JOIN lists l ON l.id = c.list_id
             JOIN boards b ON b.id = l.board_id
             WHERE c.id = ? AND b.org_id = ?",
        )
        .bind(card_id.to_string())
        .bind(org_id)
        .fetch_optional(pool)
        .await
        .map_err(db_err)?
        .as_ref()
        .map(row_to_card)
        .transpose()
    }

    async fn find_last_card_order(&self, list_id: ListId) -> KanbanResult<Option<i32>> {
        let pool = self.get_pool().await?;
        let row = sqlx::query("SELECT MAX(position) AS last_order FROM cards WHERE list_id = ?")
            .bind(list_id.to_string())
            .fetch_one(pool)
            .await
            .map_err(db_err)?;
        row.try_get::<Option<i32>, _>("last_order").map_err(db_err)
    }

    async fn create_card(&self, list_id: ListId, draft: CardDraft) -> KanbanResult<Card> {
        let pool = self.get_pool().await?;
        let exists = sqlx::query("SELECT 1 FROM lists WHERE id = ?")
            .bind(list_id.to_string())
            .fetch_optional(pool)
            .await
            .map_err(db_err)?;
        if exists.is_none() {
            return Err(KanbanError::NotFound(format!("List {}", list_id)));
        }

        let card = Card::from_draft(list_id, draft);
        insert_card(pool, &card).await?;
        Ok(card)
    }

    async fn update_card(
        &self,
        org_id: &str,
        card_id: CardId,
        updates: CardUpdate,
    ) -> KanbanResult<Card> {
        if updates.is_empty() {
            return Err(KanbanError::Validation("Nothing to update".into()));
        }
        let mut card = self
            .find_card(org_id, card_id)
            .await?
            .ok_or_else(|| KanbanError::NotFound(format!("Card {}", card_id)))?;
        card.update(updates);

        let pool = self.get_pool().await?;
        sqlx::query("UPDATE cards SET title = ?, description = ?, updated_at = ? WHERE id = ?")
            .bind(&card.title)
            .bind(&card.description)
            .bind(card.updated_at.to_rfc3339())
            .bind(card.id.to_string())
            .execute(pool)
            .await
            .map_err(db_err)?;
        Ok(card)
    }

    async fn delete_card(&self, org_id: &str, card_id: CardId) -> KanbanResult<Card> {
        let card = self
            .find_card(org_id, card_id)
            .await?
            .ok_or_else(|| KanbanError::NotFound(format!("Card {}", card_id)))?;

        let pool = self.get_pool().await?;
        sqlx::query("DELETE FROM cards WHERE id = ?")
            .bind(card.id.to_string())
            .execute(pool)
            .await
            .map_err(db_err)?;
        Ok(card)
    }

    async fn update_list_order(
        &self,
        org_id: &str,
        board_id: BoardId,
        items: &[ListOrder],
    ) -> KanbanResult<Vec<List>> {
        if self.find_board(org_id, board_id).await?.is_none() {
            return Err(KanbanError::NotFound(format!("Board {}", board_id)));
        }
        let pool = self.get_pool().await?;
        let now = Utc::now().to_rfc3339();

        let mut tx = pool.begin().await.map_err(db_err)?;
        let mut updated = Vec::with_capacity(items.len());
        for item in items {
            let result =
                sqlx::query("UPDATE lists SET position = ?, updated_at = ? WHERE id = ? AND board_id = ?")
                    .bind(item.order)
                    .bind(&now)
                    .bind(item.id.to_string())
                    .bind(board_id.to_string())
                    .execute(&mut *tx)
                    .await
                    .map_err(db_err)?;
            if result.rows_affected() != 1 {
                // Dropping the transaction rolls back earlier items
                return Err(KanbanError::NotFound(format!(
                    "List {} on board {}",
                    item.id, board_id
                )));
            }

            let row = sqlx::query(&format!("SELECT {} FROM lists WHERE id = ?", LIST_COLUMNS))
                .bind(item.id.to_string())
                .fetch_one(&mut *tx)
                .await
                .map_err(db_err)?;
            updated.push(row_to_list(&row)?);
        }
        tx.commit().await.map_err(db_err)?;

        tracing::debug!("Reordered {} lists on board {}", updated.len(), board_id);
        Ok(updated)
    }

    async fn update_card_order(
        &self,
        org_id: &str,
        board_id: BoardId,
        items: &[CardOrder],
    ) -> KanbanResult<Vec<Card>> {
        if self.find_board(org_id, board_id).await?.is_none() {
            return Err(KanbanError::NotFound(format!("Board {}", board_id)));
        }
        let pool = self.get_pool().await?;
        let now = Utc::now().to_rfc3339();
        let board = board_id.to_string();

        let mut tx = pool.begin().await.map_err(db_err)?;
        let mut updated = Vec::with_capacity(items.len());
        for item in items {
            let result = sqlx::query(
                "UPDATE cards SET list_id = ?, position = ?, updated_at = ?
                 WHERE id = ?
                   AND list_id IN (SELECT id FROM lists WHERE board_id = ?)
                   AND EXISTS (SELECT 1 FROM lists WHERE id = ? AND board_id = ?)",
            )
            .bind(item.list_id.to_string())
            .bind(item.order)
            .bind(&now)
            .bind(item.id.to_string())
            .bind(&board)
            .bind(item.list_id.to_string())
            .bind(&board)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
            if result.rows_affected() != 1 {
                return Err(KanbanError::NotFound(format!(
                    "Card {} on board {}",
                    item.id, board_id
                )));
            }

            let row = sqlx::query(&format!("SELECT {} FROM cards WHERE id = ?", CARD_COLUMNS))
                .bind(item.id.to_string())
                .fetch_one(&mut *tx)
                .await
                .map_err(db_err)?;
            updated.push(row_to_card(&row)?);
        }
        tx.commit().await.map_err(db_err)?;

        tracing::debug!("Reordered {} cards on board {}", updated.len(), board_id);
        Ok(updated)
    }
}
