use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kanban_core::KanbanResult;
use kanban_domain::{
    Board, BoardId, Card, CardDraft, CardId, CardOrder, CardUpdate, List, ListId, ListOrder,
    ListWithCards,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata written alongside file-backed data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// ID of the process instance that performed the save
    pub instance_id: Uuid,
    /// When this data was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(instance_id: Uuid) -> Self {
        Self {
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Organization-scoped access to boards, lists and cards.
///
/// Every lookup that takes an `org_id` only sees entities whose ownership
/// chain (card → list → board → organization) ends at that organization;
/// anything else is reported as absent. Order updates are applied as a single
/// unit: if any item is out of scope or missing, nothing is written.
///
/// Stores are built once at startup and shared behind an `Arc`.
#[async_trait]
pub trait BoardStore: Send + Sync {
    async fn create_board(&self, org_id: &str, title: &str) -> KanbanResult<Board>;

    async fn find_board(&self, org_id: &str, board_id: BoardId) -> KanbanResult<Option<Board>>;

    async fn list_boards(&self, org_id: &str) -> KanbanResult<Vec<Board>>;

    /// Lists of a board sorted by `order`, each with its cards sorted by `order`.
    async fn load_board_view(
        &self,
        org_id: &str,
        board_id: BoardId,
    ) -> KanbanResult<Vec<ListWithCards>>;

    async fn find_list(
        &self,
        org_id: &str,
        board_id: BoardId,
        list_id: ListId,
    ) -> KanbanResult<Option<ListWithCards>>;

    /// Highest `order` among the lists of a board.
    async fn find_last_list_order(&self, board_id: BoardId) -> KanbanResult<Option<i32>>;

    /// Create a list, together with any initial cards.
    async fn create_list(
        &self,
        board_id: BoardId,
        title: &str,
        order: i32,
        cards: Vec<CardDraft>,
    ) -> KanbanResult<ListWithCards>;

    async fn find_card(&self, org_id: &str, card_id: CardId) -> KanbanResult<Option<Card>>;

    /// Highest `order` among the cards of a list.
    async fn find_last_card_order(&self, list_id: ListId) -> KanbanResult<Option<i32>>;

    async fn create_card(&self, list_id: ListId, draft: CardDraft) -> KanbanResult<Card>;

    async fn update_card(
        &self,
        org_id: &str,
        card_id: CardId,
        updates: CardUpdate,
    ) -> KanbanResult<Card>;

    async fn delete_card(&self, org_id: &str, card_id: CardId) -> KanbanResult<Card>;

    async fn update_list_order(
        &self,
        org_id: &str,
        board_id: BoardId,
        items: &[ListOrder],
    ) -> KanbanResult<Vec<List>>;

    /// Card items must currently sit in a list of `board_id` and target a
    /// list of the same board.
    async fn update_card_order(
        &self,
        org_id: &str,
        board_id: BoardId,
        items: &[CardOrder],
    ) -> KanbanResult<Vec<Card>>;
}
