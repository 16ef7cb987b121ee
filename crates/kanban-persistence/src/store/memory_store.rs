use crate::store::board_data::BoardData;
use crate::traits::BoardStore;
use async_trait::async_trait;
use kanban_core::KanbanResult;
use kanban_domain::{
    Board, BoardId, Card, CardDraft, CardId, CardOrder, CardUpdate, List, ListId, ListOrder,
    ListWithCards,
};
use tokio::sync::{RwLock, RwLockWriteGuard};

/// Process-local store. Also the working copy behind [`crate::JsonFileStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<BoardData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: BoardData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    pub async fn snapshot(&self) -> BoardData {
        self.data.read().await.clone()
    }

    pub(crate) async fn lock(&self) -> RwLockWriteGuard<'_, BoardData> {
        self.data.write().await
    }
}

#[async_trait]
impl BoardStore for MemoryStore {
    async fn create_board(&self, org_id: &str, title: &str) -> KanbanResult<Board> {
        self.data.write().await.create_board(org_id, title)
    }

    async fn find_board(&self, org_id: &str, board_id: BoardId) -> KanbanResult<Option<Board>> {
        Ok(self.data.read().await.board(org_id, board_id).cloned())
    }

    async fn list_boards(&self, org_id: &str) -> KanbanResult<Vec<Board>> {
        Ok(self.data.read().await.boards_of(org_id))
    }

    async fn load_board_view(
        &self,
        org_id: &str,
        board_id: BoardId,
    ) -> KanbanResult<Vec<ListWithCards>> {
        self.data.read().await.board_view(org_id, board_id)
    }

    async fn find_list(
        &self,
        org_id: &str,
        board_id: BoardId,
        list_id: ListId,
    ) -> KanbanResult<Option<ListWithCards>> {
        Ok(self
            .data
            .read()
            .await
            .list_with_cards(org_id, board_id, list_id))
    }

    async fn find_last_list_order(&self, board_id: BoardId) -> KanbanResult<Option<i32>> {
        Ok(self.data.read().await.last_list_order(board_id))
    }

    async fn create_list(
        &self,
        board_id: BoardId,
        title: &str,
        order: i32,
        cards: Vec<CardDraft>,
    ) -> KanbanResult<ListWithCards> {
        self.data
            .write()
            .await
            .create_list(board_id, title, order, cards)
    }

    async fn find_card(&self, org_id: &str, card_id: CardId) -> KanbanResult<Option<Card>> {
        Ok(self.data.read().await.card(org_id, card_id).cloned())
    }

    async fn find_last_card_order(&self, list_id: ListId) -> KanbanResult<Option<i32>> {
        Ok(self.data.read().await.last_card_order(list_id))
    }

    async fn create_card(&self, list_id: ListId, draft: CardDraft) -> KanbanResult<Card> {
        self.data.write().await.create_card(list_id, draft)
    }

    async fn update_card(
        &self,
        org_id: &str,
        card_id: CardId,
        updates: CardUpdate,
    ) -> KanbanResult<Card> {
        self.data.write().await.update_card(org_id, card_id, updates)
    }

    async fn delete_card(&self, org_id: &str, card_id: CardId) -> KanbanResult<Card> {
        self.data.write().await.delete_card(org_id, card_id)
    }

    async fn update_list_order(
        &self,
        org_id: &str,
        board_id: BoardId,
        items: &[ListOrder],
    ) -> KanbanResult<Vec<List>> {
        self.data
            .write()
            .await
            .update_list_order(org_id, board_id, items)
    }

    async fn update_card_order(
        &self,
        org_id: &str,
        board_id: BoardId,
        items: &[CardOrder],
    ) -> KanbanResult<Vec<Card>> {
        self.data
            .write()
            .await
            .update_card_order(org_id, board_id, items)
    }
}
