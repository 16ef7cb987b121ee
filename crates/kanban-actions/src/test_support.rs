use crate::context::ActionContext;
use async_trait::async_trait;
use kanban_core::{KanbanResult, Session, SessionResolver, ViewInvalidator};
use kanban_domain::{
    Board, BoardId, Card, CardDraft, CardId, CardOrder, CardUpdate, List, ListId, ListOrder,
    ListWithCards,
};
use kanban_persistence::{BoardStore, MemoryStore};
use std::sync::{Arc, Mutex};

mockall::mock! {
    pub Resolver {}

    impl SessionResolver for Resolver {
        fn resolve(&self) -> Session;
    }
}

mockall::mock! {
    pub Invalidator {}

    impl ViewInvalidator for Invalidator {
        fn invalidate(&self, path: &str);
    }
}

mockall::mock! {
    pub Store {}

    #[async_trait]
    impl BoardStore for Store {
        async fn create_board(&self, org_id: &str, title: &str) -> KanbanResult<Board>;
        async fn find_board(&self, org_id: &str, board_id: BoardId) -> KanbanResult<Option<Board>>;
        async fn list_boards(&self, org_id: &str) -> KanbanResult<Vec<Board>>;
        async fn load_board_view(&self, org_id: &str, board_id: BoardId) -> KanbanResult<Vec<ListWithCards>>;
        async fn find_list(&self, org_id: &str, board_id: BoardId, list_id: ListId) -> KanbanResult<Option<ListWithCards>>;
        async fn find_last_list_order(&self, board_id: BoardId) -> KanbanResult<Option<i32>>;
        async fn create_list(&self, board_id: BoardId, title: &str, order: i32, cards: Vec<CardDraft>) -> KanbanResult<ListWithCards>;
        async fn find_card(&self, org_id: &str, card_id: CardId) -> KanbanResult<Option<Card>>;
        async fn find_last_card_order(&self, list_id: ListId) -> KanbanResult<Option<i32>>;
        async fn create_card(&self, list_id: ListId, draft: CardDraft) -> KanbanResult<Card>;
        async fn update_card(&self, org_id: &str, card_id: CardId, updates: CardUpdate) -> KanbanResult<Card>;
        async fn delete_card(&self, org_id: &str, card_id: CardId) -> KanbanResult<Card>;
        async fn update_list_order(&self, org_id: &str, board_id: BoardId, items: &[ListOrder]) -> KanbanResult<Vec<List>>;
        async fn update_card_order(&self, org_id: &str, board_id: BoardId, items: &[CardOrder]) -> KanbanResult<Vec<Card>>;
    }
}

/// Invalidator that remembers every path it was asked to invalidate.
#[derive(Default)]
pub struct RecordingInvalidator {
    paths: Mutex<Vec<String>>,
}

impl RecordingInvalidator {
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.paths.lock().unwrap())
    }
}

impl ViewInvalidator for RecordingInvalidator {
    fn invalidate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

pub fn authorized_context(
    org_id: &str,
) -> (ActionContext, Arc<MemoryStore>, Arc<RecordingInvalidator>) {
    let store = Arc::new(MemoryStore::new());
    let invalidator = Arc::new(RecordingInvalidator::default());

    let org_id = org_id.to_string();
    let mut session = MockResolver::new();
    session
        .expect_resolve()
        .returning(move || Session::new(Some("user_1".into()), Some(org_id.clone())));

    let ctx = ActionContext::new(store.clone(), Arc::new(session), invalidator.clone());
    (ctx, store, invalidator)
}

/// Context whose session has a user but no organization.
pub fn unauthorized_context() -> (ActionContext, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());

    let mut session = MockResolver::new();
    session
        .expect_resolve()
        .returning(|| Session::new(Some("user_1".into()), None));
    let mut invalidator = MockInvalidator::new();
    invalidator.expect_invalidate().never();

    let ctx = ActionContext::new(store.clone(), Arc::new(session), Arc::new(invalidator));
    (ctx, store)
}

/// A board owned by `org_id` holding one list titled "Todo".
pub async fn seed_board(store: &MemoryStore, org_id: &str) -> (Board, List) {
    let board = store.create_board(org_id, "Board").await.unwrap();
    let list = store
        .create_list(board.id, "Todo", 1, vec![])
        .await
        .unwrap()
        .list;
    (board, list)
}
