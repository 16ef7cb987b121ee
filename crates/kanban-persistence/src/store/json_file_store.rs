use crate::store::atomic_writer::AtomicWriter;
use crate::store::board_data::BoardData;
use crate::store::memory_store::MemoryStore;
use crate::traits::{BoardStore, PersistenceMetadata};
use async_trait::async_trait;
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{
    Board, BoardId, Card, CardDraft, CardId, CardOrder, CardUpdate, List, ListId, ListOrder,
    ListWithCards,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const FORMAT_VERSION: u32 = 1;

/// On-disk layout of a board file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub data: BoardData,
}

impl JsonEnvelope {
    pub fn new(instance_id: Uuid, data: BoardData) -> Self {
        Self {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(instance_id),
            data,
        }
    }

    pub fn to_json_bytes(&self) -> KanbanResult<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| KanbanError::Serialization(e.to_string()))
    }

    pub fn from_json_bytes(bytes: &[u8]) -> KanbanResult<Self> {
        let envelope: JsonEnvelope = serde_json::from_slice(bytes)
            .map_err(|e| KanbanError::Serialization(e.to_string()))?;
        if envelope.version != FORMAT_VERSION {
            return Err(KanbanError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }
        Ok(envelope)
    }
}

/// Board store backed by a single JSON file.
///
/// The whole dataset is kept in memory and rewritten atomically after every
/// mutation. A mutation whose write fails is rolled back in memory and
/// reported as an error, so the file and the working copy never diverge.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
    memory: MemoryStore,
}

impl JsonFileStore {
    /// Load `path`, starting empty when the file does not exist.
    pub async fn open(path: impl AsRef<Path>) -> KanbanResult<Self> {
        let path = path.as_ref().to_path_buf();
        let data = match AtomicWriter::read_if_exists(&path).await? {
            Some(bytes) => {
                let envelope = JsonEnvelope::from_json_bytes(&bytes)?;
                tracing::info!(
                    "Loaded {} boards from {}",
                    envelope.data.boards.len(),
                    path.display()
                );
                envelope.data
            }
            None => {
                tracing::info!("No data at {}, starting empty", path.display());
                BoardData::default()
            }
        };

        Ok(Self {
            path,
            instance_id: Uuid::new_v4(),
            memory: MemoryStore::from_data(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    async fn flush(&self, data: &BoardData) -> KanbanResult<()> {
        let bytes = JsonEnvelope::new(self.instance_id, data.clone()).to_json_bytes()?;
        AtomicWriter::write_atomic(&self.path, &bytes).await
    }

    async fn commit<T: Send>(
        &self,
        mutate: impl FnOnce(&mut BoardData) -> KanbanResult<T> + Send,
    ) -> KanbanResult<T> {
        let mut data = self.memory.lock().await;
        let before = data.clone();
        let out = mutate(&mut *data)?;

        if let Err(e) = self.flush(&*data).await {
            tracing::error!("Failed to save {}: {}", self.path.display(), e);
            *data = before;
            return Err(e);
        }
        Ok(out)
    }
}

#[async_trait]
impl BoardStore for JsonFileStore {
    async fn create_board(&self, org_id: &str, title: &str) -> KanbanResult<Board> {
        self.commit(|data| data.create_board(org_id, title)).await
    }

    async fn find_board(&self, org_id: &str, board_id: BoardId) -> KanbanResult<Option<Board>> {
        self.memory.find_board(org_id, board_id).await
    }

    async fn list_boards(&self, org_id: &str) -> KanbanResult<Vec<Board>> {
        self.memory.list_boards(org_id).await
    }

    async fn load_board_view(
        &self,
        org_id: &str,
        board_id: BoardId,
    ) -> KanbanResult<Vec<ListWithCards>> {
        self.memory.load_board_view(org_id, board_id).await
    }

    async fn find_list(
        &self,
        org_id: &str,
        board_id: BoardId,
        list_id: ListId,
    ) -> KanbanResult<Option<ListWithCards>> {
        self.memory.find_list(org_id, board_id, list_id).await
    }

    async fn find_last_list_order(&self, board_id: BoardId) -> KanbanResult<Option<i32>> {
        self.memory.find_last_list_order(board_id).await
    }

    async fn create_list(
        &self,
        board_id: BoardId,
        title: &str,
        order: i32,
        cards: Vec<CardDraft>,
    ) -> KanbanResult<ListWithCards> {
        self.commit(|data| data.create_list(board_id, title, order, cards))
            .await
    }

    async fn find_card(&self, org_id: &str, card_id: CardId) -> KanbanResult<Option<Card>> {
        self.memory.find_card(org_id, card_id).await
    }

    async fn find_last_card_order(&self, list_id: ListId) -> KanbanResult<Option<i32>> {
        self.memory.find_last_card_order(list_id).await
    }

    async fn create_card(&self, list_id: ListId, draft: CardDraft) -> KanbanResult<Card> {
        self.commit(|data| data.create_card(list_id, draft)).await
    }

    async fn update_card(
        &self,
        org_id: &str,
        card_id: CardId,
        updates: CardUpdate,
    ) -> KanbanResult<Card> {
        self.commit(|data| data.update_card(org_id, card_id, updates))
            .await
    }

    async fn delete_card(&self, org_id: &str, card_id: CardId) -> KanbanResult<Card> {
        self.commit(|data| data.delete_card(org_id, card_id)).await
    }

    async fn update_list_order(
        &self,
        org_id: &str,
        board_id: BoardId,
        items: &[ListOrder],
    ) -> KanbanResult<Vec<List>> {
        self.commit(|data| data.update_list_order(org_id, board_id, items))
            .await
    }

    async fn update_card_order(
        &self,
        org_id: &str,
        board_id: BoardId,
        items: &[CardOrder],
    ) -> KanbanResult<Vec<Card>> {
        self.commit(|data| data.update_card_order(org_id, board_id, items))
            .await
    }
}
