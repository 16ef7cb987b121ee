use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::board::BoardId;
use crate::card::Card;

pub type ListId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: ListId,
    pub board_id: BoardId,
    pub title: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl List {
    pub fn new(board_id: BoardId, title: String, order: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            board_id,
            title,
            order,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_order(&mut self, order: i32) {
        self.order = order;
        self.updated_at = Utc::now();
    }

    pub fn copy_title(&self) -> String {
        format!("{} - Copy", self.title)
    }
}

/// A list together with its cards, in the shape a board page renders.
///
/// `cards` defaults to empty when absent from the serialized form, so every
/// container gets its own empty sequence rather than sharing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListWithCards {
    #[serde(flatten)]
    pub list: List,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl ListWithCards {
    pub fn new(list: List, cards: Vec<Card>) -> Self {
        Self { list, cards }
    }

    pub fn id(&self) -> ListId {
        self.list.id
    }
}
