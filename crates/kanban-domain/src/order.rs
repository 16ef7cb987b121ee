use serde::{Deserialize, Serialize};

use crate::card::{Card, CardId};
use crate::list::{List, ListId};

/// New position of a list within its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOrder {
    pub id: ListId,
    pub order: i32,
}

impl From<&List> for ListOrder {
    fn from(list: &List) -> Self {
        Self {
            id: list.id,
            order: list.order,
        }
    }
}

/// New parent and position of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardOrder {
    pub id: CardId,
    pub list_id: ListId,
    pub order: i32,
}

impl From<&Card> for CardOrder {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            list_id: card.list_id,
            order: card.order,
        }
    }
}

/// The writes a reorder needs persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum OrderUpdate {
    Lists(Vec<ListOrder>),
    Cards(Vec<CardOrder>),
}

impl OrderUpdate {
    pub fn len(&self) -> usize {
        match self {
            OrderUpdate::Lists(items) => items.len(),
            OrderUpdate::Cards(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
