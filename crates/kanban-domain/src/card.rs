use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::list::ListId;

pub type CardId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub list_id: ListId,
    pub title: String,
    pub description: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Content edits for a card. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl CardUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// Field values for a card that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    pub title: String,
    pub description: Option<String>,
    pub order: i32,
}

impl Card {
    pub fn new(list_id: ListId, title: String, order: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            list_id,
            title,
            description: None,
            order,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_draft(list_id: ListId, draft: CardDraft) -> Self {
        let mut card = Self::new(list_id, draft.title, draft.order);
        card.description = draft.description;
        card
    }

    /// Draft carrying this card's content and order unchanged.
    pub fn to_draft(&self) -> CardDraft {
        CardDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            order: self.order,
        }
    }

    /// Draft of the duplicate this card produces when copied to `order`.
    pub fn copy_draft(&self, order: i32) -> CardDraft {
        CardDraft {
            title: format!("{} - Copy", self.title),
            description: self.description.clone(),
            order,
        }
    }

    pub fn update(&mut self, updates: CardUpdate) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        if let Some(description) = updates.description {
            self.description = Some(description);
        }
        self.updated_at = Utc::now();
    }

    pub fn move_to_list(&mut self, list_id: ListId, order: i32) {
        self.list_id = list_id;
        self.order = order;
        self.updated_at = Utc::now();
    }
}
