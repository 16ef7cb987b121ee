use super::{Command, CommandContext};
use crate::{CardDraft, CardOrder, CardUpdate};
use kanban_core::{KanbanError, KanbanResult};
use uuid::Uuid;

/// Create a new card in a list
pub struct CreateCard {
    pub list_id: Uuid,
    pub draft: CardDraft,
}

impl Command for CreateCard {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        let card = crate::Card::from_draft(self.list_id, self.draft.clone());
        context.cards.push(card);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create card: '{}'", self.draft.title)
    }
}

/// Update card content (title, description)
pub struct UpdateCard {
    pub card_id: Uuid,
    pub updates: CardUpdate,
}

impl Command for UpdateCard {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        if self.updates.is_empty() {
            return Err(KanbanError::Validation("Nothing to update".into()));
        }
        let card = context
            .cards
            .iter_mut()
            .find(|c| c.id == self.card_id)
            .ok_or_else(|| KanbanError::NotFound(format!("Card {}", self.card_id)))?;
        card.update(self.updates.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Update card {}", self.card_id)
    }
}

/// Permanently delete a card
pub struct DeleteCard {
    pub card_id: Uuid,
}

impl Command for DeleteCard {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        let before = context.cards.len();
        context.cards.retain(|c| c.id != self.card_id);
        if context.cards.len() == before {
            return Err(KanbanError::NotFound(format!("Card {}", self.card_id)));
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete card {}", self.card_id)
    }
}

/// Write new parents and positions for a batch of cards
///
/// Every card and every target list must exist; otherwise nothing is written.
pub struct ApplyCardOrder {
    pub items: Vec<CardOrder>,
}

impl Command for ApplyCardOrder {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        for item in &self.items {
            if !context.cards.iter().any(|c| c.id == item.id) {
                return Err(KanbanError::NotFound(format!("Card {}", item.id)));
            }
            if !context.lists.iter().any(|l| l.id == item.list_id) {
                return Err(KanbanError::NotFound(format!("List {}", item.list_id)));
            }
        }

        for item in &self.items {
            if let Some(card) = context.cards.iter_mut().find(|c| c.id == item.id) {
                card.move_to_list(item.list_id, item.order);
            }
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Reorder {} card(s)", self.items.len())
    }
}
