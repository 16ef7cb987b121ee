use super::{Command, CommandContext};
use crate::ListOrder;
use kanban_core::{KanbanError, KanbanResult};
use uuid::Uuid;

/// Create a new list at the given order
pub struct CreateList {
    pub board_id: Uuid,
    pub title: String,
    pub order: i32,
}

impl Command for CreateList {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        let list = crate::List::new(self.board_id, self.title.clone(), self.order);
        context.lists.push(list);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create list: '{}'", self.title)
    }
}

/// Write new positions for lists of one board
///
/// Every item must name a list of `board_id`; otherwise nothing is written.
pub struct ApplyListOrder {
    pub board_id: Uuid,
    pub items: Vec<ListOrder>,
}

impl Command for ApplyListOrder {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        for item in &self.items {
            let in_board = context
                .lists
                .iter()
                .any(|l| l.id == item.id && l.board_id == self.board_id);
            if !in_board {
                return Err(KanbanError::NotFound(format!("List {}", item.id)));
            }
        }

        for item in &self.items {
            if let Some(list) = context.lists.iter_mut().find(|l| l.id == item.id) {
                list.update_order(item.order);
            }
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Reorder {} list(s) on board {}", self.items.len(), self.board_id)
    }
}
