use super::{Command, CommandContext};
use kanban_core::KanbanResult;

/// Create a new board owned by an organization
pub struct CreateBoard {
    pub org_id: String,
    pub title: String,
}

impl Command for CreateBoard {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        let board = crate::Board::new(self.org_id.clone(), self.title.clone());
        context.boards.push(board);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create board: '{}'", self.title)
    }
}
