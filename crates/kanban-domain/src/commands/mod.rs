use kanban_core::KanbanResult;

pub mod board_commands;
pub mod card_commands;
pub mod list_commands;

pub use board_commands::*;
pub use card_commands::*;
pub use list_commands::*;

/// A single mutation of board data.
///
/// A command either applies completely or returns an error without touching
/// the collections it was given.
pub trait Command: Send + Sync {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()>;

    fn description(&self) -> String;
}

/// The collections a command may change.
pub struct CommandContext<'a> {
    pub boards: &'a mut Vec<crate::Board>,
    pub lists: &'a mut Vec<crate::List>,
    pub cards: &'a mut Vec<crate::Card>,
}
