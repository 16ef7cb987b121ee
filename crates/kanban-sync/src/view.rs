use kanban_domain::{BoardId, ListWithCards};
use serde::Serialize;

/// The arrangement of a board as currently shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub board_id: BoardId,
    pub lists: Vec<ListWithCards>,
}

impl BoardView {
    pub fn new(board_id: BoardId, lists: Vec<ListWithCards>) -> Self {
        Self { board_id, lists }
    }

    pub fn list_titles(&self) -> Vec<&str> {
        self.lists.iter().map(|l| l.list.title.as_str()).collect()
    }
}
