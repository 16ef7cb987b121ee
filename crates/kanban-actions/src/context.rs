use kanban_core::{board_path, SessionResolver, ViewInvalidator};
use kanban_persistence::BoardStore;
use std::sync::Arc;

/// Dependencies every action runs against. Built once at startup.
#[derive(Clone)]
pub struct ActionContext {
    pub store: Arc<dyn BoardStore>,
    pub session: Arc<dyn SessionResolver>,
    pub invalidator: Arc<dyn ViewInvalidator>,
}

impl ActionContext {
    pub fn new(
        store: Arc<dyn BoardStore>,
        session: Arc<dyn SessionResolver>,
        invalidator: Arc<dyn ViewInvalidator>,
    ) -> Self {
        Self {
            store,
            session,
            invalidator,
        }
    }

    /// Organization of the caller, if the session has both a user and an
    /// organization.
    pub fn org_id(&self) -> Option<String> {
        self.session
            .resolve()
            .authorized()
            .map(|(_, org_id)| org_id.to_string())
    }

    pub fn invalidate_board(&self, board_id: impl std::fmt::Display) {
        self.invalidator.invalidate(&board_path(board_id));
    }
}
