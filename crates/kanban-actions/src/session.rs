use kanban_core::{Session, SessionResolver};

/// Session fixed at startup, e.g. from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    session: Session,
}

impl StaticSession {
    pub fn new(user_id: Option<String>, org_id: Option<String>) -> Self {
        Self {
            session: Session::new(user_id, org_id),
        }
    }
}

impl SessionResolver for StaticSession {
    fn resolve(&self) -> Session {
        self.session.clone()
    }
}
