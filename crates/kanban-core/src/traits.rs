/// Caller identity as resolved from the session.
///
/// Either field may be absent; callers treat a missing user or a missing
/// organization as unauthorized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<String>,
    pub org_id: Option<String>,
}

impl Session {
    pub fn new(user_id: Option<String>, org_id: Option<String>) -> Self {
        Self { user_id, org_id }
    }

    /// Returns `(user_id, org_id)` when both are present and non-empty.
    pub fn authorized(&self) -> Option<(&str, &str)> {
        let user_id = self.user_id.as_deref().filter(|s| !s.is_empty())?;
        let org_id = self.org_id.as_deref().filter(|s| !s.is_empty())?;
        Some((user_id, org_id))
    }
}

/// Resolves the identity of whoever is calling an action.
#[cfg_attr(test, mockall::automock)]
pub trait SessionResolver: Send + Sync {
    fn resolve(&self) -> Session;
}

/// Marks rendered views stale after a successful mutation.
#[cfg_attr(test, mockall::automock)]
pub trait ViewInvalidator: Send + Sync {
    fn invalidate(&self, path: &str);
}

/// Path of the page that renders a board.
pub fn board_path(board_id: impl std::fmt::Display) -> String {
    format!("/board/{}", board_id)
}

/// Invalidator that only records the invalidation in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingInvalidator;

impl ViewInvalidator for LoggingInvalidator {
    fn invalidate(&self, path: &str) {
        tracing::debug!("Invalidated view {}", path);
    }
}
