use crate::cli::Cli;
use kanban_actions::{ActionContext, ActionState, SafeAction, StaticSession};
use kanban_core::{AppConfig, KanbanError, LoggingInvalidator};
use kanban_domain::BoardId;
use kanban_persistence::{BoardStore, JsonFileStore};
use kanban_sync::{BoardView, ChannelSink, Notification, SyncController};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Store and session for one CLI invocation.
///
/// Flags and environment variables win over the config file.
pub struct CliContext {
    actions: ActionContext,
}

impl CliContext {
    pub async fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config = match &cli.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(),
        };

        let file_path = cli
            .file
            .clone()
            .or(config.data_file)
            .ok_or_else(|| anyhow::anyhow!("--file is required for CLI operations"))?;
        let session = StaticSession::new(
            cli.user_id.clone().or(config.user_id),
            cli.org_id.clone().or(config.org_id),
        );

        let store = open_store(&file_path).await?;
        Ok(Self {
            actions: ActionContext::new(store, Arc::new(session), Arc::new(LoggingInvalidator)),
        })
    }

    pub fn store(&self) -> &dyn BoardStore {
        &*self.actions.store
    }

    pub async fn run<A: SafeAction>(&self, action: A) -> ActionState<A::Output> {
        action.execute(&self.actions).await
    }

    /// Organization for reads that bypass the actions.
    pub fn org_id(&self) -> anyhow::Result<String> {
        Ok(self.actions.org_id().ok_or(KanbanError::Unauthorized)?)
    }

    /// Loads the board as the user sees it and wraps it in a controller
    /// whose notifications arrive on the returned receiver.
    pub async fn controller(
        &self,
        board_id: BoardId,
    ) -> anyhow::Result<(SyncController, UnboundedReceiver<Notification>)> {
        let org_id = self.org_id()?;
        let lists = self.store().load_board_view(&org_id, board_id).await?;

        let (sink, rx) = ChannelSink::channel();
        let controller = SyncController::new(
            BoardView::new(board_id, lists),
            self.actions.clone(),
            Arc::new(sink),
        );
        Ok((controller, rx))
    }
}

#[cfg(feature = "sqlite")]
async fn open_store(path: &Path) -> anyhow::Result<Arc<dyn BoardStore>> {
    let is_sqlite = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("db" | "sqlite" | "sqlite3")
    );
    if is_sqlite {
        tracing::debug!("Using SQLite store at {}", path.display());
        return Ok(Arc::new(kanban_persistence::SqliteStore::new(path)));
    }
    Ok(Arc::new(JsonFileStore::open(path).await?))
}

#[cfg(not(feature = "sqlite"))]
async fn open_store(path: &Path) -> anyhow::Result<Arc<dyn BoardStore>> {
    Ok(Arc::new(JsonFileStore::open(path).await?))
}
