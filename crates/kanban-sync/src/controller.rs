use crate::notification::{NotificationKind, NotificationSink};
use crate::view::BoardView;
use kanban_actions::{ActionContext, SafeAction, UpdateCardOrder, UpdateListOrder};
use kanban_domain::{apply_drag, DragEvent, ListWithCards, OrderUpdate, ReorderError};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Where the most recent gesture is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Computing,
    CommittedLocally,
    Persisting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SyncOutcome {
    Persisted { items: usize },
    Failed { message: String },
}

/// Background persistence of one gesture.
///
/// Dropping it does not cancel the write.
#[derive(Debug)]
pub struct PendingSync {
    handle: JoinHandle<SyncOutcome>,
}

impl PendingSync {
    pub async fn wait(self) -> SyncOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => SyncOutcome::Failed {
                message: e.to_string(),
            },
        }
    }
}

/// Applies drags to the local board view right away and persists them in
/// the background.
///
/// Local state is never rolled back when persistence fails; the user is told
/// through the notification sink and the next `replace_data` corrects it.
/// Gestures are not sequenced: each one spawns its own write.
pub struct SyncController {
    view: BoardView,
    actions: ActionContext,
    sink: Arc<dyn NotificationSink>,
    phase: Arc<watch::Sender<SyncPhase>>,
}

impl SyncController {
    pub fn new(view: BoardView, actions: ActionContext, sink: Arc<dyn NotificationSink>) -> Self {
        let (phase, _) = watch::channel(SyncPhase::Idle);
        Self {
            view,
            actions,
            sink,
            phase: Arc::new(phase),
        }
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn phase(&self) -> SyncPhase {
        *self.phase.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncPhase> {
        self.phase.subscribe()
    }

    /// Reset the local arrangement from freshly loaded data.
    pub fn replace_data(&mut self, lists: Vec<ListWithCards>) {
        tracing::debug!("Replacing board view with {} lists", lists.len());
        self.view.lists = lists;
    }

    pub fn on_drag_end(
        &mut self,
        event: &DragEvent,
    ) -> Result<Option<PendingSync>, ReorderError> {
        self.phase.send_replace(SyncPhase::Computing);

        let reordered = match apply_drag(&self.view.lists, event) {
            Ok(Some(reordered)) => reordered,
            Ok(None) => {
                self.phase.send_replace(SyncPhase::Idle);
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!("Drag rejected: {}", e);
                self.sink.notify(NotificationKind::Error, &e.to_string());
                self.phase.send_replace(SyncPhase::Idle);
                return Err(e);
            }
        };

        self.view.lists = reordered.lists;
        self.phase.send_replace(SyncPhase::CommittedLocally);

        let board_id = self.view.board_id;
        let ctx = self.actions.clone();
        let sink = Arc::clone(&self.sink);
        let phase = Arc::clone(&self.phase);

        let handle = match reordered.update {
            OrderUpdate::Lists(items) => tokio::spawn(persist(
                UpdateListOrder { board_id, items },
                ctx,
                "List reordered",
                sink,
                phase,
            )),
            OrderUpdate::Cards(items) => tokio::spawn(persist(
                UpdateCardOrder { board_id, items },
                ctx,
                "Card reordered",
                sink,
                phase,
            )),
        };

        Ok(Some(PendingSync { handle }))
    }
}

async fn persist<A>(
    action: A,
    ctx: ActionContext,
    success: &'static str,
    sink: Arc<dyn NotificationSink>,
    phase: Arc<watch::Sender<SyncPhase>>,
) -> SyncOutcome
where
    A: SafeAction,
    A::Output: IntoIterator,
{
    phase.send_replace(SyncPhase::Persisting);

    match action.execute(&ctx).await.into_result() {
        Ok(saved) => {
            sink.notify(NotificationKind::Success, success);
            phase.send_replace(SyncPhase::Succeeded);
            SyncOutcome::Persisted {
                items: saved.into_iter().count(),
            }
        }
        Err(message) => {
            sink.notify(NotificationKind::Error, &message);
            phase.send_replace(SyncPhase::Failed);
            SyncOutcome::Failed { message }
        }
    }
}
