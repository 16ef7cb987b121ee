use crate::cli::DragArgs;
use crate::context::CliContext;
use crate::output;
use kanban_domain::{BoardId, DragEvent};
use kanban_sync::{BoardView, Notification, SyncOutcome};
use serde::Serialize;

#[derive(Serialize)]
struct DragReport {
    /// Absent when the drop changed nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<SyncOutcome>,
    notifications: Vec<Notification>,
    view: BoardView,
}

pub async fn handle(ctx: &CliContext, args: DragArgs) -> anyhow::Result<()> {
    let event: DragEvent = serde_json::from_str(&args.event)
        .map_err(|e| anyhow::anyhow!("Invalid drag event: {}", e))?;
    apply(ctx, args.board_id, event).await
}

/// Runs one gesture through the sync controller and waits for its write.
pub async fn apply(ctx: &CliContext, board_id: BoardId, event: DragEvent) -> anyhow::Result<()> {
    let (mut controller, mut rx) = ctx.controller(board_id).await?;

    let pending = match controller.on_drag_end(&event) {
        Ok(pending) => pending,
        Err(e) => output::output_error(&e.to_string()),
    };
    let outcome = match pending {
        Some(pending) => Some(pending.wait().await),
        None => None,
    };

    let mut notifications = Vec::new();
    while let Ok(notification) = rx.try_recv() {
        notifications.push(notification);
    }

    let report = DragReport {
        outcome: outcome.clone(),
        notifications,
        view: controller.view().clone(),
    };
    match outcome {
        Some(SyncOutcome::Failed { message }) => output::output_error_with(&message, report),
        _ => output::output_success(report),
    }
    Ok(())
}
