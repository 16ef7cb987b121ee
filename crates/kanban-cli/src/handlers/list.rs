use super::drag;
use crate::cli::ListAction;
use crate::context::CliContext;
use crate::output;
use kanban_actions::{CopyList, CreateList};
use kanban_domain::DragEvent;

pub async fn handle(ctx: &CliContext, action: ListAction) -> anyhow::Result<()> {
    match action {
        ListAction::Create { board_id, title } => {
            output::output_action(ctx.run(CreateList { title, board_id }).await);
        }
        ListAction::Copy { board_id, id } => {
            output::output_action(ctx.run(CopyList { id, board_id }).await);
        }
        ListAction::Reorder { board_id, from, to } => {
            drag::apply(ctx, board_id, DragEvent::list(from, to)).await?;
        }
    }
    Ok(())
}
