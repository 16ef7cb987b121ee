use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::output;
use kanban_actions::CreateBoard;
use kanban_domain::{Board, ListWithCards};
use serde::Serialize;

#[derive(Serialize)]
struct BoardDetail {
    #[serde(flatten)]
    board: Board,
    lists: Vec<ListWithCards>,
}

pub async fn handle(ctx: &CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::Create { title } => {
            output::output_action(ctx.run(CreateBoard { title }).await);
        }
        BoardAction::List => {
            let org_id = ctx.org_id()?;
            let boards = ctx.store().list_boards(&org_id).await?;
            output::output_list(boards);
        }
        BoardAction::Get { id } => {
            let org_id = ctx.org_id()?;
            let Some(board) = ctx.store().find_board(&org_id, id).await? else {
                output::output_error(&format!("Board not found: {}", id))
            };
            let lists = ctx.store().load_board_view(&org_id, id).await?;
            output::output_success(BoardDetail { board, lists });
        }
    }
    Ok(())
}
