use super::drag;
use crate::cli::{CardAction, CardMoveArgs, CardUpdateArgs};
use crate::context::CliContext;
use crate::output;
use kanban_actions::{CopyCard, CreateCard, DeleteCard, UpdateCard};
use kanban_domain::{DragEvent, DragLocation};

pub async fn handle(ctx: &CliContext, action: CardAction) -> anyhow::Result<()> {
    match action {
        CardAction::Create {
            board_id,
            list_id,
            title,
        } => {
            let action = CreateCard {
                title,
                board_id,
                list_id,
            };
            output::output_action(ctx.run(action).await);
        }
        CardAction::Copy { board_id, id } => {
            output::output_action(ctx.run(CopyCard { id, board_id }).await);
        }
        CardAction::Update(args) => handle_update(ctx, args).await,
        CardAction::Delete { board_id, id } => {
            output::output_action(ctx.run(DeleteCard { id, board_id }).await);
        }
        CardAction::Move(args) => handle_move(ctx, args).await?,
    }
    Ok(())
}

async fn handle_update(ctx: &CliContext, args: CardUpdateArgs) {
    let action = UpdateCard {
        id: args.id,
        board_id: args.board_id,
        title: args.title,
        description: args.description,
    };
    output::output_action(ctx.run(action).await);
}

async fn handle_move(ctx: &CliContext, args: CardMoveArgs) -> anyhow::Result<()> {
    let event = DragEvent::card(
        DragLocation::new(args.from_list.to_string(), args.from_index),
        DragLocation::new(args.to_list.to_string(), args.to_index),
    );
    drag::apply(ctx, args.board_id, event).await
}
