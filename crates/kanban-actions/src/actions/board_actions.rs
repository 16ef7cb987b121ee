use crate::context::ActionContext;
use crate::safe_action::{failed, SafeAction};
use crate::state::ActionState;
use crate::validation::not_blank;
use async_trait::async_trait;
use kanban_domain::Board;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBoard {
    #[validate(
        length(
            min = 3,
            max = 100,
            message = "Title must be between 3 and 100 characters."
        ),
        custom(function = "not_blank")
    )]
    pub title: String,
}

#[async_trait]
impl SafeAction for CreateBoard {
    type Output = Board;

    fn description(&self) -> String {
        format!("Create board \"{}\"", self.title)
    }

    async fn handle(&self, ctx: &ActionContext, org_id: &str) -> ActionState<Board> {
        match ctx.store.create_board(org_id, &self.title).await {
            Ok(board) => {
                tracing::info!("Created board {} for org {}", board.id, org_id);
                ctx.invalidate_board(board.id);
                ActionState::data(board)
            }
            Err(e) => failed("Failed to create.", e),
        }
    }
}
