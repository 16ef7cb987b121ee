use crate::context::ActionContext;
use crate::safe_action::{failed, SafeAction};
use crate::state::ActionState;
use crate::validation::{not_blank, validate_list_items};
use async_trait::async_trait;
use kanban_domain::{BoardId, List, ListId, ListOrder, ListWithCards};
use serde::Deserialize;
use validator::Validate;

fn next_order(last: Option<i32>) -> i32 {
    last.map_or(1, |order| order + 1)
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateList {
    #[validate(
        length(min = 1, max = 100, message = "Title must be between 1 and 100 characters."),
        custom(function = "not_blank")
    )]
    pub title: String,
    pub board_id: BoardId,
}

#[async_trait]
impl SafeAction for CreateList {
    type Output = List;

    fn description(&self) -> String {
        format!("Create list \"{}\" on board {}", self.title, self.board_id)
    }

    async fn handle(&self, ctx: &ActionContext, org_id: &str) -> ActionState<List> {
        const FAILED: &str = "Failed to create.";

        match ctx.store.find_board(org_id, self.board_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return ActionState::error("Board not found"),
            Err(e) => return failed(FAILED, e),
        }
        let order = match ctx.store.find_last_list_order(self.board_id).await {
            Ok(last) => next_order(last),
            Err(e) => return failed(FAILED, e),
        };

        match ctx
            .store
            .create_list(self.board_id, &self.title, order, Vec::new())
            .await
        {
            Ok(created) => {
                tracing::info!("Created list {} at order {}", created.id(), order);
                ctx.invalidate_board(self.board_id);
                ActionState::data(created.list)
            }
            Err(e) => failed(FAILED, e),
        }
    }
}

/// Duplicate a list with all of its cards at the end of the board.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CopyList {
    pub id: ListId,
    pub board_id: BoardId,
}

#[async_trait]
impl SafeAction for CopyList {
    type Output = ListWithCards;

    fn description(&self) -> String {
        format!("Copy list {} on board {}", self.id, self.board_id)
    }

    async fn handle(&self, ctx: &ActionContext, org_id: &str) -> ActionState<ListWithCards> {
        const FAILED: &str = "Failed to copy.";

        let source = match ctx.store.find_list(org_id, self.board_id, self.id).await {
            Ok(Some(source)) => source,
            Ok(None) => return ActionState::error("List not found"),
            Err(e) => return failed(FAILED, e),
        };
        let order = match ctx.store.find_last_list_order(self.board_id).await {
            Ok(last) => next_order(last),
            Err(e) => return failed(FAILED, e),
        };

        let drafts = source.cards.iter().map(|card| card.to_draft()).collect();
        match ctx
            .store
            .create_list(self.board_id, &source.list.copy_title(), order, drafts)
            .await
        {
            Ok(copy) => {
                tracing::info!(
                    "Copied list {} to {} with {} cards",
                    self.id,
                    copy.id(),
                    copy.cards.len()
                );
                ctx.invalidate_board(self.board_id);
                ActionState::data(copy)
            }
            Err(e) => failed(FAILED, e),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListOrder {
    pub board_id: BoardId,
    #[validate(custom(function = "validate_list_items"))]
    pub items: Vec<ListOrder>,
}

#[async_trait]
impl SafeAction for UpdateListOrder {
    type Output = Vec<List>;

    fn description(&self) -> String {
        format!(
            "Reorder {} lists on board {}",
            self.items.len(),
            self.board_id
        )
    }

    async fn handle(&self, ctx: &ActionContext, org_id: &str) -> ActionState<Vec<List>> {
        match ctx
            .store
            .update_list_order(org_id, self.board_id, &self.items)
            .await
        {
            Ok(lists) => {
                ctx.invalidate_board(self.board_id);
                ActionState::data(lists)
            }
            Err(e) => failed("Failed to reorder.", e),
        }
    }
}
