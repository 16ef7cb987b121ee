use crate::context::ActionContext;
use crate::safe_action::{failed, SafeAction};
use crate::state::ActionState;
use crate::validation::{not_blank, validate_card_items};
use async_trait::async_trait;
use kanban_domain::{BoardId, Card, CardDraft, CardId, CardOrder, CardUpdate, ListId};
use serde::Deserialize;
use validator::Validate;

const CARD_NOT_FOUND: &str = "Card not Found";

fn next_order(last: Option<i32>) -> i32 {
    last.map_or(1, |order| order + 1)
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCard {
    #[validate(
        length(min = 1, max = 100, message = "Title must be between 1 and 100 characters."),
        custom(function = "not_blank")
    )]
    pub title: String,
    pub board_id: BoardId,
    pub list_id: ListId,
}

#[async_trait]
impl SafeAction for CreateCard {
    type Output = Card;

    fn description(&self) -> String {
        format!("Create card \"{}\" in list {}", self.title, self.list_id)
    }

    async fn handle(&self, ctx: &ActionContext, org_id: &str) -> ActionState<Card> {
        const FAILED: &str = "Failed to create.";

        match ctx.store.find_list(org_id, self.board_id, self.list_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return ActionState::error("List not found"),
            Err(e) => return failed(FAILED, e),
        }
        let order = match ctx.store.find_last_card_order(self.list_id).await {
            Ok(last) => next_order(last),
            Err(e) => return failed(FAILED, e),
        };

        let draft = CardDraft {
            title: self.title.clone(),
            description: None,
            order,
        };
        match ctx.store.create_card(self.list_id, draft).await {
            Ok(card) => {
                tracing::info!("Created card {} at order {}", card.id, order);
                ctx.invalidate_board(self.board_id);
                ActionState::data(card)
            }
            Err(e) => failed(FAILED, e),
        }
    }
}

/// Duplicate a card at the end of its own list.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CopyCard {
    pub id: CardId,
    pub board_id: BoardId,
}

#[async_trait]
impl SafeAction for CopyCard {
    type Output = Card;

    fn description(&self) -> String {
        format!("Copy card {}", self.id)
    }

    async fn handle(&self, ctx: &ActionContext, org_id: &str) -> ActionState<Card> {
        const FAILED: &str = "Failed to copy";

        let source = match ctx.store.find_card(org_id, self.id).await {
            Ok(Some(card)) => card,
            Ok(None) => return ActionState::error(CARD_NOT_FOUND),
            Err(e) => return failed(FAILED, e),
        };
        // Not atomic with the insert below; concurrent copies may share an order.
        let order = match ctx.store.find_last_card_order(source.list_id).await {
            Ok(last) => next_order(last),
            Err(e) => return failed(FAILED, e),
        };

        match ctx
            .store
            .create_card(source.list_id, source.copy_draft(order))
            .await
        {
            Ok(copy) => {
                tracing::info!("Copied card {} to {}", source.id, copy.id);
                ctx.invalidate_board(self.board_id);
                ActionState::data(copy)
            }
            Err(e) => failed(FAILED, e),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCard {
    pub id: CardId,
    pub board_id: BoardId,
}

#[async_trait]
impl SafeAction for DeleteCard {
    type Output = Card;

    fn description(&self) -> String {
        format!("Delete card {}", self.id)
    }

    async fn handle(&self, ctx: &ActionContext, org_id: &str) -> ActionState<Card> {
        match ctx.store.delete_card(org_id, self.id).await {
            Ok(card) => {
                tracing::info!("Deleted card {}", card.id);
                ctx.invalidate_board(self.board_id);
                ActionState::data(card)
            }
            Err(e) if e.is_not_found() => ActionState::error(CARD_NOT_FOUND),
            Err(e) => failed("Failed to delete.", e),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCard {
    pub id: CardId,
    pub board_id: BoardId,
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters."))]
    #[serde(default)]
    pub title: Option<String>,
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Description must be between 1 and 1000 characters."
    ))]
    #[serde(default)]
    pub description: Option<String>,
}

#[async_trait]
impl SafeAction for UpdateCard {
    type Output = Card;

    fn description(&self) -> String {
        format!("Update card {}", self.id)
    }

    async fn handle(&self, ctx: &ActionContext, org_id: &str) -> ActionState<Card> {
        let updates = CardUpdate {
            title: self.title.clone(),
            description: self.description.clone(),
        };
        if updates.is_empty() {
            return ActionState::error("Nothing to update.");
        }
        match ctx.store.update_card(org_id, self.id, updates).await {
            Ok(card) => {
                ctx.invalidate_board(self.board_id);
                ActionState::data(card)
            }
            Err(e) if e.is_not_found() => ActionState::error(CARD_NOT_FOUND),
            Err(e) => failed("Failed to update.", e),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardOrder {
    pub board_id: BoardId,
    #[validate(custom(function = "validate_card_items"))]
    pub items: Vec<CardOrder>,
}

#[async_trait]
impl SafeAction for UpdateCardOrder {
    type Output = Vec<Card>;

    fn description(&self) -> String {
        format!(
            "Reorder {} cards on board {}",
            self.items.len(),
            self.board_id
        )
    }

    async fn handle(&self, ctx: &ActionContext, org_id: &str) -> ActionState<Vec<Card>> {
        match ctx
            .store
            .update_card_order(org_id, self.board_id, &self.items)
            .await
        {
            Ok(cards) => {
                ctx.invalidate_board(self.board_id);
                ActionState::data(cards)
            }
            Err(e) => failed("Failed to reorder.", e),
        }
    }
}
