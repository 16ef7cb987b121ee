use crate::context::ActionContext;
use crate::state::{field_errors, ActionState};
use async_trait::async_trait;
use kanban_core::KanbanError;
use validator::Validate;

pub const UNAUTHORIZED: &str = "Unauthorized";

/// An input that can be run as a board action.
///
/// `execute` validates the input, then checks the session, and only then
/// hands over to `handle` with the caller's organization. Invalid input and
/// unauthorized callers never reach the store.
#[async_trait]
pub trait SafeAction: Validate + Send + Sync {
    type Output: Send;

    fn description(&self) -> String;

    async fn handle(&self, ctx: &ActionContext, org_id: &str) -> ActionState<Self::Output>;

    async fn execute(&self, ctx: &ActionContext) -> ActionState<Self::Output> {
        if let Err(errors) = self.validate() {
            tracing::debug!("Rejected {}: {}", self.description(), errors);
            return ActionState::invalid(field_errors(&errors));
        }

        let Some(org_id) = ctx.org_id() else {
            tracing::warn!("Unauthorized: {}", self.description());
            return ActionState::error(UNAUTHORIZED);
        };

        tracing::debug!("Running {} for org {}", self.description(), org_id);
        self.handle(ctx, &org_id).await
    }
}

/// Log a store failure and answer with the action's generic message.
pub(crate) fn failed<T>(message: &str, err: KanbanError) -> ActionState<T> {
    tracing::error!("{}: {}", message, err);
    ActionState::error(message)
}
