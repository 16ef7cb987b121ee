pub mod actions;
pub mod context;
pub mod safe_action;
pub mod session;
pub mod state;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use actions::*;
pub use context::ActionContext;
pub use safe_action::{SafeAction, UNAUTHORIZED};
pub use session::StaticSession;
pub use state::{describe_field_errors, ActionState, FieldErrors};
