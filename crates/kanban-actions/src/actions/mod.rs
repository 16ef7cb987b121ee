pub mod board_actions;
pub mod card_actions;
pub mod list_actions;

pub use board_actions::*;
pub use card_actions::*;
pub use list_actions::*;
