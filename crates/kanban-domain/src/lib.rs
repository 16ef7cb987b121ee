pub mod board;
pub mod card;
pub mod commands;
pub mod drag;
pub mod list;
pub mod order;
pub mod reorder;

pub use board::{Board, BoardId};
pub use card::{Card, CardDraft, CardId, CardUpdate};
pub use drag::{DragEvent, DragLocation, DragMove, LISTS_DROPPABLE_ID};
pub use list::{List, ListId, ListWithCards};
pub use order::{CardOrder, ListOrder, OrderUpdate};
pub use reorder::{apply_drag, reorder, ReorderError, Reordered};
