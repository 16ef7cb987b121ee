pub mod config;
pub mod error;
pub mod traits;

pub use config::AppConfig;
pub use error::{KanbanError, KanbanResult};
pub use traits::{board_path, LoggingInvalidator, Session, SessionResolver, ViewInvalidator};
