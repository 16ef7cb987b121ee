use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ")"
);

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "Kanban boards with drag-and-drop ordering", long_about = None)]
#[command(version = VERSION)]
pub struct Cli {
    /// Path to kanban data file (or set KANBAN_FILE env var)
    #[arg(long, value_name = "FILE", env = "KANBAN_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Acting user (or set KANBAN_USER_ID env var)
    #[arg(long, env = "KANBAN_USER_ID", global = true)]
    pub user_id: Option<String>,

    /// Acting organization (or set KANBAN_ORG_ID env var)
    #[arg(long, env = "KANBAN_ORG_ID", global = true)]
    pub org_id: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "FILE", env = "KANBAN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// List operations
    List(ListCommand),
    /// Card operations
    Card(CardCommand),
    /// Apply a raw drag-end event
    Drag(DragArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Create a new board
    Create {
        #[arg(long)]
        title: String,
    },
    /// List boards of the organization
    List,
    /// Show a board with its lists and cards
    Get {
        #[arg(long)]
        id: Uuid,
    },
}

// List commands
#[derive(Args)]
pub struct ListCommand {
    #[command(subcommand)]
    pub action: ListAction,
}

#[derive(Subcommand)]
pub enum ListAction {
    /// Create a list at the end of a board
    Create {
        #[arg(long)]
        board_id: Uuid,
        #[arg(long)]
        title: String,
    },
    /// Copy a list and its cards
    Copy {
        #[arg(long)]
        board_id: Uuid,
        #[arg(long)]
        id: Uuid,
    },
    /// Drag a list to a new position
    Reorder {
        #[arg(long)]
        board_id: Uuid,
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },
}

// Card commands
#[derive(Args)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand)]
pub enum CardAction {
    /// Create a card at the end of a list
    Create {
        #[arg(long)]
        board_id: Uuid,
        #[arg(long)]
        list_id: Uuid,
        #[arg(long)]
        title: String,
    },
    /// Copy a card within its list
    Copy {
        #[arg(long)]
        board_id: Uuid,
        #[arg(long)]
        id: Uuid,
    },
    /// Update a card
    Update(CardUpdateArgs),
    /// Delete a card
    Delete {
        #[arg(long)]
        board_id: Uuid,
        #[arg(long)]
        id: Uuid,
    },
    /// Drag a card within or between lists
    Move(CardMoveArgs),
}

#[derive(Args)]
pub struct CardUpdateArgs {
    #[arg(long)]
    pub board_id: Uuid,
    #[arg(long)]
    pub id: Uuid,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct CardMoveArgs {
    #[arg(long)]
    pub board_id: Uuid,
    #[arg(long)]
    pub from_list: Uuid,
    #[arg(long)]
    pub from_index: usize,
    #[arg(long)]
    pub to_list: Uuid,
    #[arg(long)]
    pub to_index: usize,
}

#[derive(Args)]
pub struct DragArgs {
    #[arg(long)]
    pub board_id: Uuid,
    /// Drag event as JSON: {"type": "list"|"card", "source": .., "destination": ..}
    #[arg(long)]
    pub event: String,
}
