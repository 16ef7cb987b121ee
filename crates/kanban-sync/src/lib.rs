pub mod controller;
pub mod notification;
pub mod view;

pub use controller::{PendingSync, SyncController, SyncOutcome, SyncPhase};
pub use notification::{ChannelSink, Notification, NotificationKind, NotificationSink};
pub use view::BoardView;
