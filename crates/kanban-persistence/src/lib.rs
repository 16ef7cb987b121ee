//! Board storage: the `BoardStore` trait with in-memory, JSON file and
//! SQLite implementations.

pub mod store;
pub mod traits;

pub use store::*;
pub use traits::*;
