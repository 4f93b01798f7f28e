//! SQLite storage backend for the finance calculator.

mod factory;
mod repository;

pub use factory::SqliteStoreFactory;
pub use repository::{IN_MEMORY, SqliteStore};
