mod database;
mod memory;
mod session_store;

pub use database::Database;
pub use memory::InMemorySessionStore;
pub use session_store::SqliteSessionStore;
