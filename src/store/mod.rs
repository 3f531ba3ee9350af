mod entries;
mod recall;
mod schema;
mod status;

pub use entries::MemoryEntry;
pub use recall::inject_context;
pub use schema::{default_db_path, MemoryStore};
pub use status::StoreStatus;

#[cfg(test)]
pub(crate) use schema::tests as schema_tests;
