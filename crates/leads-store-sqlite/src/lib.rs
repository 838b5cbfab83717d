//! SQLite backend for the lead store gateway.
//!
//! Records are kept as JSON documents, one row per record, tagged with their
//! collection. Wraps [`tokio_rusqlite`] so all database access runs on a
//! dedicated thread without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
