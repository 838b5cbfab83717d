//! Error type for `leads-store-sqlite`.

use leads_core::{StoreError, StoreFailure};
use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A stored body decoded to something other than a JSON object.
  #[error("record {0} is not a JSON object")]
  NotAnObject(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl StoreError for Error {
  fn failure(&self) -> StoreFailure {
    match self {
      Self::Database(tokio_rusqlite::Error::ConnectionClosed) => {
        StoreFailure::Unavailable
      }
      Self::Database(tokio_rusqlite::Error::Rusqlite(e)) if is_unreachable(e) => {
        StoreFailure::Unavailable
      }
      _ => StoreFailure::Persistence,
    }
  }
}

/// SQLite result codes meaning the file could not be reached or used at all,
/// as opposed to a statement failing.
fn is_unreachable(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, _)
      if matches!(
        err.code,
        ErrorCode::CannotOpen
          | ErrorCode::DatabaseBusy
          | ErrorCode::DatabaseLocked
          | ErrorCode::SystemIoFailure
      )
  )
}
