//! The `LeadStore` gateway trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g. `leads-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::{fmt, future::Future};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::StoreError;

/// A JSON object as handed to [`LeadStore::insert`].
pub type Document = Map<String, Value>;

/// A JSON object as returned by [`LeadStore::query`]: the stored document
/// plus the store-assigned `_id` and `created_at` keys, when the store has
/// them. Nothing about its shape is guaranteed.
pub type RawRecord = Map<String, Value>;

/// Key under which stores report the record identifier.
pub const ID_KEY: &str = "_id";

/// Key under which stores report the creation timestamp.
pub const CREATED_AT_KEY: &str = "created_at";

// ─── Collections ─────────────────────────────────────────────────────────────

/// The logical record types a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
  Lead,
}

impl Collection {
  /// The name under which the collection is persisted.
  pub fn name(self) -> &'static str {
    match self {
      Self::Lead => "lead",
    }
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// An opaque, non-empty record identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
  /// Returns `None` for an empty identifier.
  pub fn new(id: impl Into<String>) -> Option<Self> {
    let id = id.into();
    (!id.is_empty()).then_some(Self(id))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl From<Uuid> for RecordId {
  fn from(id: Uuid) -> Self { Self(id.hyphenated().to_string()) }
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// What the store assigned to a freshly inserted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inserted {
  pub id:         RecordId,
  pub created_at: Option<DateTime<Utc>>,
}

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Exact string equality on top-level document fields, all of which must
/// match. The empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
  conditions: Vec<(String, String)>,
}

impl Filter {
  pub fn all() -> Self { Self::default() }

  /// Add the condition `field == value`.
  pub fn eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
    self.conditions.push((field.into(), value.into()));
    self
  }

  pub fn conditions(&self) -> &[(String, String)] { &self.conditions }

  pub fn is_empty(&self) -> bool { self.conditions.is_empty() }

  /// Evaluate the filter against a record in memory.
  pub fn matches(&self, record: &RawRecord) -> bool {
    self.conditions.iter().all(|(field, value)| {
      record.get(field).and_then(Value::as_str) == Some(value.as_str())
    })
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a document store holding leads.
///
/// Records are immutable once inserted; there is no update or delete.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait LeadStore: Send + Sync {
  type Error: StoreError;

  /// Durably persist `record` in `collection` and return the store-assigned
  /// identifier and timestamp. Any `_id` or `created_at` key in `record` is
  /// discarded; those are assigned by the store only.
  fn insert(
    &self,
    collection: Collection,
    record: Document,
  ) -> impl Future<Output = Result<Inserted, Self::Error>> + Send + '_;

  /// Return up to `limit` records of `collection` matching `filter`, most
  /// recent first. `limit == 0` yields an empty sequence.
  fn query<'a>(
    &'a self,
    collection: Collection,
    filter: &'a Filter,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<RawRecord>, Self::Error>> + Send + 'a;
}
