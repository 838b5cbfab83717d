//! Encoding and decoding helpers between store types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings (microsecond
//! precision, `Z` suffix) so that lexical order is chronological. Record
//! identifiers are hyphenated lowercase UUID v4 strings.

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use leads_core::store::{CREATED_AT_KEY, Document, ID_KEY, RawRecord, RecordId};
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Identifiers ─────────────────────────────────────────────────────────────

pub fn new_record_id() -> RecordId { RecordId::from(Uuid::new_v4()) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// The current time at the precision the store keeps.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ─── Documents ───────────────────────────────────────────────────────────────

/// Serialise a document body, dropping the store-assigned keys.
pub fn encode_body(mut record: Document) -> Result<String> {
  record.remove(ID_KEY);
  record.remove(CREATED_AT_KEY);
  Ok(serde_json::to_string(&record)?)
}

/// Raw strings read directly from a `documents` row.
pub struct RawDocument {
  pub record_id:  String,
  pub body:       String,
  pub created_at: String,
}

impl RawDocument {
  /// The stored body with `_id` and `created_at` merged back in.
  pub fn into_record(self) -> Result<RawRecord> {
    let mut record = match serde_json::from_str(&self.body)? {
      Value::Object(map) => map,
      _ => return Err(Error::NotAnObject(self.record_id)),
    };
    record.insert(ID_KEY.to_owned(), Value::String(self.record_id));
    record.insert(CREATED_AT_KEY.to_owned(), Value::String(self.created_at));
    Ok(record)
  }
}
