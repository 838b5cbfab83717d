//! [`StoredLead`] — the read model returned to clients — and the
//! normalization from raw store records into it.
//!
//! Normalization is total: stores may hand back partial or legacy records,
//! and a bad record must never take the listing down. Anything that cannot be
//! understood becomes `None`.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::{
  lead::LeadField,
  store::{CREATED_AT_KEY, ID_KEY, RawRecord, RecordId},
};

/// A lead as returned by the listing endpoint. Every field is nullable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoredLead {
  pub id:           Option<RecordId>,
  pub company_name: Option<String>,
  pub contact_name: Option<String>,
  pub email:        Option<String>,
  pub phone:        Option<String>,
  pub sector:       Option<String>,
  pub city:         Option<String>,
  pub waste_volume: Option<String>,
  pub message:      Option<String>,
  pub created_at:   Option<DateTime<Utc>>,
}

impl StoredLead {
  /// Map a raw record field-by-field into the output schema.
  ///
  /// The identifier is read from `_id`, falling back to `id` so that an
  /// already-normalized record normalizes to itself.
  pub fn normalize(raw: &RawRecord) -> Self {
    let text = |field: LeadField| {
      raw
        .get(field.as_str())
        .and_then(Value::as_str)
        .map(str::to_owned)
    };

    let id = raw
      .get(ID_KEY)
      .filter(|v| !v.is_null())
      .or_else(|| raw.get("id"))
      .and_then(decode_id);

    Self {
      id,
      company_name: text(LeadField::CompanyName),
      contact_name: text(LeadField::ContactName),
      email: text(LeadField::Email),
      phone: text(LeadField::Phone),
      sector: text(LeadField::Sector),
      city: text(LeadField::City),
      waste_volume: text(LeadField::WasteVolume),
      message: text(LeadField::Message),
      created_at: raw.get(CREATED_AT_KEY).and_then(decode_timestamp),
    }
  }

  /// Re-encode as a raw record; `normalize(&lead.to_record()) == lead`.
  pub fn to_record(&self) -> RawRecord {
    let mut record = RawRecord::new();
    record.insert(
      ID_KEY.to_owned(),
      self
        .id
        .as_ref()
        .map_or(Value::Null, |id| Value::String(id.to_string())),
    );
    for field in LeadField::ALL {
      let value = self
        .field(field)
        .map_or(Value::Null, |v| Value::String(v.to_owned()));
      record.insert(field.as_str().to_owned(), value);
    }
    record.insert(
      CREATED_AT_KEY.to_owned(),
      self.created_at.map_or(Value::Null, |at| {
        Value::String(at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
      }),
    );
    record
  }

  pub fn field(&self, field: LeadField) -> Option<&str> {
    match field {
      LeadField::CompanyName => self.company_name.as_deref(),
      LeadField::ContactName => self.contact_name.as_deref(),
      LeadField::Email => self.email.as_deref(),
      LeadField::Phone => self.phone.as_deref(),
      LeadField::Sector => self.sector.as_deref(),
      LeadField::City => self.city.as_deref(),
      LeadField::WasteVolume => self.waste_volume.as_deref(),
      LeadField::Message => self.message.as_deref(),
    }
  }
}

/// Canonical string form of a stored identifier: strings as-is, numbers in
/// decimal, and extended-JSON `{"$oid": "..."}` wrappers unwrapped.
fn decode_id(value: &Value) -> Option<RecordId> {
  match value {
    Value::String(s) => RecordId::new(s.as_str()),
    Value::Number(n) => RecordId::new(n.to_string()),
    Value::Object(obj) => obj.get("$oid").and_then(Value::as_str).and_then(RecordId::new),
    _ => None,
  }
}

/// RFC 3339 strings, offset-less ISO 8601 strings (taken as UTC), Unix
/// milliseconds, or extended-JSON `{"$date": ...}` wrapping either.
fn decode_timestamp(value: &Value) -> Option<DateTime<Utc>> {
  match value {
    Value::String(s) => DateTime::parse_from_rfc3339(s)
      .map(|dt| dt.with_timezone(&Utc))
      .ok()
      .or_else(|| {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
          .ok()
          .map(|naive| naive.and_utc())
      }),
    Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
    Value::Object(obj) => obj.get("$date").and_then(decode_timestamp),
    _ => None,
  }
}
