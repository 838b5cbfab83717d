//! The lead schema and its validator.
//!
//! A [`Lead`] can only be obtained through [`Lead::validate`], so holding one
//! is proof that every field constraint was checked. Leads are never updated
//! after validation.

use std::fmt;

use email_address::EmailAddress;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
  error::{Constraint, FieldError, ValidationErrors},
  store::Document,
};

// ─── Fields ──────────────────────────────────────────────────────────────────

/// The submitted fields of a lead, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
  CompanyName,
  ContactName,
  Email,
  Phone,
  /// Free-form activity label, e.g. "institutional catering" or "retail".
  Sector,
  City,
  /// Free-form description of weekly waste volume.
  WasteVolume,
  Message,
}

impl LeadField {
  pub const ALL: [Self; 8] = [
    Self::CompanyName,
    Self::ContactName,
    Self::Email,
    Self::Phone,
    Self::Sector,
    Self::City,
    Self::WasteVolume,
    Self::Message,
  ];

  /// The key used in submissions, stored documents and API output.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::CompanyName => "company_name",
      Self::ContactName => "contact_name",
      Self::Email => "email",
      Self::Phone => "phone",
      Self::Sector => "sector",
      Self::City => "city",
      Self::WasteVolume => "waste_volume",
      Self::Message => "message",
    }
  }

  pub fn is_required(self) -> bool {
    matches!(self, Self::CompanyName | Self::ContactName | Self::Email)
  }

  /// Minimum length in characters, measured after trimming.
  pub fn min_len(self) -> Option<usize> {
    match self {
      Self::CompanyName | Self::ContactName => Some(2),
      _ => None,
    }
  }

  /// Maximum length in characters.
  pub fn max_len(self) -> Option<usize> {
    match self {
      Self::CompanyName | Self::ContactName | Self::City => Some(120),
      Self::Phone => Some(30),
      Self::Message => Some(2000),
      Self::Email | Self::Sector | Self::WasteVolume => None,
    }
  }

  pub(crate) fn format_name(self) -> &'static str {
    match self {
      Self::Email => "email address",
      _ => "value",
    }
  }
}

impl fmt::Display for LeadField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Lead ────────────────────────────────────────────────────────────────────

/// A validated contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
  company_name: String,
  contact_name: String,
  email:        String,
  phone:        Option<String>,
  sector:       Option<String>,
  city:         Option<String>,
  waste_volume: Option<String>,
  message:      Option<String>,
}

impl Lead {
  /// Validate an arbitrary JSON submission.
  ///
  /// Every field is checked and all failures are reported together. Unknown
  /// keys (including any client-supplied `_id` or `created_at`) are ignored.
  /// A non-object input behaves like an empty object. Values are kept exactly
  /// as submitted.
  pub fn validate(input: &Value) -> Result<Self, ValidationErrors> {
    let empty = Map::new();
    let mut checker = Checker {
      fields: input.as_object().unwrap_or(&empty),
      errors: Vec::new(),
    };

    let company_name = checker.required(LeadField::CompanyName);
    let contact_name = checker.required(LeadField::ContactName);
    let email = checker.required(LeadField::Email);
    let phone = checker.optional(LeadField::Phone);
    let sector = checker.optional(LeadField::Sector);
    let city = checker.optional(LeadField::City);
    let waste_volume = checker.optional(LeadField::WasteVolume);
    let message = checker.optional(LeadField::Message);

    match (company_name, contact_name, email) {
      (Some(company_name), Some(contact_name), Some(email))
        if checker.errors.is_empty() =>
      {
        Ok(Self {
          company_name,
          contact_name,
          email,
          phone,
          sector,
          city,
          waste_volume,
          message,
        })
      }
      _ => Err(ValidationErrors(checker.errors)),
    }
  }

  pub fn company_name(&self) -> &str { &self.company_name }

  pub fn contact_name(&self) -> &str { &self.contact_name }

  pub fn email(&self) -> &str { &self.email }

  pub fn phone(&self) -> Option<&str> { self.phone.as_deref() }

  pub fn sector(&self) -> Option<&str> { self.sector.as_deref() }

  pub fn city(&self) -> Option<&str> { self.city.as_deref() }

  pub fn waste_volume(&self) -> Option<&str> { self.waste_volume.as_deref() }

  pub fn message(&self) -> Option<&str> { self.message.as_deref() }

  /// Look up a field by name; `None` only for absent optional fields.
  pub fn get(&self, field: LeadField) -> Option<&str> {
    match field {
      LeadField::CompanyName => Some(self.company_name()),
      LeadField::ContactName => Some(self.contact_name()),
      LeadField::Email => Some(self.email()),
      LeadField::Phone => self.phone(),
      LeadField::Sector => self.sector(),
      LeadField::City => self.city(),
      LeadField::WasteVolume => self.waste_volume(),
      LeadField::Message => self.message(),
    }
  }

  /// The document handed to the store on insertion: all eight fields, absent
  /// optionals as `null`. Store metadata is never part of it.
  pub fn to_document(&self) -> Document {
    LeadField::ALL
      .iter()
      .map(|&field| {
        let value = self
          .get(field)
          .map_or(Value::Null, |v| Value::String(v.to_owned()));
        (field.as_str().to_owned(), value)
      })
      .collect()
  }
}

/// `local-part@domain`, the domain holding at least one inner dot, no
/// whitespace anywhere, and RFC 5322 syntax otherwise.
pub fn is_valid_email(candidate: &str) -> bool {
  if candidate.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = candidate.rsplit_once('@') else {
    return false;
  };
  !local.is_empty()
    && domain.contains('.')
    && !domain.starts_with('.')
    && !domain.ends_with('.')
    && !domain.contains("..")
    && EmailAddress::is_valid(candidate)
}

// ─── Checker ─────────────────────────────────────────────────────────────────

enum Slot<'a> {
  Absent,
  Invalid,
  Text(&'a str),
}

struct Checker<'a> {
  fields: &'a Map<String, Value>,
  errors: Vec<FieldError>,
}

impl<'a> Checker<'a> {
  fn fail(&mut self, field: LeadField, constraint: Constraint) {
    self.errors.push(FieldError { field, constraint });
  }

  fn lookup(&mut self, field: LeadField) -> Slot<'a> {
    match self.fields.get(field.as_str()) {
      None | Some(Value::Null) => Slot::Absent,
      Some(Value::String(s)) => Slot::Text(s),
      Some(_) => {
        self.fail(field, Constraint::InvalidType);
        Slot::Invalid
      }
    }
  }

  fn required(&mut self, field: LeadField) -> Option<String> {
    match self.lookup(field) {
      Slot::Absent => {
        self.fail(field, Constraint::MissingField);
        None
      }
      Slot::Invalid => None,
      Slot::Text(s) if field.min_len().is_none() && s.trim().is_empty() => {
        self.fail(field, Constraint::MissingField);
        None
      }
      Slot::Text(s) => self.check(field, s).then(|| s.to_owned()),
    }
  }

  fn optional(&mut self, field: LeadField) -> Option<String> {
    match self.lookup(field) {
      Slot::Text(s) => self.check(field, s).then(|| s.to_owned()),
      Slot::Absent | Slot::Invalid => None,
    }
  }

  /// Apply the length and format rules for `field`; `true` if all pass.
  fn check(&mut self, field: LeadField, value: &str) -> bool {
    let before = self.errors.len();

    if let Some(min) = field.min_len()
      && value.trim().chars().count() < min
    {
      self.fail(field, Constraint::TooShort(min));
    }
    if let Some(max) = field.max_len()
      && value.chars().count() > max
    {
      self.fail(field, Constraint::TooLong(max));
    }
    if field == LeadField::Email && !is_valid_email(value) {
      self.fail(field, Constraint::InvalidFormat);
    }

    self.errors.len() == before
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn minimal() -> Value {
    json!({
      "company_name": "Acme Corp",
      "contact_name": "Jane Doe",
      "email": "jane@acme.com",
    })
  }

  fn with(field: &str, value: Value) -> Value {
    let mut input = minimal();
    input[field] = value;
    input
  }

  #[test]
  fn minimal_submission_is_valid() {
    let lead = Lead::validate(&minimal()).unwrap();
    assert_eq!(lead.company_name(), "Acme Corp");
    assert_eq!(lead.contact_name(), "Jane Doe");
    assert_eq!(lead.email(), "jane@acme.com");
    assert_eq!(lead.phone(), None);
    assert_eq!(lead.message(), None);
  }

  #[test]
  fn full_submission_keeps_every_field() {
    let input = json!({
      "company_name": "Cantine Centrale",
      "contact_name": "Marc Petit",
      "email": "marc@cantine.fr",
      "phone": "+33 1 23 45 67 89",
      "sector": "institutional catering",
      "city": "Lyon",
      "waste_volume": "300 kg/week",
      "message": "Please call back in the morning.",
    });
    let lead = Lead::validate(&input).unwrap();
    for field in LeadField::ALL {
      assert_eq!(lead.get(field), input[field.as_str()].as_str(), "{field}");
    }
  }

  #[test]
  fn short_names_are_rejected() {
    let errors = Lead::validate(&with("company_name", json!("A"))).unwrap_err();
    assert_eq!(errors.errors().len(), 1);
    assert_eq!(
      errors.for_field(LeadField::CompanyName),
      Some(Constraint::TooShort(2))
    );

    let errors = Lead::validate(&with("contact_name", json!("J"))).unwrap_err();
    assert_eq!(
      errors.for_field(LeadField::ContactName),
      Some(Constraint::TooShort(2))
    );
  }

  #[test]
  fn length_is_measured_after_trimming() {
    let errors =
      Lead::validate(&with("company_name", json!("  A  "))).unwrap_err();
    assert_eq!(
      errors.for_field(LeadField::CompanyName),
      Some(Constraint::TooShort(2))
    );

    let errors = Lead::validate(&with("contact_name", json!("   "))).unwrap_err();
    assert_eq!(
      errors.for_field(LeadField::ContactName),
      Some(Constraint::TooShort(2))
    );
  }

  #[test]
  fn length_counts_characters_not_bytes() {
    // Two characters, four bytes.
    assert!(Lead::validate(&with("company_name", json!("Éé"))).is_ok());
    let long_city = "é".repeat(120);
    assert!(Lead::validate(&with("city", json!(long_city))).is_ok());
  }

  #[test]
  fn upper_bounds_are_enforced() {
    let cases = [
      ("company_name", 121, LeadField::CompanyName, 120),
      ("contact_name", 121, LeadField::ContactName, 120),
      ("phone", 31, LeadField::Phone, 30),
      ("city", 121, LeadField::City, 120),
      ("message", 2001, LeadField::Message, 2000),
    ];
    for (key, len, field, max) in cases {
      let errors = Lead::validate(&with(key, json!("x".repeat(len)))).unwrap_err();
      assert_eq!(errors.for_field(field), Some(Constraint::TooLong(max)), "{key}");
      assert!(Lead::validate(&with(key, json!("x".repeat(max)))).is_ok(), "{key}");
    }
  }

  #[test]
  fn missing_required_fields_are_all_reported() {
    let errors = Lead::validate(&json!({})).unwrap_err();
    let fields: Vec<_> = errors.errors().iter().map(|e| e.field).collect();
    assert_eq!(fields, [
      LeadField::CompanyName,
      LeadField::ContactName,
      LeadField::Email
    ]);
    assert!(
      errors
        .errors()
        .iter()
        .all(|e| e.constraint == Constraint::MissingField)
    );
  }

  #[test]
  fn null_required_field_is_missing() {
    let errors = Lead::validate(&with("email", Value::Null)).unwrap_err();
    assert_eq!(
      errors.for_field(LeadField::Email),
      Some(Constraint::MissingField)
    );
  }

  #[test]
  fn blank_email_is_missing() {
    for email in ["", "   ", "\t\n"] {
      let errors = Lead::validate(&with("email", json!(email))).unwrap_err();
      assert_eq!(errors.errors().len(), 1, "{email:?}");
      assert_eq!(
        errors.for_field(LeadField::Email),
        Some(Constraint::MissingField),
        "{email:?}"
      );
    }
  }

  #[test]
  fn non_object_input_reports_missing_fields() {
    let errors = Lead::validate(&json!(["Acme"])).unwrap_err();
    assert_eq!(errors.errors().len(), 3);
  }

  #[test]
  fn null_optional_field_is_absent() {
    let lead = Lead::validate(&with("phone", Value::Null)).unwrap();
    assert_eq!(lead.phone(), None);
  }

  #[test]
  fn non_string_values_are_type_errors() {
    let errors = Lead::validate(&with("company_name", json!(42))).unwrap_err();
    assert_eq!(errors.errors().len(), 1);
    assert_eq!(
      errors.for_field(LeadField::CompanyName),
      Some(Constraint::InvalidType)
    );

    let errors = Lead::validate(&with("sector", json!(["retail"]))).unwrap_err();
    assert_eq!(
      errors.for_field(LeadField::Sector),
      Some(Constraint::InvalidType)
    );
  }

  #[test]
  fn invalid_emails_are_format_errors() {
    for email in [
      "not-an-email",
      "jane@acme",
      "@acme.com",
      "jane@.acme.com",
      "jane@acme.com.",
      "jane doe@acme.com",
      "jane@acme..com",
      " jane@acme.com",
    ] {
      let errors = Lead::validate(&with("email", json!(email))).unwrap_err();
      assert_eq!(
        errors.for_field(LeadField::Email),
        Some(Constraint::InvalidFormat),
        "{email:?}"
      );
    }
  }

  #[test]
  fn valid_emails_pass() {
    for email in ["jane@acme.com", "j.doe+leads@mail.acme.co.uk", "a@b.fr"] {
      assert!(is_valid_email(email), "{email:?}");
    }
  }

  #[test]
  fn unknown_and_metadata_keys_are_ignored() {
    let mut input = minimal();
    input["_id"] = json!("forged");
    input["created_at"] = json!("2020-01-01T00:00:00Z");
    input["utm_source"] = json!("newsletter");

    let lead = Lead::validate(&input).unwrap();
    let doc = lead.to_document();
    assert!(!doc.contains_key("_id"));
    assert!(!doc.contains_key("created_at"));
    assert!(!doc.contains_key("utm_source"));
  }

  #[test]
  fn document_holds_all_fields_with_nulls() {
    let lead = Lead::validate(&with("city", json!("Nantes"))).unwrap();
    let doc = lead.to_document();
    assert_eq!(doc.len(), 8);
    assert_eq!(doc["city"], "Nantes");
    assert_eq!(doc["phone"], Value::Null);
    assert_eq!(doc["company_name"], "Acme Corp");
  }

  #[test]
  fn values_are_not_trimmed() {
    let lead = Lead::validate(&with("company_name", json!(" Acme "))).unwrap();
    assert_eq!(lead.company_name(), " Acme ");
  }
}
