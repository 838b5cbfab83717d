//! Error types for `leads-core`.
//!
//! Two families live here: field-level validation failures, which are the
//! client's fault and never reach a store, and the classification every store
//! backend error must expose so callers can tell an unreachable store apart
//! from a failed operation.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::lead::LeadField;

// ─── Validation ──────────────────────────────────────────────────────────────

/// The rule a submitted field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
  /// A required field was absent or `null`.
  MissingField,
  /// Shorter than the minimum number of characters (after trimming).
  TooShort(usize),
  /// Longer than the maximum number of characters.
  TooLong(usize),
  /// Not a syntactically valid value for the field (e.g. a malformed email).
  InvalidFormat,
  /// Present, but not a string.
  InvalidType,
}

impl Constraint {
  /// Stable machine-readable name, used in API error bodies.
  pub fn code(self) -> &'static str {
    match self {
      Self::MissingField => "missing_field",
      Self::TooShort(_) => "too_short",
      Self::TooLong(_) => "too_long",
      Self::InvalidFormat => "invalid_format",
      Self::InvalidType => "invalid_type",
    }
  }

  /// The length bound involved, if any.
  pub fn limit(self) -> Option<usize> {
    match self {
      Self::TooShort(n) | Self::TooLong(n) => Some(n),
      _ => None,
    }
  }
}

/// A single field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
  pub field:      LeadField,
  pub constraint: Constraint,
}

impl fmt::Display for FieldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let field = self.field.as_str();
    match self.constraint {
      Constraint::MissingField => write!(f, "{field} is required"),
      Constraint::TooShort(min) => {
        write!(f, "{field} must be at least {min} characters")
      }
      Constraint::TooLong(max) => {
        write!(f, "{field} must be at most {max} characters")
      }
      Constraint::InvalidFormat => write!(f, "{field} is not a valid {}", self.field.format_name()),
      Constraint::InvalidType => write!(f, "{field} must be a string"),
    }
  }
}

#[derive(Serialize)]
struct FieldErrorBody<'a> {
  field:      &'a str,
  constraint: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  limit:      Option<usize>,
  message:    String,
}

impl Serialize for FieldError {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    FieldErrorBody {
      field:      self.field.as_str(),
      constraint: self.constraint.code(),
      limit:      self.constraint.limit(),
      message:    self.to_string(),
    }
    .serialize(serializer)
  }
}

/// Every field error found in a submission, in field declaration order.
///
/// Never empty when returned from [`crate::Lead::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("invalid lead: {}", join_errors(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
  pub fn errors(&self) -> &[FieldError] { &self.0 }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// The constraint reported for `field`, if it failed.
  pub fn for_field(&self, field: LeadField) -> Option<Constraint> {
    self.0.iter().find(|e| e.field == field).map(|e| e.constraint)
  }
}

fn join_errors(errors: &[FieldError]) -> String {
  errors
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

// ─── Store failures ──────────────────────────────────────────────────────────

/// How a store operation failed, independent of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFailure {
  /// The backing store could not be reached at all.
  Unavailable,
  /// The store was reachable but the operation failed (constraint violation,
  /// serialization failure, corrupt record, ...).
  Persistence,
}

/// Implemented by every backend error type so callers can classify failures
/// without knowing the backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn failure(&self) -> StoreFailure;

  fn is_unavailable(&self) -> bool {
    self.failure() == StoreFailure::Unavailable
  }
}
