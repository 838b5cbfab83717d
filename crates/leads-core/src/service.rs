//! Lead operations expressed against any [`LeadStore`].
//!
//! These are the write, read and probe paths the HTTP layer exposes; they
//! contain no transport concerns.

use serde_json::Value;
use thiserror::Error;

use crate::{
  error::ValidationErrors,
  lead::Lead,
  store::{Collection, Filter, Inserted, LeadStore},
  stored::StoredLead,
};

/// Why a submission was not recorded.
#[derive(Debug, Error)]
pub enum SubmitError<E: std::error::Error + 'static> {
  #[error(transparent)]
  Invalid(#[from] ValidationErrors),

  #[error(transparent)]
  Store(E),
}

/// Validate `input` and, only if it is valid, insert it into the lead
/// collection.
pub async fn submit<S: LeadStore>(
  store: &S,
  input: &Value,
) -> Result<Inserted, SubmitError<S::Error>> {
  let lead = Lead::validate(input)?;
  store
    .insert(Collection::Lead, lead.to_document())
    .await
    .map_err(SubmitError::Store)
}

/// The `limit` most recent leads, normalized for output.
pub async fn recent<S: LeadStore>(
  store: &S,
  limit: usize,
) -> Result<Vec<StoredLead>, S::Error> {
  let filter = Filter::all();
  let records = store.query(Collection::Lead, &filter, limit).await?;
  Ok(records.iter().map(StoredLead::normalize).collect())
}

/// Issue the cheapest possible read to check the store is reachable.
pub async fn probe<S: LeadStore>(store: &S) -> Result<(), S::Error> {
  let filter = Filter::all();
  store.query(Collection::Lead, &filter, 1).await.map(drop)
}
