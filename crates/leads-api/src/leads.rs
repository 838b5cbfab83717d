//! Handlers for `/leads` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/leads` | Body: lead submission; returns `{"success":true,"id":...}` |
//! | `GET`  | `/leads` | Optional `?limit=N` (default 50); most recent first |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
};
use leads_core::{
  StoredLead,
  service::{self, SubmitError},
  store::{LeadStore, RecordId},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Operation};

/// Number of leads listed when no `limit` is given.
pub const DEFAULT_LIMIT: usize = 50;

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Created {
  pub success: bool,
  pub id:      RecordId,
}

/// `POST /leads`
pub async fn create<S: LeadStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Created>, ApiError> {
  let Json(input) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

  let inserted = service::submit(store.as_ref(), &input)
    .await
    .map_err(|e| match e {
      SubmitError::Invalid(errors) => ApiError::Validation(errors),
      SubmitError::Store(e) => ApiError::store(Operation::Create, e),
    })?;

  tracing::info!(id = %inserted.id, "lead recorded");
  Ok(Json(Created { success: true, id: inserted.id }))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(default = "default_limit")]
  pub limit: usize,
}

fn default_limit() -> usize { DEFAULT_LIMIT }

/// `GET /leads[?limit=N]`
pub async fn list<S: LeadStore>(
  State(store): State<Arc<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<StoredLead>>, ApiError> {
  let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let leads = service::recent(store.as_ref(), params.limit)
    .await
    .map_err(|e| ApiError::store(Operation::List, e))?;
  Ok(Json(leads))
}

// ─── Unconfigured ─────────────────────────────────────────────────────────────

/// Both `/leads` routes when the service runs without a store.
pub async fn unconfigured() -> ApiError { ApiError::NotConfigured }
