//! Handler for `GET /test`.
//!
//! Always answers 200; an unreachable or missing store only flips
//! `database` to `false`.

use std::sync::Arc;

use axum::{Json, extract::State};
use leads_core::{service, store::LeadStore};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Status {
  pub status:   &'static str,
  pub database: bool,
}

impl Status {
  fn ok(database: bool) -> Self { Self { status: "ok", database } }
}

/// `GET /test`
pub async fn check<S: LeadStore>(State(store): State<Arc<S>>) -> Json<Status> {
  let database = match service::probe(store.as_ref()).await {
    Ok(()) => true,
    Err(e) => {
      tracing::warn!(error = %e, "store probe failed");
      false
    }
  };
  Json(Status::ok(database))
}

/// `GET /test` when the service runs without a store.
pub async fn unconfigured() -> Json<Status> { Json(Status::ok(false)) }
