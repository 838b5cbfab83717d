//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body has the shape `{"detail": ...}`: a list of field errors
//! for rejected submissions, a message string otherwise.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use leads_core::{StoreError, StoreFailure, ValidationErrors};
use serde_json::json;
use thiserror::Error;

/// Detail returned whenever no store can be used.
pub const NOT_AVAILABLE: &str = "Database module not available";

/// The store-backed operation that failed, used to prefix error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  Create,
  List,
}

impl Operation {
  fn detail_prefix(self) -> &'static str {
    match self {
      Self::Create => "Erreur lors de la création",
      Self::List => "Erreur lors de la récupération",
    }
  }
}

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Validation(#[from] ValidationErrors),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The service was started without a store.
  #[error("Database module not available")]
  NotConfigured,

  #[error("{}: {source}", .operation.detail_prefix())]
  Store {
    operation: Operation,
    failure:   StoreFailure,
    #[source]
    source:    Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  pub fn store<E: StoreError>(operation: Operation, error: E) -> Self {
    Self::Store {
      operation,
      failure: error.failure(),
      source: Box::new(error),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Validation(errors) => {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": errors })))
          .into_response()
      }
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "detail": m }))).into_response()
      }
      ApiError::NotConfigured => {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": NOT_AVAILABLE })))
          .into_response()
      }
      ApiError::Store { failure: StoreFailure::Unavailable, ref source, .. } => {
        tracing::error!(error = %source, "store unreachable");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": NOT_AVAILABLE })))
          .into_response()
      }
      ApiError::Store { .. } => {
        let detail = self.to_string();
        tracing::error!(%detail, "store operation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": detail })))
          .into_response()
      }
    }
  }
}
