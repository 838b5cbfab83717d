//! JSON HTTP API for lead capture.
//!
//! Exposes an axum [`Router`] backed by any [`leads_core::store::LeadStore`].
//! CORS, TLS and other transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = leads_api::api_router(Gateway::Configured(Arc::new(store)));
//! ```

pub mod error;
pub mod health;
pub mod leads;

use std::sync::Arc;

use axum::{Router, routing::get};
use leads_core::store::LeadStore;

pub use error::ApiError;

/// Whether the service has a store to talk to. Decided once at startup.
#[derive(Debug)]
pub enum Gateway<S> {
  Configured(Arc<S>),
  Unconfigured,
}

impl<S> From<Option<Arc<S>>> for Gateway<S> {
  fn from(store: Option<Arc<S>>) -> Self {
    store.map_or(Self::Unconfigured, Self::Configured)
  }
}

/// Build the API router for `gateway`.
///
/// Without a store, `/test` reports `database: false` and both `/leads`
/// routes answer 500 `Database module not available`.
pub fn api_router<S>(gateway: Gateway<S>) -> Router<()>
where
  S: LeadStore + 'static,
{
  match gateway {
    Gateway::Configured(store) => Router::new()
      .route("/test", get(health::check::<S>))
      .route("/leads", get(leads::list::<S>).post(leads::create::<S>))
      .with_state(store),
    Gateway::Unconfigured => Router::new()
      .route("/test", get(health::unconfigured))
      .route("/leads", get(leads::unconfigured).post(leads::unconfigured)),
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
