//! Core types and trait definitions for the lead-capture backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::LeadStore`]; the HTTP layer drives the
//! operations in [`service`] against whichever backend it was handed.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod lead;
pub mod service;
pub mod store;
pub mod stored;

pub use error::{Constraint, FieldError, StoreError, StoreFailure, ValidationErrors};
pub use lead::{Lead, LeadField};
pub use stored::StoredLead;
