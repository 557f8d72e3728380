//! Access to the storefront backend: query building, the HTTP client, the error
//! taxonomy and the stale-response guard.

pub mod client;
pub mod error;
pub mod generation;
pub mod query;
pub mod worker;

pub use client::{ProductSource, StorefrontClient};
pub use error::FetchError;
pub use generation::{Generation, RequestTracker};
pub use query::ProductQuery;
pub use worker::{FetchCompletion, SharedSource, spawn_search};
