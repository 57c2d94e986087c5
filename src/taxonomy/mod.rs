//! Remote taxonomy: the two read endpoints that describe categories and
//! their subcategories.
//!
//! - [`client`] - HTTP wrapper, one request per call, no caching or retries
//! - [`types`] - domain types and the JSON envelopes the service returns

mod client;
mod types;

pub use client::{TaxonomyClient, TaxonomyError, DEFAULT_TIMEOUT};
pub use types::{Category, Subcategory};
