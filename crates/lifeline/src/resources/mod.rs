//! Typed endpoint surface
//!
//! One resource per backend area. Each method builds an [`ApiRequest`] and hands it to
//! the shared [`RequestExecutor`]; none of them retry or classify errors themselves.
//!
//! [`ApiRequest`]: crate::http::ApiRequest

pub mod analytics;
pub mod coaches;
pub mod conversations;
pub mod profile;

pub use analytics::Analytics;
pub use coaches::Coaches;
pub use conversations::Conversations;
pub use profile::Profile;

use crate::http::RequestExecutor;
use serde::Deserialize;

/// Base trait for API resources.
pub trait Resource {
    /// The executor this resource sends through.
    fn executor(&self) -> &RequestExecutor;
}

/// `{ "data": [...] }` wrapper used by list endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope<T> {
    pub(crate) data: Vec<T>,
}
