//! HTTP layer
//!
//! Request descriptors, the transport seam, response resolution and the executor that
//! ties them together with timeout and retry policy.

pub use executor::RequestExecutor;
pub use request::{ApiRequest, ApiRequestBuilder, PreparedRequest, QueryParams, encode_segment};
pub use response::{Response, ResponseResolver};
pub use transport::{ReqwestTransport, Transport, TransportError};

mod executor;
mod request;
mod response;
pub mod retry;
mod transport;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
