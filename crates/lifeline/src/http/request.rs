//! Request descriptors
//!
//! An [`ApiRequest`] describes one logical call: method, path, query, extra headers
//! and an optional JSON body. It is immutable once built. The executor turns it into
//! a [`PreparedRequest`] per physical attempt by resolving the URL and attaching the
//! credential and default headers.

use crate::error::{Error, Result};
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use std::fmt::Display;
use url::Url;

/// Characters left as-is in a path segment (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a caller-supplied value for use as a single path segment.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Ordered query-string parameters.
///
/// Absent values are dropped; present values are always serialized, including `0`,
/// `false` and the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn push(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Append a parameter only when `value` is `Some`.
    pub fn push_opt<V: Display>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    /// True when no parameters were added.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Description of one logical backend call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: QueryParams,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl ApiRequest {
    /// Start building a request.
    pub fn builder(method: Method, path: impl Into<String>) -> ApiRequestBuilder {
        ApiRequestBuilder {
            request: ApiRequest {
                method,
                path: path.into(),
                query: QueryParams::default(),
                headers: HeaderMap::new(),
                body: None,
            },
        }
    }

    /// Shorthand for a `GET` builder.
    pub fn get(path: impl Into<String>) -> ApiRequestBuilder {
        Self::builder(Method::GET, path)
    }

    /// Shorthand for a `POST` builder.
    pub fn post(path: impl Into<String>) -> ApiRequestBuilder {
        Self::builder(Method::POST, path)
    }

    /// Shorthand for a `PATCH` builder.
    pub fn patch(path: impl Into<String>) -> ApiRequestBuilder {
        Self::builder(Method::PATCH, path)
    }

    /// Shorthand for a `DELETE` builder.
    pub fn delete(path: impl Into<String>) -> ApiRequestBuilder {
        Self::builder(Method::DELETE, path)
    }

    /// Get the method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the path, relative to the client's base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the query parameters.
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Get the request-specific headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the serialized body, if any.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Resolve the absolute URL against `base`.
    ///
    /// The path is appended to the base URL's path, so a base of
    /// `https://api.example.com/v2` and a path of `/coaches` yields
    /// `https://api.example.com/v2/coaches`.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            self.path.trim_start_matches('/')
        );

        let mut url = Url::parse(&joined).map_err(|e| {
            Error::InvalidUrl(format!(
                "Failed to construct URL from path '{}': {}",
                self.path, e
            ))
        })?;

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }

        Ok(url)
    }
}

/// Builder for [`ApiRequest`].
#[derive(Debug)]
pub struct ApiRequestBuilder {
    request: ApiRequest,
}

impl ApiRequestBuilder {
    /// Replace the query parameters.
    pub fn query(mut self, query: QueryParams) -> Self {
        self.request.query = query;
        self
    }

    /// Add a request-specific header.
    ///
    /// # Errors
    /// Returns an error if the header name or value contains invalid characters.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key = key_str
            .parse::<HeaderName>()
            .map_err(|e| Error::HttpClient(format!("Invalid header name '{}': {}", key_str, e)))?;
        let value = value_str
            .parse::<HeaderValue>()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.request.headers.insert(key, value);
        Ok(self)
    }

    /// Serialize `body` as the JSON request body.
    ///
    /// # Errors
    /// Returns [`Error::Serialization`] if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.request.body = Some(Bytes::from(serde_json::to_vec(body)?));
        Ok(self)
    }

    /// Finish building.
    pub fn build(self) -> ApiRequest {
        self.request
    }
}

/// A fully resolved physical request for one attempt.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including query
    pub url: Url,
    /// All headers, including `Authorization`
    pub headers: HeaderMap,
    /// JSON body, if any
    pub body: Option<Bytes>,
}

impl PreparedRequest {
    /// The bearer token this request carries (empty when unauthenticated).
    pub fn bearer(&self) -> Option<&str> {
        self.headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
    }
}
