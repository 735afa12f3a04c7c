//! Coach directory types

use crate::http::QueryParams;
use serde::{Deserialize, Serialize};

/// A coach as listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coach {
    /// Unique identifier for the coach
    pub id: String,

    /// Display name
    pub name: String,

    /// One-line summary shown in search results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    /// Coaching specialties (e.g. "career", "fitness")
    #[serde(default)]
    pub specialties: Vec<String>,

    /// Languages the coach works in
    #[serde(default)]
    pub languages: Vec<String>,

    /// Average rating, absent until the coach has reviews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,

    /// Session price in minor currency units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate_cents: Option<u32>,

    /// Whether the coach's credentials have been checked
    #[serde(default)]
    pub verified: bool,

    /// Profile picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Filters for [`Coaches::search`](crate::resources::Coaches::search).
///
/// Unset filters are left out of the query string. Set filters are always sent, so
/// `page(0)` and `verified(false)` reach the server as `page=0` and `verified=false`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoachSearch {
    /// Free-text query
    pub query: Option<String>,
    /// Restrict to one specialty
    pub specialty: Option<String>,
    /// Restrict to one language
    pub language: Option<String>,
    /// Only verified (or only unverified) coaches
    pub verified: Option<bool>,
    /// Minimum average rating
    pub min_rating: Option<f32>,
    /// Zero-based page index
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

impl CoachSearch {
    /// An unfiltered search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the specialty filter.
    pub fn specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    /// Set the language filter.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the verified filter.
    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }

    /// Set the minimum rating.
    pub fn min_rating(mut self, min_rating: f32) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    /// Set the page index.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string form of these filters.
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("q", self.query.as_deref())
            .push_opt("specialty", self.specialty.as_deref())
            .push_opt("language", self.language.as_deref())
            .push_opt("verified", self.verified)
            .push_opt("min_rating", self.min_rating)
            .push_opt("page", self.page)
            .push_opt("limit", self.limit)
    }
}
