//! Coaches API endpoint

use super::{ListEnvelope, Resource};
use crate::{
    error::Result,
    http::{ApiRequest, RequestExecutor, encode_segment},
    types::{Coach, CoachSearch},
};
use std::sync::Arc;

/// Coach directory.
#[derive(Debug, Clone)]
pub struct Coaches {
    executor: Arc<RequestExecutor>,
}

impl Coaches {
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Search the directory.
    ///
    /// `GET /coaches` with the filters as query parameters.
    pub async fn search(&self, search: &CoachSearch) -> Result<Vec<Coach>> {
        let request = ApiRequest::get("/coaches").query(search.to_query()).build();
        let list: ListEnvelope<Coach> = self.executor.execute(&request).await?;
        Ok(list.data)
    }

    /// Fetch a single coach.
    pub async fn get(&self, coach_id: &str) -> Result<Coach> {
        let request = ApiRequest::get(format!("/coaches/{}", encode_segment(coach_id))).build();
        self.executor.execute(&request).await
    }
}

impl Resource for Coaches {
    fn executor(&self) -> &RequestExecutor {
        &self.executor
    }
}
