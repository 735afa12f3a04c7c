//! Profile API endpoint

use super::Resource;
use crate::{
    error::Result,
    http::{ApiRequest, RequestExecutor},
    types::{ProfileUpdate, UserProfile},
};
use std::sync::Arc;

/// The signed-in user's profile.
#[derive(Debug, Clone)]
pub struct Profile {
    executor: Arc<RequestExecutor>,
}

impl Profile {
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Fetch the profile.
    pub async fn get(&self) -> Result<UserProfile> {
        self.executor.execute(&ApiRequest::get("/profile").build()).await
    }

    /// Apply a partial update and return the stored profile.
    pub async fn update(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let request = ApiRequest::patch("/profile").json(update)?.build();
        self.executor.execute(&request).await
    }
}

impl Resource for Profile {
    fn executor(&self) -> &RequestExecutor {
        &self.executor
    }
}
