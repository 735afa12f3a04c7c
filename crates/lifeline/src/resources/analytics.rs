//! Analytics API endpoint

use super::Resource;
use crate::{
    error::Result,
    http::{ApiRequest, RequestExecutor},
    types::{Acknowledgement, AnalyticsEvent},
};
use std::sync::Arc;

/// Product analytics ingestion.
#[derive(Debug, Clone)]
pub struct Analytics {
    executor: Arc<RequestExecutor>,
}

impl Analytics {
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Record an event.
    ///
    /// A success response without a body counts as accepted.
    pub async fn track(&self, event: &AnalyticsEvent) -> Result<Acknowledgement> {
        let request = ApiRequest::post("/analytics/events").json(event)?.build();
        let ack: Option<Acknowledgement> = self.executor.execute(&request).await?;
        Ok(ack.unwrap_or(Acknowledgement { accepted: true }))
    }
}

impl Resource for Analytics {
    fn executor(&self) -> &RequestExecutor {
        &self.executor
    }
}
