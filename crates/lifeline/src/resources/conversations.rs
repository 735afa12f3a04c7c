//! Conversations API endpoint

use super::{ListEnvelope, Resource};
use crate::{
    error::Result,
    http::{ApiRequest, RequestExecutor, encode_segment},
    types::{ChatMessage, Conversation, NewMessage, Page},
};
use std::sync::Arc;

/// Conversations with coaches.
#[derive(Debug, Clone)]
pub struct Conversations {
    executor: Arc<RequestExecutor>,
}

impl Conversations {
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// List the user's conversations, most recent first.
    pub async fn list(&self) -> Result<Vec<Conversation>> {
        let list: ListEnvelope<Conversation> = self
            .executor
            .execute(&ApiRequest::get("/conversations").build())
            .await?;
        Ok(list.data)
    }

    /// Fetch one page of a conversation's messages.
    pub async fn messages(&self, conversation_id: &str, page: &Page) -> Result<Vec<ChatMessage>> {
        let request = ApiRequest::get(messages_path(conversation_id))
            .query(page.to_query())
            .build();
        let list: ListEnvelope<ChatMessage> = self.executor.execute(&request).await?;
        Ok(list.data)
    }

    /// Send a message and return it as stored by the server.
    ///
    /// Not retried after a timeout, so a timed-out send may or may not have been stored.
    pub async fn send(&self, conversation_id: &str, message: &NewMessage) -> Result<ChatMessage> {
        let request = ApiRequest::post(messages_path(conversation_id))
            .json(message)?
            .build();
        self.executor.execute(&request).await
    }
}

fn messages_path(conversation_id: &str) -> String {
    format!("/conversations/{}/messages", encode_segment(conversation_id))
}

impl Resource for Conversations {
    fn executor(&self) -> &RequestExecutor {
        &self.executor
    }
}
