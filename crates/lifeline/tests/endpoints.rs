//! Typed endpoint tests using wiremock

mod common;

use common::RecordingCredentials;
use lifeline::{
    AnalyticsEvent, CoachSearch, NewMessage, Page, ProfileUpdate, Sender, http::ApiRequest,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{
    body_json, body_partial_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_coach_search_sends_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coaches"))
        .and(query_param("specialty", "career"))
        .and(query_param("verified", "false"))
        .and(query_param("page", "0"))
        .and(query_param_is_missing("limit"))
        .and(query_param_is_missing("q"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(common::load_response_fixture("coach_list")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, RecordingCredentials::fixed("tok"));
    let search = CoachSearch::new().specialty("career").verified(false).page(0);

    let coaches = client.coaches().search(&search).await.expect("Request failed");

    assert_eq!(coaches.len(), 2);
    assert_eq!(coaches[0].name, "Ana Ribeiro");
    assert_eq!(coaches[0].rating, Some(4.8));
    assert!(coaches[0].verified);
    assert_eq!(coaches[1].headline, None);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_coach_get_encodes_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coaches/c%2F1%20x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c/1 x",
            "name": "Odd Id"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, RecordingCredentials::fixed("tok"));
    let coach = client.coaches().get("c/1 x").await.expect("Request failed");

    assert_eq!(coach.id, "c/1 x");
}

#[tokio::test]
async fn test_profile_get_and_update() {
    let mock_server = MockServer::start().await;
    let profile = common::load_response_fixture("profile");

    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/profile"))
        .and(body_json(json!({ "timezone": "America/Chicago" })))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, RecordingCredentials::fixed("tok"));

    let current = client.profile().get().await.expect("Request failed");
    assert_eq!(current.display_name, "Sam Carter");
    assert_eq!(current.goals, vec!["fitness".to_string(), "sleep".to_string()]);

    let update = ProfileUpdate {
        timezone: Some("America/Chicago".to_string()),
        ..Default::default()
    };
    let updated = client.profile().update(&update).await.expect("Request failed");
    assert_eq!(updated.id, "u_7Q2");

    mock_server.verify().await;
}

#[tokio::test]
async fn test_conversation_flow() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/conversations"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(common::load_response_fixture("conversation_list")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/conversations/conv_1/messages"))
        .and(query_param("before", "m_42"))
        .and(query_param("limit", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(common::load_response_fixture("message_page")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/conversations/conv_1/messages"))
        .and(body_json(json!({ "text": "Thursday it is" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "m_43",
            "conversation_id": "conv_1",
            "sender": "user",
            "text": "Thursday it is",
            "sent_at": "2024-05-02T18:05:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, RecordingCredentials::fixed("tok"));

    let conversations = client.conversations().list().await.expect("Request failed");
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0].unread_count, 1);
    let last = conversations[0].last_message.as_ref().expect("last message");
    assert_eq!(last.sender, Sender::Coach);

    let page = Page::latest().before("m_42").limit(2);
    let messages = client
        .conversations()
        .messages("conv_1", &page)
        .await
        .expect("Request failed");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, Sender::User);

    let sent = client
        .conversations()
        .send("conv_1", &NewMessage::new("Thursday it is"))
        .await
        .expect("Request failed");
    assert_eq!(sent.id, "m_43");

    mock_server.verify().await;
}

#[tokio::test]
async fn test_analytics_track() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analytics/events"))
        .and(body_partial_json(json!({
            "name": "coach_profile_viewed",
            "properties": { "coach_id": "c_01HX3K" }
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "accepted": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/analytics/events"))
        .and(body_partial_json(json!({ "name": "app_opened" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, RecordingCredentials::fixed("tok"));

    let viewed = AnalyticsEvent::new("coach_profile_viewed").property("coach_id", "c_01HX3K");
    let ack = client.analytics().track(&viewed).await.expect("Request failed");
    assert!(ack.accepted);

    let ack = client
        .analytics()
        .track(&AnalyticsEvent::new("app_opened"))
        .await
        .expect("Request failed");
    assert!(ack.accepted);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_every_request_carries_standard_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feature-flags"))
        .and(header("authorization", "Bearer tok-123"))
        .and(header("content-type", "application/json"))
        .and(header("x-client-platform", "test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "video": false })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, RecordingCredentials::fixed("tok-123"));
    let flags: serde_json::Value = client
        .execute(&ApiRequest::get("/feature-flags").build())
        .await
        .expect("Request failed");

    assert_eq!(flags["video"], false);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_anonymous_request_sends_empty_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/coaches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, RecordingCredentials::anonymous());
    let coaches = client
        .coaches()
        .search(&CoachSearch::new())
        .await
        .expect("Request failed");
    assert!(coaches.is_empty());

    let requests = mock_server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let authorization = requests[0].headers["authorization"].to_str().unwrap();
    assert_eq!(authorization.trim_end(), "Bearer");
    assert_eq!(requests[0].url.query(), None);
}
