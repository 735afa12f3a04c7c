//! Failure classification tests using wiremock

mod common;

use assert_matches::assert_matches;
use common::{RecordingCredentials, RecordingReporter};
use lifeline::{Error, ErrorKind, http::ApiRequest};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn get_with_response(template: ResponseTemplate) -> (Error, MockServer) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(template)
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, RecordingCredentials::fixed("tok"));
    let error = client
        .profile()
        .get()
        .await
        .expect_err("Request should fail");

    (error, mock_server)
}

#[rstest]
#[case(400, json!({"error": "Missing field: name"}), "Missing field: name")]
#[case(403, json!({"message": "Coach is unavailable"}), "Coach is unavailable")]
#[case(404, json!({"error": "No profile", "message": "ignored"}), "No profile")]
#[case(422, json!({"detail": "nope"}), "Something went wrong")]
#[case(502, json!({}), "Something went wrong")]
#[tokio::test]
async fn test_generic_failures_pass_server_message(
    #[case] status: u16,
    #[case] body: Value,
    #[case] expected: &str,
) {
    let (error, mock_server) =
        get_with_response(ResponseTemplate::new(status).set_body_json(body)).await;

    assert_eq!(error.kind(), ErrorKind::Generic);
    assert_eq!(error.status(), status);
    assert_eq!(error.message(), expected);

    let requests = mock_server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1, "non-401 failures must not be retried");
}

#[tokio::test]
async fn test_generic_failure_with_unparseable_body() {
    let (error, _server) =
        get_with_response(ResponseTemplate::new(409).set_body_string("<html>Conflict</html>"))
            .await;

    assert_eq!(error.status(), 409);
    assert_eq!(error.message(), "Something went wrong");
}

#[tokio::test]
async fn test_endpoint_code_is_surfaced() {
    let (error, _server) = get_with_response(ResponseTemplate::new(400).set_body_json(json!({
        "error": "Finish onboarding first",
        "code": "PROFILE_INCOMPLETE"
    })))
    .await;

    assert_eq!(error.code(), Some("PROFILE_INCOMPLETE"));
}

#[rstest]
#[case(ResponseTemplate::new(429).set_body_json(json!({"error": "Daily limit reached"})))]
#[case(ResponseTemplate::new(429).set_body_string("slow down"))]
#[case(ResponseTemplate::new(429))]
#[tokio::test]
async fn test_429_is_rate_limited(#[case] template: ResponseTemplate) {
    let (error, _server) = get_with_response(template).await;

    assert_eq!(error.kind(), ErrorKind::RateLimited);
    assert_eq!(error.status(), 429);
}

#[tokio::test]
async fn test_429_retry_after_is_informational() {
    let (error, mock_server) = get_with_response(
        ResponseTemplate::new(429).insert_header("retry-after", "120"),
    )
    .await;

    assert_eq!(error.retry_after(), Some(std::time::Duration::from_secs(120)));
    let requests = mock_server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_503_message_is_fixed_across_calls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/video/rooms"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"error": "Video launches in Q3"})),
        )
        .mount(&mock_server)
        .await;

    let client = common::client(&mock_server, RecordingCredentials::fixed("tok"));

    for _ in 0..3 {
        let error = client
            .execute::<Value>(&ApiRequest::get("/video/rooms").build())
            .await
            .expect_err("Request should fail");

        assert_eq!(error.kind(), ErrorKind::FeatureDisabled);
        assert_eq!(error.status(), 503);
        assert_eq!(error.message(), "This feature is coming soon.");
    }
}

#[tokio::test]
async fn test_500_is_reported_and_returned() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("x-request-id", "req_abc")
                .set_body_json(json!({"error": "database unavailable"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let reporter = RecordingReporter::new();
    let client = common::client_with_reporter(
        &mock_server,
        RecordingCredentials::fixed("tok"),
        reporter.clone(),
    );

    let error = client.profile().get().await.expect_err("Request should fail");

    assert_matches!(
        &error,
        Error::ServerError { request_id: Some(id), .. } if id == "req_abc"
    );
    assert_eq!(error.kind(), ErrorKind::ServerError);

    let events = reporter.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].method, "GET");
    assert_eq!(events[0].path, "/profile");
    assert_eq!(events[0].message, "database unavailable");
    assert_eq!(events[0].request_id.as_deref(), Some("req_abc"));

    mock_server.verify().await;
}

#[tokio::test]
async fn test_reporter_failure_does_not_change_outcome() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let reporter = RecordingReporter::failing();
    let client = common::client_with_reporter(
        &mock_server,
        RecordingCredentials::fixed("tok"),
        reporter.clone(),
    );

    let error = client.profile().get().await.expect_err("Request should fail");

    assert_eq!(error.kind(), ErrorKind::ServerError);
    assert_eq!(error.message(), "Something went wrong");
    assert_eq!(reporter.events().len(), 1);
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let (error, _server) =
        get_with_response(ResponseTemplate::new(200).set_body_string("{\"id\": 42")).await;

    assert_matches!(error, Error::Decode { status: 200, .. });
}
