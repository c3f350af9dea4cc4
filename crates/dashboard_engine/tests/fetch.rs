use std::time::Duration;

use dashboard_engine::{ApiEndpoint, FailureKind, FetchSettings, PageFetcher, ReqwestPageFetcher};
use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIRST_PAGE: &str = r#"{
    "data": [
        {"cow_id": "cow-1", "response_type": "optimistic", "time": "2024-01-01T00:00:00Z", "entry_id": "e1"},
        {"cow_id": "cow-2", "response_type": "pessimistic", "time": "2024-01-01T00:05:00Z", "entry_id": "e2"}
    ],
    "count": 2,
    "total_count": 3,
    "next_token": "T1"
}"#;

const LAST_PAGE: &str = r#"{
    "data": [
        {"cow_id": "cow-3", "response_type": "optimistic", "time": "2024-01-01T00:10:00Z", "entry_id": "e3"}
    ],
    "count": 1,
    "next_token": null
}"#;

fn fetcher_for(server: &MockServer, settings: FetchSettings) -> ReqwestPageFetcher {
    let endpoint = ApiEndpoint {
        base_url: server.uri(),
        resource: "animal/data".to_string(),
        api_key: Some("secret-key".to_string()),
    };
    ReqwestPageFetcher::new(endpoint, settings).expect("fetcher")
}

#[tokio::test]
async fn fetcher_sends_api_key_and_decodes_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/animal/data"))
        .and(header("x-api-key", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FIRST_PAGE, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, FetchSettings::default());
    let page = fetcher.fetch(None).await.expect("fetch ok");

    let ids: Vec<&str> = page.records.iter().map(|r| r.entry_id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2"]);
    assert_eq!(page.records[1].entity_id, "cow-2");
    assert_eq!(page.declared_count, 2);
    assert_eq!(page.total_count, Some(3));
    assert_eq!(page.continuation_token.as_deref(), Some("T1"));
}

#[tokio::test]
async fn fetcher_passes_continuation_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/animal/data"))
        .and(query_param("next_token", "T1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LAST_PAGE, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, FetchSettings::default());
    let page = fetcher.fetch(Some("T1")).await.expect("fetch ok");

    assert_eq!(page.records.len(), 1);
    assert_eq!(page.total_count, None);
    assert!(!page.has_more());
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/animal/data"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, FetchSettings::default());
    let err = fetcher.fetch(None).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(401));
}

#[tokio::test]
async fn fetcher_reports_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/animal/data"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"items": []}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server, FetchSettings::default());
    let err = fetcher.fetch(None).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/animal/data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(LAST_PAGE, "application/json"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = fetcher_for(&server, settings);
    let err = fetcher.fetch(None).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/animal/data"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FIRST_PAGE, "application/json"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 16,
        ..FetchSettings::default()
    };
    let fetcher = fetcher_for(&server, settings);
    let err = fetcher.fetch(None).await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 16, .. }
    ));
}

#[tokio::test]
async fn fetcher_reports_connection_failure_as_network() {
    let endpoint = ApiEndpoint {
        base_url: "http://127.0.0.1:9".to_string(),
        resource: "animal/data".to_string(),
        api_key: None,
    };
    let settings = FetchSettings {
        connect_timeout: Duration::from_millis(200),
        request_timeout: Duration::from_millis(500),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestPageFetcher::new(endpoint, settings).expect("fetcher");
    let err = fetcher.fetch(None).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
}
