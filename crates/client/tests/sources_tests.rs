//! Remote dashboard source tests.

mod common;

use common::*;
use signoz_client::{FetchError, HttpSourceFetcher, SourceFetcher};
use wiremock::matchers::{method, path};

#[tokio::test]
async fn test_fetch_url_parses_definition() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dashboards/nginx.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"title":"NGINX","widgets":[]}"#))
        .mount(&mock_server)
        .await;

    let fetcher = HttpSourceFetcher::new(Client::new());
    let value = fetcher
        .fetch(&format!("{}/dashboards/nginx.json", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(value["title"], "NGINX");
}

#[tokio::test]
async fn test_fetch_url_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let fetcher = HttpSourceFetcher::new(Client::new());
    let err = fetcher
        .fetch(&format!("{}/missing.json", mock_server.uri()))
        .await
        .unwrap_err();

    match err {
        FetchError::Download { message, .. } => assert_eq!(message, "HTTP 404"),
        other => panic!("Expected Download, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_url_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let fetcher = HttpSourceFetcher::new(Client::new());
    let err = fetcher
        .fetch(&format!("{}/page", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::InvalidJson { .. }));
}
