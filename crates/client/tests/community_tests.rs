//! Community dashboard index tests.

mod common;

use common::*;
use signoz_client::{ClientError, list_community_dashboards};
use wiremock::matchers::{header, method, path};

#[tokio::test]
async fn test_list_community_dashboards() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/SigNoz/dashboards/git/trees/main"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("community/tree.json")))
        .mount(&mock_server)
        .await;

    let index_url = format!(
        "{}/repos/SigNoz/dashboards/git/trees/main?recursive=1",
        mock_server.uri()
    );
    let entries = list_community_dashboards(&Client::new(), &index_url, "https://raw.example.com/main")
        .await
        .unwrap();

    let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "hostmetrics/hostmetrics-k8s.json",
            "hostmetrics/hostmetrics.json",
            "nginx/nginx-access-logs.json",
        ]
    );
    assert_eq!(
        entries[0].url,
        "https://raw.example.com/main/hostmetrics/hostmetrics-k8s.json"
    );
}

#[tokio::test]
async fn test_list_community_dashboards_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API rate limit exceeded"))
        .mount(&mock_server)
        .await;

    let err = list_community_dashboards(&Client::new(), &mock_server.uri(), "https://raw.example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::ApiError { status: 403, .. }));
}
