//! Integration tests for structured exit codes.
//!
//! These tests verify that sdm returns the correct exit codes for different
//! error scenarios, enabling reliable shell scripting.

mod common;

use common::*;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn list_responding(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/dashboards"))
        .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_unauthorized_returns_exit_code_2() {
    let server = list_responding(401).await;
    let session = SessionDir::new();
    sdm_cmd_with_url(&session.path(), &server.uri())
        .arg("ls")
        .assert()
        .code(2);
}

#[test]
fn test_connection_refused_returns_exit_code_3() {
    let session = SessionDir::new();
    // Use a port that's unlikely to be open
    sdm_cmd_with_url(&session.path(), "http://127.0.0.1:1")
        .arg("ls")
        .assert()
        .code(3);
}

#[test]
fn test_connection_refused_aborts_remove_batch() {
    let session = SessionDir::new();
    sdm_cmd_with_url(&session.path(), "http://127.0.0.1:1")
        .args(["rm", "a", "b", "--yes", "--skip-errors"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("1 dashboard(s) not attempted"))
        .stderr(predicate::str::contains("Batch aborted"));
}

#[tokio::test]
async fn test_forbidden_returns_exit_code_6() {
    let server = list_responding(403).await;
    let session = SessionDir::new();
    sdm_cmd_with_url(&session.path(), &server.uri())
        .arg("ls")
        .assert()
        .code(6);
}

#[tokio::test]
async fn test_service_unavailable_returns_exit_code_8() {
    let server = list_responding(503).await;
    let session = SessionDir::new();
    sdm_cmd_with_url(&session.path(), &server.uri())
        .arg("ls")
        .assert()
        .code(8);
}

#[test]
fn test_invalid_url_fails_before_any_request() {
    let session = SessionDir::new();
    sdm_cmd_with_url(&session.path(), "ftp://example.com")
        .arg("ls")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to build configuration"));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let session = SessionDir::new();
    sdm_cmd(&session.path())
        .arg("frobnicate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
