//! CLI integration tests against a mock authentication API.

mod common;

use std::net::TcpListener;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{run_cli, run_cli_success, run_shell};

fn api_url(server: &MockServer) -> String {
    format!("http://127.0.0.1:{}", server.address().port())
}

fn storage_file(data_dir: &Path, server: &MockServer) -> PathBuf {
    data_dir
        .join("storage")
        .join(format!("127.0.0.1_{}.json", server.address().port()))
}

fn stored_token(data_dir: &Path, server: &MockServer) -> Option<String> {
    let path = storage_file(data_dir, server);
    if !path.exists() {
        return None;
    }
    let file: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    file["entries"]["token"]["value"].as_str().map(str::to_string)
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "username": "alice", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_durable_login_then_call_across_processes() {
    let server = MockServer::start().await;
    let data = TempDir::new().unwrap();
    let api = api_url(&server);
    mount_login(&server, "abc123").await;

    Mock::given(method("GET"))
        .and(path("/protected"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "secret" })))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &["login", "--username", "alice", "--password", "pw"],
        data.path(),
        &api,
    );
    assert!(stdout.contains("Logged in! Token stored in durable storage."));
    assert_eq!(stored_token(data.path(), &server).as_deref(), Some("abc123"));

    let stdout = run_cli_success(&["call-protected"], data.path(), &api);
    assert_eq!(stdout.trim(), r#"{"data":"secret"}"#);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_call_without_login_sends_nothing() {
    let server = MockServer::start().await;
    let data = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/protected"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_cli(&["call-protected"], data.path(), &api_url(&server));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No token! Login first."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_login_reports_server_message() {
    let server = MockServer::start().await;
    let data = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let output = run_cli(
        &["login", "--username", "alice", "--password", "wrong"],
        data.path(),
        &api_url(&server),
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid credentials"));
    assert_eq!(stored_token(data.path(), &server), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_twice_is_idempotent() {
    let server = MockServer::start().await;
    let data = TempDir::new().unwrap();
    let api = api_url(&server);
    mount_login(&server, "abc123").await;

    run_cli_success(
        &["login", "--username", "alice", "--password", "pw"],
        data.path(),
        &api,
    );

    let first = run_cli_success(&["logout"], data.path(), &api);
    let second = run_cli_success(&["logout"], data.path(), &api);

    assert!(first.contains("Logged out. Token removed."));
    assert_eq!(first, second);
    assert_eq!(stored_token(data.path(), &server), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_password_from_environment() {
    let server = MockServer::start().await;
    let data = TempDir::new().unwrap();
    mount_login(&server, "abc123").await;

    let output = common::cli_command(&["login", "--username", "alice"], data.path(), &api_url(&server))
        .env("TOKENSTASH_PASSWORD", "pw")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stored_token(data.path(), &server).as_deref(), Some("abc123"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ephemeral_one_shot_does_not_persist() {
    let server = MockServer::start().await;
    let data = TempDir::new().unwrap();
    let api = api_url(&server);
    mount_login(&server, "abc123").await;

    let stdout = run_cli_success(
        &["--scope", "ephemeral", "login", "--username", "alice", "--password", "pw"],
        data.path(),
        &api,
    );
    assert!(stdout.contains("ephemeral storage"));

    let output = run_cli(&["--scope", "ephemeral", "call-protected"], data.path(), &api);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No token! Login first."));
    assert!(!storage_file(data.path(), &server).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ephemeral_shell_keeps_token_for_its_lifetime() {
    let server = MockServer::start().await;
    let data = TempDir::new().unwrap();
    let api = api_url(&server);
    mount_login(&server, "abc123").await;

    Mock::given(method("GET"))
        .and(path("/protected"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "secret" })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_shell(
        &["--scope", "ephemeral"],
        "login alice pw\ncall\nlogout\ncall\nexit\n",
        data.path(),
        &api,
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("Logged in! Token stored in ephemeral storage."));
    assert!(stdout.contains(r#"{"data":"secret"}"#));
    assert!(stdout.contains("Logged out. Token removed."));
    assert!(stderr.contains("No token! Login first."));
    assert!(!storage_file(data.path(), &server).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_shell_reports_unknown_commands_and_continues() {
    let server = MockServer::start().await;
    let data = TempDir::new().unwrap();

    let output = run_shell(&[], "frobnicate\nlogout\n", data.path(), &api_url(&server));

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown command 'frobnicate'"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Logged out. Token removed."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_json_reflects_login() {
    let server = MockServer::start().await;
    let data = TempDir::new().unwrap();
    let api = api_url(&server);
    mount_login(&server, "abc123").await;

    let before: Value =
        serde_json::from_str(&run_cli_success(&["status", "--json"], data.path(), &api)).unwrap();
    assert_eq!(before["logged_in"], json!(false));
    assert_eq!(before["scope"], json!("durable"));
    assert!(before.get("stored_at").is_none());

    run_cli_success(
        &["login", "--username", "alice", "--password", "pw"],
        data.path(),
        &api,
    );

    let after: Value =
        serde_json::from_str(&run_cli_success(&["status", "--json"], data.path(), &api)).unwrap();
    assert_eq!(after["logged_in"], json!(true));
    assert_eq!(after["key"], json!("token"));
    assert!(after["stored_at"].is_string());
    // The token itself is never printed.
    assert!(!after.to_string().contains("abc123"));
}

#[test]
fn test_unreachable_api_reports_error_prefix() {
    let data = TempDir::new().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let api = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
    drop(listener);

    let output = run_cli(
        &["login", "--username", "alice", "--password", "pw"],
        data.path(),
        &api,
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: transport error"));
}

#[test]
fn test_custom_key_is_used() {
    let data = TempDir::new().unwrap();
    let output = run_cli(
        &["--key", "jwt", "status", "--json"],
        data.path(),
        "http://localhost:5001",
    );
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["key"], json!("jwt"));
}
