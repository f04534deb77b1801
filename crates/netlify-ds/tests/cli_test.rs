//! Integration tests for the `netlify-ds` CLI binary.
//!
//! Argument parsing, help output and error handling run without a network.
//! End-to-end cases point `--base-url` at a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const ISOLATED_HOME: &str = "/tmp/netlify-ds-test-nonexistent";

/// Build a [`Command`] for the binary with env isolation.
///
/// Clears all `NETLIFY_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn netlify_cmd() -> assert_cmd::Command {
    netlify_cmd_with_config(ISOLATED_HOME)
}

fn netlify_cmd_with_config(config_home: &str) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("netlify-ds");
    cmd.env("HOME", config_home)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("NETLIFY_PROFILE")
        .env_remove("NETLIFY_BASE_URL")
        .env_remove("NETLIFY_ACCESS_TOKEN")
        .env_remove("NETLIFY_ACCOUNT_ID")
        .env_remove("NETLIFY_SITE_ID")
        .env_remove("NETLIFY_OUTPUT")
        .env_remove("NETLIFY_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run the binary against a mock server from a blocking thread so the
/// server keeps serving on the test runtime.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let base_url = format!("{}/api/v1", server.uri());
    let args: Vec<String> = args.iter().map(|a| (*a).to_owned()).collect();
    tokio::task::spawn_blocking(move || {
        netlify_cmd()
            .args(["--base-url", &base_url, "--token", "test-token"])
            .args(&args)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

fn builds_json(ids: &[&str]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| json!({"id": id, "deploy_id": format!("{id}-deploy"), "done": true}))
            .collect(),
    )
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = netlify_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    netlify_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("query")
            .and(predicate::str::contains("sites"))
            .and(predicate::str::contains("health")),
    );
}

#[test]
fn test_version_flag() {
    netlify_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("netlify-ds"));
}

#[test]
fn test_completions_zsh() {
    netlify_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_bash() {
    netlify_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_config_path() {
    netlify_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_query_requires_entity() {
    let output = netlify_cmd().args(["query"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--entity"));
}

#[test]
fn test_query_without_token() {
    let output = netlify_cmd()
        .args(["query", "--entity", "sites"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
    let text = combined_output(&output);
    assert!(text.contains("No access token"), "Unexpected output:\n{text}");
}

#[test]
fn test_unknown_profile() {
    let output = netlify_cmd()
        .args(["--profile", "nope", "--token", "t", "health"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("Profile 'nope' not found"));
}

#[test]
fn test_invalid_output_format() {
    let output = netlify_cmd()
        .args(["--output", "xml", "sites"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Against a mock API ──────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_sites_lists_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/sites"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "s1", "name": "docs"}, {"id": "s2"}])),
        )
        .mount(&server)
        .await;

    let output = run_against(&server, &["--output", "plain", "sites"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "s1\ns2\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_query_builds_across_sites() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/sites/s1/builds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(builds_json(&["b1", "b2"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/sites/s2/builds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(builds_json(&["b3"])))
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &["--output", "json", "query", "--entity", "builds", "--site-id", "{s1,s2}"],
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let frame: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(frame["name"], "builds");
    let mut ids: Vec<String> = frame["fields"][0]["values"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_owned())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["b1", "b2", "b3"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_query_fails_when_one_site_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/sites/s1/builds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(builds_json(&["b1"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/sites/s2/builds"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &["query", "--entity", "builds", "--site-id", "{s1,s2}"],
    )
    .await;
    assert_eq!(output.status.code(), Some(7), "{}", combined_output(&output));
    assert!(output.stdout.is_empty());
    assert!(combined_output(&output).contains("boom"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_query_unknown_entity_is_usage_error() {
    let server = MockServer::start().await;

    let output = run_against(&server, &["query", "--entity", "unknown-kind"]).await;
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("unrecognized entity"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_reports_working() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let output = run_against(&server, &["health"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Data source is working"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_reports_rejected_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/sites"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Access Denied"))
        .mount(&server)
        .await;

    let output = run_against(&server, &["health"]).await;
    assert_eq!(output.status.code(), Some(7));
    assert!(combined_output(&output).contains("Access Denied"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_resource_is_not_found() {
    let server = MockServer::start().await;

    let output = run_against(&server, &["resource", "/forms"]).await;
    assert_eq!(output.status.code(), Some(4));
}

// ── Config profiles ─────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_profile_supplies_base_url_and_token_env() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/sites/docs/deploys"))
        .and(header("authorization", "Bearer from-env"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": "d1", "state": "ready"}])),
        )
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join("netlify-datasource");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        format!(
            "default_profile = \"work\"\n\n[profiles.work]\nbase_url = \"{}/api/v1\"\nsite_id = \"docs\"\ntoken_env = \"NETLIFY_DS_TEST_TOKEN\"\n",
            server.uri()
        ),
    )
    .unwrap();

    let home_path = home.path().to_str().unwrap().to_owned();
    let output = tokio::task::spawn_blocking(move || {
        netlify_cmd_with_config(&home_path)
            .env("NETLIFY_DS_TEST_TOKEN", "from-env")
            .args(["--output", "plain", "query", "--entity", "deployments"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let row: Vec<&str> = stdout.trim_end_matches('\n').split('\t').collect();
    // id, site_id, build_id, state, ...
    assert_eq!(&row[..4], &["d1", "", "", "ready"]);
}
