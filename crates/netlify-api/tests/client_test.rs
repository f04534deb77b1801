#![allow(clippy::unwrap_used)]
// Integration tests for `NetlifyClient` using wiremock.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netlify_api::{Error, NetlifyClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, NetlifyClient) {
    let server = MockServer::start().await;
    let token = SecretString::from("test-token".to_owned());
    let client = NetlifyClient::new(
        &format!("{}/api/v1", server.uri()),
        &token,
        "acct-1",
        "default-site",
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_builds_sends_bearer_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sites/s1/builds"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "b1", "deploy_id": "d1", "sha": "abc", "done": true,
              "created_at": "2024-01-01T00:00:00Z" },
            { "id": "b2", "done": false, "error": null },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let builds = client.list_builds("s1").await.unwrap();

    assert_eq!(builds.len(), 2);
    assert_eq!(builds[0].id, "b1");
    assert_eq!(builds[0].sha.as_deref(), Some("abc"));
    assert_eq!(builds[1].done, Some(false));
}

#[tokio::test]
async fn test_empty_site_id_uses_configured_default() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sites/default-site/deploys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "d1", "state": "ready", "branch": "main" },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let deploys = client.list_deploys("").await.unwrap();

    assert_eq!(deploys.len(), 1);
    assert_eq!(deploys[0].state.as_deref(), Some("ready"));
}

#[tokio::test]
async fn test_build_status_is_scoped_by_account() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/acct-1/builds/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "active": 1,
            "pending_concurrency": 0,
            "enqueued": 2,
            "minutes": { "current": 120, "included_minutes": 300 }
        })))
        .mount(&server)
        .await;

    let status = client.build_status().await.unwrap();

    assert_eq!(status.active, Some(1));
    assert_eq!(status.enqueued, Some(2));
    assert_eq!(status.minutes.unwrap().current, Some(120));
}

#[tokio::test]
async fn test_list_sites_and_accounts() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "s1", "name": "docs" },
            { "id": "s2", "name": "blog", "domain_aliases": null },
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "a1", "name": "Acme", "slug": "acme", "type": "team" },
        ])))
        .mount(&server)
        .await;

    let sites = client.list_sites().await.unwrap();
    let accounts = client.list_accounts().await.unwrap();

    assert_eq!(sites.len(), 2);
    assert_eq!(sites[1].name.as_deref(), Some("blog"));
    assert_eq!(accounts[0].slug.as_deref(), Some("acme"));
}

#[tokio::test]
async fn test_forms_and_submissions() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sites/s1/forms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "f1", "name": "contact", "paths": ["/contact"], "submission_count": 4 },
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sites/s1/submissions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let forms = client.list_forms("s1").await.unwrap();
    let submissions = client.list_submissions("s1").await.unwrap();

    assert_eq!(forms[0].submission_count, Some(4));
    assert!(submissions.is_empty());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_error_preserves_raw_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sites/s2/builds"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.list_builds("s2").await;

    match result {
        Err(Error::Upstream { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Upstream error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_is_upstream_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sites"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "code": 401, "message": "Access Denied" })),
        )
        .mount(&server)
        .await;

    let err = client.list_sites().await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("Access Denied"));
}

#[tokio::test]
async fn test_invalid_json_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sites/s1/forms"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.list_forms("s1").await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_wrong_shape_is_deserialization_error() {
    let (server, client) = setup().await;

    // Object where an array is expected.
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "a1" })))
        .mount(&server)
        .await;

    let result = client.list_accounts().await;

    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop a server so the port is closed.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let token = SecretString::from("t".to_owned());
    let transport = TransportConfig {
        timeout: Duration::from_secs(2),
        ..TransportConfig::default()
    };
    let client = NetlifyClient::new(&uri, &token, "", "", &transport).unwrap();

    let result = client.list_sites().await;

    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
}
