//! Integration tests for ReqwestTransport using wiremock.

use std::time::Duration;

use dexcache_core::{ResourceKey, ResourceKind, Transport, TransportError};
use dexcache_reqwest::{Error, ReqwestTransport};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(server: &MockServer) -> ReqwestTransport {
    ReqwestTransport::builder()
        .base_url(format!("{}/api/v2/", server.uri()))
        .timeout(Duration::from_millis(500))
        .user_agent("dexcache-tests")
        .build()
        .unwrap()
}

/// Test 1: the resource path is `<base>/<kind>/<identifier>` and the body is passed through
#[tokio::test]
async fn test_get_requests_resource_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/pikachu"))
        .and(header("user-agent", "dexcache-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 25,
            "name": "pikachu"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = transport(&mock_server);
    let key = ResourceKey::new(ResourceKind::Pokemon, "Pikachu").unwrap();

    let response = transport.get(&key).await.unwrap();
    assert_eq!(response.status, 200);
    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body["name"], "pikachu");
}

/// Test 2: error statuses are returned, not turned into transport errors
#[tokio::test]
async fn test_error_statuses_pass_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/ability/not-a-real-ability"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/berry/cheri"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let transport = transport(&mock_server);

    let missing = ResourceKey::new(ResourceKind::Ability, "not-a-real-ability").unwrap();
    let response = transport.get(&missing).await.unwrap();
    assert_eq!(response.status, 404);
    assert_eq!(&response.body[..], b"Not Found");

    let flaky = ResourceKey::new(ResourceKind::Berry, "cheri").unwrap();
    assert_eq!(transport.get(&flaky).await.unwrap().status, 503);
}

/// Test 3: a slow upstream is reported as a timeout carrying the configured duration
#[tokio::test]
async fn test_slow_upstream_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/move/thunderbolt"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let transport = transport(&mock_server);
    let key = ResourceKey::new(ResourceKind::Move, "thunderbolt").unwrap();

    let error = transport.get(&key).await.unwrap_err();
    assert_eq!(error, TransportError::Timeout(Duration::from_millis(500)));
}

/// Test 4: a closed port is reported as unreachable
#[tokio::test]
async fn test_closed_port_is_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = ReqwestTransport::builder()
        .base_url(format!("http://{addr}"))
        .build()
        .unwrap();
    let key = ResourceKey::new(ResourceKind::Region, "kanto").unwrap();

    let error = transport.get(&key).await.unwrap_err();
    assert!(
        matches!(error, TransportError::Unreachable(_)),
        "expected unreachable, got {error:?}"
    );
}

/// Test 5: base URLs are validated and normalized
#[test]
fn test_base_url_validation() {
    let transport = ReqwestTransport::builder()
        .base_url(" https://pokeapi.co/api/v2/ ")
        .build()
        .unwrap();
    assert_eq!(transport.base_url(), "https://pokeapi.co/api/v2");

    let key = ResourceKey::new(ResourceKind::VersionGroup, "red-blue").unwrap();
    assert_eq!(
        transport.url_for(&key),
        "https://pokeapi.co/api/v2/version-group/red-blue"
    );

    for bad in ["pokeapi.co/api/v2", "ftp://pokeapi.co", ""] {
        assert!(
            matches!(
                ReqwestTransport::builder().base_url(bad).build(),
                Err(Error::InvalidBaseUrl(_))
            ),
            "{bad:?} should be rejected"
        );
    }
}
