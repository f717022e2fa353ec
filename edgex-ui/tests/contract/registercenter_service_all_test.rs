//! Contract Test: GET /api/v3/registercenter/service/all

use edgex_ui::common::types::ServiceEndpoint;
use edgex_ui::config::UiConfig;
use reqwest::Client;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::ui::{gateway_config, spawn_test_ui, FakeRegistry, RecordingFactory};

const SERVICE_ALL: &str = "/api/v3/registercenter/service/all";

fn two_endpoints() -> Vec<ServiceEndpoint> {
    vec![
        ServiceEndpoint {
            service_id: "core-command".to_string(),
            host: "edgex-core-command".to_string(),
            port: 59882,
        },
        ServiceEndpoint {
            service_id: "core-data".to_string(),
            host: "edgex-core-data".to_string(),
            port: 59880,
        },
    ]
}

#[tokio::test]
async fn test_service_all_returns_registry_endpoints_as_json() {
    let factory = RecordingFactory::new(FakeRegistry::Endpoints(two_endpoints()));
    let config = UiConfig {
        security_enabled: false,
        ..UiConfig::default()
    };
    let server = spawn_test_ui(config, factory.clone()).await;

    let response = Client::new()
        .get(server.url(SERVICE_ALL))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["content-type"],
        "application/json;charset=UTF-8"
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!([
            {"ServiceId": "core-command", "Host": "edgex-core-command", "Port": 59882},
            {"ServiceId": "core-data", "Host": "edgex-core-data", "Port": 59880}
        ])
    );

    server.stop().await;
}

#[tokio::test]
async fn test_service_all_forwards_authorization_and_uses_secret_id() {
    let gateway = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/consul/v1/acl/token/self"))
        .and(header("Authorization", "Bearer user-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"SecretID": "abc"})))
        .expect(1)
        .mount(&gateway)
        .await;

    let factory = RecordingFactory::new(FakeRegistry::Endpoints(two_endpoints()));
    let config = UiConfig {
        gateway: gateway_config(&gateway),
        security_enabled: true,
        ..UiConfig::default()
    };
    let server = spawn_test_ui(config, factory.clone()).await;

    let response = Client::new()
        .get(server.url(SERVICE_ALL))
        .header("Authorization", "Bearer user-jwt")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(factory.tokens(), vec!["abc".to_string()]);

    let configs = factory.configs();
    assert_eq!(configs[0].registry_type, "consul");
    assert_eq!(configs[0].check_interval, "2s");
    assert_eq!(configs[0].check_route, "/api/v1/ping");
    assert_eq!(configs[0].host, "localhost");
    assert_eq!(configs[0].port, 8500);

    server.stop().await;
}

#[tokio::test]
async fn test_service_all_surfaces_gateway_status() {
    let gateway = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/consul/v1/acl/token/self"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&gateway)
        .await;

    let factory = RecordingFactory::new(FakeRegistry::Endpoints(two_endpoints()));
    let config = UiConfig {
        gateway: gateway_config(&gateway),
        security_enabled: true,
        ..UiConfig::default()
    };
    let server = spawn_test_ui(config, factory.clone()).await;

    let response = Client::new()
        .get(server.url(SERVICE_ALL))
        .header("Authorization", "Bearer expired")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 403);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "unable to get consul acl token");
    assert!(factory.tokens().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_service_all_registry_failure_is_500_with_message() {
    let factory = RecordingFactory::new(FakeRegistry::NotAlive);
    let config = UiConfig {
        security_enabled: false,
        ..UiConfig::default()
    };
    let server = spawn_test_ui(config, factory).await;

    let response = Client::new()
        .get(server.url(SERVICE_ALL))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("registry unreachable"));

    server.stop().await;
}
