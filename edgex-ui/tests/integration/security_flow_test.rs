//! Integration Test: ゲートウェイ認証の有無による処理フロー

use edgex_ui::config::{GatewayConfig, ServiceConfig, UiConfig};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::ui::{gateway_config, spawn_test_ui, FakeRegistry, RecordingFactory};

/// セキュリティ無効時はゲートウェイに問い合わせず、空トークンでクライアントを生成する
#[tokio::test]
async fn test_security_disabled_skips_gateway() {
    let gateway = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"SecretID": "abc"})))
        .expect(0)
        .mount(&gateway)
        .await;

    let factory = RecordingFactory::new(FakeRegistry::Endpoints(Vec::new()));
    let config = UiConfig {
        gateway: gateway_config(&gateway),
        security_enabled: false,
        ..UiConfig::default()
    };
    let server = spawn_test_ui(config, factory.clone()).await;
    let client = Client::new();

    let list = client
        .get(server.url("/api/v3/registercenter/service/all"))
        .header("Authorization", "Bearer ignored")
        .send()
        .await
        .unwrap();
    assert_eq!(list.status().as_u16(), 200);

    let ping = client
        .get(server.url("/api/v3/registercenter/ping"))
        .send()
        .await
        .unwrap();
    assert_eq!(ping.status().as_u16(), 200);

    assert_eq!(factory.tokens(), vec![String::new(), String::new()]);

    server.stop().await;
}

/// ゲートウェイに接続できない場合は500と説明付きのボディを返す
#[tokio::test]
async fn test_gateway_unreachable_returns_500() {
    let factory = RecordingFactory::new(FakeRegistry::Endpoints(Vec::new()));
    let config = UiConfig {
        gateway: GatewayConfig {
            server: "127.0.0.1".to_string(),
            application_port: 1,
        },
        security_enabled: true,
        ..UiConfig::default()
    };
    let server = spawn_test_ui(config, factory.clone()).await;
    let client = Client::new();

    for path in [
        "/api/v3/registercenter/service/all",
        "/api/v3/registercenter/ping",
    ] {
        let response = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(response.status().as_u16(), 500, "path: {}", path);

        let body: Value = response.json().await.unwrap();
        let message = body["error"].as_str().unwrap();
        assert!(!message.is_empty());
        assert!(message.contains("gateway unreachable"), "message: {}", message);
    }

    // サーバーはパニックせずに応答を続ける
    let response = client
        .get(server.url("/api/v3/registercenter/ping"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 500);
    assert!(factory.tokens().is_empty());

    server.stop().await;
}

/// ゲートウェイが200でも本文が不正なら500
#[tokio::test]
async fn test_gateway_invalid_body_returns_500() {
    let gateway = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&gateway)
        .await;

    let factory = RecordingFactory::new(FakeRegistry::Endpoints(Vec::new()));
    let config = UiConfig {
        gateway: gateway_config(&gateway),
        security_enabled: true,
        ..UiConfig::default()
    };
    let server = spawn_test_ui(config, factory).await;

    let response = Client::new()
        .get(server.url("/api/v3/registercenter/service/all"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "unable to get consul acl token: invalid gateway response"
    );

    server.stop().await;
}

/// ゲートウェイの応答が設定したタイムアウトを超えると500で打ち切る
#[tokio::test]
async fn test_gateway_slower_than_request_timeout_returns_500() {
    let gateway = MockServer::start().await;
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"SecretID": "late"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&gateway)
        .await;

    let factory = RecordingFactory::new(FakeRegistry::Endpoints(Vec::new()));
    let config = UiConfig {
        service: ServiceConfig {
            request_timeout_secs: 1,
            ..ServiceConfig::default()
        },
        gateway: gateway_config(&gateway),
        security_enabled: true,
        ..UiConfig::default()
    };
    let server = spawn_test_ui(config, factory.clone()).await;

    let started = Instant::now();
    let response = Client::new()
        .get(server.url("/api/v3/registercenter/service/all"))
        .send()
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(response.status().as_u16(), 500);
    assert!(elapsed < Duration::from_secs(4), "elapsed: {:?}", elapsed);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "unable to get consul acl token: gateway unreachable"
    );
    assert!(factory.tokens().is_empty());

    server.stop().await;
}

/// `SecretID` が null の場合は空トークンで処理を続ける
#[tokio::test]
async fn test_gateway_null_secret_continues_with_empty_token() {
    let gateway = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"SecretID": null})))
        .mount(&gateway)
        .await;

    let factory = RecordingFactory::new(FakeRegistry::Endpoints(Vec::new()));
    let config = UiConfig {
        gateway: gateway_config(&gateway),
        security_enabled: true,
        ..UiConfig::default()
    };
    let server = spawn_test_ui(config, factory.clone()).await;

    let response = Client::new()
        .get(server.url("/api/v3/registercenter/ping"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(factory.tokens(), vec![String::new()]);

    server.stop().await;
}
