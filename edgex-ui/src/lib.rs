//! EdgeX UI backend
//!
//! サービスレジストリ（Consul）へのプロキシAPIを提供するUIバックエンド

#![warn(missing_docs)]

/// 共通型定義
pub mod common;

/// REST APIハンドラー
pub mod api;

/// 設定管理（設定ファイル・環境変数）
pub mod config;

/// APIゲートウェイ（ACLトークン取得）
pub mod gateway;

/// サービスレジストリクライアント
pub mod registry;

/// ロギング初期化ユーティリティ
pub mod logging;

/// axumサーバー起動
pub mod server;

/// CLIインターフェース
pub mod cli;

use common::error::{UiError, UiResult};
use std::sync::Arc;

/// アプリケーション状態
///
/// 設定以外の共有可変状態は持たない。レジストリクライアントはリクエストごとに生成する。
#[derive(Clone)]
pub struct AppState {
    /// 起動時に確定した設定
    pub config: Arc<config::UiConfig>,
    /// ゲートウェイACLトークン取得クライアント
    pub acl_fetcher: gateway::AclTokenFetcher,
    /// レジストリクライアントのファクトリ
    pub registry_factory: Arc<dyn registry::RegistryClientFactory>,
}

impl AppState {
    /// 設定からConsulクライアントを使う状態を作成
    pub fn new(config: config::UiConfig) -> UiResult<Self> {
        let http_client = build_http_client(&config)?;
        let factory = Arc::new(registry::ConsulClientFactory::new(http_client.clone()));
        Ok(Self::with_registry_factory(config, http_client, factory))
    }

    /// 任意のレジストリファクトリで状態を作成
    pub fn with_registry_factory(
        config: config::UiConfig,
        http_client: reqwest::Client,
        registry_factory: Arc<dyn registry::RegistryClientFactory>,
    ) -> Self {
        let acl_fetcher = gateway::AclTokenFetcher::new(http_client, &config.gateway);
        Self {
            config: Arc::new(config),
            acl_fetcher,
            registry_factory,
        }
    }
}

/// 共有HTTPクライアント（接続プーリング有効、タイムアウト設定済み）を作成
pub fn build_http_client(config: &config::UiConfig) -> UiResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.service.request_timeout())
        .build()
        .map_err(|e| UiError::Config(format!("Failed to create HTTP client: {}", e)))
}
