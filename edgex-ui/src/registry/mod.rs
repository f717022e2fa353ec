//! サービスレジストリクライアント
//!
//! リクエストごとにレジストリ設定を組み立て、注入されたファクトリで
//! クライアントを生成する。クライアントはキャッシュしない。

pub mod consul;

use crate::common::{error::RegistryError, types::ServiceEndpoint};
use crate::config::RegistryEndpointConfig;
use async_trait::async_trait;
use std::fmt;

pub use consul::{ConsulClient, ConsulClientFactory};

/// ヘルスチェック間隔
pub const CHECK_INTERVAL: &str = "2s";

/// ヘルスチェックルート
pub const CHECK_ROUTE: &str = "/api/v1/ping";

/// レジストリ種別（Consul）
pub const REGISTRY_TYPE_CONSUL: &str = "consul";

/// レジストリクライアント設定
///
/// リクエストスコープで生成され、永続化されない。
#[derive(Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// レジストリのホスト
    pub host: String,
    /// レジストリのポート
    pub port: u16,
    /// ヘルスチェック間隔
    pub check_interval: String,
    /// ヘルスチェックルート
    pub check_route: String,
    /// レジストリ種別
    pub registry_type: String,
    /// ACLトークン（セキュリティ無効時は空）
    pub access_token: String,
}

impl RegistryConfig {
    /// 接続先とトークンから固定値入りの設定を作成
    pub fn new(endpoint: &RegistryEndpointConfig, access_token: impl Into<String>) -> Self {
        Self {
            host: endpoint.host.clone(),
            port: endpoint.port,
            check_interval: CHECK_INTERVAL.to_string(),
            check_route: CHECK_ROUTE.to_string(),
            registry_type: REGISTRY_TYPE_CONSUL.to_string(),
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("check_interval", &self.check_interval)
            .field("check_route", &self.check_route)
            .field("registry_type", &self.registry_type)
            .field(
                "access_token",
                &if self.access_token.is_empty() { "" } else { "***" },
            )
            .finish()
    }
}

/// レジストリクライアント
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// 登録済みの全サービスエンドポイントを取得
    async fn get_all_service_endpoints(&self) -> Result<Vec<ServiceEndpoint>, RegistryError>;

    /// レジストリが応答可能か
    async fn is_alive(&self) -> bool;
}

/// レジストリクライアントのファクトリ
///
/// ハンドラーはこのトレイト経由でクライアントを生成する。
pub trait RegistryClientFactory: Send + Sync {
    /// 設定からクライアントを生成
    fn create(&self, config: RegistryConfig) -> Result<Box<dyn RegistryClient>, RegistryError>;
}

/// トークンを載せたレジストリクライアントを生成
pub fn make_registry_client(
    factory: &dyn RegistryClientFactory,
    endpoint: &RegistryEndpointConfig,
    token: &str,
) -> Result<Box<dyn RegistryClient>, RegistryError> {
    factory.create(RegistryConfig::new(endpoint, token))
}
