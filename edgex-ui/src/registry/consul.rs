//! Consul HTTP API によるレジストリクライアント

use super::{RegistryClient, RegistryClientFactory, RegistryConfig, REGISTRY_TYPE_CONSUL};
use crate::common::error::{status_from_upstream, RegistryError};
use crate::common::types::ServiceEndpoint;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Consul ACLトークンを載せるヘッダー
pub const CONSUL_TOKEN_HEADER: &str = "X-Consul-Token";

const AGENT_SERVICES_PATH: &str = "/v1/agent/services";
const STATUS_LEADER_PATH: &str = "/v1/status/leader";

/// `/v1/agent/services` の各エントリ（使うフィールドのみ）
#[derive(Debug, Deserialize)]
struct AgentService {
    #[serde(rename = "Address", default)]
    address: String,
    #[serde(rename = "Port", default)]
    port: u16,
}

/// Consulクライアント
#[derive(Debug, Clone)]
pub struct ConsulClient {
    http_client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ConsulClient {
    fn new(http_client: reqwest::Client, config: &RegistryConfig) -> Self {
        let token = if config.access_token.is_empty() {
            None
        } else {
            Some(config.access_token.clone())
        };

        Self {
            http_client,
            base_url: format!("http://{}:{}", config.host, config.port),
            token,
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.http_client.get(format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => request.header(CONSUL_TOKEN_HEADER, token),
            None => request,
        }
    }
}

#[async_trait]
impl RegistryClient for ConsulClient {
    async fn get_all_service_endpoints(&self) -> Result<Vec<ServiceEndpoint>, RegistryError> {
        let response = self
            .get(AGENT_SERVICES_PATH)
            .send()
            .await
            .map_err(|e| RegistryError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RegistryError::UnexpectedStatus(status_from_upstream(
                response.status(),
            )));
        }

        let services = response
            .json::<HashMap<String, AgentService>>()
            .await
            .map_err(|e| RegistryError::Decode(e.to_string()))?;

        let mut endpoints: Vec<ServiceEndpoint> = services
            .into_iter()
            .map(|(service_id, service)| ServiceEndpoint {
                service_id,
                host: service.address,
                port: service.port,
            })
            .collect();
        endpoints.sort_by(|a, b| a.service_id.cmp(&b.service_id));

        Ok(endpoints)
    }

    async fn is_alive(&self) -> bool {
        let response = match self.get(STATUS_LEADER_PATH).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(base_url = %self.base_url, error = %e, "Consul leader request failed");
                return false;
            }
        };

        if !response.status().is_success() {
            debug!(
                base_url = %self.base_url,
                status = %response.status(),
                "Consul leader request returned error status"
            );
            return false;
        }

        match response.json::<String>().await {
            Ok(leader) => !leader.is_empty(),
            Err(e) => {
                debug!(base_url = %self.base_url, error = %e, "Failed to decode Consul leader");
                false
            }
        }
    }
}

/// Consulクライアントのファクトリ
///
/// 共有HTTPクライアント（接続プール、タイムアウト設定済み）を各クライアントに渡す。
#[derive(Debug, Clone)]
pub struct ConsulClientFactory {
    http_client: reqwest::Client,
}

impl ConsulClientFactory {
    /// 新しいファクトリを作成
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

impl RegistryClientFactory for ConsulClientFactory {
    fn create(&self, config: RegistryConfig) -> Result<Box<dyn RegistryClient>, RegistryError> {
        validate(&config)?;
        Ok(Box::new(ConsulClient::new(self.http_client.clone(), &config)))
    }
}

fn validate(config: &RegistryConfig) -> Result<(), RegistryError> {
    if config.registry_type != REGISTRY_TYPE_CONSUL {
        return Err(RegistryError::UnknownType(config.registry_type.clone()));
    }
    if config.host.trim().is_empty() {
        return Err(RegistryError::InvalidConfig("host is empty".to_string()));
    }
    if config.port == 0 {
        return Err(RegistryError::InvalidConfig("port is zero".to_string()));
    }
    if config.check_interval.is_empty() {
        return Err(RegistryError::InvalidConfig(
            "check interval is empty".to_string(),
        ));
    }
    if !config.check_route.starts_with('/') {
        return Err(RegistryError::InvalidConfig(format!(
            "check route must start with '/': {:?}",
            config.check_route
        )));
    }
    Ok(())
}
