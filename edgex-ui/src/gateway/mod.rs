//! APIゲートウェイからのACLトークン取得
//!
//! 呼び出し元の `Authorization` ヘッダーをそのままゲートウェイに転送し、
//! Consul ACLトークン（`SecretID`）を受け取る。

use crate::common::error::{status_from_upstream, AclTokenError};
use crate::common::types::AclResponse;
use crate::config::GatewayConfig;
use axum::http::StatusCode;
use reqwest::header::{HeaderValue, AUTHORIZATION};

/// ゲートウェイ上のConsul ACLエンドポイント
pub const ACL_OF_CONSUL_PATH: &str = "/consul/v1/acl/token/self";

/// 取得したACLトークン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclToken {
    /// トークンのシークレット
    pub secret_id: String,
    /// ゲートウェイのステータスコード
    pub status: StatusCode,
}

/// ゲートウェイACLトークン取得クライアント
#[derive(Debug, Clone)]
pub struct AclTokenFetcher {
    http_client: reqwest::Client,
    url: String,
}

impl AclTokenFetcher {
    /// 新しいフェッチャーを作成
    pub fn new(http_client: reqwest::Client, gateway: &GatewayConfig) -> Self {
        Self {
            http_client,
            url: format!(
                "http://{}:{}{}",
                gateway.server, gateway.application_port, ACL_OF_CONSUL_PATH
            ),
        }
    }

    /// 問い合わせ先URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// ACLトークンを取得
    ///
    /// `authorization` は受信リクエストのヘッダー値。未設定なら空値を転送する。
    /// ステータスは本文のデコードより先に検査するため、200以外は本文に関わらず
    /// [`AclTokenError::Status`] になる。
    pub async fn fetch(&self, authorization: Option<&[u8]>) -> Result<AclToken, AclTokenError> {
        let authorization = HeaderValue::from_bytes(authorization.unwrap_or_default())
            .map_err(|e| AclTokenError::Request(e.to_string()))?;

        let response = self
            .http_client
            .get(&self.url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    AclTokenError::Request(e.to_string())
                } else {
                    AclTokenError::Transport(e.to_string())
                }
            })?;

        let status = status_from_upstream(response.status());
        if status != StatusCode::OK {
            return Err(AclTokenError::Status(status));
        }

        let acl = response
            .json::<AclResponse>()
            .await
            .map_err(|e| AclTokenError::Decode(e.to_string()))?;

        Ok(AclToken {
            secret_id: acl.secret_id.unwrap_or_default(),
            status,
        })
    }
}
