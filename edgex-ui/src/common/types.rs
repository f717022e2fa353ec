//! 共通データ型
//!
//! ゲートウェイACLレスポンスとサービスエンドポイント

use serde::{Deserialize, Serialize};

/// ゲートウェイのACLエンドポイント（`/consul/v1/acl/token/self`）のレスポンス
///
/// リクエストごとに一度だけデコードされ、トークン抽出後に破棄される。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclResponse {
    /// Consul ACLトークンのシークレット（欠落・`null` は空トークン扱い）
    #[serde(rename = "SecretID", default)]
    pub secret_id: Option<String>,
}

/// レジストリに登録されたサービスのエンドポイント
///
/// UIが期待するフィールド名（`ServiceId`, `Host`, `Port`）でシリアライズする。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceEndpoint {
    /// サービスID
    pub service_id: String,
    /// ホスト名またはIPアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
}
