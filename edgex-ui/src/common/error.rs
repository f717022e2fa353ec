//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! 失敗はすべて `{"error": "<message>"}` 形式のJSONでクライアントに返す。
//! 内部の詳細（ホスト名、ポート、下位エラー）はログにのみ出力する。

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// ゲートウェイのACLトークン取得エラー
#[derive(Debug, Error)]
pub enum AclTokenError {
    /// リクエストを組み立てられなかった
    #[error("Failed to build gateway request: {0}")]
    Request(String),

    /// 送信に失敗した（レスポンスなし、ステータスコードなし）
    #[error("Gateway transport error: {0}")]
    Transport(String),

    /// 200以外のステータス
    #[error("Gateway returned status {0}")]
    Status(StatusCode),

    /// 200応答のボディをデコードできなかった
    #[error("Failed to decode gateway response: {0}")]
    Decode(String),
}

impl AclTokenError {
    /// ゲートウェイから受信したステータスコード（送信失敗時は `None`）
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Request(_) | Self::Transport(_) => None,
            Self::Status(status) => Some(*status),
            Self::Decode(_) => Some(StatusCode::OK),
        }
    }
}

/// レジストリクライアントのエラー
#[derive(Debug, Error)]
pub enum RegistryError {
    /// 設定値が不正
    #[error("Invalid registry configuration: {0}")]
    InvalidConfig(String),

    /// 未対応のレジストリ種別
    #[error("Unknown registry type: {0}")]
    UnknownType(String),

    /// HTTP通信エラー
    #[error("Registry HTTP error: {0}")]
    Http(String),

    /// 2xx以外のステータス
    #[error("Registry returned status {0}")]
    UnexpectedStatus(StatusCode),

    /// レスポンスボディのデコード失敗
    #[error("Failed to decode registry response: {0}")]
    Decode(String),
}

/// UIバックエンドのエラー型
#[derive(Debug, Error)]
pub enum UiError {
    /// ACLトークン取得失敗
    #[error(transparent)]
    AclToken(#[from] AclTokenError),

    /// レジストリクライアントの生成失敗
    #[error("{0}")]
    ClientConstruction(RegistryError),

    /// レジストリ操作の失敗
    #[error("{0}")]
    RegistryOperation(RegistryError),

    /// JSONシリアライズ失敗
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// レジストリが応答しない
    #[error("registry not alive")]
    RegistryNotAlive,

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/Oエラー
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// ACLトークン取得失敗時の固定メッセージ
pub const ACL_TOKEN_ERROR_MESSAGE: &str = "unable to get consul acl token";

impl UiError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AclToken(AclTokenError::Status(status)) => *status,
            Self::AclToken(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ClientConstruction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::RegistryOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::RegistryNotAlive => StatusCode::SERVICE_UNAVAILABLE,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message sent to the caller.
    ///
    /// Token failures never echo the gateway address; registry failures carry
    /// the underlying error text.
    pub fn external_message(&self) -> String {
        match self {
            Self::AclToken(AclTokenError::Status(_)) => ACL_TOKEN_ERROR_MESSAGE.to_string(),
            Self::AclToken(AclTokenError::Transport(_)) => {
                format!("{}: gateway unreachable", ACL_TOKEN_ERROR_MESSAGE)
            }
            Self::AclToken(AclTokenError::Request(_) | AclTokenError::Decode(_)) => {
                format!("{}: invalid gateway response", ACL_TOKEN_ERROR_MESSAGE)
            }
            other => other.to_string(),
        }
    }

    /// Converts this error into the common error envelope.
    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.external_message(),
        }
    }
}

/// エラーレスポンスのボディ
///
/// ```json
/// { "error": "registry not alive" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
}

/// UIバックエンドの結果型
pub type UiResult<T> = Result<T, UiError>;

/// reqwestのステータスコードをaxum側の型に変換
pub(crate) fn status_from_upstream(status: reqwest::StatusCode) -> StatusCode {
    StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY)
}
