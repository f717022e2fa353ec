//! Configuration management
//!
//! Settings come from (lowest to highest precedence) built-in defaults, an
//! optional TOML file, and `EDGEX_UI_*` environment variables. The security
//! toggle is resolved separately from `EDGEX_SECURITY_SECRET_STORE` and
//! injected into [`UiConfig`] so handlers never read the environment.

use crate::common::error::{UiError, UiResult};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// セキュリティ（シークレットストア）有効化フラグの環境変数
pub const ENV_SECRET_STORE: &str = "EDGEX_SECURITY_SECRET_STORE";

/// 設定ファイルが指定されない場合に探すパス
pub const DEFAULT_CONFIG_FILE: &str = "res/configuration.toml";

/// 環境変数による上書きのプレフィックス（例: `EDGEX_UI_REGISTRY__HOST`）
pub const ENV_PREFIX: &str = "EDGEX_UI";

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use edgex_ui::config::get_env_with_fallback;
///
/// let level = get_env_with_fallback("EDGEX_UI_LOG_LEVEL", "LOG_LEVEL");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// セキュリティフラグの値を解釈する
///
/// 値がちょうど `"false"` のときのみ無効。未設定を含むそれ以外はすべて有効。
pub fn is_security_enabled_value(value: Option<&str>) -> bool {
    value != Some("false")
}

/// 環境変数 `EDGEX_SECURITY_SECRET_STORE` からセキュリティフラグを取得
pub fn is_security_enabled() -> bool {
    let value = std::env::var(ENV_SECRET_STORE).ok();
    is_security_enabled_value(value.as_deref())
}

/// UIサービス自身の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// バインドアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_service_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 4000)
    #[serde(default = "default_service_port")]
    pub port: u16,

    /// 外向きHTTPリクエストのタイムアウト（秒）(デフォルト: 10)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_service_host() -> String {
    "0.0.0.0".to_string()
}

fn default_service_port() -> u16 {
    4000
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_service_host(),
            port: default_service_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ServiceConfig {
    /// `host:port` 形式のバインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 外向きリクエストのタイムアウト
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// レジストリ（Consul）の接続先
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEndpointConfig {
    /// ホスト (デフォルト: "localhost")
    #[serde(default = "default_registry_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 8500)
    #[serde(default = "default_registry_port")]
    pub port: u16,
}

fn default_registry_host() -> String {
    "localhost".to_string()
}

fn default_registry_port() -> u16 {
    8500
}

impl Default for RegistryEndpointConfig {
    fn default() -> Self {
        Self {
            host: default_registry_host(),
            port: default_registry_port(),
        }
    }
}

/// APIゲートウェイの接続先
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// ゲートウェイのホスト (デフォルト: "localhost")
    #[serde(default = "default_gateway_server")]
    pub server: String,

    /// ゲートウェイのアプリケーションポート (デフォルト: 8000)
    #[serde(default = "default_gateway_port")]
    pub application_port: u16,
}

fn default_gateway_server() -> String {
    "localhost".to_string()
}

fn default_gateway_port() -> u16 {
    8000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: default_gateway_server(),
            application_port: default_gateway_port(),
        }
    }
}

/// UIバックエンド全体の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// サービス設定
    #[serde(default)]
    pub service: ServiceConfig,

    /// レジストリ設定
    #[serde(default)]
    pub registry: RegistryEndpointConfig,

    /// ゲートウェイ設定
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// ゲートウェイ認証を行うか（ファイルからは読まない）
    #[serde(skip, default = "default_security_enabled")]
    pub security_enabled: bool,
}

fn default_security_enabled() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            registry: RegistryEndpointConfig::default(),
            gateway: GatewayConfig::default(),
            security_enabled: default_security_enabled(),
        }
    }
}

impl UiConfig {
    /// 設定を読み込む
    ///
    /// `path` が指定された場合そのファイルは必須。未指定の場合は
    /// [`DEFAULT_CONFIG_FILE`] を存在すれば読む。その後 `EDGEX_UI_*` 環境変数で
    /// 上書きし、最後にセキュリティフラグを環境から解決する。
    pub fn load(path: Option<&Path>) -> UiResult<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| UiError::Config(e.to_string()))?;

        let mut config: UiConfig = settings
            .try_deserialize()
            .map_err(|e| UiError::Config(e.to_string()))?;
        config.security_enabled = is_security_enabled();

        Ok(config)
    }
}
