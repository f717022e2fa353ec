//! ロギング初期化
//!
//! `EDGEX_UI_LOG_LEVEL`（旧: `LOG_LEVEL`）を `EnvFilter` の指定として使う。

use crate::config::get_env_with_fallback_or;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// デフォルトのログレベル
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// ログフィルタ文字列を取得
pub fn log_filter() -> String {
    get_env_with_fallback_or("EDGEX_UI_LOG_LEVEL", "LOG_LEVEL", DEFAULT_LOG_LEVEL)
}

/// グローバルなtracing subscriberを初期化
///
/// 既に初期化済みの場合はエラーを返す。
pub fn init() -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_new(log_filter()).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
