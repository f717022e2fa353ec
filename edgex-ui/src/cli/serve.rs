//! serve サブコマンド
//!
//! UIバックエンドサーバーを起動します。

use crate::common::error::UiResult;
use crate::config::UiConfig;
use crate::AppState;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Configuration file (TOML)
    #[arg(short, long, env = "EDGEX_UI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen port (overrides the configuration)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address (overrides the configuration)
    #[arg(short = 'H', long)]
    pub host: Option<String>,
}

impl ServeArgs {
    /// 設定を読み込み、CLI引数で上書きする
    pub fn load_config(&self) -> UiResult<UiConfig> {
        let mut config = UiConfig::load(self.config.as_deref())?;
        if let Some(host) = &self.host {
            config.service.host = host.clone();
        }
        if let Some(port) = self.port {
            config.service.port = port;
        }
        Ok(config)
    }
}

/// サーバーを起動
pub async fn execute(args: &ServeArgs) -> UiResult<()> {
    let config = args.load_config()?;

    info!(
        registry = %format!("{}:{}", config.registry.host, config.registry.port),
        gateway = %format!("{}:{}", config.gateway.server, config.gateway.application_port),
        security_enabled = config.security_enabled,
        "Loaded configuration"
    );

    let bind_addr = config.service.bind_addr();
    let state = AppState::new(config)?;
    crate::server::run(state, &bind_addr).await
}
