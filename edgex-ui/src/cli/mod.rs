//! CLI module for edgex-ui
//!
//! Provides the command-line interface of the UI backend.

pub mod serve;

use clap::{Parser, Subcommand};

/// EdgeX UI backend - service registry proxy
#[derive(Parser, Debug)]
#[command(name = "edgex-ui")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    EDGEX_UI_CONFIG                  Configuration file (TOML)
    EDGEX_UI_LOG_LEVEL               Log level (default: info)
    EDGEX_UI_SERVICE__HOST           Bind address (default: 0.0.0.0)
    EDGEX_UI_SERVICE__PORT           Listen port (default: 4000)
    EDGEX_UI_REGISTRY__HOST          Registry host (default: localhost)
    EDGEX_UI_REGISTRY__PORT          Registry port (default: 8500)
    EDGEX_UI_GATEWAY__SERVER         Gateway host (default: localhost)
    EDGEX_UI_GATEWAY__APPLICATION_PORT  Gateway port (default: 8000)
    EDGEX_SECURITY_SECRET_STORE      Set to "false" to skip gateway authentication
"#)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Arguments used when no subcommand is given
    #[command(flatten)]
    pub serve: serve::ServeArgs,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the UI backend server (default)
    Serve(serve::ServeArgs),
}

impl Cli {
    /// 実行する serve 引数（サブコマンド省略時はトップレベルの引数）
    pub fn serve_args(self) -> serve::ServeArgs {
        match self.command {
            Some(Commands::Serve(args)) => args,
            None => self.serve,
        }
    }
}
