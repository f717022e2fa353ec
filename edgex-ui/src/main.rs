//! EdgeX UI backend entry point

use clap::Parser;
use edgex_ui::cli::{serve, Cli};
use edgex_ui::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init()?;
    tracing::info!("EdgeX UI v{}", env!("CARGO_PKG_VERSION"));

    serve::execute(&cli.serve_args()).await?;
    Ok(())
}
