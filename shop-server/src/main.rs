//! shop-agent binary: `shop-agent run [--host H] [--port P]`.

use anyhow::Result;
use clap::Parser;
use shop_server::{run_server, AppConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { host, port } => {
            let config = AppConfig::load().with_bind(host, port);
            run_server(config).await
        }
    }
}
