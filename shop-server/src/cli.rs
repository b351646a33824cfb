//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shop-agent")]
#[command(about = "AI shopping assistant HTTP service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (config from env; flags override HOST / PORT).
    Run {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
}
