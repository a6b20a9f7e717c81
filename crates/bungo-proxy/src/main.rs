//! `bungo` binary entrypoint.

use bungo_proxy::{init_subscriber, serve, ProxyConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bungo")]
#[command(version, about = "Chat-completion relay that adds caller context to prompts", long_about = None)]
struct Cli {
    /// Path to a YAML config file (defaults to ./bungo.yml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ProxyConfig::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    init_subscriber(&config.telemetry);
    config.validate()?;

    serve(config).await
}
