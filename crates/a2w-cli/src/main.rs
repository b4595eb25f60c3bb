use a2w_cli::{build_relay_config, init_tracing, Cli};
use a2w_gateway::run_relay_server;
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);
    let config = build_relay_config(&cli)?;
    run_relay_server(config).await
}
