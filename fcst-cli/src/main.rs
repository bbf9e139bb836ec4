//! FCST CLI - Command line client for the forecast dashboard backend.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "fcst-cli",
    version,
    about = "Upload CSVs for forecasting and fetch the results"
)]
struct Cli {
    /// Base URL of the forecasting backend
    #[arg(short, long, global = true, default_value = fcst_cmd::DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: fcst_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    fcst_cmd::run(&cli.server, cli.command).await
}
