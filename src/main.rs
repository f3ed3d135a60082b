use anyhow::Result;
use clap::Parser;

use smartlink::cli::{Cli, Commands};
use smartlink::config::init_config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_config();

    match cli.command {
        None | Some(Commands::Serve) => serve().await,
        Some(cmd) => run_command(cmd).await,
    }
}

#[cfg(feature = "server")]
async fn serve() -> Result<()> {
    let config = smartlink::config::get_config();
    let _guard = smartlink::system::init_logging(&config.logging)?;
    smartlink::runtime::modes::run_server().await
}

#[cfg(not(feature = "server"))]
async fn serve() -> Result<()> {
    anyhow::bail!("smartlink was built without the `server` feature")
}

#[cfg(feature = "cli")]
async fn run_command(cmd: Commands) -> Result<()> {
    if let Err(e) = smartlink::interfaces::cli::run_cli_command(cmd).await {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
async fn run_command(_cmd: Commands) -> Result<()> {
    anyhow::bail!("smartlink was built without the `cli` feature")
}
