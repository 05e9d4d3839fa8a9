mod cli;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use clickup::{config, Client};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = cli::parse_args(&args)?;

    if command == cli::Command::Help {
        cli::print_help();
        return Ok(());
    }

    let config = config::load_config()?;
    let client = Client::from_config(&config);

    cli::run(command, &client).await
}
