//! tmac entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use tmac_cli::cli::Cli;
use tmac_cli::commands;
use tmac_core::ApiClient;

fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let api = ApiClient::new(&cli.base_url);
    let mut stdout = std::io::stdout().lock();

    if let Err(e) = commands::execute(&api, cli.command, &mut stdout) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
