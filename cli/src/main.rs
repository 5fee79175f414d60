//! riot - deploy built container images onto nodes and track what runs where

use clap::Parser;
use tracing_subscriber::EnvFilter;

use riot_cli::cli::Cli;
use riot_cli::output::json::{error_code, format_error};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RIOT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.is_json();
    if let Err(e) = cli.run().await {
        if json {
            match format_error(&format!("{e:#}"), error_code(&e)) {
                Ok(out) => println!("{out}"),
                Err(_) => eprintln!("Error: {e:#}"),
            }
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}
