//! Weighbridge Console - CLI client for the weighbridge data service

use clap::Parser;
use weighbridge_console::cli::Cli;
use weighbridge_console::commands;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
