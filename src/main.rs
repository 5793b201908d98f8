//! nbcli - Main entry point

use clap::Parser;
use log::{debug, info};

use nbcli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting nbcli v{}", env!("CARGO_PKG_VERSION"));
    debug!("CLI args: {:?}", cli);

    if let Err(e) = nbcli::run(&cli).await {
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}
