use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::Cli::parse();

    // Initialize logging only if RUST_LOG is set; stdout carries the MCP
    // transport, so logs go to stderr
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init();

        tracing::info!("Starting Time MCP server");
    }

    if let Some(ref timezone) = args.local_timezone {
        tracing::info!("Local timezone override: {}", timezone);
    }

    if let Err(e) = server::run(args.local_timezone).await {
        tracing::error!("Failed to run Time MCP server: {}", e);
        return Err(e);
    }

    Ok(())
}
