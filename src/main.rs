//! JAM Time Server - Entry Point
//!
//! A line-oriented TCP time server: `TIME` answers with the local time,
//! `QUIT` ends the session.

use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use jam_time_server::Server;
use jam_time_server::config::{CliArgs, ServerConfig};
use jam_time_server::error::handle_error;

#[tokio::main]
async fn main() -> ExitCode {
    // RUST_LOG overrides the default `info` filter
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let config = match ServerConfig::load(&args) {
        Ok(config) => config,
        Err(e) => {
            handle_error(&e);
            return ExitCode::FAILURE;
        }
    };

    info!("Launching time server on {}...", config.listen_address());

    let server = match Server::bind(config).await {
        Ok(server) => server,
        Err(e) => {
            handle_error(&e);
            return ExitCode::FAILURE;
        }
    };

    server.start_with_shutdown(shutdown_signal()).await;
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
