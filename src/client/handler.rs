use log::debug;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::client::Session;
use crate::config::ServerConfig;
use crate::error::log_session_error;
use crate::middleware::logging::{log_closed, log_connection};

/// Serves one client connection to completion.
///
/// Every exit path (QUIT, disconnect, protocol or I/O error) ends in the
/// same teardown, so the connection is shut down exactly once. Errors are
/// logged here and never reach the listener.
pub async fn handle_client(
    mut stream: TcpStream,
    client_addr: SocketAddr,
    config: Arc<ServerConfig>,
) {
    log_connection(client_addr);

    {
        let (read_half, write_half) = stream.split();
        let mut session = Session::new(client_addr, read_half, write_half, &config);
        if let Err(e) = session.run().await {
            log_session_error(client_addr, &e);
        }
    }

    if let Err(e) = stream.shutdown().await {
        debug!("Shutdown of {} failed: {}", client_addr, e);
    }
    drop(stream);
    log_closed(client_addr);
}
