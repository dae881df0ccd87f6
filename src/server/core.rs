use log::{debug, error, info};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpSocket, lookup_host};

use crate::client::{SessionRegistry, handle_client};
use crate::config::ServerConfig;
use crate::error::ServerError;

pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    sessions: SessionRegistry,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Binds the listening socket described by `config`.
    ///
    /// Fails with `ServerError::Bind` when the address is in use or not
    /// permitted; callers treat that as fatal.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        config.validate()?;

        let listen_address = config.listen_address();
        let addr = lookup_host(&listen_address)
            .await
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| {
                ServerError::Config(config::ConfigError::Message(format!(
                    "Cannot resolve bind address {}",
                    listen_address
                )))
            })?;

        let listener = listen(addr, config.backlog).map_err(|source| {
            error!("Failed to bind to {}: {}", addr, source);
            ServerError::Bind { addr, source }
        })?;
        let local_addr = listener.local_addr()?;
        info!("Server bound to {}", local_addr);

        Ok(Self {
            listener,
            local_addr,
            sessions: SessionRegistry::new(),
            config: Arc::new(config),
        })
    }

    /// Address the listener actually bound, useful when the port was 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept clients forever.
    pub async fn start(self) {
        self.start_with_shutdown(std::future::pending::<()>()).await
    }

    /// Accept clients until `shutdown` completes.
    ///
    /// Sessions already running are not drained; they end with the runtime.
    pub async fn start_with_shutdown<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!("[STARTED] Time server running on {}", self.local_addr);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    self.sessions.prune();
                    info!(
                        "Shutting down listener on {} ({} sessions still open)",
                        self.local_addr,
                        self.sessions.len()
                    );
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => {
                        let config = Arc::clone(&self.config);

                        // Spawn a task for each client so accept loop doesn't block
                        let handle = tokio::spawn(handle_client(stream, addr, config));
                        self.sessions.track(handle);
                        debug!("{} sessions tracked", self.sessions.len());
                    }
                    Err(e) => {
                        error!("Error accepting connection: {}", e);
                    }
                }
            }
        }
    }
}

fn listen(addr: SocketAddr, backlog: u32) -> std::io::Result<TcpListener> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.bind(addr)?;
    socket.listen(backlog)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config() -> ServerConfig {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 0,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let server = Server::bind(local_config()).await.unwrap();
        assert_ne!(server.local_addr().port(), 0);
        assert!(server.local_addr().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_bind_port_in_use_fails() {
        let first = Server::bind(local_config()).await.unwrap();
        let taken = ServerConfig {
            port: first.local_addr().port(),
            ..local_config()
        };
        assert!(matches!(
            Server::bind(taken).await,
            Err(ServerError::Bind { .. })
        ));
    }

    #[tokio::test]
    async fn test_bind_rejects_invalid_config() {
        let config = ServerConfig {
            read_chunk_size: 0,
            ..local_config()
        };
        assert!(matches!(
            Server::bind(config).await,
            Err(ServerError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_shutdown_stops_accept_loop() {
        let server = Server::bind(local_config()).await.unwrap();
        server.start_with_shutdown(async {}).await;
    }
}
