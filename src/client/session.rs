//! Client session
//!
//! Drives one connection through the frame/dispatch state machine.

use std::net::SocketAddr;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::client::state::SessionState;
use crate::config::ServerConfig;
use crate::error::SessionError;
use crate::middleware::logging::{log_frame, log_quit};
use crate::protocol::{CommandStatus, FrameReader, handle_command, parse_command};

/// Per-connection state: the stream halves, the accumulation buffer (inside
/// the frame reader) and the lifecycle state.
pub struct Session<R, W> {
    client_addr: SocketAddr,
    frames: FrameReader<R>,
    writer: W,
    state: SessionState,
}

impl<R, W> Session<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(client_addr: SocketAddr, reader: R, writer: W, config: &ServerConfig) -> Self {
        Self {
            client_addr,
            frames: FrameReader::new(reader, config.read_chunk_size, config.max_frame_length),
            writer,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Serve commands until the client quits or an error ends the session.
    ///
    /// The session is `Closed` whenever this returns, whichever path got it
    /// there. `Ok` means the client sent QUIT.
    pub async fn run(&mut self) -> Result<(), SessionError> {
        let result = self.serve().await;
        self.state = SessionState::Closed;
        result
    }

    async fn serve(&mut self) -> Result<(), SessionError> {
        loop {
            let text = self.frames.read_frame().await?;
            log_frame(self.client_addr, &text);
            self.state = SessionState::Dispatching;

            let command = parse_command(&text);
            let result = handle_command(&command);

            if let Some(msg) = result.message {
                self.writer.write_all(msg.as_bytes()).await?;
                self.writer.flush().await?;
            }

            match result.status {
                CommandStatus::Continue => self.state = SessionState::AwaitingFrame,
                CommandStatus::CloseConnection => {
                    log_quit(self.client_addr);
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, duplex};

    fn addr() -> SocketAddr {
        "127.0.0.1:50000".parse().unwrap()
    }

    #[tokio::test]
    async fn test_quit_ends_session_without_reply() {
        let reader = tokio_test::io::Builder::new().read(b"QUIT\r\n").build();
        let mut out = Vec::new();
        let mut session = Session::new(addr(), reader, &mut out, &ServerConfig::default());

        assert_eq!(session.state(), SessionState::AwaitingFrame);
        session.run().await.unwrap();
        assert_eq!(session.state(), SessionState::Closed);
        drop(session);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_then_time_then_quit() {
        let reader = tokio_test::io::Builder::new()
            .read(b"hello\r\n")
            .read(b"tImE\r\nquit\r\n")
            .build();
        let mut out = Vec::new();
        let mut session = Session::new(addr(), reader, &mut out, &ServerConfig::default());
        session.run().await.unwrap();
        drop(session);

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.split_terminator("\r\n");
        assert_eq!(lines.next(), Some("INVALID REQUEST"));
        let time = lines.next().unwrap();
        assert!(time.starts_with("JAM "), "got {time:?}");
        assert_eq!(lines.next(), None);
    }

    #[tokio::test]
    async fn test_peer_closed_mid_frame() {
        let reader = tokio_test::io::Builder::new().read(b"TIM").build();
        let mut out = Vec::new();
        let mut session = Session::new(addr(), reader, &mut out, &ServerConfig::default());

        let err = session.run().await.unwrap_err();
        assert!(matches!(err, SessionError::PeerClosed));
        assert!(session.state().is_closed());
        drop(session);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_closes_session() {
        let reader = tokio_test::io::Builder::new().read(b"TIME\r\n").build();
        let (client, server) = duplex(64);
        drop(client);
        let mut session = Session::new(addr(), reader, server, &ServerConfig::default());

        assert!(matches!(session.run().await, Err(SessionError::Io(_))));
        assert!(session.state().is_closed());
    }

    #[tokio::test]
    async fn test_session_over_duplex() {
        let (mut client, server) = duplex(64);
        let (server_read, server_write) = tokio::io::split(server);
        let task = tokio::spawn(async move {
            let mut session =
                Session::new(addr(), server_read, server_write, &ServerConfig::default());
            session.run().await
        });

        client.write_all(b"nope\r\n").await.unwrap();
        let mut buf = [0u8; 17];
        client.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"INVALID REQUEST\r\n");

        client.write_all(b"QUIT\r\n").await.unwrap();
        assert!(task.await.unwrap().is_ok());
    }
}
