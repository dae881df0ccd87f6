//! Error types
//!
//! Defines the per-session and process-level error types of the time server.

use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::string::FromUtf8Error;

/// Errors that end a single client session.
///
/// None of these are fatal to the server; the session task logs the error
/// and closes its connection.
#[derive(Debug)]
pub enum SessionError {
    /// The peer closed the stream before a complete frame arrived.
    PeerClosed,
    /// The frame was not valid UTF-8.
    Protocol(FromUtf8Error),
    /// The accumulation buffer outgrew the configured frame limit.
    FrameTooLong(usize),
    /// Transport failure (reset, broken pipe, ...).
    Io(io::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::PeerClosed => write!(f, "Peer closed the connection"),
            SessionError::Protocol(e) => write!(f, "Malformed frame: {}", e),
            SessionError::FrameTooLong(limit) => {
                write!(f, "Frame exceeds maximum length of {} bytes", limit)
            }
            SessionError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Protocol(e) => Some(e),
            SessionError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(error: io::Error) -> Self {
        SessionError::Io(error)
    }
}

impl From<FromUtf8Error> for SessionError {
    fn from(error: FromUtf8Error) -> Self {
        SessionError::Protocol(error)
    }
}

/// Errors that stop the server process.
#[derive(Debug)]
pub enum ServerError {
    Bind { addr: SocketAddr, source: io::Error },
    Config(config::ConfigError),
    Io(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Bind { addr, source } => {
                write!(f, "Failed to bind to {}: {}", addr, source)
            }
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
            ServerError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Bind { source, .. } => Some(source),
            ServerError::Config(e) => Some(e),
            ServerError::Io(e) => Some(e),
        }
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_from_io() {
        let err: SessionError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe").into();
        assert!(matches!(err, SessionError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: pipe");
    }

    #[test]
    fn test_session_error_from_utf8() {
        let err: SessionError = String::from_utf8(vec![0xff, 0xfe]).unwrap_err().into();
        assert!(matches!(err, SessionError::Protocol(_)));
        assert!(err.to_string().starts_with("Malformed frame"));
    }

    #[test]
    fn test_bind_error_display() {
        let err = ServerError::Bind {
            addr: "0.0.0.0:45000".parse().unwrap(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        };
        assert_eq!(err.to_string(), "Failed to bind to 0.0.0.0:45000: in use");
    }
}
