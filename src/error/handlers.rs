//! Error handlers
//!
//! Maps errors to the log level the operator sees.

use crate::error::types::{ServerError, SessionError};
use log::{error, warn};
use std::net::SocketAddr;

/// Log a session-ending error for `client_addr`.
///
/// A peer hanging up mid-frame is expected traffic and only warrants a
/// warning; everything else is an error.
pub fn log_session_error(client_addr: SocketAddr, err: &SessionError) {
    match err {
        SessionError::PeerClosed => {
            warn!("[DISCONNECTED] Client {} closed the connection", client_addr)
        }
        _ => error!("[ERROR] Handling client {}: {}", client_addr, err),
    }
}

/// Log a fatal server error
pub fn handle_error(err: &ServerError) {
    error!("Time server error: {}", err);
}
