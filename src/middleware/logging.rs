//! Logging middleware
//!
//! One place for the log lines a session emits over its lifetime.

use log::info;
use std::net::SocketAddr;

/// Log a client connection
pub fn log_connection(client_addr: SocketAddr) {
    info!("[CONNECTED] Client from {}", client_addr);
}

/// Log a decoded frame
pub fn log_frame(client_addr: SocketAddr, text: &str) {
    info!("[RECEIVED from {}] {:?}", client_addr, text);
}

/// Log a QUIT request
pub fn log_quit(client_addr: SocketAddr) {
    info!("[QUIT] Client {} requested to quit", client_addr);
}

/// Log connection teardown
pub fn log_closed(client_addr: SocketAddr) {
    info!("[CLOSED] Connection with {}", client_addr);
}
