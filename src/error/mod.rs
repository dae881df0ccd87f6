//! Error handling
//!
//! Defines error types and handling for the time server.

pub mod handlers;
pub mod types;

pub use handlers::{handle_error, log_session_error};
pub use types::*;
