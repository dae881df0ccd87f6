//! Time protocol implementation
//!
//! Handles CR LF framing, command parsing, dispatch and response formatting.

pub mod commands;
pub mod framing;
pub mod handlers;
pub mod responses;

pub use commands::{Command, CommandResult, CommandStatus, parse_command};
pub use framing::FrameReader;
pub use handlers::handle_command;
