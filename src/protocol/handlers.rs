//! Command handlers for the time server.
//!
//! Maps a parsed `Command` to the response the session writes back and to
//! whether the session keeps running.

use chrono::{Local, Timelike};

use crate::protocol::responses::{INVALID_REQUEST, format_time_response};
use crate::protocol::{Command, CommandResult, CommandStatus};

/// Dispatches a command against the server's local clock.
pub fn handle_command(command: &Command) -> CommandResult {
    handle_command_at(command, &Local::now())
}

/// Dispatches a command as if the local time were `now`.
pub fn handle_command_at<T: Timelike>(command: &Command, now: &T) -> CommandResult {
    match command {
        Command::Time => handle_cmd_time(now),
        Command::Quit => handle_cmd_quit(),
        Command::Unknown(_) => handle_cmd_unknown(),
    }
}

fn handle_cmd_time<T: Timelike>(now: &T) -> CommandResult {
    CommandResult {
        status: CommandStatus::Continue,
        message: Some(format_time_response(now)),
    }
}

/// QUIT closes the connection without a reply.
fn handle_cmd_quit() -> CommandResult {
    CommandResult {
        status: CommandStatus::CloseConnection,
        message: None,
    }
}

fn handle_cmd_unknown() -> CommandResult {
    CommandResult {
        status: CommandStatus::Continue,
        message: Some(INVALID_REQUEST.to_string()),
    }
}
