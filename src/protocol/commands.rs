//! Module `commands`
//!
//! Defines the time protocol commands, their parsing from frame text, and the
//! result structures produced by dispatch.

/// A command parsed from one decoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Report the server's local wall-clock time
    Time,
    /// End the session without a response
    Quit,
    /// Anything else, kept verbatim for logging
    Unknown(String),
}

/// Represents the outcome status of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    Continue,
    CloseConnection,
}

/// Status plus the bytes to send back, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

/// Parses trimmed frame text into a `Command`.
///
/// Matching is case-insensitive and covers the whole text: `TIME now` is not
/// `TIME`.
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();

    if trimmed.eq_ignore_ascii_case("TIME") {
        Command::Time
    } else if trimmed.eq_ignore_ascii_case("QUIT") {
        Command::Quit
    } else {
        Command::Unknown(trimmed.to_string())
    }
}
