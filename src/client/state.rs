//! Module `state`
//!
//! Lifecycle states of a client session.

/// Where a session is in its read/dispatch cycle.
///
/// `AwaitingFrame -> Dispatching` on a complete frame,
/// `Dispatching -> AwaitingFrame` once a non-terminal reply is written,
/// `Dispatching -> Closed` on QUIT or a failed write, and
/// `AwaitingFrame -> Closed` on disconnect or a read/decode error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    AwaitingFrame,
    Dispatching,
    Closed,
}

impl SessionState {
    /// Returns whether the session has reached its terminal state.
    pub fn is_closed(&self) -> bool {
        matches!(self, SessionState::Closed)
    }
}
