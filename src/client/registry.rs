//! Session registry
//!
//! Join handles of spawned session tasks, owned by the accept loop.

use tokio::task::JoinHandle;

/// Bookkeeping for spawned sessions.
///
/// Only the accept loop touches this, so it needs no lock. Sessions never
/// look themselves up here; it is used for lifecycle logging only.
#[derive(Default)]
pub struct SessionRegistry {
    handles: Vec<JoinHandle<()>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly spawned session, first dropping handles of sessions
    /// that have already finished.
    pub fn track(&mut self, handle: JoinHandle<()>) {
        self.prune();
        self.handles.push(handle);
    }

    pub fn prune(&mut self) {
        self.handles.retain(|handle| !handle.is_finished());
    }

    /// Number of tracked sessions, including any that finished since the last prune
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
