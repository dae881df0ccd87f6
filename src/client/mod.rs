//! Client session management
//!
//! Handles client connections, session state and session bookkeeping.

pub mod handler;
pub mod registry;
pub mod session;
pub mod state;

pub use handler::handle_client;
pub use registry::SessionRegistry;
pub use session::Session;
pub use state::SessionState;
