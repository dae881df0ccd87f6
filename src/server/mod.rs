//! Server core functionality
//!
//! Binds the listening socket and runs the accept loop that spawns one
//! session task per connection.

pub mod core;

pub use core::Server;
