//! Server middleware
//!
//! Provides session lifecycle logging.

pub mod logging;
