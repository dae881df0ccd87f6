pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod protocol;
pub mod server;

pub use config::ServerConfig;
pub use server::Server;
