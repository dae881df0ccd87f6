//! Configuration management for the time server
//!
//! Settings are layered, lowest precedence first: built-in defaults, an
//! optional TOML file, `TIME_SERVER_*` environment variables, and finally the
//! `--host`/`--port` command-line flags.

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::ServerError;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 45000;
pub const DEFAULT_BACKLOG: u32 = 5;
pub const DEFAULT_READ_CHUNK_SIZE: usize = 32;

const DEFAULT_CONFIG_FILE: &str = "config";
const ENV_PREFIX: &str = "TIME_SERVER";

/// Command-line arguments
#[derive(Parser, Debug, Default)]
#[command(name = "jam-time-server")]
#[command(about = "Line-oriented TCP time server", long_about = None)]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind to (e.g. 0.0.0.0)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Server configuration, immutable once the listener is bound.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// IP address the listener binds to
    pub bind_address: String,

    /// TCP port; 0 picks an ephemeral port
    pub port: u16,

    /// Pending-connection queue length passed to listen(2)
    pub backlog: u32,

    /// Bytes requested per read while accumulating a frame
    pub read_chunk_size: usize,

    /// Upper bound on an undelimited frame. Unbounded when absent.
    #[serde(default)]
    pub max_frame_length: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            backlog: DEFAULT_BACKLOG,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            max_frame_length: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from defaults, file, environment and CLI flags.
    pub fn load(args: &CliArgs) -> Result<Self, ServerError> {
        let defaults = Self::default();

        let file = match &args.config {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("backlog", i64::from(defaults.backlog))?
            .set_default("read_chunk_size", defaults.read_chunk_size as i64)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("bind_address", args.host.clone())?
            .set_override_option("port", args.port.map(i64::from))?
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.bind_address.trim().is_empty() {
            return Err(invalid("bind_address cannot be empty"));
        }

        if self.backlog == 0 {
            return Err(invalid("backlog must be greater than 0"));
        }

        if self.read_chunk_size == 0 {
            return Err(invalid("read_chunk_size must be greater than 0"));
        }

        if self.max_frame_length == Some(0) {
            return Err(invalid("max_frame_length must be greater than 0 when set"));
        }

        Ok(())
    }

    /// Bind address and port as `host:port`
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn invalid(msg: &str) -> ServerError {
    ServerError::Config(config::ConfigError::Message(msg.into()))
}
