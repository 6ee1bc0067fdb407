//! Handles settings for the application. Configuration is read from
//! `config/settings.toml` (optional) and `QUOTA__*` environment variables.
//!
//! ```toml
//! [app]
//! level = "info"
//!
//! [server]
//! bind = "0.0.0.0"
//! port = 5000
//! database = { sqlite = "quota.db" }
//! static_dir = "frontend"
//!
//! [splits]
//! equal_rounding = "uniform"     # or "distribute_remainder"
//! explicit_sum = "strict"        # or "lenient"
//! ```
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use engine::AllocationPolicy;
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/settings";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
    pub static_dir: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 5000,
            database: Database::Sqlite("quota.db".to_string()),
            static_dir: "frontend".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub splits: AllocationPolicy,
}

#[derive(Debug, Parser)]
#[command(name = "quota", version)]
struct Args {
    /// Settings file path, without extension.
    #[arg(long, env = "QUOTA_CONFIG")]
    config: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let mut settings: Settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("QUOTA").separator("__"))
            .build()?
            .try_deserialize()?;

        if let Some(port) = args.port {
            settings.server.port = port;
        }
        Ok(settings)
    }
}
