//! Handles settings for the application.
//!
//! Values come from an optional TOML file (`config/ledger.toml` unless
//! `--config` says otherwise), then from `LEDGER_*` environment variables,
//! e.g. `LEDGER_PERSISTENCE__KIND=file`.

use clap::Parser;
use config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/ledger.toml";

#[derive(Debug, Clone, Deserialize)]
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

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Server {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Where the event log is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Persistence {
    #[default]
    Memory,
    File {
        path: String,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub persistence: Persistence,
}

#[derive(Debug, Parser)]
#[command(name = "ledger", version, about = "Personal finance ledger server")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings = Self::load(path, None)?;
        if let Some(port) = args.port {
            settings.server.port = port;
        }
        Ok(settings)
    }

    /// Reads `path`, then the `LEDGER_*` variables of `env` (the process
    /// environment when `None`).
    fn load(path: &str, env: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("LEDGER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }
}
