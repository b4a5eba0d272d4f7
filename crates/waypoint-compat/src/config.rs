//! Configuration for the `waypoint` binary.
//!
//! Values come from, in increasing priority: built-in defaults, a TOML file
//! (`--config <path>` or `./waypoint.toml`), `WAYPOINT_*` environment variables,
//! and command-line flags.
//!
//! ```toml
//! [search]
//! strategies = ["bfs", "ucs", "astar"]
//! seed = 42
//! timing = true
//!
//! [output]
//! path = "output.txt"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use waypoint_core::Strategy;

/// File consulted when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "waypoint.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {0}: {1}")]
    Io(PathBuf, String),

    #[error("failed to parse config {0}: {1}")]
    Parse(PathBuf, String),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub output: OutputConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Strategy names to run, in report order.
    pub strategies: Vec<String>,
    /// Seed for hill climbing. Unset means a fresh seed each run.
    pub seed: Option<u64>,
    /// Print per-strategy wall time.
    pub timing: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            strategies: Strategy::ALL.iter().map(|s| s.name().to_string()).collect(),
            seed: None,
            timing: false,
        }
    }
}

impl SearchConfig {
    /// Resolves the configured names into strategies.
    pub fn strategies(&self) -> Result<Vec<Strategy>, ConfigError> {
        self.strategies.iter()
            .map(|name| name.parse::<Strategy>().map_err(|e: waypoint_core::solver::UnknownStrategy| ConfigError::Invalid {
                key: "search.strategies".to_string(),
                message: e.to_string(),
            }))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig { path: PathBuf::from("output.txt") }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { host: "127.0.0.1".to_string(), port: 3000 }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive, e.g. `warn` or `waypoint_core=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { level: "warn".to_string() }
    }
}

impl Config {
    /// Loads `path` if given, else `./waypoint.toml` if present, else defaults,
    /// then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load_from_file(Path::new(DEFAULT_CONFIG_FILE))?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))
    }

    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(PathBuf::from("<string>"), e.to_string()))
    }

    /// Applies `WAYPOINT_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("WAYPOINT_SEED") {
            self.search.seed = Some(parse_value("WAYPOINT_SEED", &seed)?);
        }
        if let Some(timing) = lookup("WAYPOINT_TIMING") {
            self.search.timing = parse_value("WAYPOINT_TIMING", &timing)?;
        }
        if let Some(path) = lookup("WAYPOINT_OUTPUT") {
            self.output.path = PathBuf::from(path);
        }
        if let Some(host) = lookup("WAYPOINT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("WAYPOINT_PORT") {
            self.server.port = parse_value("WAYPOINT_PORT", &port)?;
        }
        if let Some(level) = lookup("WAYPOINT_LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid { key: key.to_string(), message: e.to_string() })
}
