//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/dev.toml

use anyhow::{ensure, Context};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// JSON file the database is dumped to and loaded from
    #[serde(default = "default_database_file")]
    pub file: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { file: default_database_file() }
    }
}

fn default_database_file() -> String {
    "transport.json".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct FleetConfig {
    #[serde(default = "default_bus_capacity")]
    pub default_bus_capacity: u32,
    #[serde(default = "default_taxi_capacity")]
    pub default_taxi_capacity: u32,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            default_bus_capacity: default_bus_capacity(),
            default_taxi_capacity: default_taxi_capacity(),
        }
    }
}

fn default_bus_capacity() -> u32 {
    40
}

fn default_taxi_capacity() -> u32 {
    4
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub fleet: FleetConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    database_file: String,
    default_bus_capacity: u32,
    default_taxi_capacity: u32,
    log_level: String,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            default_bus_capacity: default_bus_capacity(),
            default_taxi_capacity: default_taxi_capacity(),
            log_level: default_log_level(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Determine config file path from the --config value or environment
    pub fn resolve_config_path(cli_path: Option<&str>) -> String {
        Self::resolve_config_path_with(cli_path, env::var("CONFIG_FILE").ok())
    }

    fn resolve_config_path_with(cli_path: Option<&str>, env_path: Option<String>) -> String {
        if let Some(path) = cli_path {
            return path.to_string();
        }

        // Check CONFIG_FILE environment variable
        if let Some(path) = env_path.filter(|p| !p.is_empty()) {
            return path;
        }

        "config/dev.toml".to_string()
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        ensure!(
            toml_config.fleet.default_bus_capacity > 0,
            "fleet.default_bus_capacity must be greater than zero in {}",
            path.display()
        );
        ensure!(
            toml_config.fleet.default_taxi_capacity > 0,
            "fleet.default_taxi_capacity must be greater than zero in {}",
            path.display()
        );
        ensure!(
            !toml_config.database.file.trim().is_empty(),
            "database.file must not be empty in {}",
            path.display()
        );

        Ok(Self {
            database_file: toml_config.database.file,
            default_bus_capacity: toml_config.fleet.default_bus_capacity,
            default_taxi_capacity: toml_config.fleet.default_taxi_capacity,
            log_level: toml_config.logging.level,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration from `path`, falling back to defaults on any error
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {:#}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Load configuration - tries TOML file first, falls back to defaults
    pub fn load(cli_path: Option<&str>) -> Self {
        Self::load_from_path(Self::resolve_config_path(cli_path))
    }

    pub fn database_file(&self) -> &str {
        &self.database_file
    }

    pub fn default_bus_capacity(&self) -> u32 {
        self.default_bus_capacity
    }

    pub fn default_taxi_capacity(&self) -> u32 {
        self.default_taxi_capacity
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method to redirect the database file (e.g. from --output)
    pub fn with_database_file(mut self, file: impl Into<String>) -> Self {
        self.database_file = file.into();
        self
    }
}
