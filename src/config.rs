//! Configuration management for the settings dialog
//!
//! Handles loading and saving of the persisted settings record: VU1 execution
//! mode, ROM directories, BIOS image and screenshot location.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory name under the platform config dir
const APP_DIR: &str = "emu-settings";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Execution strategy for the VU1 vector unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Jit,
    Interpreter,
}

impl ExecutionMode {
    pub const ALL: [ExecutionMode; 2] = [ExecutionMode::Jit, ExecutionMode::Interpreter];

    pub fn label(self) -> &'static str {
        match self {
            ExecutionMode::Jit => "JIT",
            ExecutionMode::Interpreter => "Interpreter",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// VU1 execution mode
    #[serde(default)]
    pub vu1_mode: ExecutionMode,

    /// ROM directories to scan, in insertion order
    #[serde(default)]
    pub rom_dirs: Vec<PathBuf>,

    /// BIOS image
    #[serde(default)]
    pub bios_path: Option<PathBuf>,

    /// Where screenshots are written
    #[serde(default)]
    pub screenshot_dir: Option<PathBuf>,

    /// Seed directory for file and folder prompts
    #[serde(default)]
    pub last_used_dir: Option<PathBuf>,
}

impl Config {
    /// Get the configuration file path
    pub fn default_path() -> PathBuf {
        match dirs::config_dir() {
            Some(config_dir) => config_dir.join(APP_DIR).join("config.toml"),
            None => PathBuf::from("config.toml"),
        }
    }

    /// Load configuration from `path`
    ///
    /// A missing file is not an error: it yields the default configuration.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config = toml::from_str(&contents)?;
        log::info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{} ({}), using default configuration", e, path.display());
                Self::default()
            }
        }
    }

    /// Save configuration to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        log::info!("Saved configuration to: {}", path.display());
        Ok(())
    }
}
