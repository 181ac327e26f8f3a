use crate::remote::transport::{DEFAULT_HOST, DEFAULT_PORT};
use crate::remote::TransportConfig;
use crate::{muted_error, weak_error};
use log::error;
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Simulator endpoint settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub host: String,
    pub port: u16,
    /// Socket timeout in milliseconds, no timeout if not set or zero.
    pub timeout_ms: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout_ms: None,
        }
    }
}

/// Translator settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Java executable, searched in `PATH` if not set.
    pub java: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub toolchain: ToolchainConfig,
}

impl Config {
    const DEFAULT_PATH: &'static str = ".config/digasm/config.toml";

    /// Load configuration from file. Return [`None`] on errors.
    pub fn from_file(path: Option<&Path>) -> Option<Self> {
        let data = match path {
            None => {
                let path = home::home_dir()?;
                let path = path.join(Self::DEFAULT_PATH);
                muted_error!(read_to_string(path), "config")?
            }
            Some(path) => match read_to_string(path) {
                Ok(data) => data,
                Err(err) => {
                    error!(target: "config", "Error while load config file: {err}");
                    return None;
                }
            },
        };

        weak_error!(toml::de::from_str(&data), "config")
    }

    /// Return transport settings.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            host: self.remote.host.clone(),
            port: self.remote.port,
            timeout: self
                .remote
                .timeout_ms
                .filter(|&ms| ms > 0)
                .map(Duration::from_millis),
        }
    }
}
