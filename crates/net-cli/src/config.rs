//! Client configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `VNETCTL_*` environment variables, then command-line flags.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use vnet_client::config::{DEFAULT_HOST, DEFAULT_PORT};
use vnet_client::TransportConfig;
use vnet_manager::ManagerKind;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/vnetctl/vnetctl.toml";
pub const DEFAULT_STATE_FILE: &str = "/var/lib/vnetctl/state.json";
pub const ENV_PREFIX: &str = "VNETCTL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Local manager settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerSettings {
    pub kind: ManagerKind,
    pub state_file: PathBuf,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            kind: ManagerKind::File,
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub host: String,
    pub port: u16,
    pub ssl: bool,
    pub timeout_secs: Option<u64>,
    /// Run against the local manager instead of the REST API
    pub load_plugin: bool,
    pub manager: ManagerSettings,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            ssl: false,
            timeout_secs: None,
            load_plugin: false,
            manager: ManagerSettings::default(),
        }
    }
}

impl CliConfig {
    /// Load from `path` (or the default location) plus the environment.
    ///
    /// A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

        let settings = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: CliConfig = settings.try_deserialize()?;
        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::new(self.host.clone(), self.port, self.ssl).with_timeout(self.timeout_secs)
    }
}
