//! Transport session configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 9696;

/// Target API server: host, port and scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    pub host: String,
    pub port: u16,
    pub use_ssl: bool,
    /// Per-request timeout; `None` blocks until the socket gives up
    pub timeout_secs: Option<u64>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            use_ssl: false,
            timeout_secs: None,
        }
    }
}

impl TransportConfig {
    pub fn new(host: impl Into<String>, port: u16, use_ssl: bool) -> Self {
        Self {
            host: host.into(),
            port,
            use_ssl,
            timeout_secs: None,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: Option<u64>) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn scheme(&self) -> &'static str {
        if self.use_ssl {
            "https"
        } else {
            "http"
        }
    }

    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme(), self.host, self.port)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
