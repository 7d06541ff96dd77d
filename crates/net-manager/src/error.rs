//! Error types for manager operations

use thiserror::Error;
use vnet_shared_types::SharedTypeError;

/// Errors raised by a network manager backend
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Network {network} not found for tenant {tenant}")]
    NetworkNotFound { tenant: String, network: String },

    #[error("Port {port} not found on network {network}")]
    PortNotFound { network: String, port: String },

    #[error("Network {network} still has attached ports")]
    NetworkInUse { network: String },

    #[error("Port {port} on network {network} still has an attachment")]
    PortInUse { network: String, port: String },

    #[error("Interface {interface} is already attached to port {port}")]
    AlreadyAttached { interface: String, port: String },

    #[error("Invalid value: {0}")]
    InvalidValue(#[from] SharedTypeError),

    #[error("State file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("State serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ManagerResult<T> = std::result::Result<T, ManagerError>;
