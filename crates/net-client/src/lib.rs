//! REST transport for the virtual network API
//!
//! Provides the tenant-scoped HTTP client used by the remote executor,
//! together with a mock transport for tests.

pub mod config;
pub mod path;
pub mod transport;

pub use config::TransportConfig;
pub use path::{resource_path, routes, ACTION_PREFIX, CONTENT_TYPE, FORMAT};
pub use reqwest::Method;
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, MockTransport, Transport, SUCCESS_STATUSES,
};

use thiserror::Error;

/// Transport errors
///
/// `Connection` means the server could not be reached at all, `Status`
/// means it answered with a non-success status.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Unable to connect to server {target}: {message}")]
    Connection { target: String, message: String },

    #[error("Server returned error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    pub fn is_connection(&self) -> bool {
        matches!(self, TransportError::Connection { .. })
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
