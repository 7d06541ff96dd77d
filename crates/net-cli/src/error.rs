//! CLI error taxonomy
//!
//! Every failure is classified as one of four [`ErrorKind`]s. Application
//! errors (the server rejected a request) are reported to the user and the
//! process still exits 0; everything else exits 1.

use thiserror::Error;
use vnet_client::TransportError;
use vnet_manager::ManagerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad command line, detected before anything is dispatched
    Usage,
    /// The API server could not be reached
    Transport,
    /// The API server answered with a failure
    Application,
    /// The local manager raised an error
    Backend,
}

/// Wrong number of positional arguments for a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{} arguments for \"{command}\" (expected: {expected}, got: {received})",
    arity_qualifier(.received, .expected)
)]
pub struct ArityError {
    pub command: String,
    pub expected: usize,
    pub received: usize,
    pub usage: String,
}

fn arity_qualifier(received: &usize, expected: &usize) -> &'static str {
    if received < expected {
        "Not enough"
    } else {
        "Too many"
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("No command given")]
    MissingCommand,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error(transparent)]
    Usage(#[from] ArityError),

    #[error("API version of \"{0}\" is not yet implemented")]
    NotImplemented(String),

    #[error(transparent)]
    Transport(TransportError),

    #[error("{message}")]
    Application {
        message: String,
        status: Option<u16>,
        body: Option<String>,
    },

    #[error(transparent)]
    Backend(#[from] ManagerError),
}

impl CliError {
    pub fn application(message: impl Into<String>, status: Option<u16>, body: String) -> Self {
        CliError::Application {
            message: message.into(),
            status,
            body: if body.trim().is_empty() {
                None
            } else {
                Some(body)
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CliError::MissingCommand
            | CliError::UnknownCommand(_)
            | CliError::Usage(_)
            | CliError::NotImplemented(_) => ErrorKind::Usage,
            CliError::Transport(_) => ErrorKind::Transport,
            CliError::Application { .. } => ErrorKind::Application,
            CliError::Backend(_) => ErrorKind::Backend,
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Application => 0,
            _ => 1,
        }
    }
}

/// Non-success statuses are application failures; everything else the
/// transport raises is fatal.
impl From<TransportError> for CliError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Status { status, body } => CliError::application(
                format!("Server returned error: {}", status),
                Some(status),
                body,
            ),
            other => CliError::Transport(other),
        }
    }
}
