//! Command executors
//!
//! A command runs either against an in-process [`NetworkManager`] or against
//! the REST API through a [`Transport`]. Both executors report identical
//! confirmation content through [`report`]; they differ in how failures
//! surface (see [`crate::error::ErrorKind`]).

pub mod local;
pub mod remote;
pub mod report;

pub use local::LocalExecutor;
pub use remote::RemoteExecutor;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use vnet_client::{HttpTransport, Transport};
use vnet_manager::{ManagerFactory, NetworkManager};

use crate::commands::Command;
use crate::config::CliConfig;
use crate::console::Console;
use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Local,
    Remote,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Local => write!(f, "local manager"),
            Backend::Remote => write!(f, "REST API"),
        }
    }
}

#[async_trait]
pub trait Executor: Send + Sync {
    fn backend(&self) -> Backend;

    async fn execute(&self, command: &Command, console: &Console) -> Result<(), CliError>;
}

/// Build the one executor this invocation will use.
pub async fn build_executor(config: &CliConfig) -> Result<Box<dyn Executor>, CliError> {
    if config.load_plugin {
        let manager: Arc<dyn NetworkManager> =
            ManagerFactory::build(config.manager.kind, &config.manager.state_file).await?;
        Ok(Box::new(LocalExecutor::new(manager)))
    } else {
        let transport: Arc<dyn Transport> =
            Arc::new(HttpTransport::new(config.transport()).map_err(CliError::Transport)?);
        Ok(Box::new(RemoteExecutor::new(transport)))
    }
}
