//! Manager factory
//!
//! Selects and builds the manager backend loaded when the client runs in
//! local ("load plugin") mode.

use log::info;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use vnet_shared_types::SharedTypeError;

use crate::error::ManagerResult;
use crate::{FileBackedNetworkManager, InMemoryNetworkManager, NetworkManager};

/// Available manager backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagerKind {
    /// State lives only as long as the process
    Memory,
    /// State is kept in a JSON file
    #[default]
    File,
}

impl FromStr for ManagerKind {
    type Err = SharedTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(ManagerKind::Memory),
            "file" => Ok(ManagerKind::File),
            other => Err(SharedTypeError::ParseError(format!(
                "unknown manager kind: {}",
                other
            ))),
        }
    }
}

pub struct ManagerFactory;

impl ManagerFactory {
    pub async fn build(
        kind: ManagerKind,
        state_file: impl Into<PathBuf>,
    ) -> ManagerResult<Arc<dyn NetworkManager>> {
        match kind {
            ManagerKind::Memory => {
                info!("Loading in-memory network manager");
                Ok(Arc::new(InMemoryNetworkManager::new()))
            }
            ManagerKind::File => {
                let manager = FileBackedNetworkManager::open(state_file).await?;
                info!(
                    "Loading file-backed network manager ({})",
                    manager.path().display()
                );
                Ok(Arc::new(manager))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("memory".parse::<ManagerKind>().unwrap(), ManagerKind::Memory);
        assert_eq!("FILE".parse::<ManagerKind>().unwrap(), ManagerKind::File);
        assert!("plugin".parse::<ManagerKind>().is_err());
    }

    #[tokio::test]
    async fn test_build_file_manager() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        let manager = ManagerFactory::build(ManagerKind::File, &path).await.unwrap();
        manager.create_network("t1", "netA").await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_build_memory_manager() {
        let manager = ManagerFactory::build(ManagerKind::Memory, "/nonexistent/state.json")
            .await
            .unwrap();
        manager.create_network("t1", "netA").await.unwrap();
        assert_eq!(manager.get_all_networks("t1").await.unwrap().len(), 1);
    }
}
