//! Network manager persisted to a JSON state file
//!
//! Every successful mutation rewrites the whole state file through a
//! temporary sibling followed by a rename, so a crash never leaves a
//! half-written file behind.

use async_trait::async_trait;
use log::{debug, info};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use vnet_shared_types::{NetworkSummary, PortSummary};

use crate::error::ManagerResult;
use crate::memory::ManagerState;
use crate::NetworkManager;

pub struct FileBackedNetworkManager {
    path: PathBuf,
    state: Mutex<ManagerState>,
}

impl FileBackedNetworkManager {
    /// Open the state file at `path`; a missing file starts empty.
    pub async fn open(path: impl Into<PathBuf>) -> ManagerResult<Self> {
        let path = path.into();
        let state = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => ManagerState::default(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("State file {} not found, starting empty", path.display());
                ManagerState::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn save(&self, state: &ManagerState) -> ManagerResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(state)?;
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, content).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        debug!("Saved manager state to {}", self.path.display());
        Ok(())
    }

    /// Apply a mutation to a copy of the state, persist it, then swap it in.
    ///
    /// The in-memory state only changes once the file has been written.
    async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut ManagerState) -> ManagerResult<T> + Send,
    ) -> ManagerResult<T> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let value = op(&mut next)?;
        self.save(&next).await?;
        *state = next;
        Ok(value)
    }
}

#[async_trait]
impl NetworkManager for FileBackedNetworkManager {
    async fn get_all_networks(&self, tenant: &str) -> ManagerResult<Vec<NetworkSummary>> {
        Ok(self.state.lock().await.list_networks(tenant))
    }

    async fn create_network(&self, tenant: &str, name: &str) -> ManagerResult<String> {
        let id = self
            .mutate(|state| state.create_network(tenant, name))
            .await?;
        info!("Created network {} ({}) for tenant {}", id, name, tenant);
        Ok(id)
    }

    async fn delete_network(&self, tenant: &str, network: &str) -> ManagerResult<()> {
        self.mutate(|state| state.delete_network(tenant, network))
            .await?;
        info!("Deleted network {} for tenant {}", network, tenant);
        Ok(())
    }

    async fn get_network_details(
        &self,
        tenant: &str,
        network: &str,
    ) -> ManagerResult<Vec<String>> {
        self.state.lock().await.network_interfaces(tenant, network)
    }

    async fn rename_network(&self, tenant: &str, network: &str, name: &str) -> ManagerResult<()> {
        self.mutate(|state| state.rename_network(tenant, network, name))
            .await
    }

    async fn get_all_ports(&self, tenant: &str, network: &str) -> ManagerResult<Vec<PortSummary>> {
        self.state.lock().await.list_ports(tenant, network)
    }

    async fn create_port(&self, tenant: &str, network: &str) -> ManagerResult<String> {
        let id = self
            .mutate(|state| state.create_port(tenant, network))
            .await?;
        info!("Created port {} on network {}", id, network);
        Ok(id)
    }

    async fn delete_port(&self, tenant: &str, network: &str, port: &str) -> ManagerResult<()> {
        self.mutate(|state| state.delete_port(tenant, network, port))
            .await
    }

    async fn get_port_details(
        &self,
        tenant: &str,
        network: &str,
        port: &str,
    ) -> ManagerResult<Option<String>> {
        self.state
            .lock()
            .await
            .port_attachment(tenant, network, port)
    }

    async fn plug_interface(
        &self,
        tenant: &str,
        network: &str,
        port: &str,
        interface: &str,
    ) -> ManagerResult<()> {
        self.mutate(|state| state.plug_interface(tenant, network, port, interface))
            .await
    }

    async fn unplug_interface(
        &self,
        tenant: &str,
        network: &str,
        port: &str,
    ) -> ManagerResult<()> {
        self.mutate(|state| state.unplug_interface(tenant, network, port))
            .await
    }
}
