//! In-memory network manager

use async_trait::async_trait;
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use vnet_shared_types::{validate_identifier, NetworkSummary, PortSummary, SharedTypeError};

use crate::error::{ManagerError, ManagerResult};
use crate::NetworkManager;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortRecord {
    #[serde(default)]
    pub attachment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkRecord {
    pub name: String,
    #[serde(default)]
    pub ports: IndexMap<String, PortRecord>,
}

/// Complete manager state: tenant -> networks -> ports.
///
/// Networks and ports keep creation order so repeated listings are stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManagerState {
    #[serde(default)]
    pub tenants: BTreeMap<String, IndexMap<String, NetworkRecord>>,
}

fn require_name(field: &'static str, value: &str) -> ManagerResult<()> {
    if value.trim().is_empty() {
        return Err(SharedTypeError::InvalidValue {
            field,
            value: value.to_string(),
        }
        .into());
    }
    Ok(())
}

impl ManagerState {
    fn network(&self, tenant: &str, network: &str) -> ManagerResult<&NetworkRecord> {
        self.tenants
            .get(tenant)
            .and_then(|nets| nets.get(network))
            .ok_or_else(|| ManagerError::NetworkNotFound {
                tenant: tenant.to_string(),
                network: network.to_string(),
            })
    }

    fn network_mut(&mut self, tenant: &str, network: &str) -> ManagerResult<&mut NetworkRecord> {
        self.tenants
            .get_mut(tenant)
            .and_then(|nets| nets.get_mut(network))
            .ok_or_else(|| ManagerError::NetworkNotFound {
                tenant: tenant.to_string(),
                network: network.to_string(),
            })
    }

    fn port_mut(
        &mut self,
        tenant: &str,
        network: &str,
        port: &str,
    ) -> ManagerResult<&mut PortRecord> {
        self.network_mut(tenant, network)?
            .ports
            .get_mut(port)
            .ok_or_else(|| ManagerError::PortNotFound {
                network: network.to_string(),
                port: port.to_string(),
            })
    }

    pub fn list_networks(&self, tenant: &str) -> Vec<NetworkSummary> {
        self.tenants
            .get(tenant)
            .map(|nets| {
                nets.iter()
                    .map(|(id, net)| NetworkSummary::new(id.clone(), net.name.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn create_network(&mut self, tenant: &str, name: &str) -> ManagerResult<String> {
        validate_identifier("tenant-id", tenant)?;
        require_name("net-name", name)?;

        let id = Uuid::new_v4().to_string();
        self.tenants.entry(tenant.to_string()).or_default().insert(
            id.clone(),
            NetworkRecord {
                name: name.to_string(),
                ports: IndexMap::new(),
            },
        );
        Ok(id)
    }

    pub fn delete_network(&mut self, tenant: &str, network: &str) -> ManagerResult<()> {
        let record = self.network(tenant, network)?;
        if record.ports.values().any(|p| p.attachment.is_some()) {
            return Err(ManagerError::NetworkInUse {
                network: network.to_string(),
            });
        }

        if let Some(nets) = self.tenants.get_mut(tenant) {
            nets.shift_remove(network);
            if nets.is_empty() {
                self.tenants.remove(tenant);
            }
        }
        Ok(())
    }

    pub fn network_interfaces(&self, tenant: &str, network: &str) -> ManagerResult<Vec<String>> {
        Ok(self
            .network(tenant, network)?
            .ports
            .values()
            .filter_map(|p| p.attachment.clone())
            .collect())
    }

    pub fn rename_network(&mut self, tenant: &str, network: &str, name: &str) -> ManagerResult<()> {
        require_name("new-name", name)?;
        self.network_mut(tenant, network)?.name = name.to_string();
        Ok(())
    }

    pub fn list_ports(&self, tenant: &str, network: &str) -> ManagerResult<Vec<PortSummary>> {
        Ok(self
            .network(tenant, network)?
            .ports
            .keys()
            .map(|id| PortSummary { id: id.clone() })
            .collect())
    }

    pub fn create_port(&mut self, tenant: &str, network: &str) -> ManagerResult<String> {
        let id = Uuid::new_v4().to_string();
        self.network_mut(tenant, network)?
            .ports
            .insert(id.clone(), PortRecord::default());
        Ok(id)
    }

    pub fn delete_port(&mut self, tenant: &str, network: &str, port: &str) -> ManagerResult<()> {
        if self.port_mut(tenant, network, port)?.attachment.is_some() {
            return Err(ManagerError::PortInUse {
                network: network.to_string(),
                port: port.to_string(),
            });
        }
        self.network_mut(tenant, network)?.ports.shift_remove(port);
        Ok(())
    }

    pub fn port_attachment(
        &self,
        tenant: &str,
        network: &str,
        port: &str,
    ) -> ManagerResult<Option<String>> {
        self.network(tenant, network)?
            .ports
            .get(port)
            .map(|p| p.attachment.clone())
            .ok_or_else(|| ManagerError::PortNotFound {
                network: network.to_string(),
                port: port.to_string(),
            })
    }

    pub fn plug_interface(
        &mut self,
        tenant: &str,
        network: &str,
        port: &str,
        interface: &str,
    ) -> ManagerResult<()> {
        validate_identifier("iface-id", interface)?;

        if self.port_mut(tenant, network, port)?.attachment.is_some() {
            return Err(ManagerError::PortInUse {
                network: network.to_string(),
                port: port.to_string(),
            });
        }

        // An interface may only be plugged into one port per tenant.
        let holder = self.tenants.get(tenant).and_then(|nets| {
            nets.values()
                .flat_map(|net| net.ports.iter())
                .find(|(_, p)| p.attachment.as_deref() == Some(interface))
                .map(|(id, _)| id.clone())
        });
        if let Some(holder) = holder {
            return Err(ManagerError::AlreadyAttached {
                interface: interface.to_string(),
                port: holder,
            });
        }

        let record = self.port_mut(tenant, network, port)?;
        record.attachment = Some(interface.to_string());
        Ok(())
    }

    pub fn unplug_interface(&mut self, tenant: &str, network: &str, port: &str) -> ManagerResult<()> {
        self.port_mut(tenant, network, port)?.attachment = None;
        Ok(())
    }
}

/// Network manager keeping all state in process memory
#[derive(Debug, Default)]
pub struct InMemoryNetworkManager {
    state: RwLock<ManagerState>,
}

impl InMemoryNetworkManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: ManagerState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    pub async fn snapshot(&self) -> ManagerState {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl NetworkManager for InMemoryNetworkManager {
    async fn get_all_networks(&self, tenant: &str) -> ManagerResult<Vec<NetworkSummary>> {
        Ok(self.state.read().await.list_networks(tenant))
    }

    async fn create_network(&self, tenant: &str, name: &str) -> ManagerResult<String> {
        let id = self.state.write().await.create_network(tenant, name)?;
        info!("Created network {} ({}) for tenant {}", id, name, tenant);
        Ok(id)
    }

    async fn delete_network(&self, tenant: &str, network: &str) -> ManagerResult<()> {
        self.state.write().await.delete_network(tenant, network)?;
        info!("Deleted network {} for tenant {}", network, tenant);
        Ok(())
    }

    async fn get_network_details(
        &self,
        tenant: &str,
        network: &str,
    ) -> ManagerResult<Vec<String>> {
        self.state.read().await.network_interfaces(tenant, network)
    }

    async fn rename_network(&self, tenant: &str, network: &str, name: &str) -> ManagerResult<()> {
        self.state
            .write()
            .await
            .rename_network(tenant, network, name)?;
        debug!("Renamed network {} to {}", network, name);
        Ok(())
    }

    async fn get_all_ports(&self, tenant: &str, network: &str) -> ManagerResult<Vec<PortSummary>> {
        self.state.read().await.list_ports(tenant, network)
    }

    async fn create_port(&self, tenant: &str, network: &str) -> ManagerResult<String> {
        let id = self.state.write().await.create_port(tenant, network)?;
        info!("Created port {} on network {}", id, network);
        Ok(id)
    }

    async fn delete_port(&self, tenant: &str, network: &str, port: &str) -> ManagerResult<()> {
        self.state
            .write()
            .await
            .delete_port(tenant, network, port)?;
        info!("Deleted port {} on network {}", port, network);
        Ok(())
    }

    async fn get_port_details(
        &self,
        tenant: &str,
        network: &str,
        port: &str,
    ) -> ManagerResult<Option<String>> {
        self.state.read().await.port_attachment(tenant, network, port)
    }

    async fn plug_interface(
        &self,
        tenant: &str,
        network: &str,
        port: &str,
        interface: &str,
    ) -> ManagerResult<()> {
        self.state
            .write()
            .await
            .plug_interface(tenant, network, port, interface)?;
        debug!("Plugged {} into port {}", interface, port);
        Ok(())
    }

    async fn unplug_interface(
        &self,
        tenant: &str,
        network: &str,
        port: &str,
    ) -> ManagerResult<()> {
        self.state
            .write()
            .await
            .unplug_interface(tenant, network, port)?;
        debug!("Unplugged port {}", port);
        Ok(())
    }
}
