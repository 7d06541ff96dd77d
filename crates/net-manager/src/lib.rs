//! In-process network manager backends
//!
//! The [`NetworkManager`] trait is the capability the command-line client
//! drives when it runs against a locally loaded backend instead of the REST
//! API. Two implementations ship with the crate: a purely in-memory manager
//! and one that persists its state to a JSON file between invocations.

pub mod error;
pub mod factory;
pub mod file;
pub mod memory;

pub use error::{ManagerError, ManagerResult};
pub use factory::{ManagerFactory, ManagerKind};
pub use file::FileBackedNetworkManager;
pub use memory::{InMemoryNetworkManager, ManagerState};

use async_trait::async_trait;
use vnet_shared_types::{NetworkSummary, PortSummary};

/// Tenant-scoped network management capability
#[async_trait]
pub trait NetworkManager: Send + Sync {
    async fn get_all_networks(&self, tenant: &str) -> ManagerResult<Vec<NetworkSummary>>;

    /// Create a network and return its id.
    async fn create_network(&self, tenant: &str, name: &str) -> ManagerResult<String>;

    async fn delete_network(&self, tenant: &str, network: &str) -> ManagerResult<()>;

    /// Remote interface ids plugged into the network's ports, in port order.
    async fn get_network_details(&self, tenant: &str, network: &str)
        -> ManagerResult<Vec<String>>;

    async fn rename_network(&self, tenant: &str, network: &str, name: &str) -> ManagerResult<()>;

    async fn get_all_ports(&self, tenant: &str, network: &str) -> ManagerResult<Vec<PortSummary>>;

    /// Create a port and return its id.
    async fn create_port(&self, tenant: &str, network: &str) -> ManagerResult<String>;

    async fn delete_port(&self, tenant: &str, network: &str, port: &str) -> ManagerResult<()>;

    /// The interface plugged into the port, if any.
    async fn get_port_details(
        &self,
        tenant: &str,
        network: &str,
        port: &str,
    ) -> ManagerResult<Option<String>>;

    async fn plug_interface(
        &self,
        tenant: &str,
        network: &str,
        port: &str,
        interface: &str,
    ) -> ManagerResult<()>;

    async fn unplug_interface(&self, tenant: &str, network: &str, port: &str)
        -> ManagerResult<()>;
}
