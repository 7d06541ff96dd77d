//! Executor backed by an in-process network manager
//!
//! Manager errors are not caught here; they surface as
//! [`CliError::Backend`] and end the invocation.

use async_trait::async_trait;
use std::sync::Arc;
use vnet_manager::NetworkManager;

use super::{report, Backend, Executor};
use crate::commands::Command;
use crate::console::Console;
use crate::error::CliError;

pub struct LocalExecutor {
    manager: Arc<dyn NetworkManager>,
}

impl LocalExecutor {
    pub fn new(manager: Arc<dyn NetworkManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Executor for LocalExecutor {
    fn backend(&self) -> Backend {
        Backend::Local
    }

    async fn execute(&self, command: &Command, console: &Console) -> Result<(), CliError> {
        match command {
            Command::ListNetworks { tenant } => {
                let networks = self.manager.get_all_networks(tenant).await?;
                report::networks_listed(console, tenant, &networks);
            }
            Command::CreateNetwork { tenant, name } => {
                let network = self.manager.create_network(tenant, name).await?;
                report::network_created(console, &network);
            }
            Command::DeleteNetwork { tenant, network } => {
                self.manager.delete_network(tenant, network).await?;
                report::network_deleted(console, network);
            }
            Command::ShowNetwork { tenant, network } => {
                let interfaces = self.manager.get_network_details(tenant, network).await?;
                report::network_interfaces_header(console, network);
                for interface in &interfaces {
                    report::remote_interface(console, interface);
                }
            }
            Command::RenameNetwork {
                tenant,
                network,
                name,
            } => {
                self.manager.rename_network(tenant, network, name).await?;
                report::network_renamed(console, network);
            }
            Command::ListPorts { tenant, network } => {
                let ports = self.manager.get_all_ports(tenant, network).await?;
                report::ports_listed(console, network, &ports);
            }
            Command::CreatePort { tenant, network } => {
                let port = self.manager.create_port(tenant, network).await?;
                report::port_created(console, network, &port);
            }
            Command::DeletePort {
                tenant,
                network,
                port,
            } => {
                self.manager.delete_port(tenant, network, port).await?;
                report::port_deleted(console, network, port);
            }
            Command::ShowPort {
                tenant,
                network,
                port,
            } => {
                let attachment = self.manager.get_port_details(tenant, network, port).await?;
                report::port_detail(console, network, port, attachment.as_deref());
            }
            Command::PlugInterface {
                tenant,
                network,
                port,
                interface,
            } => {
                self.manager
                    .plug_interface(tenant, network, port, interface)
                    .await?;
                report::interface_plugged(console, network, port, interface);
            }
            Command::UnplugInterface {
                tenant,
                network,
                port,
            } => {
                self.manager.unplug_interface(tenant, network, port).await?;
                report::interface_unplugged(console, network, port);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use mockall::mock;
    use vnet_manager::{InMemoryNetworkManager, ManagerError};
    use vnet_shared_types::{NetworkSummary, PortSummary};

    mock! {
        pub Manager {}

        #[async_trait]
        impl NetworkManager for Manager {
            async fn get_all_networks(&self, tenant: &str) -> Result<Vec<NetworkSummary>, ManagerError>;
            async fn create_network(&self, tenant: &str, name: &str) -> Result<String, ManagerError>;
            async fn delete_network(&self, tenant: &str, network: &str) -> Result<(), ManagerError>;
            async fn get_network_details(&self, tenant: &str, network: &str) -> Result<Vec<String>, ManagerError>;
            async fn rename_network(&self, tenant: &str, network: &str, name: &str) -> Result<(), ManagerError>;
            async fn get_all_ports(&self, tenant: &str, network: &str) -> Result<Vec<PortSummary>, ManagerError>;
            async fn create_port(&self, tenant: &str, network: &str) -> Result<String, ManagerError>;
            async fn delete_port(&self, tenant: &str, network: &str, port: &str) -> Result<(), ManagerError>;
            async fn get_port_details(&self, tenant: &str, network: &str, port: &str) -> Result<Option<String>, ManagerError>;
            async fn plug_interface(&self, tenant: &str, network: &str, port: &str, interface: &str) -> Result<(), ManagerError>;
            async fn unplug_interface(&self, tenant: &str, network: &str, port: &str) -> Result<(), ManagerError>;
        }
    }

    #[tokio::test]
    async fn test_create_network_reports_id() {
        let mut manager = MockManager::new();
        manager
            .expect_create_network()
            .times(1)
            .returning(|_, _| Ok("n-42".to_string()));

        let executor = LocalExecutor::new(Arc::new(manager));
        let (console, output) = Console::capture();
        let command = Command::CreateNetwork {
            tenant: "t1".to_string(),
            name: "netA".to_string(),
        };

        executor.execute(&command, &console).await.unwrap();
        assert!(output.contains("n-42"));
    }

    #[tokio::test]
    async fn test_manager_errors_propagate() {
        let mut manager = MockManager::new();
        manager.expect_delete_network().times(1).returning(|_, network| {
            Err(ManagerError::NetworkInUse {
                network: network.to_string(),
            })
        });

        let executor = LocalExecutor::new(Arc::new(manager));
        let (console, output) = Console::capture();
        let command = Command::DeleteNetwork {
            tenant: "t1".to_string(),
            network: "n1".to_string(),
        };

        let err = executor.execute(&command, &console).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Backend);
        assert!(output.lines().is_empty());
    }

    #[tokio::test]
    async fn test_delete_port_calls_manager() {
        let mut manager = MockManager::new();
        manager
            .expect_delete_port()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let executor = LocalExecutor::new(Arc::new(manager));
        let (console, output) = Console::capture();
        let command = Command::DeletePort {
            tenant: "t1".to_string(),
            network: "n1".to_string(),
            port: "p1".to_string(),
        };

        executor.execute(&command, &console).await.unwrap();
        assert!(output.contains("Deleted Virtual Port:p1 on Virtual Network:n1"));
    }

    #[tokio::test]
    async fn test_network_detail_lists_interfaces_in_port_order() {
        let manager = Arc::new(InMemoryNetworkManager::new());
        let net = manager.create_network("t1", "netA").await.unwrap();
        let p1 = manager.create_port("t1", &net).await.unwrap();
        let p2 = manager.create_port("t1", &net).await.unwrap();
        manager.plug_interface("t1", &net, &p1, "vifA").await.unwrap();
        manager.plug_interface("t1", &net, &p2, "vifB").await.unwrap();

        let executor = LocalExecutor::new(manager);
        let (console, output) = Console::capture();
        let command = Command::ShowNetwork {
            tenant: "t1".to_string(),
            network: net.clone(),
        };

        executor.execute(&command, &console).await.unwrap();
        let text = output.text();
        let a = text.find("vifA").unwrap();
        let b = text.find("vifB").unwrap();
        assert!(a < b);
    }
}
