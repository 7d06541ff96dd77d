//! Typed commands built from a bound argument list

use crate::commands::binder::{bind, ArgumentBundle};
use crate::commands::table::{CommandDescriptor, Operation};
use crate::error::ArityError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListNetworks {
        tenant: String,
    },
    CreateNetwork {
        tenant: String,
        name: String,
    },
    DeleteNetwork {
        tenant: String,
        network: String,
    },
    ShowNetwork {
        tenant: String,
        network: String,
    },
    RenameNetwork {
        tenant: String,
        network: String,
        name: String,
    },
    ListPorts {
        tenant: String,
        network: String,
    },
    CreatePort {
        tenant: String,
        network: String,
    },
    DeletePort {
        tenant: String,
        network: String,
        port: String,
    },
    ShowPort {
        tenant: String,
        network: String,
        port: String,
    },
    PlugInterface {
        tenant: String,
        network: String,
        port: String,
        interface: String,
    },
    UnplugInterface {
        tenant: String,
        network: String,
        port: String,
    },
}

impl Command {
    /// Bind `raw` against `descriptor` and build the matching command.
    pub fn bind(descriptor: &CommandDescriptor, raw: &[String]) -> Result<Self, ArityError> {
        let bundle = bind(descriptor, raw)?;
        Self::from_bundle(descriptor, bundle)
    }

    /// Fails when the descriptor's declared arguments do not fit its operation.
    pub fn from_bundle(
        descriptor: &CommandDescriptor,
        bundle: ArgumentBundle,
    ) -> Result<Self, ArityError> {
        let received = bundle.len();
        let values = bundle.into_inner();

        let command = match (descriptor.operation, values.as_slice()) {
            (Operation::ListNetworks, [tenant]) => Command::ListNetworks {
                tenant: tenant.clone(),
            },
            (Operation::CreateNetwork, [tenant, name]) => Command::CreateNetwork {
                tenant: tenant.clone(),
                name: name.clone(),
            },
            (Operation::DeleteNetwork, [tenant, network]) => Command::DeleteNetwork {
                tenant: tenant.clone(),
                network: network.clone(),
            },
            (Operation::ShowNetwork, [tenant, network]) => Command::ShowNetwork {
                tenant: tenant.clone(),
                network: network.clone(),
            },
            (Operation::RenameNetwork, [tenant, network, name]) => Command::RenameNetwork {
                tenant: tenant.clone(),
                network: network.clone(),
                name: name.clone(),
            },
            (Operation::ListPorts, [tenant, network]) => Command::ListPorts {
                tenant: tenant.clone(),
                network: network.clone(),
            },
            (Operation::CreatePort, [tenant, network]) => Command::CreatePort {
                tenant: tenant.clone(),
                network: network.clone(),
            },
            (Operation::DeletePort, [tenant, network, port]) => Command::DeletePort {
                tenant: tenant.clone(),
                network: network.clone(),
                port: port.clone(),
            },
            (Operation::ShowPort, [tenant, network, port]) => Command::ShowPort {
                tenant: tenant.clone(),
                network: network.clone(),
                port: port.clone(),
            },
            (Operation::PlugInterface, [tenant, network, port, interface]) => {
                Command::PlugInterface {
                    tenant: tenant.clone(),
                    network: network.clone(),
                    port: port.clone(),
                    interface: interface.clone(),
                }
            }
            (Operation::UnplugInterface, [tenant, network, port]) => Command::UnplugInterface {
                tenant: tenant.clone(),
                network: network.clone(),
                port: port.clone(),
            },
            (operation, _) => {
                return Err(ArityError {
                    command: descriptor.name.to_string(),
                    expected: operation.arity(),
                    received,
                    usage: descriptor.usage(),
                })
            }
        };

        Ok(command)
    }

    pub fn operation(&self) -> Operation {
        match self {
            Command::ListNetworks { .. } => Operation::ListNetworks,
            Command::CreateNetwork { .. } => Operation::CreateNetwork,
            Command::DeleteNetwork { .. } => Operation::DeleteNetwork,
            Command::ShowNetwork { .. } => Operation::ShowNetwork,
            Command::RenameNetwork { .. } => Operation::RenameNetwork,
            Command::ListPorts { .. } => Operation::ListPorts,
            Command::CreatePort { .. } => Operation::CreatePort,
            Command::DeletePort { .. } => Operation::DeletePort,
            Command::ShowPort { .. } => Operation::ShowPort,
            Command::PlugInterface { .. } => Operation::PlugInterface,
            Command::UnplugInterface { .. } => Operation::UnplugInterface,
        }
    }

    pub fn tenant(&self) -> &str {
        match self {
            Command::ListNetworks { tenant }
            | Command::CreateNetwork { tenant, .. }
            | Command::DeleteNetwork { tenant, .. }
            | Command::ShowNetwork { tenant, .. }
            | Command::RenameNetwork { tenant, .. }
            | Command::ListPorts { tenant, .. }
            | Command::CreatePort { tenant, .. }
            | Command::DeletePort { tenant, .. }
            | Command::ShowPort { tenant, .. }
            | Command::PlugInterface { tenant, .. }
            | Command::UnplugInterface { tenant, .. } => tenant,
        }
    }
}

impl Operation {
    /// Number of positional values the operation consumes
    pub fn arity(&self) -> usize {
        match self {
            Operation::ListNetworks => 1,
            Operation::CreateNetwork
            | Operation::DeleteNetwork
            | Operation::ShowNetwork
            | Operation::ListPorts
            | Operation::CreatePort => 2,
            Operation::RenameNetwork
            | Operation::DeletePort
            | Operation::ShowPort
            | Operation::UnplugInterface => 3,
            Operation::PlugInterface => 4,
        }
    }
}
