//! Confirmation messages shared by the local and remote executors

use vnet_shared_types::{NetworkSummary, PortSummary};

use crate::console::Console;

pub fn networks_listed(console: &Console, tenant: &str, networks: &[NetworkSummary]) {
    console.line(format!("Virtual Networks on Tenant:{}\n", tenant));
    for network in networks {
        match &network.name {
            Some(name) => console.line(format!(
                "\tNetwork ID:{} \n\tNetwork Name:{} \n",
                network.id, name
            )),
            None => console.line(format!("\tNetwork ID:{}\n", network.id)),
        }
    }
}

pub fn network_created(console: &Console, network: &str) {
    console.line(format!("Created a new Virtual Network with ID:{}\n", network));
}

pub fn network_deleted(console: &Console, network: &str) {
    console.line(format!("Deleted Virtual Network with ID:{}", network));
}

pub fn network_interfaces_header(console: &Console, network: &str) {
    console.line(format!("Remote Interfaces on Virtual Network:{}\n", network));
}

pub fn remote_interface(console: &Console, interface: &str) {
    console.line(format!("\tRemote interface:{}", interface));
}

pub fn network_renamed(console: &Console, network: &str) {
    console.line(format!("Renamed Virtual Network with ID:{}", network));
}

pub fn ports_listed(console: &Console, network: &str, ports: &[PortSummary]) {
    console.line(format!("Ports on Virtual Network:{}\n", network));
    for port in ports {
        console.line(format!("\tVirtual Port:{}", port.id));
    }
}

pub fn port_created(console: &Console, network: &str, port: &str) {
    console.line(format!(
        "Created Virtual Port:{} on Virtual Network:{}",
        port, network
    ));
}

pub fn port_deleted(console: &Console, network: &str, port: &str) {
    console.line(format!(
        "Deleted Virtual Port:{} on Virtual Network:{}",
        port, network
    ));
}

pub fn port_detail(console: &Console, network: &str, port: &str, attachment: Option<&str>) {
    console.line(format!(
        "Virtual Port:{} on Virtual Network:{} contains remote interface:{}",
        port,
        network,
        attachment.unwrap_or("<none>")
    ));
}

pub fn interface_plugged(console: &Console, network: &str, port: &str, interface: &str) {
    console.line(format!(
        "Plugged remote interface:{} into Virtual Port:{} on Virtual Network:{}",
        interface, port, network
    ));
}

pub fn interface_unplugged(console: &Console, network: &str, port: &str) {
    console.line(format!(
        "Unplugged remote interface from Virtual Port:{} on Virtual Network:{}",
        port, network
    ));
}
