//! Command table
//!
//! Static registry of every supported command: its name, the positional
//! arguments it takes and whether it can run against the REST API.

use indexmap::IndexMap;
use thiserror::Error;

/// Logical operation a command performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListNetworks,
    CreateNetwork,
    DeleteNetwork,
    ShowNetwork,
    RenameNetwork,
    ListPorts,
    CreatePort,
    DeletePort,
    ShowPort,
    PlugInterface,
    UnplugInterface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub args: &'static [&'static str],
    pub operation: Operation,
    /// `false` marks a local-only command
    pub remote: bool,
    pub about: &'static str,
}

impl CommandDescriptor {
    pub const fn new(
        name: &'static str,
        args: &'static [&'static str],
        operation: Operation,
        about: &'static str,
    ) -> Self {
        Self {
            name,
            args,
            operation,
            remote: true,
            about,
        }
    }

    pub const fn local_only(mut self) -> Self {
        self.remote = false;
        self
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// `name <arg> <arg>...`
    pub fn usage(&self) -> String {
        let mut usage = self.name.to_string();
        for arg in self.args {
            usage.push_str(&format!(" <{}>", arg));
        }
        usage
    }
}

const STANDARD_COMMANDS: [CommandDescriptor; 11] = [
    CommandDescriptor::new(
        "list_nets",
        &["tenant-id"],
        Operation::ListNetworks,
        "List the virtual networks of a tenant",
    ),
    CommandDescriptor::new(
        "create_net",
        &["tenant-id", "net-name"],
        Operation::CreateNetwork,
        "Create a virtual network",
    ),
    CommandDescriptor::new(
        "delete_net",
        &["tenant-id", "net-id"],
        Operation::DeleteNetwork,
        "Delete a virtual network",
    ),
    CommandDescriptor::new(
        "detail_net",
        &["tenant-id", "net-id"],
        Operation::ShowNetwork,
        "Show the remote interfaces plugged into a network",
    ),
    CommandDescriptor::new(
        "rename_net",
        &["tenant-id", "net-id", "new-name"],
        Operation::RenameNetwork,
        "Rename a virtual network",
    ),
    CommandDescriptor::new(
        "list_ports",
        &["tenant-id", "net-id"],
        Operation::ListPorts,
        "List the ports of a network",
    ),
    CommandDescriptor::new(
        "create_port",
        &["tenant-id", "net-id"],
        Operation::CreatePort,
        "Create a port on a network",
    ),
    CommandDescriptor::new(
        "delete_port",
        &["tenant-id", "net-id", "port-id"],
        Operation::DeletePort,
        "Delete a port",
    ),
    CommandDescriptor::new(
        "detail_port",
        &["tenant-id", "net-id", "port-id"],
        Operation::ShowPort,
        "Show the remote interface plugged into a port",
    ),
    CommandDescriptor::new(
        "plug_iface",
        &["tenant-id", "net-id", "port-id", "iface-id"],
        Operation::PlugInterface,
        "Plug a remote interface into a port",
    ),
    CommandDescriptor::new(
        "unplug_iface",
        &["tenant-id", "net-id", "port-id"],
        Operation::UnplugInterface,
        "Unplug the remote interface from a port",
    ),
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Command \"{0}\" is already registered")]
pub struct DuplicateCommand(pub String);

/// Command name -> descriptor, in registration order
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: IndexMap<&'static str, CommandDescriptor>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the eleven network and port commands
    pub fn standard() -> Self {
        Self {
            commands: STANDARD_COMMANDS.iter().map(|d| (d.name, *d)).collect(),
        }
    }

    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<(), DuplicateCommand> {
        if self.commands.contains_key(descriptor.name) {
            return Err(DuplicateCommand(descriptor.name.to_string()));
        }
        self.commands.insert(descriptor.name, descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn usage(&self, name: &str) -> Option<String> {
        self.get(name).map(CommandDescriptor::usage)
    }

    /// Listing of every command with its argument signature
    pub fn help(&self) -> String {
        let mut help = String::from("\nCommands:");
        for descriptor in self.iter() {
            help.push_str(&format!("\n    {}", descriptor.usage()));
        }
        help
    }
}
