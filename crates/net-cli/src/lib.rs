//! Virtual network control CLI
//!
//! Command-line client for the virtual network service. Every command is
//! described once in the command table and can run either against the REST
//! API or directly against an in-process network manager.

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod executor;
pub mod router;

pub use commands::{Command, CommandDescriptor, CommandRegistry, Operation};
pub use config::CliConfig;
pub use console::Console;
pub use error::{CliError, ErrorKind};
pub use executor::{build_executor, Backend, Executor, LocalExecutor, RemoteExecutor};
pub use router::{invoke, resolve, Router};
