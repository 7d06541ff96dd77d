//! CLI commands

pub mod binder;
pub mod command;
pub mod table;

pub use binder::{bind, ArgumentBundle};
pub use command::Command;
pub use table::{CommandDescriptor, CommandRegistry, DuplicateCommand, Operation};
