//! Command routing
//!
//! Resolves the command name, binds its arguments and hands the typed
//! command to the executor selected at startup. Errors are printed here and
//! turned into the process exit status.

use crate::commands::{Command, CommandDescriptor, CommandRegistry};
use crate::config::CliConfig;
use crate::console::Console;
use crate::error::CliError;
use crate::executor::{build_executor, Backend, Executor};

/// Look up the command named by `args[0]` and bind the rest to it.
pub fn resolve<'a>(
    registry: &'a CommandRegistry,
    args: &[String],
) -> Result<(&'a CommandDescriptor, Command), CliError> {
    let (name, rest) = args.split_first().ok_or(CliError::MissingCommand)?;

    let descriptor = registry
        .get(name)
        .ok_or_else(|| CliError::UnknownCommand(name.clone()))?;

    let command = Command::bind(descriptor, rest)?;
    Ok((descriptor, command))
}

/// Resolve `args`, build the backend selected by `config` and run the
/// command. Usage errors are reported before the backend is touched.
pub async fn invoke(
    registry: CommandRegistry,
    config: &CliConfig,
    console: Console,
    args: &[String],
) -> i32 {
    if let Err(err) = resolve(&registry, args) {
        report(&console, &registry, &err);
        return err.exit_code();
    }

    match build_executor(config).await {
        Ok(executor) => Router::new(registry, executor, console).run(args).await,
        Err(err) => {
            report(&console, &registry, &err);
            err.exit_code()
        }
    }
}

pub struct Router {
    registry: CommandRegistry,
    executor: Box<dyn Executor>,
    console: Console,
}

impl Router {
    pub fn new(registry: CommandRegistry, executor: Box<dyn Executor>, console: Console) -> Self {
        Self {
            registry,
            executor,
            console,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Run `args` (command name followed by its positional values) and
    /// return the exit status.
    pub async fn run(&self, args: &[String]) -> i32 {
        match self.dispatch(args).await {
            Ok(()) => 0,
            Err(err) => {
                self.report(&err);
                err.exit_code()
            }
        }
    }

    pub async fn dispatch(&self, args: &[String]) -> Result<(), CliError> {
        let (descriptor, command) = resolve(&self.registry, args)?;

        if self.executor.backend() == Backend::Remote && !descriptor.remote {
            return Err(CliError::NotImplemented(descriptor.name.to_string()));
        }

        log::debug!(
            "Executing command \"{}\" with args: {:?} ({})",
            descriptor.name,
            &args[1..],
            self.executor.backend()
        );
        self.executor.execute(&command, &self.console).await
    }

    fn report(&self, err: &CliError) {
        report(&self.console, &self.registry, err);
    }
}

fn report(console: &Console, registry: &CommandRegistry, err: &CliError) {
    match err {
        CliError::MissingCommand | CliError::UnknownCommand(_) => {
            console.failure(err.to_string());
            console.line(registry.help());
        }
        CliError::Usage(arity) => {
            console.failure(err.to_string());
            console.line(format!("Usage:\n    {}", arity.usage));
        }
        CliError::NotImplemented(_) => console.failure(err.to_string()),
        CliError::Application { message, body, .. } => {
            console.failure(message);
            if let Some(body) = body {
                console.failure(body);
            }
        }
        CliError::Transport(_) | CliError::Backend(_) => {
            console.failure(format!("Error: {}", err));
            if console.is_verbose() {
                let mut source = std::error::Error::source(err);
                while let Some(cause) = source {
                    console.failure(format!("  Caused by: {}", cause));
                    source = cause.source();
                }
            }
        }
    }
}
