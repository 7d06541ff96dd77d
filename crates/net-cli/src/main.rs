//! Virtual network control CLI (vnetctl)

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use vnetctl::{invoke, CliConfig, CommandRegistry, Console};

#[derive(Parser)]
#[command(name = "vnetctl")]
#[command(about = "Virtual network control CLI")]
#[command(version)]
#[command(long_about = "
Virtual network control CLI

Manages tenant networks, ports and interface attachments either through
the REST API (default) or by loading the network manager in-process.

Examples:
  vnetctl list_nets tenant1                       # List networks
  vnetctl create_net tenant1 web                  # Create a network
  vnetctl -H 10.0.0.5 -p 9696 list_ports t1 NET   # Talk to another server
  vnetctl -l plug_iface t1 NET PORT vif-1         # Use the local manager

Options must come before COMMAND; everything after it is passed to the
command as positional arguments.
")]
struct Cli {
    /// Load the network manager directly instead of using the REST API
    #[arg(short = 'l', long)]
    load_plugin: bool,

    /// IP address or name of the API host
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// API port
    #[arg(short, long)]
    port: Option<u16>,

    /// Use SSL
    #[arg(short, long)]
    ssl: bool,

    /// Turn on verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Command to run
    #[arg(value_name = "COMMAND")]
    command: Option<String>,

    /// Positional arguments of the command (options go before COMMAND)
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

impl Cli {
    fn apply_to(&self, config: &mut CliConfig) {
        if let Some(ref host) = self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if self.ssl {
            config.ssl = true;
        }
        if self.timeout.is_some() {
            config.timeout_secs = self.timeout;
        }
        if self.load_plugin {
            config.load_plugin = true;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let registry = CommandRegistry::standard();

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        println!("{}", registry.help());
        std::process::exit(1);
    };

    let mut config =
        CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_to(&mut config);

    let mut args = vec![command];
    args.extend(cli.args);

    let code = invoke(registry, &config, Console::terminal(cli.verbose), &args).await;
    std::process::exit(code);
}
