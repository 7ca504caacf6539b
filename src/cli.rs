use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use orchestrate::ResourceFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stackform")]
#[command(version)]
#[command(about = "Declarative provisioning for platform infrastructure", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the workspace config (default: ./stackform.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create declared resources, prerequisites first
    Up(OpArgs),

    /// Delete declared resources, dependents first
    Down(OpArgs),

    /// Update declared resources in place
    Patch(OpArgs),

    /// Inspect and validate the workspace config
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct OpArgs {
    /// Only resources whose name contains this substring
    #[arg(short, long)]
    pub name: Option<String>,

    /// Only resources whose type contains this substring
    #[arg(short = 't', long = "type")]
    pub resource_type: Option<String>,

    /// Only groups whose name contains this substring
    #[arg(short, long)]
    pub group: Option<String>,

    /// Print the plan without applying it
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl OpArgs {
    /// Build the engine filter from the CLI flags.
    pub fn filter(&self) -> ResourceFilter {
        let mut filter = ResourceFilter::default();
        if let Some(name) = &self.name {
            filter = filter.with_name(name);
        }
        if let Some(resource_type) = &self.resource_type {
            filter = filter.with_type(resource_type);
        }
        if let Some(group) = &self.group {
            filter = filter.with_group(group);
        }
        filter
    }
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the resolved configuration
    Show,

    /// Check the config file for problems
    Validate,
}
