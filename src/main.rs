mod api_client;
mod cli;
mod commands;
mod config;
mod console;
mod resource;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command, ConfigCommand};
use orchestrate::OpKind;
use std::io;

/// Global context for the application
pub struct Context {
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context { quiet: cli.quiet };
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Up(args) => commands::converge::run(&ctx, config_path, &args, OpKind::Create),
        Command::Down(args) => commands::converge::run(&ctx, config_path, &args, OpKind::Delete),
        Command::Patch(args) => commands::converge::run(&ctx, config_path, &args, OpKind::Update),
        Command::Config(cmd) => match cmd {
            ConfigCommand::Show => commands::config::show(config_path),
            ConfigCommand::Validate => commands::config::validate(config_path),
        },
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "stackform", &mut io::stdout());
            Ok(())
        }
    }
}
