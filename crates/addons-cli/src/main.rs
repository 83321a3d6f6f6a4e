//! Addons Manager CLI
//!
//! The command-line surface over the addon namespace: a query command
//! (`list`) and the build step that materializes the merged directory
//! (`build`).

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let runtime_version = cli.runtime_version.as_deref();
    match cli.command {
        Commands::List(args) => commands::run_list(&cli.config, runtime_version, &args),
        Commands::Build { target } => {
            commands::run_build(&cli.config, runtime_version, target.as_deref())
        }
    }
}
