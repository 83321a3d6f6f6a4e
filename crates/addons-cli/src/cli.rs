//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Addons Manager - synthesize and query the merged addon namespace
#[derive(Parser, Debug)]
#[command(name = "addons")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Selection configuration file
    #[arg(
        short = 'f',
        long = "config",
        global = true,
        env = "ADDONS_CONFIG",
        default_value = "addons.yaml"
    )]
    pub config: PathBuf,

    /// Override the target runtime version (e.g. "2.0")
    #[arg(long, global = true, env = "ADDONS_RUNTIME_VERSION")]
    pub runtime_version: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the addons matching a selection query
    ///
    /// Category flags may be combined; the result is their union. With
    /// --dependencies the listing is replaced by the transitive dependency
    /// closure of the selection, seeds excluded.
    ///
    /// Examples:
    ///   addons list -p                      # private addons
    ///   addons list -d -w private_addon     # its dependency closure
    ///   addons list -c -W sale              # core addons except sale
    List(ListArgs),

    /// Reconcile the merged addon directory against the sources
    Build {
        /// Target directory (defaults to `target` from the configuration)
        #[arg(long)]
        target: Option<PathBuf>,
    },
}

/// Flags for the `list` query.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Select addons from the private source
    #[arg(short, long)]
    pub private: bool,

    /// Select addons from the core source
    #[arg(short, long)]
    pub core: bool,

    /// Select addons from extra repository sources
    #[arg(short, long)]
    pub extra: bool,

    /// Select addons from the enterprise source
    #[arg(long)]
    pub enterprise: bool,

    /// Skip addons disabled by the selection configuration
    #[arg(short, long)]
    pub installable: bool,

    /// Print the dependency closure of the selection instead
    #[arg(short, long)]
    pub dependencies: bool,

    /// Add an addon to the selection (repeatable)
    #[arg(short = 'w', long = "with", value_name = "ADDON")]
    pub with_addon: Vec<String>,

    /// Remove an addon from the result (repeatable)
    #[arg(short = 'W', long = "without", value_name = "ADDON")]
    pub without: Vec<String>,

    /// Fail on referenced addons missing from the merged namespace
    #[arg(short = 'x', long)]
    pub strict: bool,

    /// Keep only addons reached indirectly, never directly requested
    #[arg(short, long)]
    pub negate: bool,

    /// Output separator
    #[arg(short, long, default_value = ",")]
    pub separator: String,
}
