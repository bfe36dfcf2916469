//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod apply;
pub mod args;
pub mod completions;
pub mod context;
pub mod lookup;
pub mod state;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

use crate::orchestrator::DEFAULT_PARALLELISM;

/// forgeteam - declarative Forgejo team management
#[derive(Parser, Debug)]
#[command(name = "forgeteam")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "FORGETEAM_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "FORGETEAM_CONFIG", hide_env = true)]
    pub config: Option<PathBuf>,

    /// Forgejo instance URL
    #[arg(long, global = true, env = "FORGETEAM_URL", hide_env = true)]
    pub url: Option<String>,

    /// Forgejo access token
    #[arg(
        long,
        global = true,
        env = "FORGETEAM_TOKEN",
        hide_env = true,
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// Override state database location
    #[arg(long, global = true, env = "FORGETEAM_STATE", hide_env = true)]
    pub state: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, env = "FORGETEAM_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the changes needed to match a declaration
    Plan {
        /// Declaration file (YAML)
        #[arg(short = 'f', long = "file")]
        file: PathBuf,
    },

    /// Create, update, replace and delete teams to match a declaration
    Apply {
        /// Declaration file (YAML)
        #[arg(short = 'f', long = "file")]
        file: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,

        /// Number of teams reconciled concurrently
        #[arg(long, default_value_t = DEFAULT_PARALLELISM)]
        parallelism: usize,
    },

    /// Delete every team recorded in state
    Destroy {
        /// Only destroy this address
        #[arg(long)]
        target: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Look up an existing team by organization and name
    Lookup {
        /// Organization name
        #[arg(long)]
        org: String,

        /// Team name
        #[arg(long)]
        name: String,
    },

    /// Inspect and edit committed state
    #[command(subcommand)]
    State(StateCommands),

    /// Generate shell completions
    #[command(after_help = "Examples:
  bash:   forgeteam completion bash > /etc/bash_completion.d/forgeteam
  zsh:    forgeteam completion zsh > \"${fpath[1]}/_forgeteam\"
  fish:   forgeteam completion fish > ~/.config/fish/completions/forgeteam.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Display version information
    Version,
}

/// State subcommands
#[derive(Subcommand, Debug)]
pub enum StateCommands {
    /// List every address in state
    List,

    /// Show the committed record for an address
    Show {
        /// Resource address
        address: String,
    },

    /// Forget an address without touching the remote team
    Rm {
        /// Resource address
        address: String,
    },
}
