//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the shq CLI.

use clap::{Parser, Subcommand, ValueEnum};

/// shq - Parse SortingHat search-box queries
#[derive(Parser, Debug)]
#[command(name = "shq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a search query into a term and typed filters
    #[command(alias = "p")]
    Parse {
        /// The text typed into the search box
        query: String,

        /// Use a built-in filter set instead of the configured one
        #[arg(long, value_enum)]
        preset: Option<Preset>,

        /// Reject unknown key:value tokens instead of searching for them
        #[arg(long)]
        strict: bool,

        /// Reject filters given more than once
        #[arg(long)]
        reject_duplicates: bool,
    },

    /// List the filters the search box recognizes
    Filters {
        /// Use a built-in filter set instead of the configured one
        #[arg(long, value_enum)]
        preset: Option<Preset>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,
}

/// Built-in filter sets, one per search screen
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Individuals search
    Individuals,
    /// Organizations search (plain text only)
    Organizations,
}

impl Preset {
    /// Returns the name as typed on the command line and in the config file.
    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Individuals => "individuals",
            Preset::Organizations => "organizations",
        }
    }
}

/// Supported shells for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}
