//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Rebuild org charts from spreadsheet rows and explore them
#[derive(Parser, Debug)]
#[command(name = "orgforest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, env = "ORGFOREST_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the (filtered) org chart as a tree
    Tree {
        /// JSON rows file
        #[arg(value_hint = ValueHint::FilePath)]
        rows: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List root positions
    Roots {
        /// JSON rows file
        #[arg(value_hint = ValueHint::FilePath)]
        rows: PathBuf,
    },

    /// Show details of one position
    Show {
        /// JSON rows file
        #[arg(value_hint = ValueHint::FilePath)]
        rows: PathBuf,
        /// Position id, e.g. Ana-Souza-3
        id: String,
    },

    /// List company and team filter options
    Options {
        /// JSON rows file
        #[arg(value_hint = ValueHint::FilePath)]
        rows: PathBuf,
        /// Limit teams to this company
        #[arg(long)]
        company: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Filter flags shared by tree-printing commands.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Only this company (exact match)
    #[arg(long)]
    pub company: Option<String>,
    /// Only this team (exact match)
    #[arg(long)]
    pub team: Option<String>,
    /// Name or title contains (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print the global config file path
    Path,
}
