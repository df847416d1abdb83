//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - serve: run the MCP server on stdio (default)
//! - tools: list the registered tools
//! - call: run one tool and print its output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// game-encyclopedia - game metadata and artwork over MCP
#[derive(Parser, Debug)]
#[command(name = "game-encyclopedia")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout
    Serve,

    /// List the tools this server exposes
    Tools,

    /// Run a single tool and print its result
    Call {
        /// Tool name (e.g. steam_search_game)
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}
