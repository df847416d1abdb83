//! CLI module for game-encyclopedia - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for serving MCP, listing
//! tools, and one-shot tool calls.

pub mod commands;

pub use commands::Cli;
