//! game-encyclopedia - a game metadata and artwork server
//!
//! Exposes the Steam storefront, SteamGridDB art catalog and ScreenScraper
//! retro catalog as MCP tools, plus a unified profile that joins the first two.

pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod mcp;
pub mod profile;
pub mod tools;
pub mod upstream;

pub use error::{GameError, Result};
