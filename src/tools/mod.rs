//! Tool system for the MCP surface
//!
//! Each tool validates its JSON arguments, calls one or more upstream clients
//! through the shared ToolContext, and returns a JSON value. The executor turns
//! that value (or the error) into the text content the client sees.

mod context;
mod executor;
mod profile;
mod screenscraper;
mod steam;
mod steamgrid;

pub use context::ToolContext;
pub use executor::ToolExecutor;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{GameError, Result};

/// A tool callable over MCP
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the MCP `tools/call` name)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool
    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value>;
}

/// Result from tool execution
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

/// Tool definition as advertised by `tools/list`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Decode tool arguments; a missing argument object reads as `{}`
pub(crate) fn parse_args<T: DeserializeOwned>(input: Value) -> Result<T> {
    let input = if input.is_null() { Value::Object(Default::default()) } else { input };
    serde_json::from_value(input).map_err(|e| GameError::InvalidInput(e.to_string()))
}

pub(crate) fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

pub use profile::FullProfileTool;
pub use screenscraper::{ScreenScraperGameInfoTool, ScreenScraperListSystemsTool, ScreenScraperSearchTool};
pub use steam::{
    SteamDetailsTool, SteamDlcListTool, SteamListGenresTool, SteamNewsTool, SteamPlayerCountTool, SteamReviewsTool,
    SteamSearchTool, SteamTopGamesTool, SteamTopSellersTool,
};
pub use steamgrid::{SteamGridAssetsTool, SteamGridBestLogoTool, SteamGridSearchTool};

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use super::ToolContext;
    use crate::config::{HttpConfig, SteamConfig, SteamGridConfig};
    use crate::domain::CatalogEntry;
    use crate::profile::testing::{MockArt, MockStorefront};
    use crate::upstream::{SteamClient, SteamGridClient};

    /// Context whose aggregation seams are mocks; the concrete clients are never called
    pub fn with_mocks(storefront: MockStorefront, art: MockArt) -> ToolContext {
        let http = HttpConfig::default();
        let steam = SteamClient::new(&http, &SteamConfig::default(), "test-key").unwrap();
        let grid = SteamGridClient::new(&http, &SteamGridConfig::default(), "test-key").unwrap();
        ToolContext::new(steam, grid, None).with_catalogs(Arc::new(storefront), Arc::new(art))
    }

    pub fn context() -> ToolContext {
        with_mocks(
            MockStorefront::new(vec![CatalogEntry::new(620, "Portal 2"), CatalogEntry::new(400, "Portal")]),
            MockArt::new().with_game(620, 3),
        )
    }
}
