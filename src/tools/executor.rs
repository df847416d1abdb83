//! Tool executor - manages tool registration and execution

use std::collections::HashMap;

use serde_json::Value;

use super::{
    FullProfileTool, ScreenScraperGameInfoTool, ScreenScraperListSystemsTool, ScreenScraperSearchTool,
    SteamDetailsTool, SteamDlcListTool, SteamGridAssetsTool, SteamGridBestLogoTool, SteamGridSearchTool,
    SteamListGenresTool, SteamNewsTool, SteamPlayerCountTool, SteamReviewsTool, SteamSearchTool, SteamTopGamesTool,
    SteamTopSellersTool, Tool, ToolContext, ToolDefinition, ToolResult,
};

/// Registry of the tools exposed by the server
pub struct ToolExecutor {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolExecutor {
    /// Create executor with the storefront, art and profile tools, plus the
    /// retro tools when `with_retro` is set
    pub fn standard(with_retro: bool) -> Self {
        let mut executor = Self::new();

        // Storefront
        executor.add_tool(Box::new(SteamSearchTool));
        executor.add_tool(Box::new(SteamDetailsTool));
        executor.add_tool(Box::new(SteamDlcListTool));
        executor.add_tool(Box::new(SteamReviewsTool));
        executor.add_tool(Box::new(SteamNewsTool));
        executor.add_tool(Box::new(SteamPlayerCountTool));
        executor.add_tool(Box::new(SteamTopSellersTool));
        executor.add_tool(Box::new(SteamTopGamesTool));
        executor.add_tool(Box::new(SteamListGenresTool));

        // Art catalog
        executor.add_tool(Box::new(SteamGridSearchTool));
        executor.add_tool(Box::new(SteamGridAssetsTool));
        executor.add_tool(Box::new(SteamGridBestLogoTool));

        // Aggregation
        executor.add_tool(Box::new(FullProfileTool));

        if with_retro {
            executor.add_tool(Box::new(ScreenScraperListSystemsTool));
            executor.add_tool(Box::new(ScreenScraperSearchTool));
            executor.add_tool(Box::new(ScreenScraperGameInfoTool));
        }

        executor
    }

    /// Tools matching what the context can serve
    pub fn for_context(ctx: &ToolContext) -> Self {
        Self::standard(ctx.has_screenscraper())
    }

    /// Create an empty executor (for custom tool sets)
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Add a tool to the executor
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Tool definitions, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Execute a tool call. Errors come back as `Error: <message>` text.
    pub async fn execute(&self, name: &str, input: Value, ctx: &ToolContext) -> ToolResult {
        let Some(tool) = self.tools.get(name) else {
            log::warn!("Unknown tool requested: {}", name);
            return ToolResult::error(format!("Error: Unknown tool: {}", name));
        };

        log::info!("Executing tool {}", name);
        let outcome = tool.execute(input, ctx).await.and_then(|value| Ok(serde_json::to_string_pretty(&value)?));
        match outcome {
            Ok(text) => ToolResult::success(text),
            Err(e) => {
                log::warn!("Tool {} failed: {}", name, e);
                ToolResult::error(format!("Error: {}", e))
            }
        }
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the list of tool names, sorted
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::standard(false)
    }
}
