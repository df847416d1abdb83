//! Art catalog tools

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Tool, ToolContext, parse_args, to_value};
use crate::domain::AssetKind;
use crate::error::Result;
use crate::profile::{best_logo, fetch_asset_bundle};

pub struct SteamGridSearchTool;

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
}

#[async_trait]
impl Tool for SteamGridSearchTool {
    fn name(&self) -> &'static str {
        "steamgrid_search_game"
    }

    fn description(&self) -> &'static str {
        "Search for video games on SteamGridDB by name. Returns SteamGridDB IDs, which are used to retrieve visual assets."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The game name to search for"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value> {
        let args: SearchArgs = parse_args(input)?;
        let results = ctx.grid.search(&args.query).await?;
        Ok(json!({ "count": results.len(), "results": results }))
    }
}

pub struct SteamGridAssetsTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetsArgs {
    game_id: u64,
    asset_types: Option<Vec<String>>,
}

#[async_trait]
impl Tool for SteamGridAssetsTool {
    fn name(&self) -> &'static str {
        "steamgrid_get_assets"
    }

    fn description(&self) -> &'static str {
        "Get visual assets for a game from SteamGridDB: grids (box art), heroes, transparent logos and icons. Kinds that fail or have no art are left out."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "gameId": {
                    "type": "number",
                    "description": "The SteamGridDB game ID"
                },
                "assetTypes": {
                    "type": "array",
                    "items": {
                        "type": "string",
                        "enum": ["grid", "hero", "logo", "icon"]
                    },
                    "description": "Types of assets to retrieve (default: all types)",
                    "default": ["grid", "hero", "logo", "icon"]
                }
            },
            "required": ["gameId"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value> {
        let args: AssetsArgs = parse_args(input)?;
        let kinds = match args.asset_types {
            Some(names) if !names.is_empty() => {
                names.iter().map(|n| n.parse::<AssetKind>()).collect::<Result<Vec<_>>>()?
            }
            _ => AssetKind::ALL.to_vec(),
        };

        let bundle = fetch_asset_bundle(ctx.art(), args.game_id, &kinds).await;
        Ok(json!({ "gameId": args.game_id, "assets": bundle }))
    }
}

pub struct SteamGridBestLogoTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BestLogoArgs {
    game_id: Option<u64>,
    appid: Option<u64>,
}

#[async_trait]
impl Tool for SteamGridBestLogoTool {
    fn name(&self) -> &'static str {
        "steamgrid_get_best_logo"
    }

    fn description(&self) -> &'static str {
        "Get the single best logo for a game: official logos first, then by score, then by upvotes. Accepts a SteamGridDB game ID or a Steam App ID."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "gameId": {
                    "type": "number",
                    "description": "The SteamGridDB game ID"
                },
                "appid": {
                    "type": "number",
                    "description": "The Steam App ID, used when gameId is not given"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value> {
        let args: BestLogoArgs = parse_args(input)?;
        to_value(&best_logo(ctx.art(), args.game_id, args.appid).await?)
    }
}
