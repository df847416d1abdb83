//! Retro catalog tools, registered only when ScreenScraper credentials exist

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Tool, ToolContext, parse_args, to_value};
use crate::error::{GameError, Result};
use crate::upstream::{GameInfoQuery, ScreenScraperClient};

fn client(ctx: &ToolContext) -> Result<&ScreenScraperClient> {
    ctx.screenscraper.as_deref().ok_or_else(|| {
        GameError::Configuration(
            "ScreenScraper is not configured. Set SCREENSCRAPER_DEV_ID and SCREENSCRAPER_DEV_PASSWORD.".to_string(),
        )
    })
}

pub struct ScreenScraperListSystemsTool;

#[async_trait]
impl Tool for ScreenScraperListSystemsTool {
    fn name(&self) -> &'static str {
        "screenscraper_list_systems"
    }

    fn description(&self) -> &'static str {
        "List every gaming system known to ScreenScraper, with the IDs used to narrow retro game searches."
    }

    fn input_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn execute(&self, _input: Value, ctx: &ToolContext) -> Result<Value> {
        let systems = client(ctx)?.systems().await?;
        Ok(json!({ "count": systems.len(), "systems": systems }))
    }
}

pub struct ScreenScraperSearchTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchArgs {
    game_name: String,
    system_id: Option<u64>,
    language: Option<String>,
}

#[async_trait]
impl Tool for ScreenScraperSearchTool {
    fn name(&self) -> &'static str {
        "screenscraper_search_game"
    }

    fn description(&self) -> &'static str {
        "Search retro games on ScreenScraper by name, optionally restricted to one system."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "gameName": {
                    "type": "string",
                    "description": "The game name to search for"
                },
                "systemId": {
                    "type": "number",
                    "description": "ScreenScraper system ID (see screenscraper_list_systems)"
                },
                "language": {
                    "type": "string",
                    "description": "Preferred region/language for names (default: en)",
                    "default": "en"
                }
            },
            "required": ["gameName"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value> {
        let args: SearchArgs = parse_args(input)?;
        let games = client(ctx)?
            .search(&args.game_name, args.system_id, args.language.as_deref())
            .await?;
        Ok(json!({ "count": games.len(), "results": games }))
    }
}

pub struct ScreenScraperGameInfoTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameInfoArgs {
    game_id: Option<u64>,
    game_name: Option<String>,
    system_id: Option<u64>,
    crc: Option<String>,
    md5: Option<String>,
    sha1: Option<String>,
    rom_name: Option<String>,
    rom_size: Option<u64>,
    language: Option<String>,
}

impl From<GameInfoArgs> for GameInfoQuery {
    fn from(args: GameInfoArgs) -> Self {
        Self {
            game_id: args.game_id,
            game_name: args.game_name,
            system_id: args.system_id,
            crc: args.crc,
            md5: args.md5,
            sha1: args.sha1,
            rom_name: args.rom_name,
            rom_size: args.rom_size,
            language: args.language,
        }
    }
}

#[async_trait]
impl Tool for ScreenScraperGameInfoTool {
    fn name(&self) -> &'static str {
        "screenscraper_get_game_info"
    }

    fn description(&self) -> &'static str {
        "Get full retro game information from ScreenScraper, including screenshots, box art, wheels, videos and other media. Identify the game by ID, name, ROM name or ROM checksum."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "gameId": { "type": "number", "description": "ScreenScraper game ID" },
                "gameName": { "type": "string", "description": "Game name" },
                "systemId": { "type": "number", "description": "ScreenScraper system ID" },
                "crc": { "type": "string", "description": "ROM CRC32 checksum" },
                "md5": { "type": "string", "description": "ROM MD5 checksum" },
                "sha1": { "type": "string", "description": "ROM SHA1 checksum" },
                "romName": { "type": "string", "description": "ROM file name" },
                "romSize": { "type": "number", "description": "ROM size in bytes" },
                "language": {
                    "type": "string",
                    "description": "Preferred region/language for names (default: en)",
                    "default": "en"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value> {
        let args: GameInfoArgs = parse_args(input)?;
        let info = client(ctx)?.game_info(&args.into()).await?;
        to_value(&info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::context;

    #[tokio::test]
    async fn test_unconfigured_client_is_configuration_error() {
        let err = ScreenScraperListSystemsTool.execute(Value::Null, &context()).await.unwrap_err();
        assert!(matches!(err, GameError::Configuration(_)));
    }

    #[test]
    fn test_game_info_args_map_to_query() {
        let args: GameInfoArgs = parse_args(json!({ "romName": "sonic.md", "systemId": 1, "romSize": 512 })).unwrap();
        let query = GameInfoQuery::from(args);
        assert_eq!(query.rom_name.as_deref(), Some("sonic.md"));
        assert_eq!(query.system_id, Some(1));
        assert_eq!(query.rom_size, Some(512));
        assert!(query.game_id.is_none());
    }
}
