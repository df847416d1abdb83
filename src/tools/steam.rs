//! Storefront tools

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Tool, ToolContext, parse_args, to_value};
use crate::domain::{DetailScope, GENRES, canonical_genre};
use crate::error::Result;
use crate::profile::enumerate_dlc;

const DEFAULT_LIMIT: usize = 10;
const DEFAULT_NEWS_COUNT: u32 = 5;

#[derive(Debug, Deserialize)]
struct AppArgs {
    appid: u64,
}

fn appid_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "appid": {
                "type": "number",
                "description": "The Steam App ID of the game"
            }
        },
        "required": ["appid"]
    })
}

fn limit_property() -> Value {
    json!({
        "type": "number",
        "description": "Maximum number of results to return (default: 10)",
        "default": DEFAULT_LIMIT
    })
}

pub struct SteamSearchTool;

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    limit: Option<usize>,
}

#[async_trait]
impl Tool for SteamSearchTool {
    fn name(&self) -> &'static str {
        "steam_search_game"
    }

    fn description(&self) -> &'static str {
        "Search for video games on Steam by name. Returns a list of matching games with their App IDs."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The game name to search for"
                },
                "limit": limit_property()
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value> {
        let args: SearchArgs = parse_args(input)?;
        let results = ctx
            .storefront()
            .search(&args.query, args.limit.unwrap_or(DEFAULT_LIMIT))
            .await?;
        Ok(json!({ "count": results.len(), "results": results }))
    }
}

pub struct SteamDetailsTool;

#[async_trait]
impl Tool for SteamDetailsTool {
    fn name(&self) -> &'static str {
        "steam_get_details"
    }

    fn description(&self) -> &'static str {
        "Get detailed information about a Steam game by its App ID: description, categories, genres, release date, price, platforms and DLC ids."
    }

    fn input_schema(&self) -> Value {
        appid_schema()
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value> {
        let args: AppArgs = parse_args(input)?;
        let details = ctx.storefront().app_details(args.appid, DetailScope::Full).await?;
        to_value(&details)
    }
}

pub struct SteamDlcListTool;

#[async_trait]
impl Tool for SteamDlcListTool {
    fn name(&self) -> &'static str {
        "steam_get_dlc_list"
    }

    fn description(&self) -> &'static str {
        "List the DLC of a Steam game. Names are resolved for the first 10 DLC; counts report how many were retrieved and how many remain."
    }

    fn input_schema(&self) -> Value {
        appid_schema()
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value> {
        let args: AppArgs = parse_args(input)?;
        let list = enumerate_dlc(ctx.storefront(), args.appid).await?;
        to_value(&list)
    }
}

pub struct SteamReviewsTool;

#[async_trait]
impl Tool for SteamReviewsTool {
    fn name(&self) -> &'static str {
        "steam_get_reviews_summary"
    }

    fn description(&self) -> &'static str {
        "Get the user review summary of a Steam game: score description, positive/negative counts, percentage and a few review excerpts."
    }

    fn input_schema(&self) -> Value {
        appid_schema()
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value> {
        let args: AppArgs = parse_args(input)?;
        to_value(&ctx.steam.review_summary(args.appid).await?)
    }
}

pub struct SteamNewsTool;

#[derive(Debug, Deserialize)]
struct NewsArgs {
    appid: u64,
    count: Option<u32>,
}

#[async_trait]
impl Tool for SteamNewsTool {
    fn name(&self) -> &'static str {
        "steam_get_news"
    }

    fn description(&self) -> &'static str {
        "Get the latest news and patch notes for a Steam game."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "appid": {
                    "type": "number",
                    "description": "The Steam App ID of the game"
                },
                "count": {
                    "type": "number",
                    "description": "Number of news items to return (default: 5, max: 20)",
                    "default": DEFAULT_NEWS_COUNT
                }
            },
            "required": ["appid"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value> {
        let args: NewsArgs = parse_args(input)?;
        let news = ctx.steam.news(args.appid, args.count.unwrap_or(DEFAULT_NEWS_COUNT)).await?;
        Ok(json!({ "appid": args.appid, "count": news.len(), "news": news }))
    }
}

pub struct SteamPlayerCountTool;

#[async_trait]
impl Tool for SteamPlayerCountTool {
    fn name(&self) -> &'static str {
        "steam_get_player_count"
    }

    fn description(&self) -> &'static str {
        "Get the number of players currently in-game for a Steam game."
    }

    fn input_schema(&self) -> Value {
        appid_schema()
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value> {
        let args: AppArgs = parse_args(input)?;
        let players = ctx.steam.player_count(args.appid).await?;
        Ok(json!({ "appid": args.appid, "player_count": players }))
    }
}

pub struct SteamTopSellersTool;

#[derive(Debug, Deserialize)]
struct LimitArgs {
    limit: Option<usize>,
}

#[async_trait]
impl Tool for SteamTopSellersTool {
    fn name(&self) -> &'static str {
        "steam_get_top_sellers"
    }

    fn description(&self) -> &'static str {
        "Get the current global top sellers on the Steam store with prices and discounts."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "limit": limit_property()
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value> {
        let args: LimitArgs = parse_args(input)?;
        let sellers = ctx.steam.top_sellers(args.limit.unwrap_or(DEFAULT_LIMIT)).await?;
        Ok(json!({ "count": sellers.len(), "results": sellers }))
    }
}

pub struct SteamTopGamesTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopGamesArgs {
    genre_id: String,
    limit: Option<usize>,
}

#[async_trait]
impl Tool for SteamTopGamesTool {
    fn name(&self) -> &'static str {
        "steam_get_top_games"
    }

    fn description(&self) -> &'static str {
        "Get the most played games of a genre, ranked by current players. Use steam_list_genres for valid genre names."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "genreId": {
                    "type": "string",
                    "description": "Genre name from steam_list_genres (e.g. \"RPG\")",
                    "enum": GENRES
                },
                "limit": limit_property()
            },
            "required": ["genreId"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value> {
        let args: TopGamesArgs = parse_args(input)?;
        let games = ctx.steam.top_by_genre(&args.genre_id, args.limit.unwrap_or(DEFAULT_LIMIT)).await?;
        let genre = canonical_genre(&args.genre_id).unwrap_or(args.genre_id.as_str());
        Ok(json!({ "genre": genre, "count": games.len(), "results": games }))
    }
}

pub struct SteamListGenresTool;

#[async_trait]
impl Tool for SteamListGenresTool {
    fn name(&self) -> &'static str {
        "steam_list_genres"
    }

    fn description(&self) -> &'static str {
        "List the genre names accepted by steam_get_top_games."
    }

    fn input_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn execute(&self, _input: Value, _ctx: &ToolContext) -> Result<Value> {
        Ok(json!({ "count": GENRES.len(), "genres": GENRES }))
    }
}
