//! game_get_full_profile tool

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Tool, ToolContext, parse_args, to_value};
use crate::error::Result;
use crate::profile::full_profile;

pub struct FullProfileTool;

#[derive(Debug, Deserialize)]
struct ProfileArgs {
    query: String,
}

#[async_trait]
impl Tool for FullProfileTool {
    fn name(&self) -> &'static str {
        "game_get_full_profile"
    }

    fn description(&self) -> &'static str {
        "Get a comprehensive game profile: Steam metadata plus the best SteamGridDB logo, hero, grid and icon, in a single request. The first Steam match for the query is used."
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
        let args: ProfileArgs = parse_args(input)?;
        to_value(&full_profile(ctx.storefront(), ctx.art(), &args.query).await?)
    }
}
