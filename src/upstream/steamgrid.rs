//! SteamGridDB client - community artwork keyed by SteamGridDB game ids

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;

use super::ArtCatalog;
use crate::config::{HttpConfig, SteamGridConfig};
use crate::domain::{ArtGame, Asset, AssetKind, LogoCandidate};
use crate::error::{GameError, Result};
use crate::http::{build_client, get_json};

const SERVICE: &str = "SteamGridDB";

/// SteamGridDB API client
pub struct SteamGridClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SteamGridClient {
    pub fn new(http: &HttpConfig, config: &SteamGridConfig, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_client(http)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Autocomplete search by name
    pub async fn search(&self, query: &str) -> Result<Vec<ArtGame>> {
        let term = query.trim();
        if term.is_empty() {
            return Err(GameError::InvalidInput("query must not be empty".to_string()));
        }

        let url = self.url_with_segments(&["search", "autocomplete", term])?;
        let body: Envelope<Vec<ArtGame>> = get_json(SERVICE, self.authorized(url)).await?;
        body.into_data("Failed to search SteamGridDB")
    }

    fn authorized(&self, url: Url) -> RequestBuilder {
        self.client.get(url).bearer_auth(&self.api_key)
    }

    /// Join path segments onto the base URL, percent-encoding each one
    fn url_with_segments(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| GameError::Configuration(format!("invalid SteamGridDB base URL '{}': {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                GameError::Configuration(format!("SteamGridDB base URL '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl ArtCatalog for SteamGridClient {
    async fn find_by_steam_id(&self, appid: u64) -> Result<Option<ArtGame>> {
        let url = self.url_with_segments(&["games", "steam", &appid.to_string()])?;

        steam_lookup_outcome(get_json(SERVICE, self.authorized(url)).await)
    }

    async fn assets(&self, game_id: u64, kind: AssetKind) -> Result<Vec<Asset>> {
        let url = self.url_with_segments(&[kind.path_segment(), "game", &game_id.to_string()])?;
        let body: Envelope<Vec<RawAsset>> = get_json(SERVICE, self.authorized(url)).await?;
        let raw = body.into_data(&format!("Failed to fetch {} for game {}", kind, game_id))?;
        Ok(raw.into_iter().map(RawAsset::into_asset).collect())
    }

    async fn logos(&self, game_id: u64) -> Result<Vec<LogoCandidate>> {
        let url = self.url_with_segments(&[AssetKind::Logo.path_segment(), "game", &game_id.to_string()])?;
        let body: Envelope<Vec<RawAsset>> = get_json(SERVICE, self.authorized(url)).await?;
        let raw = body.into_data(&format!("Failed to fetch logos for game {}", game_id))?;
        Ok(raw.into_iter().map(RawAsset::into_logo).collect())
    }
}

/// A 404 or an unsuccessful envelope means the app has no entry; other failures propagate
fn steam_lookup_outcome(response: Result<Envelope<ArtGame>>) -> Result<Option<ArtGame>> {
    match response {
        Ok(Envelope {
            success: true,
            data: Some(game),
        }) => Ok(Some(game)),
        Ok(_) => Ok(None),
        Err(e) if e.is_http_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn into_data(self, failure: &str) -> Result<T> {
        match self {
            Envelope {
                success: true,
                data: Some(data),
            } => Ok(data),
            _ => Err(GameError::UpstreamUnavailable(failure.to_string())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAuthor {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawAsset {
    id: u64,
    url: String,
    #[serde(default)]
    thumb: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    mime: String,
    #[serde(default)]
    style: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    upvotes: i64,
    #[serde(default)]
    downvotes: i64,
    #[serde(default)]
    author: RawAuthor,
}

impl RawAsset {
    fn into_asset(self) -> Asset {
        Asset {
            id: self.id,
            url: self.url,
            thumb: self.thumb,
            width: self.width,
            height: self.height,
            mime: self.mime,
            author: self.author.name,
        }
    }

    fn into_logo(self) -> LogoCandidate {
        let style = self.style.clone();
        let (score, upvotes, downvotes) = (self.score, self.upvotes, self.downvotes);
        LogoCandidate {
            asset: self.into_asset(),
            style,
            score,
            upvotes,
            downvotes,
        }
    }
}
