//! Upstream clients - typed access to the three catalogs
//!
//! This module provides:
//! - Storefront / ArtCatalog traits, the seams the aggregator depends on
//! - SteamClient with its whole-catalog CatalogCache
//! - SteamGridClient for community artwork
//! - ScreenScraperClient for retro metadata

pub mod cache;
pub mod screenscraper;
pub mod steam;
pub mod steamgrid;

pub use cache::{AppListSource, CatalogCache};
pub use screenscraper::{GameInfoQuery, ScreenScraperClient};
pub use steam::SteamClient;
pub use steamgrid::SteamGridClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{ArtGame, Asset, AssetKind, CatalogEntry, DetailRecord, DetailScope, LogoCandidate};
use crate::error::Result;

/// Storefront catalog - name search and per-app details
#[async_trait]
pub trait Storefront: Send + Sync {
    /// Case-insensitive name search, in catalog order, capped at `limit`
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CatalogEntry>>;

    /// Detail record for one app; fails when the storefront flags the id unavailable
    async fn app_details(&self, appid: u64, scope: DetailScope) -> Result<DetailRecord>;
}

/// Community art catalog - keyed by its own game ids
#[async_trait]
pub trait ArtCatalog: Send + Sync {
    /// Cross-reference a storefront id. `Ok(None)` means the catalog has no such game.
    async fn find_by_steam_id(&self, appid: u64) -> Result<Option<ArtGame>>;

    /// Candidates of one kind, in upstream order
    async fn assets(&self, game_id: u64, kind: AssetKind) -> Result<Vec<Asset>>;

    /// Logo candidates with their ranking signals
    async fn logos(&self, game_id: u64) -> Result<Vec<LogoCandidate>>;
}

/// Read an integer that upstreams send either as a number or as a string
pub(crate) fn lenient_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn lenient_u64(value: &Value) -> Option<u64> {
    lenient_i64(value).and_then(|n| u64::try_from(n).ok())
}
