//! Cross-catalog aggregation
//!
//! Joins the storefront and the art catalog into one answer:
//! - resolve: free-text query -> detail record + art catalog match
//! - assets: concurrent per-kind asset fan-out with independent failures
//! - logo: the official/score/upvotes logo pick
//! - dlc: bounded DLC name enumeration

pub mod assets;
pub mod dlc;
pub mod logo;
pub mod resolve;

pub use assets::fetch_asset_bundle;
pub use dlc::{MAX_DLC_LOOKUPS, enumerate_dlc};
pub use logo::{best_logo, select_best_logo};
pub use resolve::{cross_reference, resolve};

use crate::domain::{AssetKind, ProfileAssets, ProfileMetadata, UnifiedProfile};
use crate::error::Result;
use crate::upstream::{ArtCatalog, Storefront};

/// Build a unified profile for a free-text query.
///
/// Storefront resolution is mandatory. Art is best-effort: without a match,
/// or with every kind failing, the profile carries only the header image.
pub async fn full_profile(storefront: &dyn Storefront, art: &dyn ArtCatalog, query: &str) -> Result<UnifiedProfile> {
    let resolution = resolve(storefront, art, query).await?;

    let mut assets = ProfileAssets {
        header_image: resolution.details.header_image.clone(),
        ..ProfileAssets::default()
    };
    if let Some(game) = resolution.art.game() {
        let bundle = fetch_asset_bundle(art, game.id, &AssetKind::ALL).await;
        assets.merge_bundle(&bundle);
    }

    Ok(UnifiedProfile {
        metadata: ProfileMetadata::from(&resolution.details),
        assets,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    //! Counting mocks for the upstream seams

    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::domain::{ArtGame, Asset, AssetKind, CatalogEntry, DetailRecord, DetailScope, LogoCandidate};
    use crate::error::{GameError, Result};
    use crate::upstream::{ArtCatalog, Storefront};

    pub fn asset(id: u64) -> Asset {
        Asset {
            id,
            url: format!("https://cdn.example/{}.png", id),
            thumb: format!("https://cdn.example/thumb/{}.png", id),
            width: 600,
            height: 900,
            mime: "image/png".to_string(),
            author: "tester".to_string(),
        }
    }

    pub fn logo(id: u64, style: &str, score: i64, upvotes: i64) -> LogoCandidate {
        LogoCandidate {
            asset: asset(id),
            style: style.to_string(),
            score,
            upvotes,
            downvotes: 0,
        }
    }

    pub struct MockStorefront {
        catalog: Vec<CatalogEntry>,
        dlc: HashMap<u64, Vec<u64>>,
        failing: HashSet<u64>,
        searches: AtomicUsize,
        details: Mutex<Vec<u64>>,
    }

    impl MockStorefront {
        pub fn new(catalog: Vec<CatalogEntry>) -> Self {
            Self {
                catalog,
                dlc: HashMap::new(),
                failing: HashSet::new(),
                searches: AtomicUsize::new(0),
                details: Mutex::new(Vec::new()),
            }
        }

        pub fn with_dlc(mut self, appid: u64, ids: Vec<u64>) -> Self {
            self.dlc.insert(appid, ids);
            self
        }

        pub fn failing_details(mut self, ids: &[u64]) -> Self {
            self.failing.extend(ids);
            self
        }

        pub fn search_calls(&self) -> usize {
            self.searches.load(Ordering::SeqCst)
        }

        pub fn detail_calls(&self) -> Vec<u64> {
            self.details.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Storefront for MockStorefront {
        async fn search(&self, query: &str, limit: usize) -> Result<Vec<CatalogEntry>> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            Ok(crate::upstream::cache::filter_catalog(&self.catalog, query, limit))
        }

        async fn app_details(&self, appid: u64, _scope: DetailScope) -> Result<DetailRecord> {
            self.details.lock().unwrap().push(appid);
            if self.failing.contains(&appid) {
                return Err(GameError::UpstreamUnavailable(format!(
                    "Game with App ID {} not found or unavailable",
                    appid
                )));
            }
            let name = self
                .catalog
                .iter()
                .find(|e| e.appid == appid)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| format!("App {}", appid));
            Ok(DetailRecord {
                appid,
                name,
                app_type: "game".to_string(),
                description: "A game".to_string(),
                header_image: format!("https://store.example/{}/header.jpg", appid),
                developers: vec!["Valve".to_string()],
                genres: vec!["Puzzle".to_string()],
                dlc: self.dlc.get(&appid).cloned().unwrap_or_default(),
                ..DetailRecord::default()
            })
        }
    }

    pub struct MockArt {
        games: HashMap<u64, u64>,
        lookup_fails: bool,
        failing_kinds: HashSet<AssetKind>,
        empty_kinds: HashSet<AssetKind>,
        logos: Vec<LogoCandidate>,
        lookups: AtomicUsize,
        assets: Mutex<Vec<AssetKind>>,
    }

    impl MockArt {
        pub fn new() -> Self {
            Self {
                games: HashMap::new(),
                lookup_fails: false,
                failing_kinds: HashSet::new(),
                empty_kinds: HashSet::new(),
                logos: Vec::new(),
                lookups: AtomicUsize::new(0),
                assets: Mutex::new(Vec::new()),
            }
        }

        pub fn with_game(mut self, appid: u64, game_id: u64) -> Self {
            self.games.insert(appid, game_id);
            self
        }

        pub fn failing_lookup(mut self) -> Self {
            self.lookup_fails = true;
            self
        }

        pub fn failing_kind(mut self, kind: AssetKind) -> Self {
            self.failing_kinds.insert(kind);
            self
        }

        pub fn empty_kind(mut self, kind: AssetKind) -> Self {
            self.empty_kinds.insert(kind);
            self
        }

        pub fn with_logos(mut self, logos: Vec<LogoCandidate>) -> Self {
            self.logos = logos;
            self
        }

        pub fn lookup_calls(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }

        pub fn asset_calls(&self) -> Vec<AssetKind> {
            self.assets.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ArtCatalog for MockArt {
        async fn find_by_steam_id(&self, appid: u64) -> Result<Option<ArtGame>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.lookup_fails {
                return Err(GameError::HttpStatus {
                    service: "SteamGridDB",
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(self.games.get(&appid).map(|&id| ArtGame {
                id,
                name: format!("Art {}", id),
                types: vec!["steam".to_string()],
                verified: true,
            }))
        }

        async fn assets(&self, game_id: u64, kind: AssetKind) -> Result<Vec<Asset>> {
            self.assets.lock().unwrap().push(kind);
            if self.failing_kinds.contains(&kind) {
                return Err(GameError::UpstreamUnavailable(format!("Failed to fetch {} for game {}", kind, game_id)));
            }
            if self.empty_kinds.contains(&kind) {
                return Ok(Vec::new());
            }
            let base = game_id * 10 + kind as u64;
            Ok(vec![asset(base), asset(base + 100)])
        }

        async fn logos(&self, _game_id: u64) -> Result<Vec<LogoCandidate>> {
            Ok(self.logos.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{MockArt, MockStorefront};
    use super::*;
    use crate::domain::CatalogEntry;

    #[tokio::test]
    async fn test_full_profile_merges_first_asset_per_kind() {
        let storefront = MockStorefront::new(vec![CatalogEntry::new(620, "Portal 2")]);
        let art = MockArt::new().with_game(620, 3);

        let profile = full_profile(&storefront, &art, "portal").await.unwrap();

        assert_eq!(profile.metadata.appid, 620);
        assert_eq!(profile.metadata.name, "Portal 2");
        assert_eq!(profile.assets.header_image, "https://store.example/620/header.jpg");
        assert_eq!(profile.assets.grid.as_deref(), Some("https://cdn.example/30.png"));
        assert_eq!(profile.assets.hero.as_deref(), Some("https://cdn.example/31.png"));
        assert!(profile.assets.logo.is_some());
        assert!(profile.assets.icon.is_some());
    }

    #[tokio::test]
    async fn test_full_profile_without_art_match() {
        let storefront = MockStorefront::new(vec![CatalogEntry::new(620, "Portal 2")]);
        let art = MockArt::new();

        let profile = full_profile(&storefront, &art, "portal").await.unwrap();

        assert!(art.asset_calls().is_empty());
        let json = serde_json::to_value(&profile.assets).unwrap();
        assert_eq!(json, serde_json::json!({ "header_image": "https://store.example/620/header.jpg" }));
    }

    #[tokio::test]
    async fn test_full_profile_with_failing_kind() {
        let storefront = MockStorefront::new(vec![CatalogEntry::new(620, "Portal 2")]);
        let art = MockArt::new().with_game(620, 3).failing_kind(AssetKind::Logo);

        let profile = full_profile(&storefront, &art, "portal").await.unwrap();

        assert!(profile.assets.logo.is_none());
        assert!(profile.assets.hero.is_some());
    }
}
