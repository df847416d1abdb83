//! Domain types for game-encyclopedia
//!
//! - storefront: Steam catalog entries, detail records, reviews, news, charts
//! - art: SteamGridDB games, asset kinds, assets and logo candidates
//! - retro: ScreenScraper systems and games
//! - profile: the joined record built by the aggregator

pub mod art;
pub mod profile;
pub mod retro;
pub mod storefront;

pub use art::{ArtGame, Asset, AssetBundle, AssetKind, BestLogo, LogoCandidate};
pub use profile::{ArtMatch, ProfileAssets, ProfileMetadata, Resolution, UnifiedProfile};
pub use retro::{RetroGame, RetroGameInfo, RetroMedia, RetroMediaGroups, RetroSystem, Synopsis, SystemRef};
pub use storefront::{
    CatalogEntry, DetailRecord, DetailScope, DlcEntry, DlcList, GENRES, GenreTopGame, NewsItem, Platforms,
    PriceOverview, ReleaseDate, ReviewSummary, TopSeller, canonical_genre,
};
