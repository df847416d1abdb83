//! Storefront (Steam) record types.

use serde::{Deserialize, Serialize};

/// Minimal search hit from the storefront catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub appid: u64,
    pub name: String,
}

impl CatalogEntry {
    pub fn new(appid: u64, name: impl Into<String>) -> Self {
        Self {
            appid,
            name: name.into(),
        }
    }
}

/// How much of an app's detail record to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailScope {
    /// Every field, including genres, categories and price
    Full,
    /// Identity, descriptions and the DLC list only
    Basic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOverview {
    pub currency: String,
    pub initial: i64,
    #[serde(rename = "final")]
    pub final_price: i64,
    pub discount_percent: i64,
    pub initial_formatted: String,
    pub final_formatted: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platforms {
    pub windows: bool,
    pub mac: bool,
    pub linux: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDate {
    pub coming_soon: bool,
    pub date: String,
}

/// Full storefront detail record for one app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub appid: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub app_type: String,
    pub description: String,
    pub detailed_description: String,
    pub about: String,
    pub header_image: String,
    pub capsule_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceOverview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Platforms>,
    pub categories: Vec<String>,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<ReleaseDate>,
    pub is_free: bool,
    pub supported_languages: String,
    /// Related add-on ids as declared by the storefront
    pub dlc: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DlcEntry {
    pub appid: u64,
    pub name: String,
}

/// Result of the bounded DLC enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DlcList {
    pub appid: u64,
    pub name: String,
    pub total_dlc_count: usize,
    pub retrieved_count: usize,
    pub remaining_count: usize,
    pub dlc: Vec<DlcEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub appid: u64,
    pub review_score_desc: String,
    pub total_positive: u64,
    pub total_negative: u64,
    pub total_reviews: u64,
    pub percentage_score: u64,
    pub top_reviews: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub author: String,
    pub contents: String,
    /// RFC 3339 timestamp in UTC
    pub date: String,
    pub feed_label: String,
    pub feed_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSeller {
    pub appid: u64,
    pub name: String,
    /// Price in cents
    pub final_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<i64>,
    pub discount_percent: i64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreTopGame {
    pub appid: u64,
    pub name: String,
    /// Price in cents
    pub price: i64,
    pub initial_price: i64,
    pub discount_percent: i64,
    /// Concurrent players at the time of the upstream snapshot
    pub ccu: u64,
}

/// Genres understood by the top-by-genre feed.
pub const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Casual",
    "Early Access",
    "Free to Play",
    "Indie",
    "Massively Multiplayer",
    "Racing",
    "RPG",
    "Simulation",
    "Sports",
    "Strategy",
];

/// Match a genre name against the curated list, ignoring case.
pub fn canonical_genre(name: &str) -> Option<&'static str> {
    let wanted = name.trim();
    GENRES.iter().copied().find(|g| g.eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_genre() {
        assert_eq!(canonical_genre("rpg"), Some("RPG"));
        assert_eq!(canonical_genre(" free to play "), Some("Free to Play"));
        assert_eq!(canonical_genre("Roguelike"), None);
    }

    #[test]
    fn test_detail_record_serializes_type_field() {
        let record = DetailRecord {
            appid: 10,
            name: "Counter-Strike".into(),
            app_type: "game".into(),
            description: String::new(),
            detailed_description: String::new(),
            about: String::new(),
            header_image: String::new(),
            capsule_image: String::new(),
            website: None,
            developers: vec![],
            publishers: vec![],
            price: None,
            platforms: None,
            categories: vec![],
            genres: vec![],
            release_date: None,
            is_free: false,
            supported_languages: String::new(),
            dlc: vec![],
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "game");
        assert!(json.get("website").is_none());
        assert!(json.get("price").is_none());
    }
}
