//! Unified profile types produced by the aggregator.

use serde::{Deserialize, Serialize};

use super::art::{ArtGame, AssetBundle, AssetKind};
use super::storefront::DetailRecord;

/// Outcome of cross-referencing a storefront id into the art catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtMatch {
    /// The art catalog knows this storefront id
    Matched(ArtGame),
    /// The lookup succeeded and the art catalog has no entry for the id
    NoMatch,
    /// The lookup itself failed; the profile proceeds without art
    LookupFailed(String),
}

impl ArtMatch {
    pub fn game(&self) -> Option<&ArtGame> {
        match self {
            ArtMatch::Matched(game) => Some(game),
            ArtMatch::NoMatch | ArtMatch::LookupFailed(_) => None,
        }
    }
}

/// A storefront detail record joined with its art catalog counterpart.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub details: DetailRecord,
    pub art: ArtMatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetadata {
    pub appid: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub app_type: String,
    pub short_description: String,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub release_date: String,
    pub genres: Vec<String>,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl From<&DetailRecord> for ProfileMetadata {
    fn from(details: &DetailRecord) -> Self {
        Self {
            appid: details.appid,
            name: details.name.clone(),
            app_type: details.app_type.clone(),
            short_description: details.description.clone(),
            developers: details.developers.clone(),
            publishers: details.publishers.clone(),
            release_date: details.release_date.as_ref().map(|r| r.date.clone()).unwrap_or_default(),
            genres: details.genres.clone(),
            categories: details.categories.clone(),
            price: details.price.as_ref().map(|p| p.final_formatted.clone()),
            website: details.website.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileAssets {
    pub header_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ProfileAssets {
    /// Take the first candidate of every kind present in the bundle
    pub fn merge_bundle(&mut self, bundle: &AssetBundle) {
        for (kind, assets) in bundle {
            let Some(best) = assets.first() else {
                continue;
            };
            let slot = match kind {
                AssetKind::Hero => &mut self.hero,
                AssetKind::Logo => &mut self.logo,
                AssetKind::Grid => &mut self.grid,
                AssetKind::Icon => &mut self.icon,
            };
            *slot = Some(best.url.clone());
        }
    }
}

/// Storefront metadata plus the best visual asset of each kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedProfile {
    pub metadata: ProfileMetadata,
    pub assets: ProfileAssets,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::art::Asset;

    fn asset(id: u64) -> Asset {
        Asset {
            id,
            url: format!("https://cdn/{}.png", id),
            thumb: String::new(),
            width: 1,
            height: 1,
            mime: "image/png".into(),
            author: "a".into(),
        }
    }

    #[test]
    fn test_merge_bundle_takes_first_candidate() {
        let mut bundle = AssetBundle::new();
        bundle.insert(AssetKind::Hero, vec![asset(1), asset(2)]);
        bundle.insert(AssetKind::Icon, vec![asset(3)]);

        let mut assets = ProfileAssets {
            header_image: "https://store/header.jpg".into(),
            ..Default::default()
        };
        assets.merge_bundle(&bundle);

        assert_eq!(assets.hero.as_deref(), Some("https://cdn/1.png"));
        assert_eq!(assets.icon.as_deref(), Some("https://cdn/3.png"));
        assert!(assets.logo.is_none());
        assert!(assets.grid.is_none());
    }

    #[test]
    fn test_absent_kinds_are_omitted_from_json() {
        let assets = ProfileAssets {
            header_image: "h".into(),
            logo: Some("l".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&assets).unwrap();
        assert_eq!(json["logo"], "l");
        assert!(json.get("hero").is_none());
        assert!(json.get("grid").is_none());
    }

    #[test]
    fn test_art_match_game() {
        let game = ArtGame {
            id: 5,
            name: "x".into(),
            types: vec![],
            verified: true,
        };
        assert_eq!(ArtMatch::Matched(game.clone()).game(), Some(&game));
        assert!(ArtMatch::NoMatch.game().is_none());
        assert!(ArtMatch::LookupFailed("boom".into()).game().is_none());
    }
}
