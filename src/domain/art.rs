//! Community art catalog (SteamGridDB) types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

/// A game in the art catalog's own id space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtGame {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub verified: bool,
}

/// Visual asset category, each fetched from its own sub-resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Grid,
    Hero,
    Logo,
    Icon,
}

impl AssetKind {
    pub const ALL: [AssetKind; 4] = [AssetKind::Grid, AssetKind::Hero, AssetKind::Logo, AssetKind::Icon];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Grid => "grid",
            AssetKind::Hero => "hero",
            AssetKind::Logo => "logo",
            AssetKind::Icon => "icon",
        }
    }

    /// Collection path segment used by the art catalog API
    pub fn path_segment(&self) -> &'static str {
        match self {
            AssetKind::Grid => "grids",
            AssetKind::Hero => "heroes",
            AssetKind::Logo => "logos",
            AssetKind::Icon => "icons",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(AssetKind::Grid),
            "hero" => Ok(AssetKind::Hero),
            "logo" => Ok(AssetKind::Logo),
            "icon" => Ok(AssetKind::Icon),
            other => Err(GameError::InvalidInput(format!(
                "unknown asset type '{}' (expected grid, hero, logo or icon)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: u64,
    pub url: String,
    pub thumb: String,
    pub width: u32,
    pub height: u32,
    pub mime: String,
    pub author: String,
}

/// Kind → candidates in upstream order. Kinds that failed or came back empty are absent.
pub type AssetBundle = BTreeMap<AssetKind, Vec<Asset>>;

/// A logo with the ranking signals used by the best-logo pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoCandidate {
    #[serde(flatten)]
    pub asset: Asset,
    pub style: String,
    pub score: i64,
    pub upvotes: i64,
    pub downvotes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestLogo {
    pub game_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appid: Option<u64>,
    pub logo: LogoCandidate,
}
