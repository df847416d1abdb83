//! Retro metadata catalog (ScreenScraper) types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetroSystem {
    pub id: u64,
    pub name: String,
    pub shortname: String,
    pub manufacturer: String,
    pub release_date: String,
    pub extensions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synopsis {
    pub language: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetroGame {
    pub id: u64,
    pub name: String,
    pub system: SystemRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub genres: Vec<String>,
    pub synopsis: Vec<Synopsis>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetroMedia {
    #[serde(rename = "type")]
    pub media_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub format: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetroMediaGroups {
    pub screenshots: Vec<RetroMedia>,
    pub covers: Vec<RetroMedia>,
    pub wheels: Vec<RetroMedia>,
    pub marquees: Vec<RetroMedia>,
    pub videos: Vec<RetroMedia>,
    pub fanarts: Vec<RetroMedia>,
    pub boxes: Vec<RetroMedia>,
    pub cartridges: Vec<RetroMedia>,
    pub maps: Vec<RetroMedia>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetroGameInfo {
    #[serde(flatten)]
    pub game: RetroGame,
    pub media: RetroMediaGroups,
}
