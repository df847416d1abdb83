//! ScreenScraper client - retro systems, game search and ROM identification
//!
//! Responses are loosely shaped (ids as strings, collections as either arrays
//! or objects keyed by index), so bodies are read as `serde_json::Value` and
//! normalized here.

use reqwest::Client;
use serde_json::Value;

use super::lenient_u64;
use crate::config::{HttpConfig, ScreenScraperConfig, ScreenScraperCredentials};
use crate::domain::{RetroGame, RetroGameInfo, RetroMedia, RetroMediaGroups, RetroSystem, Synopsis, SystemRef};
use crate::error::{GameError, Result};
use crate::http::{build_client, get_json};

const SERVICE: &str = "ScreenScraper";

/// Language used to pick the display name when none is given
pub const DEFAULT_LANGUAGE: &str = "en";

/// Lookup keys for a single-game identification. Any subset may be set.
#[derive(Debug, Clone, Default)]
pub struct GameInfoQuery {
    pub game_id: Option<u64>,
    pub game_name: Option<String>,
    pub system_id: Option<u64>,
    pub crc: Option<String>,
    pub md5: Option<String>,
    pub sha1: Option<String>,
    pub rom_name: Option<String>,
    pub rom_size: Option<u64>,
    pub language: Option<String>,
}

impl GameInfoQuery {
    fn has_criteria(&self) -> bool {
        self.game_id.is_some()
            || self.game_name.is_some()
            || self.crc.is_some()
            || self.md5.is_some()
            || self.sha1.is_some()
            || self.rom_name.is_some()
    }

    /// Query parameters for jeuInfos; a ROM name wins over a game name
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.game_id {
            params.push(("gameid", id.to_string()));
        }
        if let Some(name) = self.rom_name.as_ref().or(self.game_name.as_ref()) {
            params.push(("romnom", name.clone()));
        }
        if let Some(system) = self.system_id {
            params.push(("systemeid", system.to_string()));
        }
        if let Some(crc) = &self.crc {
            params.push(("crc", crc.clone()));
        }
        if let Some(md5) = &self.md5 {
            params.push(("md5", md5.clone()));
        }
        if let Some(sha1) = &self.sha1 {
            params.push(("sha1", sha1.clone()));
        }
        if let Some(size) = self.rom_size {
            params.push(("romtaille", size.to_string()));
        }
        params
    }
}

/// ScreenScraper API client
pub struct ScreenScraperClient {
    client: Client,
    base_url: String,
    credentials: ScreenScraperCredentials,
}

impl ScreenScraperClient {
    pub fn new(
        http: &HttpConfig,
        config: &ScreenScraperConfig,
        credentials: ScreenScraperCredentials,
    ) -> Result<Self> {
        Ok(Self {
            client: build_client(http)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Every system ScreenScraper knows about
    pub async fn systems(&self) -> Result<Vec<RetroSystem>> {
        let body = self.call("systemesListe.php", Vec::new()).await?;
        let systems = body.pointer("/response/systemes").ok_or_else(|| {
            GameError::UpstreamUnavailable("Failed to retrieve systems list from ScreenScraper".into())
        })?;
        Ok(entries(systems).filter_map(parse_system).collect())
    }

    /// Name search, optionally restricted to one system
    pub async fn search(
        &self,
        game_name: &str,
        system_id: Option<u64>,
        language: Option<&str>,
    ) -> Result<Vec<RetroGame>> {
        if game_name.trim().is_empty() {
            return Err(GameError::InvalidInput("gameName must not be empty".to_string()));
        }

        let mut params = vec![("recherche", game_name.trim().to_string())];
        if let Some(system) = system_id {
            params.push(("systemeid", system.to_string()));
        }

        let body = self.call("jeuRecherche.php", params).await?;
        Ok(parse_search(&body, language.unwrap_or(DEFAULT_LANGUAGE)))
    }

    /// Full record for one game, including grouped media
    pub async fn game_info(&self, query: &GameInfoQuery) -> Result<RetroGameInfo> {
        if !query.has_criteria() {
            return Err(GameError::InvalidInput(
                "provide at least one of gameId, gameName, romName, crc, md5 or sha1".to_string(),
            ));
        }

        // unknown games come back as a plain-text 404
        let body = match self.call("jeuInfos.php", query.params()).await {
            Err(e) if e.is_http_not_found() => return Err(game_not_found()),
            other => other?,
        };
        parse_game_info(&body, query.language.as_deref().unwrap_or(DEFAULT_LANGUAGE))
    }

    async fn call(&self, endpoint: &str, extra: Vec<(&'static str, String)>) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut params = auth_params(&self.credentials);
        params.extend(extra);
        log::debug!("ScreenScraper {} with {} params", endpoint, params.len());
        get_json(SERVICE, self.client.get(url).query(&params)).await
    }
}

fn game_not_found() -> GameError {
    GameError::NotFound("Game not found on ScreenScraper".to_string())
}

/// Developer credentials on every call; user credentials only when both halves exist
fn auth_params(credentials: &ScreenScraperCredentials) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("devid", credentials.dev_id.clone()),
        ("devpassword", credentials.dev_password.clone()),
        ("softname", credentials.software_name.clone()),
        ("output", "json".to_string()),
    ];
    if let (Some(user), Some(password)) = (&credentials.user_id, &credentials.user_password) {
        params.push(("ssid", user.clone()));
        params.push(("sspassword", password.clone()));
    }
    params
}

/// Iterate a collection sent either as an array or as an object of entries
fn entries(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::Array(items) => Box::new(items.iter()),
        Value::Object(map) => Box::new(map.values()),
        _ => Box::new(std::iter::empty()),
    }
}

fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

fn parse_system(sys: &Value) -> Option<RetroSystem> {
    let id = lenient_u64(sys.get("id")?)?;
    let name = ["/noms/nom_eu", "/noms/nom_us", "/noms/nom_jp"]
        .iter()
        .find_map(|p| str_at(sys, p))
        .unwrap_or("Unknown");

    Some(RetroSystem {
        id,
        name: name.to_string(),
        shortname: str_at(sys, "/shortname").unwrap_or_default().to_string(),
        manufacturer: str_at(sys, "/compagnie").unwrap_or_default().to_string(),
        release_date: str_at(sys, "/datesortie").unwrap_or_default().to_string(),
        extensions: str_at(sys, "/extensions").unwrap_or_default().to_string(),
    })
}

fn parse_search(body: &Value, language: &str) -> Vec<RetroGame> {
    match body.pointer("/response/jeux") {
        Some(games) => entries(games).filter_map(|g| parse_game(g, language)).collect(),
        None => Vec::new(),
    }
}

fn parse_game_info(body: &Value, language: &str) -> Result<RetroGameInfo> {
    let jeu = body
        .pointer("/response/jeu")
        .filter(|j| j.is_object())
        .ok_or_else(game_not_found)?;
    let game = parse_game(jeu, language).ok_or_else(game_not_found)?;

    Ok(RetroGameInfo {
        game,
        media: jeu.get("medias").map(group_media).unwrap_or_default(),
    })
}

/// Entries without an id (the search endpoint sends `[{}]` for no hits) are skipped
fn parse_game(game: &Value, language: &str) -> Option<RetroGame> {
    let id = lenient_u64(game.get("id")?)?;

    let names: Vec<&Value> = game.get("noms").map(|n| entries(n).collect()).unwrap_or_default();
    let name = names
        .iter()
        .find(|n| n.get("region").and_then(Value::as_str) == Some(language))
        .or_else(|| names.first())
        .and_then(|n| str_at(n, "/text"))
        .unwrap_or("Unknown");

    let system = SystemRef {
        id: game.pointer("/systeme/id").and_then(lenient_u64).unwrap_or(0),
        name: str_at(game, "/systeme/text").unwrap_or("Unknown").to_string(),
    };

    let release_date = game
        .get("dates")
        .and_then(|d| entries(d).next())
        .and_then(|d| str_at(d, "/text"))
        .map(str::to_string);

    let genres: Vec<String> = game
        .get("genres")
        .map(|g| entries(g).filter_map(genre_name).collect())
        .unwrap_or_default();

    let synopsis: Vec<Synopsis> = game
        .get("synopsis")
        .map(|s| {
            entries(s)
                .map(|s| Synopsis {
                    language: str_at(s, "/langue").unwrap_or(DEFAULT_LANGUAGE).to_string(),
                    text: str_at(s, "/text").unwrap_or_default().to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    Some(RetroGame {
        id,
        name: name.to_string(),
        system,
        region: text_field(game, "region"),
        release_date,
        developer: text_field(game, "developpeur"),
        publisher: text_field(game, "editeur"),
        players: text_field(game, "joueurs"),
        rating: game.get("note").and_then(rating),
        genres,
        synopsis,
    })
}

/// A field sent either as a plain string or as `{ "text": ... }`
fn text_field(game: &Value, key: &str) -> Option<String> {
    match game.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        other => str_at(other, "/text").map(str::to_string),
    }
}

fn genre_name(genre: &Value) -> Option<String> {
    if let Some(text) = str_at(genre, "/text") {
        return Some(text.to_string());
    }
    // newer responses nest localized names
    genre
        .get("noms")
        .and_then(|n| entries(n).find_map(|n| str_at(n, "/text")))
        .map(str::to_string)
}

fn rating(note: &Value) -> Option<f64> {
    let raw = match note {
        Value::Object(_) => note.get("text")?,
        other => other,
    };
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn group_media(medias: &Value) -> RetroMediaGroups {
    let all: Vec<RetroMedia> = entries(medias).filter_map(parse_media).collect();
    let of = |kind: &str| -> Vec<RetroMedia> { all.iter().filter(|m| m.media_type == kind).cloned().collect() };

    RetroMediaGroups {
        screenshots: of("ss"),
        covers: of("box-2D"),
        wheels: of("wheel"),
        marquees: of("screenmarquee"),
        videos: of("video"),
        fanarts: of("fanart"),
        boxes: of("box-3D"),
        cartridges: of("support-2D"),
        maps: of("map"),
    }
}

fn parse_media(media: &Value) -> Option<RetroMedia> {
    Some(RetroMedia {
        media_type: str_at(media, "/type")?.to_string(),
        region: str_at(media, "/region").map(str::to_string),
        format: str_at(media, "/format").unwrap_or("unknown").to_string(),
        url: str_at(media, "/url")?.to_string(),
    })
}
