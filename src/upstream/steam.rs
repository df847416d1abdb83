//! Steam storefront client
//!
//! Covers the store API (app details, reviews, featured charts), the Web API
//! (app list, news, current players), and the SteamSpy genre feed.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::cache::{AppListSource, CatalogCache, filter_catalog};
use super::{Storefront, lenient_i64, lenient_u64};
use crate::config::{HttpConfig, SteamConfig};
use crate::domain::{
    CatalogEntry, DetailRecord, DetailScope, GenreTopGame, NewsItem, Platforms, PriceOverview, ReleaseDate,
    ReviewSummary, TopSeller, canonical_genre,
};
use crate::error::{GameError, Result};
use crate::http::{build_client, get_json};

const SERVICE: &str = "Steam";

const STEAMSPY_SERVICE: &str = "SteamSpy";

/// Reviews requested per summary; snippets are picked from these
const REVIEWS_PER_PAGE: u32 = 20;

/// Maximum review snippets returned in a summary
pub const MAX_REVIEW_SNIPPETS: usize = 5;

/// Snippets shorter than this (after trimming) are treated as empty
pub const MIN_REVIEW_CHARS: usize = 20;

/// Upper bound on news items per request
pub const MAX_NEWS_COUNT: u32 = 20;

/// Characters of body text requested per news item
const NEWS_MAX_LENGTH: u32 = 500;

/// Steam storefront client with a cached whole-catalog snapshot for name search
pub struct SteamClient {
    client: Client,
    config: SteamConfig,
    catalog: CatalogCache<SteamAppList>,
}

impl SteamClient {
    pub fn new(http: &HttpConfig, config: &SteamConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = build_client(http)?;
        let app_list = SteamAppList {
            client: client.clone(),
            api_url: config.api_url.clone(),
            api_key: api_key.into(),
            page_size: config.app_list_page_size,
            max_pages: config.app_list_max_pages,
        };

        Ok(Self {
            client,
            config: config.clone(),
            catalog: CatalogCache::new(app_list, config.cache_ttl()),
        })
    }

    /// Review score descriptor, counts, and a few representative snippets
    pub async fn review_summary(&self, appid: u64) -> Result<ReviewSummary> {
        let url = format!("{}/appreviews/{}", self.config.store_url, appid);
        let per_page = REVIEWS_PER_PAGE.to_string();
        let request = self.client.get(url).query(&[
            ("json", "1"),
            ("language", "all"),
            ("filter", "all"),
            ("purchase_type", "all"),
            ("num_per_page", per_page.as_str()),
        ]);

        let body: ReviewsResponse = get_json(SERVICE, request).await?;
        parse_review_summary(appid, body)
    }

    /// Latest news items for an app, newest first
    pub async fn news(&self, appid: u64, count: u32) -> Result<Vec<NewsItem>> {
        let count = count.clamp(1, MAX_NEWS_COUNT);
        let url = format!("{}/ISteamNews/GetNewsForApp/v2/", self.config.api_url);
        let request = self.client.get(url).query(&[
            ("appid", appid.to_string()),
            ("count", count.to_string()),
            ("maxlength", NEWS_MAX_LENGTH.to_string()),
        ]);

        let body: NewsResponse = get_json(SERVICE, request).await?;
        Ok(parse_news(body))
    }

    /// Number of players currently in-game
    pub async fn player_count(&self, appid: u64) -> Result<u64> {
        let url = format!("{}/ISteamUserStats/GetNumberOfCurrentPlayers/v1/", self.config.api_url);
        let request = self.client.get(url).query(&[("appid", appid.to_string())]);

        let body: PlayerCountResponse = get_json(SERVICE, request).await?;
        parse_player_count(appid, body)
    }

    /// Global top sellers from the store's featured categories
    pub async fn top_sellers(&self, limit: usize) -> Result<Vec<TopSeller>> {
        let url = format!("{}/api/featuredcategories/", self.config.store_url);
        let body: FeaturedCategories = get_json(SERVICE, self.client.get(url)).await?;
        Ok(parse_top_sellers(body, limit))
    }

    /// Most played games of one curated genre
    pub async fn top_by_genre(&self, genre: &str, limit: usize) -> Result<Vec<GenreTopGame>> {
        let genre = canonical_genre(genre).ok_or_else(|| {
            GameError::InvalidInput(format!(
                "unknown genre '{}'; use steam_list_genres for the supported names",
                genre
            ))
        })?;

        let request = self
            .client
            .get(self.config.steamspy_url.as_str())
            .query(&[("request", "genre"), ("genre", genre)]);

        let body: Value = get_json(STEAMSPY_SERVICE, request).await?;
        parse_genre_feed(&body, limit)
    }
}

#[async_trait]
impl Storefront for SteamClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CatalogEntry>> {
        if query.trim().is_empty() {
            return Err(GameError::InvalidInput("query must not be empty".to_string()));
        }
        let apps = self.catalog.get().await?;
        Ok(filter_catalog(&apps, query, limit))
    }

    async fn app_details(&self, appid: u64, scope: DetailScope) -> Result<DetailRecord> {
        let url = format!("{}/api/appdetails", self.config.store_url);
        let mut params = vec![("appids", appid.to_string())];
        if scope == DetailScope::Basic {
            params.push(("filters", "basic".to_string()));
        }

        let body: HashMap<String, AppDetailsEnvelope> = get_json(SERVICE, self.client.get(url).query(&params)).await?;
        parse_app_details(appid, body)
    }
}

/// Pages through `IStoreService/GetAppList` to build the catalog snapshot
struct SteamAppList {
    client: Client,
    api_url: String,
    api_key: String,
    page_size: u32,
    max_pages: u32,
}

#[async_trait]
impl AppListSource for SteamAppList {
    async fn fetch_app_list(&self) -> Result<Vec<CatalogEntry>> {
        let url = format!("{}/IStoreService/GetAppList/v1/", self.api_url);
        let mut apps = Vec::new();
        let mut last_appid: Option<u64> = None;

        for page in 0..self.max_pages.max(1) {
            let mut params = vec![
                ("key", self.api_key.clone()),
                ("max_results", self.page_size.to_string()),
                ("include_games", "true".to_string()),
            ];
            if let Some(last) = last_appid {
                params.push(("last_appid", last.to_string()));
            }

            let body: AppListResponse = get_json(SERVICE, self.client.get(url.as_str()).query(&params)).await?;
            let page_len = body.response.apps.len();
            apps.extend(body.response.apps);
            log::debug!("App list page {} returned {} apps", page, page_len);

            match (body.response.have_more_results, body.response.last_appid) {
                (true, Some(last)) => last_appid = Some(last),
                _ => return Ok(apps),
            }
        }

        log::warn!("App list truncated after {} pages", self.max_pages);
        Ok(apps)
    }
}

#[derive(Debug, Deserialize)]
struct AppListResponse {
    #[serde(default)]
    response: AppListPage,
}

#[derive(Debug, Default, Deserialize)]
struct AppListPage {
    #[serde(default)]
    apps: Vec<CatalogEntry>,
    #[serde(default)]
    have_more_results: bool,
    last_appid: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct AppDetailsEnvelope {
    success: bool,
    data: Option<AppData>,
}

#[derive(Debug, Deserialize)]
struct Described {
    description: String,
}

#[derive(Debug, Deserialize)]
struct AppData {
    steam_appid: u64,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    app_type: String,
    #[serde(default)]
    is_free: bool,
    #[serde(default)]
    short_description: String,
    #[serde(default)]
    detailed_description: String,
    #[serde(default)]
    about_the_game: String,
    #[serde(default)]
    supported_languages: String,
    #[serde(default)]
    header_image: String,
    #[serde(default)]
    capsule_image: String,
    website: Option<String>,
    developers: Option<Vec<String>>,
    publishers: Option<Vec<String>>,
    price_overview: Option<PriceOverview>,
    platforms: Option<Platforms>,
    categories: Option<Vec<Described>>,
    genres: Option<Vec<Described>>,
    release_date: Option<ReleaseDate>,
    #[serde(default)]
    dlc: Vec<u64>,
}

fn parse_app_details(appid: u64, mut body: HashMap<String, AppDetailsEnvelope>) -> Result<DetailRecord> {
    let unavailable = || GameError::UpstreamUnavailable(format!("Game with App ID {} not found or unavailable", appid));

    let envelope = body.remove(&appid.to_string()).ok_or_else(unavailable)?;
    let data = match envelope {
        AppDetailsEnvelope {
            success: true,
            data: Some(data),
        } => data,
        _ => return Err(unavailable()),
    };

    let descriptions = |items: Option<Vec<Described>>| {
        items
            .unwrap_or_default()
            .into_iter()
            .map(|d| d.description)
            .collect::<Vec<_>>()
    };

    Ok(DetailRecord {
        appid: data.steam_appid,
        name: data.name,
        app_type: data.app_type,
        description: data.short_description,
        detailed_description: data.detailed_description,
        about: data.about_the_game,
        header_image: data.header_image,
        capsule_image: data.capsule_image,
        website: data.website.filter(|w| !w.is_empty()),
        developers: data.developers.unwrap_or_default(),
        publishers: data.publishers.unwrap_or_default(),
        price: data.price_overview,
        platforms: data.platforms,
        categories: descriptions(data.categories),
        genres: descriptions(data.genres),
        release_date: data.release_date,
        is_free: data.is_free,
        supported_languages: data.supported_languages,
        dlc: data.dlc,
    })
}

#[derive(Debug, Deserialize)]
struct ReviewsResponse {
    #[serde(default)]
    success: i64,
    #[serde(default)]
    query_summary: QuerySummary,
    #[serde(default)]
    reviews: Vec<ReviewBody>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuerySummary {
    review_score_desc: String,
    total_positive: u64,
    total_negative: u64,
    total_reviews: u64,
}

#[derive(Debug, Deserialize)]
struct ReviewBody {
    #[serde(default)]
    review: String,
}

/// Share of positive reviews, rounded to the nearest percent; zero when there are no reviews
pub fn percentage_score(total_positive: u64, total_reviews: u64) -> u64 {
    if total_reviews == 0 {
        return 0;
    }
    (total_positive * 100 + total_reviews / 2) / total_reviews
}

fn parse_review_summary(appid: u64, body: ReviewsResponse) -> Result<ReviewSummary> {
    if body.success != 1 {
        return Err(GameError::UpstreamUnavailable(format!(
            "reviews unavailable for App ID {}",
            appid
        )));
    }

    let summary = body.query_summary;
    let top_reviews = body
        .reviews
        .into_iter()
        .map(|r| r.review.trim().to_string())
        .filter(|text| text.chars().count() >= MIN_REVIEW_CHARS)
        .take(MAX_REVIEW_SNIPPETS)
        .collect();

    Ok(ReviewSummary {
        appid,
        review_score_desc: summary.review_score_desc,
        total_positive: summary.total_positive,
        total_negative: summary.total_negative,
        total_reviews: summary.total_reviews,
        percentage_score: percentage_score(summary.total_positive, summary.total_reviews),
        top_reviews,
    })
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    appnews: AppNews,
}

#[derive(Debug, Deserialize)]
struct AppNews {
    #[serde(default)]
    newsitems: Vec<RawNewsItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawNewsItem {
    gid: String,
    title: String,
    url: String,
    author: String,
    contents: String,
    feedlabel: String,
    feedname: String,
    date: i64,
}

/// Epoch seconds to an RFC 3339 UTC timestamp
pub fn epoch_to_iso8601(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

fn parse_news(body: NewsResponse) -> Vec<NewsItem> {
    body.appnews
        .newsitems
        .into_iter()
        .map(|item| NewsItem {
            id: item.gid,
            title: item.title,
            url: item.url,
            author: item.author,
            contents: item.contents,
            date: epoch_to_iso8601(item.date),
            feed_label: item.feedlabel,
            feed_name: item.feedname,
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct PlayerCountResponse {
    response: PlayerCount,
}

#[derive(Debug, Deserialize)]
struct PlayerCount {
    #[serde(default)]
    player_count: u64,
    result: i64,
}

fn parse_player_count(appid: u64, body: PlayerCountResponse) -> Result<u64> {
    if body.response.result != 1 {
        return Err(GameError::UpstreamUnavailable(format!(
            "player count unavailable for App ID {} (result code {})",
            appid, body.response.result
        )));
    }
    Ok(body.response.player_count)
}

#[derive(Debug, Deserialize)]
struct FeaturedCategories {
    top_sellers: Option<FeaturedSection>,
}

#[derive(Debug, Deserialize)]
struct FeaturedSection {
    #[serde(default)]
    items: Vec<FeaturedItem>,
}

#[derive(Debug, Deserialize)]
struct FeaturedItem {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    final_price: i64,
    original_price: Option<i64>,
    #[serde(default)]
    discount_percent: i64,
    #[serde(default)]
    currency: String,
    header_image: Option<String>,
}

fn parse_top_sellers(body: FeaturedCategories, limit: usize) -> Vec<TopSeller> {
    body.top_sellers
        .map(|section| section.items)
        .unwrap_or_default()
        .into_iter()
        .take(limit)
        .map(|item| TopSeller {
            appid: item.id,
            name: item.name,
            final_price: item.final_price,
            original_price: item.original_price,
            discount_percent: item.discount_percent,
            currency: item.currency,
            header_image: item.header_image,
        })
        .collect()
}

fn parse_genre_feed(body: &Value, limit: usize) -> Result<Vec<GenreTopGame>> {
    let entries = body.as_object().ok_or_else(|| {
        GameError::UpstreamUnavailable(format!("{} genre feed was not an object", STEAMSPY_SERVICE))
    })?;

    let mut games: Vec<GenreTopGame> = entries
        .values()
        .filter_map(|entry| {
            Some(GenreTopGame {
                appid: lenient_u64(&entry["appid"])?,
                name: entry["name"].as_str().unwrap_or_default().to_string(),
                price: lenient_i64(&entry["price"]).unwrap_or(0),
                initial_price: lenient_i64(&entry["initialprice"]).unwrap_or(0),
                discount_percent: lenient_i64(&entry["discount"]).unwrap_or(0),
                ccu: lenient_u64(&entry["ccu"]).unwrap_or(0),
            })
        })
        .collect();

    games.sort_by(|a, b| b.ccu.cmp(&a.ccu).then(a.appid.cmp(&b.appid)));
    games.truncate(limit);
    Ok(games)
}
