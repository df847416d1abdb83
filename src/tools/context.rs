//! Tool execution context - the upstream clients shared by every call

use std::sync::Arc;

use crate::config::{Config, Credentials};
use crate::error::Result;
use crate::upstream::{ArtCatalog, ScreenScraperClient, SteamClient, SteamGridClient, Storefront};

/// Clients available to tools. Cheap to clone.
#[derive(Clone)]
pub struct ToolContext {
    pub steam: Arc<SteamClient>,
    pub grid: Arc<SteamGridClient>,

    /// Present only when ScreenScraper credentials are configured
    pub screenscraper: Option<Arc<ScreenScraperClient>>,

    /// Seams the aggregation tools go through; default to `steam` and `grid`
    storefront: Arc<dyn Storefront>,
    art: Arc<dyn ArtCatalog>,
}

impl ToolContext {
    pub fn new(steam: SteamClient, grid: SteamGridClient, screenscraper: Option<ScreenScraperClient>) -> Self {
        let steam = Arc::new(steam);
        let grid = Arc::new(grid);
        Self {
            storefront: steam.clone(),
            art: grid.clone(),
            steam,
            grid,
            screenscraper: screenscraper.map(Arc::new),
        }
    }

    /// Build every client from the loaded settings and credentials
    pub fn from_config(config: &Config, credentials: &Credentials) -> Result<Self> {
        let steam = SteamClient::new(&config.http, &config.steam, credentials.steam_api_key.clone())?;
        let grid = SteamGridClient::new(&config.http, &config.steamgrid, credentials.steamgrid_api_key.clone())?;
        let screenscraper = match &credentials.screenscraper {
            Some(creds) => Some(ScreenScraperClient::new(&config.http, &config.screenscraper, creds.clone())?),
            None => {
                log::info!("ScreenScraper credentials not set; retro tools disabled");
                None
            }
        };
        Ok(Self::new(steam, grid, screenscraper))
    }

    /// Route the aggregation tools through other catalog implementations
    pub fn with_catalogs(mut self, storefront: Arc<dyn Storefront>, art: Arc<dyn ArtCatalog>) -> Self {
        self.storefront = storefront;
        self.art = art;
        self
    }

    pub fn storefront(&self) -> &dyn Storefront {
        self.storefront.as_ref()
    }

    pub fn art(&self) -> &dyn ArtCatalog {
        self.art.as_ref()
    }

    pub fn has_screenscraper(&self) -> bool {
        self.screenscraper.is_some()
    }
}
