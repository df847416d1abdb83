//! Query resolution and cross-reference

use crate::domain::{ArtMatch, DetailScope, Resolution};
use crate::error::{GameError, Result};
use crate::upstream::{ArtCatalog, Storefront};

/// Resolve a free-text query to a detail record and its art catalog match.
///
/// The first storefront hit wins. Details are mandatory; the art lookup is
/// best-effort and never fails the resolution.
pub async fn resolve(storefront: &dyn Storefront, art: &dyn ArtCatalog, query: &str) -> Result<Resolution> {
    let query = query.trim();
    if query.is_empty() {
        return Err(GameError::InvalidInput("query must not be empty".to_string()));
    }

    let hit = storefront
        .search(query, 1)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| GameError::NotFound(format!("no storefront match for query '{}'", query)))?;
    log::debug!("Query '{}' resolved to {} ({})", query, hit.appid, hit.name);

    let details = storefront.app_details(hit.appid, DetailScope::Full).await?;
    let art = cross_reference(art, hit.appid).await;

    Ok(Resolution { details, art })
}

/// Look up a storefront id in the art catalog
pub async fn cross_reference(art: &dyn ArtCatalog, appid: u64) -> ArtMatch {
    match art.find_by_steam_id(appid).await {
        Ok(Some(game)) => ArtMatch::Matched(game),
        Ok(None) => {
            log::info!("No art catalog entry for app {}", appid);
            ArtMatch::NoMatch
        }
        Err(e) => {
            log::warn!("Art catalog lookup for app {} failed: {}", appid, e);
            ArtMatch::LookupFailed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CatalogEntry;
    use crate::profile::testing::{MockArt, MockStorefront};

    #[tokio::test]
    async fn test_first_result_wins() {
        let storefront = MockStorefront::new(vec![
            CatalogEntry::new(620, "Portal 2"),
            CatalogEntry::new(400, "Portal"),
        ]);
        let art = MockArt::new().with_game(620, 1234);

        let resolution = resolve(&storefront, &art, "portal").await.unwrap();

        assert_eq!(resolution.details.appid, 620);
        assert_eq!(storefront.detail_calls(), vec![620]);
        assert_eq!(resolution.art.game().map(|g| g.id), Some(1234));
    }

    #[tokio::test]
    async fn test_zero_hits_makes_no_further_calls() {
        let storefront = MockStorefront::new(vec![CatalogEntry::new(400, "Portal")]);
        let art = MockArt::new();

        let err = resolve(&storefront, &art, "zelda").await.unwrap_err();

        assert_eq!(err.to_string(), "Not found: no storefront match for query 'zelda'");
        assert_eq!(storefront.search_calls(), 1);
        assert!(storefront.detail_calls().is_empty());
        assert_eq!(art.lookup_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_query_is_invalid() {
        let storefront = MockStorefront::new(vec![]);
        let err = resolve(&storefront, &MockArt::new(), "   ").await.unwrap_err();
        assert!(matches!(err, GameError::InvalidInput(_)));
        assert_eq!(storefront.search_calls(), 0);
    }

    #[tokio::test]
    async fn test_detail_failure_propagates() {
        let storefront = MockStorefront::new(vec![CatalogEntry::new(400, "Portal")]).failing_details(&[400]);
        let art = MockArt::new();

        let err = resolve(&storefront, &art, "portal").await.unwrap_err();
        assert!(matches!(err, GameError::UpstreamUnavailable(_)));
        assert_eq!(art.lookup_calls(), 0);
    }

    #[tokio::test]
    async fn test_art_lookup_is_best_effort() {
        let storefront = MockStorefront::new(vec![CatalogEntry::new(400, "Portal")]);

        let unmatched = resolve(&storefront, &MockArt::new(), "portal").await.unwrap();
        assert_eq!(unmatched.art, ArtMatch::NoMatch);

        let failing = resolve(&storefront, &MockArt::new().failing_lookup(), "portal").await.unwrap();
        assert!(matches!(failing.art, ArtMatch::LookupFailed(_)));
        assert_eq!(failing.details.appid, 400);
    }
}
