//! Whole-catalog snapshot cache with a fixed time-to-live.
//!
//! The storefront search filters a full app list locally. Fetching that list
//! is expensive, so one snapshot is kept per process and replaced wholesale
//! once it is older than the TTL. Readers clone an `Arc` to the snapshot; the
//! lock is never held across an await, and concurrent refreshes simply race
//! with the last writer winning.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::domain::CatalogEntry;
use crate::error::Result;

/// Producer of the full storefront app list
#[async_trait]
pub trait AppListSource: Send + Sync {
    async fn fetch_app_list(&self) -> Result<Vec<CatalogEntry>>;
}

struct Snapshot {
    fetched_at: Instant,
    apps: Arc<Vec<CatalogEntry>>,
}

/// Single-snapshot cache refreshed on expiry.
pub struct CatalogCache<S> {
    source: S,
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl<S: AppListSource> CatalogCache<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    /// Current snapshot, refreshing it first when missing or expired
    pub async fn get(&self) -> Result<Arc<Vec<CatalogEntry>>> {
        if let Some(apps) = self.fresh() {
            return Ok(apps);
        }

        log::info!("Refreshing storefront catalog snapshot");
        let apps = Arc::new(self.source.fetch_app_list().await?);
        log::info!("Catalog snapshot holds {} apps", apps.len());

        let mut slot = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Snapshot {
            fetched_at: Instant::now(),
            apps: Arc::clone(&apps),
        });
        Ok(apps)
    }

    #[cfg(test)]
    fn source(&self) -> &S {
        &self.source
    }

    fn fresh(&self) -> Option<Arc<Vec<CatalogEntry>>> {
        let slot = self.snapshot.read().unwrap_or_else(|e| e.into_inner());
        slot.as_ref()
            .filter(|s| s.fetched_at.elapsed() < self.ttl)
            .map(|s| Arc::clone(&s.apps))
    }
}

/// Case-insensitive substring match over a snapshot, in catalog order
pub fn filter_catalog(apps: &[CatalogEntry], query: &str, limit: usize) -> Vec<CatalogEntry> {
    let needle = query.trim().to_lowercase();
    apps.iter()
        .filter(|app| app.name.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AppListSource for CountingSource {
        async fn fetch_app_list(&self) -> Result<Vec<CatalogEntry>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GameError::UpstreamUnavailable("app list down".into()));
            }
            Ok(vec![
                CatalogEntry::new(1245620, "ELDEN RING"),
                CatalogEntry::new(400, "Portal"),
                CatalogEntry::new(620, "Portal 2"),
                CatalogEntry::new(9_000_000 + n as u64, "Snapshot marker"),
            ])
        }
    }

    #[tokio::test]
    async fn test_two_gets_within_ttl_fetch_once() {
        let cache = CatalogCache::new(CountingSource::new(), Duration::from_secs(3600));

        let first = cache.get().await.unwrap();
        let second = cache.get().await.unwrap();

        assert_eq!(cache.source().calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_get_after_expiry_refreshes_once() {
        let cache = CatalogCache::new(CountingSource::new(), Duration::from_millis(30));

        cache.get().await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        let refreshed = cache.get().await.unwrap();
        cache.get().await.unwrap();

        assert_eq!(cache.source().calls(), 2);
        assert!(refreshed.iter().any(|a| a.appid == 9_000_001));
    }

    #[tokio::test]
    async fn test_failed_refresh_is_not_cached() {
        let source = CountingSource {
            calls: AtomicUsize::new(0),
            fail: true,
        };
        let cache = CatalogCache::new(source, Duration::from_secs(3600));

        assert!(cache.get().await.is_err());
        assert!(cache.get().await.is_err());
        assert_eq!(cache.source().calls(), 2);
    }

    #[test]
    fn test_filter_catalog_case_insensitive_and_capped() {
        let apps = vec![
            CatalogEntry::new(400, "Portal"),
            CatalogEntry::new(620, "Portal 2"),
            CatalogEntry::new(1, "Half-Life"),
            CatalogEntry::new(2, "Portal Stories: Mel"),
        ];

        let hits = filter_catalog(&apps, "PORTAL", 2);
        assert_eq!(hits, vec![CatalogEntry::new(400, "Portal"), CatalogEntry::new(620, "Portal 2")]);

        assert!(filter_catalog(&apps, "zelda", 10).is_empty());
    }
}
