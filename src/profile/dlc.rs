//! Bounded DLC enumeration

use futures::future::join_all;

use crate::domain::{DetailScope, DlcEntry, DlcList};
use crate::error::Result;
use crate::upstream::Storefront;

/// Most DLC names resolved per request
pub const MAX_DLC_LOOKUPS: usize = 10;

/// List an app's DLC, resolving names for the first `MAX_DLC_LOOKUPS` ids.
///
/// Lookups run concurrently; a failed id is dropped and the counts say how
/// much was left out.
pub async fn enumerate_dlc(storefront: &dyn Storefront, appid: u64) -> Result<DlcList> {
    let primary = storefront.app_details(appid, DetailScope::Basic).await?;
    let total = primary.dlc.len();

    let lookups = primary
        .dlc
        .iter()
        .take(MAX_DLC_LOOKUPS)
        .map(|&id| async move { (id, storefront.app_details(id, DetailScope::Basic).await) });

    let mut dlc = Vec::new();
    for (id, outcome) in join_all(lookups).await {
        match outcome {
            Ok(record) => dlc.push(DlcEntry {
                appid: id,
                name: record.name,
            }),
            Err(e) => log::warn!("Skipping DLC {} of app {}: {}", id, appid, e),
        }
    }

    Ok(DlcList {
        appid,
        name: primary.name,
        total_dlc_count: total,
        retrieved_count: dlc.len(),
        remaining_count: total.saturating_sub(MAX_DLC_LOOKUPS),
        dlc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::testing::MockStorefront;

    #[tokio::test]
    async fn test_fifteen_ids_two_failures() {
        let dlc_ids: Vec<u64> = (1001..=1015).collect();
        let storefront = MockStorefront::new(vec![])
            .with_dlc(500, dlc_ids)
            .failing_details(&[1003, 1007]);

        let list = enumerate_dlc(&storefront, 500).await.unwrap();

        // primary lookup plus exactly ten DLC lookups
        let calls = storefront.detail_calls();
        assert_eq!(calls.len(), 11);
        assert!(!calls.contains(&1011));

        assert_eq!(list.total_dlc_count, 15);
        assert_eq!(list.retrieved_count, 8);
        assert_eq!(list.remaining_count, 5);
        assert_eq!(list.dlc.len(), 8);
        assert_eq!(list.dlc[0].appid, 1001);
        assert_eq!(list.dlc[2].appid, 1004);
    }

    #[tokio::test]
    async fn test_no_dlc() {
        let storefront = MockStorefront::new(vec![]).with_dlc(500, vec![]);

        let list = enumerate_dlc(&storefront, 500).await.unwrap();

        assert_eq!(list.total_dlc_count, 0);
        assert_eq!(list.retrieved_count, 0);
        assert_eq!(list.remaining_count, 0);
        assert_eq!(storefront.detail_calls(), vec![500]);
    }

    #[tokio::test]
    async fn test_primary_failure_propagates() {
        let storefront = MockStorefront::new(vec![]).failing_details(&[500]);
        assert!(enumerate_dlc(&storefront, 500).await.is_err());
    }
}
