//! Concurrent per-kind asset fetch

use futures::future::join_all;

use crate::domain::{AssetBundle, AssetKind};
use crate::upstream::ArtCatalog;

/// Fetch every requested kind concurrently and keep the ones that succeeded.
///
/// Duplicate kinds are collapsed. A kind that fails or comes back empty is
/// logged and left out of the bundle; the bundle itself never fails.
pub async fn fetch_asset_bundle(art: &dyn ArtCatalog, game_id: u64, kinds: &[AssetKind]) -> AssetBundle {
    let mut requested: Vec<AssetKind> = kinds.to_vec();
    requested.sort();
    requested.dedup();

    let fetches = requested.iter().map(|&kind| async move { (kind, art.assets(game_id, kind).await) });

    let mut bundle = AssetBundle::new();
    for (kind, outcome) in join_all(fetches).await {
        match outcome {
            Ok(assets) if !assets.is_empty() => {
                bundle.insert(kind, assets);
            }
            Ok(_) => log::debug!("No {} assets for game {}", kind, game_id),
            Err(e) => log::warn!("Fetching {} assets for game {} failed: {}", kind, game_id, e),
        }
    }
    bundle
}
