//! Best-logo selection

use crate::domain::{BestLogo, LogoCandidate};
use crate::error::{GameError, Result};
use crate::upstream::ArtCatalog;

const OFFICIAL_STYLE: &str = "official";

fn rank(candidate: &LogoCandidate) -> (bool, i64, i64) {
    (candidate.style == OFFICIAL_STYLE, candidate.score, candidate.upvotes)
}

/// Pick the best logo: official style first, then score, then upvotes.
/// Full ties keep upstream order.
pub fn select_best_logo(candidates: Vec<LogoCandidate>, game_id: u64) -> Result<LogoCandidate> {
    candidates
        .into_iter()
        .reduce(|best, candidate| if rank(&candidate) > rank(&best) { candidate } else { best })
        .ok_or_else(|| GameError::NotFound(format!("no logo candidates for id {}", game_id)))
}

/// Best logo for an art catalog id, or for a storefront id cross-referenced first
pub async fn best_logo(art: &dyn ArtCatalog, game_id: Option<u64>, appid: Option<u64>) -> Result<BestLogo> {
    let game_id = match (game_id, appid) {
        (Some(id), _) => id,
        (None, Some(appid)) => art
            .find_by_steam_id(appid)
            .await?
            .map(|game| game.id)
            .ok_or_else(|| GameError::NotFound(format!("no art catalog entry for app {}", appid)))?,
        (None, None) => {
            return Err(GameError::InvalidInput("either gameId or appid is required".to_string()));
        }
    };

    let logo = select_best_logo(art.logos(game_id).await?, game_id)?;
    Ok(BestLogo { game_id, appid, logo })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::testing::{MockArt, logo};

    fn ids(pick: &LogoCandidate) -> u64 {
        pick.asset.id
    }

    #[test]
    fn test_official_beats_higher_score() {
        let pick = select_best_logo(vec![logo(1, "white", 5, 10), logo(2, "official", 1, 0)], 9).unwrap();
        assert_eq!(ids(&pick), 2);
    }

    #[test]
    fn test_score_then_upvotes() {
        let pick = select_best_logo(
            vec![logo(1, "white", 3, 1), logo(2, "white", 3, 7), logo(3, "black", 2, 50)],
            9,
        )
        .unwrap();
        assert_eq!(ids(&pick), 2);
    }

    #[test]
    fn test_full_tie_keeps_upstream_order() {
        let pick = select_best_logo(vec![logo(4, "white", 1, 1), logo(5, "white", 1, 1)], 9).unwrap();
        assert_eq!(ids(&pick), 4);
    }

    #[test]
    fn test_empty_is_not_found() {
        let err = select_best_logo(Vec::new(), 42).unwrap_err();
        assert_eq!(err.to_string(), "Not found: no logo candidates for id 42");
    }

    #[tokio::test]
    async fn test_best_logo_by_appid_cross_references() {
        let art = MockArt::new()
            .with_game(620, 77)
            .with_logos(vec![logo(1, "white", 0, 0), logo(2, "official", 0, 0)]);

        let best = best_logo(&art, None, Some(620)).await.unwrap();
        assert_eq!(best.game_id, 77);
        assert_eq!(best.appid, Some(620));
        assert_eq!(best.logo.asset.id, 2);
    }

    #[tokio::test]
    async fn test_best_logo_requires_an_id() {
        let art = MockArt::new();
        assert!(matches!(best_logo(&art, None, None).await, Err(GameError::InvalidInput(_))));
        assert!(matches!(best_logo(&art, None, Some(1)).await, Err(GameError::NotFound(_))));
    }
}
