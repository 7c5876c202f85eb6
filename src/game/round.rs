use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::catalog::{Catalog, Category};
use crate::game::settings::{MIN_PLAYERS, RoundSettings};
use crate::types::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPlayer {
    pub id: PlayerId,
    pub name: String,
    pub is_imposter: bool,
}

/// The immutable result of one assignment. Discarded entirely on restart.
///
/// Every player, imposters included, carries the same secret word through
/// `Round`; withholding it from an imposter's card is the presentation
/// layer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: Uuid,
    pub category: String,
    pub secret_word: String,
    pub players: Vec<RoundPlayer>,
}

impl Round {
    pub fn player(&self, id: PlayerId) -> Option<&RoundPlayer> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn imposters(&self) -> impl Iterator<Item = &RoundPlayer> {
        self.players.iter().filter(|p| p.is_imposter)
    }

    pub fn imposter_names(&self) -> Vec<String> {
        self.imposters().map(|p| p.name.clone()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AssignError {
    #[error("no selected category is available")]
    NoEligibleCategory,
    #[error("at least {MIN_PLAYERS} players are required")]
    NotEnoughPlayers,
}

/// Builds one round from the current settings and catalog.
///
/// Pure apart from the injected `rng`: one uniform category pick, one
/// uniform word pick, one Fisher-Yates shuffle of player ids to choose the
/// imposter set. Selected names missing from the catalog are ignored; an
/// imposter count at or above the roster size is clamped so at least one
/// non-imposter remains.
pub fn assign<R: Rng>(
    settings: &RoundSettings,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Round, AssignError> {
    if settings.players.len() < MIN_PLAYERS {
        return Err(AssignError::NotEnoughPlayers);
    }

    let eligible: Vec<Category> = catalog
        .all()
        .into_iter()
        .filter(|c| settings.selected_category_names.contains(&c.name) && !c.words.is_empty())
        .collect();
    let category = eligible.choose(rng).ok_or(AssignError::NoEligibleCategory)?;
    let secret_word = category
        .words
        .choose(rng)
        .ok_or(AssignError::NoEligibleCategory)?
        .clone();

    let mut shuffled_ids: Vec<PlayerId> = settings.players.iter().map(|p| p.id).collect();
    shuffled_ids.shuffle(rng);
    let imposter_count = (settings.imposter_count as usize).min(settings.players.len() - 1);
    let imposter_ids = &shuffled_ids[..imposter_count];

    let players = settings
        .players
        .iter()
        .map(|p| RoundPlayer {
            id: p.id,
            name: p.name.clone(),
            is_imposter: imposter_ids.contains(&p.id),
        })
        .collect();

    Ok(Round {
        id: Uuid::new_v4(),
        category: category.name.clone(),
        secret_word,
        players,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::game::catalog::builtin_categories;
    use crate::game::settings::Player;

    fn settings(n: usize, imposters: u32, selected: &[&str]) -> RoundSettings {
        RoundSettings {
            players: (1..=n as u32)
                .map(|id| Player::new(id, format!("P{id}")))
                .collect(),
            imposter_count: imposters,
            selected_category_names: selected.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn imposter_counts_match_settings() {
        let catalog = Catalog::default();
        let mut rng = StdRng::seed_from_u64(7);
        for n in 2..=8usize {
            for k in 1..n as u32 {
                let round = assign(&settings(n, k, &["Animals"]), &catalog, &mut rng).unwrap();
                assert_eq!(round.players.len(), n);
                assert_eq!(round.imposters().count(), k as usize);
            }
        }
    }

    #[test]
    fn oversized_imposter_count_leaves_one_non_imposter() {
        let catalog = Catalog::default();
        let mut rng = StdRng::seed_from_u64(7);
        let round = assign(&settings(4, 9, &["Animals"]), &catalog, &mut rng).unwrap();
        assert_eq!(round.imposters().count(), 3);
    }

    #[test]
    fn everyone_shares_word_and_category() {
        let catalog = Catalog::default();
        let mut rng = StdRng::seed_from_u64(11);
        let round = assign(&settings(4, 1, &["Animals"]), &catalog, &mut rng).unwrap();

        assert_eq!(round.category, "Animals");
        let animals = builtin_categories()
            .iter()
            .find(|c| c.name == "Animals")
            .unwrap();
        assert!(animals.words.contains(&round.secret_word));
        // The imposter's entry carries the word too; hiding it is UI work.
        for player in &round.players {
            assert_eq!(round.player(player.id).unwrap().name, player.name);
        }
        assert_eq!(round.imposters().count(), 1);
    }

    #[test]
    fn rejects_without_eligible_category() {
        let catalog = Catalog::default();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            assign(&settings(4, 1, &[]), &catalog, &mut rng),
            Err(AssignError::NoEligibleCategory)
        );
        // Stale names left over from a deleted custom are ignored, and with
        // nothing else selected the round is rejected.
        assert_eq!(
            assign(&settings(4, 1, &["Deleted Custom"]), &catalog, &mut rng),
            Err(AssignError::NoEligibleCategory)
        );
    }

    #[test]
    fn rejects_undersized_roster() {
        let catalog = Catalog::default();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            assign(&settings(1, 1, &["Animals"]), &catalog, &mut rng),
            Err(AssignError::NotEnoughPlayers)
        );
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let catalog = Catalog::default();
        let config = settings(5, 2, &["Animals", "Food", "Places"]);

        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        let first = assign(&config, &catalog, &mut a).unwrap();
        let second = assign(&config, &catalog, &mut b).unwrap();

        assert_eq!(first.category, second.category);
        assert_eq!(first.secret_word, second.secret_word);
        let flags = |r: &Round| r.players.iter().map(|p| p.is_imposter).collect::<Vec<_>>();
        assert_eq!(flags(&first), flags(&second));
    }
}
