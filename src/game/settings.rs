use std::collections::BTreeSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::game::catalog::Catalog;
use crate::types::PlayerId;

pub const MIN_PLAYERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("player {index} needs a name")]
    EmptyPlayerName { index: usize },
    #[error("player name {0:?} is used more than once")]
    DuplicatePlayerName(String),
    #[error("at least {MIN_PLAYERS} players are required")]
    NotEnoughPlayers,
    #[error("select at least one category")]
    NoCategoriesSelected,
}

/// Durable per-device configuration: roster, imposter count and the set of
/// categories eligible for the next round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSettings {
    pub players: Vec<Player>,
    pub imposter_count: u32,
    pub selected_category_names: BTreeSet<String>,
}

impl Default for RoundSettings {
    fn default() -> Self {
        let players = (1..=4)
            .map(|n| Player::new(n, format!("Player {n}")))
            .collect();
        Self {
            players,
            imposter_count: 1,
            selected_category_names: BTreeSet::new(),
        }
    }
}

impl RoundSettings {
    pub fn max_imposters(&self) -> u32 {
        (self.players.len().saturating_sub(1)).max(1) as u32
    }

    /// Validates a roster the way the editor does before saving: every name
    /// non-empty after trimming, no duplicates. Roster size is checked at
    /// start-game time, not here.
    pub fn validate_roster(players: &[Player]) -> Result<(), SettingsError> {
        for (index, player) in players.iter().enumerate() {
            if player.name.trim().is_empty() {
                return Err(SettingsError::EmptyPlayerName { index });
            }
        }
        if let Some(name) = players
            .iter()
            .map(|p| p.name.trim())
            .duplicates()
            .next()
        {
            return Err(SettingsError::DuplicatePlayerName(name.to_string()));
        }
        Ok(())
    }

    /// Replaces the roster after validation and re-clamps the imposter count
    /// against the new size.
    pub fn apply_roster(&mut self, players: Vec<Player>) -> Result<(), SettingsError> {
        Self::validate_roster(&players)?;
        self.players = players
            .into_iter()
            .map(|p| Player::new(p.id, p.name.trim().to_string()))
            .collect();
        self.imposter_count = self.clamped(self.imposter_count);
        Ok(())
    }

    pub fn set_imposter_count(&mut self, count: u32) {
        self.imposter_count = self.clamped(count);
    }

    /// Replaces the category selection. An empty selection means "all
    /// available", matching the selection dialog's save behavior.
    pub fn set_selected_categories(&mut self, names: BTreeSet<String>, catalog: &Catalog) {
        self.selected_category_names = if names.is_empty() {
            catalog.names().into_iter().collect()
        } else {
            names
        };
    }

    /// Drops selected names that no longer resolve against the catalog
    /// (deleted customs); an emptied selection resets to all available.
    pub fn reconcile(&mut self, catalog: &Catalog) {
        self.selected_category_names
            .retain(|name| catalog.contains_name(name));
        if self.selected_category_names.is_empty() {
            self.selected_category_names = catalog.names().into_iter().collect();
        }
    }

    /// Blocking check run by Start Game.
    pub fn validate_for_start(&self) -> Result<(), SettingsError> {
        if self.players.len() < MIN_PLAYERS {
            return Err(SettingsError::NotEnoughPlayers);
        }
        if self.selected_category_names.is_empty() {
            return Err(SettingsError::NoCategoriesSelected);
        }
        Ok(())
    }

    pub fn next_player_id(&self) -> PlayerId {
        self.players.iter().map(|p| p.id).max().map_or(1, |id| id + 1)
    }

    fn clamped(&self, count: u32) -> u32 {
        count.clamp(1, self.max_imposters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<Player> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(i as PlayerId + 1, *name))
            .collect()
    }

    #[test]
    fn default_settings() {
        let settings = RoundSettings::default();
        assert_eq!(settings.players.len(), 4);
        assert_eq!(settings.players[0].name, "Player 1");
        assert_eq!(settings.imposter_count, 1);
    }

    #[test]
    fn roster_validation_blocks_blank_and_duplicate_names() {
        assert_eq!(
            RoundSettings::validate_roster(&roster(&["Ana", "  "])),
            Err(SettingsError::EmptyPlayerName { index: 1 })
        );
        assert_eq!(
            RoundSettings::validate_roster(&roster(&["Ana", "Bo", "Ana"])),
            Err(SettingsError::DuplicatePlayerName("Ana".to_string()))
        );
        assert!(RoundSettings::validate_roster(&roster(&["Ana", "Bo"])).is_ok());
    }

    #[test]
    fn shrinking_roster_reclamps_imposter_count() {
        let mut settings = RoundSettings::default();
        settings.apply_roster(roster(&["A", "B", "C", "D", "E"])).unwrap();
        settings.set_imposter_count(4);
        assert_eq!(settings.imposter_count, 4);

        settings.apply_roster(roster(&["A", "B", "C"])).unwrap();
        assert_eq!(settings.imposter_count, 2);
    }

    #[test]
    fn imposter_count_clamps_to_bounds() {
        let mut settings = RoundSettings::default();
        settings.set_imposter_count(0);
        assert_eq!(settings.imposter_count, 1);
        settings.set_imposter_count(99);
        assert_eq!(settings.imposter_count, 3);
    }

    #[test]
    fn empty_selection_resets_to_all() {
        let catalog = Catalog::default();
        let mut settings = RoundSettings::default();
        settings.set_selected_categories(BTreeSet::new(), &catalog);
        assert_eq!(
            settings.selected_category_names.len(),
            catalog.names().len()
        );
    }

    #[test]
    fn reconcile_drops_deleted_custom_names() {
        use crate::game::catalog::CategoryDraft;

        let mut catalog = Catalog::default();
        let id = catalog
            .add_custom(&CategoryDraft {
                name: "Mine".to_string(),
                icon: None,
                words: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            })
            .unwrap();

        let mut settings = RoundSettings::default();
        settings.set_selected_categories(
            ["Mine".to_string(), "Animals".to_string()].into_iter().collect(),
            &catalog,
        );

        catalog.remove_custom(&id);
        settings.reconcile(&catalog);
        assert_eq!(
            settings.selected_category_names,
            ["Animals".to_string()].into_iter().collect()
        );
    }

    #[test]
    fn reconcile_with_everything_deleted_selects_all() {
        let catalog = Catalog::default();
        let mut settings = RoundSettings::default();
        // Stale reference left behind by a deleted custom category.
        settings.selected_category_names = ["Ghost".to_string()].into_iter().collect();

        settings.reconcile(&catalog);
        assert_eq!(
            settings.selected_category_names.len(),
            catalog.names().len()
        );
    }
}
