use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::game::catalog::{Catalog, CategoryDraft, CategoryError};
use crate::game::round::{AssignError, Round, RoundPlayer, assign};
use crate::game::settings::RoundSettings;
use crate::types::{PlayerId, SessionAction, SessionActionType};

/// The screen currently owning the display. `PlayerCard` carries its own
/// armed/shown flag so the secret is never visible on card entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Setup,
    RosterList,
    PlayerCard { player_id: PlayerId, card_shown: bool },
    GroupReveal,
}

/// Per-round ephemeral reveal bookkeeping. Created fresh with each round,
/// dropped when returning to settings. The revealed set only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealState {
    revealed: HashSet<PlayerId>,
}

impl RevealState {
    pub fn is_revealed(&self, id: PlayerId) -> bool {
        self.revealed.contains(&id)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    fn mark(&mut self, id: PlayerId) {
        self.revealed.insert(id);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Assignment(#[from] AssignError),
    #[error("{action} is not available on the current screen")]
    InvalidTransition { action: SessionActionType },
    #[error("no player with id {0} in this round")]
    UnknownPlayer(PlayerId),
}

/// Read-only data backing the group reveal screen, all derived from the
/// round with no further randomness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRevealView {
    pub imposter_names: Vec<String>,
    pub secret_word: String,
    pub category: String,
}

/// One live game session: settings + catalog in, screens out.
///
/// Every UI event funnels through [`Session::step`]; transitions either
/// succeed or return a typed error, they never panic. At most one round and
/// one reveal state exist at a time.
pub struct Session {
    pub settings: RoundSettings,
    pub catalog: Catalog,
    screen: Screen,
    round: Option<Round>,
    reveal: Option<RevealState>,
    rng: StdRng,
}

impl Session {
    pub fn new(settings: RoundSettings, catalog: Catalog, seed: u64) -> Self {
        let mut session = Self {
            settings,
            catalog,
            screen: Screen::Setup,
            round: None,
            reveal: None,
            rng: StdRng::seed_from_u64(seed),
        };
        // Persisted selections may reference categories deleted since the
        // last run; an empty selection means "all".
        session.settings.reconcile(&session.catalog);
        session
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn reveal(&self) -> Option<&RevealState> {
        self.reveal.as_ref()
    }

    pub fn step(&mut self, action: SessionAction) -> Result<(), SessionError> {
        match (self.screen, action) {
            (Screen::Setup, SessionAction::StartGame) => {
                let round = assign(&self.settings, &self.catalog, &mut self.rng)?;
                self.round = Some(round);
                self.reveal = Some(RevealState::default());
                self.screen = Screen::RosterList;
                Ok(())
            }
            (Screen::RosterList, SessionAction::SelectPlayer(id)) => {
                let round = self.round.as_ref().ok_or(SessionError::UnknownPlayer(id))?;
                if round.player(id).is_none() {
                    return Err(SessionError::UnknownPlayer(id));
                }
                // A card already seen stays closed for the rest of the round.
                if !self.is_seen(id) {
                    self.screen = Screen::PlayerCard { player_id: id, card_shown: false };
                }
                Ok(())
            }
            (Screen::PlayerCard { player_id, .. }, SessionAction::FlipCard) => {
                self.screen = Screen::PlayerCard { player_id, card_shown: true };
                Ok(())
            }
            (Screen::PlayerCard { player_id, .. }, SessionAction::Acknowledge) => {
                if let Some(reveal) = self.reveal.as_mut() {
                    reveal.mark(player_id);
                }
                self.screen = Screen::RosterList;
                Ok(())
            }
            // Allowed whether or not everyone has seen their card.
            (Screen::RosterList, SessionAction::RevealImposters) => {
                self.screen = Screen::GroupReveal;
                Ok(())
            }
            (Screen::GroupReveal, SessionAction::Back) => {
                self.screen = Screen::RosterList;
                Ok(())
            }
            (Screen::GroupReveal, SessionAction::Restart)
            | (Screen::RosterList, SessionAction::EditSettings) => {
                self.round = None;
                self.reveal = None;
                self.screen = Screen::Setup;
                Ok(())
            }
            (_, action) => Err(SessionError::InvalidTransition { action: action.action_type() }),
        }
    }

    pub fn is_seen(&self, id: PlayerId) -> bool {
        self.reveal.as_ref().is_some_and(|r| r.is_revealed(id))
    }

    /// The player whose card is open, if any.
    pub fn active_player(&self) -> Option<&RoundPlayer> {
        match self.screen {
            Screen::PlayerCard { player_id, .. } => self.round.as_ref()?.player(player_id),
            _ => None,
        }
    }

    /// What the open card displays once flipped: the secret word, or the
    /// literal "Imposter" for an imposter. `None` while the card is still
    /// face down.
    pub fn card_word(&self) -> Option<&str> {
        match self.screen {
            Screen::PlayerCard { player_id, card_shown: true } => {
                let round = self.round.as_ref()?;
                let player = round.player(player_id)?;
                if player.is_imposter {
                    Some("Imposter")
                } else {
                    Some(&round.secret_word)
                }
            }
            _ => None,
        }
    }

    pub fn group_reveal(&self) -> Option<GroupRevealView> {
        if self.screen != Screen::GroupReveal {
            return None;
        }
        let round = self.round.as_ref()?;
        Some(GroupRevealView {
            imposter_names: round.imposter_names(),
            secret_word: round.secret_word.clone(),
            category: round.category.clone(),
        })
    }

    // Catalog edits route through the session so the category selection is
    // reconciled in the same breath.

    pub fn add_custom_category(&mut self, draft: &CategoryDraft) -> Result<String, CategoryError> {
        let id = self.catalog.add_custom(draft)?;
        self.settings.reconcile(&self.catalog);
        Ok(id)
    }

    pub fn update_custom_category(
        &mut self,
        id: &str,
        draft: &CategoryDraft,
    ) -> Result<(), CategoryError> {
        self.catalog.update_custom(id, draft)?;
        self.settings.reconcile(&self.catalog);
        Ok(())
    }

    pub fn remove_custom_category(&mut self, id: &str) -> bool {
        let removed = self.catalog.remove_custom(id);
        if removed {
            self.settings.reconcile(&self.catalog);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::settings::Player;

    fn session() -> Session {
        let mut settings = RoundSettings::default();
        settings.players = vec![
            Player::new(1, "Ana"),
            Player::new(2, "Bo"),
            Player::new(3, "Cleo"),
            Player::new(4, "Dev"),
        ];
        Session::new(settings, Catalog::default(), 42)
    }

    fn started() -> Session {
        let mut s = session();
        s.step(SessionAction::StartGame).unwrap();
        s
    }

    #[test]
    fn start_game_creates_round_and_reveal_state() {
        let s = started();
        assert_eq!(s.screen(), Screen::RosterList);
        assert!(s.round().is_some());
        assert_eq!(s.reveal().unwrap().revealed_count(), 0);
    }

    #[test]
    fn rejected_start_leaves_no_reveal_state() {
        let mut s = session();
        s.settings.selected_category_names.clear();
        assert_eq!(
            s.step(SessionAction::StartGame),
            Err(SessionError::Assignment(AssignError::NoEligibleCategory))
        );
        assert_eq!(s.screen(), Screen::Setup);
        assert!(s.round().is_none());
        assert!(s.reveal().is_none());
    }

    #[test]
    fn card_is_face_down_until_flipped() {
        let mut s = started();
        s.step(SessionAction::SelectPlayer(2)).unwrap();
        assert_eq!(s.screen(), Screen::PlayerCard { player_id: 2, card_shown: false });
        assert!(s.card_word().is_none());

        s.step(SessionAction::FlipCard).unwrap();
        let word = s.card_word().unwrap().to_string();
        let round = s.round().unwrap();
        if round.player(2).unwrap().is_imposter {
            assert_eq!(word, "Imposter");
        } else {
            assert_eq!(word, round.secret_word);
        }
    }

    #[test]
    fn acknowledge_marks_seen_and_is_idempotent() {
        let mut s = started();
        s.step(SessionAction::SelectPlayer(1)).unwrap();
        s.step(SessionAction::Acknowledge).unwrap();
        assert_eq!(s.screen(), Screen::RosterList);
        assert!(s.is_seen(1));
        assert_eq!(s.reveal().unwrap().revealed_count(), 1);

        // Re-selecting a seen player is a no-op, not an error.
        s.step(SessionAction::SelectPlayer(1)).unwrap();
        assert_eq!(s.screen(), Screen::RosterList);
        assert_eq!(s.reveal().unwrap().revealed_count(), 1);
    }

    #[test]
    fn select_unknown_player_errors() {
        let mut s = started();
        assert_eq!(
            s.step(SessionAction::SelectPlayer(99)),
            Err(SessionError::UnknownPlayer(99))
        );
    }

    #[test]
    fn group_reveal_needs_no_precondition_and_backs_out() {
        let mut s = started();
        s.step(SessionAction::RevealImposters).unwrap();
        let view = s.group_reveal().unwrap();
        assert_eq!(view.imposter_names.len(), 1);
        assert!(!view.secret_word.is_empty());

        s.step(SessionAction::Back).unwrap();
        assert_eq!(s.screen(), Screen::RosterList);
        assert!(s.group_reveal().is_none());
    }

    #[test]
    fn restart_discards_round_but_keeps_settings() {
        let mut s = started();
        let settings_before = s.settings.clone();
        s.step(SessionAction::SelectPlayer(1)).unwrap();
        s.step(SessionAction::Acknowledge).unwrap();
        s.step(SessionAction::RevealImposters).unwrap();
        s.step(SessionAction::Restart).unwrap();

        assert_eq!(s.screen(), Screen::Setup);
        assert!(s.round().is_none());
        assert!(s.reveal().is_none());
        assert_eq!(s.settings, settings_before);
    }

    #[test]
    fn edit_settings_from_roster_discards_round() {
        let mut s = started();
        s.step(SessionAction::EditSettings).unwrap();
        assert_eq!(s.screen(), Screen::Setup);
        assert!(s.round().is_none());
    }

    #[test]
    fn off_screen_actions_are_rejected() {
        let mut s = session();
        assert_eq!(
            s.step(SessionAction::Acknowledge),
            Err(SessionError::InvalidTransition { action: SessionActionType::Acknowledge })
        );
        let mut s = started();
        assert_eq!(
            s.step(SessionAction::StartGame),
            Err(SessionError::InvalidTransition { action: SessionActionType::StartGame })
        );
    }

    #[test]
    fn removing_selected_custom_reconciles_selection() {
        let mut s = session();
        let id = s
            .add_custom_category(&CategoryDraft {
                name: "Mine".to_string(),
                icon: None,
                words: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            })
            .unwrap();
        s.settings.selected_category_names = ["Mine".to_string()].into_iter().collect();

        assert!(s.remove_custom_category(&id));
        assert!(!s.settings.selected_category_names.contains("Mine"));
        assert!(!s.settings.selected_category_names.is_empty());
    }
}
