use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Roster-local player identifier. Unique within one roster, reused across rounds.
pub type PlayerId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionActionType {
    StartGame,
    SelectPlayer,
    FlipCard,
    Acknowledge,
    RevealImposters,
    Back,
    EditSettings,
    Restart,
}

/// A discrete user action driving the session state machine. Every screen
/// transition in the app is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionAction {
    StartGame,
    SelectPlayer(PlayerId),
    FlipCard,
    Acknowledge,
    RevealImposters,
    Back,
    EditSettings,
    Restart,
}

impl SessionAction {
    pub fn action_type(&self) -> SessionActionType {
        match self {
            SessionAction::StartGame => SessionActionType::StartGame,
            SessionAction::SelectPlayer(_) => SessionActionType::SelectPlayer,
            SessionAction::FlipCard => SessionActionType::FlipCard,
            SessionAction::Acknowledge => SessionActionType::Acknowledge,
            SessionAction::RevealImposters => SessionActionType::RevealImposters,
            SessionAction::Back => SessionActionType::Back,
            SessionAction::EditSettings => SessionActionType::EditSettings,
            SessionAction::Restart => SessionActionType::Restart,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Haptic {
    Light,
    Medium,
    Heavy,
    Selection,
    Success,
    Warning,
    Error,
}

impl Haptic {
    pub const ALL: [Haptic; 7] = [
        Haptic::Light,
        Haptic::Medium,
        Haptic::Heavy,
        Haptic::Selection,
        Haptic::Success,
        Haptic::Warning,
        Haptic::Error,
    ];
}
