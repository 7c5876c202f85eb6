pub mod catalog;
pub mod round;
pub mod session;
pub mod settings;

pub use catalog::{
    Catalog, Category, CategoryDraft, CategoryError, CustomCategory, MIN_CUSTOM_WORDS,
    SUGGESTED_ICONS, builtin_categories,
};
pub use round::{AssignError, Round, RoundPlayer, assign};
pub use session::{GroupRevealView, RevealState, Screen, Session, SessionError};
pub use settings::{MIN_PLAYERS, Player, RoundSettings, SettingsError};
