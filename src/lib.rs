#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod cli;
pub mod game;
pub mod haptics;
pub mod storage;
pub mod types;

pub use game::{AssignError, Catalog, Category, Round, RoundSettings, Screen, Session};
pub use storage::{JsonFileStore, KvStore, MemoryStore, SettingsRepo};
pub use types::{Haptic, PlayerId, SessionAction};
