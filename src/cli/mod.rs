pub mod icons;
pub mod tui;

pub use icons::icon_glyph;
pub use tui::TuiApp;
