/// Terminal glyphs for the symbolic icon identifiers carried by categories.
///
/// The core only stores the identifier string; this table is the host's
/// rendering capability. Unknown identifiers render as nothing.
pub fn icon_glyph(name: &str) -> Option<&'static str> {
    let glyph = match name {
        "Sparkles" => "✦",
        "Star" => "★",
        "Heart" => "♥",
        "Zap" => "⚡",
        "Flame" => "🔥",
        "Crown" => "♛",
        "Diamond" => "◆",
        "Trophy" => "🏆",
        "Target" => "◎",
        "Gamepad2" => "🎮",
        "Music" => "♪",
        "Film" => "🎬",
        "Book" => "📖",
        "Palette" => "🎨",
        "Camera" => "📷",
        "PawPrint" => "🐾",
        "Pizza" => "🍕",
        "BriefcaseBusiness" => "💼",
        "MapPin" => "📍",
        "Lamp" => "💡",
        _ => return None,
    };
    Some(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{SUGGESTED_ICONS, builtin_categories};

    #[test]
    fn every_shipped_icon_identifier_resolves() {
        for name in SUGGESTED_ICONS {
            assert!(icon_glyph(name).is_some(), "missing glyph for {name}");
        }
        for category in builtin_categories() {
            let icon = category.icon.as_deref().unwrap();
            assert!(icon_glyph(icon).is_some(), "missing glyph for {icon}");
        }
    }

    #[test]
    fn unknown_identifier_renders_nothing() {
        assert_eq!(icon_glyph("NotAnIcon"), None);
    }
}
