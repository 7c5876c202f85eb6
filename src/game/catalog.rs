use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum word count for a saveable custom category.
pub const MIN_CUSTOM_WORDS: usize = 3;

/// Icon identifiers offered by the category editor. Opaque to the core;
/// the UI maps them to glyphs.
pub const SUGGESTED_ICONS: [&str; 15] = [
    "Sparkles", "Star", "Heart", "Zap", "Flame", "Crown", "Diamond", "Trophy", "Target",
    "Gamepad2", "Music", "Film", "Book", "Palette", "Camera",
];

/// One word category as the assignment engine sees it, built-in or custom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub icon: Option<String>,
    pub words: Vec<String>,
    pub is_custom: bool,
}

/// Persisted shape of a user-owned category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCategory {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub words: Vec<String>,
}

impl CustomCategory {
    pub fn as_category(&self) -> Category {
        Category {
            name: self.name.clone(),
            icon: self.icon.clone(),
            words: self.words.clone(),
            is_custom: true,
        }
    }
}

/// Unsaved editor state for a custom category.
#[derive(Debug, Clone, Default)]
pub struct CategoryDraft {
    pub name: String,
    pub icon: Option<String>,
    pub words: Vec<String>,
}

impl CategoryDraft {
    /// Trimmed words with blanks and repeats dropped, order preserved.
    pub fn normalized_words(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for word in &self.words {
            let trimmed = word.trim();
            if !trimmed.is_empty() && !out.iter().any(|w| w == trimmed) {
                out.push(trimmed.to_string());
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryError {
    #[error("category name is required")]
    EmptyName,
    #[error("a category named {0:?} already exists")]
    DuplicateName(String),
    #[error("add at least {MIN_CUSTOM_WORDS} words (have {have})")]
    NotEnoughWords { have: usize },
    #[error("no custom category with id {0:?}")]
    UnknownId(String),
}

static BUILTIN: Lazy<Vec<Category>> = Lazy::new(|| {
    let builtin = |name: &str, icon: &str, words: &[&str]| Category {
        name: name.to_string(),
        icon: Some(icon.to_string()),
        words: words.iter().map(|w| w.to_string()).collect(),
        is_custom: false,
    };
    vec![
        builtin(
            "Animals",
            "PawPrint",
            &[
                "Elephant", "Tiger", "Penguin", "Kangaroo", "Octopus", "Giraffe", "Dolphin",
                "Hedgehog", "Flamingo", "Crocodile", "Panda", "Eagle", "Chameleon", "Wolf",
            ],
        ),
        builtin(
            "Food",
            "Pizza",
            &[
                "Pizza", "Sushi", "Pancakes", "Tacos", "Lasagna", "Croissant", "Dumplings",
                "Burrito", "Cheesecake", "Ramen", "Falafel", "Waffles", "Paella", "Pretzel",
            ],
        ),
        builtin(
            "Sports",
            "Trophy",
            &[
                "Basketball", "Tennis", "Swimming", "Archery", "Volleyball", "Skiing", "Boxing",
                "Cricket", "Fencing", "Surfing", "Gymnastics", "Rowing", "Badminton", "Rugby",
            ],
        ),
        builtin(
            "Movies",
            "Film",
            &[
                "Titanic", "Inception", "Jaws", "Frozen", "Gladiator", "Casablanca", "Avatar",
                "Rocky", "Shrek", "Psycho", "Up", "Alien", "Grease", "Matrix",
            ],
        ),
        builtin(
            "Professions",
            "BriefcaseBusiness",
            &[
                "Firefighter", "Surgeon", "Pilot", "Architect", "Plumber", "Journalist",
                "Librarian", "Electrician", "Chef", "Astronaut", "Detective", "Teacher",
                "Barber", "Magician",
            ],
        ),
        builtin(
            "Places",
            "MapPin",
            &[
                "Airport", "Beach", "Library", "Casino", "Submarine", "Hospital", "Circus",
                "Lighthouse", "Museum", "Vineyard", "Stadium", "Monastery", "Desert", "Space Station",
            ],
        ),
        builtin(
            "Household Objects",
            "Lamp",
            &[
                "Toaster", "Umbrella", "Scissors", "Doormat", "Candle", "Mirror", "Kettle",
                "Stapler", "Blender", "Flashlight", "Hairbrush", "Thermometer", "Corkscrew",
                "Clothespin",
            ],
        ),
        builtin(
            "Music",
            "Music",
            &[
                "Saxophone", "Opera", "Karaoke", "Accordion", "Drummer", "Vinyl", "Choir",
                "Harmonica", "Orchestra", "Bagpipes", "Jukebox", "Ukulele", "Metronome", "Encore",
            ],
        ),
    ]
});

/// The static built-in catalog, loaded once and never mutated.
pub fn builtin_categories() -> &'static [Category] {
    &BUILTIN
}

/// The full category catalog: built-ins plus user-owned custom categories.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    customs: Vec<CustomCategory>,
}

impl Catalog {
    pub fn new(customs: Vec<CustomCategory>) -> Self {
        Self { customs }
    }

    pub fn custom_categories(&self) -> &[CustomCategory] {
        &self.customs
    }

    /// All categories, built-ins first, customs in insertion order.
    pub fn all(&self) -> Vec<Category> {
        let mut out: Vec<Category> = builtin_categories().to_vec();
        out.extend(self.customs.iter().map(CustomCategory::as_category));
        out
    }

    pub fn names(&self) -> Vec<String> {
        self.all().into_iter().map(|c| c.name).collect()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        builtin_categories().iter().any(|c| c.name == name)
            || self.customs.iter().any(|c| c.name == name)
    }

    pub fn get_custom(&self, id: &str) -> Option<&CustomCategory> {
        self.customs.iter().find(|c| c.id == id)
    }

    pub fn add_custom(&mut self, draft: &CategoryDraft) -> Result<String, CategoryError> {
        let (name, words) = self.validate_draft(draft, None)?;
        let id = format!("custom-{}", Uuid::new_v4());
        self.customs.push(CustomCategory {
            id: id.clone(),
            name,
            icon: draft.icon.clone(),
            words,
        });
        Ok(id)
    }

    pub fn update_custom(&mut self, id: &str, draft: &CategoryDraft) -> Result<(), CategoryError> {
        let (name, words) = self.validate_draft(draft, Some(id))?;
        let category = self
            .customs
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CategoryError::UnknownId(id.to_string()))?;
        category.name = name;
        category.icon = draft.icon.clone();
        category.words = words;
        Ok(())
    }

    /// Removes the custom category with `id`. Returns whether anything was
    /// deleted; callers reconcile the settings selection afterwards.
    pub fn remove_custom(&mut self, id: &str) -> bool {
        let before = self.customs.len();
        self.customs.retain(|c| c.id != id);
        self.customs.len() != before
    }

    fn validate_draft(
        &self,
        draft: &CategoryDraft,
        editing_id: Option<&str>,
    ) -> Result<(String, Vec<String>), CategoryError> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        let taken = builtin_categories().iter().any(|c| c.name == name)
            || self
                .customs
                .iter()
                .any(|c| c.name == name && Some(c.id.as_str()) != editing_id);
        if taken {
            return Err(CategoryError::DuplicateName(name));
        }
        let words = draft.normalized_words();
        if words.len() < MIN_CUSTOM_WORDS {
            return Err(CategoryError::NotEnoughWords { have: words.len() });
        }
        Ok((name, words))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, words: &[&str]) -> CategoryDraft {
        CategoryDraft {
            name: name.to_string(),
            icon: Some("Sparkles".to_string()),
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    fn builtins_are_well_formed() {
        let builtins = builtin_categories();
        assert!(builtins.len() >= 8);
        for category in builtins {
            assert!(!category.name.is_empty());
            assert!(category.words.len() >= 12, "{} too small", category.name);
            assert!(!category.is_custom);
        }
    }

    #[test]
    fn add_custom_appears_after_builtins() {
        let mut catalog = Catalog::default();
        let id = catalog.add_custom(&draft("Board Games", &["Chess", "Go", "Risk"])).unwrap();
        assert!(id.starts_with("custom-"));
        let all = catalog.all();
        let last = all.last().unwrap();
        assert_eq!(last.name, "Board Games");
        assert!(last.is_custom);
        assert!(catalog.contains_name("Board Games"));
    }

    #[test]
    fn draft_rejections() {
        let mut catalog = Catalog::default();
        assert_eq!(
            catalog.add_custom(&draft("  ", &["a", "b", "c"])),
            Err(CategoryError::EmptyName)
        );
        assert_eq!(
            catalog.add_custom(&draft("Animals", &["a", "b", "c"])),
            Err(CategoryError::DuplicateName("Animals".to_string()))
        );
        assert_eq!(
            catalog.add_custom(&draft("Tiny", &["a", " a ", "b"])),
            Err(CategoryError::NotEnoughWords { have: 2 })
        );
    }

    #[test]
    fn update_keeps_own_name_and_rejects_others() {
        let mut catalog = Catalog::default();
        let id = catalog.add_custom(&draft("Mine", &["a", "b", "c"])).unwrap();
        catalog.add_custom(&draft("Yours", &["x", "y", "z"])).unwrap();

        // Renaming to itself is fine.
        assert!(catalog.update_custom(&id, &draft("Mine", &["a", "b", "c", "d"])).is_ok());
        assert_eq!(catalog.get_custom(&id).unwrap().words.len(), 4);

        assert_eq!(
            catalog.update_custom(&id, &draft("Yours", &["a", "b", "c"])),
            Err(CategoryError::DuplicateName("Yours".to_string()))
        );
    }

    #[test]
    fn remove_custom_reports_hit() {
        let mut catalog = Catalog::default();
        let id = catalog.add_custom(&draft("Mine", &["a", "b", "c"])).unwrap();
        assert!(catalog.remove_custom(&id));
        assert!(!catalog.remove_custom(&id));
        assert!(!catalog.contains_name("Mine"));
    }
}
