//! Kana catalog
//!
//! The fixed, read-only list of learnable characters. Built once at start-up
//! and handed to whatever needs it; nothing mutates it afterwards.

mod data;
pub mod models;

pub use data::GOJUON_ORDER;
pub use models::{Kana, KanaCategory};

use uuid::Uuid;

use data::KanaRow;

/// Immutable list of kana
#[derive(Debug, Clone)]
pub struct Catalog {
    kana: Vec<Kana>,
}

impl Catalog {
    /// The full built-in table: basic, voiced, semi-voiced, then combination kana
    pub fn builtin() -> Self {
        let groups: [(&[KanaRow], KanaCategory); 4] = [
            (&data::BASIC, KanaCategory::Basic),
            (&data::VOICED, KanaCategory::Voiced),
            (&data::SEMI_VOICED, KanaCategory::SemiVoiced),
            (&data::COMBINATION, KanaCategory::Combination),
        ];

        let kana = groups
            .iter()
            .flat_map(|(rows, category)| {
                rows.iter()
                    .map(move |(romaji, hiragana, katakana)| Kana::new(romaji, hiragana, katakana, *category))
            })
            .collect();

        Self { kana }
    }

    /// A catalog over an arbitrary list, in the given order
    pub fn from_kana(kana: Vec<Kana>) -> Self {
        Self { kana }
    }

    pub fn all(&self) -> &[Kana] {
        &self.kana
    }

    pub fn len(&self) -> usize {
        self.kana.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kana.is_empty()
    }

    /// All kana of one category, in catalog order
    pub fn by_category(&self, category: KanaCategory) -> Vec<&Kana> {
        self.kana.iter().filter(|k| k.category == category).collect()
    }

    pub fn get(&self, id: Uuid) -> Option<&Kana> {
        self.kana.iter().find(|k| k.id == id)
    }

    /// Every kana named by `query` (romaji or glyph). Romaji such as `ji`
    /// and `zu` match more than one character.
    pub fn find(&self, query: &str) -> Vec<&Kana> {
        self.kana.iter().filter(|k| k.matches(query)).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_builtin_sizes() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 92);
        assert_eq!(catalog.by_category(KanaCategory::Basic).len(), 46);
        assert_eq!(catalog.by_category(KanaCategory::Voiced).len(), 20);
        assert_eq!(catalog.by_category(KanaCategory::SemiVoiced).len(), 5);
        assert_eq!(catalog.by_category(KanaCategory::Combination).len(), 21);
    }

    #[test]
    fn test_every_category_present() {
        let catalog = Catalog::builtin();
        for category in KanaCategory::ALL {
            assert!(!catalog.by_category(category).is_empty(), "{} is empty", category);
        }
    }

    #[test]
    fn test_ids_unique() {
        let catalog = Catalog::builtin();
        let ids: HashSet<Uuid> = catalog.all().iter().map(|k| k.id).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_lookup_a() {
        let catalog = Catalog::builtin();
        let a = catalog.find("a");
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].hiragana, "あ");
        assert_eq!(a[0].katakana, "ア");
        assert_eq!(catalog.get(a[0].id), Some(a[0]));
    }

    #[test]
    fn test_ambiguous_romaji() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.find("ji").len(), 2);
        assert_eq!(catalog.find("ぢ").len(), 1);
    }

    #[test]
    fn test_basic_rows_follow_gojuon() {
        let catalog = Catalog::builtin();
        let basic: Vec<&str> = catalog
            .by_category(KanaCategory::Basic)
            .iter()
            .map(|k| k.romaji.as_str())
            .collect();
        assert_eq!(basic, GOJUON_ORDER.to_vec());
    }
}
