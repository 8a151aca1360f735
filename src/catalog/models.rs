//! Data models for the kana catalog

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for deriving stable kana identifiers
const KANA_NAMESPACE: Uuid = Uuid::from_u128(0x6b61_6e61_6d61_7465_9c3e_41d2_8f0a_5b17);

/// Group a kana belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KanaCategory {
    /// The 46 gojūon sounds
    Basic,
    /// Dakuten sounds (が, ざ, だ, ば rows)
    Voiced,
    /// Handakuten sounds (ぱ row)
    SemiVoiced,
    /// Yōon sounds (きゃ, しゃ, ...)
    Combination,
}

impl KanaCategory {
    pub const ALL: [KanaCategory; 4] = [
        KanaCategory::Basic,
        KanaCategory::Voiced,
        KanaCategory::SemiVoiced,
        KanaCategory::Combination,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Voiced => "Voiced",
            Self::SemiVoiced => "Semi-voiced",
            Self::Combination => "Combination",
        }
    }
}

impl fmt::Display for KanaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single learnable kana unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kana {
    pub id: Uuid,
    pub romaji: String,
    pub hiragana: String,
    pub katakana: String,
    pub category: KanaCategory,
}

impl Kana {
    /// Build a kana whose id is derived from its category and hiragana glyph,
    /// so the same character keeps its id across runs.
    pub fn new(romaji: &str, hiragana: &str, katakana: &str, category: KanaCategory) -> Self {
        let key = format!("{}:{}", category.label(), hiragana);
        Self {
            id: Uuid::new_v5(&KANA_NAMESPACE, key.as_bytes()),
            romaji: romaji.to_string(),
            hiragana: hiragana.to_string(),
            katakana: katakana.to_string(),
            category,
        }
    }

    /// Whether `query` names this kana by romaji or either glyph
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.romaji.eq_ignore_ascii_case(query) || self.hiragana == query || self.katakana == query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_stable() {
        let a = Kana::new("ka", "か", "カ", KanaCategory::Basic);
        let b = Kana::new("ka", "か", "カ", KanaCategory::Basic);
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_id_distinguishes_same_romaji() {
        let ji = Kana::new("ji", "じ", "ジ", KanaCategory::Voiced);
        let dji = Kana::new("ji", "ぢ", "ヂ", KanaCategory::Voiced);
        assert_ne!(ji.id, dji.id);
    }

    #[test]
    fn test_matches() {
        let kana = Kana::new("shi", "し", "シ", KanaCategory::Basic);
        assert!(kana.matches("shi"));
        assert!(kana.matches("SHI"));
        assert!(kana.matches("し"));
        assert!(kana.matches("シ"));
        assert!(!kana.matches("su"));
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(KanaCategory::SemiVoiced.to_string(), "Semi-voiced");
        assert_eq!(KanaCategory::Basic.to_string(), "Basic");
    }
}
