//! Data models for learning progress

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Kana;

/// Lowest difficulty a record can reach
pub const MIN_DIFFICULTY: f64 = 0.1;

/// Highest difficulty a record can reach
pub const MAX_DIFFICULTY: f64 = 3.0;

/// Difficulty given to a character on its first answer
pub const DEFAULT_DIFFICULTY: f64 = 1.0;

/// Learning state for one character, created on its first answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub character_id: Uuid,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub incorrect_count: u32,
    /// When the character was last answered
    pub last_reviewed_at: DateTime<Utc>,
    /// The character is due once now >= this
    pub next_review_at: DateTime<Utc>,
    /// 0.1 (easy) to 3.0 (hard)
    #[serde(default = "default_difficulty")]
    pub difficulty: f64,
}

fn default_difficulty() -> f64 {
    DEFAULT_DIFFICULTY
}

impl ProgressRecord {
    pub fn new(character_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            character_id,
            correct_count: 0,
            incorrect_count: 0,
            last_reviewed_at: now,
            next_review_at: now,
            difficulty: DEFAULT_DIFFICULTY,
        }
    }

    pub fn total_answers(&self) -> u32 {
        self.correct_count + self.incorrect_count
    }

    /// Fraction of answers that were correct, 0.0 before any answer
    pub fn success_rate(&self) -> f64 {
        let total = self.total_answers();
        if total == 0 {
            0.0
        } else {
            self.correct_count as f64 / total as f64
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_review_at
    }
}

/// Overall numbers shown on the statistics screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    /// Characters in the catalog
    pub total: usize,
    /// Characters answered at least once
    pub studied: usize,
    /// Mean success rate over studied characters
    pub average_success_rate: f64,
}

/// How badly a character keeps being forgotten
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForgetSeverity {
    Low,
    Medium,
    High,
}

impl ForgetSeverity {
    pub fn from_misses(incorrect_count: u32) -> Self {
        match incorrect_count {
            5.. => Self::High,
            3..=4 => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// A character that has been missed at least once
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgottenKana {
    pub kana: Kana,
    pub record: ProgressRecord,
    pub severity: ForgetSeverity,
}
