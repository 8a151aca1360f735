//! Difficulty and due-date scheduling
//!
//! Every answer nudges a character's difficulty and pushes its next review out
//! by an interval derived from that difficulty:
//!
//! - correct: difficulty - 0.1, floored at 0.1
//! - incorrect: difficulty + 0.2, capped at 3.0
//! - interval = 1 day * difficulty / bonus, where bonus is 2.0 once the
//!   success rate is above 70% and 1.0 otherwise
//!
//! The interval grows with difficulty, so the hardest characters wait the
//! longest. Selection compensates by putting high-difficulty characters first
//! once they are due.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::models::{ProgressRecord, MAX_DIFFICULTY, MIN_DIFFICULTY};
use crate::catalog::Kana;

/// Difficulty removed by a correct answer
const CORRECT_STEP: f64 = 0.1;

/// Difficulty added by an incorrect answer
const INCORRECT_STEP: f64 = 0.2;

/// Success rate above which the interval is halved
const SUCCESS_THRESHOLD: f64 = 0.7;

const SUCCESS_BONUS: f64 = 2.0;

const BASE_INTERVAL_MS: f64 = 86_400_000.0;

/// Batch size used when the caller has no preference
pub const DEFAULT_BATCH_LIMIT: usize = 20;

/// Result of scheduling one answer
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewResult {
    pub difficulty: f64,
    pub interval: Duration,
    pub next_review_at: DateTime<Utc>,
}

/// New difficulty after one answer
pub fn adjust_difficulty(difficulty: f64, correct: bool) -> f64 {
    if correct {
        (difficulty - CORRECT_STEP).max(MIN_DIFFICULTY)
    } else {
        (difficulty + INCORRECT_STEP).min(MAX_DIFFICULTY)
    }
}

/// Keep a (possibly hand-edited) difficulty inside the valid range
pub fn clamp_difficulty(difficulty: f64) -> f64 {
    if difficulty.is_nan() {
        return super::models::DEFAULT_DIFFICULTY;
    }
    difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

/// Time until the next review for a given difficulty and success rate
pub fn review_interval(difficulty: f64, success_rate: f64) -> Duration {
    let bonus = if success_rate > SUCCESS_THRESHOLD {
        SUCCESS_BONUS
    } else {
        1.0
    };
    Duration::milliseconds((BASE_INTERVAL_MS * difficulty / bonus).round() as i64)
}

/// Calculate the schedule that follows an answer, without touching the record
///
/// Difficulty is adjusted first; the interval then uses the adjusted
/// difficulty and the success rate including this answer.
pub fn calculate_next_review(record: &ProgressRecord, correct: bool, now: DateTime<Utc>) -> ReviewResult {
    let difficulty = adjust_difficulty(record.difficulty, correct);

    let (correct_count, incorrect_count) = if correct {
        (record.correct_count + 1, record.incorrect_count)
    } else {
        (record.correct_count, record.incorrect_count + 1)
    };
    let success_rate = correct_count as f64 / (correct_count + incorrect_count) as f64;

    let interval = review_interval(difficulty, success_rate);

    ReviewResult {
        difficulty,
        interval,
        next_review_at: now + interval,
    }
}

/// Apply an answer to a record: counts, timestamps, difficulty and due date
pub fn apply_answer(record: &mut ProgressRecord, correct: bool, now: DateTime<Utc>) -> ReviewResult {
    let result = calculate_next_review(record, correct, now);

    if correct {
        record.correct_count += 1;
    } else {
        record.incorrect_count += 1;
    }
    record.last_reviewed_at = now;
    record.difficulty = result.difficulty;
    record.next_review_at = result.next_review_at;

    result
}

/// A character with no record is always eligible
pub fn is_eligible(record: Option<&ProgressRecord>, now: DateTime<Utc>) -> bool {
    record.map_or(true, |r| r.is_due(now))
}

/// Select up to `limit` due characters, hardest first
///
/// Ties on difficulty go to the character reviewed longest ago; characters
/// never reviewed count as the most overdue. Remaining ties keep catalog
/// order.
pub fn select_due(
    all: &[Kana],
    records: &HashMap<Uuid, ProgressRecord>,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<Kana> {
    let mut due: Vec<(&Kana, Option<&ProgressRecord>)> = all
        .iter()
        .map(|kana| (kana, records.get(&kana.id)))
        .filter(|(_, record)| is_eligible(*record, now))
        .collect();

    due.sort_by(|(_, a), (_, b)| compare_priority(*a, *b));

    due.into_iter()
        .take(limit)
        .map(|(kana, _)| kana.clone())
        .collect()
}

fn compare_priority(a: Option<&ProgressRecord>, b: Option<&ProgressRecord>) -> Ordering {
    let difficulty_a = a.map_or(super::models::DEFAULT_DIFFICULTY, |r| r.difficulty);
    let difficulty_b = b.map_or(super::models::DEFAULT_DIFFICULTY, |r| r.difficulty);

    difficulty_b.total_cmp(&difficulty_a).then_with(|| {
        // None sorts before Some: unseen characters first
        let reviewed_a = a.map(|r| r.last_reviewed_at);
        let reviewed_b = b.map(|r| r.last_reviewed_at);
        reviewed_a.cmp(&reviewed_b)
    })
}

/// Format an interval to a short human-readable string
pub fn format_interval(interval: Duration) -> String {
    let minutes = interval.num_minutes();
    if minutes <= 0 {
        "now".to_string()
    } else if minutes < 60 {
        format!("{}m", minutes)
    } else if minutes < 60 * 24 {
        format!("{}h", interval.num_hours())
    } else {
        let days = interval.num_days();
        let hours = interval.num_hours() - days * 24;
        if hours == 0 {
            format!("{}d", days)
        } else {
            format!("{}d {}h", days, hours)
        }
    }
}
