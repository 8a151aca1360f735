//! Review ordering modes
//!
//! `Priority` defers to the scheduler's due-set selection. `Sequential` walks a
//! fixed gojūon-first ordering of the whole catalog and ignores due dates,
//! resuming where the previous batch stopped.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Kana, KanaCategory, GOJUON_ORDER};
use crate::progress::algorithm::select_due;
use crate::progress::ProgressStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewMode {
    /// Due characters, hardest first
    #[default]
    Priority,
    /// Fixed gojūon order with a resumable cursor
    Sequential,
}

impl ReviewMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Priority => "Priority",
            Self::Sequential => "Sequential",
        }
    }
}

impl fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current mode plus the sequential cursor
///
/// The cursor lives only in memory; a new process starts from the top.
#[derive(Debug, Clone, Default)]
pub struct ModeSelector {
    mode: ReviewMode,
    cursor: usize,
}

impl ModeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ReviewMode) -> Self {
        Self { mode, cursor: 0 }
    }

    pub fn current_mode(&self) -> ReviewMode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Toggle between the two modes; entering sequential restarts the walk
    pub fn switch_mode(&mut self) -> ReviewMode {
        self.mode = match self.mode {
            ReviewMode::Priority => {
                self.cursor = 0;
                ReviewMode::Sequential
            }
            ReviewMode::Sequential => ReviewMode::Priority,
        };
        log::debug!("Switched review mode to {}", self.mode);
        self.mode
    }

    /// Switch to `mode` if not already in it
    pub fn set_mode(&mut self, mode: ReviewMode) {
        if self.mode != mode {
            self.switch_mode();
        }
    }

    pub fn reset_sequential_mode(&mut self) {
        self.cursor = 0;
    }

    /// Next batch according to the current mode
    pub fn batch(
        &mut self,
        all: &[Kana],
        store: &ProgressStore,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Vec<Kana> {
        match self.mode {
            ReviewMode::Priority => select_due(all, store.records(), now, limit),
            ReviewMode::Sequential => self.sequential_batch(all, limit),
        }
    }

    /// Up to `limit` characters from the cursor, wrapping past the end
    ///
    /// A batch never repeats a character, so it holds at most one full pass.
    /// The ordering is rebuilt on every call and the cursor is reduced modulo
    /// its length, so a catalog that changed size cannot leave it stale.
    pub fn sequential_batch(&mut self, all: &[Kana], limit: usize) -> Vec<Kana> {
        let ordering = canonical_order(all);
        if ordering.is_empty() {
            self.cursor = 0;
            return Vec::new();
        }

        let len = ordering.len();
        let start = self.cursor % len;
        let take = limit.min(len);

        let batch: Vec<Kana> = (0..take)
            .map(|offset| ordering[(start + offset) % len].clone())
            .collect();

        self.cursor = (start + take) % len;
        batch
    }
}

/// Basic kana in gojūon order, then everything else in catalog order
///
/// Basic kana whose romaji is not in the gojūon table follow the gojūon ones.
pub fn canonical_order(all: &[Kana]) -> Vec<&Kana> {
    let mut ordered: Vec<&Kana> = GOJUON_ORDER
        .iter()
        .filter_map(|romaji| {
            all.iter()
                .find(|k| k.category == KanaCategory::Basic && k.romaji == *romaji)
        })
        .collect();

    let extra_basic: Vec<&Kana> = all
        .iter()
        .filter(|k| k.category == KanaCategory::Basic)
        .filter(|k| !ordered.iter().any(|o| o.id == k.id))
        .collect();
    ordered.extend(extra_basic);

    ordered.extend(all.iter().filter(|k| k.category != KanaCategory::Basic));
    ordered
}
