//! A single review session
//!
//! Holds one batch of kana and a cursor into it. Sessions are throwaway: when
//! the batch runs out, on reset, or on a mode switch the caller starts a new
//! one.

use serde::{Deserialize, Serialize};

use crate::catalog::Kana;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    batch: Vec<Kana>,
    cursor: usize,
    revealed: bool,
}

impl ReviewSession {
    pub fn new(batch: Vec<Kana>) -> Self {
        Self {
            batch,
            cursor: 0,
            revealed: false,
        }
    }

    /// The kana being asked, `None` once the batch is used up
    pub fn current(&self) -> Option<&Kana> {
        self.batch.get(self.cursor)
    }

    pub fn batch(&self) -> &[Kana] {
        &self.batch
    }

    /// Whether the glyphs of the current kana are showing
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn reveal(&mut self) {
        if self.current().is_some() {
            self.revealed = true;
        }
    }

    /// Move to the next kana and hide its glyphs
    pub fn advance(&mut self) -> Option<&Kana> {
        if self.cursor < self.batch.len() {
            self.cursor += 1;
        }
        self.revealed = false;
        self.current()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.batch.len()
    }

    pub fn progress(&self) -> SessionProgress {
        let total = self.batch.len();
        let answered = self.cursor.min(total);
        SessionProgress {
            total,
            answered,
            remaining: total - answered,
            is_complete: self.is_complete(),
        }
    }
}
