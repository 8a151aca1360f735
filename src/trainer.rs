//! The review engine as one explicitly constructed object
//!
//! `Trainer` owns the catalog, the progress store, the mode selector and the
//! clock. Front ends build one and call into it; nothing here is global.
//! Every operation takes `&mut self`, so a multi-threaded host serializes
//! access by wrapping the whole trainer in a `Mutex`.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Catalog, Kana};
use crate::clock::{Clock, SystemClock};
use crate::config::{self, Config};
use crate::modes::{ModeSelector, ReviewMode};
use crate::progress::algorithm::select_due;
use crate::progress::{
    FileBackend, ForgottenKana, MemoryBackend, ProgressBackend, ProgressRecord, ProgressStats, ProgressStore,
};
use crate::session::ReviewSession;

/// What happened when an answer was recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    pub kana: Kana,
    pub correct: bool,
    /// The record after the answer was applied
    pub record: ProgressRecord,
}

pub struct Trainer {
    catalog: Catalog,
    progress: ProgressStore,
    modes: ModeSelector,
    clock: Arc<dyn Clock>,
    batch_limit: usize,
}

impl Trainer {
    pub fn new(
        catalog: Catalog,
        backend: Box<dyn ProgressBackend>,
        clock: Arc<dyn Clock>,
        config: &Config,
    ) -> Self {
        let progress = ProgressStore::open(backend, Arc::clone(&clock));
        Self {
            catalog,
            progress,
            modes: ModeSelector::with_mode(config.initial_mode),
            clock,
            batch_limit: config.batch_limit,
        }
    }

    /// Built-in catalog, progress file from `config`, wall-clock time
    pub fn from_config(config: &Config) -> config::Result<Self> {
        let path: PathBuf = config.progress_path()?;
        log::info!("Using progress file {:?}", path);
        Ok(Self::new(
            Catalog::builtin(),
            Box::new(FileBackend::new(path)),
            Arc::new(SystemClock),
            config,
        ))
    }

    /// Built-in catalog with progress kept only in memory
    pub fn in_memory(config: &Config) -> Self {
        Self::new(
            Catalog::builtin(),
            Box::new(MemoryBackend::new()),
            Arc::new(SystemClock),
            config,
        )
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn batch_limit(&self) -> usize {
        self.batch_limit
    }

    pub fn set_batch_limit(&mut self, limit: usize) {
        self.batch_limit = limit;
    }

    // ==================== Recording ====================

    pub fn record_correct(&mut self, character_id: Uuid) -> ProgressRecord {
        self.progress.record_correct(character_id)
    }

    pub fn record_incorrect(&mut self, character_id: Uuid) -> ProgressRecord {
        self.progress.record_incorrect(character_id)
    }

    // ==================== Selection ====================

    /// Priority-ordered due kana from `all`, regardless of the current mode
    pub fn due_batch(&self, all: &[Kana], limit: usize) -> Vec<Kana> {
        select_due(all, self.progress.records(), self.clock.now(), limit)
    }

    /// Next batch from `all` according to the current mode
    pub fn mode_batch(&mut self, all: &[Kana], limit: usize) -> Vec<Kana> {
        self.modes
            .batch(all, &self.progress, self.clock.now(), limit)
    }

    pub fn statistics(&self) -> ProgressStats {
        self.progress.statistics(&self.catalog)
    }

    pub fn forgotten(&self) -> Vec<ForgottenKana> {
        self.progress.forgotten(&self.catalog)
    }

    // ==================== Modes ====================

    pub fn current_mode(&self) -> ReviewMode {
        self.modes.current_mode()
    }

    pub fn switch_mode(&mut self) -> ReviewMode {
        self.modes.switch_mode()
    }

    pub fn set_mode(&mut self, mode: ReviewMode) {
        self.modes.set_mode(mode);
    }

    pub fn reset_sequential_mode(&mut self) {
        self.modes.reset_sequential_mode();
    }

    // ==================== Sessions ====================

    /// A new session over the next batch of the built-in catalog
    pub fn start_session(&mut self) -> ReviewSession {
        let now = self.clock.now();
        let batch = self
            .modes
            .batch(self.catalog.all(), &self.progress, now, self.batch_limit);
        log::debug!("Started {} session with {} kana", self.current_mode(), batch.len());
        ReviewSession::new(batch)
    }

    /// Record an answer for the session's current kana
    ///
    /// A correct answer moves the session on. An incorrect one reveals the
    /// glyphs and leaves the session on the same kana until `advance()`.
    pub fn answer(&mut self, session: &mut ReviewSession, correct: bool) -> Option<AnswerOutcome> {
        let kana = session.current()?.clone();
        let record = self.progress.record_answer(kana.id, correct);

        if correct {
            session.advance();
        } else {
            session.reveal();
        }

        Some(AnswerOutcome {
            kana,
            correct,
            record,
        })
    }
}
