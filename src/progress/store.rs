//! Progress store
//!
//! Owns the mapping from character id to [`ProgressRecord`] and is the only
//! thing that writes records. Loading never fails: missing or unreadable data
//! is a cold start. Saving never fails either: errors are logged, remembered,
//! and the whole mapping is written again on the next save.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use super::algorithm::{apply_answer, clamp_difficulty};
use super::models::{ForgetSeverity, ForgottenKana, ProgressRecord, ProgressStats};
use super::persistence::{ProgressBackend, Result};
use crate::catalog::Catalog;
use crate::clock::Clock;

pub struct ProgressStore {
    records: HashMap<Uuid, ProgressRecord>,
    backend: Box<dyn ProgressBackend>,
    clock: Arc<dyn Clock>,
    unsaved: bool,
    last_save_error: Option<String>,
}

impl ProgressStore {
    /// Create a store and load whatever the backend holds
    pub fn open(backend: Box<dyn ProgressBackend>, clock: Arc<dyn Clock>) -> Self {
        let mut store = Self {
            records: HashMap::new(),
            backend,
            clock,
            unsaved: false,
            last_save_error: None,
        };
        store.load();
        store
    }

    /// Replace the in-memory mapping with the persisted one
    ///
    /// Absent or corrupt data yields an empty mapping.
    pub fn load(&mut self) {
        self.records = match self.read_records() {
            Ok(Some(records)) => {
                log::info!("Loaded progress for {} kana", records.len());
                records
            }
            Ok(None) => {
                log::info!("No saved progress, starting fresh");
                HashMap::new()
            }
            Err(e) => {
                log::warn!("Discarding unreadable progress data: {}", e);
                HashMap::new()
            }
        };
        self.unsaved = false;
        self.last_save_error = None;
    }

    fn read_records(&self) -> Result<Option<HashMap<Uuid, ProgressRecord>>> {
        let Some(bytes) = self.backend.load_blob()? else {
            return Ok(None);
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let mut records: HashMap<Uuid, ProgressRecord> = serde_json::from_slice(&bytes)?;
        for (id, record) in records.iter_mut() {
            // The map key is authoritative
            record.character_id = *id;
            let clamped = clamp_difficulty(record.difficulty);
            if clamped != record.difficulty {
                log::warn!(
                    "Difficulty {} for {} out of range, clamped to {}",
                    record.difficulty,
                    id,
                    clamped
                );
                record.difficulty = clamped;
            }
        }
        Ok(Some(records))
    }

    /// Write the whole mapping to the backend
    ///
    /// Returns whether the write succeeded. A failure is logged and kept in
    /// [`last_save_error`](Self::last_save_error); memory stays authoritative.
    pub fn save(&mut self) -> bool {
        match self.write_records() {
            Ok(()) => {
                self.unsaved = false;
                self.last_save_error = None;
                true
            }
            Err(e) => {
                log::warn!("Failed to save progress ({} kana): {}", self.records.len(), e);
                self.unsaved = true;
                self.last_save_error = Some(e.to_string());
                false
            }
        }
    }

    fn write_records(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.records)?;
        self.backend.save_blob(&bytes)?;
        log::debug!("Saved progress for {} kana", self.records.len());
        Ok(())
    }

    /// Record one answer and persist
    ///
    /// Unknown ids get a fresh record, same as new characters.
    pub fn record_answer(&mut self, character_id: Uuid, correct: bool) -> ProgressRecord {
        let now = self.clock.now();
        let record = self.get_or_insert(character_id);
        let result = apply_answer(record, correct, now);
        let updated = record.clone();

        log::debug!(
            "Answered {} {}: difficulty {:.2}, next review {}",
            character_id,
            if correct { "correctly" } else { "incorrectly" },
            result.difficulty,
            result.next_review_at
        );

        self.save();
        updated
    }

    pub fn record_correct(&mut self, character_id: Uuid) -> ProgressRecord {
        self.record_answer(character_id, true)
    }

    pub fn record_incorrect(&mut self, character_id: Uuid) -> ProgressRecord {
        self.record_answer(character_id, false)
    }

    /// The record for `character_id`, created with defaults if missing
    fn get_or_insert(&mut self, character_id: Uuid) -> &mut ProgressRecord {
        let now = self.clock.now();
        self.records
            .entry(character_id)
            .or_insert_with(|| ProgressRecord::new(character_id, now))
    }

    pub fn get(&self, character_id: Uuid) -> Option<&ProgressRecord> {
        self.records.get(&character_id)
    }

    pub fn records(&self) -> &HashMap<Uuid, ProgressRecord> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    /// Totals for the statistics screen
    pub fn statistics(&self, catalog: &Catalog) -> ProgressStats {
        let studied = self.records.len();
        let average_success_rate = if studied == 0 {
            0.0
        } else {
            self.records.values().map(|r| r.success_rate()).sum::<f64>() / studied as f64
        };

        ProgressStats {
            total: catalog.len(),
            studied,
            average_success_rate,
        }
    }

    /// Characters missed at least once, most-missed first
    pub fn forgotten(&self, catalog: &Catalog) -> Vec<ForgottenKana> {
        let mut forgotten: Vec<ForgottenKana> = self
            .records
            .values()
            .filter(|r| r.incorrect_count > 0)
            .filter_map(|record| {
                let kana = catalog.get(record.character_id)?;
                Some(ForgottenKana {
                    kana: kana.clone(),
                    record: record.clone(),
                    severity: ForgetSeverity::from_misses(record.incorrect_count),
                })
            })
            .collect();

        forgotten.sort_by(|a, b| {
            b.record
                .incorrect_count
                .cmp(&a.record.incorrect_count)
                .then_with(|| a.kana.romaji.cmp(&b.kana.romaji))
        });
        forgotten
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::progress::algorithm::select_due;
    use crate::progress::persistence::{FileBackend, MemoryBackend, PersistenceError};
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    const EPS: f64 = 1e-9;

    /// Backend whose saves always fail
    struct BrokenBackend;

    impl ProgressBackend for BrokenBackend {
        fn load_blob(&self) -> Result<Option<Vec<u8>>> {
            Ok(None)
        }

        fn save_blob(&self, _bytes: &[u8]) -> Result<()> {
            Err(PersistenceError::Unavailable("disk full".to_string()))
        }
    }

    /// Backend that fails the first save and accepts the rest
    #[derive(Default)]
    struct FlakyBackend {
        failed_once: std::sync::atomic::AtomicBool,
        inner: MemoryBackend,
    }

    impl ProgressBackend for FlakyBackend {
        fn load_blob(&self) -> Result<Option<Vec<u8>>> {
            self.inner.load_blob()
        }

        fn save_blob(&self, bytes: &[u8]) -> Result<()> {
            if !self.failed_once.swap(true, std::sync::atomic::Ordering::SeqCst) {
                return Err(PersistenceError::Unavailable("disk full".to_string()));
            }
            self.inner.save_blob(bytes)
        }
    }

    fn create_test_store() -> (ProgressStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = ProgressStore::open(Box::new(MemoryBackend::new()), clock.clone());
        (store, clock)
    }

    #[test]
    fn test_load_empty_backend() {
        let (store, _clock) = create_test_store();
        assert!(store.is_empty());
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn test_load_corrupt_blob() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let backend = MemoryBackend::with_blob(b"{ not json".to_vec());
        let store = ProgressStore::open(Box::new(backend), clock);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_blank_blob() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let backend = MemoryBackend::with_blob(b"  \n".to_vec());
        let store = ProgressStore::open(Box::new(backend), clock);
        assert!(store.is_empty());
    }

    #[test]
    fn test_record_creates_and_counts() {
        let (mut store, _clock) = create_test_store();
        let id = Uuid::new_v4();

        let record = store.record_correct(id);
        assert_eq!(record.correct_count, 1);
        assert_eq!(record.incorrect_count, 0);

        let record = store.record_incorrect(id);
        assert_eq!(record.correct_count, 1);
        assert_eq!(record.incorrect_count, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_record_stamps_clock_time() {
        let (mut store, clock) = create_test_store();
        let id = Uuid::new_v4();

        clock.advance(Duration::hours(5));
        let record = store.record_incorrect(id);

        assert_eq!(record.last_reviewed_at, clock.now());
        assert_eq!(record.next_review_at, clock.now() + Duration::milliseconds(103_680_000));
    }

    #[test]
    fn test_get_or_insert_defaults() {
        let (mut store, _clock) = create_test_store();
        let id = Uuid::new_v4();

        let record = store.get_or_insert(id);
        assert_eq!(record.character_id, id);
        assert_eq!(record.correct_count, 0);
        assert_eq!(record.difficulty, 1.0);

        // an existing record is returned as is
        store.record_incorrect(id);
        let record = store.get_or_insert(id);
        assert_eq!(record.incorrect_count, 1);
        assert!((record.difficulty - 1.2).abs() < EPS);
    }

    #[test]
    fn test_round_trip_through_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("progress.json");
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let id = Uuid::new_v4();

        {
            let mut store = ProgressStore::open(Box::new(FileBackend::new(path.clone())), clock.clone());
            store.record_incorrect(id);
            store.record_correct(id);
        }

        let reopened = ProgressStore::open(Box::new(FileBackend::new(path)), clock);
        let record = reopened.get(id).unwrap();
        assert_eq!(record.correct_count, 1);
        assert_eq!(record.incorrect_count, 1);
        assert!((record.difficulty - 1.1).abs() < EPS);
    }

    #[test]
    fn test_load_clamps_difficulty() {
        let id = Uuid::new_v4();
        let blob = format!(
            r#"{{"{id}": {{"characterId": "{id}", "correctCount": 1, "incorrectCount": 9,
                "lastReviewedAt": "2024-01-01T00:00:00Z", "nextReviewAt": "2024-01-02T00:00:00Z",
                "difficulty": 9.0}}}}"#
        );
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = ProgressStore::open(Box::new(MemoryBackend::with_blob(blob.into_bytes())), clock);

        assert_eq!(store.get(id).unwrap().difficulty, 3.0);
    }

    #[test]
    fn test_save_failure_is_reported_not_raised() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let mut store = ProgressStore::open(Box::new(BrokenBackend), clock);
        let id = Uuid::new_v4();

        let record = store.record_correct(id);

        assert_eq!(record.correct_count, 1);
        assert_eq!(store.get(id).unwrap().correct_count, 1);
        assert!(store.has_unsaved_changes());
        assert!(store.last_save_error().unwrap().contains("disk full"));
    }

    #[test]
    fn test_next_save_retries_after_failure() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let mut store = ProgressStore::open(Box::new(FlakyBackend::default()), clock);
        let id = Uuid::new_v4();

        store.record_correct(id);
        assert!(store.has_unsaved_changes());
        assert!(store.last_save_error().is_some());

        let record = store.record_correct(id);
        assert!(!store.has_unsaved_changes());
        assert!(store.last_save_error().is_none());

        // both answers made it into the written mapping
        store.load();
        assert_eq!(store.get(id), Some(&record));
        assert_eq!(record.correct_count, 2);
    }

    #[test]
    fn test_load_clears_save_error() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let mut store = ProgressStore::open(Box::new(BrokenBackend), clock);

        store.record_correct(Uuid::new_v4());
        assert!(store.last_save_error().is_some());

        store.load();
        assert!(!store.has_unsaved_changes());
        assert!(store.last_save_error().is_none());
    }

    #[test]
    fn test_statistics() {
        let (mut store, _clock) = create_test_store();
        let catalog = Catalog::builtin();

        let empty = store.statistics(&catalog);
        assert_eq!(empty.total, 92);
        assert_eq!(empty.studied, 0);
        assert_eq!(empty.average_success_rate, 0.0);

        let a = catalog.all()[0].id;
        let i = catalog.all()[1].id;
        store.record_correct(a);
        store.record_incorrect(i);

        let stats = store.statistics(&catalog);
        assert_eq!(stats.studied, 2);
        assert!((stats.average_success_rate - 0.5).abs() < EPS);
    }

    #[test]
    fn test_forgotten_sorted_by_misses() {
        let (mut store, _clock) = create_test_store();
        let catalog = Catalog::builtin();
        let ka = catalog.find("ka")[0].id;
        let ki = catalog.find("ki")[0].id;
        let ku = catalog.find("ku")[0].id;

        for _ in 0..5 {
            store.record_incorrect(ka);
        }
        for _ in 0..3 {
            store.record_incorrect(ki);
        }
        store.record_correct(ku);
        store.record_incorrect(Uuid::new_v4());

        let forgotten = store.forgotten(&catalog);
        assert_eq!(forgotten.len(), 2);
        assert_eq!(forgotten[0].kana.romaji, "ka");
        assert_eq!(forgotten[0].severity, ForgetSeverity::High);
        assert_eq!(forgotten[1].kana.romaji, "ki");
        assert_eq!(forgotten[1].severity, ForgetSeverity::Medium);
    }

    #[test]
    fn test_three_misses_then_two_hits() {
        let (mut store, clock) = create_test_store();
        let catalog = Catalog::builtin();
        let x = catalog.find("ka")[0].clone();

        for _ in 0..3 {
            store.record_incorrect(x.id);
        }
        store.record_correct(x.id);
        let record = store.record_correct(x.id);

        assert_eq!(record.correct_count, 2);
        assert_eq!(record.incorrect_count, 3);
        assert!((record.success_rate() - 0.4).abs() < EPS);
        // 1.0 + 3 * 0.2 - 2 * 0.1
        assert!((record.difficulty - 1.4).abs() < EPS);
        // 1.4 days, no success bonus at 40%
        assert_eq!(record.next_review_at, clock.now() + Duration::milliseconds(120_960_000));

        let due_now = select_due(catalog.all(), store.records(), clock.now(), 200);
        assert!(!due_now.iter().any(|k| k.id == x.id));

        clock.set(record.next_review_at - Duration::seconds(1));
        let due_before = select_due(catalog.all(), store.records(), clock.now(), 200);
        assert!(!due_before.iter().any(|k| k.id == x.id));

        clock.set(record.next_review_at);
        let due_after = select_due(catalog.all(), store.records(), clock.now(), 200);
        assert!(due_after.iter().any(|k| k.id == x.id));
    }
}
