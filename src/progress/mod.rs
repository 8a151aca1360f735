//! Learning progress and review scheduling
//!
//! This module provides:
//! - Per-kana progress records (counts, difficulty, due date)
//! - The difficulty/interval algorithm and due-set selection
//! - A store with a pluggable load/save backend

pub mod algorithm;
pub mod models;
pub mod persistence;
pub mod store;

pub use models::*;
pub use persistence::{FileBackend, MemoryBackend, PersistenceError, ProgressBackend};
pub use store::ProgressStore;
