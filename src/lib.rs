//! Kana flashcard engine: per-kana progress, review scheduling and batch selection.
//!
//! The [`trainer::Trainer`] ties the pieces together for a host such as the
//! bundled CLI:
//! - [`catalog`]: the built-in kana set with stable ids
//! - [`progress`]: answer records, the interval algorithm and persistence
//! - [`modes`]: priority and sequential batch selection
//! - [`session`]: walking through one batch

pub mod catalog;
pub mod clock;
pub mod config;
pub mod modes;
pub mod progress;
pub mod session;
pub mod trainer;
