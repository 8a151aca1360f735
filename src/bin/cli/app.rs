use std::path::Path;

use anyhow::{bail, Context, Result};

use kanamate_lib::catalog::Kana;
use kanamate_lib::config::Config;
use kanamate_lib::trainer::Trainer;

/// Shared application state for CLI commands
pub struct App {
    pub trainer: Trainer,
}

impl App {
    /// Load config and open the progress store
    pub fn new(config_path: Option<&Path>, ephemeral: bool) -> Result<Self> {
        let config = match config_path {
            // An explicitly named file must parse
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::default_path()
                .map(|path| Config::load_or_default(&path))
                .unwrap_or_default(),
        };

        let trainer = if ephemeral {
            Trainer::in_memory(&config)
        } else {
            Trainer::from_config(&config).context("Failed to open progress store")?
        };

        Ok(Self { trainer })
    }

    /// Find a kana by romaji or glyph
    pub fn find_kana(&self, query: &str) -> Result<Kana> {
        let matches = self.trainer.catalog().find(query);

        match matches.len() {
            0 => bail!("No kana matching '{}'", query),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous kana '{}'. Use the kana itself:\n{}",
                query,
                matches
                    .iter()
                    .map(|k| format!("  - {} {} ({})", k.hiragana, k.katakana, k.category))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    /// Tell the user if the last save did not make it to disk
    pub fn warn_if_unsaved(&self) {
        let progress = self.trainer.progress();
        if progress.has_unsaved_changes() {
            eprintln!(
                "warning: progress could not be saved: {}",
                progress.last_save_error().unwrap_or("unknown error")
            );
        }
    }
}
