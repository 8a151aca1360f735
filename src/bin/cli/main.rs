mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use kanamate_lib::catalog::KanaCategory;
use kanamate_lib::modes::ReviewMode;

#[derive(Parser)]
#[command(name = "kanamate-cli", about = "Kana flashcards with spaced review", version)]
struct Cli {
    /// Config file (default: ~/.config/kanamate/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Keep progress in memory only; nothing is read or written
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    Priority,
    Sequential,
}

impl From<ModeArg> for ReviewMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Priority => ReviewMode::Priority,
            ModeArg::Sequential => ReviewMode::Sequential,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum AnswerArg {
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum CategoryArg {
    Basic,
    Voiced,
    SemiVoiced,
    Combination,
}

impl From<CategoryArg> for KanaCategory {
    fn from(category: CategoryArg) -> Self {
        match category {
            CategoryArg::Basic => KanaCategory::Basic,
            CategoryArg::Voiced => KanaCategory::Voiced,
            CategoryArg::SemiVoiced => KanaCategory::SemiVoiced,
            CategoryArg::Combination => KanaCategory::Combination,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Interactive review (default)
    Review {
        /// Review ordering
        #[arg(long)]
        mode: Option<ModeArg>,
        /// Kana per session
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List kana due for review, hardest first
    Due {
        /// Maximum results
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Record one answer
    Answer {
        /// Romaji, hiragana or katakana
        kana: String,
        /// Whether the kana was recalled
        result: AnswerArg,
    },

    /// Overall progress
    Stats,

    /// Kana missed at least once, most-missed first
    Forgotten,

    /// Kana chart with per-kana progress
    Chart {
        /// Show one category only
        #[arg(long)]
        category: Option<CategoryArg>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.config.as_deref(), cli.ephemeral)?;

    match cli.command {
        None => {
            commands::review::run(&mut app, None, None, use_color)?;
        }
        Some(Command::Review { mode, limit }) => {
            commands::review::run(&mut app, mode.map(Into::into), limit, use_color)?;
        }
        Some(Command::Due { limit }) => {
            commands::due::run(&app, limit, &cli.format, use_color)?;
        }
        Some(Command::Answer { kana, result }) => {
            let correct = matches!(result, AnswerArg::Correct);
            commands::answer::run(&mut app, &kana, correct, &cli.format, use_color)?;
        }
        Some(Command::Stats) => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Forgotten) => {
            commands::forgotten::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Chart { category }) => {
            commands::chart::run(&app, category, &cli.format, use_color)?;
        }
    }

    app.warn_if_unsaved();
    Ok(())
}
