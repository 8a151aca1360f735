use anyhow::Result;
use chrono::Utc;

use crate::app::App;
use crate::render::terminal::{paint, percent, relative_due, Color};
use crate::OutputFormat;

pub fn run(app: &mut App, query: &str, correct: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let kana = app.find_kana(query)?;

    let record = if correct {
        app.trainer.record_correct(kana.id)
    } else {
        app.trainer.record_incorrect(kana.id)
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "kana": kana,
                "correct": correct,
                "record": record,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let mark = if correct {
                paint("✓", Color::GREEN, use_color)
            } else {
                paint("✗", Color::RED, use_color)
            };
            println!("{} {} {} {}", mark, kana.romaji, kana.hiragana, kana.katakana);
            println!(
                "  {} correct, {} missed ({}), difficulty {:.1}, next review {}",
                record.correct_count,
                record.incorrect_count,
                percent(record.success_rate()),
                record.difficulty,
                relative_due(record.next_review_at, Utc::now())
            );
        }
    }

    Ok(())
}
