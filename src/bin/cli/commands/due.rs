use anyhow::Result;
use chrono::Utc;

use crate::app::App;
use crate::render::terminal::{paint, percent, Color};
use crate::OutputFormat;

pub fn run(app: &App, limit: usize, format: &OutputFormat, use_color: bool) -> Result<()> {
    let trainer = &app.trainer;
    let due = trainer.due_batch(trainer.catalog().all(), limit);
    let progress = trainer.progress();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = due
                .iter()
                .map(|kana| {
                    serde_json::json!({
                        "kana": kana,
                        "progress": progress.get(kana.id),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing is due for review.");
                return Ok(());
            }

            let now = Utc::now();
            println!("{:<6} {:<5} {:<12} {:>10} {:>8}", "Romaji", "Kana", "Category", "Difficulty", "Success");
            println!("{}", "\u{2500}".repeat(45));

            for kana in &due {
                match progress.get(kana.id) {
                    Some(record) => {
                        let overdue = now - record.next_review_at;
                        let line = format!(
                            "{:<6} {:<5} {:<12} {:>10.1} {:>8}",
                            kana.romaji,
                            kana.hiragana,
                            kana.category.label(),
                            record.difficulty,
                            percent(record.success_rate())
                        );
                        if overdue.num_days() >= 1 {
                            println!("{}", paint(&line, Color::YELLOW, use_color));
                        } else {
                            println!("{}", line);
                        }
                    }
                    None => {
                        let line = format!(
                            "{:<6} {:<5} {:<12} {:>10} {:>8}",
                            kana.romaji,
                            kana.hiragana,
                            kana.category.label(),
                            "new",
                            "-"
                        );
                        println!("{}", paint(&line, Color::DIM, use_color));
                    }
                }
            }

            println!("\n{} kana due", due.len());
        }
    }

    Ok(())
}
