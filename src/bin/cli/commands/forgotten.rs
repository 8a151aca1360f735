use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{percent, severity_marker};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let forgotten = app.trainer.forgotten();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&forgotten)?);
        }
        OutputFormat::Plain => {
            if forgotten.is_empty() {
                println!("Nothing forgotten yet.");
                return Ok(());
            }

            println!("{:<6} {:<10} {:>6} {:>8}  Level", "Romaji", "Kana", "Missed", "Success");
            println!("{}", "\u{2500}".repeat(42));

            for item in &forgotten {
                let glyphs = format!("{} {}", item.kana.hiragana, item.kana.katakana);
                println!(
                    "{:<6} {:<10} {:>6} {:>8}  {}",
                    item.kana.romaji,
                    glyphs,
                    item.record.incorrect_count,
                    percent(item.record.success_rate()),
                    severity_marker(item.severity, use_color)
                );
            }

            println!("\n{} kana to work on", forgotten.len());
        }
    }

    Ok(())
}
