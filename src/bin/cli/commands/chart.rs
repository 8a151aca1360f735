use anyhow::Result;

use kanamate_lib::catalog::{Kana, KanaCategory};
use kanamate_lib::progress::ProgressStore;

use crate::app::App;
use crate::render::terminal::{paint, percent, Color};
use crate::{CategoryArg, OutputFormat};

/// Kana per printed row
const ROW_WIDTH: usize = 5;

pub fn run(app: &App, category: Option<CategoryArg>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let catalog = app.trainer.catalog();
    let progress = app.trainer.progress();
    let categories: Vec<KanaCategory> = match category {
        Some(c) => vec![c.into()],
        None => KanaCategory::ALL.to_vec(),
    };

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = categories
                .iter()
                .map(|category| {
                    let kana: Vec<serde_json::Value> = catalog
                        .by_category(*category)
                        .into_iter()
                        .map(|k| {
                            serde_json::json!({
                                "kana": k,
                                "successRate": progress.get(k.id).map(|r| r.success_rate()),
                            })
                        })
                        .collect();
                    serde_json::json!({
                        "category": category.label(),
                        "kana": kana,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for category in &categories {
                println!("{}", paint(category.label(), Color::BOLD, use_color));
                let kana = catalog.by_category(*category);
                for row in kana.chunks(ROW_WIDTH) {
                    let cells: Vec<String> = row
                        .iter()
                        .map(|k| render_cell(k, progress, use_color))
                        .collect();
                    println!("  {}", cells.join("  "));
                }
                println!();
            }
        }
    }

    Ok(())
}

fn render_cell(kana: &Kana, progress: &ProgressStore, use_color: bool) -> String {
    let cell = format!("{} {} {:<4}", kana.hiragana, kana.katakana, kana.romaji);
    match progress.get(kana.id) {
        None => paint(&format!("{}     ", cell), Color::DIM, use_color),
        Some(record) => {
            let rate = record.success_rate();
            let color = if rate > 0.7 {
                Color::GREEN
            } else if rate >= 0.4 {
                Color::YELLOW
            } else {
                Color::RED
            };
            paint(&format!("{}{:>4} ", cell, percent(rate)), color, use_color)
        }
    }
}
