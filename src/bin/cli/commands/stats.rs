use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{paint, percent, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stats = app.trainer.statistics();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "total": stats.total,
                "studied": stats.studied,
                "averageSuccessRate": stats.average_success_rate,
                "mode": app.trainer.current_mode(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint("Progress", Color::BOLD, use_color));
            println!("  Studied:      {} / {}", stats.studied, stats.total);
            println!("  Success rate: {}", percent(stats.average_success_rate));
        }
    }

    Ok(())
}
