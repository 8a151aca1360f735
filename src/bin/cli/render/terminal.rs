use chrono::{DateTime, Utc};

use kanamate_lib::progress::algorithm::format_interval;
use kanamate_lib::progress::ForgetSeverity;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Wrap `text` in a color code when colors are on
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub fn severity_marker(severity: ForgetSeverity, use_color: bool) -> String {
    let (label, color) = match severity {
        ForgetSeverity::High => ("high", Color::RED),
        ForgetSeverity::Medium => ("medium", Color::YELLOW),
        ForgetSeverity::Low => ("low", Color::GREEN),
    };
    paint(label, color, use_color)
}

pub fn percent(rate: f64) -> String {
    format!("{:.0}%", rate * 100.0)
}

/// "in 12h", "now", ...
pub fn relative_due(next_review_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = next_review_at - now;
    match format_interval(remaining).as_str() {
        "now" => "now".to_string(),
        other => format!("in {}", other),
    }
}
