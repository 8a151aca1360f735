use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::Utc;

use kanamate_lib::modes::ReviewMode;
use kanamate_lib::session::ReviewSession;

use crate::app::App;
use crate::render::terminal::{paint, relative_due, Color};

enum Reply {
    Knew,
    Forgot,
    Quit,
}

fn parse_reply(line: &str) -> Option<Reply> {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(Reply::Knew),
        "n" | "no" => Some(Reply::Forgot),
        "q" | "quit" => Some(Reply::Quit),
        _ => None,
    }
}

pub fn run(app: &mut App, mode: Option<ReviewMode>, limit: Option<usize>, use_color: bool) -> Result<()> {
    if let Some(mode) = mode {
        app.trainer.set_mode(mode);
    }
    if let Some(limit) = limit {
        app.trainer.set_batch_limit(limit.max(1));
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    let mut session = app.trainer.start_session();
    if session.is_empty() {
        println!("Nothing is due for review. Come back later.");
        return Ok(());
    }
    announce(&session, app.trainer.current_mode(), use_color);

    let mut answered = 0usize;
    let mut recalled = 0usize;

    loop {
        let Some(kana) = session.current().cloned() else {
            // Batch used up: start the next one
            session = app.trainer.start_session();
            if session.is_empty() {
                println!("All caught up. Nothing else is due.");
                break;
            }
            announce(&session, app.trainer.current_mode(), use_color);
            continue;
        };

        let progress = session.progress();
        println!(
            "\n[{}/{}] {}",
            progress.answered + 1,
            progress.total,
            paint(&kana.romaji, Color::BOLD, use_color)
        );
        print!("Do you know it? [y]es / [n]o / [q]uit: ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;

        match parse_reply(&line) {
            Some(Reply::Knew) => {
                let Some(outcome) = app.trainer.answer(&mut session, true) else {
                    continue;
                };
                answered += 1;
                recalled += 1;
                println!(
                    "  {}  {} {}  next review {}",
                    paint("✓", Color::GREEN, use_color),
                    outcome.kana.hiragana,
                    outcome.kana.katakana,
                    relative_due(outcome.record.next_review_at, Utc::now())
                );
            }
            Some(Reply::Forgot) => {
                let Some(outcome) = app.trainer.answer(&mut session, false) else {
                    continue;
                };
                answered += 1;
                println!(
                    "  {}  {} {}  difficulty {:.1}",
                    paint("✗", Color::RED, use_color),
                    paint(&outcome.kana.hiragana, Color::BOLD, use_color),
                    paint(&outcome.kana.katakana, Color::BOLD, use_color),
                    outcome.record.difficulty
                );
                session.advance();
            }
            Some(Reply::Quit) => break,
            None => println!("Please answer y, n or q."),
        }
    }

    if answered > 0 {
        println!("\nReviewed {} kana, recalled {}.", answered, recalled);
    }
    Ok(())
}

fn announce(session: &ReviewSession, mode: ReviewMode, use_color: bool) {
    let header = format!("{} review: {} kana", mode, session.batch().len());
    println!("{}", paint(&header, Color::CYAN, use_color));
}
