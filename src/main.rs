use std::env;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use lesson_deck::command::{Command, HELP};
use lesson_deck::media::PrefixResolver;
use lesson_deck::render::{render_session, BOLD, DIM, RESET};
use lesson_deck::widget::Feedback;
use lesson_deck::Session;
use tracing_subscriber::EnvFilter;

const CLEAR: &str = "\x1b[2J\x1b[H";

pub struct Config {
    /// path or URL; the bundled lesson when unset
    pub source: Option<String>,
    pub media_base: String,
}

impl Config {
    pub fn new(source: Option<String>, media_base: &str) -> Self {
        Self {
            source,
            media_base: media_base.to_string(),
        }
    }
}

fn parse_config(mut args: impl Iterator<Item = String>) -> anyhow::Result<Config> {
    let source = args.next().or_else(|| env::var("LESSON_SOURCE").ok());
    let media_base = args
        .next()
        .or_else(|| env::var("LESSON_MEDIA_BASE").ok())
        .unwrap_or_default();

    if let Some(extra) = args.next() {
        anyhow::bail!("unexpected argument: {}", extra);
    }

    Ok(Config::new(source, &media_base))
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = match parse_config(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Usage: lesson-deck [lesson.yaml|lesson.json|url] [media_base]");
            return Err(e);
        }
    };

    let store = lesson_deck::lesson::load_lesson(config.source.as_deref()).context(format!(
        "failed to load lesson from {}",
        config.source.as_deref().unwrap_or("the bundled lesson")
    ))?;
    let resolver = PrefixResolver::new(&config.media_base);
    let mut session = Session::new(store, rand::thread_rng());

    let lines = spawn_line_reader();
    let mut stdout = io::stdout();
    let mut notice = String::new();

    loop {
        session.tick(Instant::now());
        write!(stdout, "{CLEAR}{}", render_session(&session, &resolver))?;
        if !notice.is_empty() {
            writeln!(stdout, "\n{DIM}{}{RESET}", notice)?;
        }
        write!(stdout, "\n{BOLD}>{RESET} ")?;
        stdout.flush().context("failed to flush stdout")?;

        let line = match wait_for_input(&lines, session.next_timer(Instant::now()))? {
            Input::Line(line) => line,
            Input::TimerDue => continue,
            Input::Closed => break,
        };

        notice = match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Next) => moved(session.advance()),
            Ok(Command::Prev) => moved(session.retreat()),
            Ok(Command::Goto(index)) => moved(session.jump_to(index)),
            Ok(Command::GotoSlug(slug)) => moved(session.jump_to_slug(&slug)),
            Ok(Command::ToggleOverlay) => {
                if session.toggle_overlay() {
                    String::new()
                } else {
                    "no intel on this slide".to_string()
                }
            }
            Ok(Command::Act(action)) => match session.apply(action) {
                Feedback::Correct => "correct!".to_string(),
                Feedback::Incorrect => "not quite".to_string(),
                Feedback::Changed => String::new(),
                Feedback::Ignored => "nothing to do".to_string(),
            },
            Err(e) => format!("{}\n\n{}", e, HELP),
        };
    }

    println!();
    Ok(())
}

fn moved(moved: bool) -> String {
    if moved {
        String::new()
    } else {
        "already there".to_string()
    }
}

enum Input {
    Line(String),
    /// a widget timer needs a tick and a redraw
    TimerDue,
    Closed,
}

/// Reads stdin on its own thread so the presenter can wake up for timers.
fn spawn_line_reader() -> Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn wait_for_input(
    lines: &Receiver<io::Result<String>>,
    timer: Option<Duration>,
) -> anyhow::Result<Input> {
    let received = match timer {
        Some(due_in) => match lines.recv_timeout(due_in) {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => return Ok(Input::TimerDue),
            Err(RecvTimeoutError::Disconnected) => return Ok(Input::Closed),
        },
        None => match lines.recv() {
            Ok(line) => line,
            Err(_) => return Ok(Input::Closed),
        },
    };

    Ok(Input::Line(received.context("failed to read input")?))
}
