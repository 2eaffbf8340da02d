use std::io::Write;
use std::{
    env,
    fs::{self, OpenOptions},
};

use anyhow::Context;
use lesson_deck::lesson::{load_lesson, serialize_lesson_meta, serialize_slide};
use lesson_deck::{SlideRecord, SlideStore};
use tracing_subscriber::EnvFilter;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const DEFAULT_OUTPUT_DIR: &str = "output/lesson";

pub struct Config {
    pub source: Option<String>,
    pub output_dir: String,
}

impl Config {
    pub fn new(source: Option<String>, output_dir: &str) -> Self {
        Self {
            source,
            output_dir: output_dir.to_string(),
        }
    }
}

fn parse_config(mut args: impl Iterator<Item = String>) -> anyhow::Result<Config> {
    let source = args
        .next()
        .filter(|s| s != "-")
        .or_else(|| env::var("LESSON_SOURCE").ok());
    let output_dir = args.next().unwrap_or(DEFAULT_OUTPUT_DIR.to_string());

    Ok(Config::new(source, &output_dir))
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match parse_config(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Usage: lesson_outline [lesson|-] [output_dir]");
            return Err(e);
        }
    };

    let store = load_lesson(config.source.as_deref()).context(format!(
        "could not load lesson from {}",
        config.source.as_deref().unwrap_or("the bundled lesson")
    ))?;

    create_output_dir(&config.output_dir).context("failed to create output directory")?;

    let meta = create_lesson_metadata(&store, &config.output_dir)
        .context("failed to create lesson metadata")?;

    let slides: Vec<&SlideRecord> = store.iter().collect();
    for (idx, slide) in slides.iter().enumerate() {
        let next_slug = slides.get(idx + 1).map(|next| next.slug.as_str());
        if let Err(e) = create_slide(slide, idx, &config.output_dir, next_slug) {
            eprintln!("Error writing slide {}: {}", slide.slug, e);
            return Err(e);
        }
    }

    println!("Loaded lesson metadata\n");
    println!("---");
    println!("{}", meta);
    println!("---\n");

    println!(
        "created {BOLD}{}{RESET} slides in {BOLD}{}{RESET}",
        slides.len(),
        &config.output_dir
    );

    Ok(())
}

fn create_lesson_metadata(store: &SlideStore, output_dir: &str) -> anyhow::Result<String> {
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(format!("{}/lesson.yaml", output_dir))
        .context("failed to open file for lesson.yaml")?;

    let content = serialize_lesson_meta(store).context("failed to serialize lesson metadata")?;
    write!(file, "{}", content).context("failed to write lesson metadata")?;

    Ok(content)
}

fn create_slide(
    slide: &SlideRecord,
    order: usize,
    output_dir: &str,
    next_slug: Option<&str>,
) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(format!("{}/{:02}-{}.md", output_dir, order + 1, slide.slug))
        .context(format!("failed to open file for {}", slide.slug))?;

    let content = serialize_slide(slide, order, next_slug).context("failed to serialize slide")?;
    write!(file, "{}", content).context("failed to write slide")?;

    Ok(())
}

fn create_output_dir(output_dir: &str) -> anyhow::Result<()> {
    if fs::metadata(output_dir).is_ok() {
        fs::remove_dir_all(output_dir)?;
    }

    fs::create_dir_all(output_dir)?;
    Ok(())
}
