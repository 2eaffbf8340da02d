use std::{fs, path::Path};

use super::store::{RawLesson, SlideStore};
use super::LessonError;

const BUNDLED_LESSON: &str = include_str!("../../lessons/uludag_springwatch.yaml");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    fn from_extension(location: &str) -> Option<Self> {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Some(Format::Yaml),
            Some("json") => Some(Format::Json),
            _ => None,
        }
    }
}

pub fn parse_lesson(input: &str, format: Format) -> Result<SlideStore, LessonError> {
    let raw: RawLesson = match format {
        Format::Yaml => serde_yaml_ng::from_str(input)?,
        Format::Json => serde_json::from_str(input)?,
    };
    SlideStore::from_raw(raw)
}

/// The lesson compiled into the crate.
pub fn bundled_lesson() -> Result<SlideStore, LessonError> {
    parse_lesson(BUNDLED_LESSON, Format::Yaml)
}

pub fn load_lesson_file(path: &Path) -> Result<SlideStore, LessonError> {
    let location = path.to_string_lossy();
    let format = Format::from_extension(&location)
        .ok_or_else(|| LessonError::UnsupportedFormat(location.to_string()))?;

    let input = fs::read_to_string(path)?;
    parse_lesson(&input, format)
}

/// Fetches a lesson document over HTTP. JSON unless the URL ends in `.yaml`.
pub fn fetch_lesson(url: &str) -> Result<SlideStore, LessonError> {
    let response = ureq::get(url).call().map_err(|e| match e {
        ureq::Error::Status(code, _) => LessonError::ServerError { status: code },
        other => LessonError::Request(Box::new(other)),
    })?;

    let body = response.into_string()?;
    let format = Format::from_extension(url).unwrap_or(Format::Json);
    tracing::debug!(url, ?format, bytes = body.len(), "fetched lesson");

    parse_lesson(&body, format)
}

/// Loads from a URL, a file path, or the bundled lesson when no source is set.
pub fn load_lesson(source: Option<&str>) -> Result<SlideStore, LessonError> {
    match source {
        None => bundled_lesson(),
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            fetch_lesson(url)
        }
        Some(path) => load_lesson_file(Path::new(path)),
    }
}
