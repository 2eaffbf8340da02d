mod export;
mod fetch;
mod item;
mod slide;
mod store;

use thiserror::Error;

pub use export::{serialize_lesson_meta, serialize_slide};
pub use fetch::{bundled_lesson, fetch_lesson, load_lesson, load_lesson_file, parse_lesson, Format};
pub use item::*;
pub use slide::*;
pub use store::SlideStore;

#[derive(Error, Debug)]
pub enum LessonError {
    #[error("failed to read lesson: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid lesson YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("invalid lesson JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Request(Box<ureq::Error>),

    #[error("Server returned an error: {status}")]
    ServerError { status: u16 },

    #[error("unsupported lesson format: {0}")]
    UnsupportedFormat(String),

    #[error("lesson has no slides")]
    Empty,
}
