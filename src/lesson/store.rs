use serde::Deserialize;

use super::slide::{RawSlide, SlideRecord};
use super::LessonError;

/// Ordered, read-only slides of one lesson.
#[derive(Debug, Clone)]
pub struct SlideStore {
    title: String,
    slides: Vec<SlideRecord>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawLesson {
    pub title: String,
    pub slides: Vec<RawSlide>,
}

impl SlideStore {
    pub fn new(title: String, slides: Vec<SlideRecord>) -> Result<Self, LessonError> {
        if slides.is_empty() {
            return Err(LessonError::Empty);
        }

        Ok(Self { title, slides })
    }

    pub(super) fn from_raw(raw: RawLesson) -> Result<Self, LessonError> {
        let mut slugger = github_slugger::Slugger::default();

        let slides = raw
            .slides
            .into_iter()
            .map(|slide| {
                let slug = slugger.slug(&slide.title);
                slide.into_record(slug)
            })
            .collect::<Vec<SlideRecord>>();

        tracing::debug!(title = %raw.title, slides = slides.len(), "lesson loaded");
        Self::new(raw.title, slides)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn get(&self, index: usize) -> Option<&SlideRecord> {
        self.slides.get(index)
    }

    /// Slide at `index`, or the last slide past the end. A store is never
    /// empty, so there is always one.
    pub fn clamped(&self, index: usize) -> &SlideRecord {
        &self.slides[index.min(self.slides.len() - 1)]
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false for a constructed store, kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlideRecord> {
        self.slides.iter()
    }

    pub fn position_of_slug(&self, slug: &str) -> Option<usize> {
        self.slides.iter().position(|slide| slide.slug == slug)
    }
}
