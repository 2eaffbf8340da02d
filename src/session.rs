use std::time::{Duration, Instant};

use rand::Rng;

use crate::deck::{DeckCursor, Key};
use crate::highlight::{self, Segment};
use crate::lesson::{SlideRecord, SlideStore};
use crate::widget::{self, Action, Feedback, Widget};

/// One presentation of a lesson: where the deck is, and the live widget of
/// the slide on screen.
#[derive(Debug)]
pub struct Session<R> {
    store: SlideStore,
    cursor: DeckCursor,
    widget: Widget,
    overlay_open: bool,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(store: SlideStore, mut rng: R) -> Self {
        let cursor = DeckCursor::new(store.len());
        let widget = widget::dispatch(store.clamped(0), &mut rng, Instant::now());

        Self {
            store,
            cursor,
            widget,
            overlay_open: false,
            rng,
        }
    }

    pub fn store(&self) -> &SlideStore {
        &self.store
    }

    pub fn cursor(&self) -> &DeckCursor {
        &self.cursor
    }

    pub fn current(&self) -> &SlideRecord {
        self.store.clamped(self.cursor.current_index())
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn advance(&mut self) -> bool {
        let moved = self.cursor.advance();
        self.remount_if(moved)
    }

    pub fn retreat(&mut self) -> bool {
        let moved = self.cursor.retreat();
        self.remount_if(moved)
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        let moved = self.cursor.jump_to(index);
        self.remount_if(moved)
    }

    /// Unknown slugs are ignored.
    pub fn jump_to_slug(&mut self, slug: &str) -> bool {
        match self.store.position_of_slug(slug) {
            Some(index) => self.jump_to(index),
            None => {
                tracing::debug!(slug, "no slide with this slug");
                false
            }
        }
    }

    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Left => self.retreat(),
            Key::Right => self.advance(),
            Key::Other => false,
        }
    }

    pub fn apply(&mut self, action: Action) -> Feedback {
        self.widget.apply(action)
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.widget.tick(now)
    }

    /// How long the presenter may wait for input before a timer needs a tick.
    pub fn next_timer(&self, now: Instant) -> Option<Duration> {
        self.widget.next_timer(now)
    }

    /// Shows or hides the reference overlay. Only slides with a reference
    /// passage have one.
    pub fn toggle_overlay(&mut self) -> bool {
        if self.current().body.reference_text().is_none() {
            return false;
        }
        self.overlay_open = !self.overlay_open;
        true
    }

    pub fn is_overlay_open(&self) -> bool {
        self.overlay_open
    }

    /// The highlighted reference passage, recomputed from the current answers.
    pub fn overlay(&self) -> Option<Vec<Segment<'_>>> {
        if !self.overlay_open {
            return None;
        }
        let passage = self.current().body.reference_text()?;
        Some(highlight::apply(passage, &self.widget.highlights()))
    }

    fn remount_if(&mut self, moved: bool) -> bool {
        if moved {
            let record = self.store.clamped(self.cursor.current_index());
            tracing::debug!(index = self.cursor.current_index(), slug = %record.slug, "slide changed");
            self.widget = widget::dispatch(record, &mut self.rng, Instant::now());
            self.overlay_open = false;
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::{parse_lesson, Format};
    use crate::widget::Choice;
    use rand::{rngs::StdRng, SeedableRng};

    const LESSON: &str = r#"
title: Session test
slides:
  - id: 0
    type: cover
    title: Start
  - id: 1
    type: comprehension_tf
    title: Check
    content:
      reference_text: It was cold and cloudy. It was cold.
      questions:
        - id: 1
          statement: It was warm.
          is_true: false
          context_highlight: cold and cloudy
  - id: 2
    type: debrief
    title: Debrief
    content:
      checklist:
        - text: I can give advice.
          reflection: Give one example.
"#;

    fn session() -> Session<StdRng> {
        let store = parse_lesson(LESSON, Format::Yaml).unwrap();
        Session::new(store, StdRng::seed_from_u64(5))
    }

    #[test]
    fn moving_remounts_and_discards_answers() {
        let mut session = session();
        session.advance();
        assert_eq!(
            session.apply(Action::Answer { id: 1, choice: Choice::Bool(false) }),
            Feedback::Correct
        );
        session.retreat();
        session.advance();
        assert_eq!(
            session.apply(Action::Answer { id: 1, choice: Choice::Bool(true) }),
            Feedback::Incorrect
        );
    }

    #[test]
    fn jumping_to_the_current_slide_keeps_state() {
        let mut session = session();
        session.jump_to(1);
        session.apply(Action::Answer { id: 1, choice: Choice::Bool(true) });
        assert!(!session.jump_to(1));
        assert!(!session.jump_to_slug("check"));
        assert_eq!(
            session.apply(Action::Answer { id: 1, choice: Choice::Bool(false) }),
            Feedback::Ignored
        );
    }

    #[test]
    fn overlay_only_on_slides_with_a_passage() {
        let mut session = session();
        assert!(!session.toggle_overlay());
        assert!(session.overlay().is_none());

        session.jump_to_slug("check");
        assert!(session.toggle_overlay());
        let plain = session.overlay().unwrap();
        assert!(plain.iter().all(|s| s.mark.is_none()));

        session.apply(Action::Answer { id: 1, choice: Choice::Bool(false) });
        let marked: Vec<&str> = session
            .overlay()
            .unwrap()
            .iter()
            .filter(|s| s.mark.is_some())
            .map(|s| s.text)
            .collect();
        assert_eq!(marked, vec!["cold and cloudy"]);

        session.advance();
        assert!(!session.is_overlay_open());
    }

    #[test]
    fn arrow_keys_drive_the_deck() {
        let mut session = session();
        assert!(session.handle_key(Key::Right));
        assert!(session.handle_key(Key::Left));
        assert!(!session.handle_key(Key::Left));
        assert!(!session.handle_key(Key::Other));
        assert_eq!(session.cursor().current_index(), 0);
    }

    #[test]
    fn debrief_stamp_fires_after_mount() {
        let mut session = session();
        session.jump_to(2);
        assert!(session.tick(Instant::now() + Duration::from_secs(2)));
        assert!(!session.tick(Instant::now() + Duration::from_secs(3)));
    }

    #[test]
    fn only_a_pending_stamp_asks_for_a_wake_up() {
        let mut session = session();
        assert_eq!(session.next_timer(Instant::now()), None);

        session.jump_to(2);
        let due_in = session.next_timer(Instant::now()).unwrap();
        assert!(due_in <= Duration::from_millis(1500));

        session.tick(Instant::now() + Duration::from_secs(2));
        assert_eq!(session.next_timer(Instant::now()), None);
    }
}
