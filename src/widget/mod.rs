//! Interactive state for the slide on screen.
//!
//! [`dispatch`] builds a fresh [`Widget`] from a slide record when the slide
//! is mounted; the widget is dropped, with all of its answers, when the deck
//! moves elsewhere. Every interaction goes through [`Widget::apply`], which
//! never fails: actions that make no sense for the widget, or that target a
//! locked or unknown item, come back as [`Feedback::Ignored`].

pub mod accordion;
pub mod checklist;
pub mod debrief;
pub mod fill_in;
pub mod imperatives;
pub mod matching;
pub mod multiple_choice;
pub mod poll;
pub mod reading;
pub mod scramble;
pub mod true_false;

use std::time::{Duration, Instant};

use rand::Rng;

use crate::highlight::HighlightSpan;
use crate::lesson::{IceBreakerActivity, SlideBody, SlideRecord};

pub use accordion::Accordion;
pub use checklist::{Checklist, EntryStatus};
pub use debrief::DebriefBoard;
pub use fill_in::FillIn;
pub use imperatives::{ImperativesBoard, Mode};
pub use matching::{MatchOutcome, MatchingBoard};
pub use multiple_choice::{MultipleChoiceQuiz, OptionMark};
pub use poll::Poll;
pub use reading::{Paragraph, ReadingPanel, Token};
pub use scramble::{Direction, ScrambleBoard};
pub use true_false::TrueFalseQuiz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Unanswered,
    Answered { correct: bool },
}

/// What an action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// nothing changed
    Ignored,
    Changed,
    Correct,
    Incorrect,
}

impl Feedback {
    fn graded(outcome: Option<bool>) -> Self {
        match outcome {
            Some(true) => Feedback::Correct,
            Some(false) => Feedback::Incorrect,
            None => Feedback::Ignored,
        }
    }

    fn matched(outcome: Option<MatchOutcome>) -> Self {
        match outcome {
            Some(MatchOutcome::Matched { .. }) => Feedback::Correct,
            Some(MatchOutcome::Mismatch) => Feedback::Incorrect,
            None => Feedback::Ignored,
        }
    }

    fn changed(changed: bool) -> Self {
        if changed {
            Feedback::Changed
        } else {
            Feedback::Ignored
        }
    }
}

/// An answer as the learner gave it. Letters are read by the widget: `t`/`f`
/// on a true/false statement, `a`, `b`, ... on a multiple choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Bool(bool),
    /// zero-based option
    Index(usize),
    Letter(char),
}

impl Choice {
    fn as_bool(self) -> Option<bool> {
        match self {
            Choice::Bool(b) => Some(b),
            Choice::Letter('t') => Some(true),
            Choice::Letter('f') => Some(false),
            Choice::Index(_) | Choice::Letter(_) => None,
        }
    }

    fn as_index(self) -> Option<usize> {
        match self {
            Choice::Index(i) => Some(i),
            Choice::Letter(c @ 'a'..='z') => Some(c as usize - 'a' as usize),
            Choice::Bool(_) | Choice::Letter(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Answer { id: u32, choice: Choice },
    SelectLeft(u32),
    SelectRight(u32),
    /// right item by display position, zero-based
    SelectRightAt(usize),
    MoveToken {
        id: u32,
        position: usize,
        direction: Direction,
    },
    CheckSentence(u32),
    Toggle(u32),
    Verify,
    Reset,
    ExtensionAnswer(String),
    Open(u32),
    Lookup(String),
    DismissWord,
    ToggleFactSheet,
    Pick(usize),
    Fill { id: u32, text: String },
    CheckAnswers,
    RevealSign(usize),
    RevealQuiz(u32),
}

#[derive(Debug)]
pub enum Widget {
    /// content only, nothing to interact with
    Static,
    Poll(Poll),
    Reading(ReadingPanel),
    TrueFalse(TrueFalseQuiz),
    MultipleChoice(MultipleChoiceQuiz),
    FillIn(FillIn),
    Matching(MatchingBoard),
    Checklist(Checklist),
    Accordion(Accordion),
    Scramble(ScrambleBoard),
    Imperatives(ImperativesBoard),
    Debrief(DebriefBoard),
    Placeholder { tag: String },
}

/// Mounts the widget for a slide. Shuffles draw from `rng`; timers start at
/// `now`.
pub fn dispatch<R: Rng + ?Sized>(record: &SlideRecord, rng: &mut R, now: Instant) -> Widget {
    let widget = match &record.body {
        SlideBody::Cover(_)
        | SlideBody::Objectives(_)
        | SlideBody::Speaking(_)
        | SlideBody::Drill(_)
        | SlideBody::Media(_) => Widget::Static,
        SlideBody::IceBreaker(ice) => match &ice.activity {
            IceBreakerActivity::Poll { options } => Widget::Poll(Poll::new(options.clone())),
            IceBreakerActivity::ExternalLink { .. } => Widget::Static,
        },
        SlideBody::Reading(reading) => Widget::Reading(ReadingPanel::new(reading.clone())),
        SlideBody::ComprehensionTf(c) => Widget::TrueFalse(TrueFalseQuiz::new(c.questions.clone())),
        SlideBody::ComprehensionMc(c) => {
            Widget::MultipleChoice(MultipleChoiceQuiz::new(c.questions.clone()))
        }
        SlideBody::Grammar(g) => Widget::FillIn(FillIn::new(g.items.clone())),
        SlideBody::Matching(m) => Widget::Matching(MatchingBoard::new(m.pairs.clone(), rng)),
        SlideBody::Checklist(c) => Widget::Checklist(Checklist::new(
            c.items.clone(),
            c.extension_question.clone(),
        )),
        SlideBody::Qa(c) => Widget::Accordion(Accordion::new(c.questions.clone())),
        SlideBody::Scramble(s) => Widget::Scramble(ScrambleBoard::new(s.items.clone(), rng)),
        SlideBody::Imperatives(i) => Widget::Imperatives(ImperativesBoard::new(i.clone())),
        SlideBody::Debrief(d) => Widget::Debrief(DebriefBoard::new(d.checklist.clone(), now)),
        SlideBody::Unsupported { tag } => Widget::Placeholder { tag: tag.clone() },
    };

    tracing::debug!(slide = record.id, widget = widget.kind(), "widget mounted");
    widget
}

impl Widget {
    pub fn kind(&self) -> &'static str {
        match self {
            Widget::Static => "static",
            Widget::Poll(_) => "poll",
            Widget::Reading(_) => "reading",
            Widget::TrueFalse(_) => "true_false",
            Widget::MultipleChoice(_) => "multiple_choice",
            Widget::FillIn(_) => "fill_in",
            Widget::Matching(_) => "matching",
            Widget::Checklist(_) => "checklist",
            Widget::Accordion(_) => "accordion",
            Widget::Scramble(_) => "scramble",
            Widget::Imperatives(_) => "imperatives",
            Widget::Debrief(_) => "debrief",
            Widget::Placeholder { .. } => "placeholder",
        }
    }

    pub fn apply(&mut self, action: Action) -> Feedback {
        let feedback = match (self, action) {
            (Widget::TrueFalse(quiz), Action::Answer { id, choice }) => match choice.as_bool() {
                Some(picked) => Feedback::graded(quiz.answer(id, picked)),
                None => Feedback::Ignored,
            },
            (Widget::MultipleChoice(quiz), Action::Answer { id, choice }) => {
                match choice.as_index() {
                    Some(option) => Feedback::graded(quiz.choose(id, option)),
                    None => Feedback::Ignored,
                }
            }
            (Widget::Matching(board), Action::SelectLeft(id)) => {
                Feedback::changed(board.select_left(id))
            }
            (Widget::Matching(board), Action::SelectRight(id)) => {
                Feedback::matched(board.select_right(id))
            }
            (Widget::Matching(board), Action::SelectRightAt(position)) => Feedback::matched(
                board.right_at(position).and_then(|id| board.select_right(id)),
            ),
            (
                Widget::Scramble(board),
                Action::MoveToken {
                    id,
                    position,
                    direction,
                },
            ) => Feedback::changed(board.move_token(id, position, direction)),
            (Widget::Scramble(board), Action::CheckSentence(id)) => {
                Feedback::graded(board.check(id))
            }
            (Widget::Checklist(list), Action::Toggle(id)) => Feedback::changed(list.toggle(id)),
            (Widget::Checklist(list), Action::Verify) => Feedback::changed(list.verify()),
            (Widget::Checklist(list), Action::Reset) => {
                list.reset();
                Feedback::Changed
            }
            (Widget::Checklist(list), Action::ExtensionAnswer(text)) => {
                Feedback::changed(list.set_extension_answer(&text))
            }
            (Widget::Accordion(accordion), Action::Open(id)) => {
                Feedback::changed(accordion.toggle(id))
            }
            (Widget::Reading(panel), Action::Lookup(word)) => Feedback::changed(panel.look_up(&word)),
            (Widget::Reading(panel), Action::DismissWord) => Feedback::changed(panel.dismiss_word()),
            (Widget::Reading(panel), Action::ToggleFactSheet) => {
                Feedback::changed(panel.toggle_fact_sheet())
            }
            (Widget::Poll(poll), Action::Pick(index)) => Feedback::changed(poll.pick(index)),
            (Widget::FillIn(quiz), Action::Fill { id, text }) => Feedback::changed(quiz.fill(id, &text)),
            (Widget::FillIn(quiz), Action::CheckAnswers) => Feedback::changed(quiz.check()),
            (Widget::Imperatives(board), Action::RevealSign(index)) => {
                Feedback::changed(board.reveal_sign(index))
            }
            (Widget::Imperatives(board), Action::RevealQuiz(id)) => {
                Feedback::changed(board.reveal_quiz(id))
            }
            _ => Feedback::Ignored,
        };

        tracing::trace!(?feedback, "action applied");
        feedback
    }

    /// Spans for the reference overlay, derived from the current answers.
    pub fn highlights(&self) -> Vec<HighlightSpan> {
        match self {
            Widget::TrueFalse(quiz) => quiz.highlights(),
            Widget::MultipleChoice(quiz) => quiz.highlights(),
            Widget::Matching(board) => board.highlights(),
            Widget::Checklist(list) => list.highlights(),
            Widget::Accordion(accordion) => accordion.highlights(),
            _ => Vec::new(),
        }
    }

    /// Time until the next pending timer fires, if any.
    pub fn next_timer(&self, now: Instant) -> Option<Duration> {
        match self {
            Widget::Debrief(board) => board.stamp_due_in(now),
            _ => None,
        }
    }

    /// Advances timers. Returns true if the widget changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self {
            Widget::Debrief(board) => board.tick(now),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::{Comprehension, MatchingPair, QuestionMc, QuestionTf};
    use rand::{rngs::StdRng, SeedableRng};

    fn record(body: SlideBody) -> SlideRecord {
        SlideRecord {
            id: 1,
            title: "Test".into(),
            subtitle: String::new(),
            slug: "test".into(),
            body,
        }
    }

    fn mount(body: SlideBody) -> Widget {
        let mut rng = StdRng::seed_from_u64(1);
        dispatch(&record(body), &mut rng, Instant::now())
    }

    #[test]
    fn unsupported_tag_mounts_placeholder() {
        let widget = mount(SlideBody::Unsupported {
            tag: "grammar_bank".into(),
        });
        assert!(matches!(widget, Widget::Placeholder { ref tag } if tag == "grammar_bank"));
    }

    #[test]
    fn letters_answer_true_false() {
        let mut widget = mount(SlideBody::ComprehensionTf(Comprehension {
            reference_text: None,
            questions: vec![QuestionTf {
                id: 2,
                statement: "It is hot.".into(),
                is_true: false,
                explanation: None,
                context_highlight: None,
            }],
        }));
        assert_eq!(
            widget.apply(Action::Answer { id: 2, choice: Choice::Letter('x') }),
            Feedback::Ignored
        );
        assert_eq!(
            widget.apply(Action::Answer { id: 2, choice: Choice::Letter('f') }),
            Feedback::Correct
        );
        assert_eq!(
            widget.apply(Action::Answer { id: 2, choice: Choice::Bool(true) }),
            Feedback::Ignored
        );
    }

    #[test]
    fn letters_pick_multiple_choice_options() {
        let mut widget = mount(SlideBody::ComprehensionMc(Comprehension {
            reference_text: None,
            questions: vec![QuestionMc {
                id: 1,
                question: "?".into(),
                options: vec!["a".into(), "b".into(), "c".into()],
                correct_index: 2,
                explanation: None,
                icon_type: Default::default(),
                context_highlight: None,
            }],
        }));
        assert_eq!(
            widget.apply(Action::Answer { id: 1, choice: Choice::Letter('c') }),
            Feedback::Correct
        );
    }

    #[test]
    fn right_items_are_picked_by_display_position() {
        let pairs = (1..=3)
            .map(|id| MatchingPair {
                id,
                left: format!("left {id}"),
                right: format!("right {id}"),
                context_highlight: None,
            })
            .collect();
        let mut widget =
            Widget::Matching(MatchingBoard::with_right_order(pairs, vec![2, 0, 1]));

        widget.apply(Action::SelectLeft(3));
        assert_eq!(widget.apply(Action::SelectRightAt(0)), Feedback::Correct);
        widget.apply(Action::SelectLeft(1));
        assert_eq!(widget.apply(Action::SelectRightAt(2)), Feedback::Incorrect);
        widget.apply(Action::SelectLeft(1));
        assert_eq!(widget.apply(Action::SelectRightAt(9)), Feedback::Ignored);
    }

    #[test]
    fn actions_for_other_widgets_are_ignored() {
        let mut widget = mount(SlideBody::Cover(Default::default()));
        assert_eq!(widget.apply(Action::Verify), Feedback::Ignored);
        assert!(widget.highlights().is_empty());
        assert!(!widget.tick(Instant::now()));
        assert_eq!(widget.next_timer(Instant::now()), None);
    }
}
