use std::collections::BTreeSet;

use crate::lesson::{GrammarQuizItem, Imperatives};

const GAP: &str = "_____";

/// The quiz sentence with its gap replaced by `[ correct option ]`.
pub fn fill_gap(item: &GrammarQuizItem) -> String {
    match item.options.get(item.correct_index) {
        Some(answer) => item.question.replacen(GAP, &format!("[ {} ]", answer), 1),
        None => item.question.clone(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// grammar briefing with a reveal quiz
    Theory,
    /// word bank and signs to reveal
    Practice,
}

#[derive(Debug, Clone)]
pub struct ImperativesBoard {
    content: Imperatives,
    revealed_quiz: BTreeSet<u32>,
    revealed_signs: BTreeSet<usize>,
}

impl ImperativesBoard {
    pub fn new(content: Imperatives) -> Self {
        Self {
            content,
            revealed_quiz: BTreeSet::new(),
            revealed_signs: BTreeSet::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        if self.content.signs.is_empty() {
            Mode::Theory
        } else {
            Mode::Practice
        }
    }

    pub fn content(&self) -> &Imperatives {
        &self.content
    }

    /// Reveals a quiz item's answer. One-way.
    pub fn reveal_quiz(&mut self, id: u32) -> bool {
        if !self.content.quiz.iter().any(|q| q.id == id) {
            return false;
        }
        self.revealed_quiz.insert(id)
    }

    pub fn is_quiz_revealed(&self, id: u32) -> bool {
        self.revealed_quiz.contains(&id)
    }

    /// Sentence as displayed: gapped until revealed.
    pub fn quiz_sentence(&self, item: &GrammarQuizItem) -> String {
        if self.is_quiz_revealed(item.id) {
            fill_gap(item)
        } else {
            item.question.clone()
        }
    }

    pub fn reveal_sign(&mut self, index: usize) -> bool {
        if index >= self.content.signs.len() {
            return false;
        }
        self.revealed_signs.insert(index)
    }

    pub fn is_sign_revealed(&self, index: usize) -> bool {
        self.revealed_signs.contains(&index)
    }
}
