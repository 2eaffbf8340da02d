use std::collections::HashMap;

use super::ItemStatus;
use crate::highlight::HighlightSpan;
use crate::lesson::QuestionMc;

/// How an option is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    /// question not answered yet
    Open,
    /// the correct option of an answered question, whatever was picked
    Correct,
    /// picked and wrong
    WrongPick,
    Faded,
}

#[derive(Debug, Clone)]
pub struct MultipleChoiceQuiz {
    questions: Vec<QuestionMc>,
    selections: HashMap<u32, usize>,
}

impl MultipleChoiceQuiz {
    pub fn new(questions: Vec<QuestionMc>) -> Self {
        Self {
            questions,
            selections: HashMap::new(),
        }
    }

    pub fn questions(&self) -> &[QuestionMc] {
        &self.questions
    }

    /// Locks `option` as the answer to question `id` and returns its
    /// correctness. Locked questions and out-of-range options are ignored.
    pub fn choose(&mut self, id: u32, option: usize) -> Option<bool> {
        if self.selections.contains_key(&id) {
            return None;
        }
        let question = self.questions.iter().find(|q| q.id == id)?;
        if option >= question.options.len() {
            return None;
        }
        let correct = option == question.correct_index;
        self.selections.insert(id, option);
        tracing::trace!(id, option, correct, "multiple choice answered");
        Some(correct)
    }

    pub fn selection(&self, id: u32) -> Option<usize> {
        self.selections.get(&id).copied()
    }

    pub fn status(&self, id: u32) -> ItemStatus {
        let Some(&picked) = self.selections.get(&id) else {
            return ItemStatus::Unanswered;
        };
        let correct = self
            .questions
            .iter()
            .find(|q| q.id == id)
            .is_some_and(|q| q.correct_index == picked);
        ItemStatus::Answered { correct }
    }

    pub fn option_mark(&self, question: &QuestionMc, option: usize) -> OptionMark {
        match self.selections.get(&question.id) {
            None => OptionMark::Open,
            Some(_) if option == question.correct_index => OptionMark::Correct,
            Some(&picked) if picked == option => OptionMark::WrongPick,
            Some(_) => OptionMark::Faded,
        }
    }

    pub fn explanation(&self, id: u32) -> Option<&str> {
        if !self.selections.contains_key(&id) {
            return None;
        }
        self.questions
            .iter()
            .find(|q| q.id == id)
            .and_then(|q| q.explanation.as_deref())
    }

    pub fn highlights(&self) -> Vec<HighlightSpan> {
        self.questions
            .iter()
            .enumerate()
            .filter(|(_, q)| self.selections.contains_key(&q.id))
            .filter_map(|(position, q)| HighlightSpan::for_item(position, q))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::IconType;

    fn question(id: u32, correct_index: usize) -> QuestionMc {
        QuestionMc {
            id,
            question: "Situation: It gets crowded late.".into(),
            options: vec!["You shouldn't go early.".into(), "You should go early.".into()],
            correct_index,
            explanation: Some("Beat the crowd.".into()),
            icon_type: IconType::General,
            context_highlight: Some("You should go early".into()),
        }
    }

    #[test]
    fn correct_option_is_marked_whatever_was_picked() {
        let q = question(2, 1);
        for picked in 0..2 {
            let mut quiz = MultipleChoiceQuiz::new(vec![q.clone()]);
            quiz.choose(2, picked);
            assert_eq!(quiz.option_mark(&q, 1), OptionMark::Correct);
        }
    }

    #[test]
    fn wrong_pick_is_distinguished_from_faded() {
        let q = question(1, 0);
        let mut quiz = MultipleChoiceQuiz::new(vec![q.clone()]);
        assert_eq!(quiz.option_mark(&q, 1), OptionMark::Open);

        assert_eq!(quiz.choose(1, 1), Some(false));
        assert_eq!(quiz.option_mark(&q, 0), OptionMark::Correct);
        assert_eq!(quiz.option_mark(&q, 1), OptionMark::WrongPick);
        assert_eq!(quiz.status(1), ItemStatus::Answered { correct: false });
    }

    #[test]
    fn answer_locks_and_reveals_explanation() {
        let mut quiz = MultipleChoiceQuiz::new(vec![question(1, 1)]);
        assert_eq!(quiz.explanation(1), None);
        assert_eq!(quiz.choose(1, 1), Some(true));
        assert_eq!(quiz.choose(1, 0), None);
        assert_eq!(quiz.selection(1), Some(1));
        assert_eq!(quiz.explanation(1), Some("Beat the crowd."));
    }

    #[test]
    fn out_of_range_option_does_not_lock() {
        let mut quiz = MultipleChoiceQuiz::new(vec![question(1, 1)]);
        assert_eq!(quiz.choose(1, 5), None);
        assert_eq!(quiz.status(1), ItemStatus::Unanswered);
        assert!(quiz.highlights().is_empty());
    }
}
