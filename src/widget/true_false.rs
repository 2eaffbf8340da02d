use std::collections::HashMap;

use super::ItemStatus;
use crate::highlight::HighlightSpan;
use crate::lesson::QuestionTf;

/// True/false statements. The first answer to a statement locks it.
#[derive(Debug, Clone)]
pub struct TrueFalseQuiz {
    questions: Vec<QuestionTf>,
    /// question id -> whether the recorded answer was correct
    answers: HashMap<u32, bool>,
}

impl TrueFalseQuiz {
    pub fn new(questions: Vec<QuestionTf>) -> Self {
        Self {
            questions,
            answers: HashMap::new(),
        }
    }

    pub fn questions(&self) -> &[QuestionTf] {
        &self.questions
    }

    /// Records `picked` and returns its correctness. Locked or unknown
    /// statements return `None` and change nothing.
    pub fn answer(&mut self, id: u32, picked: bool) -> Option<bool> {
        if self.answers.contains_key(&id) {
            return None;
        }
        let question = self.questions.iter().find(|q| q.id == id)?;
        let correct = picked == question.is_true;
        self.answers.insert(id, correct);
        tracing::trace!(id, picked, correct, "true/false answered");
        Some(correct)
    }

    pub fn status(&self, id: u32) -> ItemStatus {
        match self.answers.get(&id) {
            Some(&correct) => ItemStatus::Answered { correct },
            None => ItemStatus::Unanswered,
        }
    }

    /// Explanation, revealed once the statement is answered.
    pub fn explanation(&self, id: u32) -> Option<&str> {
        if !self.answers.contains_key(&id) {
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
            .filter(|(_, q)| self.answers.contains_key(&q.id))
            .filter_map(|(position, q)| HighlightSpan::for_item(position, q))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u32, is_true: bool, highlight: Option<&str>) -> QuestionTf {
        QuestionTf {
            id,
            statement: format!("statement {}", id),
            is_true,
            explanation: Some(format!("because {}", id)),
            context_highlight: highlight.map(str::to_string),
        }
    }

    #[test]
    fn second_answer_never_changes_the_first() {
        let mut quiz = TrueFalseQuiz::new(vec![question(2, false, None)]);

        assert_eq!(quiz.answer(2, true), Some(false));
        assert_eq!(quiz.answer(2, false), None);
        assert_eq!(quiz.status(2), ItemStatus::Answered { correct: false });
    }

    #[test]
    fn explanation_is_hidden_until_answered() {
        let mut quiz = TrueFalseQuiz::new(vec![question(1, true, None)]);
        assert_eq!(quiz.explanation(1), None);
        quiz.answer(1, true);
        assert_eq!(quiz.explanation(1), Some("because 1"));
    }

    #[test]
    fn unknown_statement_is_ignored() {
        let mut quiz = TrueFalseQuiz::new(vec![question(1, true, None)]);
        assert_eq!(quiz.answer(9, true), None);
        assert_eq!(quiz.status(9), ItemStatus::Unanswered);
    }

    #[test]
    fn only_answered_statements_are_highlighted_by_position() {
        let mut quiz = TrueFalseQuiz::new(vec![
            question(1, true, Some("early spring")),
            question(2, false, Some("cold and cloudy")),
            question(3, true, None),
        ]);
        quiz.answer(2, false);
        quiz.answer(3, true);

        let spans = quiz.highlights();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].owner_id, 2);
        assert_eq!(spans[0].color.index(), 1);
    }
}
