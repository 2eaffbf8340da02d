use std::collections::HashMap;

use crate::lesson::GrammarItem;

/// Gap-fill sentences checked together.
#[derive(Debug, Clone)]
pub struct FillIn {
    items: Vec<GrammarItem>,
    inputs: HashMap<u32, String>,
    checked: bool,
}

impl FillIn {
    pub fn new(items: Vec<GrammarItem>) -> Self {
        Self {
            items,
            inputs: HashMap::new(),
            checked: false,
        }
    }

    pub fn items(&self) -> &[GrammarItem] {
        &self.items
    }

    pub fn input(&self, id: u32) -> &str {
        self.inputs.get(&id).map_or("", String::as_str)
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Replaces the text typed into a gap. Any edit hides earlier feedback.
    pub fn fill(&mut self, id: u32, text: &str) -> bool {
        if !self.items.iter().any(|item| item.id == id) {
            return false;
        }
        self.inputs.insert(id, text.to_string());
        self.checked = false;
        true
    }

    pub fn check(&mut self) -> bool {
        if self.checked {
            return false;
        }
        self.checked = true;
        tracing::trace!(filled = self.inputs.len(), "fill-in checked");
        true
    }

    /// Correctness of an item, known only after a check.
    pub fn is_correct(&self, id: u32) -> Option<bool> {
        if !self.checked {
            return None;
        }
        let item = self.items.iter().find(|item| item.id == id)?;
        Some(accepts(&item.correct_answer, self.input(id)))
    }
}

/// Whether `input` matches one of the `/`-separated answers, ignoring case
/// and surrounding whitespace.
pub fn accepts(correct_answer: &str, input: &str) -> bool {
    let input = input.trim().to_lowercase();
    correct_answer
        .split('/')
        .any(|answer| answer.trim().to_lowercase() == input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, correct_answer: &str) -> GrammarItem {
        GrammarItem {
            id,
            prefix: "You".into(),
            suffix: "wear a hat.".into(),
            correct_answer: correct_answer.into(),
        }
    }

    #[test]
    fn alternatives_are_accepted() {
        assert!(accepts("shouldn't/should not", "  Should Not "));
        assert!(accepts("shouldn't/should not", "shouldn't"));
        assert!(!accepts("should", "shouldn't"));
    }

    #[test]
    fn feedback_waits_for_check() {
        let mut quiz = FillIn::new(vec![item(1, "should")]);
        quiz.fill(1, "should");
        assert_eq!(quiz.is_correct(1), None);
        quiz.check();
        assert_eq!(quiz.is_correct(1), Some(true));
    }

    #[test]
    fn typing_clears_the_check() {
        let mut quiz = FillIn::new(vec![item(1, "should"), item(2, "shouldn't")]);
        quiz.check();
        assert_eq!(quiz.is_correct(2), Some(false));
        quiz.fill(2, "shouldn't");
        assert!(!quiz.is_checked());
        quiz.check();
        assert_eq!(quiz.is_correct(2), Some(true));
        assert!(!quiz.fill(9, "x"));
    }
}
