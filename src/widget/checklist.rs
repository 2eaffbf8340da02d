use std::collections::BTreeSet;

use crate::highlight::HighlightSpan;
use crate::lesson::ChecklistItem;

/// How an entry is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Unchecked,
    Checked,
    /// after verify; a correct entry shows as correct whether it was checked or not
    Correct,
    /// after verify, checked but not correct
    Wrong,
    /// after verify, neither checked nor correct
    Dimmed,
}

#[derive(Debug, Clone)]
pub struct Checklist {
    items: Vec<ChecklistItem>,
    extension_question: Option<String>,
    checked: BTreeSet<u32>,
    verified: bool,
    extension_answer: String,
}

impl Checklist {
    pub fn new(items: Vec<ChecklistItem>, extension_question: Option<String>) -> Self {
        Self {
            items,
            extension_question,
            checked: BTreeSet::new(),
            verified: false,
            extension_answer: String::new(),
        }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn is_checked(&self, id: u32) -> bool {
        self.checked.contains(&id)
    }

    /// Flips an entry. Frozen once verified.
    pub fn toggle(&mut self, id: u32) -> bool {
        if self.verified || !self.items.iter().any(|item| item.id == id) {
            return false;
        }
        if !self.checked.remove(&id) {
            self.checked.insert(id);
        }
        tracing::trace!(id, checked = self.checked.contains(&id), "checklist toggled");
        true
    }

    pub fn verify(&mut self) -> bool {
        if self.verified {
            return false;
        }
        self.verified = true;
        tracing::trace!(checked = self.checked.len(), "checklist verified");
        true
    }

    /// Back to editing with nothing checked and no extension answer.
    pub fn reset(&mut self) {
        self.checked.clear();
        self.verified = false;
        self.extension_answer.clear();
    }

    pub fn status(&self, item: &ChecklistItem) -> EntryStatus {
        let checked = self.checked.contains(&item.id);
        match (self.verified, checked, item.is_correct) {
            (false, false, _) => EntryStatus::Unchecked,
            (false, true, _) => EntryStatus::Checked,
            (true, _, true) => EntryStatus::Correct,
            (true, true, false) => EntryStatus::Wrong,
            (true, false, false) => EntryStatus::Dimmed,
        }
    }

    /// The follow-up question, offered once the list is verified.
    pub fn extension_question(&self) -> Option<&str> {
        self.extension_question
            .as_deref()
            .filter(|_| self.verified)
    }

    pub fn extension_answer(&self) -> &str {
        &self.extension_answer
    }

    pub fn set_extension_answer(&mut self, answer: &str) -> bool {
        if self.extension_question().is_none() {
            return false;
        }
        self.extension_answer = answer.to_string();
        true
    }

    pub fn highlights(&self) -> Vec<HighlightSpan> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.checked.contains(&item.id))
            .filter_map(|(position, item)| HighlightSpan::for_item(position, item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, is_correct: bool, highlight: Option<&str>) -> ChecklistItem {
        ChecklistItem {
            id,
            text: format!("entry {}", id),
            is_correct,
            context_highlight: highlight.map(str::to_string),
        }
    }

    fn list() -> Checklist {
        Checklist::new(
            vec![
                entry(1, true, Some("warm clothes")),
                entry(2, false, Some("sandals")),
                entry(3, true, Some("water")),
            ],
            Some("What else would you pack?".into()),
        )
    }

    #[test]
    fn toggling_is_unlimited_before_verify() {
        let mut list = list();
        for _ in 0..3 {
            assert!(list.toggle(2));
        }
        assert!(list.is_checked(2));
        assert_eq!(list.status(&list.items()[1].clone()), EntryStatus::Checked);
    }

    #[test]
    fn verify_freezes_toggles() {
        let mut list = list();
        list.toggle(1);
        assert!(list.verify());
        assert!(!list.toggle(1));
        assert!(!list.toggle(2));
        assert!(list.is_checked(1));
        assert!(!list.is_checked(2));
        assert!(!list.verify());
    }

    #[test]
    fn correct_entries_show_correct_whether_checked_or_not() {
        let mut list = list();
        list.toggle(1);
        list.toggle(2);
        list.verify();

        let items = list.items().to_vec();
        assert_eq!(list.status(&items[0]), EntryStatus::Correct);
        assert_eq!(list.status(&items[1]), EntryStatus::Wrong);
        assert_eq!(list.status(&items[2]), EntryStatus::Correct);
    }

    #[test]
    fn reset_clears_selection_and_extension_answer() {
        let mut list = list();
        list.toggle(3);
        assert!(!list.set_extension_answer("a map"));
        list.verify();
        assert!(list.set_extension_answer("a map"));
        assert_eq!(list.extension_question(), Some("What else would you pack?"));

        list.reset();
        assert!(!list.is_verified());
        assert!(!list.is_checked(3));
        assert_eq!(list.extension_answer(), "");
        assert!(list.toggle(3));
    }

    #[test]
    fn checked_entries_are_highlighted_by_position() {
        let mut list = list();
        list.toggle(3);
        let spans = list.highlights();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].owner_id, 3);
        assert_eq!(spans[0].color.index(), 2);
    }
}
