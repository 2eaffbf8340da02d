use crate::highlight::HighlightSpan;
use crate::lesson::QaItem;

/// Question and answer list with at most one answer showing.
#[derive(Debug, Clone)]
pub struct Accordion {
    items: Vec<QaItem>,
    open: Option<u32>,
}

impl Accordion {
    pub fn new(items: Vec<QaItem>) -> Self {
        Self { items, open: None }
    }

    pub fn items(&self) -> &[QaItem] {
        &self.items
    }

    pub fn open_item(&self) -> Option<u32> {
        self.open
    }

    /// Opens `id`, closing whichever item was open. Toggling the open item
    /// closes it.
    pub fn toggle(&mut self, id: u32) -> bool {
        if !self.items.iter().any(|item| item.id == id) {
            return false;
        }
        self.open = if self.open == Some(id) { None } else { Some(id) };
        tracing::trace!(id, open = ?self.open, "accordion toggled");
        true
    }

    pub fn answer(&self, id: u32) -> Option<&str> {
        if self.open != Some(id) {
            return None;
        }
        self.items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.answer.as_str())
    }

    pub fn highlights(&self) -> Vec<HighlightSpan> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| Some(item.id) == self.open)
            .filter_map(|(position, item)| HighlightSpan::for_item(position, item))
            .collect()
    }
}
