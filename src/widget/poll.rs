use crate::lesson::PollOption;

/// Opinion poll: one selected option, freely changed, never graded.
#[derive(Debug, Clone)]
pub struct Poll {
    options: Vec<PollOption>,
    selected: Option<usize>,
}

impl Poll {
    pub fn new(options: Vec<PollOption>) -> Self {
        Self {
            options,
            selected: None,
        }
    }

    pub fn options(&self) -> &[PollOption] {
        &self.options
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn pick(&mut self, index: usize) -> bool {
        if index >= self.options.len() || self.selected == Some(index) {
            return false;
        }
        self.selected = Some(index);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(text: &str) -> PollOption {
        PollOption {
            icon: "*".into(),
            text: text.into(),
            subtext: None,
        }
    }

    #[test]
    fn selection_can_change() {
        let mut poll = Poll::new(vec![option("sunny"), option("rainy")]);
        assert!(poll.pick(0));
        assert!(poll.pick(1));
        assert!(!poll.pick(1));
        assert!(!poll.pick(2));
        assert_eq!(poll.selected(), Some(1));
    }
}
