use rand::{seq::SliceRandom, Rng};

use crate::highlight::{ColorSlot, HighlightSpan};
use crate::lesson::MatchingPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched { color: ColorSlot },
    Mismatch,
}

/// Two columns over the same pairs. The left column keeps declaration order,
/// the right column is shuffled once when the board is mounted.
#[derive(Debug, Clone)]
pub struct MatchingBoard {
    pairs: Vec<MatchingPair>,
    /// indices into `pairs`, in right-column display order
    right_order: Vec<usize>,
    armed: Option<u32>,
    /// pair ids in the order they were solved
    locked: Vec<u32>,
}

impl MatchingBoard {
    pub fn new<R: Rng + ?Sized>(pairs: Vec<MatchingPair>, rng: &mut R) -> Self {
        let mut right_order: Vec<usize> = (0..pairs.len()).collect();
        right_order.shuffle(rng);
        Self::with_right_order(pairs, right_order)
    }

    /// Board with a fixed right-column order. An order that is not a
    /// permutation of the pair indices falls back to declaration order.
    pub fn with_right_order(pairs: Vec<MatchingPair>, right_order: Vec<usize>) -> Self {
        let mut sorted = right_order.clone();
        sorted.sort_unstable();
        let right_order = if sorted.iter().copied().eq(0..pairs.len()) {
            right_order
        } else {
            (0..pairs.len()).collect()
        };

        Self {
            pairs,
            right_order,
            armed: None,
            locked: Vec::new(),
        }
    }

    pub fn left_column(&self) -> &[MatchingPair] {
        &self.pairs
    }

    pub fn right_column(&self) -> impl Iterator<Item = &MatchingPair> {
        self.right_order.iter().map(|&i| &self.pairs[i])
    }

    /// Pair id of the right item shown at a display position.
    pub fn right_at(&self, position: usize) -> Option<u32> {
        self.right_order.get(position).map(|&i| self.pairs[i].id)
    }

    pub fn armed(&self) -> Option<u32> {
        self.armed
    }

    pub fn is_locked(&self, id: u32) -> bool {
        self.locked.contains(&id)
    }

    pub fn locked_count(&self) -> usize {
        self.locked.len()
    }

    pub fn is_solved(&self) -> bool {
        self.locked.len() == self.pairs.len()
    }

    /// Colour shared by both halves of a solved pair, by solve order.
    pub fn color_of(&self, id: u32) -> Option<ColorSlot> {
        self.locked
            .iter()
            .position(|&locked| locked == id)
            .map(ColorSlot::for_position)
    }

    /// Arms a left item, or disarms it if it is already armed. Returns
    /// whether anything changed.
    pub fn select_left(&mut self, id: u32) -> bool {
        if self.is_locked(id) || !self.pairs.iter().any(|p| p.id == id) {
            return false;
        }
        self.armed = if self.armed == Some(id) { None } else { Some(id) };
        true
    }

    /// Resolves the armed left item against a right item. `None` when
    /// nothing is armed or the right item is already locked.
    pub fn select_right(&mut self, id: u32) -> Option<MatchOutcome> {
        if self.is_locked(id) {
            return None;
        }
        let armed = self.armed.take()?;

        if armed == id {
            self.locked.push(id);
            tracing::trace!(id, solved = self.locked.len(), "pair matched");
            Some(MatchOutcome::Matched {
                color: ColorSlot::for_position(self.locked.len() - 1),
            })
        } else {
            tracing::trace!(left = armed, right = id, "pair mismatch");
            Some(MatchOutcome::Mismatch)
        }
    }

    pub fn highlights(&self) -> Vec<HighlightSpan> {
        self.locked
            .iter()
            .enumerate()
            .filter_map(|(order, id)| {
                let pair = self.pairs.iter().find(|p| p.id == *id)?;
                HighlightSpan::for_item(order, pair)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn pair(id: u32, highlight: Option<&str>) -> MatchingPair {
        MatchingPair {
            id,
            left: format!("left {}", id),
            right: format!("right {}", id),
            context_highlight: highlight.map(str::to_string),
        }
    }

    #[test]
    fn right_column_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = MatchingBoard::new((1..=5).map(|id| pair(id, None)).collect(), &mut rng);
        let mut ids: Vec<u32> = board.right_column().map(|p| p.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        let left: Vec<u32> = board.left_column().iter().map(|p| p.id).collect();
        assert_eq!(left, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn mismatch_disarms_without_locking() {
        let mut board = MatchingBoard::with_right_order(vec![pair(1, None), pair(2, None)], vec![1, 0]);
        assert!(board.select_left(1));
        assert_eq!(board.select_right(2), Some(MatchOutcome::Mismatch));
        assert_eq!(board.armed(), None);
        assert_eq!(board.locked_count(), 0);
    }

    #[test]
    fn right_click_without_armed_item_does_nothing() {
        let mut board = MatchingBoard::with_right_order(vec![pair(1, None)], vec![0]);
        assert_eq!(board.select_right(1), None);
        assert_eq!(board.locked_count(), 0);
    }

    #[test]
    fn selecting_armed_left_item_again_disarms() {
        let mut board = MatchingBoard::with_right_order(vec![pair(1, None), pair(2, None)], vec![0, 1]);
        board.select_left(1);
        board.select_left(1);
        assert_eq!(board.armed(), None);
        board.select_left(1);
        board.select_left(2);
        assert_eq!(board.armed(), Some(2));
    }

    #[test]
    fn locked_pairs_ignore_further_clicks() {
        let mut board = MatchingBoard::with_right_order(vec![pair(1, None), pair(2, None)], vec![0, 1]);
        board.select_left(1);
        board.select_right(1);
        assert!(!board.select_left(1));
        board.select_left(2);
        assert_eq!(board.select_right(1), None);
        assert_eq!(board.armed(), Some(2));
    }

    #[test]
    fn colours_follow_solve_order() {
        let mut board = MatchingBoard::with_right_order(
            vec![pair(1, Some("cool")), pair(2, Some("warm")), pair(3, None)],
            vec![2, 0, 1],
        );
        board.select_left(3);
        assert_eq!(
            board.select_right(3),
            Some(MatchOutcome::Matched { color: ColorSlot::for_position(0) })
        );
        board.select_left(1);
        board.select_right(1);

        assert_eq!(board.color_of(1), Some(ColorSlot::for_position(1)));
        let spans = board.highlights();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].owner_id, 1);
        assert_eq!(spans[0].color, ColorSlot::for_position(1));
        assert!(!board.is_solved());

        board.select_left(2);
        board.select_right(2);
        assert!(board.is_solved());
    }

    #[test]
    fn right_positions_follow_the_shuffled_order() {
        let board = MatchingBoard::with_right_order(
            vec![pair(1, None), pair(2, None), pair(3, None)],
            vec![2, 0, 1],
        );
        assert_eq!(board.right_at(0), Some(3));
        assert_eq!(board.right_at(2), Some(2));
        assert_eq!(board.right_at(3), None);
    }

    #[test]
    fn invalid_fixed_order_falls_back_to_declaration_order() {
        let board = MatchingBoard::with_right_order(vec![pair(1, None), pair(2, None)], vec![0, 0]);
        let ids: Vec<u32> = board.right_column().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
