use rand::{seq::SliceRandom, Rng};

use crate::lesson::ScrambleItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone)]
struct Sentence {
    item: ScrambleItem,
    tokens: Vec<String>,
    solved: bool,
}

/// Sentences to rebuild from shuffled word tokens, one adjacent swap at a time.
#[derive(Debug, Clone)]
pub struct ScrambleBoard {
    sentences: Vec<Sentence>,
}

impl ScrambleBoard {
    pub fn new<R: Rng + ?Sized>(items: Vec<ScrambleItem>, rng: &mut R) -> Self {
        let sentences = items
            .into_iter()
            .map(|item| {
                let mut tokens = item.parts.clone();
                tokens.shuffle(rng);
                Sentence {
                    item,
                    tokens,
                    solved: false,
                }
            })
            .collect();

        Self { sentences }
    }

    /// Board with given token orders, one per item. Missing orders keep the
    /// authored `parts` order.
    pub fn arranged(items: Vec<ScrambleItem>, orders: Vec<Vec<String>>) -> Self {
        let mut orders = orders.into_iter();
        let sentences = items
            .into_iter()
            .map(|item| {
                let tokens = orders.next().unwrap_or_else(|| item.parts.clone());
                Sentence {
                    item,
                    tokens,
                    solved: false,
                }
            })
            .collect();

        Self { sentences }
    }

    pub fn items(&self) -> impl Iterator<Item = &ScrambleItem> {
        self.sentences.iter().map(|s| &s.item)
    }

    pub fn tokens(&self, id: u32) -> Option<&[String]> {
        self.sentence(id).map(|s| s.tokens.as_slice())
    }

    pub fn is_solved(&self, id: u32) -> bool {
        self.sentence(id).is_some_and(|s| s.solved)
    }

    /// Swaps the token at `position` with its neighbour. No-op on a solved
    /// sentence or when the move would leave the sentence.
    pub fn move_token(&mut self, id: u32, position: usize, direction: Direction) -> bool {
        let Some(sentence) = self.sentence_mut(id) else {
            return false;
        };
        if sentence.solved || position >= sentence.tokens.len() {
            return false;
        }

        let other = match direction {
            Direction::Left if position > 0 => position - 1,
            Direction::Right if position + 1 < sentence.tokens.len() => position + 1,
            _ => return false,
        };
        sentence.tokens.swap(position, other);
        true
    }

    /// Compares the space-joined tokens with the correct sentence. A match
    /// locks the sentence; a miss changes nothing. `None` for unknown or
    /// already solved sentences.
    pub fn check(&mut self, id: u32) -> Option<bool> {
        let sentence = self.sentence_mut(id)?;
        if sentence.solved {
            return None;
        }

        let correct = sentence.tokens.join(" ") == sentence.item.correct_sentence;
        sentence.solved = correct;
        tracing::trace!(id, correct, "scramble checked");
        Some(correct)
    }

    fn sentence(&self, id: u32) -> Option<&Sentence> {
        self.sentences.iter().find(|s| s.item.id == id)
    }

    fn sentence_mut(&mut self, id: u32) -> Option<&mut Sentence> {
        self.sentences.iter_mut().find(|s| s.item.id == id)
    }
}
