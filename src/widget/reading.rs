use std::sync::OnceLock;

use regex::Regex;

use crate::lesson::{KeyPoint, Reading, Vocabulary};

fn paragraph_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("paragraph pattern is valid"))
}

fn word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").expect("word pattern is valid"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paragraph<'a> {
    Heading(&'a str),
    Body(Vec<Token<'a>>),
}

/// A run of passage text; words with a vocabulary entry carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub gloss: Option<&'a Vocabulary>,
}

#[derive(Debug, Clone)]
pub struct ReadingPanel {
    content: Reading,
    active_word: Option<usize>,
    fact_sheet_open: bool,
}

impl ReadingPanel {
    pub fn new(content: Reading) -> Self {
        Self {
            content,
            active_word: None,
            fact_sheet_open: false,
        }
    }

    pub fn content(&self) -> &Reading {
        &self.content
    }

    pub fn paragraphs(&self) -> Vec<Paragraph<'_>> {
        paragraph_break()
            .split(&self.content.text)
            .map(|para| {
                if para.trim().starts_with("PART 2") {
                    Paragraph::Heading(para)
                } else {
                    Paragraph::Body(self.tokens(para))
                }
            })
            .collect()
    }

    fn tokens<'a>(&'a self, para: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut cursor = 0;
        for found in word().find_iter(para) {
            if found.start() > cursor {
                tokens.push(Token {
                    text: &para[cursor..found.start()],
                    gloss: None,
                });
            }
            tokens.push(Token {
                text: found.as_str(),
                gloss: self.gloss(found.as_str()),
            });
            cursor = found.end();
        }
        if cursor < para.len() {
            tokens.push(Token {
                text: &para[cursor..],
                gloss: None,
            });
        }
        tokens
    }

    pub fn gloss(&self, word: &str) -> Option<&Vocabulary> {
        self.content
            .vocabulary
            .iter()
            .find(|v| v.word.to_lowercase() == word.to_lowercase())
    }

    /// Opens the definition popup for a glossed word.
    pub fn look_up(&mut self, word: &str) -> bool {
        let lower = word.trim().to_lowercase();
        let Some(index) = self
            .content
            .vocabulary
            .iter()
            .position(|v| v.word.to_lowercase() == lower)
        else {
            return false;
        };
        self.active_word = Some(index);
        true
    }

    pub fn dismiss_word(&mut self) -> bool {
        self.active_word.take().is_some()
    }

    pub fn active_word(&self) -> Option<&Vocabulary> {
        self.active_word.and_then(|i| self.content.vocabulary.get(i))
    }

    /// Opens or closes the key points. No-op without key points.
    pub fn toggle_fact_sheet(&mut self) -> bool {
        if self.content.key_points.is_empty() {
            return false;
        }
        self.fact_sheet_open = !self.fact_sheet_open;
        true
    }

    pub fn fact_sheet(&self) -> Option<&[KeyPoint]> {
        self.fact_sheet_open
            .then_some(self.content.key_points.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(text: &str) -> ReadingPanel {
        ReadingPanel::new(Reading {
            text: text.into(),
            vocabulary: vec![Vocabulary {
                word: "thaw".into(),
                definition: "to melt".into(),
            }],
            key_points: vec![KeyPoint {
                title: "Height".into(),
                content: "2543 m".into(),
            }],
            background_video: None,
            background_image: None,
            footer_image: None,
            audio_src: None,
        })
    }

    #[test]
    fn part_two_paragraph_becomes_heading() {
        let panel = panel("Snow melts.\n\n  PART 2: THE PLAN\n   \nPack well.");
        let paragraphs = panel.paragraphs();
        assert_eq!(paragraphs.len(), 3);
        assert!(matches!(paragraphs[1], Paragraph::Heading(h) if h.contains("THE PLAN")));
    }

    #[test]
    fn vocabulary_words_are_glossed_case_insensitively() {
        let panel = panel("The Thaw begins, thawing slowly.");
        let Paragraph::Body(tokens) = &panel.paragraphs()[0] else {
            panic!("expected body");
        };
        let glossed: Vec<&str> = tokens.iter().filter(|t| t.gloss.is_some()).map(|t| t.text).collect();
        assert_eq!(glossed, vec!["Thaw"]);
        let rebuilt: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, "The Thaw begins, thawing slowly.");
    }

    #[test]
    fn tokens_carry_their_vocabulary_entry() {
        let panel = panel("Thaw, now.");
        let thaw = &panel.content().vocabulary[0];
        assert_eq!(
            panel.paragraphs(),
            vec![Paragraph::Body(vec![
                Token { text: "Thaw", gloss: Some(thaw) },
                Token { text: ", ", gloss: None },
                Token { text: "now", gloss: None },
                Token { text: ".", gloss: None },
            ])]
        );
    }

    #[test]
    fn look_up_and_dismiss() {
        let mut panel = panel("thaw");
        assert!(!panel.look_up("snow"));
        assert!(panel.look_up("THAW"));
        assert_eq!(panel.active_word().map(|v| v.definition.as_str()), Some("to melt"));
        assert!(panel.dismiss_word());
        assert!(!panel.dismiss_word());
    }

    #[test]
    fn fact_sheet_toggles() {
        let mut panel = panel("thaw");
        assert!(panel.fact_sheet().is_none());
        panel.toggle_fact_sheet();
        assert_eq!(panel.fact_sheet().map(<[KeyPoint]>::len), Some(1));
        panel.toggle_fact_sheet();
        assert!(panel.fact_sheet().is_none());
    }
}
