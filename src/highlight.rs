//! Colour-coded excerpts of a slide's reference passage.
//!
//! Each answered item may cite a verbatim excerpt of the passage. Spans are
//! applied in order; a span claims every non-overlapping occurrence of its text
//! that lies in a part of the passage no earlier span has claimed. Text that
//! only occurs inside an already claimed region stays unhighlighted.

use regex::Regex;
use std::ops::Range;

use crate::lesson::Cited;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Yellow,
    Green,
    Blue,
    Pink,
    Purple,
    Orange,
    Teal,
    Indigo,
}

pub const PALETTE: [Color; 8] = [
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Pink,
    Color::Purple,
    Color::Orange,
    Color::Teal,
    Color::Indigo,
];

impl Color {
    pub fn name(self) -> &'static str {
        match self {
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Pink => "pink",
            Color::Purple => "purple",
            Color::Orange => "orange",
            Color::Teal => "teal",
            Color::Indigo => "indigo",
        }
    }

    /// 256-colour background escape for terminals
    pub fn ansi_background(self) -> &'static str {
        match self {
            Color::Yellow => "\x1b[48;5;229m",
            Color::Green => "\x1b[48;5;157m",
            Color::Blue => "\x1b[48;5;153m",
            Color::Pink => "\x1b[48;5;218m",
            Color::Purple => "\x1b[48;5;183m",
            Color::Orange => "\x1b[48;5;223m",
            Color::Teal => "\x1b[48;5;122m",
            Color::Indigo => "\x1b[48;5;147m",
        }
    }
}

/// Index into [`PALETTE`]. Positions that are congruent modulo the palette
/// size share a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorSlot(usize);

impl ColorSlot {
    pub fn for_position(position: usize) -> Self {
        ColorSlot(position % PALETTE.len())
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn color(self) -> Color {
        PALETTE[self.0]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub owner_id: u32,
    pub literal_text: String,
    pub color: ColorSlot,
}

impl HighlightSpan {
    /// Span for an item at `position` in its slide, if the item cites the passage.
    pub fn for_item<I: Cited>(position: usize, item: &I) -> Option<Self> {
        let text = item.context_highlight()?;
        if text.trim().is_empty() {
            return None;
        }

        Some(Self {
            owner_id: item.id(),
            literal_text: text.to_string(),
            color: ColorSlot::for_position(position),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pub owner_id: u32,
    pub color: ColorSlot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub mark: Option<Mark>,
}

/// Splits `passage` into plain and highlighted segments, in passage order.
pub fn apply<'a>(passage: &'a str, spans: &[HighlightSpan]) -> Vec<Segment<'a>> {
    let mut pieces: Vec<(Range<usize>, Option<Mark>)> = vec![(0..passage.len(), None)];

    for span in spans {
        if span.literal_text.trim().is_empty() {
            continue;
        }

        let pattern = match Regex::new(&regex::escape(&span.literal_text)) {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::warn!(owner = span.owner_id, error = %e, "cannot build highlight pattern");
                continue;
            }
        };

        let mut claimed = 0;
        let mut next = Vec::with_capacity(pieces.len() + 2);
        for (range, mark) in pieces {
            if mark.is_some() {
                next.push((range, mark));
                continue;
            }

            let mut cursor = range.start;
            for found in pattern.find_iter(&passage[range.clone()]) {
                let start = range.start + found.start();
                let end = range.start + found.end();
                if start > cursor {
                    next.push((cursor..start, None));
                }
                next.push((
                    start..end,
                    Some(Mark {
                        owner_id: span.owner_id,
                        color: span.color,
                    }),
                ));
                cursor = end;
                claimed += 1;
            }
            if cursor < range.end {
                next.push((cursor..range.end, None));
            }
        }

        if claimed == 0 {
            tracing::warn!(owner = span.owner_id, "highlight text not found in unclaimed passage");
        }
        pieces = next;
    }

    pieces
        .into_iter()
        .filter(|(range, _)| !range.is_empty())
        .map(|(range, mark)| Segment {
            text: &passage[range],
            mark,
        })
        .collect()
}
