//! Plain-text rendering of the slide on screen, with ANSI styling for
//! terminals.

use std::fmt::{self, Write};

use rand::Rng;

use crate::highlight::Segment;
use crate::lesson::{IceBreakerActivity, SlideBody, SlideRecord, Speaking};
use crate::media::MediaResolver;
use crate::session::Session;
use crate::widget::{
    Accordion, Checklist, DebriefBoard, EntryStatus, FillIn, ImperativesBoard, ItemStatus,
    MatchingBoard, Mode, MultipleChoiceQuiz, OptionMark, Paragraph, Poll, ReadingPanel,
    ScrambleBoard, TrueFalseQuiz, Widget,
};

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";
pub const RESET: &str = "\x1b[0m";

const PROGRESS_WIDTH: usize = 30;

/// Renders the whole screen: header, slide, and overlay if it is open.
pub fn render_session<R: Rng>(session: &Session<R>, resolver: &dyn MediaResolver) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_session(&mut out, session, resolver);
    out
}

fn write_session<R: Rng>(
    out: &mut String,
    session: &Session<R>,
    resolver: &dyn MediaResolver,
) -> fmt::Result {
    let record = session.current();
    let cursor = session.cursor();

    if !matches!(record.body, SlideBody::Cover(_)) {
        let filled = (cursor.progress_fraction() * PROGRESS_WIDTH as f64).round() as usize;
        writeln!(
            out,
            "{DIM}{}{RESET}  {BOLD}{}{RESET} / {}",
            session.store().title(),
            cursor.current_index() + 1,
            cursor.total()
        )?;
        writeln!(
            out,
            "[{}{}]",
            "#".repeat(filled),
            "-".repeat(PROGRESS_WIDTH.saturating_sub(filled))
        )?;
    }

    writeln!(out, "\n{BOLD}{}{RESET}", record.title)?;
    if !record.subtitle.is_empty() {
        writeln!(out, "{DIM}{}{RESET}", record.subtitle)?;
    }
    writeln!(out)?;

    write_slide(out, record, session.widget())?;

    if !matches!(record.body, SlideBody::Cover(_)) {
        let mut hints = Vec::new();
        if !cursor.is_first() {
            hints.push("p: back");
        }
        if !cursor.is_last() {
            hints.push("n: next");
        }
        hints.push("q: quit");
        writeln!(out, "\n{DIM}{}{RESET}", hints.join("  "))?;
    }

    let media = record.body.media();
    if !media.is_empty() {
        writeln!(out)?;
        for item in media {
            let resource = resolver.resolve(item);
            writeln!(out, "{DIM}[{}] {}{RESET}", resource.kind, resource.location)?;
        }
    }

    if let Some(segments) = session.overlay() {
        writeln!(out, "\n{BOLD}-- Intel --{RESET}")?;
        writeln!(out, "{}", render_segments(&segments))?;
    }

    Ok(())
}

/// The passage with each highlighted segment on its palette colour.
pub fn render_segments(segments: &[Segment<'_>]) -> String {
    segments
        .iter()
        .map(|segment| match segment.mark {
            Some(mark) => format!(
                "{}{}{RESET}",
                mark.color.color().ansi_background(),
                segment.text
            ),
            None => segment.text.to_string(),
        })
        .collect()
}

fn write_slide(out: &mut String, record: &SlideRecord, widget: &Widget) -> fmt::Result {
    match (&record.body, widget) {
        (SlideBody::Cover(_), _) => writeln!(out, "Press n or the right arrow to begin."),
        (SlideBody::Objectives(o), _) => {
            writeln!(out, "{BOLD}Objectives{RESET}")?;
            for objective in &o.objectives {
                writeln!(out, "  * {}", objective)?;
            }
            if !o.grammar.is_empty() {
                writeln!(out, "{BOLD}Grammar:{RESET} {}", o.grammar.join(", "))?;
            }
            if !o.vocabulary.is_empty() {
                writeln!(out, "{BOLD}Vocabulary:{RESET} {}", o.vocabulary.join(", "))?;
            }
            if !o.context.is_empty() {
                writeln!(out, "\n{}", o.context)?;
            }
            if !o.importance.is_empty() {
                writeln!(out, "{DIM}{}{RESET}", o.importance)?;
            }
            Ok(())
        }
        (SlideBody::IceBreaker(ice), widget) => {
            writeln!(out, "{}", ice.question)?;
            if let Some(prompt) = &ice.prompt {
                writeln!(out, "{DIM}{}{RESET}", prompt)?;
            }
            match (&ice.activity, widget) {
                (IceBreakerActivity::Poll { .. }, Widget::Poll(poll)) => write_poll(out, poll)?,
                (IceBreakerActivity::ExternalLink { button_text, .. }, _) => {
                    writeln!(out, "{BOLD}{}{RESET}", button_text)?
                }
                _ => {}
            }
            if let Some(footnote) = &ice.footnote {
                writeln!(out, "{DIM}{}{RESET}", footnote)?;
            }
            Ok(())
        }
        (SlideBody::Reading(_), Widget::Reading(panel)) => write_reading(out, panel),
        (SlideBody::ComprehensionTf(_), Widget::TrueFalse(quiz)) => write_true_false(out, quiz),
        (SlideBody::ComprehensionMc(_), Widget::MultipleChoice(quiz)) => {
            write_multiple_choice(out, quiz)
        }
        (SlideBody::Grammar(_), Widget::FillIn(quiz)) => write_fill_in(out, quiz),
        (SlideBody::Speaking(s), _) => write_speaking(out, s),
        (SlideBody::Drill(d), _) => {
            for item in &d.items {
                match &item.speaker {
                    Some(speaker) => writeln!(out, "{}. {BOLD}{}:{RESET} {}", item.id, speaker, item.text)?,
                    None => writeln!(out, "{}. {}", item.id, item.text)?,
                }
            }
            Ok(())
        }
        (SlideBody::Matching(_), Widget::Matching(board)) => write_matching(out, board),
        (SlideBody::Media(m), _) => writeln!(out, "Open {BOLD}{}{RESET} to watch.", m.url),
        (SlideBody::Checklist(_), Widget::Checklist(list)) => write_checklist(out, list),
        (SlideBody::Qa(_), Widget::Accordion(accordion)) => write_accordion(out, accordion),
        (SlideBody::Scramble(_), Widget::Scramble(board)) => write_scramble(out, board),
        (SlideBody::Imperatives(_), Widget::Imperatives(board)) => write_imperatives(out, board),
        (SlideBody::Debrief(_), Widget::Debrief(board)) => write_debrief(out, board),
        _ => writeln!(out, "Slide content not implemented"),
    }
}

fn write_poll(out: &mut String, poll: &Poll) -> fmt::Result {
    for (i, option) in poll.options().iter().enumerate() {
        let marker = if poll.selected() == Some(i) { ">" } else { " " };
        write!(out, "{} {}. {} {}", marker, i + 1, option.icon, option.text)?;
        match &option.subtext {
            Some(subtext) => writeln!(out, " {DIM}({}){RESET}", subtext)?,
            None => writeln!(out)?,
        }
    }
    Ok(())
}

fn write_reading(out: &mut String, panel: &ReadingPanel) -> fmt::Result {
    for paragraph in panel.paragraphs() {
        match paragraph {
            Paragraph::Heading(text) => writeln!(out, "{BOLD}{YELLOW}{}{RESET}\n", text.trim())?,
            Paragraph::Body(tokens) => {
                for token in tokens {
                    match token.gloss {
                        Some(_) => write!(out, "{BOLD}{}{RESET}", token.text)?,
                        None => out.push_str(token.text),
                    }
                }
                writeln!(out, "\n")?;
            }
        }
    }

    if let Some(vocab) = panel.active_word() {
        writeln!(out, "{YELLOW}{}{RESET}: {}", vocab.word, vocab.definition)?;
    }
    if let Some(points) = panel.fact_sheet() {
        writeln!(out, "{BOLD}Fact sheet{RESET}")?;
        for point in points {
            writeln!(out, "  {BOLD}{}{RESET}: {}", point.title, point.content)?;
        }
    }
    Ok(())
}

/// Label for the option at `index`: `a` to `z`, then 1-based numbers.
pub fn list_label(index: usize) -> String {
    u32::try_from(index)
        .ok()
        .filter(|&i| i < 26)
        .and_then(|i| char::from_u32('a' as u32 + i))
        .map_or_else(|| (index + 1).to_string(), String::from)
}

fn status_marker(status: ItemStatus) -> String {
    match status {
        ItemStatus::Unanswered => "[ ]".to_string(),
        ItemStatus::Answered { correct: true } => format!("{GREEN}[correct]{RESET}"),
        ItemStatus::Answered { correct: false } => format!("{RED}[incorrect]{RESET}"),
    }
}

fn write_true_false(out: &mut String, quiz: &TrueFalseQuiz) -> fmt::Result {
    for q in quiz.questions() {
        writeln!(out, "{}. {} {}", q.id, q.statement, status_marker(quiz.status(q.id)))?;
        if let Some(explanation) = quiz.explanation(q.id) {
            writeln!(out, "   {DIM}{}{RESET}", explanation)?;
        }
    }
    Ok(())
}

fn write_multiple_choice(out: &mut String, quiz: &MultipleChoiceQuiz) -> fmt::Result {
    for q in quiz.questions() {
        writeln!(out, "{}. {} {}", q.id, q.question, status_marker(quiz.status(q.id)))?;
        for (i, option) in q.options.iter().enumerate() {
            let letter = list_label(i);
            match quiz.option_mark(q, i) {
                OptionMark::Open => writeln!(out, "   {}) {}", letter, option)?,
                OptionMark::Correct => writeln!(out, "   {GREEN}{}) {}{RESET}", letter, option)?,
                OptionMark::WrongPick => writeln!(out, "   {RED}{}) {}{RESET}", letter, option)?,
                OptionMark::Faded => writeln!(out, "   {DIM}{}) {}{RESET}", letter, option)?,
            }
        }
        if let Some(explanation) = quiz.explanation(q.id) {
            writeln!(out, "   {DIM}{}{RESET}", explanation)?;
        }
    }
    Ok(())
}

fn write_fill_in(out: &mut String, quiz: &FillIn) -> fmt::Result {
    for item in quiz.items() {
        let input = quiz.input(item.id);
        let gap = if input.is_empty() { "_____" } else { input };
        let gap = match quiz.is_correct(item.id) {
            Some(true) => format!("{GREEN}{}{RESET}", gap),
            Some(false) => format!("{RED}{}{RESET}", gap),
            None => gap.to_string(),
        };
        writeln!(out, "{}. {} {} {}", item.id, item.prefix, gap, item.suffix)?;
    }
    Ok(())
}

/// Grammar box lines split into advice (`(+)`) and warnings (`(-)`), with the
/// markers and column headings stripped.
pub fn advice_columns(lines: &[String]) -> (Vec<String>, Vec<String>) {
    let strip = |line: &str, marker: &str, heading: &str| {
        line.replace(marker, "").replace(heading, "").trim().to_string()
    };

    let should = lines
        .iter()
        .filter(|l| l.contains("(+)") || l.contains("SHOULD (Good"))
        .map(|l| strip(l, "(+)", "SHOULD (Good idea / Advice)"))
        .collect();
    let shouldnt = lines
        .iter()
        .filter(|l| l.contains("(-)") || l.contains("SHOULDN'T"))
        .map(|l| strip(l, "(-)", "SHOULDN'T (Bad idea / Advice)"))
        .collect();

    (should, shouldnt)
}

/// Prompts for student A (the first three) and student B (the rest). Lines
/// that name a student are headings and are dropped.
pub fn student_prompts(prompts: &[String]) -> (Vec<&str>, Vec<&str>) {
    let prompts: Vec<&str> = prompts
        .iter()
        .map(String::as_str)
        .filter(|p| !p.contains("STUDENT A") && !p.contains("STUDENT B"))
        .collect();
    let split = prompts.len().min(3);
    (prompts[..split].to_vec(), prompts[split..].to_vec())
}

fn write_speaking(out: &mut String, speaking: &Speaking) -> fmt::Result {
    if let Some(formula) = &speaking.grammar_formula {
        writeln!(out, "{BOLD}{}{RESET}: {}", formula.title, formula.structure)?;
    }
    if let Some(grammar_box) = &speaking.grammar_box {
        let (should, shouldnt) = advice_columns(&grammar_box.lines);
        for line in should.iter().filter(|l| !l.is_empty()) {
            writeln!(out, "  {GREEN}+{RESET} {}", line)?;
        }
        for line in shouldnt.iter().filter(|l| !l.is_empty()) {
            writeln!(out, "  {RED}-{RESET} {}", line)?;
        }
    }
    for tip in &speaking.tips {
        writeln!(out, "{BOLD}{}{RESET} {}", tip.title, tip.text)?;
    }

    let (a, b) = student_prompts(&speaking.prompts);
    for (label, prompts) in [("Student A", a), ("Student B", b)] {
        if prompts.is_empty() {
            continue;
        }
        writeln!(out, "\n{BOLD}{}{RESET}", label)?;
        for prompt in prompts {
            writeln!(out, "  * {}", prompt)?;
        }
    }
    Ok(())
}

fn write_matching(out: &mut String, board: &MatchingBoard) -> fmt::Result {
    let paint = |id: u32, text: &str| match board.color_of(id) {
        Some(slot) => format!("{}{}{RESET}", slot.color().ansi_background(), text),
        None if board.armed() == Some(id) => format!("{BOLD}>{}{RESET}", text),
        None => text.to_string(),
    };

    writeln!(out, "{BOLD}Left{RESET}")?;
    for pair in board.left_column() {
        writeln!(out, "  l {} {}", pair.id, paint(pair.id, &pair.left))?;
    }
    writeln!(out, "{BOLD}Right{RESET}")?;
    for (position, pair) in board.right_column().enumerate() {
        let text = match board.color_of(pair.id) {
            Some(slot) => format!("{}{}{RESET}", slot.color().ansi_background(), pair.right),
            None => pair.right.clone(),
        };
        writeln!(out, "  r {} {}", list_label(position), text)?;
    }
    if board.is_solved() {
        writeln!(out, "\n{GREEN}All pairs matched.{RESET}")?;
    }
    Ok(())
}

fn write_checklist(out: &mut String, list: &Checklist) -> fmt::Result {
    for item in list.items() {
        let line = match list.status(item) {
            EntryStatus::Unchecked => format!("[ ] {}", item.text),
            EntryStatus::Checked => format!("[x] {}", item.text),
            EntryStatus::Correct => format!("{GREEN}[+] {}{RESET}", item.text),
            EntryStatus::Wrong => format!("{RED}[!] {}{RESET}", item.text),
            EntryStatus::Dimmed => format!("{DIM}[ ] {}{RESET}", item.text),
        };
        writeln!(out, "{}. {}", item.id, line)?;
    }
    if let Some(question) = list.extension_question() {
        writeln!(out, "\n{BOLD}{}{RESET}", question)?;
        if !list.extension_answer().is_empty() {
            writeln!(out, "> {}", list.extension_answer())?;
        }
    }
    Ok(())
}

fn write_accordion(out: &mut String, accordion: &Accordion) -> fmt::Result {
    for item in accordion.items() {
        let open = accordion.open_item() == Some(item.id);
        writeln!(out, "{} {}. {}", if open { "v" } else { ">" }, item.id, item.question)?;
        if let Some(answer) = accordion.answer(item.id) {
            writeln!(out, "    {GREEN}{}{RESET}", answer)?;
        }
    }
    Ok(())
}

fn write_scramble(out: &mut String, board: &ScrambleBoard) -> fmt::Result {
    for item in board.items() {
        let tokens = board.tokens(item.id).unwrap_or_default();
        if board.is_solved(item.id) {
            writeln!(out, "{}. {GREEN}{}{RESET}", item.id, tokens.join(" "))?;
            continue;
        }
        let numbered: Vec<String> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| format!("{DIM}{}{RESET}:{}", i + 1, token))
            .collect();
        writeln!(out, "{}. {}", item.id, numbered.join("  "))?;
    }
    Ok(())
}

fn write_imperatives(out: &mut String, board: &ImperativesBoard) -> fmt::Result {
    let content = board.content();
    if let Some(explanation) = &content.explanation {
        writeln!(out, "{}\n", explanation)?;
    }

    match board.mode() {
        Mode::Theory => {
            for q in &content.quiz {
                let sentence = board.quiz_sentence(q);
                if board.is_quiz_revealed(q.id) {
                    writeln!(out, "{}) {GREEN}{}{RESET}", q.id, sentence)?;
                } else {
                    writeln!(out, "{}) {}", q.id, sentence)?;
                }
                let options: Vec<String> = q
                    .options
                    .iter()
                    .enumerate()
                    .map(|(i, o)| format!("{}) {}", list_label(i), o))
                    .collect();
                writeln!(out, "   {DIM}{}{RESET}", options.join("  "))?;
            }
        }
        Mode::Practice => {
            if !content.word_bank.is_empty() {
                writeln!(out, "{BOLD}Word bank:{RESET} {}\n", content.word_bank.join(" | "))?;
            }
            for (i, sign) in content.signs.iter().enumerate() {
                if board.is_sign_revealed(i) {
                    writeln!(out, "{}. {} {GREEN}{}{RESET}", i + 1, sign.icon, sign.rule)?;
                } else {
                    writeln!(out, "{}. {} ?", i + 1, sign.icon)?;
                }
            }
        }
    }
    Ok(())
}

fn write_debrief(out: &mut String, board: &DebriefBoard) -> fmt::Result {
    for item in board.items() {
        writeln!(out, "[x] {}", item.text)?;
        writeln!(out, "    {DIM}{}{RESET}", item.reflection)?;
    }
    if board.is_stamped() {
        writeln!(out, "\n{GREEN}{BOLD}*** MISSION ACCOMPLISHED ***{RESET}")?;
    }
    Ok(())
}
