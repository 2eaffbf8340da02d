use thiserror::Error;

use crate::deck::Key;
use crate::widget::{Action, Choice, Direction};

/// One line of presenter input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    /// zero-based slide index
    Goto(usize),
    GotoSlug(String),
    ToggleOverlay,
    Quit,
    Act(Action),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
n, next          next slide (or right arrow)
p, prev          previous slide (or left arrow)
g <number>       go to slide number
go <slug>        go to slide by slug
intel            show or hide the highlighted passage
a <id> <answer>  answer a question (t/f, a/b/c, or option number)
l <id>           select a left matching item
r <letter>       select a right matching item
mv <id> <pos> l|r  move a scramble word left or right
c <id>           check a scramble sentence
t <id>           tick a checklist entry
verify, reset    verify or reset the checklist
ext <text>       answer the extension question
o <id>           open a question
w <word>, close  look up a glossed word, close the popup
info             open or close the fact sheet
pick <n>         pick a poll option
fill <id> <text> fill a gap; check to check all gaps
sign <n>         reveal a sign
reveal <id>      reveal a quiz answer
q, quit          leave";

impl Command {
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        match Key::from_input(line) {
            Key::Right => return Ok(Command::Next),
            Key::Left => return Ok(Command::Prev),
            Key::Other => {}
        }

        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match head {
            "n" | "next" => Command::Next,
            "p" | "prev" | "previous" => Command::Prev,
            "g" => Command::Goto(one_based(args.first(), "g <number>")?),
            "go" if !rest.is_empty() => Command::GotoSlug(rest.to_string()),
            "go" => return Err(CommandError::Usage("go <slug>")),
            "intel" => Command::ToggleOverlay,
            "q" | "quit" | "exit" => Command::Quit,
            "a" => {
                let usage = "a <id> <answer>";
                let id = number(args.first(), usage)?;
                let choice = args
                    .get(1)
                    .and_then(|token| parse_choice(token))
                    .ok_or(CommandError::Usage(usage))?;
                Command::Act(Action::Answer { id, choice })
            }
            "l" => Command::Act(Action::SelectLeft(number(args.first(), "l <id>")?)),
            "r" => {
                let position = args
                    .first()
                    .and_then(|token| label_index(token))
                    .ok_or(CommandError::Usage("r <letter>"))?;
                Command::Act(Action::SelectRightAt(position))
            }
            "mv" => {
                let usage = "mv <id> <pos> l|r";
                let id = number(args.first(), usage)?;
                let position = one_based(args.get(1), usage)?;
                let direction = match args.get(2).copied() {
                    Some("l") | Some("left") => Direction::Left,
                    Some("r") | Some("right") => Direction::Right,
                    _ => return Err(CommandError::Usage(usage)),
                };
                Command::Act(Action::MoveToken {
                    id,
                    position,
                    direction,
                })
            }
            "c" => Command::Act(Action::CheckSentence(number(args.first(), "c <id>")?)),
            "t" => Command::Act(Action::Toggle(number(args.first(), "t <id>")?)),
            "verify" => Command::Act(Action::Verify),
            "reset" => Command::Act(Action::Reset),
            "ext" => Command::Act(Action::ExtensionAnswer(rest.to_string())),
            "o" => Command::Act(Action::Open(number(args.first(), "o <id>")?)),
            "w" if !rest.is_empty() => Command::Act(Action::Lookup(rest.to_string())),
            "w" => return Err(CommandError::Usage("w <word>")),
            "close" => Command::Act(Action::DismissWord),
            "info" => Command::Act(Action::ToggleFactSheet),
            "pick" => Command::Act(Action::Pick(one_based(args.first(), "pick <n>")?)),
            "fill" => {
                let usage = "fill <id> <text>";
                let id = number(args.first(), usage)?;
                let text = rest
                    .split_once(char::is_whitespace)
                    .map_or("", |(_, text)| text.trim());
                Command::Act(Action::Fill {
                    id,
                    text: text.to_string(),
                })
            }
            "check" => Command::Act(Action::CheckAnswers),
            "sign" => Command::Act(Action::RevealSign(one_based(args.first(), "sign <n>")?)),
            "reveal" => Command::Act(Action::RevealQuiz(number(args.first(), "reveal <id>")?)),
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

fn number<T: std::str::FromStr>(arg: Option<&&str>, usage: &'static str) -> Result<T, CommandError> {
    arg.and_then(|s| s.parse().ok())
        .ok_or(CommandError::Usage(usage))
}

/// A 1-based number as typed, converted to an index.
fn one_based(arg: Option<&&str>, usage: &'static str) -> Result<usize, CommandError> {
    let n: usize = number(arg, usage)?;
    n.checked_sub(1).ok_or(CommandError::Usage(usage))
}

/// A displayed list label (`a`, `b`, ... or a 1-based number) as an index.
fn label_index(token: &str) -> Option<usize> {
    let token = token.to_lowercase();
    if let Ok(n) = token.parse::<usize>() {
        return n.checked_sub(1);
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c @ 'a'..='z'), None) => Some(c as usize - 'a' as usize),
        _ => None,
    }
}

fn parse_choice(token: &str) -> Option<Choice> {
    let token = token.to_lowercase();
    match token.as_str() {
        "true" => return Some(Choice::Bool(true)),
        "false" => return Some(Choice::Bool(false)),
        _ => {}
    }
    if let Ok(n) = token.parse::<usize>() {
        return n.checked_sub(1).map(Choice::Index);
    }

    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() => Some(Choice::Letter(c)),
        _ => None,
    }
}
