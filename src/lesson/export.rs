use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Write};

use super::slide::{IceBreakerActivity, SlideBody, SlideRecord};
use super::{LessonError, SlideStore};
use crate::widget::imperatives::fill_gap;

#[derive(Serialize, Debug)]
#[serde(untagged)]
enum Frontmatter<'a> {
    Id(u32),
    Title(&'a str),
    Subtitle(&'a str),
    Slug(&'a str),
    NextSlug(Option<&'a str>),
    Order(usize),
    Type(&'a str),
    Media(Vec<MediaMeta<'a>>),
    Slides(Vec<&'a str>),
}

#[derive(Serialize, Debug)]
struct MediaMeta<'a> {
    #[serde(rename = "type")]
    kind: String,
    path: &'a str,
}

/// Lesson-level metadata, written next to the slide files.
pub fn serialize_lesson_meta(store: &SlideStore) -> Result<String, LessonError> {
    let mut fm: BTreeMap<&str, Frontmatter> = BTreeMap::new();
    fm.insert("title", Frontmatter::Title(store.title()));
    fm.insert(
        "slides",
        Frontmatter::Slides(store.iter().map(|s| s.slug.as_str()).collect()),
    );

    Ok(serde_yaml_ng::to_string(&fm)?)
}

/// A slide as Markdown with YAML frontmatter, with the answer key spelled out.
pub fn serialize_slide(
    slide: &SlideRecord,
    order: usize,
    next_slug: Option<&str>,
) -> Result<String, LessonError> {
    let mut fm: BTreeMap<&str, Frontmatter> = BTreeMap::new();
    fm.insert("id", Frontmatter::Id(slide.id));
    fm.insert("title", Frontmatter::Title(slide.title.as_str()));
    fm.insert("subtitle", Frontmatter::Subtitle(slide.subtitle.as_str()));
    fm.insert("slug", Frontmatter::Slug(slide.slug.as_str()));
    fm.insert("next_slug", Frontmatter::NextSlug(next_slug));
    fm.insert("order", Frontmatter::Order(order));
    fm.insert("type", Frontmatter::Type(slide.body.tag()));

    let media: Vec<MediaMeta> = slide
        .body
        .media()
        .into_iter()
        .map(|m| MediaMeta {
            kind: m.kind.to_string(),
            path: m.path,
        })
        .collect();
    if !media.is_empty() {
        fm.insert("media", Frontmatter::Media(media));
    }

    Ok(format!(
        r#"---
{}---

# {}

{}"#,
        serde_yaml_ng::to_string(&fm)?,
        slide.title,
        body_markdown(&slide.body)
    ))
}

fn body_markdown(body: &SlideBody) -> String {
    let mut out = String::with_capacity(800);
    // writing into a String cannot fail
    let _ = write_body(&mut out, body);
    out
}

fn write_body(out: &mut String, body: &SlideBody) -> fmt::Result {
    match body {
        SlideBody::Cover(_) => {}
        SlideBody::Objectives(o) => {
            write_list(out, "Objectives", &o.objectives)?;
            write_list(out, "Grammar focus", &o.grammar)?;
            write_list(out, "Vocabulary", &o.vocabulary)?;
            writeln!(out, "{}\n\n> {}", o.context, o.importance)?;
        }
        SlideBody::IceBreaker(i) => {
            writeln!(out, "**{}**\n", i.question)?;
            match &i.activity {
                IceBreakerActivity::Poll { options } => {
                    for option in options {
                        writeln!(out, "- {} {}", option.icon, option.text)?;
                    }
                }
                IceBreakerActivity::ExternalLink {
                    link_url,
                    button_text,
                } => writeln!(out, "[{}]({})", button_text, link_url)?,
            }
            if let Some(prompt) = &i.prompt {
                writeln!(out, "\n_{}_", prompt)?;
            }
        }
        SlideBody::Reading(r) => {
            writeln!(out, "{}\n", r.text)?;
            for v in &r.vocabulary {
                writeln!(out, "- **{}**: {}", v.word, v.definition)?;
            }
            for point in &r.key_points {
                writeln!(out, "\n> **{}**: {}", point.title, point.content)?;
            }
        }
        SlideBody::ComprehensionTf(c) => {
            for q in &c.questions {
                let verdict = if q.is_true { "True" } else { "False" };
                writeln!(out, "{}. {} **{}**", q.id, q.statement, verdict)?;
                if let Some(explanation) = &q.explanation {
                    writeln!(out, "   _{}_", explanation)?;
                }
            }
        }
        SlideBody::ComprehensionMc(c) => {
            for q in &c.questions {
                writeln!(out, "{}. {}", q.id, q.question)?;
                for (i, option) in q.options.iter().enumerate() {
                    let mark = if i == q.correct_index { "x" } else { " " };
                    writeln!(out, "   - [{}] {}", mark, option)?;
                }
            }
        }
        SlideBody::Grammar(g) => {
            for item in &g.items {
                writeln!(
                    out,
                    "{}. {} _____ {} ({})",
                    item.id, item.prefix, item.suffix, item.correct_answer
                )?;
            }
        }
        SlideBody::Speaking(s) => {
            if let Some(formula) = &s.grammar_formula {
                writeln!(out, "**{}**: `{}`\n", formula.title, formula.structure)?;
            }
            if let Some(grammar_box) = &s.grammar_box {
                for line in &grammar_box.lines {
                    writeln!(out, "    {}", line)?;
                }
            }
            for tip in &s.tips {
                writeln!(out, "\n**{}**\n{}", tip.title, tip.text)?;
            }
            write_list(out, "Prompts", &s.prompts)?;
        }
        SlideBody::Drill(d) => {
            for item in &d.items {
                match &item.speaker {
                    Some(speaker) => writeln!(out, "- **{}**: {}", speaker, item.text)?,
                    None => writeln!(out, "- {}", item.text)?,
                }
            }
        }
        SlideBody::Matching(m) => {
            for pair in &m.pairs {
                writeln!(out, "{}. {} → {}", pair.id, pair.left, pair.right)?;
            }
        }
        SlideBody::Media(m) => writeln!(out, "<{}>", m.url)?,
        SlideBody::Checklist(c) => {
            for item in &c.items {
                let mark = if item.is_correct { "x" } else { " " };
                writeln!(out, "- [{}] {}", mark, item.text)?;
            }
            if let Some(question) = &c.extension_question {
                writeln!(out, "\n_{}_", question)?;
            }
        }
        SlideBody::Qa(c) => {
            for q in &c.questions {
                writeln!(out, "**Q{}. {}**\n{}\n", q.id, q.question, q.answer)?;
            }
        }
        SlideBody::Scramble(s) => {
            for item in &s.items {
                writeln!(out, "{}. {}", item.id, item.correct_sentence)?;
            }
        }
        SlideBody::Imperatives(i) => {
            for q in &i.quiz {
                writeln!(out, "{}) {}", q.id, fill_gap(q))?;
            }
            for sign in &i.signs {
                writeln!(out, "- {} {}", sign.icon, sign.rule)?;
            }
        }
        SlideBody::Debrief(d) => {
            for item in &d.checklist {
                writeln!(out, "- **{}**: {}", item.text, item.reflection)?;
            }
        }
        SlideBody::Unsupported { tag } => writeln!(out, "_content not implemented: {}_", tag)?,
    }

    Ok(())
}

fn write_list(out: &mut String, heading: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out, "## {}\n", heading)?;
    for item in items {
        writeln!(out, "- {}", item)?;
    }
    writeln!(out)
}
