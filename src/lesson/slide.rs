use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use super::item::{
    ChecklistItem, DebriefItem, DrillItem, GrammarFormula, GrammarItem, GrammarQuizItem,
    ImperativeSign, KeyPoint, MatchingPair, PollOption, QaItem, QuestionMc, QuestionTf,
    ScrambleItem, Tip, Vocabulary,
};
use crate::media::{MediaKind, MediaRef};

#[derive(Debug, Clone)]
pub struct SlideRecord {
    /// unique within the lesson
    pub id: u32,
    pub title: String,
    pub subtitle: String,
    /// derived from the title, unique within the lesson
    pub slug: String,
    pub body: SlideBody,
}

/// Content payload, one variant per slide type.
#[derive(Debug, Clone)]
pub enum SlideBody {
    Cover(Cover),
    Objectives(Objectives),
    IceBreaker(IceBreaker),
    Reading(Reading),
    ComprehensionTf(Comprehension<QuestionTf>),
    ComprehensionMc(Comprehension<QuestionMc>),
    Grammar(Grammar),
    Speaking(Speaking),
    Drill(Drill),
    Matching(Matching),
    Media(Media),
    Checklist(Checklist),
    Qa(Comprehension<QaItem>),
    Scramble(Scramble),
    Imperatives(Imperatives),
    Debrief(Debrief),
    /// tag with no widget behind it, rendered as a placeholder
    Unsupported { tag: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cover {
    #[serde(default)]
    pub background_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objectives {
    pub objectives: Vec<String>,
    #[serde(default)]
    pub grammar: Vec<String>,
    #[serde(default)]
    pub vocabulary: Vec<String>,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub importance: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceBreaker {
    pub question: String,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub footnote: Option<String>,
    #[serde(flatten)]
    pub activity: IceBreakerActivity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IceBreakerActivity {
    Poll { options: Vec<PollOption> },
    ExternalLink { link_url: String, button_text: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    pub text: String,
    #[serde(default)]
    pub vocabulary: Vec<Vocabulary>,
    #[serde(default)]
    pub key_points: Vec<KeyPoint>,
    #[serde(default)]
    pub background_video: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub footer_image: Option<String>,
    #[serde(default)]
    pub audio_src: Option<String>,
}

/// Questions checked against a reference passage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comprehension<Q> {
    #[serde(default)]
    pub reference_text: Option<String>,
    pub questions: Vec<Q>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grammar {
    pub items: Vec<GrammarItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarBox {
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Speaking {
    #[serde(default)]
    pub grammar_formula: Option<GrammarFormula>,
    #[serde(default)]
    pub grammar_box: Option<GrammarBox>,
    #[serde(default)]
    pub tips: Vec<Tip>,
    #[serde(default)]
    pub prompts: Vec<String>,
    #[serde(default)]
    pub background_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drill {
    pub items: Vec<DrillItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matching {
    #[serde(default)]
    pub reference_text: Option<String>,
    pub pairs: Vec<MatchingPair>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(default)]
    pub reference_text: Option<String>,
    #[serde(default)]
    pub extension_question: Option<String>,
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scramble {
    pub items: Vec<ScrambleItem>,
}

/// Theory mode carries a quiz, practice mode carries signs and a word bank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Imperatives {
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub quiz: Vec<GrammarQuizItem>,
    #[serde(default)]
    pub word_bank: Vec<String>,
    #[serde(default)]
    pub signs: Vec<ImperativeSign>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debrief {
    pub checklist: Vec<DebriefItem>,
}

impl SlideBody {
    pub fn tag(&self) -> &str {
        match self {
            SlideBody::Cover(_) => "cover",
            SlideBody::Objectives(_) => "objectives",
            SlideBody::IceBreaker(_) => "ice_breaker",
            SlideBody::Reading(_) => "reading",
            SlideBody::ComprehensionTf(_) => "comprehension_tf",
            SlideBody::ComprehensionMc(_) => "comprehension_mc",
            SlideBody::Grammar(_) => "grammar",
            SlideBody::Speaking(_) => "speaking",
            SlideBody::Drill(_) => "drill",
            SlideBody::Matching(_) => "matching",
            SlideBody::Media(_) => "media",
            SlideBody::Checklist(_) => "checklist",
            SlideBody::Qa(_) => "qa",
            SlideBody::Scramble(_) => "scramble",
            SlideBody::Imperatives(_) => "imperatives",
            SlideBody::Debrief(_) => "debrief",
            SlideBody::Unsupported { tag } => tag,
        }
    }

    /// The passage shown by the reference overlay, if the slide has one.
    pub fn reference_text(&self) -> Option<&str> {
        let text = match self {
            SlideBody::ComprehensionTf(c) => c.reference_text.as_deref(),
            SlideBody::ComprehensionMc(c) => c.reference_text.as_deref(),
            SlideBody::Qa(c) => c.reference_text.as_deref(),
            SlideBody::Matching(m) => m.reference_text.as_deref(),
            SlideBody::Checklist(c) => c.reference_text.as_deref(),
            _ => None,
        };
        text.filter(|text| !text.is_empty())
    }

    pub fn media(&self) -> Vec<MediaRef<'_>> {
        let mut refs = Vec::new();

        match self {
            SlideBody::Cover(c) => push_media(&mut refs, MediaKind::Image, &c.background_image),
            SlideBody::IceBreaker(i) => {
                push_media(&mut refs, MediaKind::Image, &i.background_image);
                if let IceBreakerActivity::ExternalLink { link_url, .. } = &i.activity {
                    refs.push(MediaRef::new(MediaKind::Link, link_url));
                }
            }
            SlideBody::Reading(r) => {
                // a background video replaces the background image
                if r.background_video.is_some() {
                    push_media(&mut refs, MediaKind::Video, &r.background_video);
                } else {
                    push_media(&mut refs, MediaKind::Image, &r.background_image);
                }
                push_media(&mut refs, MediaKind::Audio, &r.audio_src);
                push_media(&mut refs, MediaKind::Image, &r.footer_image);
            }
            SlideBody::Speaking(s) => push_media(&mut refs, MediaKind::Image, &s.background_image),
            SlideBody::Media(m) => {
                refs.push(MediaRef::new(MediaKind::Link, &m.url));
                push_media(&mut refs, MediaKind::Image, &m.thumbnail);
            }
            _ => {}
        }

        refs
    }
}

fn push_media<'a>(refs: &mut Vec<MediaRef<'a>>, kind: MediaKind, path: &'a Option<String>) {
    if let Some(path) = path {
        refs.push(MediaRef::new(kind, path));
    }
}

/// A slide as it appears in a lesson document, before its content is typed.
#[derive(Debug, Deserialize)]
pub(super) struct RawSlide {
    pub id: u32,
    #[serde(rename = "type")]
    pub tag: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub content: Value,
}

impl RawSlide {
    /// A known tag whose content does not fit its schema degrades to the
    /// placeholder, like an unknown tag.
    pub fn into_record(self, slug: String) -> SlideRecord {
        let body = match parse_body(&self.tag, self.content) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(
                    slide = self.id,
                    tag = %self.tag,
                    error = %e,
                    "malformed slide content, using placeholder"
                );
                SlideBody::Unsupported {
                    tag: self.tag.clone(),
                }
            }
        };

        SlideRecord {
            id: self.id,
            title: self.title,
            subtitle: self.subtitle,
            slug,
            body,
        }
    }
}

fn parse_body(tag: &str, content: Value) -> Result<SlideBody, serde_json::Error> {
    Ok(match tag {
        "cover" => SlideBody::Cover(payload(content)?),
        "objectives" => SlideBody::Objectives(payload(content)?),
        "ice_breaker" => SlideBody::IceBreaker(payload(content)?),
        "reading" => SlideBody::Reading(payload(content)?),
        "comprehension_tf" => SlideBody::ComprehensionTf(payload(content)?),
        "comprehension_mc" => SlideBody::ComprehensionMc(payload(content)?),
        "grammar" => SlideBody::Grammar(payload(content)?),
        "speaking" => SlideBody::Speaking(payload(content)?),
        "drill" => SlideBody::Drill(payload(content)?),
        "matching" => SlideBody::Matching(payload(content)?),
        "media" => SlideBody::Media(payload(content)?),
        "checklist" => SlideBody::Checklist(payload(content)?),
        "qa" => SlideBody::Qa(payload(content)?),
        "scramble" => SlideBody::Scramble(payload(content)?),
        "imperatives" => SlideBody::Imperatives(payload(content)?),
        "debrief" => SlideBody::Debrief(payload(content)?),
        other => {
            tracing::warn!(tag = other, "slide type has no widget, using placeholder");
            SlideBody::Unsupported {
                tag: other.to_string(),
            }
        }
    })
}

fn payload<T: DeserializeOwned>(content: Value) -> Result<T, serde_json::Error> {
    match content {
        Value::Null => serde_json::from_value(Value::Object(Default::default())),
        other => serde_json::from_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(tag: &str, content: Value) -> RawSlide {
        RawSlide {
            id: 7,
            tag: tag.to_string(),
            title: "Title".to_string(),
            subtitle: String::new(),
            content,
        }
    }

    #[test]
    fn unknown_tag_becomes_placeholder() {
        let record = raw("mission_log", json!({"steps": []}))
            .into_record("title".into());
        assert!(matches!(record.body, SlideBody::Unsupported { ref tag } if tag == "mission_log"));
        assert_eq!(record.body.tag(), "mission_log");
    }

    #[test]
    fn malformed_known_tag_becomes_placeholder() {
        let record = raw("comprehension_tf", json!({"questions": [{"id": 1}]}))
            .into_record("intel-check".into());
        assert_eq!(record.id, 7);
        assert_eq!(record.slug, "intel-check");
        assert!(matches!(record.body, SlideBody::Unsupported { ref tag } if tag == "comprehension_tf"));
    }

    #[test]
    fn cover_without_content_is_accepted() {
        let record = raw("cover", Value::Null).into_record("title".into());
        assert!(matches!(record.body, SlideBody::Cover(Cover { background_image: None })));
    }

    #[test]
    fn ice_breaker_activity_is_flattened() {
        let record = raw(
            "ice_breaker",
            json!({
                "question": "Which one?",
                "type": "external_link",
                "link_url": "https://example.org/video",
                "button_text": "GO"
            }),
        )
        .into_record("title".into());

        let SlideBody::IceBreaker(ice) = &record.body else {
            panic!("expected ice breaker");
        };
        assert!(matches!(ice.activity, IceBreakerActivity::ExternalLink { .. }));
        assert_eq!(record.body.media().len(), 1);
        assert_eq!(record.body.media()[0].kind, MediaKind::Link);
    }

    #[test]
    fn blank_reference_text_counts_as_missing() {
        let record = raw("qa", json!({"reference_text": "", "questions": []}))
            .into_record("title".into());
        assert_eq!(record.body.reference_text(), None);
    }
}
