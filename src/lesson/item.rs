use serde::{Deserialize, Serialize};

/// An item that can point back into a slide's reference passage.
pub trait Cited {
    fn id(&self) -> u32;
    fn context_highlight(&self) -> Option<&str>;
}

macro_rules! cited {
    ($($item:ty),+) => {
        $(impl Cited for $item {
            fn id(&self) -> u32 {
                self.id
            }

            fn context_highlight(&self) -> Option<&str> {
                self.context_highlight.as_deref()
            }
        })+
    };
}

cited!(QuestionTf, QuestionMc, QaItem, MatchingPair, ChecklistItem);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionTf {
    pub id: u32,
    pub statement: String,
    pub is_true: bool,
    #[serde(default)]
    pub explanation: Option<String>,
    /// verbatim excerpt of the reference passage that answers the statement
    #[serde(default)]
    pub context_highlight: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconType {
    #[default]
    General,
    Military,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionMc {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub icon_type: IconType,
    #[serde(default)]
    pub context_highlight: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaItem {
    pub id: u32,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub context_highlight: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingPair {
    pub id: u32,
    pub left: String,
    pub right: String,
    #[serde(default)]
    pub context_highlight: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: u32,
    pub text: String,
    pub is_correct: bool,
    #[serde(default)]
    pub context_highlight: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrambleItem {
    pub id: u32,
    /// word tokens, in any order
    pub parts: Vec<String>,
    pub correct_sentence: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarItem {
    pub id: u32,
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    /// accepted answers separated by `/`, e.g. "should/should not"
    pub correct_answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarQuizItem {
    pub id: u32,
    /// sentence with a `_____` gap
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillItem {
    pub id: u32,
    #[serde(default)]
    pub speaker: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub word: String,
    pub definition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPoint {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollOption {
    pub icon: String,
    pub text: String,
    #[serde(default)]
    pub subtext: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImperativeSign {
    pub icon: String,
    pub rule: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebriefItem {
    pub text: String,
    pub reflection: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tip {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarFormula {
    pub title: String,
    pub structure: String,
}
