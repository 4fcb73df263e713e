//! Core data model for the daily dashboard
//!
//! A `Content` value is one day's devotional bundle: a verse of the day, a
//! longer passage, a reflection, reflection questions, a prayer focus, a theme,
//! an attribute of God, a gospel connection and a historical event. Field names
//! on the wire are camelCase to match what the dashboard backend produces.

mod fallback;

pub use fallback::{bundled_content, StaticFallback};

use serde::{Deserialize, Serialize};

/// One day's devotional dashboard
///
/// Treated as immutable once produced: callers share it behind an `Arc` and
/// replace it wholesale rather than editing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// ISO-8601 timestamp of when the content was generated
    pub date: String,
    pub verse: VerseOfDay,
    pub passage: Passage,
    pub devotional: Devotional,
    pub questions: ReflectionQuestions,
    pub prayer: PrayerFocus,
    pub theme: Theme,
    pub attribute: Attribute,
    pub gospel: GospelConnection,
    pub history: HistoricalEvent,
}

/// Verse of the day with its surrounding context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseOfDay {
    pub text: String,
    pub reference: String,
    pub context: String,
    #[serde(default)]
    pub cross_references: Vec<String>,
    pub gospel_connection: String,
}

/// A longer passage for the day's reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passage {
    pub reference: String,
    pub text: String,
    #[serde(default)]
    pub outline: Vec<String>,
    pub author: String,
    pub historical_setting: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Devotional {
    pub title: String,
    pub scripture_quote: String,
    pub short_reflection: String,
    pub long_reflection: String,
    pub application: String,
    pub prayer_guide: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionQuestions {
    pub heart_check: String,
    pub belief_check: String,
    pub obedience_check: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerFocus {
    pub focus_theme: String,
    pub scripture: String,
    pub guided_prayer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub theme: String,
    pub key_verse: String,
    #[serde(default)]
    pub supporting_verses: Vec<String>,
}

/// An attribute of God with a scripture proof
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub attribute: String,
    pub definition: String,
    pub scripture_proof: String,
    pub worship_response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GospelConnection {
    pub truth: String,
    pub reference: String,
    pub explanation: String,
}

/// A historical event from scripture, framed by what came before and after
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalEvent {
    pub event: String,
    pub reference: String,
    pub description: String,
    pub timeline: Timeline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub before: String,
    pub during: String,
    pub after: String,
}

/// Scripture quote shown at the top of the standalone devotional view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scripture {
    pub text: String,
    pub reference: String,
}

/// The devotional section reshaped for the standalone devotional view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevotionalView {
    pub title: String,
    pub scripture: Scripture,
    pub reflection: String,
    pub prayer: String,
    pub step_of_faith: String,
    pub tags: Vec<String>,
}

/// Named sections of the dashboard, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Verse,
    Passage,
    Devotional,
    Questions,
    Prayer,
    Theme,
    Attribute,
    Gospel,
    History,
}

impl Section {
    /// All sections in display order
    pub const ALL: [Section; 9] = [
        Section::Verse,
        Section::Passage,
        Section::Devotional,
        Section::Questions,
        Section::Prayer,
        Section::Theme,
        Section::Attribute,
        Section::Gospel,
        Section::History,
    ];

    /// Short label used for tabs
    pub fn title(&self) -> &'static str {
        match self {
            Section::Verse => "Verse",
            Section::Passage => "Passage",
            Section::Devotional => "Devotional",
            Section::Questions => "Questions",
            Section::Prayer => "Prayer",
            Section::Theme => "Theme",
            Section::Attribute => "Attribute",
            Section::Gospel => "Gospel",
            Section::History => "History",
        }
    }
}

impl Content {
    /// Projects the devotional section into the standalone devotional view
    pub fn devotional_view(&self) -> DevotionalView {
        DevotionalView {
            title: self.devotional.title.clone(),
            scripture: Scripture {
                text: self.devotional.scripture_quote.clone(),
                reference: "Daily Verse".to_string(),
            },
            reflection: self.devotional.long_reflection.clone(),
            prayer: self.devotional.prayer_guide.clone(),
            step_of_faith: self.devotional.application.clone(),
            tags: Vec::new(),
        }
    }

    /// Renders one section as labelled plain-text lines
    ///
    /// Each entry is `(label, body)`; an empty label marks a continuation
    /// line such as a list item.
    pub fn section_lines(&self, section: Section) -> Vec<(&'static str, String)> {
        let list = |items: &[String]| -> Vec<(&'static str, String)> {
            items.iter().map(|item| ("", format!("• {}", item))).collect()
        };

        match section {
            Section::Verse => {
                let mut lines = vec![
                    ("Reference", self.verse.reference.clone()),
                    ("Text", self.verse.text.clone()),
                    ("Context", self.verse.context.clone()),
                    ("Gospel connection", self.verse.gospel_connection.clone()),
                    ("Cross references", String::new()),
                ];
                lines.extend(list(&self.verse.cross_references));
                lines
            }
            Section::Passage => {
                let mut lines = vec![
                    ("Reference", self.passage.reference.clone()),
                    ("Author", self.passage.author.clone()),
                    ("Setting", self.passage.historical_setting.clone()),
                    ("Text", self.passage.text.clone()),
                    ("Outline", String::new()),
                ];
                lines.extend(list(&self.passage.outline));
                lines
            }
            Section::Devotional => vec![
                ("Title", self.devotional.title.clone()),
                ("Scripture", self.devotional.scripture_quote.clone()),
                ("Summary", self.devotional.short_reflection.clone()),
                ("Reflection", self.devotional.long_reflection.clone()),
                ("Application", self.devotional.application.clone()),
                ("Prayer", self.devotional.prayer_guide.clone()),
            ],
            Section::Questions => vec![
                ("Heart", self.questions.heart_check.clone()),
                ("Belief", self.questions.belief_check.clone()),
                ("Obedience", self.questions.obedience_check.clone()),
            ],
            Section::Prayer => vec![
                ("Focus", self.prayer.focus_theme.clone()),
                ("Scripture", self.prayer.scripture.clone()),
                ("Prayer", self.prayer.guided_prayer.clone()),
            ],
            Section::Theme => {
                let mut lines = vec![
                    ("Theme", self.theme.theme.clone()),
                    ("Key verse", self.theme.key_verse.clone()),
                    ("Supporting verses", String::new()),
                ];
                lines.extend(list(&self.theme.supporting_verses));
                lines
            }
            Section::Attribute => vec![
                ("Attribute", self.attribute.attribute.clone()),
                ("Definition", self.attribute.definition.clone()),
                ("Scripture", self.attribute.scripture_proof.clone()),
                ("Response", self.attribute.worship_response.clone()),
            ],
            Section::Gospel => vec![
                ("Truth", self.gospel.truth.clone()),
                ("Reference", self.gospel.reference.clone()),
                ("Explanation", self.gospel.explanation.clone()),
            ],
            Section::History => vec![
                ("Event", self.history.event.clone()),
                ("Reference", self.history.reference.clone()),
                ("Description", self.history.description.clone()),
                ("Before", self.history.timeline.before.clone()),
                ("During", self.history.timeline.during.clone()),
                ("After", self.history.timeline.after.clone()),
            ],
        }
    }
}
