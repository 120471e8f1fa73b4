// WHY: Main segmenter interface, splits mixed-script strings into font-tagged segments
// Downstream renderers pick a font per segment: Quranic verses, other Arabic, plain English

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod mixed;
pub mod quran;
pub mod script;
pub mod transliteration;

// Re-export core functions
pub use mixed::split_arabic_english;
pub use quran::{is_quran_verse, VerseMatcher, CLOSING_BRACKET, OPENING_BRACKET};
pub use script::{contains_arabic, is_arabic_char, CharacterClass};
pub use transliteration::{normalize_transliteration, ReplacementTable};

/// Font hint for Arabic text outside verse brackets
pub const ARABIC_FONT: &str = "Noto Kufi Arabic";
/// Font hint for Quranic verses
pub const QURAN_FONT: &str = "Amiri Quran";

/// Kind of a segment, named as it appears in the output documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    #[serde(rename = "english_text")]
    PlainText,
    #[serde(rename = "arabic_text")]
    ArabicText,
    #[serde(rename = "quran_verse")]
    QuranVerse,
}

/// A contiguous span of text tagged for rendering.
///
/// Serializes as `{"type": ..., "text": ..., "font": ...}` with `font` omitted
/// for plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    #[serde(rename = "text")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl Segment {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::PlainText,
            content: content.into(),
            font: None,
        }
    }

    pub fn arabic(content: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::ArabicText,
            content: content.into(),
            font: Some(ARABIC_FONT.to_string()),
        }
    }

    pub fn quran_verse(content: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::QuranVerse,
            content: content.into(),
            font: Some(QURAN_FONT.to_string()),
        }
    }
}

/// Outcome of formatting one string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedResult {
    /// Nothing to format, the text is used as-is
    Plain(String),
    /// Ordered segments to attach next to the original text
    Formatted(Vec<Segment>),
}

impl FormattedResult {
    pub fn is_formatted(&self) -> bool {
        matches!(self, FormattedResult::Formatted(_))
    }

    pub fn segments(&self) -> Option<&[Segment]> {
        match self {
            FormattedResult::Formatted(segments) => Some(segments),
            FormattedResult::Plain(_) => None,
        }
    }
}

/// Top-level formatter
#[derive(Debug, Clone)]
pub struct Segmenter {
    verses: VerseMatcher,
}

impl Segmenter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            verses: VerseMatcher::new()?,
        })
    }

    /// Format `text` into typed segments, or return it unchanged when it has no Arabic
    pub fn format_text(&self, text: &str) -> FormattedResult {
        if !contains_arabic(text) {
            return FormattedResult::Plain(text.to_string());
        }

        if is_quran_verse(text) {
            return FormattedResult::Formatted(self.extract_quran_segments(text));
        }

        let segments = split_arabic_english(text);
        let worth_formatting = segments.len() > 1
            || (segments.len() == 1 && segments[0].kind == SegmentKind::ArabicText);
        if worth_formatting {
            FormattedResult::Formatted(segments)
        } else {
            FormattedResult::Plain(text.to_string())
        }
    }

    /// Verse segments plus the trimmed text between them
    pub fn extract_quran_segments(&self, text: &str) -> Vec<Segment> {
        self.verses.extract_segments(text)
    }
}
