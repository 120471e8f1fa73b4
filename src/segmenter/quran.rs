// WHY: ornate-bracket verse extraction, compiled once per Segmenter
// Uses regex-automata meta regex with leftmost-first, non-overlapping matches

use anyhow::Result;
use regex_automata::meta::Regex;
use tracing::debug;

use super::script::contains_arabic;
use super::Segment;

/// Opening ornate bracket ﴿ (U+FD3F, ORNATE RIGHT PARENTHESIS; opens in logical order)
pub const OPENING_BRACKET: char = '\u{FD3F}';
/// Closing ornate bracket ﴾ (U+FD3E, ORNATE LEFT PARENTHESIS)
pub const CLOSING_BRACKET: char = '\u{FD3E}';

/// Opening bracket, one or more non-closing characters, closing bracket
const VERSE_PATTERN: &str = r"\x{FD3F}([^\x{FD3E}]+)\x{FD3E}";

/// Coarse presence check: both brackets occur somewhere, in any order
pub fn is_quran_verse(text: &str) -> bool {
    text.contains(OPENING_BRACKET) && text.contains(CLOSING_BRACKET)
}

/// Matcher for bracketed verses
#[derive(Debug, Clone)]
pub struct VerseMatcher {
    regex: Regex,
}

impl VerseMatcher {
    pub fn new() -> Result<Self> {
        let regex = Regex::new(VERSE_PATTERN)?;
        debug!("Compiled verse pattern: {}", VERSE_PATTERN);
        Ok(Self { regex })
    }

    /// Split `text` into verse segments and the trimmed text around them.
    ///
    /// An opening bracket with no closing bracket after it is not a verse; it
    /// stays part of the surrounding text.
    pub fn extract_segments(&self, text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut last_end = 0;

        for caps in self.regex.captures_iter(text) {
            let (Some(whole), Some(inner)) = (caps.get_match(), caps.get_group(1)) else {
                continue;
            };

            push_surrounding_text(&mut segments, &text[last_end..whole.start()]);
            segments.push(Segment::quran_verse(text[inner.range()].trim()));
            last_end = whole.end();
        }

        push_surrounding_text(&mut segments, &text[last_end..]);
        segments
    }
}

/// Emit trimmed non-verse text as Arabic or plain, skipping it when empty
fn push_surrounding_text(segments: &mut Vec<Segment>, raw: &str) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    if contains_arabic(trimmed) {
        segments.push(Segment::arabic(trimmed));
    } else {
        segments.push(Segment::plain(trimmed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::SegmentKind;

    fn matcher() -> VerseMatcher {
        VerseMatcher::new().unwrap()
    }

    #[test]
    fn test_bracket_constants_match_glyphs() {
        assert_eq!(OPENING_BRACKET, '﴿');
        assert_eq!(CLOSING_BRACKET, '﴾');
        assert_eq!(OPENING_BRACKET as u32, 0xFD3F);
        assert_eq!(CLOSING_BRACKET as u32, 0xFD3E);
    }

    #[test]
    fn test_verses_around_plain_text() {
        let segments = matcher().extract_segments("﴿الحمد لله﴾ praise ﴿رب العالمين﴾");
        assert_eq!(
            segments,
            vec![
                Segment::quran_verse("الحمد لله"),
                Segment::plain("praise"),
                Segment::quran_verse("رب العالمين"),
            ]
        );
    }

    #[test]
    fn test_is_quran_verse_requires_both_brackets() {
        assert!(is_quran_verse("﴿الحمد لله﴾"));
        assert!(is_quran_verse("﴾ reversed ﴿"));
        assert!(!is_quran_verse("﴿ open only"));
        assert!(!is_quran_verse("close only ﴾"));
        assert!(!is_quran_verse("no brackets"));
    }

    #[test]
    fn test_verse_then_translation() {
        let segments = matcher().extract_segments("﴿قُلْ هُوَ اللَّهُ أَحَدٌ﴾ Say: He is Allah, the One.");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], Segment::quran_verse("قُلْ هُوَ اللَّهُ أَحَدٌ"));
        assert_eq!(segments[1], Segment::plain("Say: He is Allah, the One."));
    }

    #[test]
    fn test_text_before_and_between_verses() {
        let text = "Allah says: ﴿ إِنَّ مَعَ الْعُسْرِ يُسْرًا ﴾ and ﴿فَاذْكُرُونِي﴾ end";
        let segments = matcher().extract_segments(text);
        let kinds: Vec<_> = segments.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SegmentKind::PlainText,
                SegmentKind::QuranVerse,
                SegmentKind::PlainText,
                SegmentKind::QuranVerse,
                SegmentKind::PlainText,
            ]
        );
        assert_eq!(segments[0].content, "Allah says:");
        assert_eq!(segments[1].content, "إِنَّ مَعَ الْعُسْرِ يُسْرًا");
        assert_eq!(segments[2].content, "and");
        assert_eq!(segments[4].content, "end");
    }

    #[test]
    fn test_surrounding_arabic_gets_arabic_font() {
        let segments = matcher().extract_segments("بسم الله ﴿الحمد لله﴾");
        assert_eq!(segments[0], Segment::arabic("بسم الله"));
        assert_eq!(segments[1], Segment::quran_verse("الحمد لله"));
    }

    #[test]
    fn test_unterminated_bracket_falls_into_trailing_text() {
        let segments = matcher().extract_segments("﴿أحد﴾ then ﴿unterminated");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].kind, SegmentKind::QuranVerse);
        // Trailing text keeps the stray bracket, which is itself Arabic
        assert_eq!(segments[1], Segment::arabic("then ﴿unterminated"));
    }

    #[test]
    fn test_nested_opening_brackets_pair_with_first_closing() {
        let segments = matcher().extract_segments("﴿﴿inner﴾ tail﴾");
        assert_eq!(segments[0], Segment::quran_verse("﴿inner"));
        assert_eq!(segments[1], Segment::arabic("tail﴾"));
    }

    #[test]
    fn test_empty_brackets_do_not_match() {
        let segments = matcher().extract_segments("﴿﴾");
        assert_eq!(segments, vec![Segment::arabic("﴿﴾")]);
    }

    #[test]
    fn test_whitespace_only_gaps_are_dropped() {
        let segments = matcher().extract_segments("  ﴿أ﴾   ﴿ب﴾  ");
        assert_eq!(segments, vec![Segment::quran_verse("أ"), Segment::quran_verse("ب")]);
    }
}
