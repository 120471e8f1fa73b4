// WHY: splits Arabic phrases embedded in English prose (duas, hadith) without verse brackets

use super::script::CharacterClass;
use super::Segment;

/// Split `text` into alternating Arabic and plain runs.
///
/// Runs are emitted in character order with no trimming, so concatenating the
/// segment contents gives back `text`. Whitespace is neutral: it stays inside an
/// Arabic run only when the next non-whitespace character is Arabic too,
/// otherwise it belongs to the plain run that follows or precedes it. Every class
/// change closes the current run, so two adjacent segments never share a kind.
pub fn split_arabic_english(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current: Option<(CharacterClass, String)> = None;
    // Whitespace seen after an Arabic run, not yet assigned to a side
    let mut pending = String::new();

    for ch in text.chars() {
        let class = CharacterClass::of(ch);
        match (current.as_mut(), class) {
            (Some((CharacterClass::Arabic, _)), CharacterClass::Other) if ch.is_whitespace() => {
                pending.push(ch);
            }
            (Some((run_class, buffer)), _) if *run_class == class => {
                buffer.push_str(&pending);
                pending.clear();
                buffer.push(ch);
            }
            _ => {
                if let Some((run_class, buffer)) = current.take() {
                    segments.push(to_segment(run_class, buffer));
                }
                let mut buffer = std::mem::take(&mut pending);
                buffer.push(ch);
                current = Some((class, buffer));
            }
        }
    }

    if let Some((run_class, buffer)) = current {
        segments.push(to_segment(run_class, buffer));
    }
    if !pending.is_empty() {
        segments.push(Segment::plain(pending));
    }

    segments
}

fn to_segment(class: CharacterClass, content: String) -> Segment {
    match class {
        CharacterClass::Arabic => Segment::arabic(content),
        CharacterClass::Other => Segment::plain(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arabic_sandwiched_in_english() {
        let segments = split_arabic_english("Recite: اللهم اغفر لي in your duas");
        assert_eq!(
            segments,
            vec![
                Segment::plain("Recite: "),
                Segment::arabic("اللهم اغفر لي"),
                Segment::plain(" in your duas"),
            ]
        );
    }

    #[test]
    fn test_all_english_is_single_plain_segment() {
        let segments = split_arabic_english("Only English here.");
        assert_eq!(segments, vec![Segment::plain("Only English here.")]);
    }

    #[test]
    fn test_all_arabic_is_single_arabic_segment() {
        let segments = split_arabic_english("سبحان الله");
        assert_eq!(segments, vec![Segment::arabic("سبحان الله")]);
    }

    #[test]
    fn test_leading_arabic() {
        let segments = split_arabic_english("بسم الله - In the name of Allah");
        assert_eq!(segments[0], Segment::arabic("بسم الله"));
        assert_eq!(segments[1], Segment::plain(" - In the name of Allah"));
    }

    #[test]
    fn test_trailing_whitespace_after_arabic_is_plain() {
        let segments = split_arabic_english("Say الحمد لله  ");
        assert_eq!(
            segments,
            vec![
                Segment::plain("Say "),
                Segment::arabic("الحمد لله"),
                Segment::plain("  "),
            ]
        );
    }

    #[test]
    fn test_punctuation_between_arabic_words_splits() {
        let segments = split_arabic_english("الله, أكبر");
        assert_eq!(
            segments,
            vec![
                Segment::arabic("الله"),
                Segment::plain(", "),
                Segment::arabic("أكبر"),
            ]
        );
    }

    #[test]
    fn test_unterminated_bracket_is_arabic_run() {
        let segments = split_arabic_english("﴿no closing bracket here");
        assert_eq!(
            segments,
            vec![Segment::arabic("﴿"), Segment::plain("no closing bracket here")]
        );
    }

    #[test]
    fn test_empty_input_yields_no_segments() {
        assert!(split_arabic_english("").is_empty());
    }

    #[test]
    fn test_no_adjacent_segments_share_a_kind() {
        let inputs = [
            "a ب c د e",
            "ﷺ Prophet ﷺ",
            "x\u{FE70}y\u{0750}z",
            "  leading space then عربي  \n",
            "Recite: اللهم اغفر لي in your duas",
        ];
        for input in inputs {
            let segments = split_arabic_english(input);
            for pair in segments.windows(2) {
                assert_ne!(pair[0].kind, pair[1].kind, "adjacent kinds repeat for {input:?}");
            }
            let rebuilt: String = segments.iter().map(|s| s.content.as_str()).collect();
            assert_eq!(rebuilt, input);
        }
    }
}
