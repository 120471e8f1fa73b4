// WHY: character-class detection shared by every segmentation path
// Ranges cover Arabic, Arabic Supplement, Arabic Extended-A and Presentation Forms A/B

/// Inclusive code point ranges treated as Arabic script
pub const ARABIC_RANGES: &[(u32, u32)] = &[
    (0x0600, 0x06FF), // Arabic
    (0x0750, 0x077F), // Arabic Supplement
    (0x08A0, 0x08FF), // Arabic Extended-A
    (0xFB50, 0xFDFF), // Arabic Presentation Forms-A
    (0xFE70, 0xFEFF), // Arabic Presentation Forms-B
];

/// Classification of a single code point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterClass {
    Arabic,
    Other,
}

impl CharacterClass {
    pub fn of(ch: char) -> Self {
        if is_arabic_char(ch) {
            CharacterClass::Arabic
        } else {
            CharacterClass::Other
        }
    }
}

/// Check whether a code point falls in one of the Arabic ranges
pub fn is_arabic_char(ch: char) -> bool {
    let cp = ch as u32;
    ARABIC_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&cp))
}

/// Check whether any code point in `text` is Arabic
pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(is_arabic_char)
}
