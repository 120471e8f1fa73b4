// WHY: diacritic-laden transliterations (Ḥajj, Ṣalāh) do not render in the app's Latin fonts
// Replacements run in declared order, each one global, so phrase entries must precede letters

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::debug;

/// Built-in replacement table. Whole terms first, then bare letters.
pub const DEFAULT_REPLACEMENTS: &[(&str, &str)] = &[
    ("Fātiḥah", "Fatihah"),
    ("Fāti ḥah", "Fatihah"),
    ("Muḥammad", "Muhammad"),
    ("Qurʾān", "Quran"),
    ("Sūrat", "Surat"),
    ("Sūrah", "Surah"),
    ("rakʿah", "rakah"),
    ("Ḥajj", "Hajj"),
    ("Janāba", "Janaba"),
    ("Janāzah", "Janazah"),
    ("Ṣalāh", "Salah"),
    ("ṣalāh", "salah"),
    ("Ṣalah", "Salah"),
    ("takbīr", "takbir"),
    ("Takbīr", "Takbir"),
    ("Kaʿbah", "Kabah"),
    ("Baitullāh", "Baitullah"),
    ("tawāf", "tawaf"),
    ("Kāfirūn", "Kafirun"),
    ("Ikhlāṣ", "Ikhlas"),
    ("Aḥmad", "Ahmad"),
    ("Dāwūd", "Dawud"),
    ("Tirmidhī", "Tirmidhi"),
    ("ḥ", "h"),
    ("Ḥ", "H"),
    ("ṣ", "s"),
    ("Ṣ", "S"),
    ("ṭ", "t"),
    ("Ṭ", "T"),
    ("ḍ", "d"),
    ("Ḍ", "D"),
    ("ẓ", "z"),
    ("Ẓ", "Z"),
    ("ā", "a"),
    ("Ā", "A"),
    ("ī", "i"),
    ("Ī", "I"),
    ("ū", "u"),
    ("Ū", "U"),
    ("ʿ", "'"),
    ("ʾ", "'"),
];

/// Ordered list of (pattern, replacement) pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementTable {
    entries: Vec<(String, String)>,
}

impl ReplacementTable {
    /// Build a table from explicit pairs, keeping their order
    pub fn new<I, P, R>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, R)>,
        P: Into<String>,
        R: Into<String>,
    {
        let entries: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(pattern, replacement)| (pattern.into(), replacement.into()))
            .collect();

        if let Some(index) = entries.iter().position(|(pattern, _)| pattern.is_empty()) {
            bail!("Replacement entry {index} has an empty pattern");
        }

        Ok(Self { entries })
    }

    /// Load a JSON array of `[pattern, replacement]` pairs
    pub async fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read replacement table: {}", path.display()))?;
        let pairs: Vec<(String, String)> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid replacement table: {}", path.display()))?;

        debug!("Loaded {} replacement entries from {}", pairs.len(), path.display());
        Self::new(pairs)
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every entry to `text`, in order, replacing all occurrences
    pub fn normalize(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (pattern, replacement) in &self.entries {
            if result.contains(pattern.as_str()) {
                result = result.replace(pattern.as_str(), replacement);
            }
        }
        result
    }
}

impl Default for ReplacementTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_REPLACEMENTS
                .iter()
                .map(|&(pattern, replacement)| (pattern.to_string(), replacement.to_string()))
                .collect(),
        }
    }
}

/// Normalize with the built-in table
pub fn normalize_transliteration(text: &str) -> String {
    ReplacementTable::default().normalize(text)
}
