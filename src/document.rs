// WHY: maps segmenter output onto content-page JSON documents
// Documents hold a `sections` array of `paragraph` (text) and `list` (items) sections

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use tracing::debug;

use crate::segmenter::{FormattedResult, ReplacementTable, Segment, Segmenter};

/// Field holding the segment list next to the original text
pub const FORMATTED_TEXT_FIELD: &str = "formatted_text";

/// Counts of what annotation changed in one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentChanges {
    pub paragraphs_formatted: usize,
    pub list_items_formatted: usize,
    /// Strings that only had transliterations normalized
    pub transliterations_fixed: usize,
}

impl DocumentChanges {
    pub fn has_changes(&self) -> bool {
        self.paragraphs_formatted + self.list_items_formatted + self.transliterations_fixed > 0
    }
}

/// What to do with one string field
enum TextAnnotation {
    Unchanged,
    Fixed(String),
    Formatted { text: String, segments: Value },
}

/// Annotates documents in place using a shared segmenter and replacement table
pub struct DocumentAnnotator<'a> {
    segmenter: &'a Segmenter,
    replacements: &'a ReplacementTable,
}

impl<'a> DocumentAnnotator<'a> {
    pub fn new(segmenter: &'a Segmenter, replacements: &'a ReplacementTable) -> Self {
        Self {
            segmenter,
            replacements,
        }
    }

    /// Annotate every paragraph and list section of `document`.
    ///
    /// Sections are rewritten on a copy and swapped in only when the whole
    /// document was accepted, so a rejected document is left as it was.
    pub fn annotate(&self, document: &mut Value) -> Result<DocumentChanges> {
        let Some(sections) = document.get("sections").and_then(Value::as_array) else {
            bail!("Document has no `sections` array");
        };

        let mut sections = sections.clone();
        let mut changes = DocumentChanges::default();

        for (index, section) in sections.iter_mut().enumerate() {
            let Some(section) = section.as_object_mut() else {
                bail!("Section {index} is not an object");
            };

            match section.get("type").and_then(Value::as_str) {
                Some("paragraph") => self.annotate_paragraph(section, index, &mut changes)?,
                Some("list") => self.annotate_list(section, index, &mut changes)?,
                other => debug!("Skipping section {} of type {:?}", index, other),
            }
        }

        document["sections"] = Value::Array(sections);
        Ok(changes)
    }

    fn annotate_paragraph(
        &self,
        section: &mut Map<String, Value>,
        index: usize,
        changes: &mut DocumentChanges,
    ) -> Result<()> {
        match section.get("text") {
            None => Ok(()),
            Some(Value::String(_)) => {
                match self.annotate_text_field(section)? {
                    TextOutcome::Formatted => changes.paragraphs_formatted += 1,
                    TextOutcome::Fixed => changes.transliterations_fixed += 1,
                    TextOutcome::Unchanged => {}
                }
                Ok(())
            }
            Some(_) => bail!("Section {index}: paragraph `text` is not a string"),
        }
    }

    fn annotate_list(
        &self,
        section: &mut Map<String, Value>,
        index: usize,
        changes: &mut DocumentChanges,
    ) -> Result<()> {
        let Some(items) = section.get_mut("items") else {
            return Ok(());
        };
        let Some(items) = items.as_array_mut() else {
            bail!("Section {index}: list `items` is not an array");
        };

        for (item_index, item) in items.iter_mut().enumerate() {
            match item {
                Value::String(original) => match self.annotate_text(original)? {
                    TextAnnotation::Formatted { text, segments } => {
                        let mut annotated = Map::new();
                        annotated.insert("text".to_string(), Value::String(text));
                        annotated.insert(FORMATTED_TEXT_FIELD.to_string(), segments);
                        *item = Value::Object(annotated);
                        changes.list_items_formatted += 1;
                    }
                    TextAnnotation::Fixed(text) => {
                        *item = Value::String(text);
                        changes.transliterations_fixed += 1;
                    }
                    TextAnnotation::Unchanged => {}
                },
                // Item annotated by an earlier run
                Value::Object(annotated) if annotated.get("text").is_some_and(Value::is_string) => {
                    match self.annotate_text_field(annotated)? {
                        TextOutcome::Formatted => changes.list_items_formatted += 1,
                        TextOutcome::Fixed => changes.transliterations_fixed += 1,
                        TextOutcome::Unchanged => {}
                    }
                }
                _ => bail!(
                    "Section {index}: list item {item_index} is neither a string nor an annotated item"
                ),
            }
        }

        Ok(())
    }

    /// Annotate the string `text` field of `object`, writing `formatted_text` beside it
    fn annotate_text_field(&self, object: &mut Map<String, Value>) -> Result<TextOutcome> {
        let Some(original) = object.get("text").and_then(Value::as_str) else {
            return Ok(TextOutcome::Unchanged);
        };

        match self.annotate_text(original)? {
            TextAnnotation::Formatted { text, segments } => {
                let text = Value::String(text);
                let already_annotated = object.get("text") == Some(&text)
                    && object.get(FORMATTED_TEXT_FIELD) == Some(&segments);
                if already_annotated {
                    return Ok(TextOutcome::Unchanged);
                }
                object.insert("text".to_string(), text);
                object.insert(FORMATTED_TEXT_FIELD.to_string(), segments);
                Ok(TextOutcome::Formatted)
            }
            TextAnnotation::Fixed(text) => {
                object.insert("text".to_string(), Value::String(text));
                Ok(TextOutcome::Fixed)
            }
            TextAnnotation::Unchanged => Ok(TextOutcome::Unchanged),
        }
    }

    fn annotate_text(&self, original: &str) -> Result<TextAnnotation> {
        let fixed = self.replacements.normalize(original);

        match self.segmenter.format_text(&fixed) {
            FormattedResult::Formatted(segments) => Ok(TextAnnotation::Formatted {
                segments: segments_to_value(&segments)?,
                text: fixed,
            }),
            FormattedResult::Plain(_) if fixed != original => Ok(TextAnnotation::Fixed(fixed)),
            FormattedResult::Plain(_) => Ok(TextAnnotation::Unchanged),
        }
    }
}

enum TextOutcome {
    Unchanged,
    Fixed,
    Formatted,
}

fn segments_to_value(segments: &[Segment]) -> Result<Value> {
    serde_json::to_value(segments).context("Failed to serialize segments")
}

/// Serialize a document with two-space indentation, keeping non-ASCII text verbatim
pub fn to_pretty_json(document: &Value) -> Result<String> {
    serde_json::to_string_pretty(document).context("Failed to serialize document")
}
