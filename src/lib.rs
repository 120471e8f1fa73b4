pub mod discovery;
pub mod document;
pub mod processing;
pub mod segmenter;

// Re-export main types for convenient access
pub use segmenter::{
    contains_arabic, is_arabic_char, is_quran_verse, normalize_transliteration, split_arabic_english,
    FormattedResult, ReplacementTable, Segment, SegmentKind, Segmenter,
};

// Re-export document processing types
pub use document::{DocumentAnnotator, DocumentChanges};
pub use processing::{DocumentProcessor, FileStats, FileStatus, ProcessingConfig, RunStats};
