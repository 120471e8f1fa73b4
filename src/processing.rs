// WHY: per-file load, annotate and save, plus the statistics the CLI reports
// Each document is independent; a failing document never affects the others

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::document::{to_pretty_json, DocumentAnnotator, DocumentChanges};
use crate::segmenter::{ReplacementTable, Segmenter};

/// Configuration for document processing
#[derive(Debug, Clone, Default)]
pub struct ProcessingConfig {
    /// Compute annotations without writing any document back
    pub dry_run: bool,
    /// Abort the run on the first failing document
    pub fail_fast: bool,
}

/// Outcome of processing one document
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Modified,
    /// Changes found during a dry run, nothing written
    WouldModify,
    Unchanged,
    Failed,
}

/// Per-file processing statistics
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileStats {
    pub path: String,
    pub status: FileStatus,
    pub paragraphs_formatted: usize,
    pub list_items_formatted: usize,
    pub transliterations_fixed: usize,
    pub processing_time_ms: u64,
    pub error: Option<String>,
}

impl FileStats {
    fn new(path: &Path, status: FileStatus, changes: DocumentChanges, started: Instant) -> Self {
        Self {
            path: path.display().to_string(),
            status,
            paragraphs_formatted: changes.paragraphs_formatted,
            list_items_formatted: changes.list_items_formatted,
            transliterations_fixed: changes.transliterations_fixed,
            processing_time_ms: started.elapsed().as_millis() as u64,
            error: None,
        }
    }
}

/// Whole-run statistics, written with `--stats-out`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunStats {
    pub run_start_epoch_ms: u64,
    pub total_processing_time_ms: u64,
    pub dry_run: bool,
    pub files_modified: usize,
    pub files_unchanged: usize,
    pub files_failed: usize,
    pub file_stats: Vec<FileStats>,
}

impl RunStats {
    fn new(run_start_epoch_ms: u64, dry_run: bool) -> Self {
        Self {
            run_start_epoch_ms,
            total_processing_time_ms: 0,
            dry_run,
            files_modified: 0,
            files_unchanged: 0,
            files_failed: 0,
            file_stats: Vec::new(),
        }
    }

    fn record(&mut self, stats: FileStats) {
        match stats.status {
            FileStatus::Modified | FileStatus::WouldModify => self.files_modified += 1,
            FileStatus::Unchanged => self.files_unchanged += 1,
            FileStatus::Failed => self.files_failed += 1,
        }
        self.file_stats.push(stats);
    }

    /// Paths of documents that were (or in a dry run would be) rewritten
    pub fn modified_paths(&self) -> impl Iterator<Item = &str> {
        self.file_stats
            .iter()
            .filter(|s| matches!(s.status, FileStatus::Modified | FileStatus::WouldModify))
            .map(|s| s.path.as_str())
    }

    pub async fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize run stats")?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write stats file: {}", path.display()))?;
        info!("Run stats written to {}", path.display());
        Ok(())
    }
}

/// Loads, annotates and saves content-page documents
pub struct DocumentProcessor {
    segmenter: Segmenter,
    replacements: ReplacementTable,
    config: ProcessingConfig,
}

impl DocumentProcessor {
    pub fn new(replacements: ReplacementTable, config: ProcessingConfig) -> Result<Self> {
        Ok(Self {
            segmenter: Segmenter::new()?,
            replacements,
            config,
        })
    }

    /// Process one document.
    ///
    /// Failures are reported in the returned stats unless `fail_fast` is set,
    /// in which case they are returned as errors.
    pub async fn process_file(&self, path: &Path) -> Result<FileStats> {
        let started = Instant::now();
        debug!("Processing document: {}", path.display());

        match self.annotate_file(path).await {
            Ok(changes) => {
                let status = match (changes.has_changes(), self.config.dry_run) {
                    (false, _) => FileStatus::Unchanged,
                    (true, true) => FileStatus::WouldModify,
                    (true, false) => FileStatus::Modified,
                };
                info!(
                    path = %path.display(),
                    ?status,
                    paragraphs = changes.paragraphs_formatted,
                    list_items = changes.list_items_formatted,
                    fixed = changes.transliterations_fixed,
                    "Document processed"
                );
                Ok(FileStats::new(path, status, changes, started))
            }
            Err(e) => {
                warn!("Failed to process {}: {:#}", path.display(), e);
                if self.config.fail_fast {
                    return Err(e);
                }
                let mut stats =
                    FileStats::new(path, FileStatus::Failed, DocumentChanges::default(), started);
                stats.error = Some(format!("{e:#}"));
                Ok(stats)
            }
        }
    }

    /// Process documents in order, calling `on_file` after each one
    pub async fn process_files<F>(&self, paths: &[PathBuf], mut on_file: F) -> Result<RunStats>
    where
        F: FnMut(&FileStats),
    {
        let run_started = Instant::now();
        let run_start_epoch_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64);
        let mut run_stats = RunStats::new(run_start_epoch_ms, self.config.dry_run);

        for path in paths {
            let stats = self.process_file(path).await?;
            on_file(&stats);
            run_stats.record(stats);
        }

        run_stats.total_processing_time_ms = run_started.elapsed().as_millis() as u64;
        info!(
            modified = run_stats.files_modified,
            unchanged = run_stats.files_unchanged,
            failed = run_stats.files_failed,
            "Run completed"
        );
        Ok(run_stats)
    }

    async fn annotate_file(&self, path: &Path) -> Result<DocumentChanges> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut document: Value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;

        let annotator = DocumentAnnotator::new(&self.segmenter, &self.replacements);
        let changes = annotator
            .annotate(&mut document)
            .with_context(|| format!("Malformed document {}", path.display()))?;

        if changes.has_changes() && !self.config.dry_run {
            write_document(path, &document).await?;
        }

        Ok(changes)
    }
}

/// Replace `path` with the serialized document via a sibling temporary file
async fn write_document(path: &Path, document: &Value) -> Result<()> {
    let json = to_pretty_json(document)?;
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    if let Err(e) = tokio::fs::write(&tmp_path, json).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(e).with_context(|| format!("Failed to write {}", tmp_path.display()));
    }
    tokio::fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    debug!("Saved {}", path.display());
    Ok(())
}
