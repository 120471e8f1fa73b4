use anyhow::Result;
use futures::stream::{Stream, StreamExt};
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Configuration for document discovery behavior
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Descend into subdirectories instead of scanning only the top level
    pub recursive: bool,
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
}

/// Result of document discovery validation
#[derive(Debug, Clone)]
pub struct FileValidation {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// Build the glob pattern for `*.json` documents under `root_dir`
/// WHY: the directory part is escaped so brackets or stars in real paths are literal
pub fn document_pattern(root_dir: &Path, recursive: bool) -> String {
    let escaped = Pattern::escape(&root_dir.to_string_lossy());
    if recursive {
        format!("{escaped}/**/*.json")
    } else {
        format!("{escaped}/*.json")
    }
}

/// Discovers all `*.json` documents under the given root directory.
/// Returns an async stream of validated file paths in glob order.
///
/// # Arguments
/// * `root_dir` - Directory holding the content-page documents
/// * `config` - Discovery configuration (recursion and fail_fast behavior)
pub fn discover_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> impl Stream<Item = Result<FileValidation>> {
    let root_path = root_dir.as_ref().to_path_buf();

    futures::stream::unfold(
        DiscoveryState::new(root_path, config),
        |mut state| async move {
            state.next_file().await.map(|result| (result, state))
        },
    )
}

/// Internal state for document discovery iteration
struct DiscoveryState {
    root_dir: PathBuf,
    config: DiscoveryConfig,
    glob_iter: Option<glob::Paths>,
}

impl DiscoveryState {
    fn new(root_dir: PathBuf, config: DiscoveryConfig) -> Self {
        Self {
            root_dir,
            config,
            glob_iter: None,
        }
    }

    async fn next_file(&mut self) -> Option<Result<FileValidation>> {
        if self.glob_iter.is_none() {
            let pattern = document_pattern(&self.root_dir, self.config.recursive);
            debug!("Starting document discovery with pattern: {}", pattern);

            match glob(&pattern) {
                Ok(paths) => {
                    self.glob_iter = Some(paths);
                    info!("Document discovery initialized for root: {}", self.root_dir.display());
                }
                Err(e) => {
                    return Some(Err(anyhow::anyhow!("Failed to create glob pattern: {}", e)));
                }
            }
        }

        loop {
            let glob_iter = self.glob_iter.as_mut()?;
            match glob_iter.next() {
                Some(Ok(path)) => {
                    debug!("Found document: {}", path.display());
                    return Some(self.validate_file(path).await);
                }
                Some(Err(e)) => {
                    let error_msg = format!("Glob iteration error: {e}");
                    warn!("{}", error_msg);

                    if self.config.fail_fast {
                        return Some(Err(anyhow::anyhow!(error_msg)));
                    }
                }
                None => {
                    info!("Document discovery completed");
                    return None;
                }
            }
        }
    }

    async fn validate_file(&self, path: PathBuf) -> Result<FileValidation> {
        debug!("Validating document: {}", path.display());

        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => Ok(FileValidation { path, error: None }),
            Ok(_) => {
                let error = format!("Path is not a file: {}", path.display());
                warn!("{}", error);
                Ok(FileValidation {
                    path,
                    error: Some(error),
                })
            }
            Err(e) => {
                let error = format!("Cannot access file {}: {}", path.display(), e);
                warn!("{}", error);

                if self.config.fail_fast {
                    Err(anyhow::anyhow!(error))
                } else {
                    Ok(FileValidation {
                        path,
                        error: Some(error),
                    })
                }
            }
        }
    }
}

/// Collect all discovered documents into a Vec sorted by path
pub async fn collect_discovered_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> Result<Vec<FileValidation>> {
    let mut files = Vec::new();
    let mut stream = Box::pin(discover_files(root_dir, config));

    while let Some(result) = stream.next().await {
        files.push(result?);
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));

    let valid_count = files.iter().filter(|f| f.error.is_none()).count();
    let invalid_count = files.len() - valid_count;

    if invalid_count > 0 {
        warn!("Found {} documents with validation issues", invalid_count);
    }

    info!("Document discovery summary: {} valid, {} invalid", valid_count, invalid_count);

    Ok(files)
}

/// Convenience function returning only the paths of accessible documents
pub async fn find_json_documents<P: AsRef<Path>>(
    root_dir: P,
    recursive: bool,
) -> Result<Vec<PathBuf>> {
    let config = DiscoveryConfig {
        recursive,
        fail_fast: false,
    };
    let validations = collect_discovered_files(root_dir, config).await?;

    Ok(validations
        .into_iter()
        .filter(|v| v.error.is_none())
        .map(|v| v.path)
        .collect())
}
