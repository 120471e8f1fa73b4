use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;

use arabseg::discovery::{self, DiscoveryConfig};
use arabseg::processing::{DocumentProcessor, FileStats, FileStatus, ProcessingConfig};
use arabseg::ReplacementTable;

#[derive(Parser, Debug)]
#[command(name = "arabseg")]
#[command(about = "Annotates JSON content pages with Arabic and Quranic text segments")]
#[command(version)]
struct Args {
    /// Directory holding the *.json content pages
    root_dir: PathBuf,

    /// Report what would change without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Also process documents in subdirectories
    #[arg(long)]
    recursive: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// JSON array of [pattern, replacement] pairs replacing the built-in transliteration table
    #[arg(long)]
    replacements: Option<PathBuf>,

    /// Suppress console progress bar
    #[arg(long)]
    no_progress: bool,

    /// Write run statistics as JSON to this path
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();

    info!("Starting arabseg");
    info!(?args, "Parsed CLI arguments");

    if !args.root_dir.exists() {
        anyhow::bail!("Root directory does not exist: {}", args.root_dir.display());
    }

    if !args.root_dir.is_dir() {
        anyhow::bail!("Root path is not a directory: {}", args.root_dir.display());
    }

    let replacements = match &args.replacements {
        Some(path) => ReplacementTable::from_json_file(path).await?,
        None => ReplacementTable::default(),
    };
    info!("Using {} transliteration replacements", replacements.len());

    let discovery_config = DiscoveryConfig {
        recursive: args.recursive,
        fail_fast: args.fail_fast,
    };
    let discovered = discovery::collect_discovered_files(&args.root_dir, discovery_config).await?;
    let paths: Vec<PathBuf> = discovered
        .iter()
        .filter(|f| f.error.is_none())
        .map(|f| f.path.clone())
        .collect();

    println!("Found {} JSON files to process", paths.len());
    for file in discovered.iter().filter(|f| f.error.is_some()) {
        if let Some(ref error) = file.error {
            println!("  Skipping {}: {}", file.path.display(), error);
        }
    }
    if args.dry_run {
        println!("*** DRY RUN MODE - No files will be modified ***");
    }
    println!("{}", "=".repeat(80));

    let processor = DocumentProcessor::new(
        replacements,
        ProcessingConfig {
            dry_run: args.dry_run,
            fail_fast: args.fail_fast,
        },
    )?;

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(paths.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .context("Invalid progress bar template")?,
        );
        bar
    };

    let run_stats = processor
        .process_files(&paths, |stats| {
            for line in describe_file(stats) {
                report(&progress, line);
            }
            progress.inc(1);
        })
        .await?;
    progress.finish_and_clear();

    println!("{}", "=".repeat(80));
    let verb = if args.dry_run { "would be modified" } else { "modified" };
    println!("Summary: {} files {}:", run_stats.files_modified, verb);
    for path in run_stats.modified_paths() {
        println!("  - {}", display_name(path));
    }
    if run_stats.files_failed > 0 {
        println!("{} files failed:", run_stats.files_failed);
        for stats in run_stats.file_stats.iter().filter(|s| s.status == FileStatus::Failed) {
            println!(
                "  - {}: {}",
                display_name(&stats.path),
                stats.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
    if args.dry_run {
        println!("*** DRY RUN COMPLETE - Run without --dry-run to apply changes ***");
    }

    if let Some(ref stats_path) = args.stats_out {
        run_stats.write_json(stats_path).await?;
    }

    Ok(())
}

/// Human-readable report lines for one processed document
fn describe_file(stats: &FileStats) -> Vec<String> {
    let mut lines = vec![format!("Processing: {}", display_name(&stats.path))];

    if stats.paragraphs_formatted > 0 {
        lines.push(format!("  ✓ Formatted {} paragraph(s)", stats.paragraphs_formatted));
    }
    if stats.list_items_formatted > 0 {
        lines.push(format!("  ✓ Formatted {} list item(s)", stats.list_items_formatted));
    }
    if stats.transliterations_fixed > 0 {
        lines.push(format!(
            "  ✓ Fixed special characters in {} field(s)",
            stats.transliterations_fixed
        ));
    }

    match stats.status {
        FileStatus::Modified => lines.push("  ✓ Saved changes".to_string()),
        FileStatus::WouldModify => lines.push("  - Dry run, not saved".to_string()),
        FileStatus::Unchanged => lines.push("  - No changes needed".to_string()),
        FileStatus::Failed => lines.push(format!(
            "  ✗ Failed: {}",
            stats.error.as_deref().unwrap_or("unknown error")
        )),
    }

    lines
}

fn display_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .map_or_else(|| path.to_string(), |name| name.to_string_lossy().to_string())
}

/// Print a report line on stdout, clearing the stderr progress bar while it is written
fn report(progress: &ProgressBar, line: String) {
    progress.suspend(|| println!("{line}"));
}
