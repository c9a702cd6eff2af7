use crate::app::models::{RuntimeConfig, ScanSummary};
use crate::app::sink::OutputSink;
use anyhow::{Context, Result};
use ignore::{DirEntry, WalkBuilder, WalkState};
use pathdiff::diff_paths;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

const REASON_EXCLUDED: &str = "Excluded";
const REASON_EXTENSION: &str = "Skipped (non-matching extension)";

pub struct Scanner<'a> {
    config: &'a RuntimeConfig,
    sink: &'a OutputSink,
    included: AtomicUsize,
    excluded: AtomicUsize,
    skipped: AtomicUsize,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a RuntimeConfig, sink: &'a OutputSink) -> Self {
        Self {
            config,
            sink,
            included: AtomicUsize::new(0),
            excluded: AtomicUsize::new(0),
            skipped: AtomicUsize::new(0),
        }
    }

    /// Walks the scan root with a bounded worker pool. Sibling entries are
    /// visited concurrently in arbitrary order, so blocks land in the output
    /// in no particular order; each block is a single append.
    pub fn scan(&self) -> ScanSummary {
        let walker = WalkBuilder::new(&self.config.scan_root)
            .hidden(false)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .parents(false)
            .follow_links(false)
            .build_parallel();

        walker.run(|| Box::new(|result| self.visit(result)));

        ScanSummary {
            included: self.included.load(Ordering::Relaxed),
            excluded: self.excluded.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }

    /// Classifies one entry and dispatches it. An unreadable directory only
    /// loses its own subtree; siblings keep going.
    fn visit(&self, result: std::result::Result<DirEntry, ignore::Error>) -> WalkState {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Cannot read entry: {err}");
                return WalkState::Continue;
            }
        };

        // The scan root itself is not an entry to classify.
        if entry.depth() == 0 {
            return WalkState::Continue;
        }

        let path = entry.path();

        // Never ingest our own output file.
        if path == self.config.output_path {
            return WalkState::Continue;
        }

        let rel = diff_paths(path, &self.config.base_dir)
            .unwrap_or_else(|| path.to_path_buf());
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());

        if is_excluded(&rel, entry.file_name(), &self.config.exclude_patterns) {
            self.excluded.fetch_add(1, Ordering::Relaxed);
            if self.config.show_excluded {
                self.record_skip(&rel, REASON_EXCLUDED);
            }
            // Excluded directories are pruned, excluded files just dropped.
            return if is_dir {
                WalkState::Skip
            } else {
                WalkState::Continue
            };
        }

        if is_dir {
            // A pruned directory produces no output block, unlike a skipped
            // file. Longstanding asymmetry; callers rely on it.
            return if should_descend(&rel, &self.config.include_dirs) {
                WalkState::Continue
            } else {
                WalkState::Skip
            };
        }

        let ext = file_extension(path);
        if !self.config.include_extensions.iter().any(|e| *e == ext) {
            self.skipped.fetch_add(1, Ordering::Relaxed);
            if self.config.show_skipped {
                self.record_skip(&rel, REASON_EXTENSION);
            }
            return WalkState::Continue;
        }

        if let Err(err) = self.append_file(path, &rel) {
            log::warn!("{err:#}");
        }
        WalkState::Continue
    }

    fn append_file(&self, path: &Path, rel: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.sink.append_file(&rel.to_string_lossy(), &content)?;
        self.included.fetch_add(1, Ordering::Relaxed);
        log::debug!("Added {}", rel.display());
        Ok(())
    }

    fn record_skip(&self, rel: &Path, reason: &str) {
        log::info!("{reason}: {}", rel.display());
        if let Err(err) = self.sink.append_skip(&rel.to_string_lossy(), reason) {
            log::warn!("{err:#}");
        }
    }
}

/// An entry is excluded when its display path contains any pattern as a
/// substring, or its basename equals one exactly.
pub fn is_excluded(rel: &Path, file_name: &OsStr, patterns: &[String]) -> bool {
    let rel_str = rel.to_string_lossy();
    patterns
        .iter()
        .any(|pat| rel_str.contains(pat.as_str()) || file_name == OsStr::new(pat))
}

/// Directories are entered only if no include list is set, or their path
/// contains one of the configured substrings.
pub fn should_descend(rel: &Path, include_dirs: &[String]) -> bool {
    if include_dirs.is_empty() {
        return true;
    }
    let rel_str = rel.to_string_lossy();
    include_dirs.iter().any(|dir| rel_str.contains(dir.as_str()))
}

/// Extension in dotted form, or empty for extension-less files.
fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
