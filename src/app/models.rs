use std::path::PathBuf;

/// Represents the final configuration after merging the config file and CLI args.
///
/// Built once before traversal begins and passed by reference to every
/// traversal call; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Directory the traversal starts from (absolute).
    pub scan_root: PathBuf,
    /// Invocation working directory; display paths are computed against it.
    pub base_dir: PathBuf,
    /// Substrings a directory path must contain to be entered (empty = all).
    pub include_dirs: Vec<String>,
    /// Substrings/basenames that exclude an entry from traversal and output.
    pub exclude_patterns: Vec<String>,
    /// Extensions (with leading dot) whose files are aggregated.
    pub include_extensions: Vec<String>,
    pub show_excluded: bool,
    pub show_skipped: bool,
    /// Aggregated output file (absolute).
    pub output_path: PathBuf,
}

/// Entry counts reported after a completed scan.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanSummary {
    pub included: usize,
    pub excluded: usize,
    pub skipped: usize,
}
