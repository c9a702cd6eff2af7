use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Flatten a directory tree into a single annotated context file"
)]
pub struct Cli {
    /// Directory to start scanning from
    #[arg(long, value_name = "DIR")]
    pub scan: Option<PathBuf>,

    /// Comma-separated substrings a directory path must contain to be entered
    #[arg(long, value_delimiter = ',', value_name = "DIRS")]
    pub include: Option<Vec<String>>,

    /// Comma-separated substrings or basenames to exclude entirely
    #[arg(long, value_delimiter = ',', value_name = "PATTERNS")]
    pub exclude: Option<Vec<String>>,

    /// Comma-separated file extensions to aggregate (e.g. '.rs,.toml')
    #[arg(long, value_delimiter = ',', value_name = "EXTS")]
    pub extensions: Option<Vec<String>>,

    /// Annotate excluded entries in the output (bare flag means true)
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub show_excluded: Option<bool>,

    /// Annotate files skipped for their extension (bare flag means true)
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub show_skipped: Option<bool>,

    /// Path of the aggregated output file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
