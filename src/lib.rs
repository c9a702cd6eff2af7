//! Walks a directory tree, filters entries by inclusion/exclusion rules and
//! file extension, and concatenates the matching files into a single
//! annotated output file.

pub mod app;

pub use app::models::{RuntimeConfig, ScanSummary};
pub use app::scanner::Scanner;
pub use app::sink::OutputSink;
