use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Append-only sink the whole traversal shares. Created empty at run start;
/// every block goes out as one discrete write, so concurrent visitors can
/// interleave whole blocks but never tear one.
pub struct OutputSink {
    file: Mutex<File>,
}

impl OutputSink {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends the content block for one included file.
    pub fn append_file(&self, rel: &str, content: &str) -> Result<()> {
        self.write_block(&format!("\n\n--- File: {rel} ---\n\n{content}\n"))
    }

    /// Appends the annotation block for an excluded or skipped entry.
    pub fn append_skip(&self, rel: &str, reason: &str) -> Result<()> {
        self.write_block(&format!("\n\n--- File: {rel} ---\n({reason})\n"))
    }

    fn write_block(&self, block: &str) -> Result<()> {
        let mut file = self
            .file
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        file.write_all(block.as_bytes())
            .context("Failed to append to output file")
    }
}
