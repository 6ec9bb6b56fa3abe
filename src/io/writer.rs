//! Writing finished PDF buffers to disk.
//!
//! Writes are atomic: the buffer goes to a temporary file next to
//! the target, which is then renamed over it. A failed write never leaves a
//! truncated output behind.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::io::BufferWriter;
//! use std::path::Path;
//!
//! # async fn example(bytes: Vec<u8>) -> pdfsplice::Result<()> {
//! let stats = BufferWriter::new()
//!     .write(&bytes, Path::new("merged_document.pdf"))
//!     .await?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{Result, SpliceError};

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writes serialized PDFs to the filesystem.
#[derive(Debug, Clone, Default)]
pub struct BufferWriter;

impl BufferWriter {
    /// Create a writer.
    pub fn new() -> Self {
        Self
    }

    /// Write `bytes` to `path`, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::FailedToWrite`] if the directory cannot be
    /// created, the file cannot be written, or the final rename fails.
    pub async fn write(&self, bytes: &[u8], path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| SpliceError::FailedToWrite {
                    path: parent.to_path_buf(),
                    source: err,
                })?;
        }

        let write_path = temp_path(path);

        tokio::fs::write(&write_path, bytes)
            .await
            .map_err(|err| SpliceError::FailedToWrite {
                path: write_path.clone(),
                source: err,
            })?;

        if let Err(err) = tokio::fs::rename(&write_path, path).await {
            let _ = tokio::fs::remove_file(&write_path).await;
            return Err(SpliceError::FailedToWrite {
                path: path.to_path_buf(),
                source: err,
            });
        }

        let stats = WriteStatistics {
            write_time: start.elapsed(),
            file_size: bytes.len() as u64,
            output_path: path.to_path_buf(),
        };

        debug!(
            path = %path.display(),
            bytes = stats.file_size,
            "wrote output file"
        );

        Ok(stats)
    }

    /// Check if a file exists at `path`.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

/// `out/merged.pdf` becomes `out/merged.pdf.tmp`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
