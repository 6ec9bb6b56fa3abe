//! Reading input files.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::io::{SourceReader, expand_patterns};
//!
//! # async fn example() -> pdfsplice::Result<()> {
//! let paths = expand_patterns(["chapters/*.pdf", "appendix.pdf"])?;
//! let sources = SourceReader::new().read_all(&paths).await?;
//! println!("Read {} file(s)", sources.len());
//! # Ok(())
//! # }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::PdfSource;
use crate::error::{Result, SpliceError};

/// Characters that make an input argument a glob pattern.
const GLOB_META: &[char] = &['*', '?', '['];

/// Check that `path` exists and is a regular file.
///
/// # Errors
///
/// - [`SpliceError::FileNotFound`] if nothing exists at `path`
/// - [`SpliceError::NotAFile`] if `path` is a directory or other non-file
pub async fn check_path_exists(path: &Path) -> Result<()> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(SpliceError::file_not_found(path.to_path_buf()));
        }
        Err(err) => {
            return Err(SpliceError::FailedToRead {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    if !metadata.is_file() {
        return Err(SpliceError::not_a_file(path.to_path_buf()));
    }

    Ok(())
}

/// Expand input arguments into file paths, keeping argument order.
///
/// Plain paths pass through untouched (their existence is checked when they
/// are read). Glob patterns expand to their matches in sorted order; a
/// pattern that matches nothing is reported as a missing file.
pub fn expand_patterns<I, S>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut resolved = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();

        if !pattern.contains(GLOB_META) {
            resolved.push(PathBuf::from(pattern));
            continue;
        }

        let entries =
            glob::glob(pattern).map_err(|err| SpliceError::invalid_pattern(pattern, err))?;

        let before = resolved.len();
        for entry in entries {
            let path = entry.map_err(|err| SpliceError::FailedToRead {
                path: err.path().to_path_buf(),
                source: err.into(),
            })?;
            resolved.push(path);
        }

        if resolved.len() == before {
            return Err(SpliceError::file_not_found(PathBuf::from(pattern)));
        }
        debug!(pattern, matches = resolved.len() - before, "expanded pattern");
    }

    Ok(resolved)
}

/// Reads input files into [`PdfSource`] values.
#[derive(Debug, Clone, Default)]
pub struct SourceReader;

impl SourceReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Read one file.
    ///
    /// The source is named after the file name of `path`. The bytes are not
    /// parsed here; a file that is not a PDF fails later, when it is opened.
    pub async fn read(&self, path: &Path) -> Result<PdfSource> {
        check_path_exists(path).await?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| SpliceError::FailedToRead {
                path: path.to_path_buf(),
                source: err,
            })?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!(path = %path.display(), bytes = bytes.len(), "read input file");

        Ok(PdfSource::new(name, bytes))
    }

    /// Read files one after another, in the order given.
    ///
    /// Stops at the first file that cannot be read.
    pub async fn read_all(&self, paths: &[PathBuf]) -> Result<Vec<PdfSource>> {
        let mut sources = Vec::with_capacity(paths.len());

        for path in paths {
            sources.push(self.read(path).await?);
        }

        Ok(sources)
    }
}
