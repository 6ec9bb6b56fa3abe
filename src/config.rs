//! Configuration module for pdfsplice.
//!
//! This module turns CLI arguments into validated configuration for the two
//! workflows (merge and extract). It handles:
//! - Defaults for output file names
//! - Compression and overwrite settings
//! - Validation of argument combinations

use anyhow::{Result, bail};

use crate::SpliceError;
use std::{path::PathBuf, str::FromStr};

/// Default output file name for the merge workflow.
pub const DEFAULT_MERGED_NAME: &str = "merged_document.pdf";

/// Default output file name for the extract workflow.
pub const DEFAULT_EXTRACTED_NAME: &str = "selected_pages.pdf";

/// Compression applied to the output PDF when it is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// Write streams exactly as they were copied.
    None,
    /// Flate-compress streams that allow it.
    #[default]
    Standard,
}

impl FromStr for CompressionLevel {
    type Err = SpliceError;

    /// Parse compression level from `"none"` or `"standard"` (case-insensitive).
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            _ => Err(SpliceError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard"
            ))),
        }
    }
}

/// Options used when serializing an output document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Stream compression.
    pub compression: CompressionLevel,
}

impl WriteOptions {
    /// Options that leave every stream uncompressed.
    pub fn uncompressed() -> Self {
        Self {
            compression: CompressionLevel::None,
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Settings shared by both workflows.
#[derive(Debug, Clone, Default)]
pub struct OutputSettings {
    /// Output PDF file path.
    pub output: PathBuf,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Serialization options.
    pub write: WriteOptions,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print a JSON report instead of human-readable messages.
    pub json: bool,
}

impl OutputSettings {
    fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if self.output.as_os_str().is_empty() {
            bail!("Output file name cannot be empty");
        }

        Ok(())
    }

    /// Whether human-readable messages should be printed.
    pub fn should_print(&self) -> bool {
        !self.quiet && !self.json
    }
}

/// Configuration for merging several PDFs into one.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Input PDF file paths (in merge order).
    pub inputs: Vec<PathBuf>,

    /// Output and reporting settings.
    pub settings: OutputSettings,
}

impl MergeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - The output path is one of the inputs
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!("No input files specified");
        }

        self.settings.validate()?;

        for input in &self.inputs {
            if input == &self.settings.output {
                bail!(
                    "Output file cannot be the same as an input file: {}",
                    self.settings.output.display()
                );
            }
        }

        Ok(())
    }
}

/// Configuration for extracting selected pages from one PDF.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Source PDF file path.
    pub input: PathBuf,

    /// Raw page list as typed by the user, e.g. `"1,3,5"`.
    pub pages: String,

    /// Output and reporting settings.
    pub settings: OutputSettings,
}

impl ExtractConfig {
    /// Validate the configuration.
    ///
    /// The page list itself is validated later against the source document.
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;

        if self.input == self.settings.output {
            bail!(
                "Output file cannot be the same as the input file: {}",
                self.settings.output.display()
            );
        }

        Ok(())
    }
}
