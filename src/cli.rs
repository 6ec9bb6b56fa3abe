//! CLI argument parsing for pdfsplice.
//!
//! The two subcommands mirror the two tabs of a form: `merge` collects
//! several files and an output name, `extract` collects one file, a page
//! list and an output name. `info` prints the page count of a file so the
//! user knows which pages exist.
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//! use pdfsplice::cli::{Cli, Command};
//!
//! let cli = Cli::parse();
//! if let Command::Merge(args) = &cli.command {
//!     println!("Merging {} input(s)", args.inputs.len());
//! }
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{
    CompressionLevel, DEFAULT_EXTRACTED_NAME, DEFAULT_MERGED_NAME, ExtractConfig, MergeConfig,
    OutputSettings, OverwriteMode, WriteOptions,
};
use crate::error::{Result, SpliceError};
use crate::form::{EXTRACT_INPUT_MESSAGE, MERGE_INPUT_MESSAGE};
use crate::io::expand_patterns;
use crate::output::OperationKind;

/// Merge PDF files or extract selected pages into a new document.
#[derive(Parser, Debug)]
#[command(name = "pdfsplice")]
#[command(version)]
#[command(about = "Merge PDF files or extract selected pages into a new document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Workflow to run.
    #[command(subcommand)]
    pub command: Command,

    /// Flags shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags accepted before or after any subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Verbose output - show statistics and log page operations
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print a JSON report on stdout instead of human-readable messages
    #[arg(long, global = true)]
    pub json: bool,
}

/// The available workflows.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge PDF files into one document, in the order given
    ///
    /// Examples:
    ///   pdfsplice merge a.pdf b.pdf -o merged_document.pdf
    ///   pdfsplice merge 'chapters/*.pdf' -o book.pdf
    Merge(MergeArgs),

    /// Copy selected pages of one PDF into a new document
    ///
    /// Examples:
    ///   pdfsplice extract report.pdf --pages 1,3,5
    ///   pdfsplice extract report.pdf --pages 3,1,1 -o reordered.pdf
    Extract(ExtractArgs),

    /// Show the page count and version of a PDF
    Info(InfoArgs),
}

impl Command {
    /// The report kind for this subcommand.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Merge(_) => OperationKind::Merge,
            Self::Extract(_) => OperationKind::Extract,
            Self::Info(_) => OperationKind::Info,
        }
    }

    /// Input arguments exactly as given on the command line.
    pub fn raw_inputs(&self) -> Vec<PathBuf> {
        match self {
            Self::Merge(args) => args.inputs.iter().map(PathBuf::from).collect(),
            Self::Extract(args) => args.input.iter().cloned().collect(),
            Self::Info(args) => vec![args.input.clone()],
        }
    }
}

/// Output flags shared by `merge` and `extract`.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Compression level for output PDF
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard"])]
    pub compression: String,
}

impl OutputArgs {
    fn overwrite_mode(&self) -> OverwriteMode {
        if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        }
    }

    fn output_or(&self, default_name: &str) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_name))
    }

    fn to_settings(&self, output: PathBuf, global: &GlobalArgs) -> Result<OutputSettings> {
        Ok(OutputSettings {
            output,
            overwrite_mode: self.overwrite_mode(),
            write: WriteOptions {
                compression: CompressionLevel::from_str(&self.compression)?,
            },
            verbose: global.verbose,
            quiet: global.quiet,
            json: global.json,
        })
    }
}

/// Arguments of `merge`.
#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Input PDF files or glob patterns, merged in the order given
    #[arg(value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output options.
    #[command(flatten)]
    pub output: OutputArgs,
}

impl MergeArgs {
    /// Convert into a validated [`MergeConfig`], expanding glob patterns.
    ///
    /// # Errors
    ///
    /// - [`SpliceError::MissingFormInput`] if no inputs or an empty output
    ///   name were given
    /// - pattern errors from [`expand_patterns`]
    /// - [`SpliceError::InvalidConfig`] if validation fails
    pub fn to_config(&self, global: &GlobalArgs) -> Result<MergeConfig> {
        let output = self.output.output_or(DEFAULT_MERGED_NAME);
        if self.inputs.is_empty() || output.as_os_str().is_empty() {
            return Err(SpliceError::missing_form_input(MERGE_INPUT_MESSAGE));
        }

        let config = MergeConfig {
            inputs: expand_patterns(&self.inputs)?,
            settings: self.output.to_settings(output, global)?,
        };
        config.validate()?;

        Ok(config)
    }
}

/// Arguments of `extract`.
#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Source PDF file
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Pages to extract, comma-separated and 1-based (e.g. "1,3,5")
    ///
    /// Pages are copied in the order listed; a page may be listed twice.
    #[arg(short, long, value_name = "LIST")]
    pub pages: Option<String>,

    /// Output options.
    #[command(flatten)]
    pub output: OutputArgs,
}

impl ExtractArgs {
    /// Convert into a validated [`ExtractConfig`].
    ///
    /// The page list is checked later, against the source document.
    pub fn to_config(&self, global: &GlobalArgs) -> Result<ExtractConfig> {
        let output = self.output.output_or(DEFAULT_EXTRACTED_NAME);

        let (Some(input), Some(pages)) = (&self.input, &self.pages) else {
            return Err(SpliceError::missing_form_input(EXTRACT_INPUT_MESSAGE));
        };
        if pages.is_empty() || output.as_os_str().is_empty() {
            return Err(SpliceError::missing_form_input(EXTRACT_INPUT_MESSAGE));
        }

        let config = ExtractConfig {
            input: input.clone(),
            pages: pages.clone(),
            settings: self.output.to_settings(output, global)?,
        };
        config.validate()?;

        Ok(config)
    }
}

/// Arguments of `info`.
#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    /// PDF file to inspect
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}
