//! Machine-readable operation report, printed with `--json`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, SpliceError};
use crate::io::WriteStatistics;
use crate::ops::OperationStatistics;

/// Which workflow produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Merge several PDFs.
    Merge,
    /// Extract selected pages.
    Extract,
    /// Inspect a PDF.
    Info,
}

/// Outcome of one CLI invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationReport {
    /// Workflow that ran.
    pub operation: OperationKind,

    /// Whether the workflow produced its output.
    pub success: bool,

    /// The message shown to a human user.
    pub message: String,

    /// Input files, in the order they were used.
    pub inputs: Vec<PathBuf>,

    /// Output file, when one was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Pages in the output (or in the inspected file).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<usize>,

    /// Size of the written output in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_size: Option<u64>,

    /// Time spent in the page operation, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,

    /// Process exit code for failed runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl OperationReport {
    /// A successful run with the given user message.
    pub fn success(
        operation: OperationKind,
        message: impl Into<String>,
        inputs: Vec<PathBuf>,
    ) -> Self {
        Self {
            operation,
            success: true,
            message: message.into(),
            inputs,
            output: None,
            pages: None,
            output_size: None,
            elapsed_ms: None,
            exit_code: None,
        }
    }

    /// A failed run, described by `error`.
    pub fn failure(operation: OperationKind, error: &SpliceError, inputs: Vec<PathBuf>) -> Self {
        Self {
            success: false,
            exit_code: Some(error.exit_code()),
            ..Self::success(operation, error.user_message(), inputs)
        }
    }

    /// Attach operation and write statistics.
    pub fn with_statistics(
        mut self,
        operation: &OperationStatistics,
        write: &WriteStatistics,
    ) -> Self {
        self.output = Some(write.output_path.clone());
        self.pages = Some(operation.pages);
        self.output_size = Some(write.file_size);
        self.elapsed_ms = Some(operation.elapsed.as_millis() as u64);
        self
    }

    /// Attach a page count.
    pub fn with_pages(mut self, pages: usize) -> Self {
        self.pages = Some(pages);
        self
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(SpliceError::serialize_failed)
    }
}
