//! User-facing output: formatted messages and the JSON report.

pub mod formatter;
pub mod report;

pub use formatter::{MessageLevel, OutputFormatter};
pub use report::{OperationKind, OperationReport};
