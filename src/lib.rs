//! pdfsplice - Merge PDF files or extract selected pages into a new document.
//!
//! The library offers two stateless operations over in-memory PDFs:
//!
//! - **merge**: concatenate every page of several documents, source by
//!   source, in the order the sources are given
//! - **extract**: copy an ordered list of 1-based pages out of one document;
//!   pages may repeat, and the first invalid entry aborts the operation
//!
//! Around them sit a form-style workflow layer ([`form`]), file I/O
//! ([`io`]) and the `pdfsplice` command line ([`cli`], [`app`]).
//!
//! # Examples
//!
//! ## Merge
//!
//! ```no_run
//! use pdfsplice::document::PdfSource;
//!
//! # fn example() -> pdfsplice::Result<()> {
//! let sources = vec![
//!     PdfSource::new("a.pdf", std::fs::read("a.pdf")?),
//!     PdfSource::new("b.pdf", std::fs::read("b.pdf")?),
//! ];
//! let merged = pdfsplice::ops::merge(&sources)?;
//! std::fs::write("merged_document.pdf", merged)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Extract
//!
//! ```no_run
//! use pdfsplice::document::PdfSource;
//! use pdfsplice::form::split_page_list;
//!
//! # fn example() -> pdfsplice::Result<()> {
//! let source = PdfSource::new("report.pdf", std::fs::read("report.pdf")?);
//! let selected = pdfsplice::ops::extract(&source, &split_page_list("3,1,1"))?;
//! std::fs::write("selected_pages.pdf", selected)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod form;
pub mod io;
pub mod logging;
pub mod ops;
pub mod output;

// Re-export commonly used types
pub use document::PdfSource;
pub use error::{Result, SpliceError};
pub use ops::{extract, merge};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
