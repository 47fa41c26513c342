//! snipexport library
//!
//! This crate provides the core functionality for the `snipexport` binary,
//! which turns a SnipSnap XML dump into a flat directory of per-field files.
//!
//! ## Overview
//!
//! - [`document`] - Arena XML tree, loader and same-name sibling traversal
//! - [`exporter`] - Record and attachment export, output file naming
//! - [`config`] - Root name, index width and default field lists, optionally from TOML
//! - [`reporter`] - Diagnostics prefixed with the program name
//! - [`cli`] - Command-line interface and exit status
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use snipexport::config::ExportConfig;
//! use snipexport::exporter::{export, ExportRequest};
//! use snipexport::reporter::Reporter;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), snipexport::errors::ExportError> {
//! let request = ExportRequest {
//!     input: PathBuf::from("snipsnap-backup.xml"),
//!     output_dir: PathBuf::from("snips"),
//!     element: "snip".to_string(),
//!     fields: vec!["name".to_string(), "content".to_string(), "attachments".to_string()],
//! };
//! let mut reporter = Reporter::stderr("snipexport");
//! let summary = export(&request, &ExportConfig::default(), &mut reporter)?;
//! println!("{} records exported", summary.records);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod document;
pub mod errors;
pub mod exporter;
pub mod reporter;
pub mod utils;
