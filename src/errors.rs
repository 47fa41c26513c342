use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Command line is missing a required argument
    #[error("{0}")]
    Usage(String),
    /// Configuration file is unreadable or invalid
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Input document could not be read from disk
    #[error("cannot read document {}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Input document is not well-formed XML
    #[error("document not parsed successfully: {reason}")]
    Parse { reason: String },
    /// Input document has no root element
    #[error("empty document")]
    EmptyDocument,
    /// Root element does not carry the expected name
    #[error("document of the wrong type, root node != {expected} (found <{found}>)")]
    WrongRoot { expected: String, found: String },
    /// Output directory could not be created (including "already exists")
    #[error("cannot create {} directory", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Requested field is not a direct child of the record or attachment
    #[error("file {}: no element <{field}> in <{parent}>", location.display())]
    MissingField {
        location: PathBuf,
        field: String,
        parent: String,
    },
    /// Output file could not be created
    #[error("cannot open file {}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Output file could not be written
    #[error("cannot write file {}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    /// Returns `true` for errors that abort the whole run.
    ///
    /// Per-field problems (missing element, open or write failure) are
    /// reported and skipped; everything else stops the export.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ExportError::MissingField { .. }
                | ExportError::OpenFile { .. }
                | ExportError::WriteFile { .. }
        )
    }
}

impl From<quick_xml::Error> for ExportError {
    fn from(err: quick_xml::Error) -> Self {
        ExportError::Parse {
            reason: err.to_string(),
        }
    }
}

// Custom type alias for Results in this application
pub type ExportResult<T> = Result<T, ExportError>;
