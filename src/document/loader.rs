use super::node::NodeId;
use super::tree::Document;
use crate::errors::{ExportError, ExportResult};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads and parses the document at `path`, then checks its root element.
///
/// # Arguments
///
/// * `path` - XML dump to load
/// * `root_name` - Name the root element must carry (normally `snipspace`)
///
/// # Returns
///
/// The parsed document together with the ID of its root element.
///
/// # Errors
///
/// - `ReadInput` if the file cannot be read
/// - `Parse` if the content is not well-formed XML
/// - `EmptyDocument` if there is no root element
/// - `WrongRoot` if the root element has another name
pub fn load_document(path: &Path, root_name: &str) -> ExportResult<(Document, NodeId)> {
    let content = fs::read(path).map_err(|source| ExportError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let document = Document::parse(&content)?;
    let root = verify_root(&document, root_name)?;

    debug!(
        path = %path.display(),
        nodes = document.node_count(),
        "Document loaded"
    );

    Ok((document, root))
}

/// Returns the root element if it exists and is named `root_name`.
pub fn verify_root(document: &Document, root_name: &str) -> ExportResult<NodeId> {
    let root = document.root_element().ok_or(ExportError::EmptyDocument)?;
    let found = document.name(root);
    if found != root_name {
        return Err(ExportError::WrongRoot {
            expected: root_name.to_string(),
            found: found.to_string(),
        });
    }
    Ok(root)
}
