mod entities;
mod loader;
mod node;
mod traversal;
mod tree;
mod xml_parser;

// Re-export public API
pub use entities::EntityTable;
pub use loader::{load_document, verify_root};
pub use node::{Node, NodeId, NodeKind};
pub use traversal::Siblings;
pub use tree::{Children, Document, DOCUMENT_NODE};
