//! Arena node representation
//!
//! Nodes never own each other: every link is a [`NodeId`] into the
//! document's arena, so the whole tree is freed at once with the document.

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// Type of XML node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root (always arena slot 0)
    Document,
    /// Element node
    Element,
    /// Character data, entities already resolved
    Text,
    /// CDATA section
    CData,
    /// Comment
    Comment,
    /// Processing instruction
    ProcessingInstruction,
}

/// A node stored in the document arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Tag name for elements, target for processing instructions, empty otherwise
    pub name: String,
    /// Character content for text, CDATA and comment nodes
    pub content: String,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, name: String, content: String) -> Self {
        Node {
            kind,
            name,
            content,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
        }
    }

    pub(crate) fn document() -> Self {
        Self::new(NodeKind::Document, String::new(), String::new())
    }

    pub(crate) fn element(name: String) -> Self {
        Self::new(NodeKind::Element, name, String::new())
    }

    pub(crate) fn text(content: String) -> Self {
        Self::new(NodeKind::Text, String::new(), content)
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Returns `true` for an element carrying exactly this tag name.
    #[inline]
    pub fn is_element_named(&self, name: &str) -> bool {
        self.is_element() && self.name == name
    }

    #[inline]
    pub fn is_character_data(&self) -> bool {
        matches!(self.kind, NodeKind::Text | NodeKind::CData)
    }
}
