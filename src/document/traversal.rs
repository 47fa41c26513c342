use super::node::NodeId;
use super::tree::Document;

impl Document {
    /// Scans forward from `cursor` (inclusive) for an element named `name`.
    fn seek_element(&self, mut cursor: Option<NodeId>, name: &str) -> Option<NodeId> {
        while let Some(id) = cursor {
            let node = self.node(id);
            if node.is_element_named(name) {
                return Some(id);
            }
            cursor = node.next_sibling;
        }
        None
    }

    /// First direct child element of `parent` named `name`.
    pub fn first_child_named(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.seek_element(self.node(parent).first_child, name)
    }

    /// Next following sibling element of `node` named `name`.
    pub fn next_sibling_named(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.seek_element(self.node(node).next_sibling, name)
    }

    /// Lazily walks the direct child elements of `parent` named `name`.
    ///
    /// Text, CDATA, comments and processing instructions are skipped, as are
    /// elements with another name. Building a new iterator restarts the walk.
    pub fn children_named<'d>(&'d self, parent: NodeId, name: &'d str) -> Siblings<'d> {
        Siblings {
            document: self,
            next: self.node(parent).first_child,
            name,
        }
    }
}

/// Forward-only sequence of same-named sibling elements, in document order.
///
/// Holds at most one node of lookahead: the raw sibling after the element
/// it last returned.
pub struct Siblings<'d> {
    document: &'d Document,
    next: Option<NodeId>,
    name: &'d str,
}

impl<'d> Iterator for Siblings<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.document.seek_element(self.next, self.name)?;
        self.next = self.document.node(current).next_sibling;
        Some(current)
    }
}
