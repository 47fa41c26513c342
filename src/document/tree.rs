use super::node::{Node, NodeId, NodeKind};

/// Arena slot of the document node.
pub const DOCUMENT_NODE: NodeId = 0;

/// An XML document stored in arena format.
///
/// The document is the sole owner of every node. Once built it is only ever
/// read; exporting a field never alters the tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root_element: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding only the document node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            root_element: None,
        }
    }

    /// Root element ID, `None` for a document without elements.
    pub fn root_element(&self) -> Option<NodeId> {
        self.root_element
    }

    /// Gets a node by ID. IDs are only ever issued by this document.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    /// Tag name of an element (empty for text-like nodes).
    pub fn name(&self, id: NodeId) -> &str {
        &self.node(id).name
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over all direct children of `parent` in document order.
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            document: self,
            next: self.node(parent).first_child,
        }
    }

    /// Concatenates the direct text and CDATA children of `id`.
    ///
    /// Nested elements, comments and processing instructions contribute
    /// nothing. Whitespace is returned untouched.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            let node = self.node(child);
            if node.is_character_data() {
                out.push_str(&node.content);
            }
        }
        out
    }

    /// Links `node` as the last child of `parent` and returns its ID.
    pub(crate) fn append(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = self.nodes.len() as NodeId;
        node.parent = Some(parent);
        if node.kind == NodeKind::Element && parent == DOCUMENT_NODE && self.root_element.is_none()
        {
            self.root_element = Some(id);
        }
        self.nodes.push(node);

        match self.nodes[parent as usize].last_child {
            Some(last) => self.nodes[last as usize].next_sibling = Some(id),
            None => self.nodes[parent as usize].first_child = Some(id),
        }
        self.nodes[parent as usize].last_child = Some(id);
        id
    }

    /// Appends character data to `parent`, merging with a trailing text node.
    ///
    /// Text split by entity references arrives in pieces; merging keeps one
    /// text node per run of character data.
    pub(crate) fn append_text(&mut self, parent: NodeId, text: &str) {
        if let Some(last) = self.nodes[parent as usize].last_child {
            let last = &mut self.nodes[last as usize];
            if last.kind == NodeKind::Text {
                last.content.push_str(text);
                return;
            }
        }
        self.append(parent, Node::text(text.to_string()));
    }
}

/// Iterator over the direct children of a node.
pub struct Children<'d> {
    document: &'d Document,
    next: Option<NodeId>,
}

impl<'d> Iterator for Children<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.document.node(current).next_sibling;
        Some(current)
    }
}
