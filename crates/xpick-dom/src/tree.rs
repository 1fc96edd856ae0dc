//! DOM Tree (arena-based allocation)

use crate::{
    DOMRect, DomError, ElementData, InlineStyle, InternedString, Node, NodeId, StringInterner,
    initial_value,
};

/// Arena-based DOM tree. Slot 0 is always the document node.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its document node, so it is empty when nothing
    /// else was added.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned string
    pub fn resolve(&self, id: InternedString) -> &str {
        self.interner.get(id)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let tag = self.interner.intern(tag);
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.push(Node::doctype(name.to_string()))
    }

    /// Append a detached node as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.get(parent).is_none() {
            return Err(DomError::NodeNotFound(parent));
        }
        let Some(node) = self.get(child) else {
            return Err(DomError::NodeNotFound(child));
        };
        if child == NodeId::ROOT {
            return Err(DomError::InvalidAppend {
                parent,
                child,
                reason: "the document node cannot be a child",
            });
        }
        if node.parent.is_valid() {
            return Err(DomError::InvalidAppend {
                parent,
                child,
                reason: "node already has a parent",
            });
        }
        if parent == child || self.contains(child, parent) {
            return Err(DomError::InvalidAppend { parent, child, reason: "would create a cycle" });
        }

        self.link(parent, child);
        Ok(())
    }

    /// Create an element as the last child of `parent`, which must be a node
    /// of this tree
    pub(crate) fn append_new_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.link(parent, id);
        id
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        let last = self.nodes[parent.0 as usize].last_child;
        {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;
    }

    /// Create an element and append it in one go
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> Result<NodeId, DomError> {
        let id = self.create_element(tag);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Create a text node and append it in one go
    pub fn append_text(&mut self, parent: NodeId, content: &str) -> Result<NodeId, DomError> {
        let id = self.create_text(content);
        self.append_child(parent, id)?;
        Ok(id)
    }

    #[inline]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id)?.as_element_mut()
    }

    /// Tag identity of an element
    pub fn tag(&self, id: NodeId) -> Option<InternedString> {
        self.element(id).map(|e| e.tag)
    }

    /// Lowercased tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.tag(id).map(|tag| self.interner.get(tag))
    }

    pub fn get_attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.to_option()
    }

    /// Parent, if it is an element (`parentElement`)
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&p| self.is_element(p))
    }

    /// All child nodes in order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Element children in order
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(|(_, node)| node.is_element())
            .map(|(child, _)| child)
    }

    /// Ancestor elements, nearest first, excluding `id` itself
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent_element(id),
        }
    }

    /// All descendant nodes of `id` in document (pre-)order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Check whether `node` is `ancestor` or lies inside it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node.to_option();
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// 1-based position of an element among its same-tag element siblings
    pub fn same_tag_index(&self, id: NodeId) -> Option<usize> {
        let tag = self.tag(id)?;
        let mut index = 1;
        let mut sibling = self.get(id)?.prev_sibling;
        while let Some(node) = self.get(sibling) {
            if node.as_element().is_some_and(|e| e.tag == tag) {
                index += 1;
            }
            sibling = node.prev_sibling;
        }
        Some(index)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    pub fn style(&self, id: NodeId) -> Option<&InlineStyle> {
        self.element(id).map(|e| &e.style)
    }

    /// Write one inline style property. Returns false if `id` is not an element.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> bool {
        match self.element_mut(id) {
            Some(elem) => {
                elem.style.set(property, value);
                true
            }
            None => false,
        }
    }

    /// Computed value of a property: the inline declaration if present,
    /// otherwise the property's initial value.
    pub fn computed_style(&self, id: NodeId, property: &str) -> Option<&str> {
        let elem = self.element(id)?;
        Some(elem.style.get(property).unwrap_or_else(|| initial_value(property)))
    }

    pub fn rect(&self, id: NodeId) -> Option<DOMRect> {
        self.element(id)?.rect
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Option<DOMRect>) {
        if let Some(elem) = self.element_mut(id) {
            elem.rect = rect;
        }
    }

    /// First element child of `parent` with the given tag
    pub fn find_child(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        let tag = self.interner.lookup(tag)?;
        self.element_children(parent).find(|&c| self.tag(c) == Some(tag))
    }

    /// All descendant elements with the given tag, in document order
    pub fn elements_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        let Some(tag) = self.interner.lookup(tag) else {
            return Vec::new();
        };
        self.descendants(root).filter(|&d| self.tag(d) == Some(tag)).collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the child nodes of one node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Iterator over ancestor elements
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.parent_element(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next;
        let node = self.tree.get(id)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            // Climb until a node with a next sibling, stopping at the root
            let mut current = id;
            loop {
                if current == self.root {
                    break NodeId::NONE;
                }
                let Some(n) = self.tree.get(current) else {
                    break NodeId::NONE;
                };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                current = n.parent;
                if !current.is_valid() || current == self.root {
                    break NodeId::NONE;
                }
            }
        };
        Some(id)
    }
}
