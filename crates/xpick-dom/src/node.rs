//! DOM Node - Compact representation
//!
//! Nodes link to each other through `NodeId`s, never through owning
//! pointers, so handing a node id to the picker takes no ownership.

use crate::{DOMRect, InlineStyle, InternedString, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: InternedString) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    pub fn text(content: String) -> Self {
        Self::with_data(NodeData::Text(content))
    }

    pub fn comment(content: String) -> Self {
        Self::with_data(NodeData::Comment(content))
    }

    pub fn doctype(name: String) -> Self {
        Self::with_data(NodeData::Doctype { name })
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    Doctype { name: String },
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercased tag name
    pub tag: InternedString,
    /// Attributes in source order (the `style` attribute lives in `style`)
    pub attrs: Vec<(String, String)>,
    /// Mutable visual-style surface
    pub style: InlineStyle,
    /// Border box assigned by layout; `None` when not rendered
    pub rect: Option<DOMRect>,
}

impl ElementData {
    pub fn new(tag: InternedString) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            style: InlineStyle::new(),
            rect: None,
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        if name.eq_ignore_ascii_case("style") {
            return None;
        }
        self.attrs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute. `style` is parsed into the inline style surface.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if name.eq_ignore_ascii_case("style") {
            self.style = InlineStyle::parse(value);
            return;
        }
        match self.attrs.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attrs.push((name.to_ascii_lowercase(), value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_attr_goes_to_inline_style() {
        let mut elem = ElementData::new(InternedString(1));
        elem.set_attr("style", "background-color: red");
        elem.set_attr("id", "main");

        assert_eq!(elem.style.get("background-color"), Some("red"));
        assert_eq!(elem.get_attr("style"), None);
        assert_eq!(elem.get_attr("ID"), Some("main"));
    }

    #[test]
    fn test_node_kinds() {
        assert!(Node::element(InternedString(1)).is_element());
        assert_eq!(Node::text("hi".into()).as_text(), Some("hi"));
        assert!(Node::document().as_element().is_none());
    }
}
