//! Document - High-level document API

use std::collections::HashMap;

use crate::frame::{inherits_origin, same_origin};
use crate::{DomError, DomTree, Frame, FrameAccess, FramePath, NodeId};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    url: String,
    /// URL whose origin the document runs under
    origin: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Embedded frames keyed by their iframe element
    frames: HashMap<NodeId, Frame>,
}

impl Document {
    /// Create a document with the basic html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        let tree = &mut doc.tree;

        let html = tree.append_new_element(tree.root(), "html");
        doc.head_element = tree.append_new_element(html, "head");
        doc.body_element = tree.append_new_element(html, "body");
        doc.html_element = html;
        doc
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            origin: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            frames: HashMap::new(),
        }
    }

    /// Locate <html>, <head> and <body> after the tree was built by hand or
    /// by a parser.
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        self.html_element = tree.find_child(tree.root(), "html").unwrap_or(NodeId::NONE);
        self.head_element = tree.find_child(self.html_element, "head").unwrap_or(NodeId::NONE);
        self.body_element = tree.find_child(self.html_element, "body").unwrap_or(NodeId::NONE);
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// URL of the origin this document runs under. `about:srcdoc` and
    /// `about:blank` documents take their embedder's once loaded into a frame.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn inherit_origin(&mut self, origin: &str) {
        self.origin = origin.to_string();
        for frame in self.frames.values_mut() {
            if let Some(doc) = frame.document_mut().filter(|doc| inherits_origin(doc.url())) {
                doc.inherit_origin(origin);
            }
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .find(|&node| self.tree.get_attr(node, "id") == Some(id))
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Topmost element whose layout box contains the point. Later siblings
    /// paint over earlier ones, and descendants over their ancestors.
    pub fn element_from_point(&self, x: f64, y: f64) -> Option<NodeId> {
        let hit = self.hit_test(self.tree.root(), x, y);
        tracing::trace!(x, y, hit = ?hit, "hit test");
        hit
    }

    fn hit_test(&self, node: NodeId, x: f64, y: f64) -> Option<NodeId> {
        let children: Vec<NodeId> = self.tree.element_children(node).collect();
        for &child in children.iter().rev() {
            if let Some(hit) = self.hit_test(child, x, y) {
                return Some(hit);
            }
        }
        self.tree
            .rect(node)
            .filter(|rect| rect.contains_point(x, y))
            .map(|_| node)
    }

    /// All iframe elements in document order
    pub fn iframes(&self) -> Vec<NodeId> {
        self.tree.elements_by_tag(self.tree.root(), "iframe")
    }

    fn ensure_iframe(&self, iframe: NodeId) -> Result<(), DomError> {
        match self.tree.tag_name(iframe) {
            Some("iframe") => Ok(()),
            Some(_) => Err(DomError::NotAFrame(iframe)),
            None if self.tree.get(iframe).is_some() => Err(DomError::NotAnElement(iframe)),
            None => Err(DomError::NodeNotFound(iframe)),
        }
    }

    /// Start navigating an iframe; its document arrives later via `load_frame`
    pub fn attach_frame(&mut self, iframe: NodeId, src: &str) -> Result<(), DomError> {
        self.ensure_iframe(iframe)?;
        self.frames.insert(iframe, Frame::pending(src));
        Ok(())
    }

    /// Install the loaded document of an iframe, replacing any previous one
    pub fn load_frame(&mut self, iframe: NodeId, mut document: Document) -> Result<(), DomError> {
        self.ensure_iframe(iframe)?;
        if inherits_origin(document.url()) {
            document.inherit_origin(&self.origin);
        }
        let src = self
            .frames
            .get(&iframe)
            .map(|f| f.src.clone())
            .unwrap_or_else(|| document.url().to_string());
        tracing::debug!(frame = %iframe, src = %src, url = %document.url(), "frame loaded");
        self.frames.insert(iframe, Frame::loaded(&src, document));
        Ok(())
    }

    pub fn frame(&self, iframe: NodeId) -> Option<&Frame> {
        self.frames.get(&iframe)
    }

    pub fn frame_mut(&mut self, iframe: NodeId) -> Option<&mut Frame> {
        self.frames.get_mut(&iframe)
    }

    /// Try to reach the document inside an iframe
    pub fn frame_access(&self, iframe: NodeId) -> FrameAccess<'_> {
        if self.ensure_iframe(iframe).is_err() {
            return FrameAccess::NotAFrame;
        }
        let Some(frame) = self.frames.get(&iframe) else {
            return FrameAccess::NotLoaded;
        };
        match frame.document() {
            None => FrameAccess::NotLoaded,
            Some(doc) if same_origin(&self.origin, doc.origin()) => FrameAccess::Accessible(doc),
            Some(_) => FrameAccess::Denied { src: frame.src.clone() },
        }
    }

    /// Document addressed by `path`, if every hop is accessible
    pub fn frame_document_at(&self, path: &FramePath) -> Option<&Document> {
        let mut current = self;
        for &iframe in path.frames() {
            match current.frame_access(iframe) {
                FrameAccess::Accessible(doc) => current = doc,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Mutable document addressed by `path`, if every hop is accessible
    pub fn frame_document_at_mut(&mut self, path: &FramePath) -> Option<&mut Document> {
        let mut current = self;
        for &iframe in path.frames() {
            if !current.frame_access(iframe).is_accessible() {
                return None;
            }
            current = current.frames.get_mut(&iframe)?.document_mut()?;
        }
        Some(current)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DOMRect;

    #[test]
    fn test_new_document_skeleton() {
        let doc = Document::new("https://example.com/");
        let tree = doc.tree();
        assert_eq!(tree.tag_name(doc.document_element()), Some("html"));
        assert_eq!(tree.tag_name(doc.head()), Some("head"));
        assert_eq!(tree.tag_name(doc.body()), Some("body"));
        assert_eq!(tree.parent_element(doc.body()), Some(doc.document_element()));
        assert_eq!(tree.parent(doc.document_element()), Some(tree.root()));
        let children: Vec<NodeId> = tree.children(doc.document_element()).map(|(child, _)| child).collect();
        assert_eq!(children, vec![doc.head(), doc.body()]);
    }

    #[test]
    fn test_finalize_finds_skeleton() {
        let mut doc = Document::empty("about:blank");
        let tree = doc.tree_mut();
        let html = tree.append_element(tree.root(), "html").unwrap();
        let body = tree.append_element(html, "body").unwrap();
        doc.finalize();

        assert_eq!(doc.document_element(), html);
        assert_eq!(doc.body(), body);
        assert!(!doc.head().is_valid());
    }

    #[test]
    fn test_element_from_point_prefers_deepest_and_last() {
        let mut doc = Document::new("about:blank");
        let body = doc.body();
        let tree = doc.tree_mut();
        let a = tree.append_element(body, "div").unwrap();
        let b = tree.append_element(body, "div").unwrap();
        let inner = tree.append_element(a, "span").unwrap();

        tree.set_rect(body, Some(DOMRect::from_xywh(0.0, 0.0, 100.0, 100.0)));
        tree.set_rect(a, Some(DOMRect::from_xywh(0.0, 0.0, 100.0, 50.0)));
        tree.set_rect(inner, Some(DOMRect::from_xywh(0.0, 0.0, 50.0, 20.0)));
        // b overlaps a on purpose
        tree.set_rect(b, Some(DOMRect::from_xywh(0.0, 40.0, 100.0, 60.0)));

        assert_eq!(doc.element_from_point(10.0, 10.0), Some(inner));
        assert_eq!(doc.element_from_point(10.0, 45.0), Some(b));
        assert_eq!(doc.element_from_point(90.0, 30.0), Some(a));
        assert_eq!(doc.element_from_point(500.0, 500.0), None);
    }

    #[test]
    fn test_frame_access_by_origin() {
        let mut doc = Document::new("https://example.com/");
        let body = doc.body();
        let same = doc.tree_mut().append_element(body, "iframe").unwrap();
        let other = doc.tree_mut().append_element(body, "iframe").unwrap();
        let pending = doc.tree_mut().append_element(body, "iframe").unwrap();

        doc.load_frame(same, Document::new("https://example.com/frame")).unwrap();
        doc.attach_frame(other, "https://ads.example.net/").unwrap();
        doc.load_frame(other, Document::new("https://ads.example.net/")).unwrap();
        doc.attach_frame(pending, "https://example.com/slow").unwrap();

        assert!(doc.frame_access(same).is_accessible());
        assert!(matches!(
            doc.frame_access(other),
            FrameAccess::Denied { ref src } if src == "https://ads.example.net/"
        ));
        assert!(matches!(doc.frame_access(pending), FrameAccess::NotLoaded));
        assert!(matches!(doc.frame_access(body), FrameAccess::NotAFrame));
        assert!(doc.attach_frame(body, "x").is_err());

        assert!(doc.frame_document_at(&FramePath::root().child(same)).is_some());
        assert!(doc.frame_document_at_mut(&FramePath::root().child(other)).is_none());
        assert_eq!(doc.iframes(), vec![same, other, pending]);
    }

    #[test]
    fn test_srcdoc_frames_take_embedder_origin() {
        let mut inline = Document::new("about:srcdoc");
        let inline_body = inline.body();
        let nested = inline.tree_mut().append_element(inline_body, "iframe").unwrap();
        let foreign = inline.tree_mut().append_element(inline_body, "iframe").unwrap();
        inline.load_frame(nested, Document::new("https://example.com/nested")).unwrap();
        inline.load_frame(foreign, Document::new("https://ads.example.net/")).unwrap();

        let mut doc = Document::new("https://example.com/");
        let body = doc.body();
        let outer = doc.tree_mut().append_element(body, "iframe").unwrap();
        doc.load_frame(outer, inline).unwrap();

        let path = FramePath::root().child(outer);
        let inline = doc.frame_document_at(&path).unwrap();
        assert_eq!(inline.url(), "about:srcdoc");
        assert_eq!(inline.origin(), "https://example.com/");
        assert!(inline.frame_access(nested).is_accessible());
        assert!(matches!(inline.frame_access(foreign), FrameAccess::Denied { .. }));
        assert!(doc.frame_document_at(&path.child(nested)).is_some());
    }
}
