//! Block layout
//!
//! Just enough layout to give every rendered element a box so pointer
//! coordinates can be hit-tested: each element is a block stacked under its
//! previous sibling, text runs take one line, and frames are fixed-size
//! replaced boxes whose documents get their own coordinate space.

use crate::{DOMRect, Document, DomTree, NodeId};

/// Elements that never generate a box
const NOT_RENDERED: &[&str] = &[
    "head", "script", "style", "title", "meta", "link", "template", "noscript",
];

/// Default replaced size of an iframe
const FRAME_WIDTH: f64 = 300.0;
const FRAME_HEIGHT: f64 = 150.0;

/// Layout parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub viewport_width: f64,
    /// Height of one text run, and of an element with no content
    pub line_height: f64,
    /// Horizontal inset applied at every nesting level
    pub indent: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            line_height: 20.0,
            indent: 0.0,
        }
    }
}

/// Naive block layout engine
#[derive(Debug, Clone, Default)]
pub struct BlockLayout {
    config: LayoutConfig,
}

impl BlockLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out a document and every loaded frame inside it. Returns the
    /// height of the root document's content.
    pub fn run(&self, doc: &mut Document) -> f64 {
        let tree = doc.tree_mut();
        let roots: Vec<NodeId> = tree.element_children(tree.root()).collect();
        let mut height = 0.0;
        for root in roots {
            height += self.layout_element(tree, root, 0.0, height, self.config.viewport_width);
        }
        tracing::debug!(url = %doc.url(), height, "layout complete");

        for iframe in doc.iframes() {
            let Some(rect) = doc.tree().rect(iframe) else {
                continue;
            };
            if let Some(content) = doc.frame_mut(iframe).and_then(|f| f.document_mut()) {
                let nested = BlockLayout::new(LayoutConfig {
                    viewport_width: rect.width,
                    ..self.config
                });
                nested.run(content);
            }
        }

        height
    }

    fn layout_element(&self, tree: &mut DomTree, id: NodeId, x: f64, y: f64, width: f64) -> f64 {
        let tag = tree.tag_name(id).unwrap_or("");
        if NOT_RENDERED.contains(&tag) {
            clear_subtree(tree, id);
            return 0.0;
        }
        if tag == "iframe" {
            let rect = DOMRect::from_xywh(x, y, width.min(FRAME_WIDTH), FRAME_HEIGHT);
            tree.set_rect(id, Some(rect));
            return FRAME_HEIGHT;
        }

        let inner_x = x + self.config.indent;
        let inner_width = (width - 2.0 * self.config.indent).max(0.0);
        let children: Vec<NodeId> = tree.children(id).map(|(child, _)| child).collect();

        let mut cursor = y;
        for child in children {
            if tree.is_element(child) {
                cursor += self.layout_element(tree, child, inner_x, cursor, inner_width);
            } else if tree
                .get(child)
                .and_then(|n| n.as_text())
                .is_some_and(|t| !t.trim().is_empty())
            {
                cursor += self.config.line_height;
            }
        }

        let height = match cursor - y {
            h if h > 0.0 => h,
            _ => self.config.line_height,
        };
        tree.set_rect(id, Some(DOMRect::from_xywh(x, y, width, height)));
        height
    }
}

fn clear_subtree(tree: &mut DomTree, id: NodeId) {
    let nodes: Vec<NodeId> = std::iter::once(id).chain(tree.descendants(id)).collect();
    for node in nodes {
        tree.set_rect(node, None);
    }
}
