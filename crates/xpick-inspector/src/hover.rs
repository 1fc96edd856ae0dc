//! Hover tracking
//!
//! Keeps at most one non-selected element highlighted: the one under the
//! pointer. Selected elements keep their highlight and are never hover
//! targets.

use xpick_dom::{Document, NodeId};

use crate::Highlighter;

#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    hovered: Option<NodeId>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current hover reference
    pub fn current(&self) -> Option<NodeId> {
        self.hovered
    }

    /// Handle a pointer move to document coordinates `(x, y)`. Returns the
    /// hover reference after the move.
    pub fn track_pointer(
        &mut self,
        doc: &mut Document,
        highlighter: &mut Highlighter,
        selection: &[NodeId],
        x: f64,
        y: f64,
    ) -> Option<NodeId> {
        let Some(hit) = doc.element_from_point(x, y) else {
            return self.hovered;
        };
        if selection.contains(&hit) {
            return self.hovered;
        }

        if let Some(previous) = self.hovered {
            if previous != hit && !selection.contains(&previous) {
                highlighter.de_highlight(doc.tree_mut(), previous);
            }
        }

        highlighter.highlight(doc.tree_mut(), hit);
        if self.hovered != Some(hit) {
            tracing::trace!(element = %hit, x, y, "hover target changed");
        }
        self.hovered = Some(hit);
        self.hovered
    }

    /// The pointer left the document
    pub fn leave(
        &mut self,
        doc: &mut Document,
        highlighter: &mut Highlighter,
        selection: &[NodeId],
    ) {
        if let Some(previous) = self.hovered.take() {
            if !selection.contains(&previous) {
                highlighter.de_highlight(doc.tree_mut(), previous);
            }
        }
    }

    /// Drop the hover reference if it is `el` (it just became selected)
    pub fn release(&mut self, el: NodeId) {
        if self.hovered == Some(el) {
            self.hovered = None;
        }
    }
}
