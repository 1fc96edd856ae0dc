//! Style highlighter
//!
//! Paints the highlight onto an element's inline style and puts the
//! element's original look back afterwards. Originals are kept in a side
//! table keyed by element, captured once per element.

use std::collections::HashMap;

use xpick_dom::{DomTree, NodeId};

use crate::HighlightStyle;

const BACKGROUND: &str = "background-color";
const SHADOW: &str = "box-shadow";
const TRANSITION: &str = "transition";

/// Computed look of an element before it was first highlighted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedStyle {
    pub background: String,
    pub shadow: String,
}

#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    style: HighlightStyle,
    saved: HashMap<NodeId, SavedStyle>,
}

impl Highlighter {
    pub fn new(style: HighlightStyle) -> Self {
        Self {
            style,
            saved: HashMap::new(),
        }
    }

    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }

    /// Highlight an element. Anything that is not an element of `tree`
    /// (including `NodeId::NONE`) is ignored.
    pub fn highlight(&mut self, tree: &mut DomTree, el: NodeId) {
        if !tree.is_element(el) {
            return;
        }

        if !self.saved.contains_key(&el) {
            let saved = SavedStyle {
                background: tree.computed_style(el, BACKGROUND).unwrap_or_default().to_string(),
                shadow: tree.computed_style(el, SHADOW).unwrap_or_default().to_string(),
            };
            tracing::trace!(element = %el, ?saved, "captured original style");
            self.saved.insert(el, saved);
        }

        tree.set_style(el, TRANSITION, &self.style.transition);
        tree.set_style(el, BACKGROUND, &self.style.background);
        tree.set_style(el, SHADOW, &self.style.shadow);
    }

    /// Restore the captured look. An element that was never highlighted gets
    /// its background and shadow cleared.
    pub fn de_highlight(&mut self, tree: &mut DomTree, el: NodeId) {
        if !tree.is_element(el) {
            return;
        }

        let (background, shadow) = self
            .saved
            .get(&el)
            .map_or(("", ""), |s| (s.background.as_str(), s.shadow.as_str()));

        tree.set_style(el, TRANSITION, &self.style.transition);
        tree.set_style(el, BACKGROUND, background);
        tree.set_style(el, SHADOW, shadow);
    }

    /// Check whether an element currently shows the highlight appearance
    pub fn is_highlighted(&self, tree: &DomTree, el: NodeId) -> bool {
        tree.style(el).is_some_and(|style| {
            style.get(BACKGROUND) == Some(self.style.background.as_str())
                && style.get(SHADOW) == Some(self.style.shadow.as_str())
        })
    }

    pub fn saved(&self, el: NodeId) -> Option<&SavedStyle> {
        self.saved.get(&el)
    }

    /// Drop the captured originals of one element
    pub fn forget(&mut self, el: NodeId) -> Option<SavedStyle> {
        self.saved.remove(&el)
    }

    /// Drop every captured original
    pub fn clear(&mut self) {
        self.saved.clear();
    }

    /// Number of elements with captured originals
    pub fn tracked(&self) -> usize {
        self.saved.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xpick_dom::Document;

    fn doc_with_div(style: Option<&str>) -> (Document, NodeId) {
        let mut doc = Document::new("about:blank");
        let body = doc.body();
        let div = doc.tree_mut().append_element(body, "div").unwrap();
        if let Some(style) = style {
            doc.tree_mut().element_mut(div).unwrap().set_attr("style", style);
        }
        (doc, div)
    }

    #[test]
    fn test_highlight_then_restore() {
        let (mut doc, div) = doc_with_div(Some("background-color: blue; box-shadow: 1px 1px red"));
        let mut highlighter = Highlighter::default();

        highlighter.highlight(doc.tree_mut(), div);
        assert!(highlighter.is_highlighted(doc.tree(), div));
        let transition = HighlightStyle::default().transition;
        assert_eq!(doc.tree().computed_style(div, "transition"), Some(transition.as_str()));

        highlighter.de_highlight(doc.tree_mut(), div);
        assert!(!highlighter.is_highlighted(doc.tree(), div));
        assert_eq!(doc.tree().computed_style(div, "background-color"), Some("blue"));
        assert_eq!(doc.tree().computed_style(div, "box-shadow"), Some("1px 1px red"));
    }

    #[test]
    fn test_restore_unstyled_element() {
        let (mut doc, div) = doc_with_div(None);
        let mut highlighter = Highlighter::default();

        highlighter.highlight(doc.tree_mut(), div);
        highlighter.de_highlight(doc.tree_mut(), div);

        assert_eq!(doc.tree().computed_style(div, "background-color"), Some("rgba(0, 0, 0, 0)"));
        assert_eq!(doc.tree().computed_style(div, "box-shadow"), Some("none"));
    }

    #[test]
    fn test_originals_captured_once() {
        let (mut doc, div) = doc_with_div(Some("background-color: green"));
        let mut highlighter = Highlighter::default();

        highlighter.highlight(doc.tree_mut(), div);
        highlighter.highlight(doc.tree_mut(), div);
        assert_eq!(highlighter.saved(div).map(|s| s.background.as_str()), Some("green"));

        for _ in 0..3 {
            highlighter.de_highlight(doc.tree_mut(), div);
            highlighter.highlight(doc.tree_mut(), div);
        }
        highlighter.de_highlight(doc.tree_mut(), div);
        assert_eq!(doc.tree().computed_style(div, "background-color"), Some("green"));
        assert_eq!(highlighter.tracked(), 1);
    }

    #[test]
    fn test_absent_elements_ignored() {
        let (mut doc, _) = doc_with_div(None);
        let mut highlighter = Highlighter::default();
        let root = doc.tree().root();

        highlighter.highlight(doc.tree_mut(), NodeId::NONE);
        highlighter.highlight(doc.tree_mut(), root);
        highlighter.de_highlight(doc.tree_mut(), NodeId::NONE);
        assert_eq!(highlighter.tracked(), 0);
    }

    #[test]
    fn test_de_highlight_without_capture_clears() {
        let (mut doc, div) = doc_with_div(Some("background-color: green"));
        let mut highlighter = Highlighter::default();

        highlighter.de_highlight(doc.tree_mut(), div);
        assert_eq!(doc.tree().style(div).and_then(|s| s.get("background-color")), None);
        assert!(highlighter.saved(div).is_none());
    }
}
